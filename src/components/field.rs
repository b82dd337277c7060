//! Form field components.

use maud::{html, Markup, Render};

/// An input element.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    /// Input name attribute
    pub name: &'a str,
    /// Input type ("text", "password", "email", ...)
    pub r#type: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> Input<'a> {
    #[must_use]
    pub const fn new(name: &'a str, r#type: &'a str) -> Self {
        Self {
            name,
            r#type,
            value: None,
            placeholder: None,
            id: None,
        }
    }

    #[must_use]
    pub const fn text(name: &'a str) -> Self {
        Self::new(name, "text")
    }

    #[must_use]
    pub const fn email(name: &'a str) -> Self {
        Self::new(name, "email")
    }

    #[must_use]
    pub const fn password(name: &'a str) -> Self {
        Self::new(name, "password")
    }

    /// Set the current value. Empty values are omitted from the markup.
    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value).filter(|v| !v.is_empty());
        self
    }

    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the element id. The name doubles as the id when none is given.
    #[must_use]
    pub const fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for Input<'_> {
    fn render(&self) -> Markup {
        html! {
            input
                type=(self.r#type)
                name=(self.name)
                id=(self.id.unwrap_or(self.name))
                value=[self.value]
                placeholder=[self.placeholder];
        }
    }
}

/// A textarea element.
#[derive(Debug, Clone)]
pub struct TextArea<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> TextArea<'a> {
    #[must_use]
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            value: None,
            placeholder: None,
            id: None,
        }
    }

    #[must_use]
    pub const fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub const fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for TextArea<'_> {
    fn render(&self) -> Markup {
        html! {
            textarea name=(self.name) id=[self.id] placeholder=[self.placeholder] {
                @if let Some(value) = self.value {
                    (value)
                }
            }
        }
    }
}

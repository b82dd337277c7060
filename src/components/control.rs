//! Clickable controls.
//!
//! Controls render as `<a>` elements with a `#` href; the page has no real
//! navigation targets.

use maud::{html, Markup, Render};

use super::class_list;

/// Control style variants matching CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlVariant {
    /// Header navigation action (`.action`), toggles a panel.
    Action,
    /// Form submit button (`.button`).
    #[default]
    Button,
    /// Owner-only delete control (`.button .delete`).
    Delete,
    /// Panel close control (`.close`).
    Close,
}

impl ControlVariant {
    /// Returns the CSS class(es) for this variant.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Button => "button",
            Self::Delete => "button delete",
            Self::Close => "close",
        }
    }
}

/// A clickable control.
///
/// ```ignore
/// let delete = Control::delete("Delete")
///     .class("delete-post")
///     .hidden(!is_owner);
/// ```
#[derive(Debug, Clone)]
pub struct Control<'a> {
    pub label: &'a str,
    pub variant: ControlVariant,
    pub id: Option<&'a str>,
    /// Additional CSS classes
    pub class: Option<&'a str>,
    pub hidden: bool,
}

impl<'a> Control<'a> {
    #[must_use]
    pub const fn new(label: &'a str, variant: ControlVariant) -> Self {
        Self {
            label,
            variant,
            id: None,
            class: None,
            hidden: false,
        }
    }

    #[must_use]
    pub const fn action(label: &'a str) -> Self {
        Self::new(label, ControlVariant::Action)
    }

    #[must_use]
    pub const fn button(label: &'a str) -> Self {
        Self::new(label, ControlVariant::Button)
    }

    #[must_use]
    pub const fn delete(label: &'a str) -> Self {
        Self::new(label, ControlVariant::Delete)
    }

    #[must_use]
    pub const fn close() -> Self {
        Self::new("×", ControlVariant::Close)
    }

    #[must_use]
    pub const fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub const fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    fn build_class(&self) -> String {
        let mut classes = self.variant.class().to_string();
        if let Some(extra) = self.class {
            classes.push(' ');
            classes.push_str(extra);
        }
        class_list(&classes, self.hidden)
    }
}

impl Render for Control<'_> {
    fn render(&self) -> Markup {
        html! {
            a href="#" class=(self.build_class()) id=[self.id] {
                (self.label)
            }
        }
    }
}

//! Modal panel container.

use maud::{html, Markup, Render};

use super::{class_list, Control};

/// A modal form shown over the page background.
#[derive(Debug)]
pub struct Panel<'a> {
    pub id: &'a str,
    pub title: &'a str,
    /// Form content (fields, messages, submit control)
    pub content: Markup,
    pub hidden: bool,
}

impl<'a> Panel<'a> {
    #[must_use]
    pub const fn new(id: &'a str, title: &'a str, content: Markup) -> Self {
        Self {
            id,
            title,
            content,
            hidden: false,
        }
    }

    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl Render for Panel<'_> {
    fn render(&self) -> Markup {
        html! {
            form id=(self.id) class=(class_list("modal", self.hidden)) {
                (Control::close())
                h2 { (self.title) }
                (self.content)
            }
        }
    }
}

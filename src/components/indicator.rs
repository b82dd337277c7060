//! Inline status messages.

use maud::{html, Markup, Render};

use super::class_list;

/// A message that lives inside a form and is toggled rather than removed,
/// like the "Invalid Login" line of the sign-in panel.
#[derive(Debug, Clone)]
pub struct InlineMessage<'a> {
    pub class: &'a str,
    pub text: &'a str,
    pub hidden: bool,
}

impl<'a> InlineMessage<'a> {
    /// An error line (`.error`).
    #[must_use]
    pub const fn error(text: &'a str) -> Self {
        Self {
            class: "error",
            text,
            hidden: false,
        }
    }

    #[must_use]
    pub const fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl Render for InlineMessage<'_> {
    fn render(&self) -> Markup {
        html! {
            p class=(class_list(self.class, self.hidden)) { (self.text) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let html = InlineMessage::error("Invalid Login").render().into_string();
        assert_eq!(html, r#"<p class="error">Invalid Login</p>"#);
    }

    #[test]
    fn test_hidden_error_message() {
        let html = InlineMessage::error("Invalid Login")
            .hidden(true)
            .render()
            .into_string();
        assert!(html.contains(r#"class="error hidden""#));
    }
}

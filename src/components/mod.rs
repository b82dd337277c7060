//! Maud components for the client document.
//!
//! Every component takes an optional element id and a `hidden` flag. Visibility
//! is expressed only through the `hidden` class, so a control that is not
//! available is still present in the document and can be located by id.
//!
//! - `control`: nav actions and buttons (sign in, delete, add comment, ...)
//! - `field`: text inputs and textareas
//! - `panel`: modal forms (sign in, sign up, compose, profile)
//! - `indicator`: inline status messages such as the sign-in error

pub mod control;
pub mod field;
pub mod indicator;
pub mod panel;

pub use control::{Control, ControlVariant};
pub use field::{Input, TextArea};
pub use indicator::InlineMessage;
pub use panel::Panel;

use crate::constants::HIDDEN_CLASS;

/// Join a base class list with the `hidden` class when `hidden` is set.
#[must_use]
pub fn class_list(base: &str, hidden: bool) -> String {
    match (base.is_empty(), hidden) {
        (_, false) => base.to_string(),
        (true, true) => HIDDEN_CLASS.to_string(),
        (false, true) => format!("{base} {HIDDEN_CLASS}"),
    }
}

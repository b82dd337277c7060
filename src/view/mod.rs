//! The rendered document and the UI state that is not derived from content.

pub mod inspect;
pub mod page;

use crate::session::Profile;

pub use inspect::PageInspector;
pub use page::{render_page, PageModel};

/// The modal panels of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    SignIn,
    SignUp,
    Compose,
    Profile,
}

impl PanelKind {
    /// Element id of the panel in the rendered document.
    #[must_use]
    pub const fn element_id(&self) -> &'static str {
        match self {
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
            Self::Compose => "post",
            Self::Profile => "profile",
        }
    }
}

/// Unsubmitted contents of the compose form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeDraft {
    pub title: String,
    pub description: String,
}

impl ComposeDraft {
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

/// Presentation state owned by the client rather than the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// At most one modal is open; the background shows while one is.
    pub open_panel: Option<PanelKind>,
    /// Inline "Invalid Login" indicator in the sign-in panel.
    pub sign_in_error: bool,
    pub compose: ComposeDraft,
    /// Last profile fetched for the signed-in user.
    pub profile: Option<Profile>,
}

impl UiState {
    pub fn open(&mut self, panel: PanelKind) {
        self.open_panel = Some(panel);
    }

    pub fn close(&mut self) {
        self.open_panel = None;
    }

    /// Close `panel` if it is the one showing.
    pub fn close_if(&mut self, panel: PanelKind) {
        if self.open_panel == Some(panel) {
            self.open_panel = None;
        }
    }

    /// Drop everything tied to the signed-in user.
    pub fn reset_for_sign_out(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_if_only_closes_matching_panel() {
        let mut ui = UiState::default();
        ui.open(PanelKind::Profile);
        ui.close_if(PanelKind::Compose);
        assert_eq!(ui.open_panel, Some(PanelKind::Profile));
        ui.close_if(PanelKind::Profile);
        assert_eq!(ui.open_panel, None);
    }

    #[test]
    fn test_reset_for_sign_out_drops_user_state() {
        let mut ui = UiState {
            open_panel: Some(PanelKind::Compose),
            sign_in_error: true,
            compose: ComposeDraft {
                title: "draft".to_string(),
                description: "text".to_string(),
            },
            profile: Some(Profile {
                username: "alice".to_string(),
                ..Profile::default()
            }),
        };
        ui.reset_for_sign_out();
        assert_eq!(ui, UiState::default());
    }
}

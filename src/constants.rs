//! Shared constants used across the application.

/// User agent string sent with every API request.
pub const CLIENT_USER_AGENT: &str = concat!("postboard-client/", env!("CARGO_PKG_VERSION"));

/// Durable storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Durable storage key holding the username validated for the stored token.
pub const USERNAME_KEY: &str = "username";

/// CSS class that hides an element in the rendered document.
pub const HIDDEN_CLASS: &str = "hidden";

/// Alert shown after the profile fields were saved.
pub const PROFILE_SAVED_MESSAGE: &str = "Successfully Updated Profile.";

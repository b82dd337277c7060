//! Postboard client library.
//!
//! A client for a small posting service: users sign in, write posts, comment on
//! posts and delete what they wrote. The client keeps a bearer-token session,
//! re-fetches the full post/comment tree after every change and renders it to an
//! HTML document.

// Allow raw string hashes for safety - they're harmless and prevent issues if content changes
#![allow(clippy::needless_raw_string_hashes)]

pub mod api;
pub mod command;
pub mod components;
pub mod config;
pub mod constants;
pub mod content;
pub mod controller;
pub mod error;
pub mod notify;
pub mod session;
pub mod view;

pub use controller::{Board, SyncStatus};
pub use error::{ClientError, Operation};

//! The client orchestrator.
//!
//! [`Board`] owns the session store, the API client, the content tree and the
//! rendered document. Every user interaction is one async method on it; the
//! document is re-rendered from scratch after each state change.

mod mutation;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::config::Config;
use crate::content::{ContentTree, FullSync, Synchronizer};
use crate::error::{ClientError, Operation};
use crate::notify::Notifier;
use crate::session::{AuthState, FileStore, SessionStore};
use crate::view::{render_page, PageInspector, PageModel, PanelKind, UiState};

/// How a call to [`Board::sync_all`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// The fetched tree replaced the previous one and the page was rendered.
    Rendered,
    /// A newer sync started first; this result was dropped.
    Superseded,
    /// The post list could not be fetched; the previous render stays.
    Failed,
}

struct BoardState {
    auth: AuthState,
    ui: UiState,
    tree: ContentTree,
    page: String,
    renders: u64,
    sync_token: CancellationToken,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            auth: AuthState::Anonymous,
            ui: UiState::default(),
            tree: ContentTree::default(),
            page: String::new(),
            renders: 0,
            sync_token: CancellationToken::new(),
        }
    }
}

pub struct Board {
    api: ApiClient,
    session: SessionStore,
    synchronizer: Box<dyn Synchronizer>,
    notifier: Arc<dyn Notifier>,
    render_path: Option<PathBuf>,
    clear_stale_token: bool,
    state: Mutex<BoardState>,
}

impl Board {
    #[must_use]
    pub fn new(api: ApiClient, session: SessionStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            session,
            synchronizer: Box::new(FullSync),
            notifier,
            render_path: None,
            clear_stale_token: true,
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Build a board with file-backed session storage and the document written
    /// to the configured render path.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the stored
    /// session cannot be read.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self, ClientError> {
        let api = ApiClient::new(config)?;
        let session = SessionStore::load(Box::new(FileStore::new(&config.session_path)))?;
        Ok(Self::new(api, session, notifier)
            .with_render_path(config.render_path.clone())
            .with_clear_stale_token(config.clear_stale_token))
    }

    #[must_use]
    pub fn with_synchronizer(mut self, synchronizer: Box<dyn Synchronizer>) -> Self {
        self.synchronizer = synchronizer;
        self
    }

    /// Write the document to `path` after every render.
    #[must_use]
    pub fn with_render_path(mut self, path: PathBuf) -> Self {
        self.render_path = Some(path);
        self
    }

    /// Whether a restore rejected with 401/403 forgets the stored session.
    #[must_use]
    pub const fn with_clear_stale_token(mut self, clear: bool) -> Self {
        self.clear_stale_token = clear;
        self
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn auth_state(&self) -> AuthState {
        self.state.lock().await.auth
    }

    pub async fn ui(&self) -> UiState {
        self.state.lock().await.ui.clone()
    }

    pub async fn tree(&self) -> ContentTree {
        self.state.lock().await.tree.clone()
    }

    /// The most recently rendered document.
    pub async fn page(&self) -> String {
        self.state.lock().await.page.clone()
    }

    /// Number of renders so far.
    pub async fn render_count(&self) -> u64 {
        self.state.lock().await.renders
    }

    /// Parse the current document for queries.
    pub async fn inspect(&self) -> PageInspector {
        PageInspector::parse(&self.page().await)
    }

    /// Show one panel, hiding any other.
    pub async fn open_panel(&self, panel: PanelKind) {
        let mut state = self.state.lock().await;
        state.ui.open(panel);
        self.render(&mut state).await;
    }

    pub async fn close_panel(&self) {
        let mut state = self.state.lock().await;
        state.ui.close();
        self.render(&mut state).await;
    }

    /// Re-fetch every post and comment and re-render.
    ///
    /// Starting a sync cancels any sync still in flight; the cancelled one
    /// neither renders nor alerts.
    pub async fn sync_all(&self) -> SyncStatus {
        let token = {
            let mut state = self.state.lock().await;
            state.sync_token.cancel();
            state.sync_token = CancellationToken::new();
            state.sync_token.clone()
        };

        let result = tokio::select! {
            biased;
            () = token.cancelled() => None,
            result = self.synchronizer.sync(&self.api) => Some(result),
        };

        let Some(result) = result else {
            debug!("Sync superseded while fetching");
            return SyncStatus::Superseded;
        };

        let mut state = self.state.lock().await;
        if token.is_cancelled() {
            debug!("Sync superseded before render");
            return SyncStatus::Superseded;
        }

        match result {
            Ok(report) => {
                for failure in &report.failures {
                    warn!(post_id = failure.post_id, "Rendering post without comments");
                    self.alert(&failure.error.to_string());
                }
                info!(
                    posts = report.tree.posts.len(),
                    comment_failures = report.failures.len(),
                    "Content synchronized"
                );
                state.tree = report.tree;
                self.render(&mut state).await;
                SyncStatus::Rendered
            }
            Err(error) => {
                warn!(error = %error, "Sync failed, keeping previous render");
                self.alert(&error.to_string());
                SyncStatus::Failed
            }
        }
    }

    async fn render(&self, state: &mut BoardState) {
        let username = self.session.username();
        let viewer = match state.auth {
            AuthState::Authenticated => username.as_deref(),
            AuthState::Anonymous | AuthState::Authenticating => None,
        };

        let page = render_page(&PageModel {
            viewer,
            ui: &state.ui,
            tree: &state.tree,
        })
        .into_string();

        state.renders += 1;
        debug!(render = state.renders, bytes = page.len(), "Page rendered");

        if let Some(path) = &self.render_path {
            if let Err(e) = tokio::fs::write(path, &page).await {
                warn!(path = %path.display(), error = %e, "Failed to write rendered page");
            }
        }
        state.page = page;
    }

    fn alert(&self, message: &str) {
        self.notifier.alert(message);
    }

    /// Alert the user about `error` and hand it back.
    fn report(&self, error: ClientError) -> ClientError {
        self.alert(&error.to_string());
        error
    }

    /// The stored token, read at call time.
    fn token_for(&self, operation: Operation) -> Result<String, ClientError> {
        self.session
            .token()
            .ok_or_else(|| self.report(ClientError::NotSignedIn { operation }))
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("api", &self.api)
            .field("session", &self.session)
            .field("render_path", &self.render_path)
            .finish_non_exhaustive()
    }
}

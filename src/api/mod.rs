//! Typed client for the posting service's REST API.
//!
//! Each call names the [`Operation`] it performs; any response other than the
//! operation's success status becomes a [`ClientError`] whose message is the
//! operation's user-facing text.

pub mod models;

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::CLIENT_USER_AGENT;
use crate::error::{ClientError, Operation};

pub use models::{
    CommentRecord, Credentials, NewComment, NewPost, PostRecord, ProfileFields, ProfileResponse,
    Registration, TokenResponse, UserRef,
};

/// HTTP client bound to one API host.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(CLIENT_USER_AGENT)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ClientError> {
        let request = self.request(Method::POST, "/login", None).json(credentials);
        self.execute_json(Operation::Login, request).await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or registration is rejected.
    pub async fn signup(&self, registration: &Registration) -> Result<TokenResponse, ClientError> {
        let request = self
            .request(Method::POST, "/signup", None)
            .json(registration);
        self.execute_json(Operation::Signup, request).await
    }

    /// Fetch the identity and profile fields behind a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    pub async fn fetch_profile(&self, token: &str) -> Result<ProfileResponse, ClientError> {
        let request = self.request(Method::GET, "/profile", Some(token));
        self.execute_json(Operation::FetchProfile, request).await
    }

    /// Create or update profile fields.
    ///
    /// `operation` is [`Operation::CreateProfile`] right after signup and
    /// [`Operation::SaveProfile`] for user edits; only the failure message differs.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn save_profile(
        &self,
        operation: Operation,
        token: &str,
        fields: &ProfileFields,
    ) -> Result<serde_json::Value, ClientError> {
        let request = self
            .request(Method::POST, "/profile", Some(token))
            .json(fields);
        self.execute_json(operation, request).await
    }

    /// Fetch every post, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a post list.
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>, ClientError> {
        let request = self.request(Method::GET, "/post/list", None);
        self.execute_json(Operation::ListPosts, request).await
    }

    /// Fetch the comments of one post, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a comment list.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<CommentRecord>, ClientError> {
        let path = format!("/post/{post_id}/comment");
        let request = self.request(Method::GET, &path, None);
        self.execute_json(Operation::ListComments, request).await
    }

    /// Create a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_post(
        &self,
        token: &str,
        post: &NewPost,
    ) -> Result<serde_json::Value, ClientError> {
        let request = self.request(Method::POST, "/post", Some(token)).json(post);
        self.execute_json(Operation::CreatePost, request).await
    }

    /// Delete a post. Ownership is enforced by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_post(&self, token: &str, post_id: i64) -> Result<(), ClientError> {
        let path = format!("/post/{post_id}");
        let request = self.request(Method::DELETE, &path, Some(token));
        self.execute(Operation::DeletePost, request).await.map(drop)
    }

    /// Comment on a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_comment(
        &self,
        token: &str,
        post_id: i64,
        comment: &NewComment,
    ) -> Result<serde_json::Value, ClientError> {
        let path = format!("/comment/{post_id}");
        let request = self
            .request(Method::POST, &path, Some(token))
            .json(comment);
        self.execute_json(Operation::CreateComment, request).await
    }

    /// Delete a comment. Ownership is enforced by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_comment(&self, token: &str, comment_id: i64) -> Result<(), ClientError> {
        let path = format!("/comment/{comment_id}");
        let request = self.request(Method::DELETE, &path, Some(token));
        self.execute(Operation::DeleteComment, request)
            .await
            .map(drop)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|source| {
            warn!(?operation, error = %source, "No response from API");
            ClientError::NetworkUnavailable { operation, source }
        })?;

        let status = response.status();
        if !operation.accepts(status) {
            warn!(?operation, status = %status, url = %response.url(), "API rejected request");
            return Err(ClientError::RequestFailed { operation, status });
        }

        debug!(?operation, status = %status, "API request succeeded");
        Ok(response)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.execute(operation, request).await?;
        response.json::<T>().await.map_err(|source| {
            warn!(?operation, error = %source, "Failed to parse API response");
            ClientError::Decode { operation, source }
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

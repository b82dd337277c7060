//! Full resynchronization of the content tree.
//!
//! The list fetch fixes the post order; comment fetches then run concurrently
//! and each result is attached to its own post regardless of completion order.

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

use super::{Comment, ContentTree, Post};
use crate::api::ApiClient;
use crate::error::ClientError;

/// A comment fetch that failed for one post.
#[derive(Debug)]
pub struct CommentFetchFailure {
    pub post_id: i64,
    pub error: ClientError,
}

/// Result of a synchronization that got the post list.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub tree: ContentTree,
    /// Posts whose comments could not be fetched. They are still in `tree`,
    /// with no comments.
    pub failures: Vec<CommentFetchFailure>,
}

/// Strategy for bringing the local content tree up to date.
#[async_trait]
pub trait Synchronizer: Send + Sync {
    /// Fetch content and build a fresh tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the post list itself cannot be fetched.
    async fn sync(&self, api: &ApiClient) -> Result<SyncReport, ClientError>;
}

/// Re-fetches everything on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullSync;

#[async_trait]
impl Synchronizer for FullSync {
    async fn sync(&self, api: &ApiClient) -> Result<SyncReport, ClientError> {
        let mut records = api.list_posts().await?;
        records.reverse();
        debug!(posts = records.len(), "Fetched post list");

        let comment_fetches = records.iter().map(|record| api.list_comments(record.id));
        let comment_results = join_all(comment_fetches).await;

        let mut report = SyncReport::default();
        for (record, result) in records.into_iter().zip(comment_results) {
            let comments = match result {
                Ok(comments) => comments.into_iter().map(Comment::from).collect(),
                Err(error) => {
                    warn!(post_id = record.id, error = %error, "Comment fetch failed");
                    report.failures.push(CommentFetchFailure {
                        post_id: record.id,
                        error,
                    });
                    Vec::new()
                }
            };
            report.tree.posts.push(Post::from_record(record, comments));
        }

        Ok(report)
    }
}

//! The post/comment tree the view is rendered from.

pub mod sync;

use crate::api::{CommentRecord, PostRecord};

pub use sync::{CommentFetchFailure, FullSync, SyncReport, Synchronizer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub author: Author,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub author: Author,
    /// Comments in the order the server returned them.
    pub comments: Vec<Comment>,
}

impl Post {
    /// Build a post from its list entry and its fetched comments.
    #[must_use]
    pub fn from_record(record: PostRecord, comments: Vec<Comment>) -> Self {
        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            author: Author {
                username: record.user.username,
            },
            comments,
        }
    }
}

impl From<CommentRecord> for Comment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            text: record.text.unwrap_or_default(),
            author: Author {
                username: record.user.username,
            },
        }
    }
}

/// Posts newest first, as produced by one full synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTree {
    pub posts: Vec<Post>,
}

impl ContentTree {
    #[must_use]
    pub fn post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

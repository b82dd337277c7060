//! Post and comment mutations.
//!
//! Each mutation reads the token from the session store when it runs and, on
//! success, re-synchronizes everything. Failures alert and leave the page as it
//! was.

use tracing::info;

use super::Board;
use crate::api::{NewComment, NewPost};
use crate::error::{ClientError, Operation};
use crate::view::PanelKind;

impl Board {
    /// # Errors
    ///
    /// Returns an error if there is no session or the post is rejected.
    pub async fn create_post(&self, title: &str, description: &str) -> Result<(), ClientError> {
        let token = self.token_for(Operation::CreatePost)?;
        let post = NewPost {
            title: title.to_string(),
            description: description.to_string(),
        };
        if let Err(error) = self.api.create_post(&token, &post).await {
            return Err(self.report(error));
        }
        info!(title = %title, "Post created");

        {
            let mut state = self.state.lock().await;
            state.ui.compose.clear();
            state.ui.close_if(PanelKind::Compose);
        }
        self.sync_all().await;
        Ok(())
    }

    /// Post whatever is in the compose form.
    ///
    /// # Errors
    ///
    /// Same as [`Board::create_post`].
    pub async fn submit_compose(&self) -> Result<(), ClientError> {
        let draft = self.state.lock().await.ui.compose.clone();
        self.create_post(&draft.title, &draft.description).await
    }

    /// Replace the compose draft and show the compose panel.
    pub async fn update_compose(&self, title: &str, description: &str) {
        let mut state = self.state.lock().await;
        state.ui.compose.title = title.to_string();
        state.ui.compose.description = description.to_string();
        state.ui.open(PanelKind::Compose);
        self.render(&mut state).await;
    }

    /// # Errors
    ///
    /// Returns an error if there is no session or the server refuses, which
    /// includes deleting someone else's post.
    pub async fn delete_post(&self, post_id: i64) -> Result<(), ClientError> {
        let token = self.token_for(Operation::DeletePost)?;
        if let Err(error) = self.api.delete_post(&token, post_id).await {
            return Err(self.report(error));
        }
        info!(post_id, "Post deleted");
        self.sync_all().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if there is no session or the comment is rejected.
    pub async fn create_comment(&self, post_id: i64, text: &str) -> Result<(), ClientError> {
        let token = self.token_for(Operation::CreateComment)?;
        let comment = NewComment {
            text: text.to_string(),
        };
        if let Err(error) = self.api.create_comment(&token, post_id, &comment).await {
            return Err(self.report(error));
        }
        info!(post_id, "Comment created");
        self.sync_all().await;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if there is no session or the server refuses.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<(), ClientError> {
        let token = self.token_for(Operation::DeleteComment)?;
        if let Err(error) = self.api.delete_comment(&token, comment_id).await {
            return Err(self.report(error));
        }
        info!(comment_id, "Comment deleted");
        self.sync_all().await;
        Ok(())
    }
}

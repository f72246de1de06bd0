//! # Comment Author Decorator
//!
//! Attaches a human-readable `authorName` to comments by resolving
//! `user_id -> username`, falling back to "Unknown" when the user record is
//! missing. Used on comment creation and on board-comment listing; order
//! preserving, read-only, idempotent.

use std::sync::Arc;

use serde::Serialize;

use mb_core::{Comment, Result, UserStore};

/// Shown when the author's user record no longer exists.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub author_name: String,
}

#[derive(Clone)]
pub struct CommentAuthors {
    users: Arc<dyn UserStore>,
}

impl CommentAuthors {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn with_author(&self, comment: Comment) -> Result<CommentWithAuthor> {
        let mut decorated = self.with_authors(vec![comment]).await?;
        // with_authors returns exactly one entry per input
        Ok(decorated.remove(0))
    }

    /// Decorates a batch with one username lookup, preserving input order.
    pub async fn with_authors(&self, comments: Vec<Comment>) -> Result<Vec<CommentWithAuthor>> {
        let mut author_ids: Vec<_> = comments.iter().map(|c| c.user_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let usernames = self.users.usernames_by_ids(&author_ids).await?;

        Ok(comments
            .into_iter()
            .map(|comment| CommentWithAuthor {
                author_name: usernames
                    .get(&comment.user_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                comment,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::MockUserStore;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[tokio::test]
    async fn decorates_single_and_batch_uniformly() {
        let author = Uuid::now_v7();
        let board = Uuid::now_v7();

        let mut users = MockUserStore::new();
        users.expect_usernames_by_ids().returning(move |_| {
            Ok(HashMap::from([(author, "funkyshrimp".to_string())]))
        });
        let decorator = CommentAuthors::new(Arc::new(users));

        let single = decorator
            .with_author(Comment::new(author, board, None, "Sausage".into()).unwrap())
            .await
            .unwrap();
        assert_eq!(single.author_name, "funkyshrimp");

        let batch = decorator
            .with_authors(vec![
                Comment::new(author, board, None, "one".into()).unwrap(),
                Comment::new(author, board, None, "two".into()).unwrap(),
            ])
            .await
            .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].comment.content, "one");
        assert_eq!(batch[1].comment.content, "two");
    }

    #[tokio::test]
    async fn missing_author_falls_back_to_unknown() {
        let mut users = MockUserStore::new();
        users.expect_usernames_by_ids().returning(|_| Ok(HashMap::new()));
        let decorator = CommentAuthors::new(Arc::new(users));

        let decorated = decorator
            .with_author(Comment::new(Uuid::now_v7(), Uuid::now_v7(), None, "hi".into()).unwrap())
            .await
            .unwrap();
        assert_eq!(decorated.author_name, UNKNOWN_AUTHOR);
    }

    #[tokio::test]
    async fn serializes_flat_with_author_name() {
        let author = Uuid::now_v7();
        let mut users = MockUserStore::new();
        users.expect_usernames_by_ids().returning(move |_| {
            Ok(HashMap::from([(author, "funkyshrimp".to_string())]))
        });
        let decorator = CommentAuthors::new(Arc::new(users));

        let decorated = decorator
            .with_author(Comment::new(author, Uuid::now_v7(), None, "hi".into()).unwrap())
            .await
            .unwrap();
        let json = serde_json::to_value(&decorated).unwrap();
        assert_eq!(json["authorName"], "funkyshrimp");
        assert_eq!(json["content"], "hi");
        assert!(json["parentCommentId"].is_null());
    }
}

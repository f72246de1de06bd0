//! # Core Traits (Ports)
//!
//! Storage and boundary contracts the service layer is written against.
//! Each store operation is fallible with distinguishable outcomes: absent
//! rows come back as `Ok(None)`/`Ok(false)`, uniqueness violations as
//! `AppError::Conflict`, and driver failures as `AppError::Transport`.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    Board, BoardLike, BoardPatch, Comment, Element, ElementPatch, Follow, Label, Principal, User,
};

/// Persistence contract for accounts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<()>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn list_users(&self) -> Result<Vec<User>>;
    /// Batch username lookup for feed/comment enrichment. Missing ids are
    /// simply absent from the map.
    async fn usernames_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>>;
}

/// Persistence contract for boards and the elements placed on them.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn create_board(&self, board: &Board) -> Result<()>;
    async fn find_board(&self, id: Uuid) -> Result<Option<Board>>;
    /// Applies the patch and returns the updated record, `None` if absent.
    async fn update_board(&self, id: Uuid, patch: &BoardPatch) -> Result<Option<Board>>;
    /// Returns whether a row was deleted. Dependent likes/labels/comments
    /// are NOT cascaded; readers tolerate the orphans.
    async fn delete_board(&self, id: Uuid) -> Result<bool>;
    /// Ids of boards matching the optional owner filter, strictly below the
    /// cursor when present, newest first, truncated to `limit`.
    async fn list_board_ids(
        &self,
        owner_id: Option<Uuid>,
        before: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<Uuid>>;
    /// Batch fetch; output order is unspecified.
    async fn boards_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Board>>;
    async fn all_boards(&self) -> Result<Vec<Board>>;
    async fn owner_has_boards(&self, owner_id: Uuid) -> Result<bool>;

    async fn create_element(&self, element: &Element) -> Result<()>;
    async fn find_element(&self, id: Uuid) -> Result<Option<Element>>;
    /// Applies the patch and returns the updated record, `None` if absent.
    async fn update_element(&self, id: Uuid, patch: &ElementPatch) -> Result<Option<Element>>;
    async fn elements_for_board(&self, board_id: Uuid) -> Result<Vec<Element>>;
    async fn delete_element(&self, id: Uuid) -> Result<bool>;
}

/// Persistence contract for labels and the board↔label link table.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait LabelStore: Send + Sync {
    async fn create_label(&self, label: &Label) -> Result<()>;
    async fn find_label(&self, id: Uuid) -> Result<Option<Label>>;
    async fn find_label_by_name(&self, name: &str) -> Result<Option<Label>>;
    async fn list_labels(&self) -> Result<Vec<Label>>;
    async fn delete_label(&self, id: Uuid) -> Result<bool>;
    /// Fails with `Conflict` when the (board, label) pair is already linked.
    async fn create_link(&self, board_id: Uuid, label_id: Uuid) -> Result<()>;
    /// Removes every link referencing the label; returns the count removed.
    async fn delete_links_for_label(&self, label_id: Uuid) -> Result<u64>;
    /// Label names per board for a batch of boards. Boards without labels
    /// are absent from the map.
    async fn labels_for_boards(&self, board_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<String>>>;
}

/// Persistence contract for the social edges: likes, comments, follows.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SocialStore: Send + Sync {
    /// Fails with `Conflict` when the user already liked the board.
    async fn create_like(&self, like: &BoardLike) -> Result<()>;
    async fn delete_like(&self, user_id: Uuid, board_id: Uuid) -> Result<bool>;
    async fn like_counts(&self, board_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>>;
    /// Which of `board_ids` the user has liked.
    async fn liked_by_user(&self, user_id: Uuid, board_ids: &[Uuid]) -> Result<HashSet<Uuid>>;

    async fn create_comment(&self, comment: &Comment) -> Result<()>;
    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>>;
    async fn comments_for_board(&self, board_id: Uuid) -> Result<Vec<Comment>>;
    async fn delete_comment(&self, id: Uuid) -> Result<bool>;

    /// Fails with `Conflict` when the follow edge already exists.
    async fn create_follow(&self, follow: &Follow) -> Result<()>;
    async fn delete_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool>;
}

/// Identity boundary: password hashing and bearer-token issue/verify.
/// Mutating entry points receive the resulting `Principal` and trust it.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AuthProvider: Send + Sync {
    fn hash_password(&self, raw: &str) -> Result<String>;
    fn verify_password(&self, raw: &str, hash: &str) -> bool;
    fn issue_token(&self, user: &User) -> Result<String>;
    fn verify_token(&self, token: &str) -> Result<Principal>;
}

/// Fire-and-forget notification boundary. The core does not depend on
/// delivery success.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait NotificationRelay: Send + Sync {
    /// Tells every currently-connected session of `to_username` that
    /// `from_username` liked one of their boards.
    async fn notify_like(&self, from_username: &str, to_username: &str);
}

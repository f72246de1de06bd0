//! # Feed Aggregator
//!
//! Read-side enrichment of boards: like counts, label names, creator
//! username and an optional liked-by-current-user flag. The join is spelled
//! out as explicit batch queries (boards → like counts → labels → owner
//! usernames → merge) so the order contract stays visible. Performs no
//! writes; repeated calls over unchanged data yield identical results.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use mb_core::{Board, BoardStore, LabelStore, Result, SocialStore, UserStore};

/// A board projected for the feed: the full record plus derived fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBoard {
    #[serde(flatten)]
    pub board: Board,
    pub likes: u64,
    /// Only present when the caller supplied a current-user identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_user: Option<bool>,
    pub labels: Vec<String>,
    /// Username of the board owner; absent when the user record is missing
    /// (owners are never auto-deleted, but readers stay defensive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
}

#[derive(Clone)]
pub struct FeedAggregator {
    boards: Arc<dyn BoardStore>,
    social: Arc<dyn SocialStore>,
    labels: Arc<dyn LabelStore>,
    users: Arc<dyn UserStore>,
}

impl FeedAggregator {
    pub fn new(
        boards: Arc<dyn BoardStore>,
        social: Arc<dyn SocialStore>,
        labels: Arc<dyn LabelStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self { boards, social, labels, users }
    }

    /// Enriches the given boards, or every board when `ids` is `None`.
    ///
    /// Output order is unspecified; callers that care (the paginator) re-sort
    /// against their own id list.
    pub async fn enrich(
        &self,
        ids: Option<&[Uuid]>,
        current_user: Option<Uuid>,
    ) -> Result<Vec<EnrichedBoard>> {
        let boards = match ids {
            Some([]) => return Ok(Vec::new()),
            Some(ids) => self.boards.boards_by_ids(ids).await?,
            None => self.boards.all_boards().await?,
        };
        if boards.is_empty() {
            return Ok(Vec::new());
        }

        let board_ids: Vec<Uuid> = boards.iter().map(|b| b.id).collect();

        let like_counts = self.social.like_counts(&board_ids).await?;

        let liked = match current_user {
            Some(user_id) => Some(self.social.liked_by_user(user_id, &board_ids).await?),
            None => None,
        };

        let mut label_names = self.labels.labels_for_boards(&board_ids).await?;

        let mut owner_ids: Vec<Uuid> = boards.iter().map(|b| b.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let creators: HashMap<Uuid, String> = self.users.usernames_by_ids(&owner_ids).await?;

        Ok(boards
            .into_iter()
            .map(|board| EnrichedBoard {
                likes: like_counts.get(&board.id).copied().unwrap_or(0),
                liked_by_user: liked.as_ref().map(|set| set.contains(&board.id)),
                labels: label_names.remove(&board.id).unwrap_or_default(),
                creator: creators.get(&board.owner_id).cloned(),
                board,
            })
            .collect())
    }
}

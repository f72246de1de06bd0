//! # Cursor Paginator
//!
//! Turns a raw board-listing request (optional creator filter, limit, opaque
//! cursor) into a stable, ordered page of enriched boards plus a
//! continuation cursor. Ids are UUID v7, so "id strictly below the cursor,
//! descending" walks the feed newest-first without skips or repeats.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use mb_core::{parse_id, AppError, BoardStore, Result};

use crate::feed::{EnrichedBoard, FeedAggregator};

/// Smallest page handed out when the client asks for nothing or nonsense.
pub const DEFAULT_PAGE_SIZE: u32 = 2;
/// Hard cap; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: u32 = 20;

/// Raw listing parameters as they arrive from the client. Identifier fields
/// are unparsed strings on purpose: syntax errors surface here as
/// `ValidationError`, not deeper in the stack.
#[derive(Debug, Clone, Default)]
pub struct ListBoardsRequest {
    pub owner_id: Option<String>,
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

/// One page of the feed. `next_cursor` is `None` at end-of-feed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPage {
    pub items: Vec<EnrichedBoard>,
    pub next_cursor: Option<Uuid>,
}

#[derive(Clone)]
pub struct BoardFeed {
    boards: Arc<dyn BoardStore>,
    aggregator: FeedAggregator,
}

impl BoardFeed {
    pub fn new(boards: Arc<dyn BoardStore>, aggregator: FeedAggregator) -> Self {
        Self { boards, aggregator }
    }

    pub async fn list_boards(
        &self,
        req: ListBoardsRequest,
        current_user: Option<Uuid>,
    ) -> Result<BoardPage> {
        let limit = clamp_limit(req.limit);
        let cursor = req.cursor.as_deref().map(parse_id).transpose()?;
        let owner_id = req.owner_id.as_deref().map(parse_id).transpose()?;

        // An owner filter pointing at a user with zero boards is a 404, not
        // an empty page. Unusual pagination semantics, kept for wire
        // compatibility with existing clients.
        if let Some(owner_id) = owner_id {
            if !self.boards.owner_has_boards(owner_id).await? {
                return Err(AppError::NotFound(
                    "boards for user".to_string(),
                    owner_id.to_string(),
                ));
            }
        }

        let ids = self.boards.list_board_ids(owner_id, cursor, limit).await?;

        // A full page is taken as "probably more"; a short page ends the feed.
        let next_cursor = if ids.len() as u32 == limit {
            ids.last().copied()
        } else {
            None
        };

        let mut items = self.aggregator.enrich(Some(&ids), current_user).await?;

        // The aggregator does not guarantee the input order; restore the
        // selected descending-id order before handing the page out.
        let position: HashMap<Uuid, usize> =
            ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        items.sort_by_key(|item| position.get(&item.board.id).copied().unwrap_or(usize::MAX));

        Ok(BoardPage { items, next_cursor })
    }
}

fn clamp_limit(limit: Option<i64>) -> u32 {
    match limit {
        Some(n) if n > MAX_PAGE_SIZE as i64 => MAX_PAGE_SIZE,
        Some(n) if n >= 1 => n as u32,
        _ => DEFAULT_PAGE_SIZE,
    }
}

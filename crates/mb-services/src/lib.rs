//! moodboard/crates/mb-services/src/lib.rs
//!
//! The service layer: feed pagination and enrichment, label resolution,
//! ownership-based authorization and comment decoration. Everything here is
//! written against the mb-core ports, so any store implementation plugs in.

pub mod authz;
pub mod comments;
pub mod feed;
pub mod labels;
pub mod pagination;

pub use authz::OwnershipAuthorizer;
pub use comments::{CommentAuthors, CommentWithAuthor, UNKNOWN_AUTHOR};
pub use feed::{EnrichedBoard, FeedAggregator};
pub use labels::{LabelResolver, LinkOutcome};
pub use pagination::{BoardFeed, BoardPage, ListBoardsRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

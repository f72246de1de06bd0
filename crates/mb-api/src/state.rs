//! State shared across all actix workers. Built once at startup from
//! explicitly injected store/auth/relay implementations; no module-level
//! singletons.

use std::sync::Arc;

use mb_core::{AuthProvider, BoardStore, LabelStore, NotificationRelay, SocialStore, UserStore};
use mb_services::{
    BoardFeed, CommentAuthors, FeedAggregator, LabelResolver, OwnershipAuthorizer,
};

pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub boards: Arc<dyn BoardStore>,
    pub labels: Arc<dyn LabelStore>,
    pub social: Arc<dyn SocialStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub relay: Arc<dyn NotificationRelay>,

    pub feed: BoardFeed,
    pub aggregator: FeedAggregator,
    pub label_resolver: LabelResolver,
    pub authz: OwnershipAuthorizer,
    pub comment_authors: CommentAuthors,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        boards: Arc<dyn BoardStore>,
        labels: Arc<dyn LabelStore>,
        social: Arc<dyn SocialStore>,
        auth: Arc<dyn AuthProvider>,
        relay: Arc<dyn NotificationRelay>,
    ) -> Self {
        let aggregator =
            FeedAggregator::new(boards.clone(), social.clone(), labels.clone(), users.clone());
        let feed = BoardFeed::new(boards.clone(), aggregator.clone());
        let label_resolver = LabelResolver::new(labels.clone());
        let authz = OwnershipAuthorizer::new(boards.clone(), social.clone());
        let comment_authors = CommentAuthors::new(users.clone());
        Self {
            users,
            boards,
            labels,
            social,
            auth,
            relay,
            feed,
            aggregator,
            label_resolver,
            authz,
            comment_authors,
        }
    }
}

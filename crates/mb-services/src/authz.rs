//! # Ownership Authorizer
//!
//! Answers "may principal P mutate resource R" for boards, comments and
//! admin-only resources. Ownership predicates load the resource and compare
//! its owner field; a missing resource is `false`, never an error, so
//! callers can distinguish not-found from not-owner themselves. Every unmet
//! composition rule raises `Forbidden` with the rule that failed, before any
//! mutation happens.

use std::sync::Arc;

use uuid::Uuid;

use mb_core::{AppError, BoardStore, Comment, Principal, Result, SocialStore};

#[derive(Clone)]
pub struct OwnershipAuthorizer {
    boards: Arc<dyn BoardStore>,
    social: Arc<dyn SocialStore>,
}

impl OwnershipAuthorizer {
    pub fn new(boards: Arc<dyn BoardStore>, social: Arc<dyn SocialStore>) -> Self {
        Self { boards, social }
    }

    pub async fn is_board_owner(&self, board_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self
            .boards
            .find_board(board_id)
            .await?
            .is_some_and(|board| board.owner_id == user_id))
    }

    pub async fn is_comment_owner(&self, comment_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self
            .social
            .find_comment(comment_id)
            .await?
            .is_some_and(|comment| comment.user_id == user_id))
    }

    /// Board update is owner-only. Admin does NOT bypass this rule; the
    /// asymmetry with delete is intentional and preserved.
    pub async fn authorize_board_update(&self, board_id: Uuid, principal: &Principal) -> Result<()> {
        if self.is_board_owner(board_id, principal.id).await? {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "only the board owner can update this board".to_string(),
            ))
        }
    }

    pub async fn authorize_board_delete(&self, board_id: Uuid, principal: &Principal) -> Result<()> {
        if principal.role.is_admin() || self.is_board_owner(board_id, principal.id).await? {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "only the board owner or an admin can delete this board".to_string(),
            ))
        }
    }

    /// The board owner may moderate comments on their own board even when
    /// they do not own the comment.
    pub async fn authorize_comment_delete(
        &self,
        comment: &Comment,
        principal: &Principal,
    ) -> Result<()> {
        if comment.user_id == principal.id
            || principal.role.is_admin()
            || self.is_board_owner(comment.board_id, principal.id).await?
        {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "only the board owner, comment owner or an admin can delete this comment"
                    .to_string(),
            ))
        }
    }

    /// Elements share the board owner's trust domain.
    pub async fn authorize_element_mutation(
        &self,
        board_id: Uuid,
        principal: &Principal,
    ) -> Result<()> {
        if self.is_board_owner(board_id, principal.id).await? {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "only the board owner can change its elements".to_string(),
            ))
        }
    }

    /// Labels are global and admin-managed.
    pub fn require_admin(principal: &Principal) -> Result<()> {
        if principal.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("admin role required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mb_core::{Board, MockBoardStore, MockSocialStore, Role};

    fn board(id: Uuid, owner_id: Uuid) -> Board {
        Board {
            id,
            title: "wall".into(),
            description: String::new(),
            owner_id,
            image_url: "http://example.com/i.png".into(),
            is_public: true,
            created_at: Utc::now(),
        }
    }

    fn principal(id: Uuid, role: Role) -> Principal {
        Principal { id, username: "someone".into(), role }
    }

    fn authorizer_with_board(board_id: Uuid, owner: Uuid) -> OwnershipAuthorizer {
        let mut boards = MockBoardStore::new();
        boards.expect_find_board().returning(move |id| {
            Ok((id == board_id).then(|| board(board_id, owner)))
        });
        OwnershipAuthorizer::new(Arc::new(boards), Arc::new(MockSocialStore::new()))
    }

    #[tokio::test]
    async fn owner_check_is_exact() {
        let board_id = Uuid::now_v7();
        let owner = Uuid::now_v7();
        let stranger = Uuid::now_v7();
        let authz = authorizer_with_board(board_id, owner);

        assert!(authz.is_board_owner(board_id, owner).await.unwrap());
        assert!(!authz.is_board_owner(board_id, stranger).await.unwrap());
    }

    #[tokio::test]
    async fn missing_resource_is_false_not_an_error() {
        let authz = authorizer_with_board(Uuid::now_v7(), Uuid::now_v7());
        let missing = Uuid::now_v7();
        assert!(!authz.is_board_owner(missing, Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn admin_cannot_update_but_can_delete() {
        let board_id = Uuid::now_v7();
        let owner = Uuid::now_v7();
        let admin = principal(Uuid::now_v7(), Role::Admin);
        let authz = authorizer_with_board(board_id, owner);

        let update = authz.authorize_board_update(board_id, &admin).await;
        assert!(matches!(update, Err(AppError::Forbidden(_))));

        authz.authorize_board_delete(board_id, &admin).await.unwrap();
    }

    #[tokio::test]
    async fn non_owner_cannot_update_or_delete() {
        let board_id = Uuid::now_v7();
        let authz = authorizer_with_board(board_id, Uuid::now_v7());
        let alice = principal(Uuid::now_v7(), Role::User);

        assert!(matches!(
            authz.authorize_board_update(board_id, &alice).await,
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            authz.authorize_board_delete(board_id, &alice).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn board_owner_moderates_comments_on_their_board() {
        let board_id = Uuid::now_v7();
        let board_owner = Uuid::now_v7();
        let commenter = Uuid::now_v7();
        let authz = authorizer_with_board(board_id, board_owner);

        let comment =
            Comment::new(commenter, board_id, None, "Sausage".to_string()).unwrap();

        // comment owner
        authz
            .authorize_comment_delete(&comment, &principal(commenter, Role::User))
            .await
            .unwrap();
        // board owner, not comment owner
        authz
            .authorize_comment_delete(&comment, &principal(board_owner, Role::User))
            .await
            .unwrap();
        // admin
        authz
            .authorize_comment_delete(&comment, &principal(Uuid::now_v7(), Role::Admin))
            .await
            .unwrap();
        // unrelated user
        let res = authz
            .authorize_comment_delete(&comment, &principal(Uuid::now_v7(), Role::User))
            .await;
        assert!(matches!(res, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn admin_gate_is_a_pure_role_predicate() {
        assert!(OwnershipAuthorizer::require_admin(&principal(Uuid::now_v7(), Role::Admin)).is_ok());
        assert!(matches!(
            OwnershipAuthorizer::require_admin(&principal(Uuid::now_v7(), Role::User)),
            Err(AppError::Forbidden(_))
        ));
    }
}

//! moodboard/crates/mb-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the moodboard
//! backend.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use uuid::Uuid;

    #[test]
    fn board_creation_v7() {
        let owner = Uuid::now_v7();
        let board = Board::new(
            owner,
            "Inspo wall".to_string(),
            None,
            "http://example.com/image.jpg".to_string(),
            None,
        )
        .unwrap();
        assert_eq!(board.owner_id, owner);
        assert!(board.is_public);
        assert_eq!(board.description, "");
    }

    #[test]
    fn board_ids_sort_by_creation_order() {
        // v7 ids are time-ordered; the feed cursor depends on it.
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();
        assert!(second > first);
    }

    #[test]
    fn board_title_is_bounded() {
        let err = Board::new(
            Uuid::now_v7(),
            "x".repeat(31),
            None,
            "http://example.com/i.png".to_string(),
            None,
        );
        assert!(matches!(err, Err(crate::AppError::ValidationError(_))));
    }

    #[test]
    fn username_rules() {
        let ok = User::new(
            "funkyshrimp".into(),
            "shrimp@example.com".into(),
            "hash".into(),
            None,
            None,
        );
        assert!(ok.is_ok());

        for bad in ["ab", "1starts_with_digit", "way_too_long_username", "no spaces"] {
            let res = User::new(
                bad.into(),
                "shrimp@example.com".into(),
                "hash".into(),
                None,
                None,
            );
            assert!(res.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn password_policy() {
        assert!(User::check_password_policy("sAucisse6!").is_ok());
        assert!(User::check_password_policy("alllowercase1!").is_err());
        assert!(User::check_password_policy("Short1!").is_err());
        assert!(User::check_password_policy("NoDigits!!").is_err());
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = User::new(
            "funkyshrimp".into(),
            "shrimp@example.com".into(),
            "secret-hash".into(),
            None,
            None,
        )
        .unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"username\":\"funkyshrimp\""));
    }

    #[test]
    fn element_patch_requires_finite_numbers() {
        let ok = ElementPatch { position_x: Some(12.5), ..Default::default() };
        assert!(ok.validate().is_ok());
        assert!(ElementPatch::default().validate().is_ok());

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let patch = ElementPatch { width: Some(bad), ..Default::default() };
            assert!(matches!(
                patch.validate(),
                Err(crate::AppError::ValidationError(_))
            ));
        }
    }

    #[test]
    fn comment_content_required() {
        let res = Comment::new(Uuid::now_v7(), Uuid::now_v7(), None, String::new());
        assert!(res.is_err());
    }

    #[test]
    fn parse_id_rejects_garbage() {
        assert!(parse_id("not-an-id").is_err());
        let id = Uuid::now_v7();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}

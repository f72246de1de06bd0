//! # Domain Models
//!
//! These structs represent the core entities of the moodboard backend.
//! We use UUID v7 for time-ordered, globally unique identification: the
//! lexical order of canonical v7 ids follows creation order, which the
//! board feed relies on for cursor pagination.
//!
//! Every constructor enforces the schema rules up front and returns a
//! typed `ValidationError` instead of deferring to the store.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Field limits shared with the HTTP layer.
pub mod limits {
    pub const TITLE_MAX: usize = 30;
    pub const DESCRIPTION_MAX: usize = 200;
    pub const BIO_MAX: usize = 30;
    pub const LABEL_NAME_MAX: usize = 20;
}

// Username: 3-16 characters, alphanumeric and underscores, starting with a letter.
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]{2,15}$").expect("username regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex"));

/// Parses an opaque identifier supplied by a client.
///
/// Invalid syntax is a client error, never a transport failure.
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::ValidationError(format!("invalid identifier: {raw}")))
}

/// Account role; `admin` unlocks label management and board moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::ValidationError(format!("unknown role: {other}"))),
        }
    }
}

/// The authenticated identity attached to a request by the auth boundary.
/// The core trusts this value; token signatures are verified upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

/// A registered account. Owns zero or more boards; never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 hash, never the raw password. Excluded from JSON output.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub avatar_url: String,
    pub bio: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        avatar_url: Option<String>,
        bio: Option<String>,
    ) -> Result<Self> {
        if !USERNAME_RE.is_match(&username) {
            return Err(AppError::ValidationError(format!(
                "{username} is not a valid username"
            )));
        }
        if !EMAIL_RE.is_match(&email) {
            return Err(AppError::ValidationError(format!("{email} is not a valid email")));
        }
        let bio = bio.unwrap_or_default();
        if bio.chars().count() > limits::BIO_MAX {
            return Err(AppError::ValidationError(format!(
                "bio is above {} characters",
                limits::BIO_MAX
            )));
        }
        Ok(Self {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash,
            avatar_url: avatar_url.unwrap_or_default(),
            bio,
            role: Role::User,
            created_at: Utc::now(),
        })
    }

    /// Register-time password policy, checked before hashing: at least 8
    /// characters with one uppercase, one lowercase, one digit and one
    /// special character.
    pub fn check_password_policy(raw: &str) -> Result<()> {
        let long_enough = raw.chars().count() >= 8;
        let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = raw.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = raw.chars().any(|c| c.is_ascii_digit());
        let has_special = raw.chars().any(|c| "#?!@$%^&*-".contains(c));
        if long_enough && has_upper && has_lower && has_digit && has_special {
            Ok(())
        } else {
            Err(AppError::ValidationError("the password is not valid".into()))
        }
    }
}

/// A user-owned shared canvas, the primary content unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
    pub image_url: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(
        owner_id: Uuid,
        title: String,
        description: Option<String>,
        image_url: String,
        is_public: Option<bool>,
    ) -> Result<Self> {
        check_title(&title)?;
        let description = description.unwrap_or_default();
        check_description(&description)?;
        if image_url.is_empty() {
            return Err(AppError::ValidationError("image URL is required".into()));
        }
        Ok(Self {
            id: Uuid::now_v7(),
            title,
            description,
            owner_id,
            image_url,
            is_public: is_public.unwrap_or(true),
            created_at: Utc::now(),
        })
    }
}

fn check_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(AppError::ValidationError("title is required".into()));
    }
    if title.chars().count() > limits::TITLE_MAX {
        return Err(AppError::ValidationError(format!(
            "title is above {} characters",
            limits::TITLE_MAX
        )));
    }
    Ok(())
}

fn check_description(description: &str) -> Result<()> {
    if description.chars().count() > limits::DESCRIPTION_MAX {
        return Err(AppError::ValidationError(format!(
            "description is above {} characters",
            limits::DESCRIPTION_MAX
        )));
    }
    Ok(())
}

/// Partial update for a board; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_public: Option<bool>,
}

impl BoardPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(description) = &self.description {
            check_description(description)?;
        }
        if let Some(image_url) = &self.image_url {
            if image_url.is_empty() {
                return Err(AppError::ValidationError("image URL is required".into()));
            }
        }
        Ok(())
    }
}

/// What kind of media an element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Image,
    Video,
    Audio,
    Shape,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Video => "video",
            ElementKind::Audio => "audio",
            ElementKind::Shape => "shape",
        }
    }
}

impl std::str::FromStr for ElementKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ElementKind::Text),
            "image" => Ok(ElementKind::Image),
            "video" => Ok(ElementKind::Video),
            "audio" => Ok(ElementKind::Audio),
            "shape" => Ok(ElementKind::Shape),
            other => Err(AppError::ValidationError(format!(
                "unknown element kind: {other}"
            ))),
        }
    }
}

/// A positioned media/text item placed on a board. Elements live in the
/// same trust domain as the board owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: Uuid,
    pub board_id: Uuid,
    pub kind: ElementKind,
    pub content_url: Option<String>,
    pub text_content: Option<String>,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub z_index: i64,
    pub created_at: DateTime<Utc>,
}

/// Geometry for a new element; all four values are required.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementGeometry {
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Element {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        board_id: Uuid,
        kind: ElementKind,
        content_url: Option<String>,
        text_content: Option<String>,
        geometry: ElementGeometry,
        rotation: Option<f64>,
        z_index: Option<i64>,
    ) -> Result<Self> {
        for (name, value) in [
            ("positionX", geometry.position_x),
            ("positionY", geometry.position_y),
            ("width", geometry.width),
            ("height", geometry.height),
        ] {
            if !value.is_finite() {
                return Err(AppError::ValidationError(format!("{name} must be a finite number")));
            }
        }
        Ok(Self {
            id: Uuid::now_v7(),
            board_id,
            kind,
            content_url,
            text_content,
            position_x: geometry.position_x,
            position_y: geometry.position_y,
            width: geometry.width,
            height: geometry.height,
            rotation: rotation.unwrap_or(0.0),
            z_index: z_index.unwrap_or(0),
            created_at: Utc::now(),
        })
    }
}

/// Partial update for an element; `None` fields are left untouched. The
/// kind and owning board of an element never change after creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    pub content_url: Option<String>,
    pub text_content: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
    pub z_index: Option<i64>,
}

impl ElementPatch {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("positionX", self.position_x),
            ("positionY", self.position_y),
            ("width", self.width),
            ("height", self.height),
            ("rotation", self.rotation),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(AppError::ValidationError(format!(
                        "{name} must be a finite number"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A global, admin-managed tag attachable to many boards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: Uuid,
    pub name: String,
}

impl Label {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(AppError::ValidationError("label name is required".into()));
        }
        if name.chars().count() > limits::LABEL_NAME_MAX {
            return Err(AppError::ValidationError(format!(
                "label name is above {} characters",
                limits::LABEL_NAME_MAX
            )));
        }
        Ok(Self { id: Uuid::now_v7(), name })
    }
}

/// Link-table row tying a label to a board.
/// Invariant: at most one row per (board, label) pair, enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLabelLink {
    pub board_id: Uuid,
    pub label_id: Uuid,
}

/// A like edge. Invariant: a user likes a given board at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLike {
    pub id: Uuid,
    pub user_id: Uuid,
    pub board_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl BoardLike {
    pub fn new(user_id: Uuid, board_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            board_id,
            created_at: Utc::now(),
        }
    }
}

/// A comment on a board, optionally threaded under a parent comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub board_id: Uuid,
    pub parent_comment_id: Option<Uuid>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        user_id: Uuid,
        board_id: Uuid,
        parent_comment_id: Option<Uuid>,
        content: String,
    ) -> Result<Self> {
        if content.is_empty() {
            return Err(AppError::ValidationError("comment can't be empty".into()));
        }
        Ok(Self {
            id: Uuid::now_v7(),
            user_id,
            board_id,
            parent_comment_id,
            content,
            created_at: Utc::now(),
        })
    }
}

/// A follow edge. Invariant: at most one edge per ordered (follower, followed) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(follower_id: Uuid, followed_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            follower_id,
            followed_id,
            created_at: Utc::now(),
        }
    }
}

//! SQLite schema. Compound-key UNIQUE constraints are the real guard for
//! the like/follow/link invariants; the application layer only translates
//! the resulting violations into `Conflict`.
//!
//! Identifiers are canonical UUID v7 text: byte order equals creation
//! order, which `ORDER BY id DESC` relies on for the feed. No foreign-key
//! cascades: deleting a board may orphan likes/links/comments, and readers
//! tolerate that.

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    avatar_url    TEXT NOT NULL DEFAULT '',
    bio           TEXT NOT NULL DEFAULT '',
    role          TEXT NOT NULL DEFAULT 'user',
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS boards (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    owner_id    TEXT NOT NULL,
    image_url   TEXT NOT NULL,
    is_public   INTEGER NOT NULL DEFAULT 1,
    created_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_boards_owner ON boards(owner_id);

CREATE TABLE IF NOT EXISTS elements (
    id           TEXT PRIMARY KEY,
    board_id     TEXT NOT NULL,
    kind         TEXT NOT NULL,
    content_url  TEXT,
    text_content TEXT,
    position_x   REAL NOT NULL,
    position_y   REAL NOT NULL,
    width        REAL NOT NULL,
    height       REAL NOT NULL,
    rotation     REAL NOT NULL DEFAULT 0,
    z_index      INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_elements_board ON elements(board_id);

CREATE TABLE IF NOT EXISTS labels (
    id   TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS board_labels (
    board_id TEXT NOT NULL,
    label_id TEXT NOT NULL,
    UNIQUE (board_id, label_id)
);

CREATE TABLE IF NOT EXISTS board_likes (
    id         TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL,
    board_id   TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (user_id, board_id)
);
CREATE INDEX IF NOT EXISTS idx_likes_board ON board_likes(board_id);

CREATE TABLE IF NOT EXISTS comments (
    id                TEXT PRIMARY KEY,
    user_id           TEXT NOT NULL,
    board_id          TEXT NOT NULL,
    parent_comment_id TEXT,
    content           TEXT NOT NULL,
    created_at        TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_comments_board ON comments(board_id);

CREATE TABLE IF NOT EXISTS follows (
    id          TEXT PRIMARY KEY,
    follower_id TEXT NOT NULL,
    followed_id TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    UNIQUE (follower_id, followed_id)
);
"#;

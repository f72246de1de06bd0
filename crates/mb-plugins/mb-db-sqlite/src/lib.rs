//! # mb-db-sqlite
//!
//! SQLite implementation of the mb-core store ports. This module owns the
//! mapping between the relational rows and the domain models; identifiers
//! travel as canonical UUID text, timestamps as RFC 3339.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use uuid::Uuid;

use mb_core::{
    AppError, Board, BoardLike, BoardPatch, BoardStore, Comment, Element, ElementKind,
    ElementPatch, Follow, Label, LabelStore, Result, Role, SocialStore, User, UserStore,
};

mod schema;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (and creates, if missing) the database at `url` and applies
    /// the schema.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(store_err)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(store_err)?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// A private in-memory database for tests. One connection only: every
    /// pooled connection would otherwise get its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(store_err)?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::raw_sql(schema::SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        tracing::debug!("sqlite schema ready");
        Ok(())
    }

    /// Explicit shutdown; waits for in-flight connections to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn store_err(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::Conflict(db.message().to_string());
        }
    }
    AppError::Transport(err.to_string())
}

fn col<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(name).map_err(store_err)
}

fn id_col(row: &SqliteRow, name: &str) -> Result<Uuid> {
    let raw: String = col(row, name)?;
    Uuid::parse_str(&raw)
        .map_err(|_| AppError::Transport(format!("corrupt identifier in column {name}")))
}

fn opt_id_col(row: &SqliteRow, name: &str) -> Result<Option<Uuid>> {
    let raw: Option<String> = col(row, name)?;
    raw.map(|raw| {
        Uuid::parse_str(&raw)
            .map_err(|_| AppError::Transport(format!("corrupt identifier in column {name}")))
    })
    .transpose()
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let role: String = col(row, "role")?;
    Ok(User {
        id: id_col(row, "id")?,
        username: col(row, "username")?,
        email: col(row, "email")?,
        password_hash: col(row, "password_hash")?,
        avatar_url: col(row, "avatar_url")?,
        bio: col(row, "bio")?,
        role: Role::from_str(&role)?,
        created_at: col::<DateTime<Utc>>(row, "created_at")?,
    })
}

fn board_from_row(row: &SqliteRow) -> Result<Board> {
    Ok(Board {
        id: id_col(row, "id")?,
        title: col(row, "title")?,
        description: col(row, "description")?,
        owner_id: id_col(row, "owner_id")?,
        image_url: col(row, "image_url")?,
        is_public: col(row, "is_public")?,
        created_at: col::<DateTime<Utc>>(row, "created_at")?,
    })
}

fn element_from_row(row: &SqliteRow) -> Result<Element> {
    let kind: String = col(row, "kind")?;
    Ok(Element {
        id: id_col(row, "id")?,
        board_id: id_col(row, "board_id")?,
        kind: ElementKind::from_str(&kind)?,
        content_url: col(row, "content_url")?,
        text_content: col(row, "text_content")?,
        position_x: col(row, "position_x")?,
        position_y: col(row, "position_y")?,
        width: col(row, "width")?,
        height: col(row, "height")?,
        rotation: col(row, "rotation")?,
        z_index: col(row, "z_index")?,
        created_at: col::<DateTime<Utc>>(row, "created_at")?,
    })
}

fn comment_from_row(row: &SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: id_col(row, "id")?,
        user_id: id_col(row, "user_id")?,
        board_id: id_col(row, "board_id")?,
        parent_comment_id: opt_id_col(row, "parent_comment_id")?,
        content: col(row, "content")?,
        created_at: col::<DateTime<Utc>>(row, "created_at")?,
    })
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, avatar_url, bio, role, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(&user.bio)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        row.map(|row| user_from_row(&row)).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        rows.iter().map(user_from_row).collect()
    }

    async fn usernames_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT id, username FROM users WHERE id IN (");
        let mut sep = qb.separated(", ");
        for id in ids {
            sep.push_bind(id.to_string());
        }
        qb.push(")");
        let rows = qb.build().fetch_all(&self.pool).await.map_err(store_err)?;
        rows.iter()
            .map(|row| Ok((id_col(row, "id")?, col::<String>(row, "username")?)))
            .collect()
    }
}

#[async_trait]
impl BoardStore for SqliteStore {
    async fn create_board(&self, board: &Board) -> Result<()> {
        sqlx::query(
            "INSERT INTO boards (id, title, description, owner_id, image_url, is_public, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(board.id.to_string())
        .bind(&board.title)
        .bind(&board.description)
        .bind(board.owner_id.to_string())
        .bind(&board.image_url)
        .bind(board.is_public)
        .bind(board.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn find_board(&self, id: Uuid) -> Result<Option<Board>> {
        let row = sqlx::query("SELECT * FROM boards WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        row.map(|row| board_from_row(&row)).transpose()
    }

    async fn update_board(&self, id: Uuid, patch: &BoardPatch) -> Result<Option<Board>> {
        let Some(mut board) = self.find_board(id).await? else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            board.title = title.clone();
        }
        if let Some(description) = &patch.description {
            board.description = description.clone();
        }
        if let Some(image_url) = &patch.image_url {
            board.image_url = image_url.clone();
        }
        if let Some(is_public) = patch.is_public {
            board.is_public = is_public;
        }
        sqlx::query(
            "UPDATE boards SET title = ?, description = ?, image_url = ?, is_public = ? WHERE id = ?",
        )
        .bind(&board.title)
        .bind(&board.description)
        .bind(&board.image_url)
        .bind(board.is_public)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(Some(board))
    }

    async fn delete_board(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_board_ids(
        &self,
        owner_id: Option<Uuid>,
        before: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<Uuid>> {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT id FROM boards");
        let mut keyword = " WHERE ";
        if let Some(owner_id) = owner_id {
            qb.push(keyword).push("owner_id = ").push_bind(owner_id.to_string());
            keyword = " AND ";
        }
        if let Some(before) = before {
            qb.push(keyword).push("id < ").push_bind(before.to_string());
        }
        qb.push(" ORDER BY id DESC LIMIT ").push_bind(i64::from(limit));

        let rows = qb.build().fetch_all(&self.pool).await.map_err(store_err)?;
        rows.iter().map(|row| id_col(row, "id")).collect()
    }

    async fn boards_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Board>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT * FROM boards WHERE id IN (");
        let mut sep = qb.separated(", ");
        for id in ids {
            sep.push_bind(id.to_string());
        }
        qb.push(")");
        let rows = qb.build().fetch_all(&self.pool).await.map_err(store_err)?;
        rows.iter().map(board_from_row).collect()
    }

    async fn all_boards(&self) -> Result<Vec<Board>> {
        let rows = sqlx::query("SELECT * FROM boards ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        rows.iter().map(board_from_row).collect()
    }

    async fn owner_has_boards(&self, owner_id: Uuid) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM boards WHERE owner_id = ? LIMIT 1")
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(row.is_some())
    }

    async fn create_element(&self, element: &Element) -> Result<()> {
        sqlx::query(
            "INSERT INTO elements (id, board_id, kind, content_url, text_content, position_x,
                                   position_y, width, height, rotation, z_index, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(element.id.to_string())
        .bind(element.board_id.to_string())
        .bind(element.kind.as_str())
        .bind(&element.content_url)
        .bind(&element.text_content)
        .bind(element.position_x)
        .bind(element.position_y)
        .bind(element.width)
        .bind(element.height)
        .bind(element.rotation)
        .bind(element.z_index)
        .bind(element.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn find_element(&self, id: Uuid) -> Result<Option<Element>> {
        let row = sqlx::query("SELECT * FROM elements WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        row.map(|row| element_from_row(&row)).transpose()
    }

    async fn update_element(&self, id: Uuid, patch: &ElementPatch) -> Result<Option<Element>> {
        let Some(mut element) = self.find_element(id).await? else {
            return Ok(None);
        };
        if let Some(content_url) = &patch.content_url {
            element.content_url = Some(content_url.clone());
        }
        if let Some(text_content) = &patch.text_content {
            element.text_content = Some(text_content.clone());
        }
        if let Some(position_x) = patch.position_x {
            element.position_x = position_x;
        }
        if let Some(position_y) = patch.position_y {
            element.position_y = position_y;
        }
        if let Some(width) = patch.width {
            element.width = width;
        }
        if let Some(height) = patch.height {
            element.height = height;
        }
        if let Some(rotation) = patch.rotation {
            element.rotation = rotation;
        }
        if let Some(z_index) = patch.z_index {
            element.z_index = z_index;
        }
        sqlx::query(
            "UPDATE elements SET content_url = ?, text_content = ?, position_x = ?, position_y = ?,
                                 width = ?, height = ?, rotation = ?, z_index = ?
             WHERE id = ?",
        )
        .bind(&element.content_url)
        .bind(&element.text_content)
        .bind(element.position_x)
        .bind(element.position_y)
        .bind(element.width)
        .bind(element.height)
        .bind(element.rotation)
        .bind(element.z_index)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(Some(element))
    }

    async fn elements_for_board(&self, board_id: Uuid) -> Result<Vec<Element>> {
        let rows = sqlx::query("SELECT * FROM elements WHERE board_id = ? ORDER BY z_index, id")
            .bind(board_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        rows.iter().map(element_from_row).collect()
    }

    async fn delete_element(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM elements WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LabelStore for SqliteStore {
    async fn create_label(&self, label: &Label) -> Result<()> {
        sqlx::query("INSERT INTO labels (id, name) VALUES (?, ?)")
            .bind(label.id.to_string())
            .bind(&label.name)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn find_label(&self, id: Uuid) -> Result<Option<Label>> {
        let row = sqlx::query("SELECT * FROM labels WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        row.map(|row| Ok(Label { id: id_col(&row, "id")?, name: col(&row, "name")? }))
            .transpose()
    }

    async fn find_label_by_name(&self, name: &str) -> Result<Option<Label>> {
        let row = sqlx::query("SELECT * FROM labels WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        row.map(|row| Ok(Label { id: id_col(&row, "id")?, name: col(&row, "name")? }))
            .transpose()
    }

    async fn list_labels(&self) -> Result<Vec<Label>> {
        let rows = sqlx::query("SELECT * FROM labels ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        rows.iter()
            .map(|row| Ok(Label { id: id_col(row, "id")?, name: col(row, "name")? }))
            .collect()
    }

    async fn delete_label(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM labels WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_link(&self, board_id: Uuid, label_id: Uuid) -> Result<()> {
        sqlx::query("INSERT INTO board_labels (board_id, label_id) VALUES (?, ?)")
            .bind(board_id.to_string())
            .bind(label_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn delete_links_for_label(&self, label_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM board_labels WHERE label_id = ?")
            .bind(label_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected())
    }

    async fn labels_for_boards(&self, board_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<String>>> {
        if board_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT bl.board_id, l.name FROM board_labels bl
             JOIN labels l ON l.id = bl.label_id
             WHERE bl.board_id IN (",
        );
        let mut sep = qb.separated(", ");
        for id in board_ids {
            sep.push_bind(id.to_string());
        }
        qb.push(") ORDER BY l.name");
        let rows = qb.build().fetch_all(&self.pool).await.map_err(store_err)?;

        let mut out: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in &rows {
            out.entry(id_col(row, "board_id")?)
                .or_default()
                .push(col(row, "name")?);
        }
        Ok(out)
    }
}

#[async_trait]
impl SocialStore for SqliteStore {
    async fn create_like(&self, like: &BoardLike) -> Result<()> {
        sqlx::query("INSERT INTO board_likes (id, user_id, board_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(like.id.to_string())
            .bind(like.user_id.to_string())
            .bind(like.board_id.to_string())
            .bind(like.created_at)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn delete_like(&self, user_id: Uuid, board_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM board_likes WHERE user_id = ? AND board_id = ?")
            .bind(user_id.to_string())
            .bind(board_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn like_counts(&self, board_ids: &[Uuid]) -> Result<HashMap<Uuid, u64>> {
        if board_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            "SELECT board_id, COUNT(*) AS likes FROM board_likes WHERE board_id IN (",
        );
        let mut sep = qb.separated(", ");
        for id in board_ids {
            sep.push_bind(id.to_string());
        }
        qb.push(") GROUP BY board_id");
        let rows = qb.build().fetch_all(&self.pool).await.map_err(store_err)?;
        rows.iter()
            .map(|row| Ok((id_col(row, "board_id")?, col::<i64>(row, "likes")? as u64)))
            .collect()
    }

    async fn liked_by_user(&self, user_id: Uuid, board_ids: &[Uuid]) -> Result<HashSet<Uuid>> {
        if board_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new("SELECT board_id FROM board_likes WHERE user_id = ");
        qb.push_bind(user_id.to_string());
        qb.push(" AND board_id IN (");
        let mut sep = qb.separated(", ");
        for id in board_ids {
            sep.push_bind(id.to_string());
        }
        qb.push(")");
        let rows = qb.build().fetch_all(&self.pool).await.map_err(store_err)?;
        rows.iter().map(|row| id_col(row, "board_id")).collect()
    }

    async fn create_comment(&self, comment: &Comment) -> Result<()> {
        sqlx::query(
            "INSERT INTO comments (id, user_id, board_id, parent_comment_id, content, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(comment.id.to_string())
        .bind(comment.user_id.to_string())
        .bind(comment.board_id.to_string())
        .bind(comment.parent_comment_id.map(|id| id.to_string()))
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;
        row.map(|row| comment_from_row(&row)).transpose()
    }

    async fn comments_for_board(&self, board_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query("SELECT * FROM comments WHERE board_id = ? ORDER BY id")
            .bind(board_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;
        rows.iter().map(comment_from_row).collect()
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_follow(&self, follow: &Follow) -> Result<()> {
        sqlx::query("INSERT INTO follows (id, follower_id, followed_id, created_at) VALUES (?, ?, ?, ?)")
            .bind(follow.id.to_string())
            .bind(follow.follower_id.to_string())
            .bind(follow.followed_id.to_string())
            .bind(follow.created_at)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn delete_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = ? AND followed_id = ?")
            .bind(follower_id.to_string())
            .bind(followed_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(result.rows_affected() > 0)
    }
}

//! Post Repository - Core Operations
//!
//! SQLite-backed implementation for posts. Creation and tag reconciliation
//! each run in a single transaction. Hydration lives in `hydrate`.

use async_trait::async_trait;
use futures::future::try_join_all;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

use super::hydrate::{hydrate_post, post_exists, select_ids};
use crate::domain::{DomainError, DomainResult, NewPost, Post, PostUpdate};
use crate::repository::db::{db_err, SharedConnection};
use crate::repository::tag::{attach_tags, replace_post_tags, resolve_tags};
use crate::repository::traits::Repository;

/// SQLite implementation of Post repository
pub struct PostRepository {
    pub(crate) conn: SharedConnection,
}

impl PostRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Insert a post and associate its tags.
    ///
    /// An unknown author fails with `ConstraintViolation` and leaves no post
    /// row behind.
    pub async fn create(&self, new_post: &NewPost) -> DomainResult<Post> {
        let mut guard = self.conn.lock().await;
        let tx = guard.transaction().map_err(db_err)?;

        tx.execute(
            "INSERT INTO posts (author_id, title, content) VALUES (?, ?, ?)",
            params![new_post.author_id, new_post.title, new_post.content],
        )
        .map_err(|e| {
            log::error!("Error creating post for author {}: {}", new_post.author_id, e);
            db_err(e)
        })?;
        let post_id = tx.last_insert_rowid();

        let tags = resolve_tags(&tx, &new_post.tags)?;
        attach_tags(&tx, post_id, &tags)?;

        let post = hydrate_post(&tx, post_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Post {} missing after insert", post_id)))?;
        tx.commit().map_err(db_err)?;

        log::info!("Created post {} with {} tag(s)", post.id, post.tags.len());
        Ok(post)
    }

    /// All posts written by `user_id`
    pub async fn list_by_author(&self, user_id: i64) -> DomainResult<Vec<Post>> {
        let ids = {
            let conn = self.conn.lock().await;
            select_ids(
                &conn,
                "SELECT id FROM posts WHERE author_id = ? ORDER BY id",
                params![user_id],
            )?
        };
        self.hydrate_all(ids).await
    }

    /// All posts tagged with exactly `tag_name`; unknown names give an empty list
    pub async fn list_by_tag_name(&self, tag_name: &str) -> DomainResult<Vec<Post>> {
        let ids = {
            let conn = self.conn.lock().await;
            select_ids(
                &conn,
                "SELECT p.id FROM posts p
                 JOIN post_tags pt ON p.id = pt.post_id
                 JOIN tags t ON t.id = pt.tag_id
                 WHERE t.name = ?
                 ORDER BY p.id",
                params![tag_name],
            )?
        };
        self.hydrate_all(ids).await
    }

    /// Hydrate every id concurrently and wait for all of them.
    ///
    /// The hydrations share one connection, so they serialize on its lock.
    pub(crate) async fn hydrate_all(&self, ids: Vec<i64>) -> DomainResult<Vec<Post>> {
        let posts = try_join_all(ids.into_iter().map(|id| self.find_by_id(id))).await?;
        Ok(posts.into_iter().flatten().collect())
    }
}

#[async_trait]
impl Repository<Post> for PostRepository {
    type Changes = PostUpdate;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Post>> {
        let conn = self.conn.lock().await;
        hydrate_post(&conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Post>> {
        let ids = {
            let conn = self.conn.lock().await;
            select_ids(&conn, "SELECT id FROM posts ORDER BY id", [])?
        };
        self.hydrate_all(ids).await
    }

    /// Update scalar fields and, when given, replace the tag set.
    ///
    /// An empty update returns the current post; a missing post gives `None`.
    async fn update(&self, id: i64, changes: &PostUpdate) -> DomainResult<Option<Post>> {
        let mut guard = self.conn.lock().await;
        if changes.is_empty() {
            return hydrate_post(&guard, id);
        }

        let tx = guard.transaction().map_err(db_err)?;
        if !post_exists(&tx, id)? {
            return Ok(None);
        }

        update_post_fields(&tx, id, changes)?;

        if let Some(tag_names) = &changes.tags {
            let tags = resolve_tags(&tx, tag_names)?;
            replace_post_tags(&tx, id, &tags)?;
        }

        let post = hydrate_post(&tx, id)?;
        tx.commit().map_err(|e| {
            log::error!("Error updating post ID: {}: {}", id, e);
            db_err(e)
        })?;
        Ok(post)
    }
}

/// `UPDATE posts` over the scalar fields present in `changes`
fn update_post_fields(conn: &Connection, id: i64, changes: &PostUpdate) -> DomainResult<()> {
    let mut columns: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(title) = &changes.title {
        columns.push("title = ?");
        values.push(Value::from(title.clone()));
    }
    if let Some(content) = &changes.content {
        columns.push("content = ?");
        values.push(Value::from(content.clone()));
    }
    if let Some(active) = changes.active {
        columns.push("active = ?");
        values.push(Value::from(active));
    }

    if columns.is_empty() {
        return Ok(());
    }
    values.push(Value::from(id));

    conn.execute(
        &format!("UPDATE posts SET {} WHERE id = ?", columns.join(", ")),
        params_from_iter(values),
    )
    .map_err(|e| {
        log::error!("Error updating post ID: {}: {}", id, e);
        db_err(e)
    })?;
    Ok(())
}

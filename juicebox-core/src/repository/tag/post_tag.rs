//! Post-Tag Relationship Operations
//!
//! Statements for the many-to-many edge between posts and tags. These run on
//! a borrowed connection so callers can group them into one transaction.

use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Connection};

use crate::domain::{DomainResult, Post, Tag};
use crate::repository::db::db_err;
use crate::repository::post::{hydrate_post, post_exists, PostRepository};

use super::tag_repo::row_to_tag;

/// All tags associated with a post, ordered by tag id
pub(crate) fn tags_for_post(conn: &Connection, post_id: i64) -> DomainResult<Vec<Tag>> {
    let mut stmt = conn
        .prepare(
            "SELECT t.id, t.name FROM tags t
             JOIN post_tags pt ON t.id = pt.tag_id
             WHERE pt.post_id = ?
             ORDER BY t.id",
        )
        .map_err(db_err)?;

    let tags = stmt
        .query_map(params![post_id], row_to_tag)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;
    Ok(tags)
}

/// Associate each tag with the post; existing pairs are left alone
pub(crate) fn attach_tags(conn: &Connection, post_id: i64, tags: &[Tag]) -> DomainResult<()> {
    if tags.is_empty() {
        return Ok(());
    }

    let mut stmt = conn
        .prepare(
            "INSERT INTO post_tags (post_id, tag_id) VALUES (?, ?)
             ON CONFLICT (post_id, tag_id) DO NOTHING",
        )
        .map_err(db_err)?;

    for tag in tags {
        stmt.execute(params![post_id, tag.id]).map_err(|e| {
            log::error!("Error adding tag {} to post {}: {}", tag.name, post_id, e);
            db_err(e)
        })?;
    }
    Ok(())
}

/// Make the post's tag set exactly `tags`.
///
/// Associations outside `tags` are removed first. An empty `tags` removes all
/// of this post's associations through its own statement rather than an
/// empty `NOT IN ()` list.
pub(crate) fn replace_post_tags(conn: &Connection, post_id: i64, tags: &[Tag]) -> DomainResult<()> {
    let deleted = if tags.is_empty() {
        conn.execute("DELETE FROM post_tags WHERE post_id = ?", params![post_id])
    } else {
        let placeholders = vec!["?"; tags.len()].join(", ");
        let values = std::iter::once(post_id).chain(tags.iter().map(|t| t.id));
        conn.execute(
            &format!("DELETE FROM post_tags WHERE post_id = ? AND tag_id NOT IN ({placeholders})"),
            params_from_iter(values),
        )
    };
    let removed = deleted.map_err(|e| {
        log::error!("Error removing stale tags from post {}: {}", post_id, e);
        db_err(e)
    })?;

    log::debug!("Removed {} stale tag association(s) from post {}", removed, post_id);
    attach_tags(conn, post_id, tags)
}

/// Trait for post-tag relationship operations
#[async_trait]
pub trait PostTagOperations {
    /// Associate already-resolved tags with a post; `None` if the post is missing
    async fn add_tags_to_post(&self, post_id: i64, tags: &[Tag]) -> DomainResult<Option<Post>>;

    /// Get all tags for a post
    async fn get_tags_for_post(&self, post_id: i64) -> DomainResult<Vec<Tag>>;
}

#[async_trait]
impl PostTagOperations for PostRepository {
    async fn add_tags_to_post(&self, post_id: i64, tags: &[Tag]) -> DomainResult<Option<Post>> {
        let mut guard = self.conn.lock().await;
        let tx = guard.transaction().map_err(db_err)?;

        if !post_exists(&tx, post_id)? {
            return Ok(None);
        }

        attach_tags(&tx, post_id, tags)?;
        let post = hydrate_post(&tx, post_id)?;
        tx.commit().map_err(db_err)?;
        Ok(post)
    }

    async fn get_tags_for_post(&self, post_id: i64) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;
        tags_for_post(&conn, post_id)
    }
}

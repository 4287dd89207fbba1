//! Tag Repository - Resolution and Listing
//!
//! SQLite-backed Tag access. Tags are only ever inserted, never updated or
//! deleted; re-submitting a known name resolves to the existing row.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::domain::{normalize_tag_names, DomainResult, Tag};
use crate::repository::db::{db_err, SharedConnection};

/// SQLite implementation of Tag repository
pub struct TagRepository {
    conn: SharedConnection,
}

impl TagRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Ensure every name exists as a tag and return the persisted rows
    pub async fn resolve<S: AsRef<str> + Sync>(&self, names: &[S]) -> DomainResult<Vec<Tag>> {
        let mut guard = self.conn.lock().await;
        let tx = guard.transaction().map_err(db_err)?;
        let tags = resolve_tags(&tx, names)?;
        tx.commit().map_err(db_err)?;
        Ok(tags)
    }

    /// List every tag, ordered by id
    pub async fn list(&self) -> DomainResult<Vec<Tag>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, name FROM tags ORDER BY id")
            .map_err(db_err)?;
        let tags = stmt
            .query_map([], row_to_tag)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                log::error!("Error listing tags: {}", e);
                db_err(e)
            })?;
        Ok(tags)
    }

    /// Find a tag by its exact name
    pub async fn find_by_name(&self, name: &str) -> DomainResult<Option<Tag>> {
        let conn = self.conn.lock().await;

        conn.query_row(
            "SELECT id, name FROM tags WHERE name = ?",
            params![name],
            row_to_tag,
        )
        .optional()
        .map_err(db_err)
    }
}

/// Insert the missing names, then read back every requested row.
///
/// Blank and duplicate names are dropped first; an empty list issues no
/// statements. The result is ordered by tag id, not by input order.
pub(crate) fn resolve_tags<S: AsRef<str>>(conn: &Connection, names: &[S]) -> DomainResult<Vec<Tag>> {
    let names = normalize_tag_names(names);
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; names.len()].join(", ");
    let insert_values = vec!["(?)"; names.len()].join(", ");

    conn.execute(
        &format!("INSERT INTO tags (name) VALUES {insert_values} ON CONFLICT (name) DO NOTHING"),
        params_from_iter(names.iter()),
    )
    .map_err(|e| {
        log::error!("Error creating tags {:?}: {}", names, e);
        db_err(e)
    })?;

    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, name FROM tags WHERE name IN ({placeholders}) ORDER BY id"
        ))
        .map_err(db_err)?;
    let tags = stmt
        .query_map(params_from_iter(names.iter()), row_to_tag)
        .map_err(db_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(db_err)?;

    log::debug!("Resolved {} tag name(s) to {} row(s)", names.len(), tags.len());
    Ok(tags)
}

/// Convert a `SELECT id, name` row to Tag
pub(crate) fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

//! Post hydration
//!
//! Turns a stored post row into a [`Post`] with its author and tags. Costs
//! three statements per post; list operations therefore issue 1 + 2N queries
//! after the id scan.

use rusqlite::{params, Connection, OptionalExtension, Params};

use crate::domain::{Author, DomainResult, Post};
use crate::repository::db::db_err;
use crate::repository::tag::tags_for_post;

struct PostRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    active: bool,
}

/// Load one post with author and tags; `None` if the post row is missing.
pub(crate) fn hydrate_post(conn: &Connection, post_id: i64) -> DomainResult<Option<Post>> {
    let row = conn
        .query_row(
            "SELECT id, author_id, title, content, active FROM posts WHERE id = ?",
            params![post_id],
            |row| {
                Ok(PostRow {
                    id: row.get(0)?,
                    author_id: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                    active: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(db_err)?;

    let Some(row) = row else {
        return Ok(None);
    };

    let tags = tags_for_post(conn, row.id)?;
    let author = find_author(conn, row.author_id)?;

    Ok(Some(Post {
        id: row.id,
        title: row.title,
        content: row.content,
        active: row.active,
        author,
        tags,
    }))
}

fn find_author(conn: &Connection, author_id: i64) -> DomainResult<Author> {
    conn.query_row(
        "SELECT id, username, name, location FROM users WHERE id = ?",
        params![author_id],
        |row| {
            Ok(Author {
                id: row.get(0)?,
                username: row.get(1)?,
                name: row.get(2)?,
                location: row.get(3)?,
            })
        },
    )
    .map_err(|e| {
        // The foreign key guarantees the author exists
        log::error!("Error loading author {}: {}", author_id, e);
        db_err(e)
    })
}

pub(crate) fn post_exists(conn: &Connection, post_id: i64) -> DomainResult<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM posts WHERE id = ?)",
        params![post_id],
        |row| row.get(0),
    )
    .map_err(db_err)
}

/// Ids returned by a `SELECT id ...` query, in order
pub(crate) fn select_ids<P: Params>(conn: &Connection, sql: &str, params: P) -> DomainResult<Vec<i64>> {
    let mut stmt = conn.prepare(sql).map_err(db_err)?;
    let ids = stmt
        .query_map(params, |row| row.get(0))
        .map_err(db_err)?
        .collect::<Result<Vec<i64>, _>>()
        .map_err(db_err)?;
    Ok(ids)
}

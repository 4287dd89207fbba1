//! Database Connection and Setup
//!
//! Manages the SQLite connection and the schema.

use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Connection handle shared by every repository
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    conn: SharedConnection,
}

impl DbState {
    /// Wrap an already-open connection; the schema is created if missing.
    pub fn from_connection(conn: Connection) -> DomainResult<Self> {
        configure(&conn)?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Handle to pass into repository constructors
    pub fn connection(&self) -> SharedConnection {
        Arc::clone(&self.conn)
    }
}

/// Open (or create) the database at `db_path`. `":memory:"` gives a private
/// in-memory database.
pub fn init_db(db_path: impl AsRef<Path>) -> DomainResult<DbState> {
    let db_path = db_path.as_ref();
    let conn = Connection::open(db_path).map_err(|e| {
        log::error!("Failed to open database {}: {}", db_path.display(), e);
        db_err(e)
    })?;
    DbState::from_connection(conn)
}

/// Map a store error onto the domain taxonomy
pub(crate) fn db_err(e: rusqlite::Error) -> DomainError {
    match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => DomainError::ConstraintViolation(e.to_string()),
        _ => DomainError::Query(e.to_string()),
    }
}

fn configure(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;").map_err(db_err)
}

/// Create all tables and indexes if they don't exist
pub fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS posts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            author_id INTEGER NOT NULL REFERENCES users(id),
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS post_tags (
            post_id INTEGER NOT NULL REFERENCES posts(id),
            tag_id INTEGER NOT NULL REFERENCES tags(id),
            UNIQUE (post_id, tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author_id);
        CREATE INDEX IF NOT EXISTS idx_post_tags_tag ON post_tags(tag_id);",
    )
    .map_err(|e| {
        log::error!("Error building tables: {}", e);
        db_err(e)
    })
}

/// Drop every table, children first
pub fn drop_tables(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS post_tags;
        DROP TABLE IF EXISTS tags;
        DROP TABLE IF EXISTS posts;
        DROP TABLE IF EXISTS users;",
    )
    .map_err(|e| {
        log::error!("Error dropping tables: {}", e);
        db_err(e)
    })
}

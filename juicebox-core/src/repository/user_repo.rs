//! User Repository
//!
//! Handles all user-related database operations. The password column is
//! written and verified here but never selected into a [`User`].

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension};

use crate::domain::{DomainResult, NewUser, User, UserUpdate};
use crate::password;

use super::db::{db_err, SharedConnection};
use super::post::PostRepository;
use super::traits::Repository;

const USER_COLUMNS: &str = "id, username, name, location, active";

pub struct UserRepository {
    conn: SharedConnection,
    posts: PostRepository,
}

impl UserRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self {
            posts: PostRepository::new(conn.clone()),
            conn,
        }
    }

    /// Create a user; a taken username yields `None` and leaves the table untouched
    pub async fn create(&self, new_user: &NewUser) -> DomainResult<Option<User>> {
        let password_hash = password::hash_password(&new_user.password)?;

        let conn = self.conn.lock().await;
        let user = conn
            .query_row(
                &format!(
                    "INSERT INTO users (username, password, name, location) VALUES (?, ?, ?, ?)
                     ON CONFLICT (username) DO NOTHING
                     RETURNING {USER_COLUMNS}"
                ),
                params![new_user.username, password_hash, new_user.name, new_user.location],
                row_to_user,
            )
            .optional()
            .map_err(|e| {
                log::error!("Error creating user: {}: {}", new_user.username, e);
                db_err(e)
            })?;

        if user.is_none() {
            log::warn!("Username {} is taken, no user created", new_user.username);
        }
        Ok(user)
    }

    /// Check a candidate password for `username`; unknown users never match
    pub async fn verify_password(&self, username: &str, candidate: &str) -> DomainResult<bool> {
        let conn = self.conn.lock().await;
        let stored: Option<String> = conn
            .query_row(
                "SELECT password FROM users WHERE username = ?",
                params![username],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;

        Ok(stored.is_some_and(|hash| password::verify_password(candidate, &hash)))
    }
}

#[async_trait]
impl Repository<User> for UserRepository {
    type Changes = UserUpdate;

    /// Find a user together with their hydrated posts
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let user = {
            let conn = self.conn.lock().await;
            conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
                params![id],
                row_to_user,
            )
            .optional()
            .map_err(db_err)?
        };

        let Some(mut user) = user else {
            return Ok(None);
        };
        user.posts = self.posts.list_by_author(user.id).await?;
        Ok(Some(user))
    }

    /// List all users without their posts
    async fn list(&self) -> DomainResult<Vec<User>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .map_err(db_err)?;
        let users = stmt
            .query_map([], row_to_user)
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(users)
    }

    /// Update the present fields; an empty update is a no-op returning `None`
    async fn update(&self, id: i64, changes: &UserUpdate) -> DomainResult<Option<User>> {
        if changes.is_empty() {
            return Ok(None);
        }

        let mut columns: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(username) = &changes.username {
            columns.push("username = ?");
            values.push(Value::from(username.clone()));
        }
        if let Some(plain) = &changes.password {
            columns.push("password = ?");
            values.push(Value::from(password::hash_password(plain)?));
        }
        if let Some(name) = &changes.name {
            columns.push("name = ?");
            values.push(Value::from(name.clone()));
        }
        if let Some(location) = &changes.location {
            columns.push("location = ?");
            values.push(Value::from(location.clone()));
        }
        if let Some(active) = changes.active {
            columns.push("active = ?");
            values.push(Value::from(active));
        }
        values.push(Value::from(id));

        let conn = self.conn.lock().await;
        conn.query_row(
            &format!(
                "UPDATE users SET {} WHERE id = ? RETURNING {USER_COLUMNS}",
                columns.join(", ")
            ),
            params_from_iter(values),
            row_to_user,
        )
        .optional()
        .map_err(|e| {
            log::error!("Error updating user {}: {}", id, e);
            db_err(e)
        })
    }
}

/// Convert a `SELECT id, username, name, location, active` row to User
fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        location: row.get(3)?,
        active: row.get(4)?,
        posts: Vec::new(),
    })
}

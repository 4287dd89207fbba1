//! User Entity
//!
//! Users author posts. The stored password hash never leaves the repository.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::post::Post;

/// A user as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub location: String,
    pub active: bool,
    /// Authored posts; only populated by single-user lookups
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl Entity for User {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Input for account creation
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub location: String,
}

/// Partial update for a user; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub active: Option<bool>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.name.is_none()
            && self.location.is_none()
            && self.active.is_none()
    }
}

/// Minimal user projection embedded in every post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_update() {
        assert!(UserUpdate::default().is_empty());

        let update = UserUpdate {
            location: Some("Lesterville, KY".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_from_json() {
        let update: UserUpdate =
            serde_json::from_str(r#"{"name":"Newname Sogood","active":false}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("Newname Sogood"));
        assert_eq!(update.active, Some(false));
        assert!(update.username.is_none());
    }
}

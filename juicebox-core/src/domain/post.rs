//! Post Entity
//!
//! A post is always returned hydrated: the author is embedded and the raw
//! author id is not part of the output.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::tag::Tag;
use super::user::Author;

/// A hydrated post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub active: bool,
    pub author: Author,
    /// Associated tags, ordered by tag id
    pub tags: Vec<Tag>,
}

impl Post {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

impl Entity for Post {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Input for post creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update for a post.
///
/// `tags: Some(..)` replaces the post's tag set; `Some(vec![])` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub active: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl PostUpdate {
    pub fn has_scalar_fields(&self) -> bool {
        self.title.is_some() || self.content.is_some() || self.active.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_scalar_fields() && self.tags.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: 1,
            title: "First Post".to_string(),
            content: "Hello".to_string(),
            active: true,
            author: Author {
                id: 7,
                username: "albert".to_string(),
                name: "Albert VanSlingshot".to_string(),
                location: "Memphis, TN".to_string(),
            },
            tags: vec![Tag::new(1, "#happy".to_string())],
        }
    }

    #[test]
    fn test_serialized_post_has_no_author_id() {
        let value = serde_json::to_value(sample_post()).unwrap();
        assert!(value.get("authorId").is_none());
        assert!(value.get("author_id").is_none());
        assert_eq!(value["author"]["username"], "albert");
        assert_eq!(value["tags"][0]["name"], "#happy");
    }

    #[test]
    fn test_new_post_from_json() {
        let post: NewPost =
            serde_json::from_str(r#"{"authorId":3,"title":"T","content":"C"}"#).unwrap();
        assert_eq!(post.author_id, 3);
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_update_emptiness() {
        assert!(PostUpdate::default().is_empty());

        let tags_only = PostUpdate {
            tags: Some(Vec::new()),
            ..Default::default()
        };
        assert!(!tags_only.is_empty());
        assert!(!tags_only.has_scalar_fields());
    }
}

//! Tag Entity
//!
//! Tags are shared across posts and never deleted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::entity::Entity;

/// A tag for categorizing posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier
    pub id: i64,
    /// Tag name, globally unique (e.g. "#happy")
    pub name: String,
}

impl Tag {
    pub fn new(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

impl Entity for Tag {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Join table entry for post-tag relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: i64,
    pub tag_id: i64,
}

/// Drop blank names and collapse duplicates, keeping first-seen order.
///
/// Names are otherwise kept verbatim: "#Happy" and "#happy" are distinct tags.
pub fn normalize_tag_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_creation() {
        let tag = Tag::new(1, "#happy".to_string());
        assert_eq!(tag.id(), 1);
        assert_eq!(tag.name, "#happy");
    }

    #[test]
    fn test_normalize_drops_duplicates_and_blanks() {
        let names = normalize_tag_names(&["#happy", "", "#sad", "#happy", "   "]);
        assert_eq!(names, vec!["#happy".to_string(), "#sad".to_string()]);
    }

    #[test]
    fn test_normalize_is_case_sensitive() {
        let names = normalize_tag_names(&["#Happy", "#happy"]);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_normalize_empty() {
        let names: Vec<String> = Vec::new();
        assert!(normalize_tag_names(&names).is_empty());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub author_id: i32,
    pub author_name: String,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated submission not yet persisted. The slug is usually absent and
/// generated at write time; a non-empty pre-assigned slug is kept as-is.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub author_id: i32,
    pub tags: Vec<String>,
}

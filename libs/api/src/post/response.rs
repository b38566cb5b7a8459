use chrono::{DateTime, Utc};
use entity::prelude::PostEntity;
use serde::Serialize;
use util::MediaConfig;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct PostResp {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub cover_image_url: String,
    pub author: String,
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResp {
    pub fn new(post: PostEntity, media: &MediaConfig) -> Self {
        let base_url = media.base_url.trim_end_matches('/');
        let cover_image_url = match &post.cover_image {
            Some(key) => format!("{}/{}", base_url, key),
            None => format!("{}/posts/placeholder.jpg", base_url),
        };

        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            cover_image: post.cover_image,
            cover_image_url,
            author: post.author_name,
            tags: post.tags,
            published_at: post.published_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct GetPostsResp {
    pub posts: Vec<PostResp>,
}

#[derive(Serialize, ToSchema)]
pub struct GetRelatedPostsResp {
    pub posts: Vec<PostResp>,
}

#[cfg(test)]
mod test {
    use super::*;

    fn media() -> MediaConfig {
        MediaConfig {
            bucket: "blog-media".to_string(),
            base_url: "https://media.example.com/".to_string(),
        }
    }

    #[test]
    fn test_cover_image_url_built_from_key() {
        // Arrange
        let post = PostEntity {
            cover_image: Some("posts/abc.jpg".to_string()),
            ..Default::default()
        };

        // Act
        let response = PostResp::new(post, &media());

        // Assert
        assert_eq!(
            response.cover_image_url,
            "https://media.example.com/posts/abc.jpg"
        );
    }

    #[test]
    fn test_missing_cover_image_uses_placeholder() {
        let response = PostResp::new(PostEntity::default(), &media());

        assert_eq!(
            response.cover_image_url,
            "https://media.example.com/posts/placeholder.jpg"
        );
    }
}

use axum::body::Bytes;
use serde::Deserialize;
use serde_with::serde_as;
use serde_with::DisplayFromStr;
use utoipa::{IntoParams, ToSchema};

use crate::ApiError;

pub const MAX_COVER_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[serde_as]
#[derive(Deserialize, ToSchema, IntoParams)]
pub struct GetPostsParam {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<u64>,
}

/// Fields collected from the multipart create form.
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub cover_image: Option<CoverImageUpload>,
}

#[derive(Debug)]
pub struct CoverImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl PostForm {
    /// Runs before anything is written; the violated constraint is named in
    /// the message returned to the caller.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::ValidationError("title is required".to_string()));
        }
        if self.excerpt.trim().is_empty() {
            return Err(ApiError::ValidationError("excerpt is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(ApiError::ValidationError("content is required".to_string()));
        }
        if let Some(cover_image) = &self.cover_image {
            if cover_image.bytes.len() > MAX_COVER_IMAGE_BYTES {
                return Err(ApiError::ValidationError(
                    "cover_image must not exceed 5 MiB".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// A `tags` form field is either a JSON array (what the web client submits)
/// or a single plain tag; repeated fields accumulate.
pub(super) fn parse_tags(raw: &str) -> Vec<String> {
    if let Ok(tags) = serde_json::from_str::<Vec<String>>(raw) {
        return tags;
    }

    if raw.trim().is_empty() {
        vec![]
    } else {
        vec![raw.trim().to_string()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn valid_form() -> PostForm {
        PostForm {
            title: "Hello".to_string(),
            excerpt: "An excerpt".to_string(),
            content: "<p>Body</p>".to_string(),
            tags: vec![],
            cover_image: None,
        }
    }

    fn image(len: usize) -> CoverImageUpload {
        CoverImageUpload {
            file_name: "cover.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::from(vec![0u8; len]),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_blank_title_names_the_constraint() {
        let mut form = valid_form();
        form.title = "   ".to_string();

        match form.validate() {
            Err(ApiError::ValidationError(message)) => assert!(message.contains("title")),
            _ => panic!("expected a validation error"),
        }
    }

    #[test]
    fn test_blank_excerpt_and_content_rejected() {
        let mut form = valid_form();
        form.excerpt = "".to_string();
        assert!(form.validate().is_err());

        let mut form = valid_form();
        form.content = "".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_six_mib_cover_image_rejected() {
        let mut form = valid_form();
        form.cover_image = Some(image(6 * 1024 * 1024));

        match form.validate() {
            Err(ApiError::ValidationError(message)) => {
                assert!(message.contains("cover_image"))
            }
            _ => panic!("expected a validation error"),
        }
    }

    #[test]
    fn test_four_mib_cover_image_accepted() {
        let mut form = valid_form();
        form.cover_image = Some(image(4 * 1024 * 1024));

        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_parse_tags_json_array() {
        assert_eq!(
            parse_tags(r#"["rust","web"]"#),
            vec!["rust".to_string(), "web".to_string()]
        );
    }

    #[test]
    fn test_parse_tags_plain_value() {
        assert_eq!(parse_tags("rust"), vec!["rust".to_string()]);
        assert!(parse_tags("  ").is_empty());
    }
}

use anyhow::Context;
use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{multipart::Field, Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

pub mod request;
pub mod response;

use crate::auth::AuthUser;
use crate::response::{ApiResponse, IntoApiResponse};
use crate::{ApiError, ApiState};
use entity::prelude::*;

use self::request::{CoverImageUpload, GetPostsParam, PostForm};
use self::response::{GetPostsResp, GetRelatedPostsResp, PostResp};

const RELATED_LIMIT: usize = 3;

/// List posts, most recently published first
#[utoipa::path(
        get,
        path = "/posts",
        responses(
            (status = 200, description = "List posts successfully", body = GetPostsResp)
        ),
        params(
            GetPostsParam
        )
    )]
pub async fn get_posts(
    State(state): State<ApiState>,
    Query(params): Query<GetPostsParam>,
) -> ApiResponse<Json<GetPostsResp>> {
    let posts = state
        .repo
        .post
        .find_paginate(params.offset, params.limit)
        .await
        .into_response("find posts")?;

    let response = Json(GetPostsResp {
        posts: posts
            .into_iter()
            .map(|post| PostResp::new(post, &state.config.media))
            .collect(),
    });

    Ok(response)
}

/// Retrieve one post by slug
#[utoipa::path(
    get,
    path = "/posts/:slug",
    responses(
        (status = 200, description = "Retrieve a post successfully", body = PostResp),
        (status = 404, description = "No post with this slug")
    ),
    params(
        ("slug", description = "post slug"),
    )
)]
pub async fn get_post(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<Json<PostResp>> {
    let post = state
        .repo
        .post
        .find_by_slug(&slug)
        .await
        .into_response("find post by slug")?;

    let Some(post) = post else {
        return Err(ApiError::NotFoundError(format!("post {:?} not found", slug)));
    };

    Ok(Json(PostResp::new(post, &state.config.media)))
}

/// Up to 3 posts related to this one by tag overlap
#[utoipa::path(
    get,
    path = "/posts/:slug/related",
    responses(
        (status = 200, description = "List related posts successfully", body = GetRelatedPostsResp),
        (status = 404, description = "No post with this slug")
    ),
    params(
        ("slug", description = "post slug"),
    )
)]
pub async fn get_related_posts(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResponse<Json<GetRelatedPostsResp>> {
    let post = state
        .repo
        .post
        .find_by_slug(&slug)
        .await
        .into_response("find post by slug")?;

    let Some(post) = post else {
        return Err(ApiError::NotFoundError(format!("post {:?} not found", slug)));
    };

    let related = state
        .repo
        .post
        .find_related(&post, RELATED_LIMIT)
        .await
        .into_response("find related posts")?;

    Ok(Json(GetRelatedPostsResp {
        posts: related
            .into_iter()
            .map(|post| PostResp::new(post, &state.config.media))
            .collect(),
    }))
}

/// Create a post from a multipart form
#[utoipa::path(
    post,
    path = "/posts",
    responses(
        (status = 201, description = "Post created", body = PostResp),
        (status = 400, description = "A required field is missing or the cover image is too large")
    )
)]
pub async fn create_post(
    State(state): State<ApiState>,
    Extension(AuthUser(auth_user)): Extension<AuthUser>,
    multipart: Multipart,
) -> ApiResponse<(StatusCode, Json<PostResp>)> {
    let form = read_form(multipart).await?;
    form.validate()?;

    let author = match auth_user {
        Some(user) => user,
        None => resolve_fallback_author(&state).await?,
    };

    let cover_image = match form.cover_image {
        Some(upload) => Some(
            store_cover_image(&state, upload)
                .await
                .into_response("store cover image")?,
        ),
        None => None,
    };

    let created = state
        .repo
        .post
        .create(NewPost {
            title: form.title,
            slug: None,
            excerpt: form.excerpt,
            content: form.content,
            cover_image: cover_image.clone(),
            author_id: author.id,
            tags: form.tags,
        })
        .await;

    // The cover image was uploaded before the insert; do not leave it
    // orphaned in the bucket when the write fails.
    if created.is_err() {
        if let Some(key) = cover_image {
            remove_cover_image(&state, &key).await;
        }
    }

    let post = created.into_response("create post")?;

    Ok((
        StatusCode::CREATED,
        Json(PostResp::new(post, &state.config.media)),
    ))
}

async fn read_form(mut multipart: Multipart) -> Result<PostForm, ApiError> {
    let mut form = PostForm::default();

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::ValidationError(format!("malformed multipart body: {}", e)))?;
        let Some(field) = field else { break };
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "title" => form.title = text(field).await?,
            "excerpt" => form.excerpt = text(field).await?,
            "content" => form.content = text(field).await?,
            "tags" => {
                let raw = text(field).await?;
                form.tags.extend(request::parse_tags(&raw));
            }
            "cover_image" => {
                let file_name = field.file_name().unwrap_or("cover").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::ValidationError(format!("failed to read cover_image: {}", e))
                })?;

                if !bytes.is_empty() {
                    form.cover_image = Some(CoverImageUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::ValidationError(format!("malformed form field: {}", e)))
}

async fn resolve_fallback_author(state: &ApiState) -> Result<UserEntity, ApiError> {
    let username = &state.config.blog.fallback_author;

    let user = state
        .repo
        .user
        .find_by_username(username)
        .await
        .into_response("resolve fallback author")?;

    user.ok_or_else(|| {
        ApiError::ConfigurationError(format!("fallback author {:?} does not exist", username))
    })
}

async fn store_cover_image(state: &ApiState, upload: CoverImageUpload) -> anyhow::Result<String> {
    let extension = std::path::Path::new(&upload.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpg");
    let key = format!("posts/{}.{}", Uuid::new_v4(), extension);

    state
        .s3
        .put_object()
        .bucket(state.config.media.bucket.clone())
        .content_type(upload.content_type)
        .key(key.clone())
        .body(ByteStream::from(upload.bytes))
        .send()
        .await
        .context("failed to put object")?;

    Ok(key)
}

async fn remove_cover_image(state: &ApiState, key: &str) {
    let result = state
        .s3
        .delete_object()
        .bucket(state.config.media.bucket.clone())
        .key(key.to_string())
        .send()
        .await;

    if let Err(e) = result {
        tracing::error!("failed to remove orphaned cover image {:?}: {}", key, e);
    }
}

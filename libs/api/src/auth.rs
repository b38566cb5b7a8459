use axum::{
    extract::{Request, State},
    http,
    middleware::Next,
    response::Response,
};

use entity::prelude::UserEntity;

use crate::response::IntoApiResponse;
use crate::{ApiError, ApiState};

/// The requester identity, when the bearer token resolved to a known user.
/// A missing or unknown token is not rejected: anonymous submissions are
/// attributed to the configured fallback author instead.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Option<UserEntity>);

pub async fn auth(
    State(state): State<ApiState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::to_string);

    let user = match token {
        Some(token) => state
            .repo
            .user
            .find_by_sub(&token)
            .await
            .into_response("resolve auth user")?,
        None => None,
    };

    req.extensions_mut().insert(AuthUser(user));

    Ok(next.run(req).await)
}

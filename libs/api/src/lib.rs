use axum::{extract::DefaultBodyLimit, middleware, routing::get, routing::post, Router};

use repository::Repository;
use tower_http::cors::CorsLayer;
use tracing::info;
use util::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use utoipauto::utoipauto;

pub mod auth;
pub mod contact;
pub mod healthz;
pub mod not_found;
pub mod post;
pub mod redirect;
mod response;

pub enum ApiError {
    ValidationError(String),
    NotFoundError(String),
    ConfigurationError(String),
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    repo: Repository,
    mailer: mailer::Client,
    s3: aws_sdk_s3::Client,
    config: Config,
}

// Multipart bodies above this cap never reach validation, so it sits above
// the 5 MiB cover-image limit with headroom for the text fields.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub async fn serve(
    repository: Repository,
    mailer: mailer::Client,
    s3: aws_sdk_s3::Client,
    config: Config,
) -> anyhow::Result<Router> {
    #[utoipauto(paths = "./libs/api/src")]
    #[derive(OpenApi)]
    #[openapi(
        tags(
            (name = "blog", description = "Blog posts and contact API")
        )
    )]
    struct ApiDoc;

    info!(task = "start api serving");

    let state = ApiState {
        repo: repository,
        mailer,
        s3,
        config,
    };

    let origins = ["http://localhost:3000".parse().unwrap()];

    // posts
    let post_router = Router::new()
        .route("/", get(post::get_posts).post(post::create_post))
        .route("/:slug", get(post::get_post))
        .route("/:slug/related", get(post::get_related_posts))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    // contacts, create only
    let contact_router = Router::new()
        .route("/", post(contact::create_contact))
        .fallback(not_found::get_404)
        .with_state(state.clone());

    let router = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .route("/healthz", get(healthz::get_health))
        .nest("/posts", post_router)
        .nest("/contacts", contact_router)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::auth))
        .layer(middleware::from_fn(redirect::https_to_http))
        .layer(CorsLayer::new().allow_origin(origins))
        .fallback(not_found::get_404);

    Ok(router)
}

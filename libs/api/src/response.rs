use axum::{http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            // Validation and not-found messages name the violated constraint
            // and go back to the caller as-is.
            ApiError::ValidationError(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ApiError::NotFoundError(message) => (StatusCode::NOT_FOUND, message).into_response(),
            // Server-side failures are logged with their context; the caller
            // only ever sees a generic body.
            ApiError::ConfigurationError(message) => {
                error!("configuration error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
                    .into_response()
            }
            ApiError::ServerError(message) => {
                error!("server error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, operation: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for anyhow::Result<T> {
    fn into_response(self, operation: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(operation, "{:?}", e);
            ApiError::ServerError(format!("in {}", operation))
        })
    }
}

#[cfg(test)]
mod test {
    use axum::{http::StatusCode, response::IntoResponse as _};

    use crate::ApiError;

    #[test]
    fn test_validation_is_a_client_error_with_detail() {
        let response = ApiError::ValidationError("title is required".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_is_a_client_error() {
        let response = ApiError::NotFoundError("post not found".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_server_and_configuration_errors_are_500() {
        let server = ApiError::ServerError("db down".to_string()).into_response();
        let config = ApiError::ConfigurationError("no fallback author".to_string()).into_response();

        assert_eq!(server.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

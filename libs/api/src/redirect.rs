use axum::{
    extract::Request,
    http,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Requests that arrived over HTTPS (as reported by the fronting proxy) are
/// redirected to the same URL over plain HTTP, preserving path and query.
pub async fn https_to_http(req: Request, next: Next) -> Response {
    let forwarded_proto = req
        .headers()
        .get("x-forwarded-proto")
        .and_then(|header| header.to_str().ok());

    if forwarded_proto == Some("https") {
        let host = req
            .headers()
            .get(http::header::HOST)
            .and_then(|header| header.to_str().ok())
            .unwrap_or("localhost");
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|p| p.as_str())
            .unwrap_or("/");

        return Redirect::temporary(&format!("http://{}{}", host, path_and_query))
            .into_response();
    }

    next.run(req).await
}

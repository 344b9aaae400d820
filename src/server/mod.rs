//! HTTP search endpoint.
//!
//! `GET /` authenticates the `AccessToken` header, runs the search pipeline over
//! the injected directory and answers with a JSON array of users or a
//! `{"Error": "<code>"}` body. `GET /health` reports the directory size.

use crate::{directory::DirectorySource, model, server::handlers::health};
use anyhow::Result;
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderName, HeaderValue, Request},
    routing::get,
    Router,
};
use secrecy::SecretString;
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{debug_span, info, Span};
use ulid::Ulid;
use utoipa::OpenApi;

mod handlers;

/// Everything a request handler needs; built once at startup.
pub struct SearchState {
    pub directory: Arc<dyn DirectorySource>,
    pub access_token: SecretString,
}

impl SearchState {
    #[must_use]
    pub fn new(directory: Arc<dyn DirectorySource>, access_token: SecretString) -> Self {
        Self {
            directory,
            access_token,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::search::find_users, handlers::health::health),
    components(
        schemas(model::User, model::SearchErrorResponse, health::Health)
    ),
    tags(
        (name = "search", description = "User directory search API"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the application router around `state`.
pub fn router(state: SearchState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(handlers::find_users))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
        .route("/health", get(handlers::health).options(handlers::health))
        .layer(Extension(state))
}

/// Bind `[::]:port` and serve until Ctrl-C.
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn new(port: u16, state: SearchState) -> Result<()> {
    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    serve(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Gracefully shutdown");
    })
    .await
}

/// Serve on an already bound listener until `shutdown` resolves.
/// # Errors
/// Returns an error if the server fails.
pub async fn serve<F>(listener: TcpListener, state: SearchState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

// span
fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    debug_span!("http-request", path, request_id)
}

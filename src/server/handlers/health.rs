use crate::server::SearchState;
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    name: String,
    version: String,
    directory: String,
    users: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Directory is loaded", body = Health),
        (status = 503, description = "Directory is unavailable", body = Health),
    ),
    tag = "health",
)]
/// Report the service version and how many users the directory holds.
///
/// `OPTIONS` gets the same status and headers without a body.
pub async fn health(method: Method, Extension(state): Extension<Arc<SearchState>>) -> impl IntoResponse {
    let (healthy, users) = match state.directory.users() {
        Ok(users) => (true, users.len()),
        Err(err) => {
            error!("Directory health check failed: {err}");
            (false, 0)
        }
    };

    let health = Health {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        directory: if healthy {
            "ok".to_string()
        } else {
            "unavailable".to_string()
        },
        users,
    };

    let headers = format!("{}:{}", health.name, health.version)
        .parse::<HeaderValue>()
        .map(|x_app_header_value| {
            debug!("X-App header: {:?}", x_app_header_value);

            let mut headers = HeaderMap::new();
            headers.insert("X-App", x_app_header_value);
            headers
        })
        .map_err(|err| {
            debug!("Failed to parse X-App header: {}", err);
        })
        .unwrap_or_else(|()| HeaderMap::new());

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    if healthy {
        (StatusCode::OK, headers, body)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        directory::{Directory, DirectoryError, DirectorySource},
        search::tests::sample,
        server::router,
    };
    use anyhow::Result;
    use axum::{
        body::to_bytes,
        http::Request,
    };
    use secrecy::SecretString;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(directory: Arc<dyn DirectorySource>) -> axum::Router {
        router(SearchState::new(
            directory,
            SecretString::from("token".to_string()),
        ))
    }

    #[tokio::test]
    async fn health_reports_directory_size_without_token() -> Result<()> {
        let response = app(Arc::new(Directory::new(sample())))
            .oneshot(Request::builder().uri("/health").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let x_app = response
            .headers()
            .get("X-App")
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        assert_eq!(
            x_app,
            Some(format!(
                "{}:{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
        );

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: Value = serde_json::from_slice(&body)?;
        assert_eq!(json["users"], 5);
        assert_eq!(json["directory"], "ok");
        Ok(())
    }

    struct BrokenDirectory;

    impl DirectorySource for BrokenDirectory {
        fn users(&self) -> Result<Arc<[crate::model::User]>, DirectoryError> {
            Err(DirectoryError::Unavailable("dataset went away".to_string()))
        }
    }

    #[tokio::test]
    async fn health_reports_unavailable_directory() -> Result<()> {
        let response = app(Arc::new(BrokenDirectory))
            .oneshot(Request::builder().uri("/health").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: Value = serde_json::from_slice(&body)?;
        assert_eq!(json["directory"], "unavailable");
        assert_eq!(json["users"], 0);
        Ok(())
    }

    #[tokio::test]
    async fn options_has_no_body() -> Result<()> {
        let response = app(Arc::new(Directory::new(Vec::new())))
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/health")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(body.is_empty());
        Ok(())
    }
}

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::config::Config;

/// Header carrying the requesting owner's identifier.
pub const OWNER_ID_HEADER: &str = "x-user-id";

/// The owner on whose behalf the current request runs.
///
/// Owner identity is supplied out-of-band and falls back to a configured
/// default when absent. This is a stand-in for a real authentication
/// mechanism, which is an external collaborator of this service.
#[derive(Debug, Clone)]
pub struct CurrentOwner {
    pub id: String,
}

impl CurrentOwner {
    /// Creates a new CurrentOwner instance.
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

/// State for owner identity resolution.
#[derive(Clone)]
pub struct AuthState {
    pub default_owner: String,
}

impl AuthState {
    /// Creates a new AuthState from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_owner: config.default_owner.clone(),
        }
    }
}

/// Middleware that resolves the owner identity and sets the CurrentOwner
/// extension. A missing, empty, or non-UTF-8 header resolves to the
/// configured default owner; every request ends up with an identity.
pub async fn owner_identity_middleware(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let owner_id = headers
        .get(OWNER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| state.default_owner.clone());

    request.extensions_mut().insert(CurrentOwner::new(owner_id));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Extension;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn_with_state;
    use tower::ServiceExt;

    fn test_app() -> axum::Router {
        let auth_state = Arc::new(AuthState {
            default_owner: "default-user".to_string(),
        });

        axum::Router::new()
            .route(
                "/whoami",
                axum::routing::get(|Extension(owner): Extension<CurrentOwner>| async move {
                    owner.id
                }),
            )
            .layer(from_fn_with_state(auth_state, owner_identity_middleware))
    }

    #[tokio::test]
    async fn resolves_owner_from_header() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(OWNER_ID_HEADER, "user1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "user1");
    }

    #[tokio::test]
    async fn falls_back_to_default_owner_without_header() {
        let response = test_app()
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "default-user");
    }

    #[tokio::test]
    async fn empty_header_value_falls_back_to_default_owner() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(OWNER_ID_HEADER, "")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, "default-user");
    }
}

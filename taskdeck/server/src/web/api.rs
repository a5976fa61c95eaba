use std::sync::Arc;

use crate::{
    auth::{self, AuthState},
    task::TaskState,
};

use axum::{Router, middleware::from_fn_with_state};

use tower::ServiceBuilder;

/// Creates the API routes for JSON API endpoints.
///
/// Every route under /api/v1 runs behind the owner identity middleware, so
/// handlers can rely on the CurrentOwner extension being present.
pub fn create_api_router(auth_state: Arc<AuthState>, task_state: Arc<TaskState>) -> Router {
    let task_routes = crate::task::api::v1::create_api_router(task_state);
    Router::new().nest("/api/v1", task_routes).layer(
        ServiceBuilder::new().layer(from_fn_with_state(
            auth_state,
            auth::owner_identity_middleware,
        )),
    )
}

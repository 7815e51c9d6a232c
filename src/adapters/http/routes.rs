//! Route Handlers - Health, Readiness, Users, Metrics
//!
//! All database errors are caught here and translated into a JSON
//! error envelope; none are retried. Every handled request increments
//! the request counter with its real response status via middleware.

use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::adapters::metrics::MetricsRegistry;
use crate::domain::user::{NewUser, User, ValidationError};
use crate::ports::repository::UserRepository;
use crate::usecases::users::{CreateUserError, UserService};

/// Dependencies injected into every handler.
///
/// Constructed once at startup and torn down at shutdown; no global
/// mutable state anywhere in the request path.
#[derive(Clone)]
pub struct AppState {
    /// User listing/creation use case.
    pub users: Arc<UserService>,
    /// Repository handle for the readiness probe.
    pub repository: Arc<dyn UserRepository>,
    /// Request counters and process metrics.
    pub metrics: Arc<MetricsRegistry>,
}

/// Route-boundary error translated into a JSON envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected by validation (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Database failure (500).
    #[error("database error")]
    Database(#[source] anyhow::Error),
}

impl From<CreateUserError> for ApiError {
    fn from(err: CreateUserError) -> Self {
        match err {
            CreateUserError::Validation(e) => Self::Validation(e),
            CreateUserError::Database(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() })),
            Self::Database(e) => {
                error!(error = %e, "Database error at route boundary");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error", "message": format!("{e:#}") }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Build the API router with the request-counting middleware applied.
///
/// `expose_metrics` drops the `/metrics` route when the registry is
/// disabled in config; counters are still maintained either way.
pub fn router(state: AppState, expose_metrics: bool) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route("/readiness", get(readiness))
        .route("/users", get(list_users).post(create_user));

    if expose_metrics {
        router = router.route("/metrics", get(metrics));
    }

    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_requests,
        ))
        .with_state(state)
}

/// Count every handled request, labeled by method, route template, and
/// the real response status.
async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    // Route template, not the raw URI: labels must stay low-cardinality.
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_owned(), |p| p.as_str().to_owned());

    let response = next.run(request).await;

    state
        .metrics
        .observe_request(&method, &route, response.status().as_u16());

    response
}

/// Liveness probe: static 200, no dependency checks.
async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe: trivial query through the pool.
///
/// Signals database reachability only, not schema correctness.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.repository.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "database": "connected" })),
        ),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not ready",
                    "database": "disconnected",
                    "error": format!("{e:#}"),
                })),
            )
        }
    }
}

/// List all users in ascending id order.
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await.map_err(ApiError::Database)?;
    Ok(Json(users))
}

/// Create a user from a JSON body with a required `name` field.
async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.create(&request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Serialize the registry in text exposition format.
async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "encoding error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_maps_to_400_envelope() {
        let response = ApiError::Validation(ValidationError::MissingName).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "name is required");
    }

    #[tokio::test]
    async fn database_error_maps_to_500_envelope() {
        let response =
            ApiError::Database(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Database error");
        assert!(body["message"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn create_user_error_converts_by_kind() {
        let validation: ApiError = CreateUserError::Validation(ValidationError::NameTooLong).into();
        assert!(matches!(validation, ApiError::Validation(_)));

        let database: ApiError = CreateUserError::Database(anyhow::anyhow!("boom")).into();
        assert!(matches!(database, ApiError::Database(_)));
    }
}

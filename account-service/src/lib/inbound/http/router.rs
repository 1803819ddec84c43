use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::root::version;
use super::handlers::signup::signup;
use super::middleware::authenticate;
use super::middleware::AccessGuard;
use crate::domain::credential::ports::AuthServicePort;
use crate::domain::user::models::PageDefaults;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub page_defaults: PageDefaults,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    user_service: Arc<dyn UserServicePort>,
    access_guard: Arc<AccessGuard>,
    page_defaults: PageDefaults,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        page_defaults,
    };

    let public_routes = Router::new()
        .route("/", get(version))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/user/list", get(list_users))
        .route_layer(middleware::from_fn_with_state(access_guard, authenticate));

    // Only the path is recorded: headers and query strings may carry tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

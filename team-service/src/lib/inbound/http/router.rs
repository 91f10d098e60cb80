use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::google_login::google_login;
use super::handlers::history::history;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::randomize::randomize;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use super::middleware::optional_authenticate;
use crate::account::ports::AccountServicePort;
use crate::team::ports::TeamServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub team_service: Arc<dyn TeamServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    team_service: Arc<dyn TeamServicePort>,
) -> Router {
    let state = AppState {
        account_service,
        team_service,
    };

    let public_routes = Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/google", get(google_login));

    let optional_routes = Router::new()
        .route("/v1/random", post(randomize))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_authenticate,
        ));

    let protected_routes = Router::new()
        .route("/v1/history", get(history))
        .route("/v1/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
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
        .merge(optional_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

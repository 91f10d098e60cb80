use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::handlers::ApiError;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::inbound::http::router::AppState;

/// Extension holding the account resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account: Account,
}

/// Reject the request unless it carries a valid bearer token.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let account = resolve(&state, token).await?;
    req.extensions_mut().insert(AuthenticatedAccount { account });

    Ok(next.run(req).await)
}

/// Attach the caller's account when a bearer token is present.
///
/// No header means an anonymous request. A header that is present but
/// malformed or invalid is rejected rather than downgraded to anonymous.
pub async fn optional_authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    if let Some(token) = extract_token_from_header(&req)? {
        let account = resolve(&state, token).await?;
        req.extensions_mut().insert(AuthenticatedAccount { account });
    }

    Ok(next.run(req).await)
}

async fn resolve(state: &AppState, token: &str) -> Result<Account, Response> {
    state
        .account_service
        .authenticate_session(token)
        .await
        .map_err(|e| match e {
            AccountError::Unauthenticated => unauthorized("Invalid or expired token"),
            other => ApiError::from(other).into_response(),
        })
}

fn extract_token_from_header(req: &Request) -> Result<Option<&str>, Response> {
    let Some(auth_header) = req.headers().get(http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        _ => Err(unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>",
        )),
    }
}

fn unauthorized(message: &str) -> Response {
    tracing::warn!(reason = message, "Request rejected by authentication");
    ApiError::Unauthorized(message.to_string()).into_response()
}

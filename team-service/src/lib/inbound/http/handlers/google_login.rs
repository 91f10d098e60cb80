use axum::extract::Query;
use axum::extract::State;
use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::account::models::FederatedLogin;
use crate::inbound::http::router::AppState;

/// Google login entry point and OAuth callback.
///
/// Without `code` the caller is redirected (302) to Google. With `code` the
/// code is exchanged and a session is returned as JSON.
pub async fn google_login(
    State(state): State<AppState>,
    Query(query): Query<GoogleLoginQuery>,
) -> Result<Response, ApiError> {
    let code = query.code.filter(|c| !c.is_empty());
    let outcome = state
        .account_service
        .federated_login(code, query.state)
        .await?;

    Ok(match outcome {
        FederatedLogin::Redirect { authorization_url } => {
            (StatusCode::FOUND, [(header::LOCATION, authorization_url)]).into_response()
        }
        FederatedLogin::Authenticated(session) => ApiSuccess::new(
            StatusCode::OK,
            SessionData {
                token: session.token,
                account_id: session.account.id.to_string(),
                expires_at: session.expires_at,
            },
        )
        .into_response(),
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleLoginQuery {
    code: Option<String>,
    state: Option<String>,
}

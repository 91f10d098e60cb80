use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::SessionData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<SessionData>, ApiError> {
    let session = state
        .account_service
        .login(&body.name, &body.password)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionData {
            token: session.token,
            account_id: session.account.id.to_string(),
            expires_at: session.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    name: String,
    password: String,
}

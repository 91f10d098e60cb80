use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AssignmentData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;
use crate::team::errors::RosterError;
use crate::team::models::RandomizeCommand;
use crate::team::models::Roster;
use crate::team::models::RosterEntry;
use crate::team::models::TeamCount;

/// Split the posted roster into teams. Authenticated callers get the result saved.
pub async fn randomize(
    State(state): State<AppState>,
    caller: Option<Extension<AuthenticatedAccount>>,
    Json(body): Json<RandomizeRequest>,
) -> Result<ApiSuccess<AssignmentData>, ApiError> {
    let command = body.try_into_command()?;
    let owner = caller.map(|Extension(caller)| caller.account.id);

    state
        .team_service
        .randomize(command, owner)
        .await
        .map_err(ApiError::from)
        .map(|result| ApiSuccess::new(StatusCode::OK, result.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonRequest {
    name: String,
    role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RandomizeRequest {
    people: Vec<PersonRequest>,
    team_count: i64,
}

impl RandomizeRequest {
    fn try_into_command(self) -> Result<RandomizeCommand, RosterError> {
        let team_count = TeamCount::new(self.team_count)?;
        let entries = self
            .people
            .into_iter()
            .enumerate()
            .map(|(index, p)| RosterEntry::new(index, p.name, p.role))
            .collect::<Result<Vec<_>, _>>()?;
        let roster = Roster::new(entries)?;
        Ok(RandomizeCommand::new(roster, team_count))
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

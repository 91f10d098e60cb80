use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::team::errors::TeamError;
use crate::team::models::AssignmentResult;
use crate::team::models::Person;
use crate::team::models::Team;

pub mod google_login;
pub mod history;
pub mod login;
pub mod me;
pub mod randomize;
pub mod register;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const UPSTREAM_ERROR_MESSAGE: &str = "Identity provider request failed";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AccountError::EmailAlreadyExists(_) | AccountError::NameAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials
            | AccountError::Unauthenticated
            | AccountError::UnverifiedEmail => ApiError::Unauthorized(err.to_string()),
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidName(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::Exchange(_) | AccountError::ProfileFetch(_) => {
                tracing::warn!(error = %err, "Identity provider failure");
                ApiError::BadGateway(UPSTREAM_ERROR_MESSAGE.to_string())
            }
            AccountError::FederationDisabled
            | AccountError::Hashing(_)
            | AccountError::TokenIssuance(_)
            | AccountError::DatabaseError(_)
            | AccountError::Timeout(_) => {
                tracing::error!(error = %err, "Account operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<TeamError> for ApiError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::InvalidRoster(_) => ApiError::UnprocessableEntity(err.to_string()),
            TeamError::DatabaseError(_) | TeamError::Timeout(_) => {
                tracing::error!(error = %err, "Team operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub federated: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.as_str().to_string(),
            email: account.email.as_ref().map(|e| e.as_str().to_string()),
            federated: account.google_id.is_some(),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub token: String,
    pub account_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub role: String,
    pub team: u32,
}

impl From<Person> for PersonData {
    fn from(person: Person) -> Self {
        Self {
            id: person.id.map(|id| id.to_string()),
            name: person.name,
            role: person.role,
            team: person.team,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamData {
    pub team: u32,
    pub members: Vec<PersonData>,
}

impl From<Team> for TeamData {
    fn from(team: Team) -> Self {
        Self {
            team: team.team,
            members: team.members.into_iter().map(PersonData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentData {
    pub teams: Vec<TeamData>,
    pub total: usize,
}

impl From<AssignmentResult> for AssignmentData {
    fn from(result: AssignmentResult) -> Self {
        Self {
            teams: result.teams.into_iter().map(TeamData::from).collect(),
            total: result.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_hide_details() {
        let err = ApiError::from(AccountError::DatabaseError(
            "connection refused at 10.0.0.3".to_string(),
        ));
        assert_eq!(
            err,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );

        let err = ApiError::from(TeamError::Timeout("insert_people".to_string()));
        assert_eq!(
            err,
            ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_provider_errors_map_to_bad_gateway() {
        let err = ApiError::from(AccountError::Exchange("invalid_grant".to_string()));
        assert_eq!(err, ApiError::BadGateway(UPSTREAM_ERROR_MESSAGE.to_string()));

        let err = ApiError::from(AccountError::ProfileFetch("500".to_string()));
        assert_eq!(err, ApiError::BadGateway(UPSTREAM_ERROR_MESSAGE.to_string()));
    }

    #[test]
    fn test_credential_errors_map_to_unauthorized() {
        assert_eq!(
            ApiError::from(AccountError::InvalidCredentials),
            ApiError::Unauthorized("Invalid name or password".to_string())
        );
        assert!(matches!(
            ApiError::from(AccountError::Unauthenticated),
            ApiError::Unauthorized(_)
        ));
    }

    #[test]
    fn test_conflicts_and_validation() {
        assert!(matches!(
            ApiError::from(AccountError::EmailAlreadyExists("a@b.co".to_string())),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(TeamError::InvalidRoster(
                crate::team::errors::RosterError::Empty
            )),
            ApiError::UnprocessableEntity(_)
        ));
    }
}

use async_trait::async_trait;

use crate::account::models::AccountId;
use crate::team::errors::TeamError;
use crate::team::models::AssignmentResult;
use crate::team::models::Person;
use crate::team::models::RandomizeCommand;

/// Port for team assignment operations.
#[async_trait]
pub trait TeamServicePort: Send + Sync + 'static {
    /// Split a roster into role-balanced teams.
    ///
    /// When `owner` is given, the produced people are saved for that account
    /// as one atomic batch before the result is returned.
    ///
    /// # Errors
    /// * `DatabaseError` / `Timeout` - Saving failed; no partial result is reported
    async fn randomize(
        &self,
        command: RandomizeCommand,
        owner: Option<AccountId>,
    ) -> Result<AssignmentResult, TeamError>;

    /// Regroup everything saved for `owner` by stored team number.
    ///
    /// An account with nothing saved gets an empty result, not an error.
    async fn history(&self, owner: &AccountId) -> Result<AssignmentResult, TeamError>;
}

/// Persistence operations for saved people.
#[async_trait]
pub trait RosterRepository: Send + Sync + 'static {
    /// Insert all people for `owner` in one transaction and return them with ids.
    ///
    /// # Errors
    /// * `DatabaseError` / `Timeout` - Nothing was committed
    async fn insert_batch(
        &self,
        owner: &AccountId,
        people: Vec<Person>,
    ) -> Result<Vec<Person>, TeamError>;

    /// Retrieve every person saved by `owner`, ordered by role then name.
    async fn fetch_by_account(&self, owner: &AccountId) -> Result<Vec<Person>, TeamError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::account::models::AccountId;
use crate::team::assignment;
use crate::team::errors::TeamError;
use crate::team::models::AssignmentResult;
use crate::team::models::RandomizeCommand;
use crate::team::ports::RosterRepository;
use crate::team::ports::TeamServicePort;

/// Domain service implementation for team assignment.
pub struct TeamService<RR>
where
    RR: RosterRepository,
{
    repository: Arc<RR>,
}

impl<RR> TeamService<RR>
where
    RR: RosterRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> TeamServicePort for TeamService<RR>
where
    RR: RosterRepository,
{
    async fn randomize(
        &self,
        command: RandomizeCommand,
        owner: Option<AccountId>,
    ) -> Result<AssignmentResult, TeamError> {
        // Request-local generator, freshly seeded from OS entropy
        let mut rng = StdRng::from_entropy();
        let people = assignment::assign(&command.roster, command.team_count, &mut rng);

        let people = match owner {
            Some(owner) => {
                let saved = self.repository.insert_batch(&owner, people).await?;
                tracing::info!(
                    account_id = %owner,
                    people = saved.len(),
                    teams = command.team_count.get(),
                    "Roster saved"
                );
                saved
            }
            None => people,
        };

        Ok(AssignmentResult::from_people(people))
    }

    async fn history(&self, owner: &AccountId) -> Result<AssignmentResult, TeamError> {
        let people = self.repository.fetch_by_account(owner).await?;
        Ok(AssignmentResult::from_people(people))
    }
}

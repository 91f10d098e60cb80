use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use super::bounded;
use super::StoreFailure;
use crate::account::models::AccountId;
use crate::team::errors::TeamError;
use crate::team::models::Person;
use crate::team::models::PersonId;
use crate::team::ports::RosterRepository;

impl From<StoreFailure> for TeamError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Timeout(operation) => TeamError::Timeout(operation.to_string()),
            StoreFailure::Database(e) => TeamError::DatabaseError(e.to_string()),
        }
    }
}

pub struct PostgresRosterRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresRosterRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl RosterRepository for PostgresRosterRepository {
    async fn insert_batch(
        &self,
        owner: &AccountId,
        people: Vec<Person>,
    ) -> Result<Vec<Person>, TeamError> {
        let pool = &self.pool;
        let owner_id = owner.0;

        let saved = bounded(self.timeout, "insert_people", async move {
            let mut tx = pool.begin().await?;
            let mut saved = Vec::with_capacity(people.len());

            for person in people {
                let id = PersonId::new();
                sqlx::query(
                    r#"
                    INSERT INTO people (id, user_id, name, role, team)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(id.0)
                .bind(owner_id)
                .bind(&person.name)
                .bind(&person.role)
                .bind(i64::from(person.team))
                .execute(&mut *tx)
                .await?;

                saved.push(Person {
                    id: Some(id),
                    ..person
                });
            }

            tx.commit().await?;
            Ok(saved)
        })
        .await?;

        Ok(saved)
    }

    async fn fetch_by_account(&self, owner: &AccountId) -> Result<Vec<Person>, TeamError> {
        let rows = bounded(
            self.timeout,
            "fetch_people",
            sqlx::query(
                r#"
                SELECT id, name, role, team
                FROM people
                WHERE user_id = $1
                ORDER BY role, name
                "#,
            )
            .bind(owner.0)
            .fetch_all(&self.pool),
        )
        .await?;

        rows.into_iter()
            .map(|r| {
                let id: Uuid = r.get("id");
                let team: i64 = r.get("team");
                let team = u32::try_from(team).map_err(|_| {
                    TeamError::DatabaseError(format!("stored team number {team} out of range"))
                })?;

                Ok(Person {
                    id: Some(PersonId(id)),
                    name: r.get("name"),
                    role: r.get("role"),
                    team,
                })
            })
            .collect()
    }
}

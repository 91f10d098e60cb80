use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgArguments;
use sqlx::postgres::PgRow;
use sqlx::query::Query;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::Row;
use uuid::Uuid;

use super::bounded;
use super::StoreFailure;
use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::DisplayName;
use crate::account::models::EmailAddress;
use crate::account::ports::AccountRepository;

impl From<StoreFailure> for AccountError {
    fn from(failure: StoreFailure) -> Self {
        match failure {
            StoreFailure::Timeout(operation) => AccountError::Timeout(operation.to_string()),
            StoreFailure::Database(e) => AccountError::DatabaseError(e.to_string()),
        }
    }
}

pub struct PostgresAccountRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    fn row_to_account(row: PgRow) -> Result<Account, AccountError> {
        let id: Uuid = row.get("id");
        let email: Option<String> = row.get("email");
        let created_at: DateTime<Utc> = row.get("created_at");

        Ok(Account {
            id: AccountId(id),
            email: email.map(EmailAddress::new).transpose()?,
            google_id: row.get("google_id"),
            name: DisplayName::new(row.get("name"))?,
            password_hash: row.get("password_hash"),
            created_at,
        })
    }

    async fn fetch_account(
        &self,
        operation: &'static str,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Result<Option<Account>, AccountError> {
        let row = bounded(self.timeout, operation, query.fetch_optional(&self.pool)).await?;

        row.map(Self::row_to_account).transpose()
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let insert = sqlx::query(
            r#"
            INSERT INTO accounts (id, email, google_id, name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_ref().map(|e| e.as_str()))
        .bind(account.google_id.as_deref())
        .bind(account.name.as_str())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool);

        match bounded(self.timeout, "insert_account", insert).await {
            Ok(_) => Ok(account),
            Err(StoreFailure::Database(e)) => {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        if db_err.constraint() == Some("accounts_email_key") {
                            return Err(AccountError::EmailAlreadyExists(
                                account.email.map(|e| e.to_string()).unwrap_or_default(),
                            ));
                        }
                        if db_err.constraint() == Some("accounts_local_name_key") {
                            return Err(AccountError::NameAlreadyExists(account.name.to_string()));
                        }
                    }
                }
                Err(AccountError::DatabaseError(e.to_string()))
            }
            Err(failure) => Err(failure.into()),
        }
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let query = sqlx::query(
            r#"
            SELECT id, email, google_id, name, password_hash, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0);

        self.fetch_account("find_account_by_id", query).await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let query = sqlx::query(
            r#"
            SELECT id, email, google_id, name, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str());

        self.fetch_account("find_account_by_email", query).await
    }

    async fn find_by_name(&self, name: &DisplayName) -> Result<Option<Account>, AccountError> {
        let query = sqlx::query(
            r#"
            SELECT id, email, google_id, name, password_hash, created_at
            FROM accounts
            WHERE name = $1
            ORDER BY (password_hash = '') ASC, created_at ASC
            LIMIT 1
            "#,
        )
        .bind(name.as_str());

        self.fetch_account("find_account_by_name", query).await
    }
}

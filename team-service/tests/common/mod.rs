#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtHandler;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use team_service::account::errors::AccountError;
use team_service::account::models::Account;
use team_service::account::models::AccountId;
use team_service::account::models::DisplayName;
use team_service::account::models::EmailAddress;
use team_service::account::models::FederatedProfile;
use team_service::account::ports::AccountRepository;
use team_service::account::ports::IdentityProvider;
use team_service::account::service::AccountService;
use team_service::inbound::http::router::create_router;
use team_service::team::errors::TeamError;
use team_service::team::models::Person;
use team_service::team::models::PersonId;
use team_service::team::ports::RosterRepository;
use team_service::team::service::TeamService;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Authorization codes understood by [`StubIdentityProvider`]
pub const GOOD_CODE: &str = "good-code";
pub const UNVERIFIED_CODE: &str = "unverified-code";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub people: Arc<InMemoryRosterRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application with federated login enabled
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Some(Arc::new(StubIdentityProvider))).await
    }

    /// Spawn the application without an identity provider
    pub async fn spawn_without_federation() -> Self {
        Self::spawn_with_provider(None).await
    }

    async fn spawn_with_provider(provider: Option<Arc<StubIdentityProvider>>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let accounts = Arc::new(InMemoryAccountRepository::default());
        let people = Arc::new(InMemoryRosterRepository::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&accounts),
            provider,
            authenticator,
        ));
        let team_service = Arc::new(TeamService::new(Arc::clone(&people)));

        let router = create_router(account_service, team_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            accounts,
            people,
            api_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register an account and return its login token
    pub async fn register_and_login(&self, name: &str, email: &str) -> String {
        let response = self
            .post("/v1/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "name": name,
                "password": "pass_word!"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self
            .post("/v1/auth/login")
            .json(&serde_json::json!({
                "name": name,
                "password": "pass_word!"
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Token missing")
            .to_string()
    }
}

/// Account store enforcing the same uniqueness rules as the Postgres schema
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    pub fn remove(&self, id: &AccountId) {
        self.accounts.lock().unwrap().retain(|a| &a.id != id);
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        if let Some(email) = &account.email {
            if accounts.iter().any(|a| a.email.as_ref() == Some(email)) {
                return Err(AccountError::EmailAlreadyExists(email.to_string()));
            }
        }
        if account.has_password()
            && accounts
                .iter()
                .any(|a| a.has_password() && a.name == account.name)
        {
            return Err(AccountError::NameAlreadyExists(account.name.to_string()));
        }

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| &a.id == id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|a| a.email.as_ref() == Some(email))
            .cloned())
    }

    async fn find_by_name(&self, name: &DisplayName) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        let mut matching: Vec<&Account> = accounts.iter().filter(|a| &a.name == name).collect();
        matching.sort_by_key(|a| (!a.has_password(), a.created_at));
        Ok(matching.first().map(|a| (*a).clone()))
    }
}

/// Person store keyed by owning account
#[derive(Default)]
pub struct InMemoryRosterRepository {
    people: Mutex<HashMap<AccountId, Vec<Person>>>,
}

impl InMemoryRosterRepository {
    pub fn count_for(&self, owner: &AccountId) -> usize {
        self.people
            .lock()
            .unwrap()
            .get(owner)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.people.lock().unwrap().values().map(Vec::len).sum()
    }
}

#[async_trait]
impl RosterRepository for InMemoryRosterRepository {
    async fn insert_batch(
        &self,
        owner: &AccountId,
        people: Vec<Person>,
    ) -> Result<Vec<Person>, TeamError> {
        let saved: Vec<Person> = people
            .into_iter()
            .map(|p| Person {
                id: Some(PersonId::new()),
                ..p
            })
            .collect();

        self.people
            .lock()
            .unwrap()
            .entry(*owner)
            .or_default()
            .extend(saved.iter().cloned());

        Ok(saved)
    }

    async fn fetch_by_account(&self, owner: &AccountId) -> Result<Vec<Person>, TeamError> {
        let mut people = self
            .people
            .lock()
            .unwrap()
            .get(owner)
            .cloned()
            .unwrap_or_default();
        people.sort_by(|a, b| (&a.role, &a.name).cmp(&(&b.role, &b.name)));
        Ok(people)
    }
}

/// Identity provider answering fixed authorization codes
pub struct StubIdentityProvider;

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://accounts.example.test/o/oauth2/auth?state={state}")
    }

    async fn exchange(&self, code: &str) -> Result<FederatedProfile, AccountError> {
        let verified_email = match code {
            GOOD_CODE => true,
            UNVERIFIED_CODE => false,
            _ => return Err(AccountError::Exchange("invalid_grant".to_string())),
        };

        Ok(FederatedProfile {
            provider_id: "google-109876".to_string(),
            email: EmailAddress::new("dana@example.com".to_string())?,
            verified_email,
            name: DisplayName::new("Dana Scully".to_string())?,
        })
    }
}

/// Throwaway PostgreSQL database with migrations applied.
///
/// Connects through `DATABASE_URL`. When it is unset the database-backed
/// tests are skipped.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name
    pub async fn new() -> Option<Self> {
        let Ok(admin_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping database-backed test");
            return None;
        };

        let db_name = format!(
            "test_team_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }

    /// Close the pool and drop the database
    pub async fn cleanup(self) {
        self.pool.close().await;

        if let Ok(mut conn) = PgConnection::connect(&self.admin_url).await {
            let _ = conn
                .execute(format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE);"#, self.db_name).as_str())
                .await;
        }
    }
}

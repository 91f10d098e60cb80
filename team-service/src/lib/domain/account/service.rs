use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::DisplayName;
use crate::account::models::EmailAddress;
use crate::account::models::FederatedLogin;
use crate::account::models::FederatedProfile;
use crate::account::models::RegisterCommand;
use crate::account::models::Session;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::IdentityProvider;

/// Domain service implementation for account and session operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR, IP>
where
    AR: AccountRepository,
    IP: IdentityProvider,
{
    repository: Arc<AR>,
    identity_provider: Option<Arc<IP>>,
    authenticator: Arc<Authenticator>,
}

impl<AR, IP> AccountService<AR, IP>
where
    AR: AccountRepository,
    IP: IdentityProvider,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `identity_provider` - Federated identity provider, `None` disables federated login
    /// * `authenticator` - Credential verifier and session issuer
    pub fn new(
        repository: Arc<AR>,
        identity_provider: Option<Arc<IP>>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            identity_provider,
            authenticator,
        }
    }

    fn issue_session(&self, account: Account) -> Result<Session, AccountError> {
        let result = self
            .authenticator
            .issue_token(account.id)
            .map_err(|e| AccountError::TokenIssuance(e.to_string()))?;

        Ok(Session {
            account,
            token: result.access_token,
            expires_at: result.expires_at,
        })
    }
}

#[async_trait]
impl<AR, IP> AccountServicePort for AccountService<AR, IP>
where
    AR: AccountRepository,
    IP: IdentityProvider,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            email: Some(command.email),
            google_id: None,
            name: command.name,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "Account registered");

        Ok(created)
    }

    async fn login(&self, name: &str, password: &str) -> Result<Session, AccountError> {
        let account = match DisplayName::new(name.to_string()) {
            Ok(name) => self.repository.find_by_name(&name).await?,
            Err(_) => None,
        };
        let Some(account) = account else {
            self.authenticator.reject(password);
            return Err(AccountError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(password, &account.password_hash, account.id)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(account_id = %account.id, error = %err, "Stored password hash unusable");
                    AccountError::Hashing(err.to_string())
                }
                AuthenticationError::JwtError(err) => AccountError::TokenIssuance(err.to_string()),
            })?;

        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(Session {
            account,
            token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn federated_login(
        &self,
        code: Option<String>,
        state: Option<String>,
    ) -> Result<FederatedLogin, AccountError> {
        let provider = self
            .identity_provider
            .as_ref()
            .ok_or(AccountError::FederationDisabled)?;

        let code = match code.filter(|c| !c.is_empty()) {
            Some(code) => code,
            None => {
                let state = state
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                return Ok(FederatedLogin::Redirect {
                    authorization_url: provider.authorization_url(&state),
                });
            }
        };

        let profile = provider.exchange(&code).await?;
        let account = self.resolve_or_create_federated(profile).await?;
        let session = self.issue_session(account)?;

        tracing::info!(account_id = %session.account.id, "Federated login succeeded");

        Ok(FederatedLogin::Authenticated(session))
    }

    async fn authenticate_session(&self, token: &str) -> Result<Account, AccountError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            AccountError::Unauthenticated
        })?;

        let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Session subject is not an account id");
            AccountError::Unauthenticated
        })?;

        self.repository
            .find_by_id(&account_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(account_id = %account_id, "Session refers to a missing account");
                AccountError::Unauthenticated
            })
    }

    async fn resolve_local(&self, name: &DisplayName) -> Result<Account, AccountError> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or(AccountError::NotFound(name.to_string()))
    }

    async fn resolve_by_email(&self, email: &EmailAddress) -> Result<Account, AccountError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::NotFound(email.to_string()))
    }

    async fn resolve_or_create_federated(
        &self,
        profile: FederatedProfile,
    ) -> Result<Account, AccountError> {
        if !profile.verified_email {
            return Err(AccountError::UnverifiedEmail);
        }

        if let Some(existing) = self.repository.find_by_email(&profile.email).await? {
            return Ok(existing);
        }

        let account = Account {
            id: AccountId::new(),
            email: Some(profile.email.clone()),
            google_id: Some(profile.provider_id),
            name: profile.name,
            password_hash: String::new(),
            created_at: Utc::now(),
        };

        match self.repository.create(account).await {
            Ok(created) => {
                tracing::info!(account_id = %created.id, "Federated account created");
                Ok(created)
            }
            // A concurrent first login for the same email won the insert
            Err(AccountError::EmailAlreadyExists(_)) => self.resolve_by_email(&profile.email).await,
            Err(e) => Err(e),
        }
    }
}

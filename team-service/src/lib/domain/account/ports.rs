use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::DisplayName;
use crate::account::models::EmailAddress;
use crate::account::models::FederatedLogin;
use crate::account::models::FederatedProfile;
use crate::account::models::RegisterCommand;
use crate::account::models::Session;

/// Port for account and session operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new local account.
    ///
    /// # Errors
    /// * `Hashing` - Password could not be hashed; nothing is stored
    /// * `EmailAlreadyExists` / `NameAlreadyExists` - Uniqueness violated
    /// * `DatabaseError` / `Timeout` - Store failure
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Check a name/password pair and issue a session.
    ///
    /// Unknown name, wrong password and password-less accounts all fail with
    /// the same `InvalidCredentials` error.
    async fn login(&self, name: &str, password: &str) -> Result<Session, AccountError>;

    /// Federated login entry point.
    ///
    /// Without a code, returns the provider authorization URL. With a code,
    /// exchanges it, resolves (or creates) the account and issues a session.
    ///
    /// # Errors
    /// * `FederationDisabled` - No identity provider configured
    /// * `Exchange` - Provider rejected the code
    /// * `ProfileFetch` - Profile could not be retrieved or is unusable
    /// * `UnverifiedEmail` - Provider did not verify the profile email
    async fn federated_login(
        &self,
        code: Option<String>,
        state: Option<String>,
    ) -> Result<FederatedLogin, AccountError>;

    /// Validate a bearer token and re-resolve its account.
    ///
    /// # Errors
    /// * `Unauthenticated` - Bad signature, wrong algorithm, expired, malformed
    ///   claims, or the account no longer exists
    async fn authenticate_session(&self, token: &str) -> Result<Account, AccountError>;

    /// Resolve a local account by its name.
    ///
    /// # Errors
    /// * `NotFound` - No account with this name
    async fn resolve_local(&self, name: &DisplayName) -> Result<Account, AccountError>;

    /// Resolve an account by email.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    async fn resolve_by_email(&self, email: &EmailAddress) -> Result<Account, AccountError>;

    /// Return the account owning `profile.email`, creating a federation-only
    /// account on first sight. Existing accounts are returned unchanged.
    async fn resolve_or_create_federated(
        &self,
        profile: FederatedProfile,
    ) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// Lookups return `Ok(None)` when no row matches; errors are reserved for
/// storage failures.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `NameAlreadyExists` - Another password account uses this name
    /// * `DatabaseError` / `Timeout` - Store failure
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;

    /// Retrieve the account that logs in with `name`.
    ///
    /// Names are only unique among accounts holding a password; when several
    /// accounts share a name, the one with a password wins.
    async fn find_by_name(&self, name: &DisplayName) -> Result<Option<Account>, AccountError>;
}

/// External identity provider speaking the OAuth 2.0 authorization-code flow.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// URL the user agent must visit to grant access.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code and fetch the user's profile.
    ///
    /// # Errors
    /// * `Exchange` - Code rejected or token endpoint unreachable
    /// * `ProfileFetch` - Profile endpoint failed or returned an unusable profile
    async fn exchange(&self, code: &str) -> Result<FederatedProfile, AccountError>;
}

use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::HashCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Validity window applied when none is configured.
pub const DEFAULT_SESSION_HOURS: i64 = 3;

/// Authentication coordinator combining password verification and session issuance.
///
/// Holds the single symmetric signing secret; it is injected here at
/// construction and never read from ambient state.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    session_validity: Duration,
    /// Hash verified against when there is no real one, so rejections cost
    /// the same as a wrong password
    decoy_hash: OnceLock<Option<String>>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default hashing cost and a
    /// [`DEFAULT_SESSION_HOURS`] validity window.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            session_validity: Duration::hours(DEFAULT_SESSION_HOURS),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Create an authenticator with explicit cost and validity settings.
    ///
    /// # Errors
    /// * `CostTooLow` - Hashing cost is below the enforced floor
    pub fn with_settings(
        jwt_secret: &[u8],
        cost: HashCost,
        session_validity: Duration,
    ) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_cost(cost)?,
            jwt_handler: JwtHandler::new(jwt_secret),
            session_validity,
            decoy_hash: OnceLock::new(),
        })
    }

    /// Length of the window a freshly issued token stays valid.
    pub fn session_validity(&self) -> Duration {
        self.session_validity
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// # Errors
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// An empty stored hash (account without a password) never matches.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or no password is set
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if stored_hash.is_empty() {
            return Err(self.reject(password));
        }

        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject)?)
    }

    /// Reject a login for which no usable hash exists.
    ///
    /// Runs one verification against a decoy hash of the configured cost so an
    /// unknown account takes as long to reject as a wrong password.
    pub fn reject(&self, password: &str) -> AuthenticationError {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash("decoy-password").ok());
        if let Some(hash) = decoy {
            let _ = self.password_hasher.verify(password, hash);
        }
        AuthenticationError::InvalidCredentials
    }

    /// Issue a session token without password verification.
    ///
    /// Used when authentication has already been established by other means,
    /// e.g. a federated identity exchange.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: impl ToString) -> Result<AuthenticationResult, JwtError> {
        self.issue_token_at(subject, Utc::now())
    }

    /// Issue a session token as if issued at `issued_at`.
    pub fn issue_token_at(
        &self,
        subject: impl ToString,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = Claims::for_subject(subject, issued_at, self.session_validity);
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("Expiry out of range".to_string()))?;
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate a session token and decode its claims.
    ///
    /// # Errors
    /// * `JwtError` - Signature, algorithm, expiry or claim shape check failed
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

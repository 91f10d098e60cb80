use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::DisplayNameError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordPolicyError;

/// Account aggregate entity.
///
/// Canonical identity, reachable by local credentials and/or a federated
/// identity. `password_hash` is empty for federation-only accounts, which
/// therefore can never pass a password login.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: Option<EmailAddress>,
    pub google_id: Option<String>,
    pub name: DisplayName,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn has_password(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, non-blank, at most 64 characters, no control characters.
/// Locally registered names must additionally be at least 3 characters long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 64;
    const MIN_LOCAL_LENGTH: usize = 3;

    /// Create a display name, as asserted by an identity provider or read from storage.
    ///
    /// # Errors
    /// * `Blank` - Empty after trimming
    /// * `TooLong` - Longer than 64 characters
    /// * `InvalidCharacters` - Contains control characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DisplayNameError::Blank);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if name.chars().any(char::is_control) {
            return Err(DisplayNameError::InvalidCharacters);
        }

        Ok(Self(name))
    }

    /// Create a display name for a locally registered account.
    ///
    /// # Errors
    /// * `TooShort` - Shorter than 3 characters
    /// * any error of [`DisplayName::new`]
    pub fn for_registration(name: String) -> Result<Self, DisplayNameError> {
        let name = Self::new(name)?;
        let length = name.0.chars().count();
        if length < Self::MIN_LOCAL_LENGTH {
            return Err(DisplayNameError::TooShort {
                min: Self::MIN_LOCAL_LENGTH,
                actual: length,
            });
        }
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored lowercased
/// so that lookups by email are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new local account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub name: DisplayName,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, name: DisplayName, password: Password) -> Self {
        Self {
            email,
            name,
            password,
        }
    }
}

/// Identity asserted by an external provider after a code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    /// Provider-scoped subject identifier
    pub provider_id: String,
    pub email: EmailAddress,
    pub verified_email: bool,
    pub name: DisplayName,
}

/// A freshly issued session for an account.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Outcome of the federated login entry point.
#[derive(Debug, Clone)]
pub enum FederatedLogin {
    /// No authorization code yet: the caller must visit the provider first.
    Redirect { authorization_url: String },
    /// Code exchanged, account resolved and session issued.
    Authenticated(Session),
}

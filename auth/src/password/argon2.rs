use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id work factors.
///
/// Every field is bounded below by [`HashCost::MINIMUM`]; a hasher can never be
/// built with weaker parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashCost {
    /// Floor for every configured cost (the Argon2 recommended defaults).
    pub const MINIMUM: HashCost = HashCost {
        memory_kib: Params::DEFAULT_M_COST,
        iterations: Params::DEFAULT_T_COST,
        parallelism: Params::DEFAULT_P_COST,
    };

    fn check_floor(&self) -> Result<(), PasswordError> {
        let floor = Self::MINIMUM;
        if self.memory_kib < floor.memory_kib
            || self.iterations < floor.iterations
            || self.parallelism < floor.parallelism
        {
            return Err(PasswordError::CostTooLow(format!(
                "m={}, t={}, p={} (minimum m={}, t={}, p={})",
                self.memory_kib,
                self.iterations,
                self.parallelism,
                floor.memory_kib,
                floor.iterations,
                floor.parallelism
            )));
        }
        Ok(())
    }
}

impl Default for HashCost {
    fn default() -> Self {
        Self::MINIMUM
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a new password hasher with the default cost.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a password hasher with a tuned cost.
    ///
    /// # Arguments
    /// * `cost` - Argon2id work factors
    ///
    /// # Returns
    /// PasswordHasher using the given parameters
    ///
    /// # Errors
    /// * `CostTooLow` - Any factor is below [`HashCost::MINIMUM`]
    /// * `HashingFailed` - Argon2 rejected the parameter combination
    pub fn with_cost(cost: HashCost) -> Result<Self, PasswordError> {
        cost.check_floor()?;

        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The parameters encoded in the stored hash are used for verification.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Hash format is invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password").unwrap();
        let second = hasher.hash("same_password").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first).unwrap());
        assert!(hasher.verify("same_password", &second).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_verify_empty_hash_is_error() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("password", "").is_err());
    }

    #[test]
    fn test_with_cost_rejects_weak_parameters() {
        let weak = HashCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };

        let result = PasswordHasher::with_cost(weak);
        assert!(matches!(result, Err(PasswordError::CostTooLow(_))));
    }

    #[test]
    fn test_with_cost_encodes_parameters_in_hash() {
        let cost = HashCost {
            memory_kib: HashCost::MINIMUM.memory_kib,
            iterations: 3,
            parallelism: 1,
        };
        let hasher = PasswordHasher::with_cost(cost).expect("Cost should be accepted");

        let hash = hasher.hash("password123").unwrap();
        assert!(hash.contains("t=3"));

        // A default-cost hasher still verifies it, the parameters travel with the hash
        assert!(PasswordHasher::new().verify("password123", &hash).unwrap());
    }
}

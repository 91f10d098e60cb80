use thiserror::Error;

/// Error for roster and team count validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("Roster must contain at least one person")]
    Empty,

    #[error("Team count must be at least 1, got {0}")]
    InvalidTeamCount(i64),

    #[error("Person {index}: name is required")]
    BlankName { index: usize },

    #[error("Person {index}: role is required")]
    BlankRole { index: usize },

    #[error("Person {index}: {field} contains control characters")]
    InvalidCharacters { index: usize, field: &'static str },

    #[error("Person {index}: {field} too long, maximum {max} characters")]
    TooLong {
        index: usize,
        field: &'static str,
        max: usize,
    },
}

/// Top-level error for team assignment operations
#[derive(Debug, Clone, Error)]
pub enum TeamError {
    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] RosterError),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Store operation timed out: {0}")]
    Timeout(String),
}

use std::future::Future;
use std::time::Duration;

pub mod account;
pub mod roster;

pub use account::PostgresAccountRepository;
pub use roster::PostgresRosterRepository;

/// Failure of a single bounded store call.
#[derive(Debug)]
pub enum StoreFailure {
    Timeout(&'static str),
    Database(sqlx::Error),
}

/// Run a store operation, failing with `Timeout` once `limit` elapses.
///
/// The operation future is dropped on timeout, which rolls back any open
/// transaction it owns.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    future: F,
) -> Result<T, StoreFailure>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result.map_err(StoreFailure::Database),
        Err(_) => {
            tracing::error!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "Store operation timed out"
            );
            Err(StoreFailure::Timeout(operation))
        }
    }
}

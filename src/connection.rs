use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlDatabaseError};
use sqlx::Connection;
use std::future::Future;
use std::time;

use crate::error::ConnectError;

// ER_CON_COUNT_ERROR and ER_SERVER_SHUTDOWN
const TRANSIENT_MYSQL_ERRORS: [u16; 2] = [1040, 1053];

/// How many times a connection is attempted and how long to wait between
/// two attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: time::Duration,
}

impl RetryPolicy {
    /// `max_attempts` counts the first attempt and is never lower than 1.
    pub fn new(max_attempts: u32, delay: time::Duration) -> RetryPolicy {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> time::Duration {
        self.delay
    }
}

/// Whether an error is worth another attempt: the server is unreachable,
/// restarting or out of connection slots.
pub fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(db_error) => {
            // SQLSTATE class 08 is "connection exception"
            let is_connection_exception = db_error
                .code()
                .map_or(false, |code| code.starts_with("08"));
            let is_server_busy = db_error
                .try_downcast_ref::<MySqlDatabaseError>()
                .map_or(false, |err| TRANSIENT_MYSQL_ERRORS.contains(&err.number()));

            is_connection_exception || is_server_busy
        }
        _ => false,
    }
}

/// Run `operation` until it succeeds, fails with a non transient error or
/// `policy.max_attempts()` attempts have been made. The operation receives the
/// number of the current attempt, starting at 1.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, ConnectError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        let err = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        tracing::warn!(
            "Attempt {}/{} failed: {:?}",
            attempt,
            policy.max_attempts(),
            err
        );

        if !is_transient(&err) {
            tracing::error!("Not retrying a non transient error");
            return Err(ConnectError::Fatal {
                attempts: attempt,
                source: err,
            });
        }

        if attempt >= policy.max_attempts() {
            tracing::error!("Giving up after {} attempts", attempt);
            return Err(ConnectError::Exhausted {
                attempts: attempt,
                source: err,
            });
        }

        tracing::info!("Retrying in {:?}", policy.delay());

        tokio::time::sleep(policy.delay()).await;
    }
}

/// Open a single connection, reconnecting on transient failures according to
/// `policy`.
#[tracing::instrument(
    name = "Connecting to the database",
    skip(options, policy),
    fields(
        max_attempts = policy.max_attempts(),
        delay_ms = policy.delay().as_millis() as u64
    )
)]
pub async fn connect_with_retry(
    options: &MySqlConnectOptions,
    policy: &RetryPolicy,
) -> Result<MySqlConnection, ConnectError> {
    let connection = retry(policy, |_| MySqlConnection::connect_with(options)).await?;

    tracing::info!("Connected to the database");

    Ok(connection)
}

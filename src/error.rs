/// Write an error followed by every error in its source chain.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();

    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}

#[derive(thiserror::Error)]
pub enum ConnectError {
    #[error("Failed to connect to the database after {attempts} attempts.")]
    Exhausted {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
    #[error("Failed to connect to the database on attempt {attempts}.")]
    Fatal {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
}

impl ConnectError {
    /// Number of connection attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            ConnectError::Exhausted { attempts, .. } | ConnectError::Fatal { attempts, .. } => {
                *attempts
            }
        }
    }
}

impl std::fmt::Debug for ConnectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum SubscriberError {
    #[error("A subscriber with email {0} already exists.")]
    AlreadyExists(String),
    #[error("There is no subscriber with email {0}.")]
    NotFound(String),
    #[error("The stored subscriber is not valid: {0}")]
    CorruptRow(String),
    #[error("Failed to execute a query against the subscribers table.")]
    Database(#[from] sqlx::Error),
}

impl std::fmt::Debug for SubscriberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum StartupError {
    #[error("Failed to reach the database.")]
    Connect(#[from] ConnectError),
    #[error("Failed to run the database migrations.")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl std::fmt::Debug for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

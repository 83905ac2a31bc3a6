use sqlx::mysql::MySqlConnection;
use sqlx::Connection;

use crate::config::Settings;
use crate::connection::connect_with_retry;
use crate::error::StartupError;

/// A connection to a database whose schema is up to date.
pub struct Database {
    connection: MySqlConnection,
}

impl Database {
    /// Wait for the configured database to accept connections, then apply the
    /// pending migrations.
    #[tracing::instrument(name = "Preparing the database", skip(config))]
    pub async fn build(config: &Settings) -> Result<Self, StartupError> {
        let mut connection =
            connect_with_retry(&config.get_db_options(), &config.get_retry_policy()).await?;

        sqlx::migrate!("./migrations").run(&mut connection).await?;

        tracing::info!("Database {} is migrated", config.get_db_name());

        Ok(Self { connection })
    }

    pub fn connection(&mut self) -> &mut MySqlConnection {
        &mut self.connection
    }

    pub async fn close(self) -> Result<(), sqlx::Error> {
        self.connection.close().await
    }
}

use subscriber_store::config::get_configuration;
use subscriber_store::startup::Database;
use subscriber_store::subscribers::list_subscribers;
use subscriber_store::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subscriber = get_subscriber(
        String::from("subscriber_store"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber)?;

    let config = get_configuration()?;
    let mut database = Database::build(&config).await?;
    let subscribers = list_subscribers(database.connection(), false).await?;

    tracing::info!(
        "Database {} is ready with {} subscribers",
        config.get_db_name(),
        subscribers.len()
    );

    database.close().await?;

    Ok(())
}

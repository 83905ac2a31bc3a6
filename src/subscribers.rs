use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlConnection, MySqlDatabaseError, MySqlRow};
use sqlx::{Connection, Row};

use crate::domain::{
    NewSubscriber, PhoneNumber, Subscriber, SubscriberEmail, SubscriberName, SubscriberUpdate,
};
use crate::error::SubscriberError;

// ER_DUP_ENTRY
const DUPLICATE_ENTRY: u16 = 1062;

const SELECT_SUBSCRIBER: &str = r#"
    SELECT email, first_name, last_name, phone_number, is_premium, created_at
    FROM subscribers
"#;

#[tracing::instrument(
    name = "Insert a new subscriber into the database",
    skip(conn, new_subscriber),
    fields(
        subscriber_email = %new_subscriber.email,
        is_premium = new_subscriber.is_premium
    )
)]
pub async fn insert_subscriber(
    conn: &mut MySqlConnection,
    new_subscriber: &NewSubscriber,
) -> Result<Subscriber, SubscriberError> {
    let phone_number: Option<&str> = new_subscriber.phone_number.as_ref().map(AsRef::as_ref);
    let mut transaction = conn.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO subscribers (email, first_name, last_name, phone_number, is_premium)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(new_subscriber.email.as_ref())
    .bind(new_subscriber.first_name.as_ref())
    .bind(new_subscriber.last_name.as_ref())
    .bind(phone_number)
    .bind(new_subscriber.is_premium)
    .execute(&mut *transaction)
    .await
    .map_err(|err| {
        if is_duplicate_entry(&err) {
            return SubscriberError::AlreadyExists(new_subscriber.email.to_string());
        }

        tracing::error!("Failed to execute query: {:?}", err);
        SubscriberError::Database(err)
    })?;

    let subscriber = fetch_subscriber(&mut transaction, &new_subscriber.email)
        .await?
        .ok_or_else(|| SubscriberError::NotFound(new_subscriber.email.to_string()))?;

    transaction.commit().await?;

    tracing::info!("New subscriber has been saved");

    Ok(subscriber)
}

#[tracing::instrument(name = "Fetch a subscriber by email", skip(conn))]
pub async fn find_subscriber_by_email(
    conn: &mut MySqlConnection,
    email: &SubscriberEmail,
) -> Result<Option<Subscriber>, SubscriberError> {
    fetch_subscriber(conn, email).await
}

#[tracing::instrument(name = "Count subscribers by email", skip(conn))]
pub async fn count_subscribers_by_email(
    conn: &mut MySqlConnection,
    email: &SubscriberEmail,
) -> Result<i64, SubscriberError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribers WHERE email = ?")
        .bind(email.as_ref())
        .fetch_one(conn)
        .await?;

    Ok(count)
}

/// All subscribers ordered by email, or only the premium ones.
#[tracing::instrument(name = "List subscribers", skip(conn))]
pub async fn list_subscribers(
    conn: &mut MySqlConnection,
    premium_only: bool,
) -> Result<Vec<Subscriber>, SubscriberError> {
    let query = format!(
        "{} WHERE is_premium = TRUE OR ? ORDER BY email",
        SELECT_SUBSCRIBER
    );

    let rows = sqlx::query(&query)
        .bind(!premium_only)
        .fetch_all(conn)
        .await?;

    rows.iter().map(parse_subscriber).collect()
}

#[tracing::instrument(
    name = "Update a subscriber",
    skip(conn, update),
    fields(is_premium = update.is_premium)
)]
pub async fn update_subscriber(
    conn: &mut MySqlConnection,
    email: &SubscriberEmail,
    update: &SubscriberUpdate,
) -> Result<Subscriber, SubscriberError> {
    let mut transaction = conn.begin().await?;

    sqlx::query(
        r#"
        UPDATE subscribers
        SET first_name = ?, last_name = ?, is_premium = ?
        WHERE email = ?
        "#,
    )
    .bind(update.first_name.as_ref())
    .bind(update.last_name.as_ref())
    .bind(update.is_premium)
    .bind(email.as_ref())
    .execute(&mut *transaction)
    .await?;

    // MySQL reports changed rows rather than matched rows, so an update that
    // rewrites identical values looks like a miss. Read the row back instead.
    let subscriber = fetch_subscriber(&mut transaction, email)
        .await?
        .ok_or_else(|| SubscriberError::NotFound(email.to_string()))?;

    transaction.commit().await?;

    Ok(subscriber)
}

/// Returns whether a subscriber was removed.
#[tracing::instrument(name = "Delete a subscriber", skip(conn))]
pub async fn delete_subscriber(
    conn: &mut MySqlConnection,
    email: &SubscriberEmail,
) -> Result<bool, SubscriberError> {
    let deleted = sqlx::query("DELETE FROM subscribers WHERE email = ?")
        .bind(email.as_ref())
        .execute(conn)
        .await?
        .rows_affected();

    if deleted == 0 {
        tracing::info!("There was no subscriber to delete");
    }

    Ok(deleted > 0)
}

async fn fetch_subscriber(
    conn: &mut MySqlConnection,
    email: &SubscriberEmail,
) -> Result<Option<Subscriber>, SubscriberError> {
    let query = format!("{} WHERE email = ?", SELECT_SUBSCRIBER);

    let row = sqlx::query(&query)
        .bind(email.as_ref())
        .fetch_optional(conn)
        .await?;

    row.as_ref().map(parse_subscriber).transpose()
}

fn parse_subscriber(row: &MySqlRow) -> Result<Subscriber, SubscriberError> {
    let email: String = row.try_get("email")?;
    let first_name: String = row.try_get("first_name")?;
    let last_name: String = row.try_get("last_name")?;
    let phone_number: Option<String> = row.try_get("phone_number")?;
    let is_premium: bool = row.try_get("is_premium")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Subscriber {
        email: SubscriberEmail::parse(email).map_err(SubscriberError::CorruptRow)?,
        first_name: SubscriberName::parse(first_name).map_err(SubscriberError::CorruptRow)?,
        last_name: SubscriberName::parse(last_name).map_err(SubscriberError::CorruptRow)?,
        phone_number: phone_number
            .map(PhoneNumber::parse)
            .transpose()
            .map_err(SubscriberError::CorruptRow)?,
        is_premium,
        created_at,
    })
}

fn is_duplicate_entry(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_error| db_error.try_downcast_ref::<MySqlDatabaseError>())
        .map_or(false, |db_error| db_error.number() == DUPLICATE_ENTRY)
}

use subscriber_store::domain::{SubscriberEmail, SubscriberUpdate};
use subscriber_store::error::SubscriberError;
use subscriber_store::subscribers::{find_subscriber_by_email, insert_subscriber, update_subscriber};

use crate::helpers::{test_email, test_subscriber, TestDb};

fn jane_smith() -> SubscriberUpdate {
    SubscriberUpdate::parse(String::from("Jane"), String::from("Smith"), false).unwrap()
}

#[tokio::test]
async fn update_subscriber_changes_names_and_premium_status() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;
    insert_subscriber(&mut conn, &test_subscriber())
        .await
        .expect("Failed to insert subscriber.");

    update_subscriber(&mut conn, &test_email(), &jane_smith())
        .await
        .expect("Failed to update subscriber.");

    let (first_name, last_name, is_premium): (String, String, bool) = sqlx::query_as(
        "SELECT first_name, last_name, is_premium FROM subscribers WHERE email = ?",
    )
    .bind(test_email().as_ref())
    .fetch_one(&mut conn)
    .await
    .expect("Failed to fetch updated subscriber.");

    assert_eq!(first_name, "Jane", "First name was not updated");
    assert_eq!(last_name, "Smith", "Last name was not updated");
    assert!(!is_premium, "Premium status was not updated");

    test_db.teardown().await;
}

#[tokio::test]
async fn update_subscriber_keeps_the_other_columns() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;
    let created = insert_subscriber(&mut conn, &test_subscriber())
        .await
        .expect("Failed to insert subscriber.");

    let updated = update_subscriber(&mut conn, &test_email(), &jane_smith())
        .await
        .expect("Failed to update subscriber.");

    assert_eq!(updated.email, created.email);
    assert_eq!(updated.phone_number, created.phone_number);
    assert_eq!(updated.created_at, created.created_at);

    test_db.teardown().await;
}

#[tokio::test]
async fn update_subscriber_with_identical_values_succeeds() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;
    insert_subscriber(&mut conn, &test_subscriber())
        .await
        .expect("Failed to insert subscriber.");
    let same_values =
        SubscriberUpdate::parse(String::from("John"), String::from("Doe"), true).unwrap();

    let updated = update_subscriber(&mut conn, &test_email(), &same_values)
        .await
        .expect("Failed to update subscriber.");

    let stored = find_subscriber_by_email(&mut conn, &test_email())
        .await
        .unwrap()
        .expect("Subscriber not found");
    assert_eq!(updated, stored);

    test_db.teardown().await;
}

#[tokio::test]
async fn update_unknown_subscriber_is_not_found() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;
    let unknown = SubscriberEmail::parse(String::from("nobody@example.com")).unwrap();

    let result = update_subscriber(&mut conn, &unknown, &jane_smith()).await;

    assert!(
        matches!(result, Err(SubscriberError::NotFound(_))),
        "Expected a not found error, got {:?}",
        result
    );

    test_db.teardown().await;
}

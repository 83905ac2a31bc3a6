use claim::assert_none;
use subscriber_store::domain::{NewSubscriber, NewSubscriberData};
use subscriber_store::error::SubscriberError;
use subscriber_store::subscribers::{
    count_subscribers_by_email, find_subscriber_by_email, insert_subscriber,
};

use crate::helpers::{test_email, test_subscriber, TestDb, TEST_EMAIL};

#[tokio::test]
async fn create_subscriber_persists_exactly_one_row() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;

    insert_subscriber(&mut conn, &test_subscriber())
        .await
        .expect("Failed to insert subscriber.");

    let count = count_subscribers_by_email(&mut conn, &test_email())
        .await
        .expect("Failed to count subscribers.");

    assert_eq!(count, 1, "Subscriber was not created successfully");

    test_db.teardown().await;
}

#[tokio::test]
async fn create_subscriber_returns_the_stored_row() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;

    let subscriber = insert_subscriber(&mut conn, &test_subscriber())
        .await
        .expect("Failed to insert subscriber.");

    assert_eq!(subscriber.email.as_ref(), TEST_EMAIL);
    assert_eq!(subscriber.first_name.as_ref(), "John");
    assert_eq!(subscriber.last_name.as_ref(), "Doe");
    assert!(subscriber.is_premium);

    test_db.teardown().await;
}

#[tokio::test]
async fn create_subscriber_without_phone_number_stores_null() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;
    let new_subscriber = NewSubscriber::try_from(NewSubscriberData {
        email: String::from(TEST_EMAIL),
        first_name: String::from("John"),
        last_name: String::from("Doe"),
        phone_number: None,
        is_premium: false,
    })
    .unwrap();

    insert_subscriber(&mut conn, &new_subscriber)
        .await
        .expect("Failed to insert subscriber.");

    let phone_number: Option<String> =
        sqlx::query_scalar("SELECT phone_number FROM subscribers WHERE email = ?")
            .bind(TEST_EMAIL)
            .fetch_one(&mut conn)
            .await
            .expect("Failed to fetch saved subscriber.");

    assert_none!(phone_number);

    let subscriber = find_subscriber_by_email(&mut conn, &test_email())
        .await
        .unwrap()
        .expect("Subscriber not found");
    assert_none!(subscriber.phone_number);

    test_db.teardown().await;
}

#[tokio::test]
async fn create_subscriber_rejects_a_duplicate_email() {
    let test_db = TestDb::spawn().await;
    let mut conn = test_db.connect().await;

    insert_subscriber(&mut conn, &test_subscriber())
        .await
        .expect("Failed to insert subscriber.");

    let result = insert_subscriber(&mut conn, &test_subscriber()).await;

    assert!(
        matches!(result, Err(SubscriberError::AlreadyExists(ref email)) if email == TEST_EMAIL),
        "Expected a duplicate error, got {:?}",
        result
    );
    assert_eq!(
        count_subscribers_by_email(&mut conn, &test_email())
            .await
            .unwrap(),
        1
    );

    test_db.teardown().await;
}

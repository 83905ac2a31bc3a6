use chrono::{DateTime, Utc};

use crate::domain::phone_number::PhoneNumber;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_name::SubscriberName;

#[derive(Debug, Clone, PartialEq)]
pub struct Subscriber {
    pub email: SubscriberEmail,
    pub first_name: SubscriberName,
    pub last_name: SubscriberName,
    pub phone_number: Option<PhoneNumber>,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

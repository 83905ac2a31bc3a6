pub mod new_subscriber;
pub mod phone_number;
pub mod subscriber;
pub mod subscriber_email;
pub mod subscriber_name;
pub mod subscriber_update;

pub use new_subscriber::{NewSubscriber, NewSubscriberData};
pub use phone_number::PhoneNumber;
pub use subscriber::Subscriber;
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
pub use subscriber_update::SubscriberUpdate;

use crate::domain::subscriber_name::SubscriberName;

/// New values for the mutable columns of a subscriber.
#[derive(Debug, Clone)]
pub struct SubscriberUpdate {
    pub first_name: SubscriberName,
    pub last_name: SubscriberName,
    pub is_premium: bool,
}

impl SubscriberUpdate {
    pub fn parse(
        first_name: String,
        last_name: String,
        is_premium: bool,
    ) -> Result<SubscriberUpdate, String> {
        Ok(SubscriberUpdate {
            first_name: SubscriberName::parse(first_name)?,
            last_name: SubscriberName::parse(last_name)?,
            is_premium,
        })
    }
}

use crate::domain::phone_number::PhoneNumber;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_name::SubscriberName;

/// A validated subscriber ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub first_name: SubscriberName,
    pub last_name: SubscriberName,
    pub phone_number: Option<PhoneNumber>,
    pub is_premium: bool,
}

/// Raw subscriber fields, as they come from a caller.
#[derive(Debug, Clone)]
pub struct NewSubscriberData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub is_premium: bool,
}

impl TryFrom<NewSubscriberData> for NewSubscriber {
    type Error = String;

    fn try_from(data: NewSubscriberData) -> Result<Self, Self::Error> {
        let email = SubscriberEmail::parse(data.email)?;
        let first_name = SubscriberName::parse(data.first_name)?;
        let last_name = SubscriberName::parse(data.last_name)?;
        let phone_number = data.phone_number.map(PhoneNumber::parse).transpose()?;

        Ok(NewSubscriber {
            email,
            first_name,
            last_name,
            phone_number,
            is_premium: data.is_premium,
        })
    }
}

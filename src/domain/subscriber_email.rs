use validator::validate_email;

// Width of the `subscribers.email` column
const MAX_EMAIL_LENGTH: usize = 255;

/// The email identifying a subscriber row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(email: String) -> Result<SubscriberEmail, String> {
        if email.len() > MAX_EMAIL_LENGTH {
            return Err(format!(
                "email is longer than {} characters",
                MAX_EMAIL_LENGTH
            ));
        }

        if !validate_email(&email) {
            return Err(format!("{} is not a valid subscriber email", email));
        }

        Ok(Self(email))
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

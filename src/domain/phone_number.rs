const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;
const MAX_LENGTH: usize = 32;
const SEPARATORS: [char; 5] = [' ', '-', '.', '(', ')'];

/// A phone number as the subscriber wrote it, e.g. `+1234567890` or
/// `(555) 010-9999`. It is stored without normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(phone_number: String) -> Result<PhoneNumber, String> {
        let body = phone_number.strip_prefix('+').unwrap_or(&phone_number);
        let has_only_valid_chars = body
            .chars()
            .all(|char| char.is_ascii_digit() || SEPARATORS.contains(&char));
        let digits = body.chars().filter(|char| char.is_ascii_digit()).count();

        if !has_only_valid_chars
            || !(MIN_DIGITS..=MAX_DIGITS).contains(&digits)
            || phone_number.len() > MAX_LENGTH
        {
            return Err(format!("{} is not a valid phone number", phone_number));
        }

        Ok(Self(phone_number))
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

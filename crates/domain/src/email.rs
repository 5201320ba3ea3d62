use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn new(email: &str) -> Result<Self, EmailAddressError> {
        let trimmed_email = email.trim();

        if trimmed_email.is_empty() {
            return Err(EmailAddressError::Empty);
        }

        if trimmed_email.chars().any(char::is_whitespace) {
            return Err(EmailAddressError::Invalid);
        }

        let Some((local, domain)) = trimmed_email.split_once('@') else {
            return Err(EmailAddressError::Invalid);
        };

        if local.is_empty() || domain.contains('@') {
            return Err(EmailAddressError::Invalid);
        }

        if !domain.contains('.') || domain.split('.').any(str::is_empty) {
            return Err(EmailAddressError::Invalid);
        }

        Ok(EmailAddress(trimmed_email.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EmailAddressError {
    #[error("Email must not be empty")]
    Empty,
    #[error("Invalid email format")]
    Invalid,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alice@example.com", Ok(EmailAddress("alice@example.com".to_string())))]
    #[case("  bob@mail.example.org  ", Ok(EmailAddress("bob@mail.example.org".to_string())))]
    #[case("", Err(EmailAddressError::Empty))]
    #[case("   ", Err(EmailAddressError::Empty))]
    #[case("alice", Err(EmailAddressError::Invalid))]
    #[case("alice@", Err(EmailAddressError::Invalid))]
    #[case("@example.com", Err(EmailAddressError::Invalid))]
    #[case("alice@example", Err(EmailAddressError::Invalid))]
    #[case("alice@example..com", Err(EmailAddressError::Invalid))]
    #[case("alice@.com", Err(EmailAddressError::Invalid))]
    #[case("alice@exam@ple.com", Err(EmailAddressError::Invalid))]
    #[case("al ice@example.com", Err(EmailAddressError::Invalid))]
    fn test_email_address_new(
        #[case] email: &str,
        #[case] expected: Result<EmailAddress, EmailAddressError>,
    ) {
        assert_eq!(EmailAddress::new(email), expected);
    }
}

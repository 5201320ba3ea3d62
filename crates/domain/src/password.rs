use std::fmt;

use derive_more::AsRef;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(AsRef, Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(password: &str) -> Result<Self, PasswordError> {
        let len = password.chars().count();

        if len < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort(len));
        }

        Ok(Password(password.to_string()))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PasswordError {
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters ({0} < {MIN_PASSWORD_LENGTH})")]
    TooShort(usize),
}

#[derive(AsRef, Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(password: &Password) -> Result<Self, PasswordHashError> {
        Ok(PasswordHash(bcrypt::hash(
            password.as_ref(),
            bcrypt::DEFAULT_COST,
        )?))
    }

    /// Rehydrate a hash that was previously persisted. The string is trusted
    /// to be a valid bcrypt hash.
    #[must_use]
    pub fn from_string(hash: String) -> Self {
        PasswordHash(hash)
    }

    #[must_use]
    pub fn matches(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.0).unwrap_or(false)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PasswordHashError {
    #[error(transparent)]
    Hash(#[from] bcrypt::BcryptError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("secret", Ok(()))]
    #[case("longer secret", Ok(()))]
    #[case("", Err(PasswordError::TooShort(0)))]
    #[case("short", Err(PasswordError::TooShort(5)))]
    fn test_password_new(#[case] password: &str, #[case] expected: Result<(), PasswordError>) {
        assert_eq!(Password::new(password).map(|_| ()), expected);
    }

    #[test]
    fn test_password_debug_hides_content() {
        let password = Password::new("secret").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn test_password_hash_matches() {
        let password = Password::new("correct horse").unwrap();
        let hash = PasswordHash::new(&password).unwrap();
        assert!(hash.matches("correct horse"));
        assert!(!hash.matches("battery staple"));
        assert!(!hash.matches(""));
    }

    #[test]
    fn test_password_hash_from_string_rejects_garbage() {
        let hash = PasswordHash::from_string("not a bcrypt hash".to_string());
        assert!(!hash.matches("anything"));
    }
}

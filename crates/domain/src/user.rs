use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, EmailAddress, EmailAddressError, Name, NameError, PasswordError,
    PasswordHash, ReadError, StorageError, UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait UserService: Send + Sync + 'static {
    async fn get_user(&self, id: UserID) -> Result<User, ReadError>;
    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError>;
}

/// Registration, login and device-session handling.
///
/// Unknown emails and wrong passwords produce the same login error.
#[allow(async_fn_in_trait)]
pub trait AuthService: Send + Sync + 'static {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, RegistrationError>;
    async fn login(&self, email: &str, password: &str) -> Result<User, LoginError>;
    async fn logout(&self) -> Result<(), DeleteError>;
    async fn current_user(&self) -> Result<Option<User>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync + 'static {
    async fn create_user(
        &self,
        name: Name,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Result<User, CreateError>;
    async fn read_user(&self, id: UserID) -> Result<User, ReadError>;
    async fn read_user_by_email(&self, email: &EmailAddress) -> Result<User, ReadError>;
    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub name: Name,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RegistrationError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Email(#[from] EmailAddressError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Email address is already registered")]
    EmailTaken,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<CreateError> for RegistrationError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::Conflict => RegistrationError::EmailTaken,
            CreateError::Storage(storage) => RegistrationError::Storage(storage),
            CreateError::Other(other) => RegistrationError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoginError {
    #[error("Email and password must not be empty")]
    Empty,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for LoginError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Conflict => LoginError::Other("conflict".into()),
            UpdateError::Storage(storage) => LoginError::Storage(storage),
            UpdateError::Other(other) => LoginError::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_user_id_nil() {
        assert!(UserID::nil().is_nil());
        assert_eq!(UserID::nil(), UserID::default());
    }

    #[test]
    fn test_registration_error_from_create_error() {
        assert!(matches!(
            RegistrationError::from(CreateError::Conflict),
            RegistrationError::EmailTaken
        ));
        assert!(matches!(
            RegistrationError::from(CreateError::Storage(StorageError::NoConnection)),
            RegistrationError::Storage(StorageError::NoConnection)
        ));
        assert!(matches!(
            RegistrationError::from(CreateError::Other("foo".into())),
            RegistrationError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_login_error_from_update_error() {
        assert!(matches!(
            LoginError::from(UpdateError::Storage(StorageError::NoConnection)),
            LoginError::Storage(StorageError::NoConnection)
        ));
        assert!(matches!(
            LoginError::from(UpdateError::Other("foo".into())),
            LoginError::Other(error) if error.to_string() == "foo"
        ));
    }
}

use crate::{DeleteError, ReadError, UpdateError, UserID};

/// Device-local login session, the analog of a preferences store. Only the id
/// of the signed-in user is kept.
#[allow(async_fn_in_trait)]
pub trait SessionRepository: Send + Sync + 'static {
    async fn write_session(&self, user_id: UserID) -> Result<(), UpdateError>;
    async fn read_session(&self) -> Result<Option<UserID>, ReadError>;
    async fn clear_session(&self) -> Result<(), DeleteError>;
}

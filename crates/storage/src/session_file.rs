use std::fs;
use std::path::PathBuf;

use log::debug;
use uuid::Uuid;

use liftlog_domain as domain;

/// Login session persisted as a small JSON file, the analog of a preferences
/// store. A missing or unreadable file means logged out.
pub struct SessionFile {
    path: PathBuf,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct SessionRecord {
    user_id: Uuid,
}

impl SessionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl domain::SessionRepository for SessionFile {
    async fn write_session(&self, user_id: domain::UserID) -> Result<(), domain::UpdateError> {
        let record = SessionRecord { user_id: *user_id };
        let json = serde_json::to_string(&record)
            .map_err(|err| update_error(SessionFileError::Json(err)))?;
        fs::write(&self.path, json).map_err(|err| update_error(SessionFileError::Io(err)))?;
        Ok(())
    }

    async fn read_session(&self) -> Result<Option<domain::UserID>, domain::ReadError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(domain::ReadError::Storage(domain::StorageError::Other(
                    Box::new(SessionFileError::Io(err)),
                )));
            }
        };

        match serde_json::from_str::<SessionRecord>(&json) {
            Ok(record) => Ok(Some(record.user_id.into())),
            Err(err) => {
                debug!("discarding unreadable session file: {err}");
                Ok(None)
            }
        }
    }

    async fn clear_session(&self) -> Result<(), domain::DeleteError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(domain::DeleteError::Storage(domain::StorageError::Other(
                Box::new(SessionFileError::Io(err)),
            ))),
        }
    }
}

fn update_error(err: SessionFileError) -> domain::UpdateError {
    domain::UpdateError::Storage(domain::StorageError::Other(Box::new(err)))
}

#[derive(thiserror::Error, Debug)]
enum SessionFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use liftlog_domain::{SessionRepository, UserID};

    use super::*;

    fn session_file() -> SessionFile {
        SessionFile::new(
            std::env::temp_dir().join(format!("liftlog-session-{}.json", Uuid::new_v4())),
        )
    }

    #[tokio::test]
    async fn test_missing_file_means_logged_out() {
        let sessions = session_file();
        assert_eq!(sessions.read_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_read_clear_session() {
        let sessions = session_file();
        let user_id = UserID::from(1);

        sessions.write_session(user_id).await.unwrap();
        assert_eq!(sessions.read_session().await.unwrap(), Some(user_id));

        sessions.clear_session().await.unwrap();
        assert_eq!(sessions.read_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clearing_twice_is_ok() {
        let sessions = session_file();
        sessions.write_session(UserID::from(1)).await.unwrap();
        sessions.clear_session().await.unwrap();
        sessions.clear_session().await.unwrap();
    }

    #[tokio::test]
    async fn test_unreadable_file_means_logged_out() {
        let sessions = session_file();
        fs::write(&sessions.path, "not json").unwrap();
        assert_eq!(sessions.read_session().await.unwrap(), None);
        sessions.clear_session().await.unwrap();
    }
}

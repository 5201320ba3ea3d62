use liftlog_domain as domain;
use liftlog_domain::{
    ExerciseRepository, SessionRepository, UserRepository, WorkoutRepository,
};

use crate::{SQLite, SessionFile};

/// All storage of the device in one place: the SQLite database plus the
/// session file. Implements every repository trait so it can back a single
/// [`domain::Service`].
pub struct Device {
    db: SQLite,
    sessions: SessionFile,
}

impl Device {
    #[must_use]
    pub fn new(db: SQLite, sessions: SessionFile) -> Self {
        Self { db, sessions }
    }
}

impl domain::UserRepository for Device {
    async fn create_user(
        &self,
        name: domain::Name,
        email: domain::EmailAddress,
        password_hash: domain::PasswordHash,
    ) -> Result<domain::User, domain::CreateError> {
        self.db.create_user(name, email, password_hash).await
    }

    async fn read_user(&self, id: domain::UserID) -> Result<domain::User, domain::ReadError> {
        self.db.read_user(id).await
    }

    async fn read_user_by_email(
        &self,
        email: &domain::EmailAddress,
    ) -> Result<domain::User, domain::ReadError> {
        self.db.read_user_by_email(email).await
    }

    async fn delete_user(
        &self,
        id: domain::UserID,
    ) -> Result<domain::UserID, domain::DeleteError> {
        self.db.delete_user(id).await
    }
}

impl domain::ExerciseRepository for Device {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.db.read_exercises().await
    }

    async fn read_exercises_by_muscle_group(
        &self,
        muscle_group: domain::MuscleGroup,
    ) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.db.read_exercises_by_muscle_group(muscle_group).await
    }

    async fn read_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::Exercise, domain::ReadError> {
        self.db.read_exercise(id).await
    }
}

impl domain::WorkoutRepository for Device {
    async fn create_workout_session(
        &self,
        draft: domain::WorkoutDraft,
    ) -> Result<domain::WorkoutSession, domain::CreateError> {
        self.db.create_workout_session(draft).await
    }

    async fn read_workout_sessions(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        self.db.read_workout_sessions(user_id).await
    }

    async fn read_workout_exercises(
        &self,
        session_id: domain::WorkoutSessionID,
    ) -> Result<Vec<domain::WorkoutExercise>, domain::ReadError> {
        self.db.read_workout_exercises(session_id).await
    }

    async fn read_sets(
        &self,
        session_id: domain::WorkoutSessionID,
    ) -> Result<Vec<domain::ExerciseSet>, domain::ReadError> {
        self.db.read_sets(session_id).await
    }

    async fn delete_workout_session(
        &self,
        id: domain::WorkoutSessionID,
    ) -> Result<domain::WorkoutSessionID, domain::DeleteError> {
        self.db.delete_workout_session(id).await
    }
}

impl domain::SessionRepository for Device {
    async fn write_session(&self, user_id: domain::UserID) -> Result<(), domain::UpdateError> {
        self.sessions.write_session(user_id).await
    }

    async fn read_session(&self) -> Result<Option<domain::UserID>, domain::ReadError> {
        self.sessions.read_session().await
    }

    async fn clear_session(&self) -> Result<(), domain::DeleteError> {
        self.sessions.clear_session().await
    }
}

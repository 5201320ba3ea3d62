use log::{debug, error};

use crate::{
    ActiveWorkout, AuthService, CreateError, DeleteError, EmailAddress, Exercise, ExerciseID,
    ExerciseRepository, ExerciseService, ExerciseSet, FinishError, LoginError, MuscleGroup, Name,
    Password, PasswordHash, ReadError, RegistrationError, SessionRepository, UpdateError, User,
    UserID, UserRepository, UserService, WorkoutExercise, WorkoutRepository, WorkoutService,
    WorkoutSession, WorkoutSessionID,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: UserRepository> UserService for Service<R> {
    async fn get_user(&self, id: UserID) -> Result<User, ReadError> {
        log_on_error!(self.repository.read_user(id), ReadError, "get", "user")
    }

    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError> {
        log_on_error!(
            self.repository.delete_user(id),
            DeleteError,
            "delete",
            "user"
        )
    }
}

impl<R: UserRepository + SessionRepository> AuthService for Service<R> {
    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, RegistrationError> {
        let name = Name::new(name)?;
        let email = EmailAddress::new(email)?;
        let password = Password::new(password)?;

        if password.as_ref() != confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        match self.repository.read_user_by_email(&email).await {
            Ok(_) => return Err(RegistrationError::EmailTaken),
            Err(ReadError::NotFound) => {}
            Err(ReadError::Storage(err)) => return Err(RegistrationError::Storage(err)),
            Err(ReadError::Other(err)) => return Err(RegistrationError::Other(err)),
        }

        let password_hash =
            PasswordHash::new(&password).map_err(|err| RegistrationError::Other(err.into()))?;

        log_on_error!(
            self.repository.create_user(name, email, password_hash),
            CreateError,
            "register",
            "user"
        )
        .map_err(Into::into)
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, LoginError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(LoginError::Empty);
        }

        let Ok(email) = EmailAddress::new(email) else {
            return Err(LoginError::InvalidCredentials);
        };

        let user = match self.repository.read_user_by_email(&email).await {
            Ok(user) => user,
            Err(ReadError::NotFound) => return Err(LoginError::InvalidCredentials),
            Err(ReadError::Storage(err)) => {
                error!("failed to log in: {err}");
                return Err(LoginError::Storage(err));
            }
            Err(ReadError::Other(err)) => {
                error!("failed to log in: {err}");
                return Err(LoginError::Other(err));
            }
        };

        if !user.password_hash.matches(password) {
            return Err(LoginError::InvalidCredentials);
        }

        log_on_error!(
            self.repository.write_session(user.id),
            UpdateError,
            "write",
            "session"
        )?;

        Ok(user)
    }

    async fn logout(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.clear_session(),
            DeleteError,
            "clear",
            "session"
        )
    }

    async fn current_user(&self) -> Result<Option<User>, ReadError> {
        let Some(user_id) = log_on_error!(
            self.repository.read_session(),
            ReadError,
            "read",
            "session"
        )?
        else {
            return Ok(None);
        };

        match self.repository.read_user(user_id).await {
            Ok(user) => Ok(Some(user)),
            // A stale session pointing at a deleted account means logged out.
            Err(ReadError::NotFound) => Ok(None),
            Err(err) => {
                error!("failed to resolve session user: {err}");
                Err(err)
            }
        }
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn get_exercises_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises_by_muscle_group(muscle_group),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError> {
        log_on_error!(
            self.repository.read_exercise(id),
            ReadError,
            "get",
            "exercise"
        )
    }
}

impl<R: WorkoutRepository + SessionRepository> WorkoutService for Service<R> {
    async fn get_workout_history(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.read_workout_sessions(user_id),
            ReadError,
            "get",
            "workout sessions"
        )
    }

    async fn get_workout_exercises(
        &self,
        session_id: WorkoutSessionID,
    ) -> Result<Vec<WorkoutExercise>, ReadError> {
        log_on_error!(
            self.repository.read_workout_exercises(session_id),
            ReadError,
            "get",
            "workout exercises"
        )
    }

    async fn get_sets(&self, session_id: WorkoutSessionID) -> Result<Vec<ExerciseSet>, ReadError> {
        log_on_error!(
            self.repository.read_sets(session_id),
            ReadError,
            "get",
            "exercise sets"
        )
    }

    async fn finish_workout(
        &self,
        workout: ActiveWorkout,
        name: Option<Name>,
    ) -> Result<WorkoutSession, FinishError> {
        let Some(user_id) = self.repository.read_session().await? else {
            return Err(FinishError::NotLoggedIn);
        };

        let draft = workout.finish(user_id, name)?;

        Ok(log_on_error!(
            self.repository.create_workout_session(draft),
            CreateError,
            "save",
            "workout session"
        )?)
    }
}

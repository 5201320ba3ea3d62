#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;

mod active_workout;
mod email;
mod error;
mod exercise;
mod name;
mod password;
mod service;
mod session;
mod user;
mod workout;

pub use active_workout::{ActiveExercise, ActiveSet, ActiveWorkout, FinishError};
pub use email::{EmailAddress, EmailAddressError};
pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use exercise::{
    Exercise, ExerciseID, ExerciseRepository, ExerciseService, MuscleGroup, MuscleGroupError,
};
pub use name::{Name, NameError};
pub use password::{Password, PasswordError, PasswordHash, PasswordHashError};
pub use service::Service;
pub use session::SessionRepository;
pub use user::{
    AuthService, LoginError, RegistrationError, User, UserID, UserRepository, UserService,
};
pub use workout::{
    ExerciseSet, ExerciseSetID, Reps, RepsError, SetDraft, SetNumber, SetNumberError, Weight,
    WeightError, WorkoutDraft, WorkoutEntry, WorkoutExercise, WorkoutExerciseID,
    WorkoutRepository, WorkoutService, WorkoutSession, WorkoutSessionID, total_weight_lifted,
};

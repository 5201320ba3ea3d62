#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod explore;
mod format;
mod home;
mod profile;

pub use explore::ExploreState;
pub use format::{format_date, format_duration, format_weight, workout_title};
pub use home::{ExercisePreview, HomeState, LatestWorkout};
pub use profile::{ProfileState, WorkoutHistoryItem};

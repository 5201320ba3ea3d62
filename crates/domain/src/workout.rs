use std::time::Duration;

use chrono::{DateTime, Utc};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{
    ActiveWorkout, CreateError, DeleteError, ExerciseID, FinishError, Name, ReadError, UserID,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService: Send + Sync + 'static {
    async fn get_workout_history(&self, user_id: UserID)
    -> Result<Vec<WorkoutSession>, ReadError>;
    async fn get_workout_exercises(
        &self,
        session_id: WorkoutSessionID,
    ) -> Result<Vec<WorkoutExercise>, ReadError>;
    async fn get_sets(&self, session_id: WorkoutSessionID) -> Result<Vec<ExerciseSet>, ReadError>;
    async fn finish_workout(
        &self,
        workout: ActiveWorkout,
        name: Option<Name>,
    ) -> Result<WorkoutSession, FinishError>;

    async fn total_weight_lifted(&self, session_id: WorkoutSessionID) -> Result<f64, ReadError> {
        Ok(total_weight_lifted(&self.get_sets(session_id).await?))
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository: Send + Sync + 'static {
    async fn create_workout_session(
        &self,
        draft: WorkoutDraft,
    ) -> Result<WorkoutSession, CreateError>;
    async fn read_workout_sessions(
        &self,
        user_id: UserID,
    ) -> Result<Vec<WorkoutSession>, ReadError>;
    async fn read_workout_exercises(
        &self,
        session_id: WorkoutSessionID,
    ) -> Result<Vec<WorkoutExercise>, ReadError>;
    async fn read_sets(&self, session_id: WorkoutSessionID)
    -> Result<Vec<ExerciseSet>, ReadError>;
    async fn delete_workout_session(
        &self,
        id: WorkoutSessionID,
    ) -> Result<WorkoutSessionID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: WorkoutSessionID,
    pub user_id: UserID,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<Duration>,
    pub total_sets: u32,
    pub name: Option<Name>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSessionID(Uuid);

impl WorkoutSessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One exercise performed within a session, keeping its position in the
/// workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseID,
    pub session_id: WorkoutSessionID,
    pub exercise_id: ExerciseID,
    pub order_in_workout: u32,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutExerciseID(Uuid);

impl WorkoutExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub id: ExerciseSetID,
    pub workout_exercise_id: WorkoutExerciseID,
    pub number: SetNumber,
    pub reps: Reps,
    pub weight: Weight,
    pub completed: bool,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseSetID(Uuid);

impl ExerciseSetID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseSetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseSetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Finished workout ready for atomic persistence. Produced by
/// [`ActiveWorkout::finish`], never stored itself.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDraft {
    pub user_id: UserID,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: Duration,
    pub total_sets: u32,
    pub name: Option<Name>,
    pub entries: Vec<WorkoutEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub exercise_id: ExerciseID,
    pub sets: Vec<SetDraft>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetDraft {
    pub number: SetNumber,
    pub reps: Reps,
    pub weight: Weight,
    pub completed: bool,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetNumber(u32);

impl SetNumber {
    pub const ONE: SetNumber = SetNumber(1);

    pub fn new(value: u32) -> Result<Self, SetNumberError> {
        if value == 0 {
            return Err(SetNumberError::Zero);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn next(self) -> SetNumber {
        SetNumber(self.0.saturating_add(1))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetNumberError {
    #[error("Set number must be 1 or greater")]
    Zero,
}

/// Total weight lifted in kg, the sum of weight times reps over all sets.
/// Sets without reps or without weight do not count.
#[must_use]
pub fn total_weight_lifted(sets: &[ExerciseSet]) -> f64 {
    sets.iter()
        .filter(|s| u32::from(s.reps) > 0 && f32::from(s.weight) > 0.0)
        .map(|s| f64::from(f32::from(s.weight)) * f64::from(u32::from(s.reps)))
        .sum()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn set(number: u32, reps: u32, weight: f32) -> ExerciseSet {
        ExerciseSet {
            id: ExerciseSetID::from(u128::from(number)),
            workout_exercise_id: 1.into(),
            number: SetNumber::new(number).unwrap(),
            reps: Reps::new(reps).unwrap(),
            weight: Weight::new(weight).unwrap(),
            completed: true,
        }
    }

    #[test]
    fn test_workout_session_id_nil() {
        assert!(WorkoutSessionID::nil().is_nil());
        assert_eq!(WorkoutSessionID::nil(), WorkoutSessionID::default());
    }

    #[rstest]
    #[case("10", Ok(Reps(10)))]
    #[case("0", Ok(Reps(0)))]
    #[case("999", Ok(Reps(999)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("-1", Err(RepsError::ParseError))]
    #[case("ten", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case("60.0", Ok(Weight(60.0)))]
    #[case("82.5", Ok(Weight(82.5)))]
    #[case("0", Ok(Weight(0.0)))]
    #[case("1000.0", Err(WeightError::OutOfRange))]
    #[case("-0.5", Err(WeightError::OutOfRange))]
    #[case("60.05", Err(WeightError::InvalidResolution))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_try_from(#[case] value: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(value), expected);
    }

    #[test]
    fn test_set_number() {
        assert_eq!(SetNumber::new(0), Err(SetNumberError::Zero));
        assert_eq!(SetNumber::new(1), Ok(SetNumber::ONE));
        assert_eq!(SetNumber::ONE.next(), SetNumber(2));
    }

    #[test]
    fn test_total_weight_lifted() {
        let sets = [set(1, 10, 60.0), set(2, 8, 62.5), set(3, 5, 0.0), set(4, 0, 100.0)];
        assert_approx_eq!(total_weight_lifted(&sets), 1100.0);
    }

    #[test]
    fn test_total_weight_lifted_empty() {
        assert_approx_eq!(total_weight_lifted(&[]), 0.0);
    }
}

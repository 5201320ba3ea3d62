use std::fmt;

use derive_more::Deref;
use uuid::Uuid;

use crate::{Name, ReadError};

#[allow(async_fn_in_trait)]
pub trait ExerciseService: Send + Sync + 'static {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn get_exercises_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<Vec<Exercise>, ReadError>;
    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository: Send + Sync + 'static {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_exercises_by_muscle_group(
        &self,
        muscle_group: MuscleGroup,
    ) -> Result<Vec<Exercise>, ReadError>;
    async fn read_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub muscle_group: MuscleGroup,
    pub image: Option<String>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MuscleGroup {
    Abs,
    Back,
    Biceps,
    Chest,
    Legs,
    Shoulders,
    Triceps,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Abs,
        MuscleGroup::Back,
        MuscleGroup::Biceps,
        MuscleGroup::Chest,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Triceps,
    ];
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MuscleGroup::Abs => "Abs",
                MuscleGroup::Back => "Back",
                MuscleGroup::Biceps => "Biceps",
                MuscleGroup::Chest => "Chest",
                MuscleGroup::Legs => "Legs",
                MuscleGroup::Shoulders => "Shoulders",
                MuscleGroup::Triceps => "Triceps",
            }
        )
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = MuscleGroupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Abs" => Ok(MuscleGroup::Abs),
            "Back" => Ok(MuscleGroup::Back),
            "Biceps" => Ok(MuscleGroup::Biceps),
            "Chest" => Ok(MuscleGroup::Chest),
            "Legs" => Ok(MuscleGroup::Legs),
            "Shoulders" => Ok(MuscleGroup::Shoulders),
            "Triceps" => Ok(MuscleGroup::Triceps),
            _ => Err(MuscleGroupError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Unknown muscle group: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_exercise_id_nil() {
        assert!(ExerciseID::nil().is_nil());
        assert_eq!(ExerciseID::nil(), ExerciseID::default());
    }

    #[rstest]
    #[case(MuscleGroup::Abs)]
    #[case(MuscleGroup::Back)]
    #[case(MuscleGroup::Biceps)]
    #[case(MuscleGroup::Chest)]
    #[case(MuscleGroup::Legs)]
    #[case(MuscleGroup::Shoulders)]
    #[case(MuscleGroup::Triceps)]
    fn test_muscle_group_roundtrip(#[case] muscle_group: MuscleGroup) {
        assert_eq!(
            MuscleGroup::try_from(muscle_group.to_string().as_str()),
            Ok(muscle_group)
        );
    }

    #[test]
    fn test_muscle_group_unknown() {
        assert_eq!(
            MuscleGroup::try_from("Forearms"),
            Err(MuscleGroupError::Unknown("Forearms".to_string()))
        );
    }
}

use liftlog_domain::{Exercise, ExerciseService, MuscleGroup, ReadError};

/// Display state of the exercise catalog, optionally filtered by muscle
/// group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExploreState {
    pub filter: Option<MuscleGroup>,
    pub exercises: Vec<Exercise>,
}

impl ExploreState {
    pub async fn load<S: ExerciseService>(
        service: &S,
        filter: Option<MuscleGroup>,
    ) -> Result<Self, ReadError> {
        let exercises = match filter {
            Some(muscle_group) => service.get_exercises_by_muscle_group(muscle_group).await?,
            None => service.get_exercises().await?,
        };

        Ok(ExploreState { filter, exercises })
    }
}

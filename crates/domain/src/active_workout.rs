use std::time::{Duration, Instant};

use chrono::Utc;

use crate::{
    CreateError, Exercise, Name, ReadError, Reps, SetDraft, SetNumber, StorageError, UserID,
    Weight, WorkoutDraft, WorkoutEntry,
};

/// In-memory state of a running workout. Nothing is persisted until
/// [`ActiveWorkout::finish`] succeeds; dropping the value discards the
/// workout.
///
/// Elapsed time is measured with a monotonic clock and is not affected by
/// wall-clock changes while the workout is running.
#[derive(Debug, Clone)]
pub struct ActiveWorkout {
    start: Instant,
    exercises: Vec<ActiveExercise>,
}

#[derive(Debug, Clone)]
pub struct ActiveExercise {
    pub exercise: Exercise,
    pub sets: Vec<ActiveSet>,
}

/// A single set as entered by the user. Weight and reps are kept as the raw
/// input strings and only parsed when the workout is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSet {
    pub number: SetNumber,
    pub weight: String,
    pub reps: String,
    pub completed: bool,
}

impl ActiveSet {
    fn first() -> Self {
        ActiveSet {
            number: SetNumber::ONE,
            weight: String::new(),
            reps: String::new(),
            completed: false,
        }
    }

    fn is_filled_in(&self) -> bool {
        !self.weight.trim().is_empty() && !self.reps.trim().is_empty()
    }
}

impl ActiveWorkout {
    #[must_use]
    pub fn start() -> Self {
        ActiveWorkout {
            start: Instant::now(),
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn exercises(&self) -> &[ActiveExercise] {
        &self.exercises
    }

    /// Add an exercise with one empty initial set. Adding an exercise that is
    /// already part of the workout is a no-op; returns whether the exercise
    /// was added.
    pub fn add_exercise(&mut self, exercise: Exercise) -> bool {
        if self
            .exercises
            .iter()
            .any(|e| e.exercise.id == exercise.id)
        {
            return false;
        }

        self.exercises.push(ActiveExercise {
            exercise,
            sets: vec![ActiveSet::first()],
        });
        true
    }

    /// Append a set numbered one above the highest existing set number.
    /// Out-of-range indices are ignored.
    pub fn add_set(&mut self, exercise_index: usize) {
        let Some(exercise) = self.exercises.get_mut(exercise_index) else {
            return;
        };

        let next_number = exercise
            .sets
            .iter()
            .map(|s| s.number)
            .max()
            .map_or(SetNumber::ONE, SetNumber::next);

        exercise.sets.push(ActiveSet {
            number: next_number,
            weight: String::new(),
            reps: String::new(),
            completed: false,
        });
    }

    /// Out-of-range indices are ignored.
    pub fn update_set(
        &mut self,
        exercise_index: usize,
        set_index: usize,
        weight: &str,
        reps: &str,
        completed: bool,
    ) {
        let Some(set) = self
            .exercises
            .get_mut(exercise_index)
            .and_then(|e| e.sets.get_mut(set_index))
        else {
            return;
        };

        set.weight = weight.to_string();
        set.reps = reps.to_string();
        set.completed = completed;
    }

    /// Out-of-range indices are ignored.
    pub fn remove_exercise(&mut self, exercise_index: usize) {
        if exercise_index < self.exercises.len() {
            self.exercises.remove(exercise_index);
        }
    }

    /// Turn the workout into a draft for atomic persistence.
    ///
    /// Only sets with both weight and reps filled in are kept and counted;
    /// inputs that fail to parse fall back to zero. The wall-clock start time
    /// is derived from the monotonic elapsed time.
    pub fn finish(self, user_id: UserID, name: Option<Name>) -> Result<WorkoutDraft, FinishError> {
        if self.exercises.is_empty() {
            return Err(FinishError::NoExercises);
        }

        let elapsed = self.start.elapsed();

        if elapsed.is_zero() {
            return Err(FinishError::EmptyDuration);
        }

        let entries = self
            .exercises
            .into_iter()
            .map(|exercise| WorkoutEntry {
                exercise_id: exercise.exercise.id,
                sets: exercise
                    .sets
                    .into_iter()
                    .filter(ActiveSet::is_filled_in)
                    .map(|set| SetDraft {
                        number: set.number,
                        reps: Reps::try_from(set.reps.trim()).unwrap_or_default(),
                        weight: Weight::try_from(set.weight.trim()).unwrap_or_default(),
                        completed: set.completed,
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        #[allow(clippy::cast_possible_truncation)]
        let total_sets = entries.iter().map(|e| e.sets.len()).sum::<usize>() as u32;

        let end_time = Utc::now();

        Ok(WorkoutDraft {
            user_id,
            start_time: end_time - elapsed,
            end_time,
            duration: elapsed,
            total_sets,
            name,
            entries,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FinishError {
    #[error("Not signed in")]
    NotLoggedIn,
    #[error("No exercises to save")]
    NoExercises,
    #[error("Invalid workout duration")]
    EmptyDuration,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<CreateError> for FinishError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::Conflict => FinishError::Other("conflict".into()),
            CreateError::Storage(storage) => FinishError::Storage(storage),
            CreateError::Other(other) => FinishError::Other(other),
        }
    }
}

impl From<ReadError> for FinishError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => FinishError::NotLoggedIn,
            ReadError::Storage(storage) => FinishError::Storage(storage),
            ReadError::Other(other) => FinishError::Other(other),
        }
    }
}

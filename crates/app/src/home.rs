use liftlog_domain::{
    AuthService, ExerciseService, ReadError, WorkoutService, WorkoutSession, WorkoutSessionID,
};

use crate::format::{format_date, format_duration, workout_title};

/// Display state of the home screen: who is signed in and a summary of the
/// most recent workout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeState {
    pub is_logged_in: bool,
    pub user_name: Option<String>,
    pub latest_workout: Option<LatestWorkout>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestWorkout {
    pub session_id: WorkoutSessionID,
    pub title: String,
    pub date: String,
    pub duration: String,
    pub total_sets: u32,
    pub exercises: Vec<ExercisePreview>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExercisePreview {
    pub name: String,
    pub sets_done: u32,
    pub image: Option<String>,
}

impl HomeState {
    pub async fn load<S>(service: &S) -> Result<Self, ReadError>
    where
        S: AuthService + WorkoutService + ExerciseService,
    {
        let Some(user) = service.current_user().await? else {
            return Ok(HomeState::default());
        };

        let history = service.get_workout_history(user.id).await?;
        let latest_workout = match history.first() {
            Some(session) => Some(latest_workout(service, session).await?),
            None => None,
        };

        Ok(HomeState {
            is_logged_in: true,
            user_name: Some(user.name.to_string()),
            latest_workout,
        })
    }
}

async fn latest_workout<S>(
    service: &S,
    session: &WorkoutSession,
) -> Result<LatestWorkout, ReadError>
where
    S: WorkoutService + ExerciseService,
{
    let workout_exercises = service.get_workout_exercises(session.id).await?;
    let sets = service.get_sets(session.id).await?;

    let mut exercises = Vec::with_capacity(workout_exercises.len());
    for workout_exercise in workout_exercises {
        let exercise = service.get_exercise(workout_exercise.exercise_id).await?;
        #[allow(clippy::cast_possible_truncation)]
        let sets_done = sets
            .iter()
            .filter(|s| s.workout_exercise_id == workout_exercise.id)
            .count() as u32;
        exercises.push(ExercisePreview {
            name: exercise.name.to_string(),
            sets_done,
            image: exercise.image,
        });
    }

    Ok(LatestWorkout {
        session_id: session.id,
        title: workout_title(session.name.as_ref(), session.start_time),
        date: format_date(session.start_time),
        duration: format_duration(session.duration),
        total_sets: session.total_sets,
        exercises,
    })
}

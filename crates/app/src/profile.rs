use log::error;

use liftlog_domain::{AuthService, ReadError, WorkoutService, WorkoutSessionID};

use crate::format::{format_date, format_duration, format_weight, workout_title};

/// Display state of the profile screen: the workout history with aggregate
/// statistics per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    pub is_logged_in: bool,
    pub user_name: Option<String>,
    pub total_workouts: usize,
    pub history: Vec<WorkoutHistoryItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutHistoryItem {
    pub session_id: WorkoutSessionID,
    pub title: String,
    pub date: String,
    pub duration: String,
    pub total_sets: u32,
    pub total_weight: String,
}

impl ProfileState {
    pub async fn load<S>(service: &S) -> Result<Self, ReadError>
    where
        S: AuthService + WorkoutService,
    {
        let Some(user) = service.current_user().await? else {
            return Ok(ProfileState::default());
        };

        let sessions = service.get_workout_history(user.id).await?;

        let mut history = Vec::with_capacity(sessions.len());
        for session in &sessions {
            // A failed aggregate renders as "- kg" instead of an error.
            let total_weight = match service.total_weight_lifted(session.id).await {
                Ok(weight) => weight,
                Err(err) => {
                    error!("failed to calculate total weight for workout session: {err}");
                    0.0
                }
            };

            history.push(WorkoutHistoryItem {
                session_id: session.id,
                title: workout_title(session.name.as_ref(), session.start_time),
                date: format_date(session.start_time),
                duration: format_duration(session.duration),
                total_sets: session.total_sets,
                total_weight: format_weight(total_weight),
            });
        }

        Ok(ProfileState {
            is_logged_in: true,
            user_name: Some(user.name.to_string()),
            total_workouts: history.len(),
            history,
        })
    }
}

use std::time::Duration;

use pretty_assertions::assert_eq;

use liftlog_app::{ExploreState, HomeState, ProfileState};
use liftlog_domain::{
    ActiveWorkout, AuthService, FinishError, LoginError, MuscleGroup, Name, RegistrationError,
    Service, WorkoutService,
};
use liftlog_storage::{Device, SQLite, SessionFile};

fn new_service() -> Service<Device> {
    let db = SQLite::open_in_memory().unwrap();
    let sessions = SessionFile::new(
        std::env::temp_dir().join(format!("liftlog-workflow-{}.json", uuid::Uuid::new_v4())),
    );
    Service::new(Device::new(db, sessions))
}

#[tokio::test]
async fn test_register_validation() {
    let service = new_service();

    assert!(matches!(
        service.register("", "alice@example.com", "secret1", "secret1").await,
        Err(RegistrationError::Name(_))
    ));
    assert!(matches!(
        service.register("Alice", "not an email", "secret1", "secret1").await,
        Err(RegistrationError::Email(_))
    ));
    assert!(matches!(
        service.register("Alice", "alice@example.com", "short", "short").await,
        Err(RegistrationError::Password(_))
    ));
    assert!(matches!(
        service.register("Alice", "alice@example.com", "secret1", "secret2").await,
        Err(RegistrationError::PasswordMismatch)
    ));

    service
        .register("Alice", "alice@example.com", "secret1", "secret1")
        .await
        .unwrap();
    assert!(matches!(
        service.register("Alice II", "alice@example.com", "secret1", "secret1").await,
        Err(RegistrationError::EmailTaken)
    ));
}

#[tokio::test]
async fn test_login_and_logout() {
    let service = new_service();
    let user = service
        .register("Alice", "alice@example.com", "secret1", "secret1")
        .await
        .unwrap();

    // Registration does not sign the user in.
    assert!(service.current_user().await.unwrap().is_none());

    assert!(matches!(
        service.login("", "").await,
        Err(LoginError::Empty)
    ));
    assert!(matches!(
        service.login("alice@example.com", "wrong password").await,
        Err(LoginError::InvalidCredentials)
    ));
    assert!(matches!(
        service.login("bob@example.com", "secret1").await,
        Err(LoginError::InvalidCredentials)
    ));

    let logged_in = service.login("alice@example.com", "secret1").await.unwrap();
    assert_eq!(logged_in.id, user.id);
    assert_eq!(
        service.current_user().await.unwrap().map(|u| u.id),
        Some(user.id)
    );

    service.logout().await.unwrap();
    assert!(service.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_finish_workout_requires_login_and_exercises() {
    let service = new_service();
    service
        .register("Alice", "alice@example.com", "secret1", "secret1")
        .await
        .unwrap();

    let mut workout = ActiveWorkout::start();
    let explore = ExploreState::load(&service, None).await.unwrap();
    workout.add_exercise(explore.exercises[0].clone());
    assert!(matches!(
        service.finish_workout(workout, None).await,
        Err(FinishError::NotLoggedIn)
    ));

    service.login("alice@example.com", "secret1").await.unwrap();
    assert!(matches!(
        service.finish_workout(ActiveWorkout::start(), None).await,
        Err(FinishError::NoExercises)
    ));
}

#[tokio::test]
async fn test_track_workout_and_review_history() {
    let service = new_service();
    service
        .register("Alice", "alice@example.com", "secret1", "secret1")
        .await
        .unwrap();
    service.login("alice@example.com", "secret1").await.unwrap();

    let explore = ExploreState::load(&service, None).await.unwrap();
    assert_eq!(explore.exercises.len(), 16);
    let legs = ExploreState::load(&service, Some(MuscleGroup::Legs)).await.unwrap();
    assert!(!legs.exercises.is_empty());
    assert!(legs.exercises.iter().all(|e| e.muscle_group == MuscleGroup::Legs));

    let bench = explore
        .exercises
        .iter()
        .find(|e| e.name == Name::new("Bench Press").unwrap())
        .unwrap()
        .clone();
    let squat = explore
        .exercises
        .iter()
        .find(|e| e.name == Name::new("Squat").unwrap())
        .unwrap()
        .clone();

    let mut workout = ActiveWorkout::start();
    workout.add_exercise(bench);
    workout.add_set(0);
    workout.update_set(0, 0, "60", "10", true);
    workout.update_set(0, 1, "62.5", "8", true);
    workout.add_exercise(squat);
    workout.update_set(1, 0, "100", "5", true);
    std::thread::sleep(Duration::from_millis(10));

    let session = service
        .finish_workout(workout, Name::new("Push Day").ok())
        .await
        .unwrap();
    assert_eq!(session.total_sets, 3);

    let profile = ProfileState::load(&service).await.unwrap();
    assert!(profile.is_logged_in);
    assert_eq!(profile.user_name.as_deref(), Some("Alice"));
    assert_eq!(profile.total_workouts, 1);
    assert_eq!(profile.history.len(), 1);
    assert_eq!(profile.history[0].title, "Push Day");
    assert_eq!(profile.history[0].total_sets, 3);
    assert_eq!(profile.history[0].total_weight, "1600.0 kg");

    let home = HomeState::load(&service).await.unwrap();
    assert!(home.is_logged_in);
    assert_eq!(home.user_name.as_deref(), Some("Alice"));
    let latest = home.latest_workout.unwrap();
    assert_eq!(latest.title, "Push Day");
    assert_eq!(latest.total_sets, 3);
    assert_eq!(
        latest
            .exercises
            .iter()
            .map(|e| (e.name.as_str(), e.sets_done))
            .collect::<Vec<_>>(),
        vec![("Bench Press", 2), ("Squat", 1)]
    );

    service.logout().await.unwrap();
    let home = HomeState::load(&service).await.unwrap();
    assert_eq!(home, HomeState::default());
    let profile = ProfileState::load(&service).await.unwrap();
    assert_eq!(profile, ProfileState::default());
}

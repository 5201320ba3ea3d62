use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{Connection, DatabaseName, OptionalExtension, params};
use uuid::Uuid;

use liftlog_domain as domain;

const CURRENT_SCHEMA_VERSION: i64 = 1;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: [Migration; 1] = [Migration {
    version: 1,
    name: "baseline_schema_v1",
    sql: r"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    password_hash TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);

CREATE TABLE IF NOT EXISTS exercises (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    muscle_group TEXT NOT NULL,
    image TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_exercises_name ON exercises(name);

CREATE TABLE IF NOT EXISTS workout_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    start_time INTEGER NOT NULL,
    end_time INTEGER,
    duration_millis INTEGER,
    total_sets INTEGER NOT NULL DEFAULT 0,
    name TEXT
);

CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_id ON workout_sessions(user_id);

CREATE TABLE IF NOT EXISTS workout_exercises (
    id TEXT PRIMARY KEY,
    session_id TEXT NOT NULL REFERENCES workout_sessions(id) ON DELETE CASCADE,
    exercise_id TEXT NOT NULL REFERENCES exercises(id) ON DELETE RESTRICT,
    order_in_workout INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_workout_exercises_session_id ON workout_exercises(session_id);
CREATE INDEX IF NOT EXISTS idx_workout_exercises_exercise_id ON workout_exercises(exercise_id);

CREATE TABLE IF NOT EXISTS exercise_sets (
    id TEXT PRIMARY KEY,
    workout_exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
    set_number INTEGER NOT NULL,
    reps INTEGER NOT NULL,
    weight REAL NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_exercise_sets_workout_exercise_id
    ON exercise_sets(workout_exercise_id);
",
}];

/// Embedded SQLite database holding users, the exercise catalog and the
/// workout history. The exercise catalog is seeded on creation.
pub struct SQLite {
    conn: Mutex<Connection>,
}

impl SQLite {
    pub fn open<P: AsRef<Path>>(path: P) -> rusqlite::Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> rusqlite::Result<Self> {
        configure_connection(&conn)?;
        apply_migrations(&mut conn)?;
        seed_exercises(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, domain::StorageError> {
        self.conn
            .lock()
            .map_err(|_| domain::StorageError::NoConnection)
    }
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None::<DatabaseName>, "journal_mode", "WAL")?;
    conn.pragma_update(None::<DatabaseName>, "synchronous", "NORMAL")?;
    conn.pragma_update(None::<DatabaseName>, "foreign_keys", "ON")?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    Ok(())
}

fn apply_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        r"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s','now') AS INTEGER))
);
",
    )?;

    for migration in MIGRATIONS {
        let already_applied: Option<i64> = tx
            .query_row(
                "SELECT version FROM schema_migrations WHERE version = ?1",
                params![migration.version],
                |row| row.get(0),
            )
            .optional()?;

        if already_applied.is_some() {
            continue;
        }

        info!("applying migration {}: {}", migration.version, migration.name);
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
            params![migration.version, migration.name],
        )?;
    }

    tx.commit()
}

fn seed_exercises(conn: &Connection) -> rusqlite::Result<()> {
    for exercise in domain::catalog::EXERCISES {
        conn.execute(
            "INSERT OR IGNORE INTO exercises (id, name, muscle_group, image)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                Uuid::new_v4().to_string(),
                exercise.name,
                exercise.muscle_group.to_string(),
                exercise.image,
            ],
        )?;
    }
    Ok(())
}

fn storage_error(err: rusqlite::Error) -> domain::StorageError {
    domain::StorageError::Other(Box::new(err))
}

fn read_error(err: rusqlite::Error) -> domain::ReadError {
    domain::ReadError::Storage(storage_error(err))
}

fn create_error(err: rusqlite::Error) -> domain::CreateError {
    if err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
        domain::CreateError::Conflict
    } else {
        domain::CreateError::Storage(storage_error(err))
    }
}

fn delete_error(err: rusqlite::Error) -> domain::DeleteError {
    domain::DeleteError::Storage(storage_error(err))
}

impl domain::UserRepository for SQLite {
    async fn create_user(
        &self,
        name: domain::Name,
        email: domain::EmailAddress,
        password_hash: domain::PasswordHash,
    ) -> Result<domain::User, domain::CreateError> {
        let conn = self.conn()?;
        let id = Uuid::new_v4();

        conn.execute(
            "INSERT INTO users (id, name, email, password_hash) VALUES (?1, ?2, ?3, ?4)",
            params![
                id.to_string(),
                name.as_ref(),
                email.as_ref(),
                password_hash.as_ref(),
            ],
        )
        .map_err(create_error)?;

        Ok(domain::User {
            id: id.into(),
            name,
            email,
            password_hash,
        })
    }

    async fn read_user(&self, id: domain::UserID) -> Result<domain::User, domain::ReadError> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                "SELECT id, name, email, password_hash FROM users WHERE id = ?1",
                params![id.to_string()],
                UserRecord::from_row,
            )
            .optional()
            .map_err(read_error)?
            .ok_or(domain::ReadError::NotFound)?;
        domain::User::try_from(record).map_err(domain::ReadError::Other)
    }

    async fn read_user_by_email(
        &self,
        email: &domain::EmailAddress,
    ) -> Result<domain::User, domain::ReadError> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                "SELECT id, name, email, password_hash FROM users WHERE email = ?1",
                params![email.as_ref()],
                UserRecord::from_row,
            )
            .optional()
            .map_err(read_error)?
            .ok_or(domain::ReadError::NotFound)?;
        domain::User::try_from(record).map_err(domain::ReadError::Other)
    }

    async fn delete_user(
        &self,
        id: domain::UserID,
    ) -> Result<domain::UserID, domain::DeleteError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])
            .map_err(delete_error)?;
        Ok(id)
    }
}

impl domain::ExerciseRepository for SQLite {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, name, muscle_group, image FROM exercises ORDER BY name ASC")
            .map_err(read_error)?;
        let records = stmt
            .query_map([], ExerciseRecord::from_row)
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        records
            .into_iter()
            .map(|r| domain::Exercise::try_from(r).map_err(domain::ReadError::Other))
            .collect()
    }

    async fn read_exercises_by_muscle_group(
        &self,
        muscle_group: domain::MuscleGroup,
    ) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, muscle_group, image FROM exercises
                 WHERE muscle_group = ?1 ORDER BY name ASC",
            )
            .map_err(read_error)?;
        let records = stmt
            .query_map(params![muscle_group.to_string()], ExerciseRecord::from_row)
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        records
            .into_iter()
            .map(|r| domain::Exercise::try_from(r).map_err(domain::ReadError::Other))
            .collect()
    }

    async fn read_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::Exercise, domain::ReadError> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                "SELECT id, name, muscle_group, image FROM exercises WHERE id = ?1",
                params![id.to_string()],
                ExerciseRecord::from_row,
            )
            .optional()
            .map_err(read_error)?
            .ok_or(domain::ReadError::NotFound)?;
        domain::Exercise::try_from(record).map_err(domain::ReadError::Other)
    }
}

impl domain::WorkoutRepository for SQLite {
    /// The session and all of its exercises and sets are inserted in one
    /// transaction.
    async fn create_workout_session(
        &self,
        draft: domain::WorkoutDraft,
    ) -> Result<domain::WorkoutSession, domain::CreateError> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|err| domain::CreateError::Storage(storage_error(err)))?;

        let session_id = Uuid::new_v4();
        let duration_millis = i64::try_from(draft.duration.as_millis())
            .map_err(|err| domain::CreateError::Other(Box::new(err)))?;

        tx.execute(
            "INSERT INTO workout_sessions
                 (id, user_id, start_time, end_time, duration_millis, total_sets, name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session_id.to_string(),
                draft.user_id.to_string(),
                draft.start_time.timestamp_millis(),
                draft.end_time.timestamp_millis(),
                duration_millis,
                draft.total_sets,
                draft.name.as_ref().map(ToString::to_string),
            ],
        )
        .map_err(create_error)?;

        for (index, entry) in draft.entries.iter().enumerate() {
            let workout_exercise_id = Uuid::new_v4();
            let order = u32::try_from(index)
                .map_err(|err| domain::CreateError::Other(Box::new(err)))?;

            tx.execute(
                "INSERT INTO workout_exercises (id, session_id, exercise_id, order_in_workout)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    workout_exercise_id.to_string(),
                    session_id.to_string(),
                    entry.exercise_id.to_string(),
                    order,
                ],
            )
            .map_err(create_error)?;

            for set in &entry.sets {
                tx.execute(
                    "INSERT INTO exercise_sets
                         (id, workout_exercise_id, set_number, reps, weight, completed)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        Uuid::new_v4().to_string(),
                        workout_exercise_id.to_string(),
                        u32::from(set.number),
                        u32::from(set.reps),
                        f64::from(f32::from(set.weight)),
                        set.completed,
                    ],
                )
                .map_err(create_error)?;
            }
        }

        tx.commit()
            .map_err(|err| domain::CreateError::Storage(storage_error(err)))?;

        Ok(domain::WorkoutSession {
            id: session_id.into(),
            user_id: draft.user_id,
            start_time: draft.start_time,
            end_time: Some(draft.end_time),
            duration: Some(draft.duration),
            total_sets: draft.total_sets,
            name: draft.name,
        })
    }

    async fn read_workout_sessions(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, start_time, end_time, duration_millis, total_sets, name
                 FROM workout_sessions WHERE user_id = ?1 ORDER BY start_time DESC",
            )
            .map_err(read_error)?;
        let records = stmt
            .query_map(params![user_id.to_string()], WorkoutSessionRecord::from_row)
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        records
            .into_iter()
            .map(|r| domain::WorkoutSession::try_from(r).map_err(domain::ReadError::Other))
            .collect()
    }

    async fn read_workout_exercises(
        &self,
        session_id: domain::WorkoutSessionID,
    ) -> Result<Vec<domain::WorkoutExercise>, domain::ReadError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, session_id, exercise_id, order_in_workout
                 FROM workout_exercises WHERE session_id = ?1 ORDER BY order_in_workout ASC",
            )
            .map_err(read_error)?;
        let records = stmt
            .query_map(
                params![session_id.to_string()],
                WorkoutExerciseRecord::from_row,
            )
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        records
            .into_iter()
            .map(|r| domain::WorkoutExercise::try_from(r).map_err(domain::ReadError::Other))
            .collect()
    }

    async fn read_sets(
        &self,
        session_id: domain::WorkoutSessionID,
    ) -> Result<Vec<domain::ExerciseSet>, domain::ReadError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT es.id, es.workout_exercise_id, es.set_number, es.reps, es.weight,
                        es.completed
                 FROM exercise_sets es
                 INNER JOIN workout_exercises we ON es.workout_exercise_id = we.id
                 WHERE we.session_id = ?1
                 ORDER BY we.order_in_workout ASC, es.set_number ASC",
            )
            .map_err(read_error)?;
        let records = stmt
            .query_map(params![session_id.to_string()], ExerciseSetRecord::from_row)
            .map_err(read_error)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(read_error)?;
        records
            .into_iter()
            .map(|r| domain::ExerciseSet::try_from(r).map_err(domain::ReadError::Other))
            .collect()
    }

    async fn delete_workout_session(
        &self,
        id: domain::WorkoutSessionID,
    ) -> Result<domain::WorkoutSessionID, domain::DeleteError> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM workout_sessions WHERE id = ?1",
            params![id.to_string()],
        )
        .map_err(delete_error)?;
        Ok(id)
    }
}

struct UserRecord {
    id: String,
    name: String,
    email: String,
    password_hash: String,
}

impl UserRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(UserRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password_hash: row.get(3)?,
        })
    }
}

impl TryFrom<UserRecord> for domain::User {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        Ok(domain::User {
            id: Uuid::parse_str(&value.id)?.into(),
            name: domain::Name::new(&value.name)?,
            email: domain::EmailAddress::new(&value.email)?,
            password_hash: domain::PasswordHash::from_string(value.password_hash),
        })
    }
}

struct ExerciseRecord {
    id: String,
    name: String,
    muscle_group: String,
    image: Option<String>,
}

impl ExerciseRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(ExerciseRecord {
            id: row.get(0)?,
            name: row.get(1)?,
            muscle_group: row.get(2)?,
            image: row.get(3)?,
        })
    }
}

impl TryFrom<ExerciseRecord> for domain::Exercise {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: ExerciseRecord) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: Uuid::parse_str(&value.id)?.into(),
            name: domain::Name::new(&value.name)?,
            muscle_group: domain::MuscleGroup::try_from(value.muscle_group.as_str())?,
            image: value.image,
        })
    }
}

struct WorkoutSessionRecord {
    id: String,
    user_id: String,
    start_time: i64,
    end_time: Option<i64>,
    duration_millis: Option<i64>,
    total_sets: i64,
    name: Option<String>,
}

impl WorkoutSessionRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(WorkoutSessionRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            start_time: row.get(2)?,
            end_time: row.get(3)?,
            duration_millis: row.get(4)?,
            total_sets: row.get(5)?,
            name: row.get(6)?,
        })
    }
}

impl TryFrom<WorkoutSessionRecord> for domain::WorkoutSession {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: WorkoutSessionRecord) -> Result<Self, Self::Error> {
        Ok(domain::WorkoutSession {
            id: Uuid::parse_str(&value.id)?.into(),
            user_id: Uuid::parse_str(&value.user_id)?.into(),
            start_time: timestamp(value.start_time)?,
            end_time: value.end_time.map(timestamp).transpose()?,
            duration: value
                .duration_millis
                .map(|millis| {
                    u64::try_from(millis).map(std::time::Duration::from_millis)
                })
                .transpose()?,
            total_sets: u32::try_from(value.total_sets)?,
            name: value.name.as_deref().map(domain::Name::new).transpose()?,
        })
    }
}

struct WorkoutExerciseRecord {
    id: String,
    session_id: String,
    exercise_id: String,
    order_in_workout: i64,
}

impl WorkoutExerciseRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(WorkoutExerciseRecord {
            id: row.get(0)?,
            session_id: row.get(1)?,
            exercise_id: row.get(2)?,
            order_in_workout: row.get(3)?,
        })
    }
}

impl TryFrom<WorkoutExerciseRecord> for domain::WorkoutExercise {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: WorkoutExerciseRecord) -> Result<Self, Self::Error> {
        Ok(domain::WorkoutExercise {
            id: Uuid::parse_str(&value.id)?.into(),
            session_id: Uuid::parse_str(&value.session_id)?.into(),
            exercise_id: Uuid::parse_str(&value.exercise_id)?.into(),
            order_in_workout: u32::try_from(value.order_in_workout)?,
        })
    }
}

struct ExerciseSetRecord {
    id: String,
    workout_exercise_id: String,
    set_number: i64,
    reps: i64,
    weight: f64,
    completed: bool,
}

impl ExerciseSetRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(ExerciseSetRecord {
            id: row.get(0)?,
            workout_exercise_id: row.get(1)?,
            set_number: row.get(2)?,
            reps: row.get(3)?,
            weight: row.get(4)?,
            completed: row.get(5)?,
        })
    }
}

impl TryFrom<ExerciseSetRecord> for domain::ExerciseSet {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: ExerciseSetRecord) -> Result<Self, Self::Error> {
        #[allow(clippy::cast_possible_truncation)]
        let weight = value.weight as f32;
        Ok(domain::ExerciseSet {
            id: Uuid::parse_str(&value.id)?.into(),
            workout_exercise_id: Uuid::parse_str(&value.workout_exercise_id)?.into(),
            number: domain::SetNumber::new(u32::try_from(value.set_number)?)?,
            reps: domain::Reps::new(u32::try_from(value.reps)?)?,
            weight: domain::Weight::new(weight)?,
            completed: value.completed,
        })
    }
}

fn timestamp(millis: i64) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| format!("timestamp out of range: {millis}").into())
}

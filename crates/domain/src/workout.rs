use chrono::NaiveDate;
use derive_more::{Deref, Display};

use crate::{CreateError, DeleteError, ExerciseLogEntry, ReadError, Token, UpdateError};

#[allow(async_fn_in_trait)]
pub trait WorkoutSessionService {
    async fn get_workout_sessions(
        &self,
        token: &Token,
        limit: usize,
    ) -> Result<Vec<WorkoutSession>, ReadError>;
    async fn create_workout_session(
        &self,
        token: &Token,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError>;
    async fn replace_workout_session(
        &self,
        token: &Token,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, UpdateError>;
    async fn delete_workout_session(
        &self,
        token: &Token,
        id: WorkoutID,
    ) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutSessionRepository {
    async fn read_workout_sessions(
        &self,
        token: &Token,
        limit: usize,
    ) -> Result<Vec<WorkoutSession>, ReadError>;
    async fn create_workout_session(
        &self,
        token: &Token,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError>;
    async fn replace_workout_session(
        &self,
        token: &Token,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, UpdateError>;
    async fn delete_workout_session(
        &self,
        token: &Token,
        id: WorkoutID,
    ) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: Option<WorkoutID>,
    pub user_id: String,
    pub session_date: NaiveDate,
    pub exercises: Vec<ExerciseLogEntry>,
}

impl WorkoutSession {
    #[must_use]
    pub fn set_count(&self) -> u32 {
        self.exercises.iter().map(|e| *e.sets).sum()
    }
}

#[derive(Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for WorkoutID {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

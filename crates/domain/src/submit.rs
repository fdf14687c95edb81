//! Submission of workout sessions.
//!
//! After every successful mutation the list shown to the user is fetched again from the API
//! instead of merging the local change into it.

use chrono::NaiveDate;
use log::debug;

use crate::{
    Auth, CreateError, DeleteError, ExerciseLogEntry, LogComposer, NameError, ReadError,
    TaxonomyCache, Token, UpdateError, WorkoutID, WorkoutSession, WorkoutSessionService,
    normalize_session_entries,
};

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("Please select a date and add at least one exercise.")]
    Incomplete,
    #[error("You must be logged in to {0}.")]
    NotLoggedIn(&'static str),
    #[error("Plan name: {0}")]
    InvalidName(#[from] NameError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Update(#[from] UpdateError),
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Authoritative list of items as last fetched from the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> Listing<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replaces the items on success. A failure keeps the previous items.
    pub fn finish(&mut self, result: Result<Vec<T>, ReadError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// The last `n` items.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[T] {
        &self.items[self.items.len().saturating_sub(n)..]
    }
}

pub async fn refresh_workout_sessions<S: WorkoutSessionService>(
    service: &S,
    token: &Token,
    sessions: &mut Listing<WorkoutSession>,
    limit: usize,
) {
    sessions.start();
    sessions.finish(service.get_workout_sessions(token, limit).await);
}

/// Form for creating a new workout session or replacing an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionForm {
    pub session_date: Option<NaiveDate>,
    pub composer: LogComposer<ExerciseLogEntry>,
    default_date: Option<NaiveDate>,
    editing: Option<WorkoutID>,
    error: Option<String>,
    message: Option<String>,
}

impl SessionForm {
    #[must_use]
    pub fn new(default_date: Option<NaiveDate>) -> Self {
        Self {
            session_date: default_date,
            composer: LogComposer::new(),
            default_date,
            editing: None,
            error: None,
            message: None,
        }
    }

    /// Loads a fetched session for replacement.
    ///
    /// Entries referencing exercises by name are resolved against the catalog.
    pub fn edit(&mut self, session: WorkoutSession, cache: &TaxonomyCache) {
        self.session_date = Some(session.session_date);
        self.composer
            .load(normalize_session_entries(session.exercises, cache));
        self.editing = session.id;
        self.error = None;
        self.message = None;
    }

    #[must_use]
    pub fn editing(&self) -> Option<&WorkoutID> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cancel(&mut self) {
        self.reset();
        self.error = None;
        self.message = None;
    }

    /// Creates or replaces the session and refreshes the list of recent sessions.
    ///
    /// Nothing is sent if the form is incomplete or the user is not logged in. On failure the
    /// form is kept unchanged.
    pub async fn submit<S: WorkoutSessionService>(
        &mut self,
        service: &S,
        auth: &Auth,
        sessions: &mut Listing<WorkoutSession>,
        limit: usize,
    ) -> Result<(), SubmitError> {
        self.error = None;
        self.message = None;

        let result = self.send(service, auth).await;

        match result {
            Ok(token) => {
                self.message = Some(if self.editing.is_some() {
                    "Workout session updated successfully!".to_string()
                } else {
                    "Workout session created successfully!".to_string()
                });
                self.reset();
                refresh_workout_sessions(service, token, sessions, limit).await;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn send<'a, S: WorkoutSessionService>(
        &self,
        service: &S,
        auth: &'a Auth,
    ) -> Result<&'a Token, SubmitError> {
        let Some(session_date) = self.session_date else {
            return Err(SubmitError::Incomplete);
        };
        if self.composer.is_empty() {
            return Err(SubmitError::Incomplete);
        }
        let (user, token) = auth
            .require()
            .map_err(|_| SubmitError::NotLoggedIn("create a workout session"))?;

        let session = WorkoutSession {
            id: self.editing.clone(),
            user_id: user.user_id().to_string(),
            session_date,
            exercises: self.composer.entries().to_vec(),
        };

        if self.editing.is_some() {
            service.replace_workout_session(token, session).await?;
        } else {
            service.create_workout_session(token, session).await?;
        }

        Ok(token)
    }

    /// Deletes a session and refreshes the list of recent sessions.
    pub async fn delete<S: WorkoutSessionService>(
        &mut self,
        service: &S,
        auth: &Auth,
        id: WorkoutID,
        sessions: &mut Listing<WorkoutSession>,
        limit: usize,
    ) -> Result<(), SubmitError> {
        self.error = None;
        self.message = None;

        let Ok((_, token)) = auth.require() else {
            let err = SubmitError::NotLoggedIn("delete a workout session");
            self.error = Some(err.to_string());
            return Err(err);
        };

        if let Err(err) = service.delete_workout_session(token, id.clone()).await {
            let err = SubmitError::from(err);
            self.error = Some(err.to_string());
            return Err(err);
        }

        if self.editing.as_ref() == Some(&id) {
            debug!("deleted workout session that was being edited");
            self.reset();
        }
        refresh_workout_sessions(service, token, sessions, limit).await;
        Ok(())
    }

    fn reset(&mut self) {
        self.session_date = self.default_date;
        self.composer.reset();
        self.editing = None;
    }
}

use log::{debug, error, warn};

use crate::{
    Auth, CreateError, Credentials, DeleteError, Exercise, ExerciseRepository, ExerciseService,
    MajorMuscleGroup, MuscleGroup, ReadError, SessionRepository, SessionService, Token,
    TokenRepository, UpdateError, User, WorkoutID, WorkoutPlan, WorkoutPlanID,
    WorkoutPlanRepository, WorkoutPlanService, WorkoutSession, WorkoutSessionRepository,
    WorkoutSessionService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: SessionRepository + TokenRepository> SessionService for Service<R> {
    async fn register(&self, credentials: Credentials) -> Result<User, CreateError> {
        log_on_error!(
            self.repository.register(credentials),
            CreateError,
            "register",
            "user"
        )
    }

    async fn login(&self, credentials: Credentials) -> Result<Auth, ReadError> {
        let token = log_on_error!(
            self.repository.request_token(credentials),
            ReadError,
            "request",
            "token"
        )?;
        if let Err(err) = self.repository.write_token(&token).await {
            warn!("failed to persist token: {err}");
        }
        let user = log_on_error!(
            self.repository.read_current_user(&token),
            ReadError,
            "get",
            "current user"
        )?;
        Ok(Auth::new(user, token))
    }

    async fn initialize_session(&self) -> Result<Auth, ReadError> {
        let token = match self.repository.read_token().await {
            Ok(Some(token)) => token,
            Ok(None) => return Ok(Auth::default()),
            Err(err) => {
                warn!("failed to read token: {err}");
                return Ok(Auth::default());
            }
        };
        match log_on_error!(
            self.repository.read_current_user(&token),
            ReadError,
            "get",
            "current user"
        ) {
            Ok(user) => Ok(Auth::new(user, token)),
            Err(err) => {
                if let Err(err) = self.repository.delete_token().await {
                    warn!("failed to remove token: {err}");
                }
                Err(err)
            }
        }
    }

    async fn logout(&self) -> Result<(), DeleteError> {
        self.repository
            .delete_token()
            .await
            .map_err(|err| DeleteError::Other(err.into()))
    }
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(
        &self,
        muscle_group: Option<MuscleGroup>,
    ) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(muscle_group),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn get_major_muscle_groups(&self) -> Result<Vec<MajorMuscleGroup>, ReadError> {
        log_on_error!(
            self.repository.read_major_muscle_groups(),
            ReadError,
            "get",
            "major muscle groups"
        )
    }

    async fn get_muscle_groups(
        &self,
        major_muscle_group: MajorMuscleGroup,
    ) -> Result<Vec<MuscleGroup>, ReadError> {
        log_on_error!(
            self.repository.read_muscle_groups(major_muscle_group),
            ReadError,
            "get",
            "muscle groups"
        )
    }
}

impl<R: WorkoutSessionRepository> WorkoutSessionService for Service<R> {
    async fn get_workout_sessions(
        &self,
        token: &Token,
        limit: usize,
    ) -> Result<Vec<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.read_workout_sessions(token, limit),
            ReadError,
            "get",
            "workout sessions"
        )
    }

    async fn create_workout_session(
        &self,
        token: &Token,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError> {
        log_on_error!(
            self.repository.create_workout_session(token, session),
            CreateError,
            "create",
            "workout session"
        )
    }

    async fn replace_workout_session(
        &self,
        token: &Token,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, UpdateError> {
        log_on_error!(
            self.repository.replace_workout_session(token, session),
            UpdateError,
            "replace",
            "workout session"
        )
    }

    async fn delete_workout_session(
        &self,
        token: &Token,
        id: WorkoutID,
    ) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_session(token, id),
            DeleteError,
            "delete",
            "workout session"
        )
    }
}

impl<R: WorkoutPlanRepository> WorkoutPlanService for Service<R> {
    async fn get_workout_plans(&self, token: &Token) -> Result<Vec<WorkoutPlan>, ReadError> {
        log_on_error!(
            self.repository.read_workout_plans(token),
            ReadError,
            "get",
            "workout plans"
        )
    }

    async fn create_workout_plan(
        &self,
        token: &Token,
        plan: WorkoutPlan,
    ) -> Result<WorkoutPlan, CreateError> {
        log_on_error!(
            self.repository.create_workout_plan(token, plan),
            CreateError,
            "create",
            "workout plan"
        )
    }

    async fn replace_workout_plan(
        &self,
        token: &Token,
        plan: WorkoutPlan,
    ) -> Result<WorkoutPlan, UpdateError> {
        log_on_error!(
            self.repository.replace_workout_plan(token, plan),
            UpdateError,
            "replace",
            "workout plan"
        )
    }

    async fn delete_workout_plan(
        &self,
        token: &Token,
        id: WorkoutPlanID,
    ) -> Result<WorkoutPlanID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_plan(token, id),
            DeleteError,
            "delete",
            "workout plan"
        )
    }
}

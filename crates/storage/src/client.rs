//! API client
//!
//! Combines the REST API with the local storage of the bearer token, so that a single repository
//! can back the session service of the domain.

use gymlog_domain::{
    self as domain, ExerciseRepository as _, SessionRepository as _, TokenRepository as _,
    WorkoutPlanRepository as _, WorkoutSessionRepository as _,
};

use super::local_storage::LocalStorage;
use super::rest::{GlooNetSendRequest, REST, SendRequest};

pub struct Client<S: SendRequest> {
    rest: REST<S>,
}

impl Client<GlooNetSendRequest> {
    #[must_use]
    pub fn new(settings: &gymlog_web_app::Settings) -> Self {
        Self::with_rest(REST::new(&settings.api_base_url))
    }
}

impl<S: SendRequest> Client<S> {
    pub const fn with_rest(rest: REST<S>) -> Self {
        Self { rest }
    }

    pub fn rest(&self) -> &REST<S> {
        &self.rest
    }
}

impl<S: SendRequest> domain::TokenRepository for Client<S> {
    async fn read_token(&self) -> Result<Option<domain::Token>, String> {
        LocalStorage.read_token().await
    }

    async fn write_token(&self, token: &domain::Token) -> Result<(), String> {
        LocalStorage.write_token(token).await
    }

    async fn delete_token(&self) -> Result<(), String> {
        LocalStorage.delete_token().await
    }
}

impl<S: SendRequest> domain::SessionRepository for Client<S> {
    async fn register(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::User, domain::CreateError> {
        self.rest.register(credentials).await
    }

    async fn request_token(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::Token, domain::ReadError> {
        self.rest.request_token(credentials).await
    }

    async fn read_current_user(
        &self,
        token: &domain::Token,
    ) -> Result<domain::User, domain::ReadError> {
        self.rest.read_current_user(token).await
    }
}

impl<S: SendRequest> domain::ExerciseRepository for Client<S> {
    async fn read_exercises(
        &self,
        muscle_group: Option<domain::MuscleGroup>,
    ) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.rest.read_exercises(muscle_group).await
    }

    async fn read_major_muscle_groups(
        &self,
    ) -> Result<Vec<domain::MajorMuscleGroup>, domain::ReadError> {
        self.rest.read_major_muscle_groups().await
    }

    async fn read_muscle_groups(
        &self,
        major_muscle_group: domain::MajorMuscleGroup,
    ) -> Result<Vec<domain::MuscleGroup>, domain::ReadError> {
        self.rest.read_muscle_groups(major_muscle_group).await
    }
}

impl<S: SendRequest> domain::WorkoutSessionRepository for Client<S> {
    async fn read_workout_sessions(
        &self,
        token: &domain::Token,
        limit: usize,
    ) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        self.rest.read_workout_sessions(token, limit).await
    }

    async fn create_workout_session(
        &self,
        token: &domain::Token,
        session: domain::WorkoutSession,
    ) -> Result<domain::WorkoutSession, domain::CreateError> {
        self.rest.create_workout_session(token, session).await
    }

    async fn replace_workout_session(
        &self,
        token: &domain::Token,
        session: domain::WorkoutSession,
    ) -> Result<domain::WorkoutSession, domain::UpdateError> {
        self.rest.replace_workout_session(token, session).await
    }

    async fn delete_workout_session(
        &self,
        token: &domain::Token,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.rest.delete_workout_session(token, id).await
    }
}

impl<S: SendRequest> domain::WorkoutPlanRepository for Client<S> {
    async fn read_workout_plans(
        &self,
        token: &domain::Token,
    ) -> Result<Vec<domain::WorkoutPlan>, domain::ReadError> {
        self.rest.read_workout_plans(token).await
    }

    async fn create_workout_plan(
        &self,
        token: &domain::Token,
        plan: domain::WorkoutPlan,
    ) -> Result<domain::WorkoutPlan, domain::CreateError> {
        self.rest.create_workout_plan(token, plan).await
    }

    async fn replace_workout_plan(
        &self,
        token: &domain::Token,
        plan: domain::WorkoutPlan,
    ) -> Result<domain::WorkoutPlan, domain::UpdateError> {
        self.rest.replace_workout_plan(token, plan).await
    }

    async fn delete_workout_plan(
        &self,
        token: &domain::Token,
        id: domain::WorkoutPlanID,
    ) -> Result<domain::WorkoutPlanID, domain::DeleteError> {
        self.rest.delete_workout_plan(token, id).await
    }
}

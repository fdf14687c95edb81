use std::collections::BTreeMap;

use derive_more::{Deref, Display};
use log::debug;
use strum::IntoEnumIterator;

use crate::{
    Auth, ComposerError, CreateError, DeleteError, ExerciseRef, FilterChain, FilterRequest,
    Listing, LogComposer, Name, NameError, ReadError, ScheduleID, ScheduleItem, SubListSource,
    SubmitError, TaxonomyCache, Token, UpdateError, User, WeekSchedule, Weekday,
    normalize_schedule,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutPlanService {
    async fn get_workout_plans(&self, token: &Token) -> Result<Vec<WorkoutPlan>, ReadError>;
    async fn create_workout_plan(
        &self,
        token: &Token,
        plan: WorkoutPlan,
    ) -> Result<WorkoutPlan, CreateError>;
    async fn replace_workout_plan(
        &self,
        token: &Token,
        plan: WorkoutPlan,
    ) -> Result<WorkoutPlan, UpdateError>;
    async fn delete_workout_plan(
        &self,
        token: &Token,
        id: WorkoutPlanID,
    ) -> Result<WorkoutPlanID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutPlanRepository {
    async fn read_workout_plans(&self, token: &Token) -> Result<Vec<WorkoutPlan>, ReadError>;
    async fn create_workout_plan(
        &self,
        token: &Token,
        plan: WorkoutPlan,
    ) -> Result<WorkoutPlan, CreateError>;
    async fn replace_workout_plan(
        &self,
        token: &Token,
        plan: WorkoutPlan,
    ) -> Result<WorkoutPlan, UpdateError>;
    async fn delete_workout_plan(
        &self,
        token: &Token,
        id: WorkoutPlanID,
    ) -> Result<WorkoutPlanID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    pub id: Option<WorkoutPlanID>,
    pub user_id: String,
    pub name: String,
    pub summary: PlanSummary,
    pub schedule: WeekSchedule,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub goal: String,
    pub workout_type: String,
    pub training_level: String,
    pub program_duration: String,
    pub days_per_week: u32,
    pub time_per_workout: String,
    pub equipments: Vec<String>,
    pub target_gender: String,
    pub recommended_supplements: Vec<String>,
}

#[derive(Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutPlanID(String);

impl WorkoutPlanID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutPlanID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutPlanID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for WorkoutPlanID {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Independent exercise selection and item list of one plan day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayEditor {
    pub filter: FilterChain,
    pub composer: LogComposer<ScheduleItem>,
}

impl DayEditor {
    #[must_use]
    pub fn new(source: SubListSource, items: Vec<ScheduleItem>) -> Self {
        Self {
            filter: FilterChain::new(source),
            composer: LogComposer::with_entries(items),
        }
    }

    /// Adds the exercise currently selected in the filter using the prescription of the draft.
    pub fn add_selected_exercise(&mut self) -> Result<(), ComposerError> {
        let Some(exercise) = self.filter.selected_exercise() else {
            return Err(ComposerError::NoExercise);
        };
        self.composer.draft.exercise = Some(ExerciseRef::Id(exercise.id.clone()));
        self.composer.draft.muscle_group = Some(exercise.muscle_group.clone());
        self.composer.submit()
    }
}

/// Editor of a new or an existing workout plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanEditor {
    pub name: String,
    pub summary: PlanSummary,
    id: Option<WorkoutPlanID>,
    schedule_id: Option<ScheduleID>,
    days: BTreeMap<Weekday, DayEditor>,
}

impl PlanEditor {
    #[must_use]
    pub fn new_plan(source: SubListSource) -> Self {
        Self::from_plan(
            WorkoutPlan {
                id: None,
                user_id: String::new(),
                name: "New Workout Plan".to_string(),
                summary: PlanSummary {
                    goal: "New Plan".to_string(),
                    ..PlanSummary::default()
                },
                schedule: WeekSchedule::default(),
            },
            source,
        )
    }

    /// Opens a fetched plan. Legacy schedule items are resolved against the catalog first.
    #[must_use]
    pub fn load(plan: WorkoutPlan, cache: &TaxonomyCache, source: SubListSource) -> Self {
        let schedule = normalize_schedule(plan.schedule, cache);
        Self::from_plan(WorkoutPlan { schedule, ..plan }, source)
    }

    fn from_plan(plan: WorkoutPlan, source: SubListSource) -> Self {
        let days = Weekday::iter()
            .map(|day| {
                (
                    day,
                    DayEditor::new(source, plan.schedule.day(day).to_vec()),
                )
            })
            .collect();
        Self {
            name: plan.name,
            summary: plan.summary,
            id: plan.id,
            schedule_id: plan.schedule.id,
            days,
        }
    }

    /// Initializes the filters of all days.
    pub fn init(&mut self, cache: &TaxonomyCache) -> Vec<(Weekday, FilterRequest)> {
        self.days
            .iter_mut()
            .flat_map(|(day, editor)| {
                let day = *day;
                editor
                    .filter
                    .init(cache)
                    .into_iter()
                    .map(move |request| (day, request))
            })
            .collect()
    }

    #[must_use]
    pub fn id(&self) -> Option<&WorkoutPlanID> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn day(&self, day: Weekday) -> Option<&DayEditor> {
        self.days.get(&day)
    }

    pub fn day_mut(&mut self, day: Weekday) -> Option<&mut DayEditor> {
        self.days.get_mut(&day)
    }

    #[must_use]
    pub fn schedule(&self) -> WeekSchedule {
        WeekSchedule::from_days(
            self.schedule_id.clone(),
            self.days
                .iter()
                .map(|(day, editor)| (*day, editor.composer.entries().to_vec())),
        )
    }

    pub fn to_plan(&self, user: &User) -> Result<WorkoutPlan, NameError> {
        let name = Name::new(&self.name)?;
        Ok(WorkoutPlan {
            id: self.id.clone(),
            user_id: user.user_id().to_string(),
            name: name.as_str().to_string(),
            summary: self.summary.clone(),
            schedule: self.schedule(),
        })
    }
}

/// Plans of the user together with the plan currently being edited.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanBoard {
    pub plans: Listing<WorkoutPlan>,
    pub editor: Option<PlanEditor>,
    error: Option<String>,
}

impl PlanBoard {
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn refresh<S: WorkoutPlanService>(&mut self, service: &S, auth: &Auth) {
        let Some(token) = &auth.token else {
            debug!("not refreshing workout plans without token");
            return;
        };
        self.plans.start();
        self.plans.finish(service.get_workout_plans(token).await);
    }

    /// Most recent plans for display.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[WorkoutPlan] {
        self.plans.recent(n)
    }

    pub fn add_plan(&mut self, source: SubListSource) {
        self.error = None;
        self.editor = Some(PlanEditor::new_plan(source));
    }

    pub fn modify_plan(
        &mut self,
        plan: WorkoutPlan,
        cache: &TaxonomyCache,
        source: SubListSource,
    ) {
        self.error = None;
        self.editor = Some(PlanEditor::load(plan, cache, source));
    }

    pub fn cancel(&mut self) {
        self.editor = None;
    }

    /// Creates or replaces the edited plan, closes the editor and refreshes the plans.
    ///
    /// The editor stays open if the plan could not be saved.
    pub async fn save<S: WorkoutPlanService>(
        &mut self,
        service: &S,
        auth: &Auth,
    ) -> Result<(), SubmitError> {
        self.error = None;
        let Some(editor) = &self.editor else {
            debug!("no workout plan open to save");
            return Ok(());
        };

        let result = async {
            let (user, token) = auth
                .require()
                .map_err(|_| SubmitError::NotLoggedIn("save a workout plan"))?;
            let plan = editor.to_plan(user)?;
            if plan.id.is_some() {
                service.replace_workout_plan(token, plan).await?;
            } else {
                service.create_workout_plan(token, plan).await?;
            }
            Ok::<(), SubmitError>(())
        }
        .await;

        if let Err(err) = result {
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.editor = None;
        self.refresh(service, auth).await;
        Ok(())
    }

    pub async fn remove<S: WorkoutPlanService>(
        &mut self,
        service: &S,
        auth: &Auth,
        id: WorkoutPlanID,
    ) -> Result<(), SubmitError> {
        self.error = None;

        let result = async {
            let (_, token) = auth
                .require()
                .map_err(|_| SubmitError::NotLoggedIn("delete a workout plan"))?;
            service.delete_workout_plan(token, id.clone()).await?;
            Ok::<(), SubmitError>(())
        }
        .await;

        if let Err(err) = result {
            self.error = Some(err.to_string());
            return Err(err);
        }

        if self.editor.as_ref().and_then(PlanEditor::id) == Some(&id) {
            self.editor = None;
        }
        self.refresh(service, auth).await;
        Ok(())
    }
}

//! REST API
//!
//! The exercise catalog can be read without authentication. Workout sessions, workout plans and
//! the current user require a bearer token obtained by logging in.

use std::{collections::BTreeMap, str::FromStr};

use chrono::NaiveDate;
use gloo_net::http::{Request, Response};
use gymlog_domain as domain;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
    base_url: String,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_sender(base_url, GlooNetSendRequest)
    }
}

impl<S: SendRequest> REST<S> {
    pub fn with_sender(base_url: &str, sender: S) -> Self {
        Self {
            sender,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: Result<Request, gloo_net::Error>,
        fallback: &str,
    ) -> Result<T, domain::StorageError> {
        let response = self.send(request, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| domain::StorageError::Other(err.into()))
    }

    async fn fetch_no_content(
        &self,
        request: Result<Request, gloo_net::Error>,
        fallback: &str,
    ) -> Result<(), domain::StorageError> {
        self.send(request, fallback).await.map(|_| ())
    }

    async fn send(
        &self,
        request: Result<Request, gloo_net::Error>,
        fallback: &str,
    ) -> Result<Response, domain::StorageError> {
        let request = request.map_err(|err| domain::StorageError::Other(err.into()))?;
        let response = self
            .sender
            .send_request(request)
            .await
            .map_err(|_| domain::StorageError::NoConnection)?;
        if response.ok() {
            Ok(response)
        } else {
            Err(error_from_response(response, fallback).await)
        }
    }
}

/// Converts each record of a listing on its own.
///
/// Records that cannot be read are left out of the result, so one broken record does not hide the
/// others.
fn convert_records<T, U>(records: Vec<serde_json::Value>, kind: &str) -> Vec<U>
where
    T: DeserializeOwned,
    U: TryFrom<T, Error = ConversionError>,
{
    records
        .into_iter()
        .filter_map(|record| {
            let converted = serde_json::from_value::<T>(record.clone())
                .map_err(|err| err.to_string())
                .and_then(|value| U::try_from(value).map_err(|err| err.to_string()));
            match converted {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!("skipped invalid {kind} {record}: {err}");
                    None
                }
            }
        })
        .collect()
}

fn bearer(token: &domain::Token) -> String {
    format!("Bearer {}", token.as_str())
}

async fn error_from_response(response: Response, fallback: &str) -> domain::StorageError {
    let status = response.status();
    let detail = match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => Some(detail),
        Ok(_) => None,
        Err(err) => {
            debug!("failed to parse error response ({status}): {err}");
            None
        }
    };
    match detail {
        Some(detail) => domain::StorageError::Api(detail),
        None if status == 401 => domain::StorageError::Unauthorized,
        None => domain::StorageError::Api(fallback.to_string()),
    }
}

impl<S: SendRequest> domain::ExerciseRepository for REST<S> {
    async fn read_exercises(
        &self,
        muscle_group: Option<domain::MuscleGroup>,
    ) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        let mut request = Request::get(&self.url("/exercises/"));
        if let Some(muscle_group) = muscle_group {
            request = request.query([("muscle_group", muscle_group.api_name())]);
        }
        let exercises = self
            .fetch(request.build(), "Failed to fetch exercises")
            .await?;
        Ok(convert_records::<Exercise, _>(exercises, "exercise"))
    }

    async fn read_major_muscle_groups(
        &self,
    ) -> Result<Vec<domain::MajorMuscleGroup>, domain::ReadError> {
        let names: Vec<String> = self
            .fetch(
                Request::get(&self.url("/major_muscle_groups/")).build(),
                "Failed to fetch major muscle groups",
            )
            .await?;
        Ok(names
            .iter()
            .map(|name| domain::MajorMuscleGroup::new(name))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| domain::ReadError::Other(err.into()))?)
    }

    async fn read_muscle_groups(
        &self,
        major_muscle_group: domain::MajorMuscleGroup,
    ) -> Result<Vec<domain::MuscleGroup>, domain::ReadError> {
        let names: Vec<String> = self
            .fetch(
                Request::get(&self.url("/muscle_groups/"))
                    .query([("major_muscle_group", major_muscle_group.as_str())])
                    .build(),
                "Failed to fetch muscle groups",
            )
            .await?;
        Ok(names
            .iter()
            .map(|name| domain::MuscleGroup::new(name))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| domain::ReadError::Other(err.into()))?)
    }
}

impl<S: SendRequest> domain::SessionRepository for REST<S> {
    async fn register(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::User, domain::CreateError> {
        let user: User = self
            .fetch(
                Request::post(&self.url("/register/")).json(&Registration::from(credentials)),
                "Registration failed",
            )
            .await?;
        Ok(user.into())
    }

    async fn request_token(
        &self,
        credentials: domain::Credentials,
    ) -> Result<domain::Token, domain::ReadError> {
        let form = web_sys::UrlSearchParams::new()
            .map_err(|err| domain::ReadError::Other(format!("{err:?}").into()))?;
        form.append("username", credentials.username.as_str());
        form.append("password", &credentials.password);
        let token: AccessToken = self
            .fetch(
                Request::post(&self.url("/token"))
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(form.to_string()),
                "Login failed",
            )
            .await?;
        Ok(token.into())
    }

    async fn read_current_user(
        &self,
        token: &domain::Token,
    ) -> Result<domain::User, domain::ReadError> {
        let user: User = self
            .fetch(
                Request::get(&self.url("/users/me/"))
                    .header("Authorization", &bearer(token))
                    .build(),
                "Failed to fetch user profile",
            )
            .await?;
        Ok(user.into())
    }
}

impl<S: SendRequest> domain::WorkoutSessionRepository for REST<S> {
    async fn read_workout_sessions(
        &self,
        token: &domain::Token,
        limit: usize,
    ) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        let sessions = self
            .fetch(
                Request::get(&self.url("/users/me/workouts/"))
                    .query([("limit", limit.to_string())])
                    .header("Authorization", &bearer(token))
                    .build(),
                "Failed to fetch workout sessions",
            )
            .await?;
        Ok(convert_records::<WorkoutSession, _>(sessions, "workout session"))
    }

    async fn create_workout_session(
        &self,
        token: &domain::Token,
        session: domain::WorkoutSession,
    ) -> Result<domain::WorkoutSession, domain::CreateError> {
        let created: WorkoutSession = self
            .fetch(
                Request::post(&self.url("/workouts/"))
                    .header("Authorization", &bearer(token))
                    .json(&WorkoutSession::from(session)),
                "Failed to create workout session",
            )
            .await?;
        Ok(domain::WorkoutSession::try_from(created)
            .map_err(|err| domain::CreateError::Other(err.into()))?)
    }

    async fn replace_workout_session(
        &self,
        token: &domain::Token,
        session: domain::WorkoutSession,
    ) -> Result<domain::WorkoutSession, domain::UpdateError> {
        let Some(id) = session.id.clone() else {
            return Err(domain::UpdateError::Other(
                "workout session without id".into(),
            ));
        };
        let replaced: WorkoutSession = self
            .fetch(
                Request::put(&self.url(&format!("/workouts/{id}")))
                    .header("Authorization", &bearer(token))
                    .json(&WorkoutSession::from(session)),
                "Failed to update workout session",
            )
            .await?;
        Ok(domain::WorkoutSession::try_from(replaced)
            .map_err(|err| domain::UpdateError::Other(err.into()))?)
    }

    async fn delete_workout_session(
        &self,
        token: &domain::Token,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.fetch_no_content(
            Request::delete(&self.url(&format!("/workouts/{id}")))
                .header("Authorization", &bearer(token))
                .build(),
            "Failed to delete workout session",
        )
        .await?;
        Ok(id)
    }
}

impl<S: SendRequest> domain::WorkoutPlanRepository for REST<S> {
    async fn read_workout_plans(
        &self,
        token: &domain::Token,
    ) -> Result<Vec<domain::WorkoutPlan>, domain::ReadError> {
        let plans = self
            .fetch(
                Request::get(&self.url("/users/me/workoutplans/"))
                    .header("Authorization", &bearer(token))
                    .build(),
                "Failed to fetch workout plans",
            )
            .await?;
        Ok(convert_records::<WorkoutPlan, _>(plans, "workout plan"))
    }

    async fn create_workout_plan(
        &self,
        token: &domain::Token,
        plan: domain::WorkoutPlan,
    ) -> Result<domain::WorkoutPlan, domain::CreateError> {
        let created: WorkoutPlan = self
            .fetch(
                Request::post(&self.url("/workoutplans/"))
                    .header("Authorization", &bearer(token))
                    .json(&WorkoutPlan::from(plan)),
                "Failed to create workout plan",
            )
            .await?;
        Ok(domain::WorkoutPlan::try_from(created)
            .map_err(|err| domain::CreateError::Other(err.into()))?)
    }

    async fn replace_workout_plan(
        &self,
        token: &domain::Token,
        plan: domain::WorkoutPlan,
    ) -> Result<domain::WorkoutPlan, domain::UpdateError> {
        let Some(id) = plan.id.clone() else {
            return Err(domain::UpdateError::Other("workout plan without id".into()));
        };
        let replaced: WorkoutPlan = self
            .fetch(
                Request::put(&self.url(&format!("/workoutplans/{id}/")))
                    .header("Authorization", &bearer(token))
                    .json(&WorkoutPlan::from(plan)),
                "Failed to update workout plan",
            )
            .await?;
        Ok(domain::WorkoutPlan::try_from(replaced)
            .map_err(|err| domain::UpdateError::Other(err.into()))?)
    }

    async fn delete_workout_plan(
        &self,
        token: &domain::Token,
        id: domain::WorkoutPlanID,
    ) -> Result<domain::WorkoutPlanID, domain::DeleteError> {
        self.fetch_no_content(
            Request::delete(&self.url(&format!("/workoutplans/{id}/")))
                .header("Authorization", &bearer(token))
                .build(),
            "Failed to delete workout plan",
        )
        .await?;
        Ok(id)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConversionError {
    #[error(transparent)]
    InvalidMuscleGroup(#[from] domain::MuscleGroupError),
    #[error(transparent)]
    InvalidSets(#[from] domain::SetsError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error("unknown weight unit \"{0}\"")]
    InvalidWeightUnit(String),
    #[error("schedule of {0} is not a list")]
    InvalidScheduleDay(String),
    #[error("invalid schedule item on {day}: {message}")]
    InvalidScheduleItem { day: String, message: String },
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    detail: serde_json::Value,
}

/// Identifier as sent by the API.
///
/// Numeric identifiers are written back as JSON numbers, all others as strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum JsonID {
    Number(u64),
    Text(String),
}

impl From<&str> for JsonID {
    fn from(value: &str) -> Self {
        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = value.parse() {
                return JsonID::Number(number);
            }
        }
        JsonID::Text(value.to_string())
    }
}

impl From<JsonID> for String {
    fn from(value: JsonID) -> Self {
        match value {
            JsonID::Number(number) => number.to_string(),
            JsonID::Text(text) => text,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
}

impl From<User> for domain::User {
    fn from(value: User) -> Self {
        domain::User {
            username: value.username,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct Registration {
    username: String,
    password: String,
}

impl From<domain::Credentials> for Registration {
    fn from(value: domain::Credentials) -> Self {
        Self {
            username: value.username.as_str().to_string(),
            password: value.password,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl From<AccessToken> for domain::Token {
    fn from(value: AccessToken) -> Self {
        domain::Token::new(value.access_token)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: JsonID,
    pub display_name: String,
    pub muscle_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_muscle_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<domain::Exercise> for Exercise {
    fn from(value: domain::Exercise) -> Self {
        Self {
            id: JsonID::from(value.id.as_str()),
            display_name: value.display_name,
            muscle_group: value.muscle_group.as_str().to_string(),
            major_muscle_group: value
                .major_muscle_group
                .map(|group| group.as_str().to_string()),
            url: value.url,
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = ConversionError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(domain::Exercise {
            id: domain::ExerciseID::from(String::from(value.id)),
            display_name: value.display_name,
            muscle_group: domain::MuscleGroup::new(&value.muscle_group)?,
            major_muscle_group: match value.major_muscle_group {
                Some(group) if !group.trim().is_empty() => {
                    Some(domain::MajorMuscleGroup::new(&group)?)
                }
                _ => None,
            },
            url: value.url,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Weight {
    #[serde(deserialize_with = "deserialize_weight_value")]
    pub value: f32,
    pub unit: String,
}

impl From<domain::WeightSpec> for Weight {
    fn from(value: domain::WeightSpec) -> Self {
        Self {
            value: *value.value,
            unit: value.unit.to_string(),
        }
    }
}

impl TryFrom<Weight> for domain::WeightSpec {
    type Error = ConversionError;

    fn try_from(value: Weight) -> Result<Self, Self::Error> {
        Ok(domain::WeightSpec {
            value: domain::Weight::new(value.value)?,
            unit: domain::WeightUnit::from_str(&value.unit)
                .map_err(|_| ConversionError::InvalidWeightUnit(value.unit.clone()))?,
        })
    }
}

/// Entry of a workout session.
///
/// Entries of earlier client revisions reference the exercise by its display name and carry the
/// weight as `weight_kg`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseLogEntry {
    pub exercise: JsonID,
    #[serde(deserialize_with = "deserialize_count")]
    pub sets: u32,
    #[serde(deserialize_with = "deserialize_count")]
    pub reps: u32,
    #[serde(default)]
    pub weight: Option<Weight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f32>,
}

impl From<domain::ExerciseLogEntry> for ExerciseLogEntry {
    fn from(value: domain::ExerciseLogEntry) -> Self {
        Self {
            exercise: match value.exercise {
                domain::ExerciseRef::Id(id) => JsonID::from(id.as_str()),
                domain::ExerciseRef::Name(name) => JsonID::Text(name),
            },
            sets: *value.sets,
            reps: *value.reps,
            weight: value.weight.map(Weight::from),
            weight_kg: None,
        }
    }
}

impl TryFrom<ExerciseLogEntry> for domain::ExerciseLogEntry {
    type Error = ConversionError;

    fn try_from(value: ExerciseLogEntry) -> Result<Self, Self::Error> {
        let weight = match (value.weight, value.weight_kg) {
            (Some(weight), _) => Some(domain::WeightSpec::try_from(weight)?),
            (None, Some(kg)) => Some(domain::WeightSpec {
                value: domain::Weight::new(kg)?,
                unit: domain::WeightUnit::Kg,
            }),
            (None, None) => None,
        };
        Ok(domain::ExerciseLogEntry {
            exercise: match value.exercise {
                JsonID::Number(number) => domain::ExerciseRef::Id(domain::ExerciseID::from(number)),
                JsonID::Text(name) => domain::ExerciseRef::Name(name),
            },
            sets: domain::Sets::new(value.sets)?,
            reps: domain::Reps::new(value.reps)?,
            weight,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    #[serde(
        default,
        alias = "workout_id",
        alias = "session_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<JsonID>,
    #[serde(default)]
    pub user_id: String,
    pub session_date: NaiveDate,
    #[serde(default)]
    pub exercises: Vec<ExerciseLogEntry>,
}

impl From<domain::WorkoutSession> for WorkoutSession {
    fn from(value: domain::WorkoutSession) -> Self {
        Self {
            id: value.id.map(|id| JsonID::from(id.as_str())),
            user_id: value.user_id,
            session_date: value.session_date,
            exercises: value
                .exercises
                .into_iter()
                .map(ExerciseLogEntry::from)
                .collect(),
        }
    }
}

impl TryFrom<WorkoutSession> for domain::WorkoutSession {
    type Error = ConversionError;

    fn try_from(value: WorkoutSession) -> Result<Self, Self::Error> {
        Ok(domain::WorkoutSession {
            id: value.id.map(|id| domain::WorkoutID::from(String::from(id))),
            user_id: value.user_id,
            session_date: value.session_date,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseLogEntry::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub workoutplan_id: Option<JsonID>,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub workoutplan_summary: PlanSummary,
    #[serde(default)]
    pub workoutplan_schedule: Schedule,
}

impl From<domain::WorkoutPlan> for WorkoutPlan {
    fn from(value: domain::WorkoutPlan) -> Self {
        Self {
            workoutplan_id: value.id.map(|id| JsonID::from(id.as_str())),
            user_id: value.user_id,
            name: value.name,
            workoutplan_summary: value.summary.into(),
            workoutplan_schedule: value.schedule.into(),
        }
    }
}

impl TryFrom<WorkoutPlan> for domain::WorkoutPlan {
    type Error = ConversionError;

    fn try_from(value: WorkoutPlan) -> Result<Self, Self::Error> {
        Ok(domain::WorkoutPlan {
            id: value
                .workoutplan_id
                .map(|id| domain::WorkoutPlanID::from(String::from(id))),
            user_id: value.user_id,
            name: value.name,
            summary: value.workoutplan_summary.into(),
            schedule: value.workoutplan_schedule.try_into()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PlanSummary {
    pub goal: String,
    pub workout_type: String,
    pub training_level: String,
    pub program_duration: String,
    #[serde(deserialize_with = "deserialize_days_per_week")]
    pub days_per_week: u32,
    pub time_per_workout: String,
    pub equipments: Vec<String>,
    pub target_gender: String,
    pub recommended_supplements: Vec<String>,
}

impl From<domain::PlanSummary> for PlanSummary {
    fn from(value: domain::PlanSummary) -> Self {
        Self {
            goal: value.goal,
            workout_type: value.workout_type,
            training_level: value.training_level,
            program_duration: value.program_duration,
            days_per_week: value.days_per_week,
            time_per_workout: value.time_per_workout,
            equipments: value.equipments,
            target_gender: value.target_gender,
            recommended_supplements: value.recommended_supplements,
        }
    }
}

impl From<PlanSummary> for domain::PlanSummary {
    fn from(value: PlanSummary) -> Self {
        Self {
            goal: value.goal,
            workout_type: value.workout_type,
            training_level: value.training_level,
            program_duration: value.program_duration,
            days_per_week: value.days_per_week,
            time_per_workout: value.time_per_workout,
            equipments: value.equipments,
            target_gender: value.target_gender,
            recommended_supplements: value.recommended_supplements,
        }
    }
}

/// Reads a count sent as `3`, `3.0`, `"3"`, `""` or `null`.
fn count_from_value(value: &serde_json::Value) -> Result<Option<u32>, String> {
    let count = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::String(text) if text.trim().is_empty() => return Ok(None),
        serde_json::Value::String(text) => text
            .trim()
            .parse::<u32>()
            .ok()
            .or_else(|| text.trim().parse::<f64>().ok().and_then(integral_count)),
        serde_json::Value::Number(number) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| number.as_f64().and_then(integral_count)),
        _ => None,
    };
    count.map(Some).ok_or_else(|| format!("invalid count: {value}"))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_count(value: f64) -> Option<u32> {
    (value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value)).then_some(value as u32)
}

fn deserialize_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    count_from_value(&serde_json::Value::deserialize(deserializer)?)
        .map_err(serde::de::Error::custom)?
        .ok_or_else(|| serde::de::Error::custom("missing count"))
}

fn deserialize_optional_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    count_from_value(&serde_json::Value::deserialize(deserializer)?)
        .map_err(serde::de::Error::custom)
}

fn deserialize_days_per_week<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(deserialize_optional_count(deserializer)?.unwrap_or_default())
}

fn deserialize_weight_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f32),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid weight: {text}"))),
    }
}

/// Weekly schedule keyed by weekday name.
///
/// Keys other than the weekdays and the schedule id are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    #[serde(default, alias = "schedule_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonID>,
    #[serde(flatten)]
    pub days: BTreeMap<String, Day>,
}

/// Items of one weekday.
///
/// Received days stay raw JSON until conversion, so each item is read and reported on its own.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Day {
    Items(Vec<ScheduleItem>),
    Raw(serde_json::Value),
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Day::Raw)
    }
}

impl Day {
    fn into_items(self, weekday: &str) -> Result<Vec<domain::ScheduleItem>, ConversionError> {
        let items = match self {
            Day::Items(items) => items,
            Day::Raw(serde_json::Value::Null) => vec![],
            Day::Raw(serde_json::Value::Array(values)) => values
                .into_iter()
                .map(|value| {
                    serde_json::from_value::<ScheduleItem>(value).map_err(|err| {
                        ConversionError::InvalidScheduleItem {
                            day: weekday.to_string(),
                            message: err.to_string(),
                        }
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Day::Raw(_) => return Err(ConversionError::InvalidScheduleDay(weekday.to_string())),
        };
        items
            .into_iter()
            .map(domain::ScheduleItem::try_from)
            .collect()
    }
}

impl From<domain::WeekSchedule> for Schedule {
    fn from(value: domain::WeekSchedule) -> Self {
        Self {
            id: value.id.as_ref().map(|id| JsonID::from(id.as_str())),
            days: value
                .days()
                .map(|(day, items)| {
                    (
                        day.to_string(),
                        Day::Items(items.iter().cloned().map(ScheduleItem::from).collect()),
                    )
                })
                .collect(),
        }
    }
}

impl TryFrom<Schedule> for domain::WeekSchedule {
    type Error = ConversionError;

    fn try_from(value: Schedule) -> Result<Self, Self::Error> {
        let mut days = vec![];
        for (key, day) in value.days {
            let Ok(weekday) = domain::Weekday::from_str(&key) else {
                debug!("ignored schedule key \"{key}\"");
                continue;
            };
            days.push((weekday, day.into_items(&key)?));
        }
        Ok(domain::WeekSchedule::from_days(
            value.id.map(|id| domain::ScheduleID::from(String::from(id))),
            days,
        ))
    }
}

/// Item of a schedule day.
///
/// Three shapes exist: `{muscle_group: [g], exercise: [id]}`, the legacy
/// `{muscle_group: [g], exercise: [[displayName, ...]]}` and the oldest `{name: displayName}`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScheduleItem {
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub muscle_group: Vec<String>,
    #[serde(default)]
    pub exercise: Vec<ScheduleExercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub sets: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScheduleExercise {
    Id(JsonID),
    Legacy(Vec<serde_json::Value>),
    Missing(()),
}

impl From<domain::ScheduleItem> for ScheduleItem {
    fn from(value: domain::ScheduleItem) -> Self {
        Self {
            muscle_group: value
                .muscle_group
                .iter()
                .map(|group| group.as_str().to_string())
                .collect(),
            exercise: value
                .exercise
                .into_iter()
                .map(|exercise| match exercise {
                    domain::ScheduleExercise::Id(id) => {
                        ScheduleExercise::Id(JsonID::from(id.as_str()))
                    }
                    domain::ScheduleExercise::Legacy(names) => ScheduleExercise::Legacy(
                        names.into_iter().map(serde_json::Value::String).collect(),
                    ),
                })
                .collect(),
            name: None,
            sets: value.sets.map(|sets| *sets),
            reps: value.reps.map(|reps| *reps),
            weight: value.weight.map(Weight::from),
        }
    }
}

impl TryFrom<ScheduleItem> for domain::ScheduleItem {
    type Error = ConversionError;

    fn try_from(value: ScheduleItem) -> Result<Self, Self::Error> {
        let mut exercise = value
            .exercise
            .into_iter()
            .filter_map(|exercise| match exercise {
                ScheduleExercise::Id(id) => Some(domain::ScheduleExercise::Id(
                    domain::ExerciseID::from(String::from(id)),
                )),
                ScheduleExercise::Legacy(values) => Some(domain::ScheduleExercise::Legacy(
                    values
                        .into_iter()
                        .map(|value| match value {
                            serde_json::Value::String(text) => text,
                            value => value.to_string(),
                        })
                        .collect(),
                )),
                ScheduleExercise::Missing(()) => None,
            })
            .collect::<Vec<_>>();
        if exercise.is_empty() {
            if let Some(name) = value.name {
                exercise.push(domain::ScheduleExercise::Legacy(vec![name]));
            }
        }
        Ok(domain::ScheduleItem {
            muscle_group: value
                .muscle_group
                .iter()
                .filter(|group| !group.trim().is_empty())
                .map(|group| domain::MuscleGroup::new(group))
                .collect::<Result<Vec<_>, _>>()?,
            exercise,
            sets: value.sets.map(domain::Sets::new).transpose()?,
            reps: value.reps.map(domain::Reps::new).transpose()?,
            weight: value.weight.map(domain::WeightSpec::try_from).transpose()?,
        })
    }
}

fn deserialize_one_or_many<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Nothing(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
        OneOrMany::Nothing(()) => vec![],
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::tests::data::{
        EXERCISE, LEGACY_WORKOUT_PLAN, WORKOUT_PLAN, WORKOUT_SESSION, legacy_workout_plan_json,
        workout_plan_json,
    };

    #[rstest]
    #[case(json!(7), JsonID::Number(7))]
    #[case(json!("7"), JsonID::Text("7".to_string()))]
    #[case(json!("a1b2"), JsonID::Text("a1b2".to_string()))]
    fn test_json_id_deserialize(#[case] value: serde_json::Value, #[case] expected: JsonID) {
        assert_eq!(serde_json::from_value::<JsonID>(value).unwrap(), expected);
    }

    #[rstest]
    #[case("42", json!(42))]
    #[case("a1b2", json!("a1b2"))]
    #[case("", json!(""))]
    fn test_json_id_keeps_numeric_type(#[case] id: &str, #[case] expected: serde_json::Value) {
        assert_eq!(serde_json::to_value(JsonID::from(id)).unwrap(), expected);
    }

    #[test]
    fn test_exercise_try_from() {
        let exercise: Exercise = serde_json::from_value(json!({
            "id": 4,
            "display_name": "Front Squat",
            "muscle_group": "Quads",
            "major_muscle_group": "LEGS",
            "url": "https://example.org/front-squat"
        }))
        .unwrap();

        assert_eq!(domain::Exercise::try_from(exercise).unwrap(), *EXERCISE);
    }

    #[test]
    fn test_exercise_without_optional_fields() {
        let exercise: Exercise = serde_json::from_value(json!({
            "id": "abc",
            "display_name": "Plank",
            "muscle_group": "Abs"
        }))
        .unwrap();

        let exercise = domain::Exercise::try_from(exercise).unwrap();

        assert_eq!(exercise.id, domain::ExerciseID::from("abc"));
        assert_eq!(exercise.major_muscle_group, None);
        assert_eq!(exercise.url, None);
    }

    #[test]
    fn test_exercise_with_empty_muscle_group() {
        let exercise: Exercise = serde_json::from_value(json!({
            "id": 1,
            "display_name": "Plank",
            "muscle_group": " "
        }))
        .unwrap();

        assert_eq!(
            domain::Exercise::try_from(exercise),
            Err(ConversionError::InvalidMuscleGroup(
                domain::MuscleGroupError::Empty
            ))
        );
    }

    #[test]
    fn test_workout_session_serialize() {
        assert_eq!(
            serde_json::to_value(WorkoutSession::from(WORKOUT_SESSION.clone())).unwrap(),
            json!({
                "id": 7,
                "user_id": "alice",
                "session_date": "2024-03-01",
                "exercises": [
                    {
                        "exercise": 1,
                        "sets": 3,
                        "reps": 10,
                        "weight": { "value": 60.0, "unit": "kg" }
                    },
                    {
                        "exercise": 4,
                        "sets": 5,
                        "reps": 5,
                        "weight": null
                    }
                ]
            })
        );
    }

    #[rstest]
    #[case::id("id")]
    #[case::workout_id("workout_id")]
    #[case::session_id("session_id")]
    fn test_workout_session_id_aliases(#[case] key: &str) {
        let mut value = json!({
            "user_id": "alice",
            "session_date": "2024-03-01",
            "exercises": [
                { "exercise": 1, "sets": 3, "reps": 10, "weight": { "value": 60, "unit": "kg" } },
                { "exercise": 4, "sets": 5, "reps": 5, "weight": null }
            ]
        });
        value[key] = json!(7);

        let session: WorkoutSession = serde_json::from_value(value).unwrap();

        assert_eq!(
            domain::WorkoutSession::try_from(session).unwrap(),
            *WORKOUT_SESSION
        );
    }

    #[test]
    fn test_legacy_exercise_log_entry() {
        let entry: ExerciseLogEntry = serde_json::from_value(json!({
            "exercise": "Bench Press",
            "sets": 3,
            "reps": 10,
            "weight_kg": 62.5
        }))
        .unwrap();

        assert_eq!(
            domain::ExerciseLogEntry::try_from(entry).unwrap(),
            domain::ExerciseLogEntry {
                exercise: domain::ExerciseRef::Name("Bench Press".to_string()),
                sets: domain::Sets::new(3).unwrap(),
                reps: domain::Reps::new(10).unwrap(),
                weight: Some(domain::WeightSpec {
                    value: domain::Weight::new(62.5).unwrap(),
                    unit: domain::WeightUnit::Kg,
                }),
            }
        );
    }

    #[rstest]
    #[case(json!({ "exercise": 1, "sets": 0, "reps": 10 }), ConversionError::InvalidSets(domain::SetsError::OutOfRange))]
    #[case(json!({ "exercise": 1, "sets": 3, "reps": 0 }), ConversionError::InvalidReps(domain::RepsError::OutOfRange))]
    #[case(
        json!({ "exercise": 1, "sets": 3, "reps": 10, "weight": { "value": 10, "unit": "stone" } }),
        ConversionError::InvalidWeightUnit("stone".to_string())
    )]
    fn test_invalid_exercise_log_entry(
        #[case] value: serde_json::Value,
        #[case] expected: ConversionError,
    ) {
        let entry: ExerciseLogEntry = serde_json::from_value(value).unwrap();

        assert_eq!(domain::ExerciseLogEntry::try_from(entry), Err(expected));
    }

    #[test]
    fn test_workout_plan_serialize() {
        assert_eq!(
            serde_json::to_value(WorkoutPlan::from(WORKOUT_PLAN.clone())).unwrap(),
            workout_plan_json()
        );
    }

    #[test]
    fn test_workout_plan_deserialize() {
        let plan: WorkoutPlan = serde_json::from_value(workout_plan_json()).unwrap();

        assert_eq!(domain::WorkoutPlan::try_from(plan).unwrap(), *WORKOUT_PLAN);
    }

    #[test]
    fn test_legacy_workout_plan_deserialize() {
        let plan: WorkoutPlan = serde_json::from_value(legacy_workout_plan_json()).unwrap();

        assert_eq!(
            domain::WorkoutPlan::try_from(plan).unwrap(),
            *LEGACY_WORKOUT_PLAN
        );
    }

    #[rstest]
    #[case(json!(4), 4)]
    #[case(json!("4"), 4)]
    #[case(json!(" 5 "), 5)]
    #[case(json!(""), 0)]
    #[case(json!(null), 0)]
    fn test_days_per_week(#[case] value: serde_json::Value, #[case] expected: u32) {
        let summary: PlanSummary =
            serde_json::from_value(json!({ "days_per_week": value })).unwrap();

        assert_eq!(summary.days_per_week, expected);
    }

    #[test]
    fn test_days_per_week_invalid() {
        assert!(serde_json::from_value::<PlanSummary>(json!({ "days_per_week": "often" })).is_err());
    }

    #[test]
    fn test_schedule_ignores_unknown_keys() {
        let schedule: Schedule = serde_json::from_value(json!({
            "schedule_id": "s1",
            "Monday": [{ "muscle_group": ["Chest"], "exercise": [1] }],
            "notes": "push/pull",
            "Caturday": []
        }))
        .unwrap();

        let schedule = domain::WeekSchedule::try_from(schedule).unwrap();

        assert_eq!(schedule.id, Some(domain::ScheduleID::from("s1")));
        assert_eq!(schedule.day(domain::Weekday::Monday).len(), 1);
        assert!(schedule.day(domain::Weekday::Tuesday).is_empty());
        assert_eq!(schedule.days().count(), 7);
    }

    #[rstest]
    #[case::canonical(
        json!({ "muscle_group": ["Chest"], "exercise": [1], "sets": 3, "reps": 10 }),
        vec![domain::ScheduleExercise::Id(domain::ExerciseID::from(1))],
        false
    )]
    #[case::legacy(
        json!({ "muscle_group": ["Chest"], "exercise": [["Bench Press", "Chest"]] }),
        vec![domain::ScheduleExercise::Legacy(vec!["Bench Press".to_string(), "Chest".to_string()])],
        true
    )]
    #[case::oldest(
        json!({ "name": "Bench Press" }),
        vec![domain::ScheduleExercise::Legacy(vec!["Bench Press".to_string()])],
        true
    )]
    #[case::single_muscle_group(
        json!({ "muscle_group": "Chest", "exercise": ["b7"] }),
        vec![domain::ScheduleExercise::Id(domain::ExerciseID::from("b7"))],
        false
    )]
    fn test_schedule_item_shapes(
        #[case] value: serde_json::Value,
        #[case] expected: Vec<domain::ScheduleExercise>,
        #[case] legacy: bool,
    ) {
        let item: ScheduleItem = serde_json::from_value(value).unwrap();

        let item = domain::ScheduleItem::try_from(item).unwrap();

        assert_eq!(item.exercise, expected);
        assert_eq!(item.is_legacy(), legacy);
    }

    #[test]
    fn test_schedule_item_keeps_muscle_group_spelling() {
        let item: ScheduleItem = serde_json::from_value(json!({
            "muscle_group": ["QUADS"],
            "exercise": [4]
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(ScheduleItem::from(
                domain::ScheduleItem::try_from(item).unwrap()
            ))
            .unwrap(),
            json!({ "muscle_group": ["QUADS"], "exercise": [4] })
        );
    }

    #[test]
    fn test_schedule_day_keeps_every_item() {
        let schedule: Schedule = serde_json::from_value(json!({
            "Monday": [
                { "exercise": [1], "sets": 3 },
                { "exercise": [4], "sets": "3" }
            ],
            "Tuesday": [{ "muscle_group": ["Chest"], "exercise": [1], "sets": 3, "reps": 10 }]
        }))
        .unwrap();

        let schedule = domain::WeekSchedule::try_from(schedule).unwrap();

        assert_eq!(schedule.day(domain::Weekday::Monday).len(), 2);
        assert_eq!(schedule.day(domain::Weekday::Tuesday).len(), 1);
        assert_eq!(
            schedule.day(domain::Weekday::Monday)[1].sets,
            Some(domain::Sets::new(3).unwrap())
        );

        let saved = serde_json::to_value(Schedule::from(schedule)).unwrap();

        assert_eq!(saved["Monday"].as_array().map(Vec::len), Some(2));
        assert_eq!(saved["Monday"][1]["exercise"], json!([4]));
    }

    #[rstest]
    #[case::number(json!(3), Some(3))]
    #[case::text(json!("3"), Some(3))]
    #[case::padded_text(json!(" 3 "), Some(3))]
    #[case::float(json!(3.0), Some(3))]
    #[case::empty(json!(""), None)]
    #[case::null(json!(null), None)]
    fn test_schedule_item_sets(#[case] sets: serde_json::Value, #[case] expected: Option<u32>) {
        let item: ScheduleItem =
            serde_json::from_value(json!({ "exercise": [1], "sets": sets })).unwrap();

        assert_eq!(item.sets, expected);
    }

    #[test]
    fn test_schedule_item_with_text_values() {
        let item: ScheduleItem = serde_json::from_value(json!({
            "muscle_group": ["Chest"],
            "exercise": [null, 2],
            "reps": "8",
            "weight": { "value": "60", "unit": "kg" }
        }))
        .unwrap();

        let item = domain::ScheduleItem::try_from(item).unwrap();

        assert_eq!(
            item.exercise,
            vec![domain::ScheduleExercise::Id(domain::ExerciseID::from(2))]
        );
        assert_eq!(item.reps, Some(domain::Reps::new(8).unwrap()));
        assert_eq!(
            item.weight,
            Some(domain::WeightSpec {
                value: domain::Weight::new(60.0).unwrap(),
                unit: domain::WeightUnit::Kg,
            })
        );
    }

    #[test]
    fn test_schedule_with_unreadable_item() {
        let schedule: Schedule = serde_json::from_value(json!({
            "Monday": [
                { "exercise": [1], "sets": 3 },
                { "exercise": [4], "sets": "often" }
            ]
        }))
        .unwrap();

        assert!(matches!(
            domain::WeekSchedule::try_from(schedule),
            Err(ConversionError::InvalidScheduleItem { day, .. }) if day == "Monday"
        ));
    }

    #[test]
    fn test_schedule_with_non_list_day() {
        let schedule: Schedule = serde_json::from_value(json!({ "Monday": "rest" })).unwrap();

        assert_eq!(
            domain::WeekSchedule::try_from(schedule),
            Err(ConversionError::InvalidScheduleDay("Monday".to_string()))
        );
    }

    #[test]
    fn test_exercise_log_entry_with_text_counts() {
        let entry: ExerciseLogEntry = serde_json::from_value(json!({
            "exercise": 1,
            "sets": "3",
            "reps": 10.0,
            "weight": { "value": 60, "unit": "kg" }
        }))
        .unwrap();

        let entry = domain::ExerciseLogEntry::try_from(entry).unwrap();

        assert_eq!(entry.sets, domain::Sets::new(3).unwrap());
        assert_eq!(entry.reps, domain::Reps::new(10).unwrap());
    }

    #[test]
    fn test_convert_records_skips_invalid_records() {
        let mut out_of_range = workout_plan_json();
        out_of_range["workoutplan_id"] = json!(14);
        out_of_range["workoutplan_schedule"]["Monday"][0]["sets"] = json!(0);
        let records = vec![
            out_of_range,
            workout_plan_json(),
            json!({ "workoutplan_id": 15 }),
        ];

        let plans = convert_records::<WorkoutPlan, domain::WorkoutPlan>(records, "workout plan");

        assert_eq!(plans, vec![WORKOUT_PLAN.clone()]);
    }

    #[test]
    fn test_error_body() {
        let body: ErrorBody =
            serde_json::from_value(json!({ "detail": "Username already registered" })).unwrap();

        assert_eq!(body.detail, json!("Username already registered"));
    }

    #[test]
    fn test_registration() {
        assert_eq!(
            serde_json::to_value(Registration::from(
                domain::Credentials::new("alice", "secret").unwrap()
            ))
            .unwrap(),
            json!({ "username": "alice", "password": "secret" })
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    mod wasm {
        use std::cell::RefCell;

        use pretty_assertions::assert_eq;
        use wasm_bindgen_test::wasm_bindgen_test;

        use gymlog_domain::{
            ExerciseRepository, SessionRepository, WorkoutPlanRepository,
            WorkoutSessionRepository,
        };

        use super::super::*;
        use crate::tests::data::{
            EXERCISE, TOKEN, WORKOUT_PLAN, WORKOUT_SESSION, muscle_group, workout_plan_json,
        };

        #[wasm_bindgen_test]
        async fn test_read_exercises() {
            let rest = rest_with_response(Some(
                Response::builder()
                    .status(200)
                    .json(&vec![Exercise::from(EXERCISE.clone())]),
            ));

            assert_eq!(
                rest.read_exercises(Some(muscle_group("QUADS"))).await.unwrap(),
                vec![EXERCISE.clone()]
            );
            assert_eq!(
                rest.sender.request.borrow().as_ref().unwrap().url(),
                "http://127.0.0.1:8000/exercises/?muscle_group=Quads"
            );
        }

        #[wasm_bindgen_test]
        async fn test_read_exercises_no_connection() {
            assert!(matches!(
                rest_with_response(None).read_exercises(None).await,
                Err(domain::ReadError::Storage(domain::StorageError::NoConnection))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_exercises_error_detail() {
            let result = rest_with_response(Some(
                Response::builder()
                    .status(404)
                    .json(&serde_json::json!({ "detail": "Muscle group not found" })),
            ))
            .read_exercises(None)
            .await;

            assert!(matches!(
                result,
                Err(domain::ReadError::Storage(domain::StorageError::Api(ref detail)))
                    if detail == "Muscle group not found"
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_exercises_error_fallback() {
            let result = rest_with_response(Some(
                Response::builder()
                    .status(500)
                    .body(Some("Internal Server Error")),
            ))
            .read_exercises(None)
            .await;

            assert!(matches!(
                result,
                Err(domain::ReadError::Storage(domain::StorageError::Api(ref detail)))
                    if detail == "Failed to fetch exercises"
            ));
        }

        #[wasm_bindgen_test]
        async fn test_read_current_user_unauthorized() {
            let result = rest_with_response(Some(
                Response::builder().status(401).body::<Option<&str>>(None),
            ))
            .read_current_user(&TOKEN)
            .await;

            assert!(matches!(
                result,
                Err(domain::ReadError::Storage(domain::StorageError::Unauthorized))
            ));
        }

        #[wasm_bindgen_test]
        async fn test_request_token() {
            let rest = rest_with_response(Some(
                Response::builder()
                    .status(200)
                    .json(&serde_json::json!({ "access_token": "abc", "token_type": "bearer" })),
            ));

            assert_eq!(
                rest.request_token(domain::Credentials::new("alice", "secret").unwrap())
                    .await
                    .unwrap(),
                domain::Token::new("abc")
            );
            assert_eq!(
                rest.sender.request.borrow().as_ref().unwrap().url(),
                "http://127.0.0.1:8000/token"
            );
        }

        #[wasm_bindgen_test]
        async fn test_create_workout_session() {
            let rest = rest_with_response(Some(
                Response::builder()
                    .status(200)
                    .json(&WorkoutSession::from(WORKOUT_SESSION.clone())),
            ));

            assert_eq!(
                rest.create_workout_session(
                    &TOKEN,
                    domain::WorkoutSession {
                        id: None,
                        ..WORKOUT_SESSION.clone()
                    }
                )
                .await
                .unwrap(),
                *WORKOUT_SESSION
            );
            assert_eq!(
                rest.sender
                    .request
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .headers()
                    .get("Authorization"),
                Some("Bearer token".to_string())
            );
        }

        #[wasm_bindgen_test]
        async fn test_delete_workout_session() {
            let rest = rest_with_response(Some(
                Response::builder().status(204).body::<Option<&str>>(None),
            ));

            assert_eq!(
                rest.delete_workout_session(&TOKEN, domain::WorkoutID::from(7))
                    .await
                    .unwrap(),
                domain::WorkoutID::from(7)
            );
            assert_eq!(
                rest.sender.request.borrow().as_ref().unwrap().url(),
                "http://127.0.0.1:8000/workouts/7"
            );
        }

        #[wasm_bindgen_test]
        async fn test_read_workout_plans() {
            assert_eq!(
                rest_with_response(Some(
                    Response::builder()
                        .status(200)
                        .json(&serde_json::json!([workout_plan_json()])),
                ))
                .read_workout_plans(&TOKEN)
                .await
                .unwrap(),
                vec![WORKOUT_PLAN.clone()]
            );
        }

        #[wasm_bindgen_test]
        async fn test_replace_workout_plan() {
            let rest = rest_with_response(Some(
                Response::builder()
                    .status(200)
                    .json(&workout_plan_json()),
            ));

            assert_eq!(
                rest.replace_workout_plan(&TOKEN, WORKOUT_PLAN.clone())
                    .await
                    .unwrap(),
                *WORKOUT_PLAN
            );
            assert_eq!(
                rest.sender.request.borrow().as_ref().unwrap().url(),
                "http://127.0.0.1:8000/workoutplans/12/"
            );
        }

        #[wasm_bindgen_test]
        async fn test_replace_workout_plan_without_id() {
            let result = rest_with_response(None)
                .replace_workout_plan(
                    &TOKEN,
                    domain::WorkoutPlan {
                        id: None,
                        ..WORKOUT_PLAN.clone()
                    },
                )
                .await;

            assert!(matches!(result, Err(domain::UpdateError::Other(_))));
        }

        #[wasm_bindgen_test]
        async fn test_delete_workout_plan_error() {
            let result = rest_with_response(Some(
                Response::builder()
                    .status(404)
                    .json(&serde_json::json!({ "detail": "Workout plan not found" })),
            ))
            .delete_workout_plan(&TOKEN, domain::WorkoutPlanID::from(12))
            .await;

            assert!(matches!(
                result,
                Err(domain::DeleteError::Storage(domain::StorageError::Api(ref detail)))
                    if detail == "Workout plan not found"
            ));
        }

        fn rest_with_response(
            response: Option<Result<Response, gloo_net::Error>>,
        ) -> REST<MockSendRequest> {
            REST::with_sender(
                "http://127.0.0.1:8000/",
                MockSendRequest {
                    request: RefCell::new(None),
                    response: RefCell::new(response),
                },
            )
        }

        struct MockSendRequest {
            request: RefCell<Option<Request>>,
            response: RefCell<Option<Result<Response, gloo_net::Error>>>,
        }

        impl SendRequest for MockSendRequest {
            async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
                *self.request.borrow_mut() = Some(request);
                (*self.response.borrow_mut())
                    .take()
                    .unwrap_or(Err(gloo_net::Error::GlooError("no response".to_string())))
            }
        }
    }
}

use gymlog_domain::SubListSource;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

/// Client configuration.
///
/// Fields missing in stored settings take their default value, so settings written by earlier
/// versions stay readable.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub recent_workouts_limit: usize,
    pub muscle_group_source: MuscleGroupSource,
}

impl Settings {
    #[must_use]
    pub fn sub_list_source(&self) -> SubListSource {
        self.muscle_group_source.into()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url().to_string(),
            recent_workouts_limit: 5,
            muscle_group_source: MuscleGroupSource::Catalog,
        }
    }
}

#[must_use]
pub const fn default_api_base_url() -> &'static str {
    if cfg!(debug_assertions) {
        "http://127.0.0.1:8000"
    } else {
        "/api"
    }
}

/// Where the muscle groups of a major muscle group are taken from.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuscleGroupSource {
    Api,
    Catalog,
}

impl From<MuscleGroupSource> for SubListSource {
    fn from(value: MuscleGroupSource) -> Self {
        match value {
            MuscleGroupSource::Api => SubListSource::Api,
            MuscleGroupSource::Catalog => SubListSource::Catalog,
        }
    }
}

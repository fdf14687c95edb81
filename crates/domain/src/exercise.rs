use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use derive_more::{Deref, Display};

use crate::ReadError;

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(
        &self,
        muscle_group: Option<MuscleGroup>,
    ) -> Result<Vec<Exercise>, ReadError>;
    async fn get_major_muscle_groups(&self) -> Result<Vec<MajorMuscleGroup>, ReadError>;
    async fn get_muscle_groups(
        &self,
        major_muscle_group: MajorMuscleGroup,
    ) -> Result<Vec<MuscleGroup>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(
        &self,
        muscle_group: Option<MuscleGroup>,
    ) -> Result<Vec<Exercise>, ReadError>;
    async fn read_major_muscle_groups(&self) -> Result<Vec<MajorMuscleGroup>, ReadError>;
    async fn read_muscle_groups(
        &self,
        major_muscle_group: MajorMuscleGroup,
    ) -> Result<Vec<MuscleGroup>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub display_name: String,
    pub muscle_group: MuscleGroup,
    pub major_muscle_group: Option<MajorMuscleGroup>,
    pub url: Option<String>,
}

#[derive(Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ExerciseID {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Muscle group as used by the API, e.g. `QUADS` or `HIP_FLEXORS`.
///
/// Groups are compared by their canonical key (upper snake case), so `Quads`, `quads` and
/// `QUADS` are the same group. The spelling received from the API is kept and written back
/// unchanged.
#[derive(Debug, Clone)]
pub struct MuscleGroup {
    key: String,
    raw: String,
}

impl MuscleGroup {
    pub fn new(value: &str) -> Result<Self, MuscleGroupError> {
        let key = canonical_key(value);

        if key.is_empty() {
            return Err(MuscleGroupError::Empty);
        }

        Ok(Self {
            key,
            raw: value.trim().to_string(),
        })
    }

    pub(crate) fn from_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            raw: key.to_string(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Spelling expected by the `muscle_group` query parameter of the API.
    #[must_use]
    pub fn api_name(&self) -> String {
        api_capitalization(&self.key)
    }

    #[must_use]
    pub fn name(&self) -> String {
        display_label(&self.key)
    }
}

impl PartialEq for MuscleGroup {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for MuscleGroup {}

impl Hash for MuscleGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for MuscleGroup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MuscleGroup {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Coarse body region grouping several muscle groups, e.g. `LEGS`.
#[derive(Debug, Clone)]
pub struct MajorMuscleGroup {
    key: String,
    raw: String,
}

impl MajorMuscleGroup {
    pub fn new(value: &str) -> Result<Self, MuscleGroupError> {
        let key = canonical_key(value);

        if key.is_empty() {
            return Err(MuscleGroupError::Empty);
        }

        Ok(Self {
            key,
            raw: value.trim().to_string(),
        })
    }

    pub(crate) fn from_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            raw: key.to_string(),
        }
    }

    /// Bucket for muscle groups whose major muscle group is unknown.
    #[must_use]
    pub fn other() -> Self {
        Self::from_key("OTHER")
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn name(&self) -> String {
        display_label(&self.key)
    }
}

impl PartialEq for MajorMuscleGroup {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for MajorMuscleGroup {}

impl Hash for MajorMuscleGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for MajorMuscleGroup {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MajorMuscleGroup {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for MajorMuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleGroupError {
    #[error("Muscle group must not be empty")]
    Empty,
}

/// First letter uppercase, remainder lowercase (`QUADS` -> `Quads`).
#[must_use]
pub fn api_capitalization(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn canonical_key(value: &str) -> String {
    value
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

fn display_label(key: &str) -> String {
    key.split('_')
        .map(api_capitalization)
        .collect::<Vec<_>>()
        .join(" ")
}

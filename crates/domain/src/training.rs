use std::fmt;

use derive_more::{Deref, Display, Into};

use crate::ExerciseID;

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLogEntry {
    pub exercise: ExerciseRef,
    pub sets: Sets,
    pub reps: Reps,
    pub weight: Option<WeightSpec>,
}

/// Reference from a log entry to the exercise catalog.
///
/// Data written by earlier client revisions references exercises by their display name. Such
/// references are resolved once when the data is loaded, see
/// [`normalize_session_entries`](crate::normalize_session_entries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseRef {
    Id(ExerciseID),
    Name(String),
}

impl ExerciseRef {
    #[must_use]
    pub fn id(&self) -> Option<&ExerciseID> {
        match self {
            ExerciseRef::Id(id) => Some(id),
            ExerciseRef::Name(_) => None,
        }
    }
}

impl fmt::Display for ExerciseRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExerciseRef::Id(id) => write!(f, "{id}"),
            ExerciseRef::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Deref, Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..1000).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 999")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Deref, Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Deref, Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeightUnit {
    Kg,
    Lbs,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSpec {
    pub value: Weight,
    pub unit: WeightUnit,
}

impl fmt::Display for WeightSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

//! Weekly schedule of a workout plan and the migration of legacy schedule data.

use std::collections::BTreeMap;

use derive_more::{Deref, Display};
use log::{debug, warn};
use strum::IntoEnumIterator;

use crate::{
    Exercise, ExerciseID, ExerciseLogEntry, ExerciseRef, MuscleGroup, Reps, Sets, TaxonomyCache,
    WeightSpec,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Deref, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleID(String);

impl ScheduleID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ScheduleID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ScheduleID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ScheduleID {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleExercise {
    Id(ExerciseID),
    /// `[displayName, ...]` as written by earlier revisions of the plan editor.
    Legacy(Vec<String>),
}

impl From<ExerciseRef> for ScheduleExercise {
    fn from(value: ExerciseRef) -> Self {
        match value {
            ExerciseRef::Id(id) => ScheduleExercise::Id(id),
            ExerciseRef::Name(name) => ScheduleExercise::Legacy(vec![name]),
        }
    }
}

/// One exercise of a plan day.
///
/// The canonical shape has exactly one muscle group and one exercise id.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleItem {
    pub muscle_group: Vec<MuscleGroup>,
    pub exercise: Vec<ScheduleExercise>,
    pub sets: Option<Sets>,
    pub reps: Option<Reps>,
    pub weight: Option<WeightSpec>,
}

impl ScheduleItem {
    #[must_use]
    pub fn new(exercise: &Exercise) -> Self {
        Self {
            muscle_group: vec![exercise.muscle_group.clone()],
            exercise: vec![ScheduleExercise::Id(exercise.id.clone())],
            sets: None,
            reps: None,
            weight: None,
        }
    }

    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(self.exercise.first(), Some(ScheduleExercise::Legacy(_)))
    }

    #[must_use]
    pub fn exercise_ref(&self) -> Option<ExerciseRef> {
        match self.exercise.first()? {
            ScheduleExercise::Id(id) => Some(ExerciseRef::Id(id.clone())),
            ScheduleExercise::Legacy(names) => names.first().cloned().map(ExerciseRef::Name),
        }
    }

    /// Name for display, falling back to the raw reference if it is not part of the catalog.
    #[must_use]
    pub fn display_name(&self, cache: &TaxonomyCache) -> String {
        match self.exercise_ref() {
            Some(exercise) => cache
                .resolve(&exercise)
                .map_or_else(|| exercise.to_string(), |e| e.display_name.clone()),
            None => String::new(),
        }
    }
}

/// Exercises of a plan for each day of the week.
///
/// All seven days are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSchedule {
    pub id: Option<ScheduleID>,
    days: BTreeMap<Weekday, Vec<ScheduleItem>>,
}

impl Default for WeekSchedule {
    fn default() -> Self {
        Self::new(None)
    }
}

impl WeekSchedule {
    #[must_use]
    pub fn new(id: Option<ScheduleID>) -> Self {
        Self {
            id,
            days: Weekday::iter().map(|day| (day, vec![])).collect(),
        }
    }

    /// Creates a schedule from the given days. Missing days are empty.
    #[must_use]
    pub fn from_days(
        id: Option<ScheduleID>,
        days: impl IntoIterator<Item = (Weekday, Vec<ScheduleItem>)>,
    ) -> Self {
        let mut schedule = Self::new(id);
        for (day, items) in days {
            schedule.days.insert(day, items);
        }
        schedule
    }

    #[must_use]
    pub fn day(&self, day: Weekday) -> &[ScheduleItem] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn set_day(&mut self, day: Weekday, items: Vec<ScheduleItem>) {
        self.days.insert(day, items);
    }

    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[ScheduleItem])> {
        self.days.iter().map(|(day, items)| (*day, items.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    #[must_use]
    pub fn has_legacy_items(&self) -> bool {
        self.days.values().flatten().any(ScheduleItem::is_legacy)
    }
}

/// Converts legacy items into the canonical shape.
///
/// Legacy items whose display name is unknown to the catalog are kept unchanged.
#[must_use]
pub fn normalize_schedule(schedule: WeekSchedule, cache: &TaxonomyCache) -> WeekSchedule {
    let WeekSchedule { id, days } = schedule;
    WeekSchedule::from_days(
        id,
        days.into_iter().map(|(day, items)| {
            (
                day,
                items
                    .into_iter()
                    .map(|item| normalize_item(item, cache))
                    .collect(),
            )
        }),
    )
}

#[must_use]
pub fn normalize_item(item: ScheduleItem, cache: &TaxonomyCache) -> ScheduleItem {
    let Some(ScheduleExercise::Legacy(names)) = item.exercise.first() else {
        return item;
    };
    let Some(name) = names.first() else {
        warn!("schedule item without exercise name");
        return item;
    };
    match cache.exercise_by_name(name) {
        Some(exercise) => ScheduleItem {
            sets: item.sets,
            reps: item.reps,
            weight: item.weight,
            ..ScheduleItem::new(exercise)
        },
        None => {
            debug!("unresolved exercise name \"{name}\" in schedule");
            item
        }
    }
}

/// Replaces exercise names of session entries by the ids of the catalog.
///
/// Names that are unknown to the catalog are tried as ids before they are kept unchanged.
#[must_use]
pub fn normalize_session_entries(
    entries: Vec<ExerciseLogEntry>,
    cache: &TaxonomyCache,
) -> Vec<ExerciseLogEntry> {
    entries
        .into_iter()
        .map(|entry| {
            let ExerciseRef::Name(name) = &entry.exercise else {
                return entry;
            };
            let resolved = cache
                .exercise_by_name(name)
                .or_else(|| cache.exercise(&ExerciseID::from(name.trim())));
            match resolved {
                Some(exercise) => ExerciseLogEntry {
                    exercise: ExerciseRef::Id(exercise.id.clone()),
                    ..entry
                },
                None => {
                    debug!("unresolved exercise name \"{name}\" in workout session");
                    entry
                }
            }
        })
        .collect()
}

//! Editable list of log entries with add, edit-in-place and remove.

use crate::{
    ExerciseLogEntry, ExerciseRef, MuscleGroup, Reps, RepsError, ScheduleItem, Sets, SetsError,
    Weight, WeightError, WeightSpec, WeightUnit,
};

/// Entry that can be built from the input fields of a [`LogComposer`] and loaded back into them.
pub trait Composable: Sized {
    fn compose(draft: &Draft) -> Result<Self, ComposerError>;
    fn draft(&self) -> Draft;
}

/// Current content of the input fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub exercise: Option<ExerciseRef>,
    pub muscle_group: Option<MuscleGroup>,
    pub sets: String,
    pub reps: String,
    pub weight: String,
    pub unit: Option<WeightUnit>,
}

impl Draft {
    /// Parses the weight fields. An empty weight means no weight.
    pub fn weight_spec(&self) -> Result<Option<WeightSpec>, ComposerError> {
        if self.weight.trim().is_empty() {
            return Ok(None);
        }
        let value = Weight::try_from(self.weight.as_str())?;
        let Some(unit) = self.unit else {
            return Err(ComposerError::NoUnit);
        };
        Ok(Some(WeightSpec { value, unit }))
    }

    fn exercise(&self) -> Result<ExerciseRef, ComposerError> {
        self.exercise.clone().ok_or(ComposerError::NoExercise)
    }

    fn optional_sets(&self) -> Result<Option<Sets>, ComposerError> {
        if self.sets.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Sets::try_from(self.sets.as_str())?))
    }

    fn optional_reps(&self) -> Result<Option<Reps>, ComposerError> {
        if self.reps.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Reps::try_from(self.reps.as_str())?))
    }

    fn set_weight(&mut self, weight: Option<&WeightSpec>) {
        match weight {
            Some(weight) => {
                self.weight = weight.value.to_string();
                self.unit = Some(weight.unit);
            }
            None => {
                self.weight = String::new();
                self.unit = None;
            }
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ComposerError {
    #[error("Please select an exercise")]
    NoExercise,
    #[error(transparent)]
    Sets(#[from] SetsError),
    #[error(transparent)]
    Reps(#[from] RepsError),
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error("Please select a weight unit")]
    NoUnit,
    #[error("No entry at position {0}")]
    InvalidIndex(usize),
}

impl Composable for ExerciseLogEntry {
    fn compose(draft: &Draft) -> Result<Self, ComposerError> {
        let exercise = draft.exercise()?;
        let sets = Sets::try_from(draft.sets.as_str())?;
        let reps = Reps::try_from(draft.reps.as_str())?;
        let weight = draft.weight_spec()?;
        Ok(ExerciseLogEntry {
            exercise,
            sets,
            reps,
            weight,
        })
    }

    fn draft(&self) -> Draft {
        let mut draft = Draft {
            exercise: Some(self.exercise.clone()),
            muscle_group: None,
            sets: self.sets.to_string(),
            reps: self.reps.to_string(),
            ..Draft::default()
        };
        draft.set_weight(self.weight.as_ref());
        draft
    }
}

impl Composable for ScheduleItem {
    fn compose(draft: &Draft) -> Result<Self, ComposerError> {
        let exercise = draft.exercise()?;
        let sets = draft.optional_sets()?;
        let reps = draft.optional_reps()?;
        let weight = draft.weight_spec()?;
        Ok(ScheduleItem {
            muscle_group: draft.muscle_group.iter().cloned().collect(),
            exercise: vec![exercise.into()],
            sets,
            reps,
            weight,
        })
    }

    fn draft(&self) -> Draft {
        let mut draft = Draft {
            exercise: self.exercise_ref(),
            muscle_group: self.muscle_group.first().cloned(),
            sets: self.sets.map(|sets| sets.to_string()).unwrap_or_default(),
            reps: self.reps.map(|reps| reps.to_string()).unwrap_or_default(),
            ..Draft::default()
        };
        draft.set_weight(self.weight.as_ref());
        draft
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Adding,
    Editing(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogComposer<E> {
    entries: Vec<E>,
    pub draft: Draft,
    mode: Mode,
}

impl<E> Default for LogComposer<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            draft: Draft::default(),
            mode: Mode::Adding,
        }
    }
}

impl<E: Composable + Clone> LogComposer<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: Vec<E>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends the draft, or replaces the edited entry in editing mode.
    ///
    /// The draft is kept if it is invalid.
    pub fn submit(&mut self) -> Result<(), ComposerError> {
        let entry = E::compose(&self.draft)?;
        match self.mode {
            Mode::Adding => self.entries.push(entry),
            Mode::Editing(index) => {
                let Some(existing) = self.entries.get_mut(index) else {
                    return Err(ComposerError::InvalidIndex(index));
                };
                *existing = entry;
            }
        }
        self.draft = Draft::default();
        self.mode = Mode::Adding;
        Ok(())
    }

    pub fn edit(&mut self, index: usize) -> Result<(), ComposerError> {
        let entry = self
            .entries
            .get(index)
            .ok_or(ComposerError::InvalidIndex(index))?;
        self.draft = entry.draft();
        self.mode = Mode::Editing(index);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        if let Mode::Editing(_) = self.mode {
            self.draft = Draft::default();
            self.mode = Mode::Adding;
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<E> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        if let Mode::Editing(edited) = self.mode {
            if edited == index {
                self.draft = Draft::default();
                self.mode = Mode::Adding;
            } else if edited > index {
                self.mode = Mode::Editing(edited - 1);
            }
        }
        Some(entry)
    }

    /// Replaces all entries and abandons a pending edit.
    pub fn load(&mut self, entries: Vec<E>) {
        self.entries = entries;
        self.draft = Draft::default();
        self.mode = Mode::Adding;
    }

    pub fn take_entries(&mut self) -> Vec<E> {
        let entries = std::mem::take(&mut self.entries);
        self.reset();
        entries
    }

    pub fn reset(&mut self) {
        self.load(Vec::new());
    }
}

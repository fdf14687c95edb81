//! Dependent selection of major muscle group, muscle group and exercise.
//!
//! Every selection change that needs remote data returns a [`FilterRequest`]. The caller performs
//! it (see [`fetch`]) and hands the resulting [`FilterResponse`] back to [`FilterChain::apply`].
//! Requests are tagged with a [`Ticket`]; responses to requests that were superseded by a later
//! selection are discarded on arrival.

use log::debug;

use crate::{
    Exercise, ExerciseID, ExerciseService, MajorMuscleGroup, MuscleGroup, TaxonomyCache,
};

/// Source of the muscle-group sub-list of a selected major muscle group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubListSource {
    #[default]
    Api,
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    MajorSelected,
    MajorAndMinorSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    major_muscle_group: Option<MajorMuscleGroup>,
    muscle_group: Option<MuscleGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRequest {
    MajorMuscleGroups {
        ticket: Ticket,
    },
    MuscleGroups {
        ticket: Ticket,
        major_muscle_group: MajorMuscleGroup,
    },
    Exercises {
        ticket: Ticket,
        muscle_group: Option<MuscleGroup>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterResponse {
    MajorMuscleGroups {
        ticket: Ticket,
        result: Result<Vec<MajorMuscleGroup>, String>,
    },
    MuscleGroups {
        ticket: Ticket,
        result: Result<Vec<MuscleGroup>, String>,
    },
    Exercises {
        ticket: Ticket,
        result: Result<Vec<Exercise>, String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Please select a major muscle group first")]
    NoMajorMuscleGroup,
    #[error("Exercise is not part of the current selection")]
    UnknownExercise,
}

/// Fetched options of one filter level.
#[derive(Debug, Clone, PartialEq)]
pub struct Options<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for Options<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> Options<T> {
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

    fn invalidate(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.loading = false;
        self.error = None;
    }

    fn start(&mut self) -> u64 {
        self.invalidate();
        self.loading = true;
        self.generation
    }

    fn finish(&mut self, result: Result<Vec<T>, String>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(err) => self.error = Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    source: SubListSource,
    major_muscle_group: Option<MajorMuscleGroup>,
    muscle_group: Option<MuscleGroup>,
    exercise: Option<ExerciseID>,
    major_muscle_groups: Options<MajorMuscleGroup>,
    muscle_groups: Options<MuscleGroup>,
    exercises: Options<Exercise>,
}

impl FilterChain {
    #[must_use]
    pub fn new(source: SubListSource) -> Self {
        Self {
            source,
            major_muscle_group: None,
            muscle_group: None,
            exercise: None,
            major_muscle_groups: Options::default(),
            muscle_groups: Options::default(),
            exercises: Options::default(),
        }
    }

    /// Populates the major muscle groups and the unfiltered exercise list.
    pub fn init(&mut self, cache: &TaxonomyCache) -> Vec<FilterRequest> {
        let mut requests = vec![];
        match self.source {
            SubListSource::Api => {
                let generation = self.major_muscle_groups.start();
                requests.push(FilterRequest::MajorMuscleGroups {
                    ticket: self.ticket(generation),
                });
            }
            SubListSource::Catalog => {
                self.major_muscle_groups.invalidate();
                self.major_muscle_groups
                    .finish(Ok(cache.taxonomy().major_muscle_groups()));
            }
        }
        requests.extend(self.request_exercises());
        requests
    }

    #[must_use]
    pub fn source(&self) -> SubListSource {
        self.source
    }

    #[must_use]
    pub fn state(&self) -> FilterState {
        match (&self.major_muscle_group, &self.muscle_group) {
            (None, _) => FilterState::Unfiltered,
            (Some(_), None) => FilterState::MajorSelected,
            (Some(_), Some(_)) => FilterState::MajorAndMinorSelected,
        }
    }

    #[must_use]
    pub fn major_muscle_group(&self) -> Option<&MajorMuscleGroup> {
        self.major_muscle_group.as_ref()
    }

    #[must_use]
    pub fn muscle_group(&self) -> Option<&MuscleGroup> {
        self.muscle_group.as_ref()
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&ExerciseID> {
        self.exercise.as_ref()
    }

    #[must_use]
    pub fn selected_exercise(&self) -> Option<&Exercise> {
        self.exercise
            .as_ref()
            .and_then(|id| self.exercises.items.iter().find(|e| e.id == *id))
    }

    #[must_use]
    pub fn major_muscle_groups(&self) -> &Options<MajorMuscleGroup> {
        &self.major_muscle_groups
    }

    #[must_use]
    pub fn muscle_groups(&self) -> &Options<MuscleGroup> {
        &self.muscle_groups
    }

    #[must_use]
    pub fn exercises(&self) -> &Options<Exercise> {
        &self.exercises
    }

    /// Changes the major muscle group and collapses all dependent selections.
    ///
    /// Selecting the current value again has no effect.
    pub fn select_major_muscle_group(
        &mut self,
        major_muscle_group: Option<MajorMuscleGroup>,
        cache: &TaxonomyCache,
    ) -> Vec<FilterRequest> {
        if self.major_muscle_group == major_muscle_group {
            return vec![];
        }

        self.major_muscle_group = major_muscle_group;
        self.muscle_group = None;
        self.exercise = None;
        self.muscle_groups.invalidate();
        self.exercises.invalidate();

        let Some(major) = self.major_muscle_group.clone() else {
            return self.request_exercises();
        };

        match self.source {
            SubListSource::Api => {
                let generation = self.muscle_groups.start();
                vec![FilterRequest::MuscleGroups {
                    ticket: self.ticket(generation),
                    major_muscle_group: major,
                }]
            }
            SubListSource::Catalog => {
                self.muscle_groups
                    .finish(Ok(cache.taxonomy().muscle_groups(&major)));
                vec![]
            }
        }
    }

    /// Changes the muscle group, resets the exercise selection and re-queries the exercises.
    ///
    /// Selecting the current value again has no effect.
    pub fn select_muscle_group(
        &mut self,
        muscle_group: Option<MuscleGroup>,
    ) -> Result<Vec<FilterRequest>, FilterError> {
        if self.muscle_group == muscle_group {
            return Ok(vec![]);
        }

        if muscle_group.is_some() && self.major_muscle_group.is_none() {
            return Err(FilterError::NoMajorMuscleGroup);
        }

        self.muscle_group = muscle_group;
        self.exercise = None;

        if self.muscle_group.is_none() {
            self.exercises.invalidate();
            return Ok(vec![]);
        }

        Ok(self.request_exercises())
    }

    pub fn select_exercise(&mut self, exercise: Option<ExerciseID>) -> Result<(), FilterError> {
        if let Some(id) = &exercise {
            if !self.exercises.items.iter().any(|e| e.id == *id) {
                return Err(FilterError::UnknownExercise);
            }
        }
        self.exercise = exercise;
        Ok(())
    }

    /// Applies a response unless a newer request of the same level has been issued since.
    pub fn apply(&mut self, response: FilterResponse) -> Applied {
        match response {
            FilterResponse::MajorMuscleGroups { ticket, result } => {
                if ticket.generation != self.major_muscle_groups.generation {
                    return discard("major muscle groups");
                }
                self.major_muscle_groups.finish(result);
            }
            FilterResponse::MuscleGroups { ticket, result } => {
                if ticket.generation != self.muscle_groups.generation
                    || ticket.major_muscle_group != self.major_muscle_group
                {
                    return discard("muscle groups");
                }
                self.muscle_groups.finish(result);
            }
            FilterResponse::Exercises { ticket, result } => {
                if ticket.generation != self.exercises.generation
                    || ticket.major_muscle_group != self.major_muscle_group
                    || ticket.muscle_group != self.muscle_group
                {
                    return discard("exercises");
                }
                self.exercises.finish(result);
                self.exercise = self.exercises.items.first().map(|e| e.id.clone());
            }
        }
        Applied::Current
    }

    fn request_exercises(&mut self) -> Vec<FilterRequest> {
        let generation = self.exercises.start();
        vec![FilterRequest::Exercises {
            ticket: self.ticket(generation),
            muscle_group: self.muscle_group.clone(),
        }]
    }

    fn ticket(&self, generation: u64) -> Ticket {
        Ticket {
            generation,
            major_muscle_group: self.major_muscle_group.clone(),
            muscle_group: self.muscle_group.clone(),
        }
    }
}

fn discard(what: &str) -> Applied {
    debug!("discarded stale response for {what}");
    Applied::Stale
}

/// Performs a filter request.
///
/// Failures are turned into the inline error message of the affected filter level.
pub async fn fetch<S: ExerciseService>(service: &S, request: FilterRequest) -> FilterResponse {
    match request {
        FilterRequest::MajorMuscleGroups { ticket } => FilterResponse::MajorMuscleGroups {
            ticket,
            result: service
                .get_major_muscle_groups()
                .await
                .map_err(|err| err.to_string()),
        },
        FilterRequest::MuscleGroups {
            ticket,
            major_muscle_group,
        } => FilterResponse::MuscleGroups {
            ticket,
            result: service
                .get_muscle_groups(major_muscle_group)
                .await
                .map_err(|err| err.to_string()),
        },
        FilterRequest::Exercises {
            ticket,
            muscle_group,
        } => FilterResponse::Exercises {
            ticket,
            result: service
                .get_exercises(muscle_group)
                .await
                .map_err(|err| err.to_string()),
        },
    }
}

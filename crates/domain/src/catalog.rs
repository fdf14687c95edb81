//! Exercise catalog of the current page session.
//!
//! The catalog is fetched on first need and kept until the cache is dropped. There is no
//! invalidation; a failed fetch keeps the previous state and records the error for display.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::{Exercise, ExerciseID, ExerciseRef, ExerciseService, MuscleGroup, MuscleGroupTaxonomy};

#[derive(Debug, Clone, Default)]
pub struct TaxonomyCache {
    exercises: Vec<Exercise>,
    by_id: BTreeMap<ExerciseID, usize>,
    by_name: HashMap<String, usize>,
    taxonomy: Option<MuscleGroupTaxonomy>,
    loaded: bool,
    loading: bool,
    error: Option<String>,
}

impl TaxonomyCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exercises(exercises: Vec<Exercise>) -> Self {
        let mut cache = Self::new();
        cache.load(exercises);
        cache
    }

    /// Fetches the full catalog unless it has been fetched before.
    ///
    /// Returns whether a catalog is available afterwards.
    pub async fn ensure_loaded<S: ExerciseService>(&mut self, service: &S) -> bool {
        if !self.loaded {
            self.refresh(service, None).await;
        }
        self.loaded
    }

    /// Fetches the catalog, optionally filtered by the API to one muscle group.
    pub async fn refresh<S: ExerciseService>(
        &mut self,
        service: &S,
        muscle_group: Option<MuscleGroup>,
    ) {
        self.loading = true;
        match service.get_exercises(muscle_group).await {
            Ok(exercises) => {
                self.load(exercises);
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn load(&mut self, exercises: Vec<Exercise>) {
        self.by_id = BTreeMap::new();
        self.by_name = HashMap::new();
        for (i, exercise) in exercises.iter().enumerate() {
            self.by_id.entry(exercise.id.clone()).or_insert(i);
            self.by_name
                .entry(name_key(&exercise.display_name))
                .or_insert(i);
        }
        debug!("loaded {} exercises into catalog", exercises.len());
        self.taxonomy = Some(MuscleGroupTaxonomy::derive(&exercises));
        self.exercises = exercises;
        self.loaded = true;
        self.error = None;
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    #[must_use]
    pub fn exercise(&self, id: &ExerciseID) -> Option<&Exercise> {
        self.by_id.get(id).map(|i| &self.exercises[*i])
    }

    /// Looks up an exercise by its display name, ignoring case and surrounding whitespace.
    ///
    /// If several exercises share a name, the first one of the catalog is returned.
    #[must_use]
    pub fn exercise_by_name(&self, name: &str) -> Option<&Exercise> {
        self.by_name.get(&name_key(name)).map(|i| &self.exercises[*i])
    }

    #[must_use]
    pub fn resolve(&self, exercise: &ExerciseRef) -> Option<&Exercise> {
        match exercise {
            ExerciseRef::Id(id) => self.exercise(id),
            ExerciseRef::Name(name) => self.exercise_by_name(name),
        }
    }

    #[must_use]
    pub fn filter(&self, muscle_group: &MuscleGroup) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.muscle_group == *muscle_group)
            .collect()
    }

    /// Taxonomy derived from the catalog, or the built-in table if nothing has been loaded.
    #[must_use]
    pub fn taxonomy(&self) -> MuscleGroupTaxonomy {
        self.taxonomy.clone().unwrap_or_default()
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

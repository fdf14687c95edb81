use std::collections::{BTreeMap, BTreeSet};

use crate::{Exercise, MajorMuscleGroup, MuscleGroup};

/// Muscle groups of the API grouped by major muscle group.
const MUSCLE_GROUPS: &[(&str, &[&str])] = &[
    ("ARMS", &["BICEPS", "FOREARMS", "PALMAR_FASCIA", "TRICEPS"]),
    ("BACK", &["LATS", "LOWER_BACK", "TRAPS", "UPPER_BACK"]),
    ("CHEST", &["CHEST"]),
    ("CORE", &["ABS", "HIP_FLEXORS", "OBLIQUES"]),
    (
        "LEGS",
        &[
            "ABDUCTORS",
            "ADDUCTORS",
            "CALVES",
            "GLUTES",
            "HAMSTRUNGS",
            "IT_BAND",
            "PLANTAR_FASCIA",
            "QUADS",
        ],
    ),
    ("SHOULDERS", &["NECK", "SHOULDERS"]),
];

/// Two-level classification: major muscle group -> muscle groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroupTaxonomy {
    groups: BTreeMap<MajorMuscleGroup, BTreeSet<MuscleGroup>>,
}

impl Default for MuscleGroupTaxonomy {
    fn default() -> Self {
        Self {
            groups: MUSCLE_GROUPS
                .iter()
                .map(|(major, groups)| {
                    (
                        MajorMuscleGroup::from_key(major),
                        groups.iter().map(|g| MuscleGroup::from_key(g)).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl MuscleGroupTaxonomy {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Extends the built-in table by the groups observed in the given exercises.
    ///
    /// Muscle groups without a major muscle group that are not part of the table are put into
    /// [`MajorMuscleGroup::other`].
    #[must_use]
    pub fn derive(exercises: &[Exercise]) -> Self {
        let mut taxonomy = Self::default();
        for exercise in exercises {
            match &exercise.major_muscle_group {
                Some(major) => taxonomy.insert(major.clone(), exercise.muscle_group.clone()),
                None => {
                    if taxonomy
                        .major_muscle_group_of(&exercise.muscle_group)
                        .is_none()
                    {
                        taxonomy.insert(MajorMuscleGroup::other(), exercise.muscle_group.clone());
                    }
                }
            }
        }
        taxonomy
    }

    pub fn insert(&mut self, major_muscle_group: MajorMuscleGroup, muscle_group: MuscleGroup) {
        self.groups
            .entry(major_muscle_group)
            .or_default()
            .insert(muscle_group);
    }

    #[must_use]
    pub fn major_muscle_groups(&self) -> Vec<MajorMuscleGroup> {
        self.groups.keys().cloned().collect()
    }

    #[must_use]
    pub fn muscle_groups(&self, major_muscle_group: &MajorMuscleGroup) -> Vec<MuscleGroup> {
        self.groups
            .get(major_muscle_group)
            .map(|groups| groups.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn all_muscle_groups(&self) -> BTreeSet<MuscleGroup> {
        self.groups.values().flatten().cloned().collect()
    }

    #[must_use]
    pub fn major_muscle_group_of(&self, muscle_group: &MuscleGroup) -> Option<&MajorMuscleGroup> {
        self.groups
            .iter()
            .find(|(_, groups)| groups.contains(muscle_group))
            .map(|(major, _)| major)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::data::{exercise, major, muscle};

    #[test]
    fn test_default() {
        let taxonomy = MuscleGroupTaxonomy::default();
        assert_eq!(
            taxonomy.major_muscle_groups(),
            vec![
                major("ARMS"),
                major("BACK"),
                major("CHEST"),
                major("CORE"),
                major("LEGS"),
                major("SHOULDERS")
            ]
        );
        assert_eq!(taxonomy.all_muscle_groups().len(), 22);
        assert_eq!(
            taxonomy.muscle_groups(&major("ARMS")),
            vec![
                muscle("BICEPS"),
                muscle("FOREARMS"),
                muscle("PALMAR_FASCIA"),
                muscle("TRICEPS")
            ]
        );
    }

    #[test]
    fn test_muscle_groups_of_unknown_major() {
        assert_eq!(
            MuscleGroupTaxonomy::default().muscle_groups(&major("TAIL")),
            vec![]
        );
    }

    #[test]
    fn test_major_muscle_group_of() {
        let taxonomy = MuscleGroupTaxonomy::default();
        assert_eq!(
            taxonomy.major_muscle_group_of(&muscle("Quads")),
            Some(&major("LEGS"))
        );
        assert_eq!(taxonomy.major_muscle_group_of(&muscle("TAIL")), None);
    }

    #[test]
    fn test_derive() {
        let mut grip = exercise(10, "Dead Hang", "GRIP");
        grip.major_muscle_group = None;
        let mut serratus = exercise(11, "Scap Push Up", "SERRATUS");
        serratus.major_muscle_group = Some(major("CHEST"));
        let mut quads = exercise(12, "Sissy Squat", "Quads");
        quads.major_muscle_group = None;

        let taxonomy = MuscleGroupTaxonomy::derive(&[grip, serratus, quads]);

        assert_eq!(
            taxonomy.muscle_groups(&major("CHEST")),
            vec![muscle("CHEST"), muscle("SERRATUS")]
        );
        assert_eq!(taxonomy.muscle_groups(&major("OTHER")), vec![muscle("GRIP")]);
        assert_eq!(
            taxonomy.major_muscle_group_of(&muscle("QUADS")),
            Some(&major("LEGS"))
        );
        assert_eq!(taxonomy.all_muscle_groups().len(), 24);
    }

    #[test]
    fn test_empty() {
        let mut taxonomy = MuscleGroupTaxonomy::empty();
        assert!(taxonomy.major_muscle_groups().is_empty());
        taxonomy.insert(major("LEGS"), muscle("QUADS"));
        assert_eq!(taxonomy.muscle_groups(&major("legs")), vec![muscle("QUADS")]);
    }
}

//! The built-in exercise catalog. Seeded into storage on database creation
//! and immutable during normal use.

use crate::MuscleGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogExercise {
    pub name: &'static str,
    pub muscle_group: MuscleGroup,
    pub image: &'static str,
}

pub static EXERCISES: &[CatalogExercise] = &[
    CatalogExercise {
        name: "Bench Press",
        muscle_group: MuscleGroup::Chest,
        image: "bench_press",
    },
    CatalogExercise {
        name: "Bicep Curl",
        muscle_group: MuscleGroup::Biceps,
        image: "bicep_curl",
    },
    CatalogExercise {
        name: "Calf Raise",
        muscle_group: MuscleGroup::Legs,
        image: "calf_raise",
    },
    CatalogExercise {
        name: "Crunches",
        muscle_group: MuscleGroup::Abs,
        image: "crunches",
    },
    CatalogExercise {
        name: "Deadlift",
        muscle_group: MuscleGroup::Back,
        image: "deadlift",
    },
    CatalogExercise {
        name: "Hammer Curl",
        muscle_group: MuscleGroup::Biceps,
        image: "hammer_curl",
    },
    CatalogExercise {
        name: "Lateral Raise",
        muscle_group: MuscleGroup::Shoulders,
        image: "lateral_raise",
    },
    CatalogExercise {
        name: "Leg Curl",
        muscle_group: MuscleGroup::Legs,
        image: "leg_curl",
    },
    CatalogExercise {
        name: "Leg Press",
        muscle_group: MuscleGroup::Legs,
        image: "leg_press",
    },
    CatalogExercise {
        name: "Overhead Press",
        muscle_group: MuscleGroup::Shoulders,
        image: "overhead_press",
    },
    CatalogExercise {
        name: "Plank",
        muscle_group: MuscleGroup::Abs,
        image: "plank",
    },
    CatalogExercise {
        name: "Pull Up",
        muscle_group: MuscleGroup::Back,
        image: "pull_up",
    },
    CatalogExercise {
        name: "Push Up",
        muscle_group: MuscleGroup::Chest,
        image: "push_up",
    },
    CatalogExercise {
        name: "Seated Shoulder Press",
        muscle_group: MuscleGroup::Shoulders,
        image: "seated_shoulder_press",
    },
    CatalogExercise {
        name: "Squat",
        muscle_group: MuscleGroup::Legs,
        image: "squat",
    },
    CatalogExercise {
        name: "Triceps Pushdown",
        muscle_group: MuscleGroup::Triceps,
        image: "triceps_pushdown",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use crate::Name;

    use super::*;

    #[test]
    fn test_exercises_are_sorted_and_unique() {
        let names = EXERCISES.iter().map(|e| e.name).collect::<Vec<_>>();
        let mut sorted_names = names.clone();
        sorted_names.sort_unstable();
        sorted_names.dedup();
        assert_eq!(names, sorted_names);
        assert_eq!(EXERCISES.len(), 16);
    }

    #[test]
    fn test_exercise_names_are_valid() {
        for exercise in EXERCISES {
            assert!(Name::new(exercise.name).is_ok(), "{}", exercise.name);
        }
    }

    #[test]
    fn test_every_muscle_group_is_covered() {
        let covered = EXERCISES
            .iter()
            .map(|e| e.muscle_group)
            .collect::<BTreeSet<_>>();
        assert_eq!(covered.len(), MuscleGroup::ALL.len());
    }
}

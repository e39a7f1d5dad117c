use crate::models::MuscleGroup;

/// Øvelser per muskelgruppe, i den rekkefølgen skjemaet viser dem.
pub fn exercises_for(group: MuscleGroup) -> &'static [&'static str] {
    match group {
        MuscleGroup::Chest => &["Bench Press", "Incline Bench Press", "Dumbbell Press", "Cable Fly", "Push-ups", "Chest Dips"],
        MuscleGroup::Back => &["Deadlift", "Bent Over Rows", "Pull-ups", "Lat Pulldowns", "T-Bar Rows", "Seated Rows"],
        MuscleGroup::Legs => &["Squats", "Leg Press", "Leg Curls", "Leg Extensions", "Lunges", "Calf Raises"],
        MuscleGroup::Shoulders => &[
            "Military Press",
            "Lateral Raises",
            "Shoulder Shrugs",
            "Overhead Press",
            "Reverse Fly",
            "Front Raises",
        ],
        MuscleGroup::Biceps => &["Barbell Curls", "Dumbbell Curls", "Hammer Curls", "Cable Curls", "Preacher Curls", "Machine Curls"],
        MuscleGroup::Triceps => &[
            "Tricep Dips",
            "Tricep Pushdowns",
            "Overhead Tricep Extension",
            "Skull Crushers",
            "Close Grip Bench Press",
            "Rope Pushdowns",
        ],
        MuscleGroup::Core => &["Planks", "Ab Crunches", "Cable Crunches", "Hanging Leg Raises", "Woodchops", "Russian Twists"],
    }
}

/// Første øvelse i gruppen – skjemaet hopper hit når gruppen byttes.
pub fn default_exercise(group: MuscleGroup) -> Option<&'static str> {
    exercises_for(group).first().copied()
}

/// Gruppen en øvelse hører til (case-insensitivt).
pub fn group_of(exercise: &str) -> Option<MuscleGroup> {
    let needle = exercise.trim();
    MuscleGroup::ALL
        .iter()
        .copied()
        .find(|&g| exercises_for(g).iter().any(|e| e.eq_ignore_ascii_case(needle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_group_has_six_exercises() {
        for g in MuscleGroup::ALL {
            assert_eq!(exercises_for(g).len(), 6, "{g}");
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(default_exercise(MuscleGroup::Chest), Some("Bench Press"));
        assert_eq!(group_of("deadlift"), Some(MuscleGroup::Back));
        // "Close Grip Bench Press" er triceps, ikke bryst
        assert_eq!(group_of("Close Grip Bench Press"), Some(MuscleGroup::Triceps));
        assert_eq!(group_of("Zumba"), None);
    }
}

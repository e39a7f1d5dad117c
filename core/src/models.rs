use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StriveError;

/// Prefiks for per-gruppe nøkler i den varige lagringen.
pub const BODY_KEY_PREFIX: &str = "bodygraph_";

/// Nøkkel for listen med lagrede økter.
pub const SESSIONS_KEY: &str = "workoutSessions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Biceps,
    Triceps,
    Core,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Core,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Core => "Core",
        }
    }

    /// Stabil lagringsnøkkel, f.eks. `bodygraph_Chest`.
    pub fn storage_key(self) -> String {
        format!("{BODY_KEY_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleGroup {
    type Err = StriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chest" => Ok(MuscleGroup::Chest),
            "back" => Ok(MuscleGroup::Back),
            "legs" => Ok(MuscleGroup::Legs),
            "shoulders" => Ok(MuscleGroup::Shoulders),
            "biceps" => Ok(MuscleGroup::Biceps),
            // ledertavlene bruker entall
            "triceps" | "tricep" => Ok(MuscleGroup::Triceps),
            "core" => Ok(MuscleGroup::Core),
            other => Err(StriveError::validation(format!(
                "unknown muscle group '{other}'"
            ))),
        }
    }
}

/// Rangerte nivåer. Rekkefølgen i enum-en ER rangeringen (derive Ord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
        }
    }

    /// 0 for Bronze .. 4 for Diamond
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Bronze => Some(Tier::Silver),
            Tier::Silver => Some(Tier::Gold),
            Tier::Gold => Some(Tier::Platinum),
            Tier::Platinum => Some(Tier::Diamond),
            Tier::Diamond => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = StriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StriveError::validation(format!("unknown tier '{s}'")))
    }
}

/// Akkumulert løftet vekt per muskelgruppe. Fraværende gruppe = 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    weights: BTreeMap<MuscleGroup, f64>,
}

impl BodyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: MuscleGroup) -> f64 {
        self.weights.get(&group).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, group: MuscleGroup) -> bool {
        self.weights.contains_key(&group)
    }

    /// Rå innsetting uten validering; `BodyStore::set` er den validerte veien inn.
    pub(crate) fn insert(&mut self, group: MuscleGroup, weight: f64) {
        self.weights.insert(group, weight);
    }

    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, f64)> + '_ {
        self.weights.iter().map(|(g, w)| (*g, *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl FromIterator<(MuscleGroup, f64)> for BodyState {
    fn from_iter<I: IntoIterator<Item = (MuscleGroup, f64)>>(iter: I) -> Self {
        let mut state = BodyState::new();
        for (g, w) in iter {
            state.insert(g, w.max(0.0));
        }
        state
    }
}

/// Én loggført øvelse i en økt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: u64,
    #[serde(rename = "bodyPart")]
    pub group: MuscleGroup,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64, // per repetisjon
}

impl ExerciseEntry {
    /// Total belastning = vekt × sett × reps
    pub fn load(&self) -> f64 {
        self.weight * self.sets as f64 * self.reps as f64
    }
}

/// En lagret økt. Uforanderlig etter at den er skrevet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    #[serde(rename = "sessionTime")]
    pub session_time_min: u32,
    pub exercises: Vec<ExerciseEntry>,
    #[serde(rename = "totalWeight")]
    pub total_weight: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_follow_group_names() {
        assert_eq!(MuscleGroup::Chest.storage_key(), "bodygraph_Chest");
        assert_eq!(MuscleGroup::Triceps.storage_key(), "bodygraph_Triceps");
    }

    #[test]
    fn group_parsing_accepts_aliases() {
        assert_eq!("tricep".parse::<MuscleGroup>().unwrap(), MuscleGroup::Triceps);
        assert_eq!(" LEGS ".parse::<MuscleGroup>().unwrap(), MuscleGroup::Legs);
        assert!("neck".parse::<MuscleGroup>().is_err());
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Bronze < Tier::Silver);
        assert!(Tier::Platinum < Tier::Diamond);
        assert_eq!(Tier::Diamond.rank(), 4);
        assert_eq!(Tier::Gold.next(), Some(Tier::Platinum));
        assert_eq!(Tier::Diamond.next(), None);
        assert_eq!("platinum".parse::<Tier>().unwrap(), Tier::Platinum);
    }

    #[test]
    fn body_state_defaults_to_zero() {
        let s = BodyState::new();
        assert_eq!(s.get(MuscleGroup::Core), 0.0);
        assert!(!s.contains(MuscleGroup::Core));
    }

    #[test]
    fn session_uses_frontend_field_names() {
        let entry = ExerciseEntry {
            id: 1,
            group: MuscleGroup::Chest,
            exercise: "Bench Press".into(),
            sets: 3,
            reps: 10,
            weight: 100.0,
        };
        assert_eq!(entry.load(), 3000.0);
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["bodyPart"], "Chest");
    }
}

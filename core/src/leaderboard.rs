use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::models::{MuscleGroup, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tab {
    Overview,
    MaxLifts,
    Levels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Score {
    Quantity { value: f64, unit: String },
    Level(Tier),
}

impl Score {
    pub fn quantity(value: f64, unit: impl Into<String>) -> Self {
        Score::Quantity {
            value,
            unit: unit.into(),
        }
    }

    /// Sorteringsnøkkel: nivå rangeres over alle mengder, men tavler blander ikke de to.
    fn key(&self) -> (u8, OrderedFloat<f64>) {
        match self {
            Score::Quantity { value, .. } => (0, OrderedFloat(*value)),
            Score::Level(t) => (1, OrderedFloat(t.rank() as f64)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Score::Quantity { value, unit } if unit.is_empty() => format!("{value}"),
            Score::Quantity { value, unit } => format!("{value} {unit}"),
            Score::Level(t) => t.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub rank: u32,
    pub name: String,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub title: String,
    entries: Vec<(String, Score)>,
}

impl Board {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, score: Score) -> Self {
        self.entries.push((name.into(), score));
        self
    }

    /// Synkende etter score. Like score deler plass (1, 1, 2 ...);
    /// ved likhet beholdes innsettingsrekkefølgen.
    pub fn ranked(&self) -> Vec<Standing> {
        let mut sorted: Vec<&(String, Score)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.1.key().cmp(&a.1.key()));

        let mut out = Vec::with_capacity(sorted.len());
        let mut rank = 0u32;
        let mut prev: Option<(u8, OrderedFloat<f64>)> = None;
        for (name, score) in sorted {
            let key = score.key();
            if prev.map(|p| p.cmp(&key)) != Some(Ordering::Equal) {
                rank += 1;
            }
            prev = Some(key);
            out.push(Standing {
                rank,
                name: name.clone(),
                score: score.clone(),
            });
        }
        out
    }
}

/// Tavlene som vises på ledertavle-siden. Konstrueres ved oppstart
/// og sendes eksplisitt rundt; ingen modul-globale data.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardStore {
    tabs: Vec<(Tab, Board)>,
}

impl LeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tab: Tab, board: Board) {
        self.tabs.push((tab, board));
    }

    pub fn boards(&self, tab: Tab) -> Vec<&Board> {
        self.tabs
            .iter()
            .filter(|(t, _)| *t == tab)
            .map(|(_, b)| b)
            .collect()
    }

    /// Eksempeldata til backend leverer ekte tall.
    pub fn demo() -> Self {
        let mut store = Self::new();

        store.add(
            Tab::Overview,
            Board::new("Time in Gym")
                .with("Alice", Score::quantity(120.0, "hrs"))
                .with("Bob", Score::quantity(95.0, "hrs"))
                .with("Charlie", Score::quantity(80.0, "hrs")),
        );
        store.add(
            Tab::Overview,
            Board::new("Total Weight Lifted")
                .with("Bob", Score::quantity(50_000.0, "lbs"))
                .with("Charlie", Score::quantity(48_000.0, "lbs"))
                .with("Alice", Score::quantity(45_000.0, "lbs")),
        );

        for (lift, scores) in [
            ("Bench Press", [("Bob", 200.0), ("Alice", 180.0), ("Charlie", 160.0)]),
            ("Squat", [("Charlie", 200.0), ("Bob", 180.0), ("Alice", 160.0)]),
            ("Deadlift", [("Charlie", 200.0), ("Bob", 180.0), ("Alice", 160.0)]),
        ] {
            let board = scores.iter().fold(Board::new(format!("{lift} (Max)")), |b, (name, v)| {
                b.with(*name, Score::quantity(*v, ""))
            });
            store.add(Tab::MaxLifts, board);
        }

        use MuscleGroup::*;
        use Tier::*;
        for (group, levels) in [
            (Chest, [("Alice", Platinum), ("Bob", Gold), ("Charlie", Silver)]),
            (Back, [("Bob", Diamond), ("Alice", Gold), ("Charlie", Silver)]),
            (Shoulders, [("Alice", Gold), ("Bob", Silver), ("Charlie", Bronze)]),
            (Legs, [("Alice", Platinum), ("Bob", Gold), ("Charlie", Silver)]),
            (Biceps, [("Charlie", Platinum), ("Bob", Gold), ("Alice", Silver)]),
            (Triceps, [("Bob", Diamond), ("Alice", Silver), ("Charlie", Bronze)]),
            (Core, [("Alice", Platinum), ("Bob", Gold), ("Charlie", Silver)]),
        ] {
            let board = levels.iter().fold(Board::new(group.as_str()), |b, (name, tier)| {
                b.with(*name, Score::Level(*tier))
            });
            store.add(Tab::Levels, board);
        }

        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_descending_with_shared_ties() {
        let board = Board::new("Squat")
            .with("A", Score::quantity(100.0, "kg"))
            .with("B", Score::quantity(140.0, "kg"))
            .with("C", Score::quantity(100.0, "kg"))
            .with("D", Score::quantity(90.0, "kg"));
        let ranked = board.ranked();
        let rows: Vec<(u32, &str)> = ranked.iter().map(|s| (s.rank, s.name.as_str())).collect();
        assert_eq!(rows, vec![(1, "B"), (2, "A"), (2, "C"), (3, "D")]);
    }

    #[test]
    fn levels_rank_by_tier() {
        let board = Board::new("Back")
            .with("Charlie", Score::Level(Tier::Silver))
            .with("Bob", Score::Level(Tier::Diamond))
            .with("Alice", Score::Level(Tier::Gold));
        let names: Vec<String> = board.ranked().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Charlie"]);
    }

    #[test]
    fn demo_has_all_tabs() {
        let store = LeaderboardStore::demo();
        assert_eq!(store.boards(Tab::Overview).len(), 2);
        assert_eq!(store.boards(Tab::MaxLifts).len(), 3);
        assert_eq!(store.boards(Tab::Levels).len(), 7);
        let top = &store.boards(Tab::Overview)[1].ranked()[0];
        assert_eq!(top.name, "Bob");
        assert_eq!(top.score.display(), "50000 lbs");
    }
}

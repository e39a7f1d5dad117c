use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::body::{store_get, store_set, SharedStore};
use crate::error::{Result, StriveError};
use crate::metrics::Metrics;
use crate::models::{ExerciseEntry, MuscleGroup, WorkoutSession, SESSIONS_KEY};
use crate::remote::{RemoteClient, RemoteStatus};
use crate::storage::decode_entry;

pub const DEFAULT_SESSION_MIN: u32 = 60;
pub const SUCCESS_MESSAGE: &str = "Workout saved successfully!";
pub const EMPTY_SESSION_MESSAGE: &str = "add at least one exercise";

/// Øvelse slik den kommer fra skjemaet, før den får id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub group: MuscleGroup,
    pub exercise: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
}

impl NewEntry {
    pub fn new(group: MuscleGroup, exercise: impl Into<String>, sets: u32, reps: u32, weight: f64) -> Self {
        Self {
            group,
            exercise: exercise.into(),
            sets,
            reps,
            weight,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitOutcome {
    pub session: WorkoutSession,
    pub remote: RemoteStatus,
    pub message: &'static str,
}

/// Sum av vekt × sett × reps.
pub fn total_load(entries: &[ExerciseEntry]) -> f64 {
    entries.iter().map(ExerciseEntry::load).sum()
}

/// Belastning per gruppe, kun grupper med belastning > 0, i fast rekkefølge.
pub fn summary_by_group(entries: &[ExerciseEntry]) -> Vec<(MuscleGroup, f64)> {
    MuscleGroup::ALL
        .iter()
        .map(|&g| {
            let load: f64 = entries.iter().filter(|e| e.group == g).map(ExerciseEntry::load).sum();
            (g, load)
        })
        .filter(|(_, load)| *load > 0.0)
        .collect()
}

/// Økt under arbeid. Lagres atomisk som ett tillegg i historikken.
pub struct SessionRecorder {
    store: SharedStore,
    metrics: Arc<Metrics>,
    entries: Vec<ExerciseEntry>,
    session_time_min: u32,
    next_id: u64,
}

impl SessionRecorder {
    pub fn new(store: SharedStore, metrics: Arc<Metrics>) -> Self {
        Self {
            store,
            metrics,
            entries: Vec::new(),
            session_time_min: DEFAULT_SESSION_MIN,
            next_id: 1,
        }
    }

    pub fn entries(&self) -> &[ExerciseEntry] {
        &self.entries
    }

    pub fn session_time_min(&self) -> u32 {
        self.session_time_min
    }

    pub fn set_session_time(&mut self, minutes: u32) -> Result<()> {
        if minutes == 0 {
            self.metrics.validation_errors_total.inc();
            return Err(StriveError::validation("session time must be at least 1 minute"));
        }
        self.session_time_min = minutes;
        Ok(())
    }

    /// Legger til på slutten. Ingen dedup, ingen grense. Returnerer ny id.
    pub fn add_entry(&mut self, entry: NewEntry) -> Result<u64> {
        if let Err(e) = validate_entry(&entry) {
            self.metrics.validation_errors_total.inc();
            return Err(e);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ExerciseEntry {
            id,
            group: entry.group,
            exercise: entry.exercise,
            sets: entry.sets,
            reps: entry.reps,
            weight: entry.weight,
        });
        Ok(id)
    }

    /// Fjerner på id; `false` hvis den ikke fantes.
    pub fn remove_entry(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn total_load(&self) -> f64 {
        total_load(&self.entries)
    }

    pub fn commit(&mut self, remote: &dyn RemoteClient) -> Result<CommitOutcome> {
        self.commit_at(remote, Utc::now())
    }

    /// Lagrer lokalt først, deretter ett forsøk mot backend.
    /// Backend-feil endrer verken lagringen eller suksessmeldingen.
    pub fn commit_at(&mut self, remote: &dyn RemoteClient, timestamp: DateTime<Utc>) -> Result<CommitOutcome> {
        if self.entries.is_empty() {
            self.metrics.validation_errors_total.inc();
            return Err(StriveError::validation(EMPTY_SESSION_MESSAGE));
        }

        // JSON har ingen inf, en slik total ville blitt lagret som null
        let total = self.total_load();
        if !total.is_finite() {
            self.metrics.validation_errors_total.inc();
            return Err(StriveError::validation(format!(
                "session total load must be finite, got {total}"
            )));
        }

        let session = WorkoutSession {
            session_time_min: self.session_time_min,
            exercises: self.entries.clone(),
            total_weight: total,
            timestamp,
        };

        // Behold rå-postene, også de vi ikke kan tolke, så ingenting går tapt.
        let mut records = self.load_records()?;
        records.push(serde_json::to_value(&session)?);
        let json = serde_json::to_string(&records)?;
        store_set(&self.store, SESSIONS_KEY, json)?;
        self.metrics.sessions_committed_total.inc();
        info!(
            "✅ Økt lagret ({} øvelser, {:.1} totalt, {} økter i historikken)",
            session.exercises.len(),
            session.total_weight,
            records.len()
        );

        let status = if !remote.is_configured() {
            RemoteStatus::NotConfigured
        } else {
            match remote.submit(&session) {
                Ok(()) => RemoteStatus::Reachable,
                Err(e) => {
                    self.metrics.remote_failures_total.inc();
                    warn!("⚠️ Innsending feilet, økten er lagret lokalt: {e}");
                    RemoteStatus::Unreachable
                }
            }
        };

        self.entries.clear();
        self.session_time_min = DEFAULT_SESSION_MIN;

        Ok(CommitOutcome {
            session,
            remote: status,
            message: SUCCESS_MESSAGE,
        })
    }

    /// Lagrede økter. Poster som ikke kan tolkes hoppes over;
    /// en historikk som ikke er en liste gir tom historikk.
    pub fn history(&self) -> Vec<WorkoutSession> {
        let records = match self.load_records() {
            Ok(r) => r,
            Err(e) => {
                warn!("⚠️ {e}");
                return Vec::new();
            }
        };
        records
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| match serde_json::from_value::<WorkoutSession>(v) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!("⚠️ hopper over økt #{i}: {e}");
                    None
                }
            })
            .collect()
    }

    fn load_records(&self) -> Result<Vec<Value>> {
        match store_get(&self.store, SESSIONS_KEY)? {
            Some(raw) => decode_entry(SESSIONS_KEY, &raw),
            None => Ok(Vec::new()),
        }
    }
}

fn validate_entry(entry: &NewEntry) -> Result<()> {
    if entry.exercise.trim().is_empty() {
        return Err(StriveError::validation("exercise name is required"));
    }
    if entry.sets == 0 || entry.reps == 0 {
        return Err(StriveError::validation("sets and reps must be at least 1"));
    }
    if !entry.weight.is_finite() || entry.weight < 0.0 {
        return Err(StriveError::validation(format!(
            "weight must be a finite number >= 0, got {}",
            entry.weight
        )));
    }
    let load = entry.weight * entry.sets as f64 * entry.reps as f64;
    if !load.is_finite() {
        return Err(StriveError::validation(format!(
            "load (weight x sets x reps) must be finite, got {load}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::shared;
    use crate::storage::MemoryStore;

    fn recorder() -> SessionRecorder {
        SessionRecorder::new(shared(MemoryStore::new()), Arc::new(Metrics::new()))
    }

    #[test]
    fn ids_are_monotonic_and_removal_is_idempotent() {
        let mut r = recorder();
        let a = r.add_entry(NewEntry::new(MuscleGroup::Chest, "Bench Press", 3, 10, 100.0)).unwrap();
        let b = r.add_entry(NewEntry::new(MuscleGroup::Chest, "Bench Press", 3, 10, 100.0)).unwrap();
        assert!(b > a);
        assert_eq!(r.entries().len(), 2);
        assert!(r.remove_entry(a));
        assert!(!r.remove_entry(a));
        assert!(!r.remove_entry(999));
        assert_eq!(r.entries().len(), 1);
    }

    #[test]
    fn invalid_entries_are_rejected() {
        let mut r = recorder();
        assert!(r.add_entry(NewEntry::new(MuscleGroup::Legs, "Squats", 0, 5, 100.0)).is_err());
        assert!(r.add_entry(NewEntry::new(MuscleGroup::Legs, "Squats", 5, 5, -1.0)).is_err());
        assert!(r.add_entry(NewEntry::new(MuscleGroup::Legs, " ", 5, 5, 1.0)).is_err());
        assert!(r.entries().is_empty());
    }

    #[test]
    fn summary_skips_untouched_groups() {
        let mut r = recorder();
        r.add_entry(NewEntry::new(MuscleGroup::Back, "Deadlift", 5, 5, 140.0)).unwrap();
        r.add_entry(NewEntry::new(MuscleGroup::Chest, "Bench Press", 3, 10, 100.0)).unwrap();
        r.add_entry(NewEntry::new(MuscleGroup::Chest, "Push-ups", 3, 20, 0.0)).unwrap();
        assert_eq!(
            summary_by_group(r.entries()),
            vec![(MuscleGroup::Chest, 3000.0), (MuscleGroup::Back, 3500.0)]
        );
        assert_eq!(r.total_load(), 6500.0);
    }

    #[test]
    fn overflowing_load_is_rejected_on_add() {
        let mut r = recorder();
        let err = r
            .add_entry(NewEntry::new(MuscleGroup::Chest, "Bench Press", 10, 10, 1e307))
            .unwrap_err();
        assert!(matches!(err, StriveError::Validation(_)));
        assert!(r.entries().is_empty());
    }

    #[test]
    fn overflowing_total_is_rejected_on_commit() {
        let raw = std::rc::Rc::new(std::cell::RefCell::new(MemoryStore::new()));
        let mut r = SessionRecorder::new(raw.clone(), Arc::new(Metrics::new()));
        // hver post er endelig (1e308), summen er det ikke
        r.add_entry(NewEntry::new(MuscleGroup::Chest, "Bench Press", 10, 10, 1e306)).unwrap();
        r.add_entry(NewEntry::new(MuscleGroup::Back, "Deadlift", 10, 10, 1e306)).unwrap();

        let err = r.commit(&crate::remote::OfflineRemote).unwrap_err();
        assert!(matches!(err, StriveError::Validation(_)));
        assert_eq!(r.entries().len(), 2);
        use crate::storage::KeyValueStore;
        assert_eq!(raw.borrow().get(SESSIONS_KEY).unwrap(), None);
    }

    #[test]
    fn session_time_must_be_positive() {
        let mut r = recorder();
        assert!(r.set_session_time(0).is_err());
        r.set_session_time(45).unwrap();
        assert_eq!(r.session_time_min(), 45);
    }
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::info;

use crate::body::{shared, BodyStore, SharedStore};
use crate::config::AppConfig;
use crate::leaderboard::LeaderboardStore;
use crate::metrics::Metrics;
use crate::models::BodyState;
use crate::remote::{check_health, HttpRemote, OfflineRemote, RemoteClient, RemoteStatus};
use crate::session::{CommitOutcome, SessionRecorder};
use crate::storage::{FileStore, MemoryStore};

/// Alt som lever i én brukerøkt. Bygges ved oppstart og sendes eksplisitt videre.
pub struct App {
    pub body: BodyStore,
    pub recorder: SessionRecorder,
    pub leaderboards: LeaderboardStore,
    pub remote: Box<dyn RemoteClient>,
    pub metrics: Arc<Metrics>,
    store: SharedStore,
}

impl App {
    pub fn new(store: SharedStore, remote: Box<dyn RemoteClient>, metrics: Arc<Metrics>) -> Self {
        let mut body = BodyStore::new(store.clone(), metrics.clone());
        body.hydrate();
        Self {
            body,
            recorder: SessionRecorder::new(store.clone(), metrics.clone()),
            leaderboards: LeaderboardStore::demo(),
            remote,
            metrics,
            store,
        }
    }

    /// Åpner FileStore i `data_dir` og velger backend ut fra konfig.
    pub fn bootstrap(cfg: &AppConfig) -> anyhow::Result<Self> {
        let files = FileStore::open(&cfg.data_dir)
            .with_context(|| format!("could not open data dir {}", cfg.data_dir.display()))?;
        let remote: Box<dyn RemoteClient> = match &cfg.api_base_url {
            Some(url) => Box::new(HttpRemote::new(
                url.clone(),
                Duration::from_secs(cfg.remote_timeout_secs),
            )),
            None => Box::new(OfflineRemote),
        };
        info!(
            "Strive startet (env={}, debug={}, api={})",
            cfg.environment,
            cfg.debug,
            cfg.api_base_url.as_deref().unwrap_or("-")
        );
        Ok(Self::new(shared(files), remote, Arc::new(Metrics::new())))
    }

    /// Uten disk og uten backend.
    pub fn in_memory() -> Self {
        Self::new(
            shared(MemoryStore::new()),
            Box::new(OfflineRemote),
            Arc::new(Metrics::new()),
        )
    }

    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    pub fn remote_status(&self) -> RemoteStatus {
        check_health(self.remote.as_ref(), &self.metrics)
    }

    /// Lagrer økten og legger belastningen til kroppsgrafen.
    pub fn log_workout(&mut self) -> anyhow::Result<(CommitOutcome, BodyState)> {
        let outcome = self
            .recorder
            .commit(self.remote.as_ref())
            .context("could not save workout")?;
        let state = self
            .body
            .apply_session(&outcome.session)
            .context("workout saved but body levels were not updated")?;
        Ok((outcome, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MuscleGroup;
    use crate::session::NewEntry;

    #[test]
    fn log_workout_feeds_body_levels() {
        let mut app = App::in_memory();
        app.recorder
            .add_entry(NewEntry::new(MuscleGroup::Chest, "Bench Press", 5, 10, 100.0))
            .unwrap();
        let (outcome, state) = app.log_workout().unwrap();
        assert_eq!(outcome.remote, RemoteStatus::NotConfigured);
        assert_eq!(state.get(MuscleGroup::Chest), 5000.0);
        assert_eq!(app.recorder.history().len(), 1);
        assert_eq!(app.remote_status(), RemoteStatus::NotConfigured);
    }

    #[test]
    fn empty_workout_is_an_error() {
        let mut app = App::in_memory();
        assert!(app.log_workout().is_err());
        assert!(app.recorder.history().is_empty());
    }

    #[test]
    fn overflowing_workout_touches_neither_history_nor_body() {
        let mut app = App::in_memory();
        for _ in 0..2 {
            app.recorder
                .add_entry(NewEntry::new(MuscleGroup::Legs, "Squats", 10, 10, 1e306))
                .unwrap();
        }
        assert!(app.log_workout().is_err());
        assert!(app.recorder.history().is_empty());
        assert_eq!(app.body.get(MuscleGroup::Legs), 0.0);
    }
}

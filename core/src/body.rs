use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::error::{Result, StriveError};
use crate::level::compute_level;
use crate::metrics::Metrics;
use crate::models::{BodyState, MuscleGroup, Tier, WorkoutSession};
use crate::session::summary_by_group;
use crate::storage::{decode_entry, KeyValueStore};

/// Delt håndtak til det varige lageret. Én skriver om gangen (UI-tråden),
/// derfor `Rc<RefCell<..>>` og ikke låser.
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

pub fn shared<S: KeyValueStore + 'static>(store: S) -> SharedStore {
    Rc::new(RefCell::new(store))
}

/// Leser én nøkkel. Et lager som allerede er lånt ut gir `Storage`, ikke panikk.
pub(crate) fn store_get(store: &SharedStore, key: &str) -> Result<Option<String>> {
    let guard = store
        .try_borrow()
        .map_err(|e| StriveError::Storage(format!("store busy while reading '{key}': {e}")))?;
    guard.get(key)
}

pub(crate) fn store_set(store: &SharedStore, key: &str, value: String) -> Result<()> {
    let mut guard = store
        .try_borrow_mut()
        .map_err(|e| StriveError::Storage(format!("store busy while writing '{key}': {e}")))?;
    guard.set(key, value)
}

/// Mottaker av endringer (tegnelaget). Kalles synkront etter hver vellykket `set`.
pub trait BodyObserver {
    fn on_body_update(&mut self, state: &BodyState);
}

impl<F: FnMut(&BodyState)> BodyObserver for F {
    fn on_body_update(&mut self, state: &BodyState) {
        self(state)
    }
}

/// Én rad i kroppsgrafen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyLevel {
    pub group: MuscleGroup,
    pub weight: f64,
    pub level: Tier,
}

/// Sum av alle verdier; fraværende grupper teller som 0.
pub fn total_weight(state: &BodyState) -> f64 {
    state.iter().map(|(_, w)| w).sum()
}

pub struct BodyStore {
    store: SharedStore,
    state: BodyState,
    observer: Option<Box<dyn BodyObserver>>,
    metrics: Arc<Metrics>,
}

impl BodyStore {
    /// Tomt lager; kall `hydrate` for å lese inn lagrede verdier.
    pub fn new(store: SharedStore, metrics: Arc<Metrics>) -> Self {
        Self {
            store,
            state: BodyState::new(),
            observer: None,
            metrics,
        }
    }

    /// Registrerer observatøren. Det finnes kun én; en ny erstatter den gamle.
    pub fn subscribe(&mut self, observer: Box<dyn BodyObserver>) {
        self.observer = Some(observer);
    }

    pub fn unsubscribe(&mut self) {
        self.observer = None;
    }

    pub fn state(&self) -> &BodyState {
        &self.state
    }

    pub fn get(&self, group: MuscleGroup) -> f64 {
        self.state.get(group)
    }

    /// Setter vekt for én gruppe, lagrer kun den nøkkelen og varsler observatøren.
    pub fn set(&mut self, group: MuscleGroup, weight: f64) -> Result<BodyState> {
        self.validate(group, weight)?;
        self.persist(group, weight)?;
        self.state.insert(group, weight);
        self.metrics.body_updates_total.inc();
        debug!("{group} = {weight}");
        self.notify();
        Ok(self.state.clone())
    }

    /// Leser hver av de sju nøklene for seg. En manglende eller korrupt
    /// nøkkel gir fravær (0) for den gruppen, resten leses som normalt.
    pub fn hydrate(&mut self) -> BodyState {
        let mut state = BodyState::new();
        for group in MuscleGroup::ALL {
            match self.read_entry(group) {
                Ok(Some(w)) => state.insert(group, w),
                Ok(None) => {}
                Err(e) if e.is_recoverable() => {
                    self.metrics.hydrate_fallback_total.inc();
                    warn!("⚠️ {group}: {e}, faller tilbake til 0");
                }
                Err(e) => error!("{group} kunne ikke leses, faller tilbake til 0: {e}"),
            }
        }
        info!(
            "📂 Kroppsdata lastet: {} av {} grupper",
            state.len(),
            MuscleGroup::ALL.len()
        );
        self.state = state.clone();
        state
    }

    pub fn total_weight(&self) -> f64 {
        total_weight(&self.state)
    }

    /// Alle sju grupper med nivå, i fast rekkefølge.
    pub fn levels(&self) -> Vec<BodyLevel> {
        MuscleGroup::ALL
            .iter()
            .map(|&group| {
                let weight = self.state.get(group);
                BodyLevel {
                    group,
                    weight,
                    level: compute_level(weight),
                }
            })
            .collect()
    }

    /// Legger øktens belastning til løpende totaler per gruppe.
    /// Alt valideres før noe skrives; observatøren varsles én gang.
    /// Feiler en skriving underveis, beholdes gruppene som alt er lagret,
    /// observatøren varsles om dem og feilen returneres.
    pub fn apply_session(&mut self, session: &WorkoutSession) -> Result<BodyState> {
        let updates: Vec<(MuscleGroup, f64)> = summary_by_group(&session.exercises)
            .into_iter()
            .map(|(group, load)| (group, self.state.get(group) + load))
            .collect();

        for &(group, weight) in &updates {
            self.validate(group, weight)?;
        }
        let mut written = 0usize;
        let mut outcome = Ok(());
        for &(group, weight) in &updates {
            if let Err(e) = self.persist(group, weight) {
                outcome = Err(e);
                break;
            }
            self.state.insert(group, weight);
            self.metrics.body_updates_total.inc();
            written += 1;
        }
        if written > 0 {
            info!("økt lagt til kroppsgrafen ({written} av {} grupper)", updates.len());
            self.notify();
        }
        outcome.map(|()| self.state.clone())
    }

    fn validate(&self, group: MuscleGroup, weight: f64) -> Result<()> {
        if weight.is_finite() && weight >= 0.0 {
            return Ok(());
        }
        self.metrics.validation_errors_total.inc();
        Err(StriveError::validation(format!(
            "weight for {group} must be a finite number >= 0, got {weight}"
        )))
    }

    fn persist(&self, group: MuscleGroup, weight: f64) -> Result<()> {
        let json = serde_json::to_string(&weight)?;
        store_set(&self.store, &group.storage_key(), json)
    }

    fn read_entry(&self, group: MuscleGroup) -> Result<Option<f64>> {
        let key = group.storage_key();
        let raw = match store_get(&self.store, &key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let w: f64 = decode_entry(&key, &raw)?;
        if !w.is_finite() || w < 0.0 {
            return Err(StriveError::StorageCorruption {
                key,
                detail: format!("negative or non-finite weight {w}"),
            });
        }
        Ok(Some(w))
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_body_update(&self.state);
        }
    }
}

use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::error::{Result, StriveError};
use crate::metrics::Metrics;
use crate::models::WorkoutSession;

/// Resultat av siste kontakt med backend – kun til statusmelding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemoteStatus {
    Reachable,
    Unreachable,
    NotConfigured,
}

/// Valgfri backend. Feil her påvirker aldri lokal tilstand.
pub trait RemoteClient {
    fn is_configured(&self) -> bool {
        true
    }
    fn submit(&self, session: &WorkoutSession) -> Result<()>;
    fn health(&self) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct HealthResp {
    status: String,
}

/// Blocking HTTP-klient (ureq) mot Strive-API-et.
pub struct HttpRemote {
    agent: Agent,
    base_url: String,
}

impl HttpRemote {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn unavailable(e: impl std::fmt::Display) -> StriveError {
    StriveError::RemoteUnavailable(e.to_string())
}

impl RemoteClient for HttpRemote {
    fn submit(&self, session: &WorkoutSession) -> Result<()> {
        let url = format!("{}/stats", self.base_url);
        self.agent
            .post(&url)
            .send_json(session)
            .map_err(unavailable)?;
        debug!("[remote] økt sendt til {url}");
        Ok(())
    }

    fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let resp = self.agent.get(&url).call().map_err(unavailable)?;
        let body: HealthResp = resp.into_json().map_err(unavailable)?;
        if body.status == "ok" {
            Ok(())
        } else {
            Err(unavailable(format!("health status '{}'", body.status)))
        }
    }
}

/// Brukes når ingen API-adresse er konfigurert.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineRemote;

impl RemoteClient for OfflineRemote {
    fn is_configured(&self) -> bool {
        false
    }

    fn submit(&self, _session: &WorkoutSession) -> Result<()> {
        Err(unavailable("no remote configured"))
    }

    fn health(&self) -> Result<()> {
        Err(unavailable("no remote configured"))
    }
}

/// Helsesjekk til nøytral statusindikator. Ett forsøk, ingen retry.
pub fn check_health(remote: &dyn RemoteClient, metrics: &Metrics) -> RemoteStatus {
    if !remote.is_configured() {
        return RemoteStatus::NotConfigured;
    }
    match remote.health() {
        Ok(()) => RemoteStatus::Reachable,
        Err(e) => {
            metrics.remote_failures_total.inc();
            warn!("[remote] helsesjekk feilet: {e}");
            RemoteStatus::Unreachable
        }
    }
}

//! Save / load / delete flows over the current analysis and the store.

use std::sync::Arc;

use archwright_core::{Analysis, PricingReport};
use chrono::{DateTime, Utc};

use crate::error::SessionError;
use crate::snapshot::SessionSnapshot;
use crate::state::SessionState;
use crate::store::AnalysisStore;

/// The current analysis plus the saved ones.
pub struct Session {
    state: SessionState,
    store: Arc<dyn AnalysisStore>,
}

impl Session {
    pub fn new(store: Arc<dyn AnalysisStore>) -> Self {
        Self {
            state: SessionState::new(),
            store,
        }
    }

    pub fn current(&self) -> Option<Arc<SessionSnapshot>> {
        self.state.get()
    }

    /// Make `snapshot` the current analysis, discarding the previous one.
    pub fn start(&self, snapshot: SessionSnapshot) -> Arc<SessionSnapshot> {
        self.state.replace_with(snapshot)
    }

    /// Drop the current analysis. Saved analyses are untouched.
    pub fn reset(&self) {
        self.state.clear();
    }

    /// Attach a diagram derived from `source`.
    ///
    /// Returns `None` and records nothing when `source` is no longer current.
    pub fn record_diagram(
        &self,
        source: &Arc<SessionSnapshot>,
        diagram: String,
    ) -> Option<Arc<SessionSnapshot>> {
        self.amend(source, "diagram", |snap| snap.with_diagram(diagram))
    }

    /// Attach infrastructure code derived from `source`.
    pub fn record_infrastructure_code(
        &self,
        source: &Arc<SessionSnapshot>,
        code: String,
    ) -> Option<Arc<SessionSnapshot>> {
        self.amend(source, "infrastructure code", |snap| {
            snap.with_infrastructure_code(code)
        })
    }

    /// Attach prices fetched for `source`.
    pub fn record_pricing(
        &self,
        source: &Arc<SessionSnapshot>,
        pricing: PricingReport,
    ) -> Option<Arc<SessionSnapshot>> {
        self.amend(source, "pricing", |snap| snap.with_pricing(pricing))
    }

    fn amend(
        &self,
        source: &Arc<SessionSnapshot>,
        artifact: &str,
        change: impl FnOnce(SessionSnapshot) -> SessionSnapshot,
    ) -> Option<Arc<SessionSnapshot>> {
        let amended = self.state.replace_if_current(source, change);
        if amended.is_none() {
            tracing::debug!(artifact, "Discarding artifact for a replaced analysis");
        }
        amended
    }

    /// Save the current analysis under `name` (or a dated default).
    pub async fn save(
        &self,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Analysis, SessionError> {
        let current = self.state.get().ok_or(SessionError::NothingToSave)?;
        let name = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => Analysis::default_name(now),
        };

        let analysis = current.to_analysis(name, now);
        let index = self.store.save(analysis.clone()).await?;
        tracing::info!(name = %analysis.name, index, "Analysis saved");
        Ok(analysis)
    }

    pub async fn saved(&self) -> Result<Vec<Analysis>, SessionError> {
        Ok(self.store.list().await?)
    }

    /// Replace the current analysis with the saved one at `index`.
    ///
    /// Artifacts the saved analysis lacks are absent afterwards, even if the
    /// previous current analysis had them.
    pub async fn load(&self, index: usize) -> Result<Arc<SessionSnapshot>, SessionError> {
        let analysis = self
            .store
            .get(index)
            .await?
            .ok_or(SessionError::NotFound(index))?;
        tracing::info!(name = %analysis.name, index, "Analysis loaded");
        Ok(self.state.replace_with(SessionSnapshot::from_analysis(&analysis)))
    }

    pub async fn delete(&self, index: usize) -> Result<Analysis, SessionError> {
        let removed = self
            .store
            .delete(index)
            .await?
            .ok_or(SessionError::NotFound(index))?;
        tracing::info!(name = %removed.name, index, "Analysis deleted");
        Ok(removed)
    }

    pub async fn clear_saved(&self) -> Result<(), SessionError> {
        self.store.clear().await?;
        tracing::info!("Saved analyses cleared");
        Ok(())
    }
}

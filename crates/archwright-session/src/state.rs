//! Swappable cell holding the current analysis.

use std::sync::{Arc, PoisonError, RwLock};

use crate::snapshot::SessionSnapshot;

/// At most one live [`SessionSnapshot`], replaced whole.
///
/// Amending an artifact is a conditional whole-value swap: it succeeds only
/// for the snapshot the artifact was derived from.
///
/// Readers get an `Arc` to the snapshot that was current when they asked;
/// a later [`replace_with`](Self::replace_with) never changes what they hold.
#[derive(Debug, Default)]
pub struct SessionState {
    current: RwLock<Option<Arc<SessionSnapshot>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, if any.
    pub fn get(&self) -> Option<Arc<SessionSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in `snapshot` and return it.
    pub fn replace_with(&self, snapshot: SessionSnapshot) -> Arc<SessionSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        snapshot
    }

    /// Swap in `change(expected)` only while `expected` is still current.
    ///
    /// Returns `None`, leaving the cell untouched, when another snapshot has
    /// replaced `expected` (or the cell was cleared) in the meantime.
    pub fn replace_if_current(
        &self,
        expected: &Arc<SessionSnapshot>,
        change: impl FnOnce(SessionSnapshot) -> SessionSnapshot,
    ) -> Option<Arc<SessionSnapshot>> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some(live) if Arc::ptr_eq(live, expected) => {
                let next = Arc::new(change((**expected).clone()));
                *current = Some(next.clone());
                Some(next)
            }
            _ => None,
        }
    }

    /// Drop the current snapshot.
    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

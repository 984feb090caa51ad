//! # archwright-session
//!
//! Holds the one "current" analysis and the list of saved ones.
//!
//! The current analysis is a [`SessionSnapshot`] kept in a [`SessionState`]
//! cell. The cell is only ever swapped whole, so a reader sees either the
//! old snapshot or the new one. Saved analyses live behind the
//! [`AnalysisStore`] trait; [`FileAnalysisStore`] keeps them as one JSON list.
//!
//! [`Session`] ties the two together for the save / load / delete flows.

pub mod error;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod store;

pub use error::{SessionError, StoreError};
pub use session::Session;
pub use snapshot::SessionSnapshot;
pub use state::SessionState;
pub use store::{AnalysisStore, FileAnalysisStore, MemoryAnalysisStore};

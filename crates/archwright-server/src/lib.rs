//! # archwright-server
//!
//! HTTP JSON API over the recommendation pipeline.
//!
//! Every endpoint answers `{"success": true, ...}` or
//! `{"success": false, "error": "..."}`. Routes are served both at the root
//! and under `/api`.

pub mod api_types;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use server::ArchwrightServer;
pub use state::AppState;

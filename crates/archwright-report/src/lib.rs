//! # archwright-report
//!
//! Pure rendering of the current analysis. Nothing here performs I/O.
//!
//! - [`render_view`]: snapshot to [`ViewModel`], the shape any UI layer consumes.
//! - [`compose_export`]: view model to an [`ExportDocument`] with a fixed
//!   section order and a paginated code listing.
//! - [`render_markdown`]: export document to Markdown text.

pub mod export;
pub mod markdown;
pub mod view;

pub use export::{ExportDocument, Section, SectionBody, compose_export, paginate_code};
pub use markdown::{DEFAULT_EXPORT_FILE, render_markdown};
pub use view::{ComponentRow, CostPanel, PriceRow, ViewModel, render_view};

//! `archwright export` - Write a saved analysis as a Markdown report.

use std::path::Path;

use anyhow::Context;
use archwright_core::ArchwrightConfig;
use archwright_report::{compose_export, render_markdown, render_view};
use archwright_session::SessionSnapshot;

pub async fn run(
    config: &ArchwrightConfig,
    index: usize,
    output: &Path,
    with_pricing: bool,
) -> anyhow::Result<()> {
    let session = super::open_session(config);
    let mut current = session.load(index).await?;

    if with_pricing {
        let pricing = super::build_pricing(config)?;
        let report = pricing.get_pricing(current.architecture.core_services()).await;
        if let Some(updated) = session.record_pricing(&current, report) {
            current = updated;
        }
    }

    write_export(&current, output)?;
    println!("Report written to {}", output.display());
    Ok(())
}

/// Render `snapshot` and write it to `output`.
pub fn write_export(snapshot: &SessionSnapshot, output: &Path) -> anyhow::Result<()> {
    let markdown = render_markdown(&compose_export(&render_view(snapshot)));
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, markdown)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(path = %output.display(), "Export written");
    Ok(())
}

//! `archwright ask` - Follow-up question about a saved analysis.

use anyhow::Context;
use archwright_core::ArchwrightConfig;

pub async fn run(config: &ArchwrightConfig, saved: usize, question: &str) -> anyhow::Result<()> {
    let session = super::open_session(config);
    let current = session
        .load(saved)
        .await
        .with_context(|| format!("Failed to load saved analysis {saved}"))?;

    let pipeline = super::build_pipeline(config)?;
    let answer = pipeline.ask(question, &current.architecture).await?;
    println!("{answer}");
    Ok(())
}

//! `archwright analyze` - Recommend an architecture.
//!
//! The architecture comes first. Requested artifacts are generated
//! concurrently afterwards; one failing leaves the others and the
//! architecture in place.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use archwright_core::ArchwrightConfig;
use archwright_pipeline::RecommendationPipeline;
use archwright_report::render_view;
use archwright_session::{Session, SessionSnapshot};
use chrono::Utc;
use clap::Args;

use crate::display;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Project requirements. Use `-` to read from stdin.
    #[arg(required_unless_present = "file")]
    pub requirements: Option<String>,

    /// Read requirements from a file
    #[arg(long, short, conflicts_with = "requirements")]
    pub file: Option<PathBuf>,

    /// Also generate a Mermaid diagram
    #[arg(long, default_value_t = false)]
    pub diagram: bool,

    /// Also generate Terraform
    #[arg(long, default_value_t = false)]
    pub terraform: bool,

    /// Also fetch live prices for the core services
    #[arg(long, default_value_t = false)]
    pub pricing: bool,

    /// Save the result, optionally under a name
    #[arg(long)]
    pub save: Option<Option<String>>,

    /// Print the architecture as JSON instead of a summary
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Which artifacts to generate after the architecture.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactRequest {
    pub diagram: bool,
    pub infrastructure_code: bool,
    pub pricing: bool,
}

pub async fn run(config: &ArchwrightConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let requirements = read_requirements(&args)?;
    let pipeline = super::build_pipeline(config)?;
    let session = super::open_session(config);

    let request = ArtifactRequest {
        diagram: args.diagram,
        infrastructure_code: args.terraform,
        pricing: args.pricing,
    };
    let current = analyze_into(&session, &pipeline, &requirements, request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&current.architecture)?);
    } else {
        print!("{}", display::view(&render_view(&current)));
    }

    if let Some(name) = args.save {
        let saved = session.save(name.as_deref(), Utc::now()).await?;
        println!("Saved as \"{}\"", saved.name);
    }
    Ok(())
}

/// Analyze `requirements`, make the result current, then attach whichever
/// artifacts were requested and could be generated.
pub async fn analyze_into(
    session: &Session,
    pipeline: &Arc<RecommendationPipeline>,
    requirements: &str,
    request: ArtifactRequest,
) -> anyhow::Result<Arc<SessionSnapshot>> {
    let architecture = pipeline
        .analyze(requirements)
        .await
        .context("Analysis failed")?;
    let current = session.start(SessionSnapshot::new(requirements, architecture));
    let arch = &current.architecture;

    let (diagram, code, pricing) = tokio::join!(
        async {
            if request.diagram {
                Some(pipeline.generate_diagram(arch).await)
            } else {
                None
            }
        },
        async {
            if request.infrastructure_code {
                Some(pipeline.generate_infrastructure_code(arch).await)
            } else {
                None
            }
        },
        async {
            if request.pricing {
                Some(pipeline.get_pricing(arch.core_services()).await)
            } else {
                None
            }
        },
    );

    // Each record amends the snapshot the previous one produced; a reset or
    // load in the meantime makes the rest no-ops.
    let mut latest = current.clone();
    match diagram {
        Some(Ok(diagram)) => {
            if let Some(next) = session.record_diagram(&latest, diagram) {
                latest = next;
            }
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Diagram generation failed");
            eprintln!("Diagram unavailable: {e}");
        }
        None => {}
    }
    match code {
        Some(Ok(code)) => {
            if let Some(next) = session.record_infrastructure_code(&latest, code) {
                latest = next;
            }
        }
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Infrastructure code generation failed");
            eprintln!("Terraform unavailable: {e}");
        }
        None => {}
    }
    if let Some(pricing) = pricing {
        session.record_pricing(&latest, pricing);
    }

    session
        .current()
        .context("current analysis was cleared during generation")
}

fn read_requirements(args: &AnalyzeArgs) -> anyhow::Result<String> {
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements from {}", path.display()));
    }
    match args.requirements.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read requirements from stdin")?;
            Ok(buf)
        }
        Some(text) => Ok(text.to_string()),
        None => anyhow::bail!("Requirements are required (argument, --file or `-` for stdin)"),
    }
}

use std::path::PathBuf;

use anyhow::Context;
use archwright_core::ArchwrightConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::analyze::AnalyzeArgs;

#[derive(Parser, Debug)]
#[command(name = "archwright", version, about = "Azure architecture recommendations from plain-language requirements")]
struct Cli {
    /// Configuration file (default: $ARCHWRIGHT_CONFIG, then ./archwright.yaml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP JSON API.
    Serve {
        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long)]
        port: Option<u16>,

        /// Serve files from this directory for unmatched paths
        #[arg(long = "static-dir")]
        static_dir: Option<PathBuf>,
    },

    /// Recommend an architecture for a project description.
    Analyze(AnalyzeArgs),

    /// Ask a follow-up question about a saved analysis.
    Ask {
        /// Position of the saved analysis (see `archwright saved list`)
        #[arg(long)]
        saved: usize,

        question: String,
    },

    /// Look up unit prices for Azure services.
    Pricing {
        /// Service names, e.g. "Azure App Service"
        #[arg(required = true)]
        services: Vec<String>,
    },

    /// Manage saved analyses.
    Saved {
        #[command(subcommand)]
        cmd: SavedCommand,
    },

    /// Write a saved analysis as a Markdown report.
    Export {
        /// Position of the saved analysis
        index: usize,

        /// Output file
        #[arg(long, short, default_value = archwright_report::DEFAULT_EXPORT_FILE)]
        output: PathBuf,

        /// Include live prices instead of the estimate
        #[arg(long, default_value_t = false)]
        pricing: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SavedCommand {
    /// List saved analyses
    List,

    /// Show one saved analysis
    Show { index: usize },

    /// Delete one saved analysis
    Delete { index: usize },

    /// Delete all saved analyses
    Clear {
        /// Required: confirm deleting everything
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ArchwrightConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    match cli.cmd {
        Command::Serve {
            host,
            port,
            static_dir,
        } => commands::serve::run(config, host, port, static_dir).await?,

        Command::Analyze(args) => commands::analyze::run(&config, args).await?,

        Command::Ask { saved, question } => commands::ask::run(&config, saved, &question).await?,

        Command::Pricing { services } => commands::pricing::run(&config, &services).await?,

        Command::Saved { cmd } => {
            let session = commands::open_session(&config);
            match cmd {
                SavedCommand::List => commands::saved::list(&session).await?,
                SavedCommand::Show { index } => commands::saved::show(&session, index).await?,
                SavedCommand::Delete { index } => commands::saved::delete(&session, index).await?,
                SavedCommand::Clear { yes } => commands::saved::clear(&session, yes).await?,
            }
        }

        Command::Export {
            index,
            output,
            pricing,
        } => commands::export::run(&config, index, &output, pricing).await?,
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "archwright",
            "analyze",
            "simple blog, low traffic",
            "--diagram",
            "--terraform",
            "--save",
            "Blog",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.cmd else {
            panic!("expected analyze");
        };
        assert_eq!(args.requirements.as_deref(), Some("simple blog, low traffic"));
        assert!(args.diagram && args.terraform && !args.pricing);
        assert_eq!(args.save, Some(Some("Blog".to_string())));
    }

    #[test]
    fn save_without_name_uses_default() {
        let cli = Cli::try_parse_from(["archwright", "analyze", "blog", "--save"]).unwrap();
        let Command::Analyze(args) = cli.cmd else {
            panic!("expected analyze");
        };
        assert_eq!(args.save, Some(None));
    }

    #[test]
    fn export_defaults_output_file() {
        let cli = Cli::try_parse_from(["archwright", "--config", "a.yaml", "export", "2"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.yaml")));
        let Command::Export { index, output, pricing } = cli.cmd else {
            panic!("expected export");
        };
        assert_eq!(index, 2);
        assert_eq!(output, PathBuf::from("azure-architecture-recommendation.md"));
        assert!(!pricing);
    }

    #[test]
    fn pricing_requires_services() {
        assert!(Cli::try_parse_from(["archwright", "pricing"]).is_err());
    }
}

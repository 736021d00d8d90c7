//! Command-line interface for the due-diligence report generator

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dd_llm::providers::{OpenAIConfig, OpenAIProvider};
use dd_report::report::save_report;
use dd_report::{DueDiligencePipeline, GeneratedReport, ReportConfig, ReportKind, ReportTemplate};
use dd_server::{AppState, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "dd")]
#[command(about = "Stock due-diligence reports from news and financial data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// News-driven business report
    Business(SingleArgs),
    /// Financial-data-driven technical report
    Technical(SingleArgs),
    /// Business, technical and merged reports in one run
    Report {
        ticker: String,
        /// Write the whole run as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the HTTP endpoint
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(clap::Args, Debug)]
struct SingleArgs {
    ticker: String,
    /// Output shape; defaults to text for business and html for technical
    #[arg(short, long, value_enum)]
    format: Option<Format>,
    /// Save the report; .txt, .html or .json is added to match the format
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Html,
    Json,
}

impl From<Format> for ReportTemplate {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Html => Self::Html,
            Format::Json => Self::Json,
        }
    }
}

fn pipeline() -> anyhow::Result<DueDiligencePipeline> {
    let config = ReportConfig::default().with_env_model();
    let llm = Arc::new(OpenAIProvider::with_config(OpenAIConfig::from_env())?);
    DueDiligencePipeline::with_yahoo(llm, &config).context("failed to build the pipeline")
}

fn print_report(report: &GeneratedReport) {
    if !report.is_complete() {
        warn!("Report finished with status {:?}", report.status);
    }
    println!("{}", report.to_text());
}

async fn single(kind: ReportKind, args: SingleArgs) -> anyhow::Result<()> {
    let kind = match args.format {
        Some(format) => kind.with_template(format.into()),
        None => kind,
    };

    let report = pipeline()?.report(args.ticker.trim(), &kind).await?;
    print_report(&report);

    if let Some(file_name) = args.output {
        save_report(&report.to_text(), &file_name, kind.template)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    dd_utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Business(args) => single(ReportKind::business(), args).await,
        Commands::Technical(args) => single(ReportKind::technical(), args).await,
        Commands::Report { ticker, output } => {
            let dd = pipeline()?.run(ticker.trim()).await?;
            print_report(&dd.merged);

            if let Some(path) = output {
                std::fs::write(&path, serde_json::to_string_pretty(&dd)?)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("Run saved to {}", path.display());
            }
            Ok(())
        },
        Commands::Serve { host, port } => {
            let mut config = ServerConfig::from_env();
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let state = Arc::new(AppState::new(pipeline()?));
            dd_server::serve(&config, state).await?;
            Ok(())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_business_with_format() {
        let cli = Cli::try_parse_from(["dd", "business", "AAPL", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Business(args) => {
                assert_eq!(args.ticker, "AAPL");
                assert!(matches!(args.format, Some(Format::Json)));
                assert!(args.output.is_none());
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["dd", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve { host: None, port: Some(9000) }
        ));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["dd", "technical", "MSFT", "--format", "pdf"]).is_err());
    }

    #[test]
    fn test_format_maps_to_template() {
        assert_eq!(ReportTemplate::from(Format::Html), ReportTemplate::Html);
    }
}

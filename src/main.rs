use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poker_log_stats::analyze::analyze;
use poker_log_stats::api::{build_router, state::AppState};
use poker_log_stats::config::AppConfig;
use poker_log_stats::models::{AnalysisReport, SessionExport, SessionSummary, SortKey};
use poker_log_stats::parse_duration;
use poker_log_stats::reader::{LogReader, StorageOrder};

const DEFAULT_CONFIG: &str = "./config.toml";

#[derive(Parser)]
#[command(name = "poker-log-stats")]
#[command(about = "Per-player statistics and playing style from poker hand histories")]
#[command(version)]
struct Cli {
    /// Path to configuration file [default: ./config.toml, skipped when absent]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a hand-history CSV export
    Analyze {
        /// CSV file to analyze
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Leaderboard order for the summary (profit, hands, winrate)
        #[arg(long, default_value = "profit")]
        sort: SortKey,

        /// Session length (e.g., "3h", "90m"), enables hands per hour
        #[arg(long)]
        duration: Option<String>,

        /// Rows are stored oldest-first
        #[arg(long)]
        oldest_first: bool,

        /// Write the output to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Start the API server
    Serve {
        /// Bind address (defaults to the config file value)
        #[arg(long)]
        host: Option<String>,

        /// Port number (defaults to the config file value)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full analysis report
    Json,
    /// Human-readable leaderboard
    Summary,
    /// Shareable session export
    Export,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load_or_default(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG))?,
    };

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(config.log_level.as_str());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let json_layer = cli
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!cli.json_logs)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!("Starting poker-log-stats v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Analyze {
            file,
            format,
            sort,
            duration,
            oldest_first,
            output,
        } => {
            if oldest_first {
                config.reader.order = StorageOrder::OldestFirst;
            }

            let duration = match duration {
                Some(raw) => Some(
                    parse_duration(&raw)
                        .with_context(|| format!("Invalid --duration: {}", raw))?,
                ),
                None => None,
            };

            let reader = LogReader::from_path(&file, &config.reader)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let report = analyze(&reader, config.analysis)
                .with_context(|| format!("Failed to analyze {}", file.display()))?;

            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
                OutputFormat::Summary => {
                    render_summary(&SessionSummary::from_report(&report, sort, duration))
                }
                OutputFormat::Export => {
                    let today = chrono::Local::now().date_naive();
                    let export = SessionExport::from_report(&report, reader.digest(), today);
                    tracing::info!("Session export {}", export.filename());
                    serde_json::to_string_pretty(&export)?
                }
            };

            emit(&rendered, output.as_deref())?;
            log_headline(&report);
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let app = build_router(AppState::new(config));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn log_headline(report: &AnalysisReport) {
    tracing::info!(
        "{} hands, {} players (preflop {}, flop {}, turn {}, river {})",
        report.total_hands,
        report.players.len(),
        report.hand_endings.preflop,
        report.hand_endings.flop,
        report.hand_endings.turn,
        report.hand_endings.river
    );
}

fn render_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!("Hands: {}\n", summary.total_hands));
    out.push_str(&format!("Money in play: {:.2}\n", summary.money_in_play));
    out.push_str(&format!("Biggest win: {:.2}\n", summary.biggest_win));
    out.push_str(&format!("Biggest loss: {:.2}\n", summary.biggest_loss));
    if let Some(rate) = summary.hands_per_hour {
        out.push_str(&format!("Hands per hour: {:.1}\n", rate));
    }

    out.push_str(&format!(
        "\n{:<20} {:>10} {:>6} {:>8} {:>7} {:>6}\n",
        "Player", "Net", "Hands", "Win%", "VPIP", "AF"
    ));
    for row in &summary.rows {
        out.push_str(&format!(
            "{:<20} {:>10.2} {:>6} {:>7.1}% {:>6.1}% {:>6.2}\n",
            row.name,
            row.net_profit,
            row.hands_played,
            row.win_rate * 100.0,
            row.vpip,
            row.aggression_factor
        ));
    }

    out
}

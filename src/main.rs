//! Leadwatch CLI
//!
//! Terminal dashboard for the lead-generation pipeline:
//! - Watch the pipeline, refreshing on the configured period
//! - Fetch once and print the dashboard
//! - Generate a default config file

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leadwatch::config::{ConfigSource, LoadReport, LoggingConfig};
use leadwatch::{
    generate_default_config, run_cycle, Config, CycleReport, DashboardSession, DashboardView,
    ExpansionState, HttpFetcher, RefreshConfig, RefreshLoop, Tab,
};

#[derive(Parser)]
#[command(name = "leadwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard for a lead-generation pipeline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend API base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh periodically and re-render on every change (default)
    Watch(ViewArgs),

    /// Run one fetch cycle and print the dashboard
    Once(ViewArgs),

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
pub struct ViewArgs {
    /// Open the SERP panel of a company (repeatable)
    #[arg(short, long = "expand", value_name = "COMPANY")]
    pub expand: Vec<String>,

    /// Open every SERP panel
    #[arg(long)]
    pub expand_all: bool,

    /// Sections to show
    #[arg(short, long, value_enum, default_value_t = TabChoice::All)]
    pub tab: TabChoice,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TabChoice {
    Chart,
    Leads,
    #[default]
    All,
}

impl TabChoice {
    fn tabs(&self) -> &'static [Tab] {
        match self {
            TabChoice::Chart => &[Tab::Chart],
            TabChoice::Leads => &[Tab::Leads],
            TabChoice::All => &Tab::ALL,
        }
    }
}

impl ViewArgs {
    /// Expansion state for the current lead list
    fn expansion(&self, session: &DashboardSession) -> ExpansionState {
        let mut expansion = ExpansionState::new();
        if self.expand_all {
            expansion.expand_all(session.leads());
            return expansion;
        }

        for lead in session.leads() {
            if self
                .expand
                .iter()
                .any(|name| name.eq_ignore_ascii_case(&lead.company_name))
            {
                expansion.expand(lead.key());
            }
        }
        expansion
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        return write_default_config(output.as_ref());
    }

    // Discovery is logged once the subscriber exists
    let (mut config, report) = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)?;
            let report = LoadReport {
                source: ConfigSource::File(path.clone()),
                failures: Vec::new(),
            };
            (config, report)
        }
        None => Config::discover(),
    };
    if let Some(url) = &cli.api_url {
        config.backend.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::info!("Leadwatch v{}", env!("CARGO_PKG_VERSION"));
    report.log();
    tracing::info!(api = %config.backend.base_url, "Using backend");

    let fetcher = HttpFetcher::from_config(&config.backend).context("Failed to create HTTP client")?;
    let refresh = RefreshConfig::from(&config.refresh);

    match cli.command {
        Some(Commands::Once(view)) => once(fetcher, refresh, &view, cli.format).await,
        Some(Commands::Watch(view)) => watch(fetcher, refresh, &view, cli.format).await,
        None => watch(fetcher, refresh, &ViewArgs::default(), cli.format).await,
        Some(Commands::Config { .. }) => Ok(()),
    }
}

fn init_logging(logging: &LoggingConfig) {
    // Logs go to stderr, the dashboard owns stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("leadwatch={}", logging.level)));

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write config to {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn render(session: &DashboardSession, view: &ViewArgs, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&session.snapshot())?);
        }
        OutputFormat::Text => {
            let dashboard = DashboardView::build(session, &view.expansion(session), &Local);
            println!("{}", dashboard.render_text(view.tab.tabs()));
        }
    }
    Ok(())
}

async fn once(
    fetcher: HttpFetcher,
    refresh: RefreshConfig,
    view: &ViewArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut session = refresh.new_session();
    let report = run_cycle(&fetcher, &mut session).await;
    render(&session, view, format)?;

    if let Some(CycleReport::Failed { message }) = report {
        bail!(message);
    }
    Ok(())
}

async fn watch(
    fetcher: HttpFetcher,
    refresh: RefreshConfig,
    view: &ViewArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let handle = RefreshLoop::new(fetcher, refresh).spawn();
    let mut updates = handle.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down...");
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = updates.borrow_and_update().clone();
                render(&session, view, format)?;
            }
        }
    }

    handle.shutdown().await;
    tracing::info!("Leadwatch stopped");
    Ok(())
}

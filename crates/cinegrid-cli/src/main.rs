//! cinegrid - popular movie and TV series catalog viewer for TMDB.

/// Catalog model: title records, search filter, grid layout, fetcher.
mod catalog;
/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use cinegrid_api::tmdb::MediaKind;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::catalog::{Catalog, Columns, fetch_popular, filter_titles};
use crate::config::{AppConfig, Overrides, Settings, resolve_config_path, resolve_log_path};
use crate::tui::grid_viewer::state::GridViewerState;
use crate::tui::run_grid_viewer;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse popular movies in a card grid.
    Movies(ViewArgs),
    /// Browse popular TV series in a card grid.
    Tv(ViewArgs),
    /// Print the popular list without the TUI.
    Popular(PopularArgs),
    /// Manage the config file.
    Config(ConfigCommand),
}

impl Commands {
    /// Returns `true` for commands that take over the terminal.
    const fn is_tui(&self) -> bool {
        matches!(self, Self::Movies(_) | Self::Tv(_))
    }
}

/// Arguments for the `movies` and `tv` subcommands.
#[derive(clap::Args)]
struct ViewArgs {
    /// Cards per row (1, 2, 3, 4 or 6).
    #[arg(long, value_parser = Columns::parse)]
    columns: Option<Columns>,

    /// Initial search text.
    #[arg(long)]
    query: Option<String>,
}

/// Catalog selector for `popular`.
#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    /// Popular movies.
    Movie,
    /// Popular TV series.
    Tv,
}

impl From<KindArg> for MediaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Movie => Self::Movie,
            KindArg::Tv => Self::Tv,
        }
    }
}

/// Arguments for the `popular` subcommand.
#[derive(clap::Args)]
struct PopularArgs {
    /// Catalog to list.
    #[arg(value_enum)]
    kind: KindArg,

    /// Only print titles whose name contains this text (case-insensitive).
    #[arg(long)]
    query: Option<String>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a config file populated with the defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Show the effective settings.
    Show,
}

/// Loads `config.toml` and resolves the effective settings.
///
/// # Errors
///
/// Returns an error if the config file or an override is invalid.
fn load_settings(dir: Option<&PathBuf>, overrides: Overrides) -> Result<Settings> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;
    Settings::from_env(&config, overrides)
}

/// Runs the `movies` / `tv` subcommands.
///
/// # Errors
///
/// Returns an error if no API key is configured or the TUI fails.
#[instrument(skip_all, fields(kind = %kind))]
#[allow(clippy::future_not_send)]
async fn run_view(kind: MediaKind, args: ViewArgs, dir: Option<&PathBuf>) -> Result<()> {
    let overrides = Overrides {
        columns: args.columns,
    };
    let settings = load_settings(dir, overrides)?;
    let client = settings.build_client()?;
    let params = settings.popular_params();

    let state = GridViewerState::new(
        kind,
        settings.images.clone(),
        settings.columns,
        args.query.unwrap_or_default(),
    );

    tracing::info!(columns = %settings.columns, "Launching TUI...");
    run_grid_viewer(&client, &params, state)
        .await
        .context("grid viewer TUI failed")
}

/// Runs the `popular` subcommand.
///
/// A failed fetch is logged and reported as an empty list.
///
/// # Errors
///
/// Returns an error if no API key is configured.
#[instrument(skip_all)]
#[allow(clippy::future_not_send)]
async fn run_popular(args: &PopularArgs, dir: Option<&PathBuf>) -> Result<()> {
    let kind = MediaKind::from(args.kind);
    let settings = load_settings(dir, Overrides::default())?;
    let client = settings.build_client()?;

    let mut catalog = Catalog::new(kind);
    catalog.apply_fetch(fetch_popular(&client, kind, &settings.popular_params()).await);

    let titles = filter_titles(&catalog.titles, args.query.as_deref().unwrap_or_default());

    tracing::info!("{}", kind.heading());
    tracing::info!("ID\tRating\t\tReleased\tName");
    for title in &titles {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            title.id,
            title.rating_bar(),
            title.release_label(),
            title.name,
        );
    }
    tracing::info!("Total: {} titles", titles.len());

    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `force`) or cannot be written.
#[instrument(skip_all)]
fn run_config_init(force: bool, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::with_defaults().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config file or an override is invalid.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let settings = load_settings(dir, Overrides::default())?;

    tracing::info!(
        "Config file: {}{}",
        path.display(),
        if path.exists() { "" } else { " (not found)" }
    );
    tracing::info!("API base URL: {}", settings.base_url);
    tracing::info!("Image base:   {}", settings.images.url(""));
    tracing::info!("API key:      {}", settings.masked_api_key());
    tracing::info!(
        "Language:     {}",
        settings.language.as_deref().unwrap_or("(API default)")
    );
    tracing::info!("Columns:      {}", settings.columns);
    Ok(())
}

/// Opens the TUI log file in append mode.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_log_file(dir: Option<&PathBuf>) -> Result<File> {
    let path = resolve_log_path(dir)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Installs the global tracing subscriber.
///
/// Output goes to `log_file` when given (the TUI owns the terminal),
/// otherwise to stdout.
fn init_tracing(log_file: Option<File>) {
    let ansi = log_file.is_none();
    let writer = log_file.map_or_else(
        || BoxMakeWriter::new(std::io::stdout),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = if cli.command.is_tui() {
        Some(open_log_file(cli.dir.as_ref())?)
    } else {
        None
    };
    init_tracing(log_file);

    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Movies(args) => run_view(MediaKind::Movie, args, dir).await,
        Commands::Tv(args) => run_view(MediaKind::Tv, args, dir).await,
        Commands::Popular(args) => run_popular(&args, dir).await,
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Init { force } => run_config_init(force, dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
    }
}

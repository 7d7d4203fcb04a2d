//! cinedex - movie and TV browsing server backed by TMDB.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use cinedex_api::tmdb::{
    MediaType, SearchMovieParams, TmdbApi, TmdbClient, TmdbImage, TmdbSearchMovieResponse,
};
use cinedex_web::build_app_router;
use cinedex_web::config::{AppConfig, TmdbConfig, resolve_config_path};
use cinedex_web::state::AppState;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

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
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Query TMDB API.
    Tmdb(TmdbCommand),
    /// Inspect or create the config file.
    Config(ConfigCommand),
}

/// Arguments for the `serve` subcommand.
#[derive(clap::Args)]
struct ServeArgs {
    /// Bind address (overrides config and `HOST`).
    #[arg(long)]
    host: Option<String>,
    /// Bind port (overrides config and `PORT`).
    #[arg(long)]
    port: Option<u16>,
}

/// Arguments for the `tmdb` subcommand.
#[derive(clap::Args)]
struct TmdbCommand {
    /// TMDB subcommand to run.
    #[command(subcommand)]
    command: TmdbSubcommands,
}

/// Available TMDB subcommands.
#[derive(Subcommand)]
enum TmdbSubcommands {
    /// Search for movies on TMDB.
    SearchMovie(TmdbSearchMovieArgs),
    /// List the images of a movie or TV series.
    Images(TmdbImagesArgs),
}

/// Arguments for the `tmdb search-movie` subcommand.
#[derive(clap::Args)]
struct TmdbSearchMovieArgs {
    /// Search query (e.g. "Dune").
    #[arg(long, required = true)]
    query: String,
    /// Result page (1-1000).
    #[arg(long)]
    page: Option<u32>,
    /// Release year filter.
    #[arg(long)]
    year: Option<u32>,
    /// Response language (default: "en").
    #[arg(long, default_value = "en")]
    language: String,
}

/// Media type accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum MediaKind {
    /// A movie.
    Movie,
    /// A TV series.
    Tv,
}

impl From<MediaKind> for MediaType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Movie => Self::Movie,
            MediaKind::Tv => Self::Tv,
        }
    }
}

/// Arguments for the `tmdb images` subcommand.
#[derive(clap::Args)]
struct TmdbImagesArgs {
    /// Movie or TV series.
    #[arg(long, value_enum)]
    media_type: MediaKind,
    /// TMDB ID.
    #[arg(long, required = true)]
    id: u64,
    /// Preferred image language (default: "en").
    #[arg(long, default_value = "en")]
    language: String,
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
    /// Print the resolved config file path.
    Path,
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Loads the config file and applies environment overrides.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved, the file is invalid,
/// or an override is malformed.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;
    config.apply_env(|key| std::env::var(key).ok())?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set, the configured base URL
/// is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &TmdbConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .min_interval(Duration::from_millis(config.min_interval_ms));
    if let Some(base_url) = &config.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid tmdb.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Runs the `serve` subcommand until SIGINT or SIGTERM.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the TMDB client fails to
/// build, or the listener cannot bind.
#[instrument(skip_all)]
async fn run_serve(args: &ServeArgs, dir: Option<&PathBuf>) -> Result<()> {
    let mut config = load_config(dir)?;
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    let ip: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.server.host))?;
    let addr = SocketAddr::new(ip, config.server.port);

    let tmdb = build_tmdb_client(&config.tmdb)?;
    let state = AppState::new(tmdb, config)?;
    let app = build_app_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). A handler that
/// fails to install is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}

/// Runs the `tmdb search-movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_tmdb_search_movie(args: &TmdbSearchMovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;

    let mut params = SearchMovieParams::new(&args.query)
        .language(&args.language)
        .page(args.page);
    if let Some(year) = args.year {
        params = params.year(year);
    }
    let response = client
        .search_movie(&params)
        .await
        .context("TMDB search/movie request failed")?;

    log_movie_results(&response);
    Ok(())
}

/// Logs one line per search result.
fn log_movie_results(response: &TmdbSearchMovieResponse) {
    tracing::info!(
        "Total results: {} (page {}/{})",
        response.total_results,
        response.page,
        response.total_pages
    );
    tracing::info!("ID\tTitle\t\t\tOrigLang\tReleaseDate");
    for result in &response.results {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            result.id,
            result.title,
            result.original_language,
            result
                .release_date
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("-"),
        );
    }
}

/// Runs the `tmdb images` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build, the API request
/// fails, or TMDB has no such title.
#[instrument(skip_all)]
async fn run_tmdb_images(args: &TmdbImagesArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config.tmdb)?;
    let media_type = MediaType::from(args.media_type);

    let Some(images) = client
        .images(media_type, args.id, &args.language)
        .await
        .context("TMDB images request failed")?
    else {
        bail!("no {} with ID {} on TMDB", media_type.as_path(), args.id);
    };

    for (kind, list) in [
        ("backdrops", &images.backdrops),
        ("logos", &images.logos),
        ("posters", &images.posters),
    ] {
        log_images(kind, list);
    }
    Ok(())
}

/// Logs a heading and one line per image.
fn log_images(kind: &str, images: &[TmdbImage]) {
    tracing::info!("{} ({}):", kind, images.len());
    for image in images {
        tracing::info!(
            "  {}x{}\t{}\t{}",
            image.width,
            image.height,
            image.iso_639_1.as_deref().unwrap_or("-"),
            image.file_path,
        );
    }
}

/// Runs the `config path` subcommand.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved.
fn run_config_path(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    tracing::info!("{}", path.display());
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or the
/// write fails.
fn run_config_init(dir: Option<&PathBuf>, force: bool) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Installs the global subscriber.
///
/// Without the `otel` feature only the fmt layer is installed.
#[cfg(not(feature = "otel"))]
fn init_tracing() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Installs the global subscriber.
///
/// When `OTEL_EXPORTER_OTLP_ENDPOINT` is set, spans are exported in batches
/// from a background thread. The returned provider must be shut down before
/// exit so buffered spans are flushed.
#[cfg(feature = "otel")]
fn init_tracing() -> Option<opentelemetry_sdk::trace::SdkTracerProvider> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let tracer_provider = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .and_then(|_| {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .build()
                .ok()?;
            Some(batch_tracer_provider(exporter))
        });

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        let tracer =
            opentelemetry::trace::TracerProvider::tracer(provider, env!("CARGO_PKG_NAME"));
        opentelemetry::global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    tracer_provider
}

/// Tracer provider exporting spans in batches from a background thread,
/// so request handlers never wait on the collector.
#[cfg(feature = "otel")]
fn batch_tracer_provider(
    exporter: opentelemetry_otlp::SpanExporter,
) -> opentelemetry_sdk::trace::SdkTracerProvider {
    opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build()
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "otel")]
    let tracer_provider = init_tracing();
    #[cfg(not(feature = "otel"))]
    init_tracing();

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    let result = match cli.command {
        Commands::Serve(args) => run_serve(&args, dir).await,
        Commands::Tmdb(tmdb) => match tmdb.command {
            TmdbSubcommands::SearchMovie(args) => run_tmdb_search_movie(&args, dir).await,
            TmdbSubcommands::Images(args) => run_tmdb_images(&args, dir).await,
        },
        Commands::Config(cfg) => match cfg.command {
            ConfigSubcommands::Path => run_config_path(dir),
            ConfigSubcommands::Init { force } => run_config_init(dir, force),
        },
    };

    #[cfg(feature = "otel")]
    if let Some(provider) = tracer_provider {
        // The batch processor joins its export thread; keep that off the runtime.
        let shutdown = tokio::task::spawn_blocking(move || provider.shutdown()).await;
        match shutdown {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to flush OTLP spans"),
            Err(e) => tracing::warn!(error = %e, "OTLP shutdown task failed"),
        }
    }

    result
}

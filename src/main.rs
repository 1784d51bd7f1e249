//! Terminal L2 orderbook viewer entry point.

use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use l2book_viewer::config::Config;
use l2book_viewer::feed::{HttpBookFeed, PollOutcome};
use l2book_viewer::metrics;
use l2book_viewer::orderbook::format::render_text_ladder;
use l2book_viewer::session::{ApplyResult, BookController, Pane};
use l2book_viewer::tui::run_tui;

/// Terminal L2 orderbook viewer.
#[derive(Parser, Debug)]
#[command(name = "l2book")]
#[command(about = "Poll an order book snapshot endpoint and display a depth ladder")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Symbol selected at start-up.
    #[arg(short, long)]
    symbol: Option<String>,

    /// Snapshot endpoint URL.
    #[arg(long)]
    url: Option<String>,

    /// Milliseconds between polls.
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the live terminal display (default).
    Run {
        /// Symbol selected at start-up.
        #[arg(short, long)]
        symbol: Option<String>,

        /// Snapshot endpoint URL.
        #[arg(long)]
        url: Option<String>,

        /// Milliseconds between polls.
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Fetch once and print the ladder.
    Snapshot {
        /// Print only this symbol (default: every symbol in the snapshot).
        #[arg(short, long)]
        symbol: Option<String>,

        /// Snapshot endpoint URL.
        #[arg(long)]
        url: Option<String>,

        /// Print the derived view as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch once and list the available symbols.
    Symbols {
        /// Snapshot endpoint URL.
        #[arg(long)]
        url: Option<String>,
    },

    /// Check configuration validity.
    CheckConfig,
}

/// Where log lines go.
enum LogSink {
    /// Stderr, for one-shot commands.
    Stderr,
    /// Append to a file while the terminal UI owns the screen.
    File(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let command = args.command.unwrap_or(Command::Run {
        symbol: args.symbol,
        url: args.url,
        interval_ms: args.interval_ms,
    });

    // Handle subcommands
    match command {
        Command::Run { symbol, url, interval_ms } => {
            let mut config = init_runtime(args.verbose, true)?;
            apply_overrides(&mut config, symbol, url, interval_ms)?;
            cmd_run(&config).await
        }
        Command::Snapshot { symbol, url, json } => {
            let mut config = init_runtime(args.verbose, false)?;
            apply_overrides(&mut config, None, url, None)?;
            cmd_snapshot(&config, symbol, json).await
        }
        Command::Symbols { url } => {
            let mut config = init_runtime(args.verbose, false)?;
            apply_overrides(&mut config, None, url, None)?;
            cmd_symbols(&config).await
        }
        Command::CheckConfig => {
            // Reports load failures itself
            init_logging(args.verbose, "info", LogSink::Stderr)?;
            cmd_check_config()
        }
    }
}

/// Load configuration, then initialize logging and metrics.
///
/// The terminal UI owns stdout, so `log_to_file` sends log lines to
/// `LOG_FILE` instead of stderr.
fn init_runtime(verbose: bool, log_to_file: bool) -> anyhow::Result<Config> {
    let config = Config::load()?;

    let sink = if log_to_file {
        LogSink::File(config.log_file.clone())
    } else {
        LogSink::Stderr
    };
    init_logging(verbose, &config.rust_log, sink)?;

    // Initialize metrics
    metrics::init_metrics();
    if let Some(port) = config.metrics_port {
        metrics::install_exporter(port)?;
    }

    Ok(config)
}

fn init_logging(verbose: bool, level: &str, sink: LogSink) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("l2book_viewer=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    let (file_layer, stderr_layer) = match sink {
        LogSink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            (
                Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false)),
                None,
            )
        }
        LogSink::Stderr => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter)
        .init();

    Ok(())
}

fn apply_overrides(
    config: &mut Config,
    symbol: Option<String>,
    url: Option<String>,
    interval_ms: Option<u64>,
) -> anyhow::Result<()> {
    if let Some(symbol) = symbol {
        config.default_symbol = symbol;
    }
    if let Some(url) = url {
        config.book_url = url;
    }
    if let Some(ms) = interval_ms {
        config.poll_interval_ms = ms;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))
}

/// Run the live display.
async fn cmd_run(config: &Config) -> anyhow::Result<()> {
    info!("========================================");
    info!("L2 ORDERBOOK VIEWER");
    info!("  Endpoint: {}", config.book_url);
    info!("  Interval: {}ms", config.poll_interval_ms);
    info!("  Symbol: {}", config.default_symbol);
    info!("========================================");

    run_tui(config).await?;
    Ok(())
}

/// Fetch one snapshot through the same controller the display uses, so a
/// failed fetch falls back exactly as the first poll would.
async fn fetch_once(config: &Config) -> anyhow::Result<BookController> {
    let feed = HttpBookFeed::new(config)?;
    let mut controller = BookController::from_config(config);

    let result = feed.get_snapshot().await;
    let applied = controller.apply_outcome(PollOutcome { seq: 1, result });
    if let ApplyResult::FallbackAdopted { .. } = applied {
        warn!(url = feed.url(), "Endpoint unavailable, showing built-in demo data");
        eprintln!("WARNING: {} unavailable, showing built-in demo data", feed.url());
    }

    Ok(controller)
}

/// Print the ladder for one or every symbol.
async fn cmd_snapshot(config: &Config, symbol: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut controller = fetch_once(config).await?;

    let symbols = match symbol {
        Some(s) => vec![s],
        None => controller.available_symbols().to_vec(),
    };

    let mut views = Vec::new();
    for symbol in symbols {
        controller.select(symbol.clone());
        match controller.pane() {
            Pane::Book(view) => views.push(view),
            Pane::Empty | Pane::Loading => {
                return Err(anyhow::anyhow!("No book for {} in snapshot", symbol));
            }
        }
    }

    if json {
        let views: Vec<_> = views.iter().map(|v| v.as_ref()).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        for view in views {
            println!("{}", render_text_ladder(&view));
        }
    }

    Ok(())
}

/// List symbols in the current snapshot.
async fn cmd_symbols(config: &Config) -> anyhow::Result<()> {
    let controller = fetch_once(config).await?;

    let origin = controller
        .snapshot()
        .map(|s| s.origin.to_string())
        .unwrap_or_default();

    println!("======================================================================");
    println!("AVAILABLE SYMBOLS ({})", origin);
    println!("======================================================================");
    for (i, symbol) in controller.available_symbols().iter().enumerate() {
        println!("  {}. {}", i + 1, symbol);
    }
    println!("======================================================================");

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("L2 ORDERBOOK VIEWER - CONFIGURATION CHECK");
    println!("======================================================================");

    // Load configuration
    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    // Validate configuration
    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    // Show configuration summary
    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Endpoint: {}", config.book_url);
    println!("  Poll Interval: {}ms", config.poll_interval_ms);
    println!("  HTTP Timeout: {}ms", config.http_timeout_ms);
    println!("  Default Symbol: {}", config.default_symbol);
    println!("  Notice TTL: {}ms", config.notice_ttl_ms);
    println!("  Log File: {}", config.log_file);
    match config.metrics_port {
        Some(port) => println!("  Metrics: http://0.0.0.0:{}/metrics", port),
        None => println!("  Metrics: Disabled"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

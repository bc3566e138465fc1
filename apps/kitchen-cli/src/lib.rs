//! # Kitchen CLI Library
//!
//! Command-line front end for the billing store. `main.rs` only calls
//! [`run`]; everything else lives here so commands can be tested without
//! a process.
//!
//! ## Module Organization
//! ```text
//! kitchen_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── Environment + flag configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Session + dispatch
//! │   ├── corporate.rs
//! │   ├── event.rs
//! │   ├── bills.rs    ◄─── list / show / delete / reset
//! │   └── calc.rs     ◄─── words / line
//! ├── render.rs       ◄─── Text views of bills
//! └── error.rs        ◄─── CLI error type and exit codes
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use clap::Parser;
use kitchen_store::BillingStore;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::Session;
use config::CliConfig;
use error::CliError;

/// Runs the CLI and returns the process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                          CLI Startup                                    │
/// │                                                                         │
/// │  1. Parse arguments (clap) ───────────────────────────────────────────► │
/// │     • --help / --version / usage errors exit here                       │
/// │                                                                         │
/// │  2. Resolve configuration ────────────────────────────────────────────► │
/// │     • KITCHEN_DATA_DIR, KITCHEN_STORAGE_KEY, KITCHEN_LOG                 │
/// │     • --data-dir / --json override the environment                      │
/// │                                                                         │
/// │  3. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber on stderr, RUST_LOG wins over KITCHEN_LOG      │
/// │                                                                         │
/// │  4. Open the store ───────────────────────────────────────────────────► │
/// │     • Missing or unreadable snapshot starts empty                       │
/// │                                                                         │
/// │  5. Dispatch the command, print result or error ──────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config = CliConfig::from_env().with_overrides(cli.data_dir.clone(), cli.json);

    init_tracing(&config.log_filter);
    debug!(?config, "Configuration resolved");

    let json = config.json;
    match execute(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            err.exit_code()
        }
    }
}

/// Opens the store described by `config` and runs one command against it.
pub fn execute(cli: Cli, config: &CliConfig) -> Result<(), CliError> {
    let storage = config.storage_config();
    let mut store = BillingStore::from_config(&storage)?;
    info!(
        data_dir = %config.data_dir.display(),
        key = %storage.storage_key,
        "Billing store ready"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut session = Session {
        store: &mut store,
        json: config.json,
        out: &mut out,
    };
    commands::dispatch(&mut session, cli.command)?;
    out.flush()?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `KITCHEN_LOG=kitchen=trace` - Used when `RUST_LOG` is unset
/// - Default: [`config::DEFAULT_LOG_FILTER`]
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    // Logs go to stderr so stdout stays clean for --json.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn report_error(err: &CliError, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string_pretty(err) {
            eprintln!("{text}");
            return;
        }
    }
    eprintln!("error: {}", err.message);
}

//! facegate: command-line front end for the face/QR login flow.

use anyhow::Context;
use clap::Parser;
use facegate_capture::{FileCamera, LineScanner};
use facegate_client::{init_logging, ClientConfig, Kiosk, LogFormat, PrintNavigator};
use facegate_flow::{CaptureOutcome, ScanOutcome};
use facegate_lookup::NO_IMAGE_MESSAGE;
use facegate_types::NavigationContext;
use std::future::Future;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status after Ctrl-C (128 + SIGINT).
const INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "facegate", about = "Face and QR code login against a recognition service")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "FACEGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the recognition service.
    #[arg(long, env = "FACEGATE_SERVER_URL")]
    server_url: Option<String>,

    /// Session file location.
    #[arg(long, env = "FACEGATE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Identifier that opens the admin view.
    #[arg(long, env = "FACEGATE_ADMIN_IDENTIFIER")]
    admin_identifier: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely).
    #[arg(long, env = "FACEGATE_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FACEGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FACEGATE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Capture a frame and verify it, optionally scanning a QR code first.
    Login {
        /// Pre-filled roll number.
        #[arg(long)]
        identifier: Option<String>,

        /// JPEG frame to submit. Re-read at capture time.
        #[arg(long, default_value = "./frame.jpg")]
        image: PathBuf,

        /// Read decoded QR payloads from stdin before capturing
        /// (e.g. `zbarcam --raw | facegate login --scan`). Ctrl-C closes the scanner.
        #[arg(long)]
        scan: bool,
    },
    /// Fetch the stored reference image of a user.
    Lookup {
        username: String,

        /// Write the decoded JPEG here instead of printing a data URI.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the persisted session.
    Session,
    /// Clear the persisted session.
    Logout,
}

/// File settings first, then env vars and flags on top.
fn resolve_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ClientConfig::default(),
    };

    if let Some(server_url) = &cli.server_url {
        config.server_url = server_url.clone();
    }
    if let Some(session_file) = &cli.session_file {
        config.session_file = session_file.clone();
    }
    if let Some(admin) = &cli.admin_identifier {
        config.admin_identifier = admin.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout_secs = Some(secs);
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(config.log_format, &config.log_level)?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(cli.command, config));
    // A stdin read may still be parked on a blocking thread.
    runtime.shutdown_background();
    result
}

/// Resolves on Ctrl-C. Never resolves if the signal cannot be watched.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Drive `work` to completion unless `interrupt` resolves first.
async fn until_interrupted<T>(
    work: impl Future<Output = T>,
    interrupt: impl Future<Output = ()>,
) -> Option<T> {
    tokio::select! {
        output = work => Some(output),
        () = interrupt => None,
    }
}

async fn run(command: Command, config: ClientConfig) -> anyhow::Result<ExitCode> {
    let kiosk = Kiosk::from_config(config)?;
    match command {
        Command::Login {
            identifier,
            image,
            scan,
        } => login(&kiosk, identifier, image, scan).await,
        Command::Lookup { username, output } => lookup(&kiosk, &username, output).await,
        Command::Session => {
            println!("{}", serde_json::to_string_pretty(&kiosk.session_record())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Logout => {
            kiosk.logout()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn login(
    kiosk: &Kiosk,
    identifier: Option<String>,
    image: PathBuf,
    scan: bool,
) -> anyhow::Result<ExitCode> {
    let mut flow = kiosk.flow(
        FileCamera::new(image),
        LineScanner::stdin(),
        PrintNavigator::stdout(),
    );
    flow.mount(&NavigationContext {
        rollnumber: identifier,
    })?;

    if scan {
        eprintln!("Waiting for a QR code on stdin (Ctrl-C to close the scanner)...");
        match flow.scan(ctrl_c()).await? {
            ScanOutcome::Identified(id) => eprintln!("Scanned identifier: {id}"),
            ScanOutcome::Cancelled | ScanOutcome::SourceClosed => {
                if let Some(error) = flow.machine().scan_error() {
                    eprintln!("{error}");
                }
                eprintln!("Scanner closed; using identifier {:?}", flow.machine().identifier().as_str());
            }
        }
    }

    // A watched Ctrl-C no longer terminates the process, so honor it here too.
    let Some(verified) = until_interrupted(flow.capture_and_verify(), ctrl_c()).await else {
        eprintln!("Interrupted; verification abandoned.");
        return Ok(ExitCode::from(INTERRUPTED));
    };
    match verified? {
        // The navigator has already printed the handoff.
        CaptureOutcome::Navigated(_) => Ok(ExitCode::SUCCESS),
        CaptureOutcome::Failed(failure) => {
            println!("{}", failure.status_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn lookup(kiosk: &Kiosk, username: &str, output: Option<PathBuf>) -> anyhow::Result<ExitCode> {
    let client = kiosk.lookup_client()?;
    let stored = match client.fetch(username).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            println!("{NO_IMAGE_MESSAGE}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            tracing::warn!(username, "lookup failed: {e}");
            println!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    match output {
        Some(path) => {
            std::fs::write(&path, stored.image.as_slice())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", path.display());
        }
        None => println!("{}", stored.data_uri()),
    }
    Ok(ExitCode::SUCCESS)
}

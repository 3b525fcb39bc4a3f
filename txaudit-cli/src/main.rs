//! Command-line auditor for encrypted transaction logs.
//!
//! Output contract:
//! - stdout: exactly one `TOTAL_AMOUNT: <total>` line on success.
//! - stderr: one `Error reading <filename>: <message>` line per log
//!   file that could not be read, plus any tracing diagnostics.
//! - exit code: 0 whenever a total was produced, even if individual
//!   rows failed; nonzero only for the fatal conditions (unrecoverable
//!   key, unloadable manifest).

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use txaudit_core::{run_audit, AuditPaths, RowOutcome};

/// Audits a set of encrypted transaction logs and prints the total of
/// all verified, decryptable entries.
#[derive(Debug, Parser)]
#[command(name = "txaudit", version, about)]
struct Cli {
    /// Manifest CSV listing transaction ids and verification hashes.
    #[arg(long, env = "TXAUDIT_MANIFEST", default_value = "manifest.csv")]
    manifest: PathBuf,

    /// Directory holding the encrypted `<transaction_id>.dat` logs.
    #[arg(long, env = "TXAUDIT_LOGS_DIR", default_value = "logs")]
    logs_dir: PathBuf,

    /// PNG image whose metadata carries the decryption key.
    #[arg(long, env = "TXAUDIT_IMAGE", default_value = "server_room.png")]
    image: PathBuf,

    /// Log per-row detail (skipped rows, payload anomalies) to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = AuditPaths::new(cli.manifest, cli.logs_dir, cli.image);
    tracing::debug!(
        manifest = %paths.manifest().display(),
        logs_dir = %paths.logs_dir().display(),
        image = %paths.image().display(),
        "starting audit"
    );
    let summary = run_audit(&paths)?;

    for report in &summary.rows {
        if let RowOutcome::ReadFailed { path, message } = &report.outcome {
            let filename = path.file_name().map_or_else(
                || path.display().to_string(),
                |name| name.to_string_lossy().into_owned(),
            );
            eprintln!("Error reading {filename}: {message}");
        }
    }

    println!("TOTAL_AMOUNT: {}", summary.formatted_total());
    Ok(())
}

/// Initializes the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug`
/// against a default of `warn`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// idtrust CLI - cross-validate identity document extractions

mod config;
mod decide;
mod exit_codes;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use idtrust_recon::checksum::verhoeff_valid;
use idtrust_recon::mask::mask_identifier;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_CHECKSUM_INVALID, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

const LOG_ENV: &str = "IDTRUST_LOG";

#[derive(Parser)]
#[command(name = "idtrust")]
#[command(about = "Cross-validate OCR, QR and offline XML extractions of an identity document")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). $IDTRUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score up to three extracted records and print a PASS / REVIEW / FAIL verdict
    #[command(after_help = "\
Examples:
  idtrust decide --ocr ocr.json --qr qr.json
  idtrust decide --ocr ocr.json --qr qr.json --xml xml.json --json
  idtrust decide --qr qr.json --output verdict.json
  cat submission.json | idtrust decide --stdin --json

Exit codes: 0 PASS, 3 REVIEW, 4 FAIL")]
    Decide(decide::DecideArgs),

    /// Check 12-digit identifiers against the Verhoeff checksum
    #[command(after_help = "\
Examples:
  idtrust checksum 234123412346
  idtrust checksum '2341 2341 2346' 111122223334 --json")]
    Checksum {
        /// Numbers to check (non-digits are ignored)
        #[arg(required = true)]
        numbers: Vec<String>,

        /// Output JSON instead of one line per number
        #[arg(long)]
        json: bool,
    },

    /// Inspect or validate the scoring config
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  idtrust-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  idtrust-recon ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
        )
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore the error: a subscriber may already be installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            };
        }
    };

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decide(args) => decide::cmd_decide(args),
        Commands::Checksum { numbers, json } => cmd_checksum(numbers, json),
        Commands::Config(cmd) => config::cmd_config(cmd),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    /// Non-zero exit without an error message (e.g. a REVIEW verdict).
    pub fn silent(code: u8) -> Self {
        Self { code, message: String::new(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// checksum
// ============================================================================

#[derive(Serialize)]
struct ChecksumResult {
    /// Digits only, masked like a verdict preview.
    number: String,
    valid: bool,
}

fn cmd_checksum(numbers: Vec<String>, json: bool) -> Result<(), CliError> {
    let results: Vec<ChecksumResult> = numbers
        .iter()
        .map(|n| {
            let digits: String = n.chars().filter(|c| c.is_ascii_digit()).collect();
            ChecksumResult {
                number: mask_identifier(&digits),
                valid: verhoeff_valid(n),
            }
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&results)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        println!("{out}");
    } else {
        for r in &results {
            println!("{}\t{}", r.number, if r.valid { "valid" } else { "invalid" });
        }
    }

    let invalid = results.iter().filter(|r| !r.valid).count();
    if invalid > 0 {
        log::info!("{invalid} of {} number(s) failed the checksum", results.len());
        return Err(CliError::silent(EXIT_CHECKSUM_INVALID));
    }
    Ok(())
}

//! `idtrust decide`: cross-validate OCR / QR / XML records.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use idtrust_recon::{Engine, FieldRecord, Source, Submission, Verdict};

use crate::config::load_scoring_config;
use crate::exit_codes::{outcome_exit_code, recon_exit_code, EXIT_IO, EXIT_SUCCESS};
use crate::CliError;

const RECORD_KEYS_HINT: &str =
    "records are JSON objects with optional identifier, name, date_of_birth, year_of_birth, checksum_valid";

#[derive(Args)]
pub struct DecideArgs {
    /// OCR record (JSON object)
    #[arg(long, value_name = "PATH")]
    pub ocr: Option<PathBuf>,

    /// QR record (JSON object)
    #[arg(long, value_name = "PATH")]
    pub qr: Option<PathBuf>,

    /// Offline XML record (JSON object)
    #[arg(long, value_name = "PATH")]
    pub xml: Option<PathBuf>,

    /// Read a {"ocr":..,"qr":..,"xml":..} envelope from stdin instead
    #[arg(long, conflicts_with_all = ["ocr", "qr", "xml"])]
    pub stdin: bool,

    /// Scoring config file (overrides $IDTRUST_CONFIG and the user config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the verdict JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Write the verdict JSON to a file
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub fn cmd_decide(args: DecideArgs) -> Result<(), CliError> {
    let (config, _) = load_scoring_config(args.config)?;
    let engine = Engine::new(config);

    let submission = if args.stdin {
        read_stdin_submission()?
    } else {
        Submission {
            ocr: read_record(Source::Ocr, args.ocr.as_deref())?,
            qr: read_record(Source::Qr, args.qr.as_deref())?,
            xml: read_record(Source::Xml, args.xml.as_deref())?,
        }
    };

    let verdict = engine.decide_submission(&submission);

    let json_str = serde_json::to_string_pretty(&verdict)
        .map_err(|e| CliError::new(EXIT_IO, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    }

    print_summary(&verdict, engine.config().max_score());

    match outcome_exit_code(verdict.outcome) {
        EXIT_SUCCESS => Ok(()),
        code => Err(CliError::silent(code)),
    }
}

fn read_record(source: Source, path: Option<&Path>) -> Result<Option<FieldRecord>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {e}", path.display())))?;
    let record = FieldRecord::from_json(source, &text).map_err(|e| {
        CliError::new(recon_exit_code(&e), format!("{}: {e}", path.display())).with_hint(RECORD_KEYS_HINT)
    })?;
    log::debug!("loaded {source} record from {}", path.display());
    Ok(record)
}

fn read_stdin_submission() -> Result<Submission, CliError> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| CliError::io(format!("cannot read stdin: {e}")))?;
    Submission::from_json(&text)
        .map_err(|e| CliError::new(recon_exit_code(&e), e.to_string()).with_hint(RECORD_KEYS_HINT))
}

/// Human summary to stderr.
fn print_summary(verdict: &Verdict, max_score: u32) {
    eprintln!(
        "{}: score {}/{}, identifier {}",
        verdict.outcome,
        verdict.score,
        max_score,
        verdict.preview.identifier.as_deref().unwrap_or("(none)"),
    );
    for reason in &verdict.reasons {
        eprintln!("  - {reason}");
    }
}

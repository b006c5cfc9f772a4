//! `idtrust config` plus scoring-config resolution shared by all commands.
//!
//! Resolution order: `--config PATH`, then `$IDTRUST_CONFIG`, then
//! `<config_dir>/idtrust/scoring.toml` when it exists, else built-in defaults.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use idtrust_recon::ScoringConfig;

use crate::exit_codes::{recon_exit_code, EXIT_INVALID_CONFIG};
use crate::CliError;

pub const CONFIG_ENV: &str = "IDTRUST_CONFIG";

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective scoring config as TOML
    #[command(after_help = "\
Examples:
  idtrust config show
  idtrust config show --config strict.toml")]
    Show {
        /// Scoring config file (overrides $IDTRUST_CONFIG and the user config dir)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Parse and validate a scoring config without running anything
    #[command(after_help = "\
Examples:
  idtrust config validate scoring.toml")]
    Validate {
        /// Path to the scoring .toml file
        config: PathBuf,
    },
}

pub fn cmd_config(cmd: ConfigCommands) -> Result<(), CliError> {
    match cmd {
        ConfigCommands::Show { config } => cmd_config_show(config),
        ConfigCommands::Validate { config } => cmd_config_validate(&config),
    }
}

fn cmd_config_show(explicit: Option<PathBuf>) -> Result<(), CliError> {
    let (config, origin) = load_scoring_config(explicit)?;
    let text = config
        .to_toml()
        .map_err(|e| CliError::new(recon_exit_code(&e), e.to_string()))?;
    match origin {
        Some(path) => println!("# source: {}", path.display()),
        None => println!("# source: built-in defaults"),
    }
    print!("{text}");
    Ok(())
}

fn cmd_config_validate(path: &Path) -> Result<(), CliError> {
    let config = read_config_file(path)?;
    eprintln!(
        "ok: {} (max score {}, pass >= {}, review >= {})",
        path.display(),
        config.max_score(),
        config.thresholds.pass,
        config.thresholds.review,
    );
    Ok(())
}

/// `<config_dir>/idtrust/scoring.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("idtrust").join("scoring.toml"))
}

/// Pick the config file to load, or `None` for built-in defaults.
///
/// Explicit and environment paths are returned even if missing so the
/// caller reports them; the default path only counts when it exists.
pub fn resolve_config_path(
    explicit: Option<PathBuf>,
    env: Option<String>,
    default: Option<PathBuf>,
) -> Option<PathBuf> {
    explicit
        .or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .or_else(|| default.filter(|p| p.is_file()))
}

/// Load the effective scoring config and where it came from.
pub fn load_scoring_config(
    explicit: Option<PathBuf>,
) -> Result<(ScoringConfig, Option<PathBuf>), CliError> {
    let env = std::env::var(CONFIG_ENV).ok();
    match resolve_config_path(explicit, env, default_config_path()) {
        Some(path) => {
            let config = read_config_file(&path)?;
            log::info!("scoring config loaded from {}", path.display());
            Ok((config, Some(path)))
        }
        None => {
            log::debug!("no scoring config found, using built-in defaults");
            Ok((ScoringConfig::default(), None))
        }
    }
}

fn read_config_file(path: &Path) -> Result<ScoringConfig, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_INVALID_CONFIG, format!("cannot read config {}: {e}", path.display()))
    })?;
    ScoringConfig::from_toml(&text).map_err(|e| {
        CliError::new(recon_exit_code(&e), format!("{}: {e}", path.display()))
            .with_hint("run `idtrust config show` to see the accepted keys and defaults")
    })
}

//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts branch on the
//! verdict without parsing output.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain    | Description                                   |
//! |------|-----------|-----------------------------------------------|
//! | 0    | Universal | Success (`decide`: verdict PASS)              |
//! | 2    | Universal | CLI usage error (bad args)                    |
//! | 3    | decide    | Verdict REVIEW                                |
//! | 4    | decide    | Verdict FAIL                                  |
//! | 5    | checksum  | At least one number failed the Verhoeff check |
//! | 6    | input     | A record or submission is malformed           |
//! | 7    | config    | Scoring config missing, unparseable, invalid  |
//! | 8    | io        | Cannot read input or write output             |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use idtrust_recon::{Outcome, ReconError};

// =============================================================================
// Universal (0, 2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Verdicts (3-4)
// =============================================================================

/// Verdict REVIEW: no contradiction severe enough to fail, not enough to pass.
pub const EXIT_REVIEW: u8 = 3;

/// Verdict FAIL.
pub const EXIT_FAIL: u8 = 4;

// =============================================================================
// Other failures (5-8)
// =============================================================================

/// `checksum`: one or more inputs are not valid 12-digit Verhoeff numbers.
pub const EXIT_CHECKSUM_INVALID: u8 = 5;

/// A record file or submission envelope has the wrong shape.
pub const EXIT_MALFORMED_RECORD: u8 = 6;

/// Scoring config cannot be read, parsed or validated.
pub const EXIT_INVALID_CONFIG: u8 = 7;

/// File read / write failure.
pub const EXIT_IO: u8 = 8;

/// Exit code a verdict maps to.
pub fn outcome_exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Pass => EXIT_SUCCESS,
        Outcome::Review => EXIT_REVIEW,
        Outcome::Fail => EXIT_FAIL,
    }
}

/// Exit code for an engine-side error.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_)
        | ReconError::ConfigValidation(_)
        | ReconError::ConfigSerialize(_) => EXIT_INVALID_CONFIG,
        ReconError::MalformedRecord { .. } | ReconError::MalformedSubmission(_) => {
            EXIT_MALFORMED_RECORD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idtrust_recon::Source;

    #[test]
    fn verdict_codes_are_distinct() {
        assert_eq!(outcome_exit_code(Outcome::Pass), 0);
        assert_eq!(outcome_exit_code(Outcome::Review), 3);
        assert_eq!(outcome_exit_code(Outcome::Fail), 4);
    }

    #[test]
    fn recon_errors_map_to_registry() {
        let err = ReconError::MalformedRecord {
            source: Source::Ocr,
            message: "bad".into(),
        };
        assert_eq!(recon_exit_code(&err), EXIT_MALFORMED_RECORD);
        assert_eq!(
            recon_exit_code(&ReconError::ConfigValidation("x".into())),
            EXIT_INVALID_CONFIG
        );
    }
}

use std::fmt;

use crate::model::Source;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (unreachable threshold, out-of-range value, etc.).
    ConfigValidation(String),
    /// Config could not be rendered back to TOML.
    ConfigSerialize(String),
    /// A supplied record does not have the expected shape (wrong value types, not an object).
    MalformedRecord { source: Source, message: String },
    /// The submission envelope itself could not be parsed.
    MalformedSubmission(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::ConfigSerialize(msg) => write!(f, "config serialize error: {msg}"),
            Self::MalformedRecord { source, message } => {
                write!(f, "{source} record is malformed: {message}")
            }
            Self::MalformedSubmission(msg) => write!(f, "malformed submission: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checksum::verhoeff_valid;
use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// The extraction channel a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Ocr,
    Qr,
    Xml,
}

impl Source {
    /// Fixed priority order used by every check.
    pub const ALL: [Source; 3] = [Source::Ocr, Source::Qr, Source::Xml];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ocr => "ocr",
            Self::Qr => "qr",
            Self::Xml => "xml",
        }
    }

    /// Whether this channel can carry an upstream checksum result the engine trusts.
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Qr | Self::Xml)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Normalized per-source extraction result.
///
/// Every field is independently optional. Upstream producers historically
/// emitted `aadhaar_number`, `dob`, `yob` and `verhoeff_ok`; those names are
/// accepted as aliases so their payloads can be fed in unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    #[serde(default, alias = "aadhaar_number", skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "dob", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, alias = "yob", skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<String>,
    #[serde(default, alias = "verhoeff_ok", skip_serializing_if = "Option::is_none")]
    pub checksum_valid: Option<bool>,
}

impl FieldRecord {
    /// Parse a record from JSON text. `null` means the record is absent.
    pub fn from_json(source: Source, input: &str) -> Result<Option<Self>, ReconError> {
        let value: Value = serde_json::from_str(input).map_err(|e| ReconError::MalformedRecord {
            source,
            message: e.to_string(),
        })?;
        Self::from_value(source, value)
    }

    /// Validate the shape of an already-parsed JSON value.
    pub fn from_value(source: Source, value: Value) -> Result<Option<Self>, ReconError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ReconError::MalformedRecord {
                    source,
                    message: e.to_string(),
                }),
            other => Err(ReconError::MalformedRecord {
                source,
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Producer-side helper: set `checksum_valid` from the carried identifier.
    ///
    /// Only QR and XML producers call this; OCR identifiers are never
    /// checksum-verified.
    pub fn with_computed_checksum(mut self) -> Self {
        self.checksum_valid = Some(self.identifier.as_deref().is_some_and(verhoeff_valid));
        self
    }

    pub fn identifier(&self) -> Option<&str> {
        non_empty(&self.identifier)
    }

    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    /// Full date of birth if present, otherwise the year of birth.
    pub fn birth_value(&self) -> Option<&str> {
        non_empty(&self.date_of_birth).or_else(|| non_empty(&self.year_of_birth))
    }

    pub fn checksum_valid(&self) -> bool {
        self.checksum_valid == Some(true)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// All three channels for one invocation, as a single JSON envelope:
/// `{ "ocr": {...} | null, "qr": ..., "xml": ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub ocr: Option<FieldRecord>,
    pub qr: Option<FieldRecord>,
    pub xml: Option<FieldRecord>,
}

impl Submission {
    pub fn from_json(input: &str) -> Result<Self, ReconError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| ReconError::MalformedSubmission(e.to_string()))?;
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ReconError::MalformedSubmission(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut take = |source: Source| {
            let v = map.remove(source.as_str()).unwrap_or(Value::Null);
            FieldRecord::from_value(source, v)
        };

        Ok(Self {
            ocr: take(Source::Ocr)?,
            qr: take(Source::Qr)?,
            xml: take(Source::Xml)?,
        })
    }

    pub fn record(&self, source: Source) -> Option<&FieldRecord> {
        match source {
            Source::Ocr => self.ocr.as_ref(),
            Source::Qr => self.qr.as_ref(),
            Source::Xml => self.xml.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Pass,
    Review,
    Fail,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Review => write!(f, "REVIEW"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Display-safe summary. Identifier is masked; names are the raw values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub identifier: Option<String>,
    pub name_ocr: Option<String>,
    pub name_qr: Option<String>,
    pub name_xml: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "verdict")]
    pub outcome: Outcome,
    pub score: u32,
    pub reasons: Vec<String>,
    pub preview: Preview,
}

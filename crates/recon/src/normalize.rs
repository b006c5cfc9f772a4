//! Field helpers for the producers that build [`FieldRecord`]s from raw
//! OCR text, QR payloads and XML attributes.
//!
//! Nothing here is consulted by the scoring checks; producers call these
//! before handing a record to the engine.
//!
//! [`FieldRecord`]: crate::model::FieldRecord

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([0-9]{4}\s?[0-9]{4}\s?[0-9]{4})\b").expect("static pattern"))
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:[0-3]?[0-9][/\-.][01]?[0-9][/\-.](?:19|20)[0-9]{2})|(?:[0-3]?[0-9]\s*(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\s*(?:19|20)[0-9]{2})",
        )
        .expect("static pattern")
    })
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("static pattern"))
}

fn non_digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]+").expect("static pattern"))
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// Strip everything but ASCII letters, whitespace, `.`, `-` and `'`, collapse
/// whitespace and title-case each word. `None` when nothing survives.
pub fn clean_name(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '.' | '-' | '\'') {
                c
            } else {
                ' '
            }
        })
        .collect();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(title_case(&collapsed))
}

/// Uppercase the first letter of every letter run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Female,
    Male,
    Transgender,
}

const FEMALE_MARKERS: [&str; 3] = ["female", "महिला", "பெண்"];
const MALE_MARKERS: [&str; 3] = ["male", "पुरुष", "ஆண்"];

/// Recognize a gender value printed in English, Hindi or Tamil.
///
/// Female markers are checked first since "female" contains "male".
pub fn normalize_gender(raw: &str) -> Option<Gender> {
    let g = raw.trim().to_lowercase();
    if g.is_empty() {
        return None;
    }
    if FEMALE_MARKERS.iter().any(|m| g.contains(m)) {
        return Some(Gender::Female);
    }
    if MALE_MARKERS.iter().any(|m| g.contains(m)) {
        return Some(Gender::Male);
    }
    if g.contains("trans") {
        return Some(Gender::Transgender);
    }
    None
}

// ---------------------------------------------------------------------------
// Digits, identifiers, dates
// ---------------------------------------------------------------------------

/// Repair letters OCR commonly confuses with digits.
pub fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'O' | 'o' => '0',
            'I' | 'l' => '1',
            'B' => '8',
            'S' => '5',
            'Z' | 'z' => '2',
            other => other,
        })
        .collect()
}

/// First `dddd dddd dddd` group in `text` (spaces optional), whitespace removed.
pub fn find_identifier(text: &str) -> Option<String> {
    let caps = identifier_re().captures(text)?;
    Some(caps[1].chars().filter(|c| !c.is_whitespace()).collect())
}

/// First date-looking substring: `dd/mm/yyyy` (separators `/ - .`) or
/// `dd Month yyyy`.
pub fn find_date(text: &str) -> Option<String> {
    date_re().find(text).map(|m| m.as_str().to_string())
}

/// First standalone 19xx/20xx year.
pub fn find_year(text: &str) -> Option<String> {
    year_re().find(text).map(|m| m.as_str().to_string())
}

/// Whether `ddmmyyyy` (any non-digit separators) names a real calendar date
/// between 1900 and `today`'s year.
pub fn valid_date(ddmmyyyy: &str, today: NaiveDate) -> bool {
    let parts: Vec<&str> = non_digits_re().split(ddmmyyyy).collect();
    let [d, m, y] = parts.as_slice() else {
        return false;
    };
    let (Ok(d), Ok(m), Ok(y)) = (d.parse::<u32>(), m.parse::<u32>(), y.parse::<i32>()) else {
        return false;
    };
    if y < 1900 || y > today.year() {
        return false;
    }
    NaiveDate::from_ymd_opt(y, m, d).is_some()
}

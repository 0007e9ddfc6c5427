use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::template::{DateTemplate, TEMPLATES};

/// Outcome of best-effort date normalization.
///
/// `Unparsed` carries the caller's token untouched. It is deliberately not
/// comparable as a date: use [`NormalizedDate::as_date`] before ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedDate {
    Canonical(NaiveDate),
    Unparsed(String),
}

impl NormalizedDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            NormalizedDate::Canonical(d) => Some(*d),
            NormalizedDate::Unparsed(_) => None,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, NormalizedDate::Canonical(_))
    }
}

/// Canonical dates render as `YYYY-MM-DD`; unparsed tokens verbatim.
impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedDate::Canonical(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            NormalizedDate::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// Normalize a raw date token to a canonical date.
///
/// Whitespace is stripped, then [`TEMPLATES`] is tried in order and the
/// first template that parses wins. Tokens no template accepts come back
/// as [`NormalizedDate::Unparsed`] holding the original input.
pub fn normalize(raw: &str) -> NormalizedDate {
    match parse_with_template(raw) {
        Some((_, date)) => NormalizedDate::Canonical(date),
        None => NormalizedDate::Unparsed(raw.to_string()),
    }
}

/// Like [`normalize`], but also reports which template matched.
pub fn parse_with_template(raw: &str) -> Option<(DateTemplate, NaiveDate)> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    TEMPLATES
        .iter()
        .find_map(|t| t.parse(&compact).map(|d| (*t, d)))
}

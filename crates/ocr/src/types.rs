use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shelflife_core::{ExpiryStatus, ExpiryWindow, NormalizedDate};
use std::fmt;
use thiserror::Error;

/// Placeholder reported for the manufacturing date when none was found.
pub const NOT_DETECTED: &str = "not detected";

/// A substring of the input matching one of the date shapes. Not yet
/// validated as a real calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDateToken(String);

impl RawDateToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RawDateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Date shapes recognised after a label, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateShape {
    /// `D-M-Y`, `D/M/Y` or `D.M.Y`.
    Numeric,
    /// `DD` + three-letter month + 2–4 digit year (`15-JAN-2024`).
    DayMonthName,
    /// Three-letter month + four-digit year (`JAN-2024`).
    MonthNameYear,
}

/// How the expiry token was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirySource {
    /// Matched an expiry label family pattern.
    Labeled,
    /// Generic date immediately after the manufacturing token.
    FollowsManufacturing,
    /// Last generic date in the text.
    LastGeneric,
    NotFound,
}

/// Raw tokens located by [`crate::DateExtractor::extract_dates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDates {
    pub manufacturing: Option<RawDateToken>,
    pub expiry: Option<RawDateToken>,
    pub expiry_source: ExpirySource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    #[error("no expiry date found")]
    NotFound,
    #[error("expiry precedes manufacturing")]
    OrderingViolation,
    #[error("error processing image")]
    Recognition,
}

/// The only artifact an extraction produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub raw_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date_raw: Option<String>,
    /// Raw manufacturing token, or [`NOT_DETECTED`] on a successful
    /// extraction without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_date_raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_expiry: Option<NormalizedDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExtractionResult {
    pub fn found(
        raw_text: &str,
        expiry: RawDateToken,
        normalized: NormalizedDate,
        manufacturing: Option<RawDateToken>,
    ) -> Self {
        Self {
            success: true,
            raw_text: raw_text.to_string(),
            expiry_date_raw: Some(expiry.into_string()),
            manufacturing_date_raw: Some(
                manufacturing.map_or_else(|| NOT_DETECTED.to_string(), RawDateToken::into_string),
            ),
            normalized_expiry: Some(normalized),
            failure: None,
            message: None,
        }
    }

    pub fn rejected(raw_text: &str, failure: FailureKind) -> Self {
        Self::rejected_with(raw_text, failure, failure.to_string())
    }

    pub fn rejected_with(raw_text: &str, failure: FailureKind, message: String) -> Self {
        Self {
            success: false,
            raw_text: raw_text.to_string(),
            expiry_date_raw: None,
            manufacturing_date_raw: None,
            normalized_expiry: None,
            failure: Some(failure),
            message: Some(message),
        }
    }

    /// The expiry as a calendar date, if it normalized.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.normalized_expiry.as_ref()?.as_date()
    }

    /// `None` unless the expiry normalized to a canonical date.
    pub fn expiry_status(&self, today: NaiveDate, window: ExpiryWindow) -> Option<ExpiryStatus> {
        Some(window.status(self.expiry_date()?, today))
    }
}

use std::sync::OnceLock;

use regex::Regex;
use shelflife_core::{check_ordering, normalize, ordering_valid};

use crate::config::{ConfigError, LabelConfig};
use crate::types::{
    DateShape, ExpirySource, ExtractedDates, ExtractionResult, FailureKind, RawDateToken,
};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Label-free numeric date, used only by the expiry fallback.
re!(re_generic_date, r"\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}");

impl DateShape {
    /// Priority order within a label family.
    pub const ORDER: [DateShape; 3] =
        [DateShape::Numeric, DateShape::DayMonthName, DateShape::MonthNameYear];

    fn pattern(self) -> &'static str {
        match self {
            DateShape::Numeric => r"\d{1,2}[-/.]\d{1,2}[-/.]\d{2,4}",
            DateShape::DayMonthName => r"\d{2}\s*[-/.]\s*[A-Za-z]{3}\s*[-/.]\s*\d{2,4}",
            DateShape::MonthNameYear => r"[A-Za-z]{3}\s*[-/.]\s*\d{4}",
        }
    }
}

// ── Pattern families ─────────────────────────────────────────────────────────

/// Ordered `(shape, regex)` pairs for one label role. The first shape with
/// any match decides the token; later shapes are never consulted.
struct PatternFamily {
    role: &'static str,
    patterns: Vec<(DateShape, Regex)>,
}

impl PatternFamily {
    fn compile(
        role: &'static str,
        labels_for: impl Fn(DateShape) -> Vec<String>,
    ) -> Result<Self, ConfigError> {
        let patterns = DateShape::ORDER
            .iter()
            .map(|&shape| Ok((shape, label_regex(&labels_for(shape), shape)?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self { role, patterns })
    }

    fn first_match(&self, text: &str) -> Option<RawDateToken> {
        self.patterns.iter().find_map(|(shape, re)| {
            let token = re.captures(text)?.get(1)?.as_str();
            tracing::debug!("{} date '{}' matched {:?} shape", self.role, token, shape);
            Some(RawDateToken::new(token))
        })
    }
}

/// `<label>[.][:] <date>` with the date in capture group 1.
fn label_regex(labels: &[String], shape: DateShape) -> Result<Regex, ConfigError> {
    let alternation = labels
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    if alternation.is_empty() {
        return Err(ConfigError::EmptyLabels("label family"));
    }
    Ok(Regex::new(&format!(
        r"(?:{alternation})\.?\s*:?\s*({})",
        shape.pattern()
    ))?)
}

// ── Public extraction API ─────────────────────────────────────────────────────

/// Locates manufacturing and expiry dates in OCR text.
///
/// Immutable once built and safe to share between threads.
pub struct DateExtractor {
    manufacturing: PatternFamily,
    expiry: PatternFamily,
}

impl DateExtractor {
    pub fn new(labels: &LabelConfig) -> Result<Self, ConfigError> {
        labels.validate()?;
        let manufacturing =
            PatternFamily::compile("manufacturing", |_| labels.manufacturing.clone())?;
        let expiry = PatternFamily::compile("expiry", |shape| {
            let mut words = labels.expiry.clone();
            if shape == DateShape::Numeric {
                words.extend(labels.expiry_numeric_only.iter().cloned());
            }
            words
        })?;
        Ok(Self { manufacturing, expiry })
    }

    /// Extractor built from the default label vocabulary.
    pub fn standard() -> &'static DateExtractor {
        static STANDARD: OnceLock<DateExtractor> = OnceLock::new();
        STANDARD.get_or_init(|| {
            DateExtractor::new(&LabelConfig::default()).expect("default labels compile")
        })
    }

    /// Find raw manufacturing and expiry tokens. Absence is a normal outcome.
    pub fn extract_dates(&self, text: &str) -> ExtractedDates {
        let manufacturing = self.manufacturing.first_match(text);

        let (expiry, expiry_source) = match self.expiry.first_match(text) {
            Some(token) => (Some(token), ExpirySource::Labeled),
            None => fallback_expiry(text, manufacturing.as_ref()),
        };

        ExtractedDates { manufacturing, expiry, expiry_source }
    }

    /// Extract, validate ordering and normalize the expiry.
    pub fn process_text(&self, text: &str) -> ExtractionResult {
        let dates = self.extract_dates(text);

        if let (Some(mfg), Some(exp)) = (&dates.manufacturing, &dates.expiry) {
            let ordering = check_ordering(Some(mfg.as_str()), Some(exp.as_str()));
            if !ordering.permits() {
                tracing::warn!("Expiry '{exp}' does not follow manufacturing '{mfg}'");
                return ExtractionResult::rejected(text, FailureKind::OrderingViolation);
            }
        }

        let Some(expiry) = dates.expiry else {
            tracing::debug!("No expiry date found in {} chars of text", text.len());
            return ExtractionResult::rejected(text, FailureKind::NotFound);
        };

        let normalized = normalize(expiry.as_str());
        if !normalized.is_canonical() {
            tracing::debug!("Expiry token '{expiry}' did not match any date template");
        }
        ExtractionResult::found(text, expiry, normalized, dates.manufacturing)
    }
}

/// Shorthand for [`DateExtractor::extract_dates`] on the standard extractor.
pub fn extract_dates(text: &str) -> ExtractedDates {
    DateExtractor::standard().extract_dates(text)
}

/// Shorthand for [`DateExtractor::process_text`] on the standard extractor.
pub fn process_text(text: &str) -> ExtractionResult {
    DateExtractor::standard().process_text(text)
}

// ── Fallback heuristic ───────────────────────────────────────────────────────

/// Pick an expiry from label-free numeric dates. Needs at least two.
///
/// If the manufacturing token appears verbatim among them, only the date
/// right after its first occurrence is considered, and it is dropped when
/// it does not follow manufacturing. Otherwise the last date wins.
fn fallback_expiry(
    text: &str,
    manufacturing: Option<&RawDateToken>,
) -> (Option<RawDateToken>, ExpirySource) {
    let generic: Vec<&str> = re_generic_date().find_iter(text).map(|m| m.as_str()).collect();
    if generic.len() < 2 {
        return (None, ExpirySource::NotFound);
    }

    if let Some(mfg) = manufacturing {
        if let Some(idx) = generic.iter().position(|g| *g == mfg.as_str()) {
            let Some(&next) = generic.get(idx + 1) else {
                return (None, ExpirySource::NotFound);
            };
            if ordering_valid(Some(mfg.as_str()), Some(next)) {
                tracing::debug!("Fallback expiry '{next}' follows manufacturing '{mfg}'");
                return (Some(RawDateToken::new(next)), ExpirySource::FollowsManufacturing);
            }
            tracing::debug!("Fallback expiry '{next}' precedes manufacturing '{mfg}', dropped");
            return (None, ExpirySource::NotFound);
        }
    }

    let last = generic[generic.len() - 1];
    tracing::debug!("Fallback expiry '{last}' taken as last of {} dates", generic.len());
    (Some(RawDateToken::new(last)), ExpirySource::LastGeneric)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use shelflife_core::{parse_with_template, ExpiryStatus, NormalizedDate};
use shelflife_ocr::{Config, DateExtractor, ExtractionResult};

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// File holding the recognized label text
    pub file: Option<PathBuf>,

    /// Report expiry status relative to this day (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Raw date tokens, e.g. "15-JAN-2024" or "03/04/24"
    #[arg(required = true)]
    pub tokens: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ExtractOutput<'a> {
    #[serde(flatten)]
    result: &'a ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry_status: Option<ExpiryStatus>,
}

#[derive(Debug, Serialize)]
struct NormalizeOutput {
    token: String,
    normalized: NormalizedDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<String>,
}

pub fn extract(args: ExtractArgs, config: &Config, pretty: bool) -> anyhow::Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let extractor = DateExtractor::new(&config.labels)?;
    let result = extractor.process_text(&text);

    match &result.message {
        Some(message) => tracing::info!("Extraction rejected: {message}"),
        None => tracing::info!(
            "Expiry {} found",
            result.expiry_date_raw.as_deref().unwrap_or_default()
        ),
    }

    let expiry_status = match args.today {
        Some(today) => result.expiry_status(today, config.window()?),
        None => None,
    };

    print_json(&ExtractOutput { result: &result, expiry_status }, pretty)
}

pub fn normalize(args: NormalizeArgs, pretty: bool) -> anyhow::Result<()> {
    let outputs: Vec<NormalizeOutput> = args
        .tokens
        .into_iter()
        .map(|token| match parse_with_template(&token) {
            Some((template, date)) => NormalizeOutput {
                token,
                normalized: NormalizedDate::Canonical(date),
                template: Some(template.to_string()),
            },
            None => NormalizeOutput {
                normalized: NormalizedDate::Unparsed(token.clone()),
                token,
                template: None,
            },
        })
        .collect();

    print_json(&outputs, pretty)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

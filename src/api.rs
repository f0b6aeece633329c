// API Layer
// Request validation and response shaping around the scoring core.
// Front ends (CLI, services) call into here rather than the core directly.

use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{AnalyzeRequest, AnalyzeResponse, Report};
use crate::services::config_store::{AnalysisConfig, AppConfig, ConfigError, ConfigStore};
use crate::services::detection::{analyze_detailed, parse_sensitivity, RuleHit, Sensitivity};
use crate::services::lexicon::Lexicon;
use crate::services::text_processor::{is_blank, truncate_chars};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Please paste a review first")]
    EmptyInput,
    #[error("Invalid sensitivity: {0} (expected a positive number or low/medium/high)")]
    InvalidSensitivity(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Caller-supplied sensitivity, rejected as `InvalidSensitivity` when unparsable.
fn sensitivity_arg(raw: &str) -> Result<Sensitivity, ApiError> {
    parse_sensitivity(raw).ok_or_else(|| ApiError::InvalidSensitivity(raw.to_string()))
}

fn resolve_sensitivity(request: &AnalyzeRequest, config: &AnalysisConfig) -> Result<Sensitivity, ApiError> {
    match request.sensitivity.as_deref() {
        Some(raw) => sensitivity_arg(raw),
        None => {
            let value = config.sensitivity;
            if value.is_finite() && value > 0.0 {
                Ok(Sensitivity::new(value))
            } else {
                Err(ApiError::InvalidSensitivity(value.to_string()))
            }
        }
    }
}

/// Analyze a request and keep the per-block rule hits for explanation output.
pub fn analyze_text_detailed(
    request: &AnalyzeRequest,
    config: &AnalysisConfig,
) -> Result<(AnalyzeResponse, Vec<Vec<RuleHit>>), ApiError> {
    if is_blank(&request.text) {
        return Err(ApiError::EmptyInput);
    }

    let sensitivity = resolve_sensitivity(request, config)?;
    let mode = request
        .mode
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(config.mode.as_str())
        .to_string();

    let (text, truncated) = truncate_chars(&request.text, config.max_input_chars);
    if truncated {
        warn!(
            max_chars = config.max_input_chars,
            total_chars = request.text.chars().count(),
            "analysis.input_truncated"
        );
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let t0 = Instant::now();
    info!(
        request_id = %request_id,
        sensitivity = sensitivity.value(),
        mode = %mode,
        chars = text.chars().count(),
        "analysis.start"
    );

    let detailed =
        analyze_detailed(Lexicon::builtin(), text, sensitivity, &mode).ok_or(ApiError::EmptyInput)?;
    let report = detailed.report;

    info!(
        request_id = %request_id,
        blocks = report.results.len(),
        avg = report.avg,
        elapsed_us = t0.elapsed().as_micros() as u64,
        "analysis.done"
    );

    let response = AnalyzeResponse {
        request_id,
        version: env!("CARGO_PKG_VERSION").to_string(),
        analyzed_at: chrono::Utc::now().to_rfc3339(),
        sensitivity: sensitivity.value(),
        mode,
        truncated,
        verdict: report.verdict(),
        report,
    };

    Ok((response, detailed.hits))
}

pub fn analyze_text(request: &AnalyzeRequest, config: &AnalysisConfig) -> Result<AnalyzeResponse, ApiError> {
    analyze_text_detailed(request, config).map(|(response, _)| response)
}

/// Persist sensitivity/mode as the new defaults, validating the sensitivity first.
pub fn save_defaults(store: &ConfigStore, sensitivity: Option<&str>, mode: Option<&str>) -> Result<AppConfig, ApiError> {
    let sensitivity = sensitivity.map(sensitivity_arg).transpose()?;
    let mode = mode.map(str::trim).filter(|m| !m.is_empty());
    Ok(store.set_analysis_defaults(sensitivity.map(|s| s.value()), mode)?)
}

pub fn to_json_pretty(response: &AnalyzeResponse) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(response)?)
}

/// Response envelope with the fired rules of each block under `explain`.
#[derive(Debug, Serialize)]
pub struct ExplainedResponse<'a> {
    #[serde(flatten)]
    pub response: &'a AnalyzeResponse,
    pub explain: &'a [Vec<RuleHit>],
}

pub fn to_json_pretty_explained(response: &AnalyzeResponse, hits: &[Vec<RuleHit>]) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(&ExplainedResponse { response, explain: hits })?)
}

/// One-line summary suitable for sharing.
pub fn share_summary(report: &Report) -> String {
    format!("TrueReview result: {}% - {}", report.avg, report.verdict())
}

/// Plain-text rendering: overall score, reason chips, then one card per block.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Overall: {}% - {}", report.avg, report.verdict());

    if !report.combined.is_empty() {
        let chips: Vec<String> = report.combined.iter().map(|r| format!("[{}]", r)).collect();
        let _ = writeln!(out, "Reasons: {}", chips.join(" "));
    }

    for (idx, block) in report.results.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Block {} - {}% [{}] {}",
            idx + 1,
            block.score,
            block.lang.code().to_uppercase(),
            block.verdict
        );
        if block.reasons.is_empty() {
            let _ = writeln!(out, "  No obvious issues detected");
        } else {
            let _ = writeln!(out, "  {}", block.reasons.join(" • "));
        }
        for line in block.text.lines() {
            let _ = writeln!(out, "  > {}", line);
        }
    }

    out
}

/// Per-rule contribution listing for each block.
pub fn render_explain(report: &Report, hits: &[Vec<RuleHit>]) -> String {
    let mut out = String::new();
    for (idx, (block, block_hits)) in report.results.iter().zip(hits).enumerate() {
        let _ = writeln!(out, "Block {} rules:", idx + 1);
        if block_hits.is_empty() {
            let _ = writeln!(out, "  (none fired)");
        }
        for hit in block_hits {
            let _ = writeln!(out, "  {:<22} {:+7.1}  {}", format!("{:?}", hit.rule), hit.amount, hit.reason);
        }
        let _ = writeln!(out, "  => score {}", block.score);
    }
    out
}

// Block Scorer
// Runs the heuristic rules over one review block and turns the summed
// contributions into a 0-100 score, a verdict and reasons.

use super::rules::{credibility_offset, BlockFeatures, RuleHit, ADDITIVE_RULES};
use super::sensitivity::Sensitivity;
use crate::models::{BlockResult, Verdict};
use crate::services::lexicon::Lexicon;

/// A scored block together with every rule that fired.
#[derive(Debug, Clone)]
pub struct ScoredBlock {
    pub result: BlockResult,
    pub hits: Vec<RuleHit>,
    /// Accumulated score after the credibility floor, before rounding.
    pub raw_score: f64,
}

/// Round half up (2.5 -> 3, -2.5 -> -2).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Final rounding plus the [0, 100] clamp.
pub fn finalize_score(raw: f64) -> i32 {
    round_half_up(raw).clamp(0.0, 100.0) as i32
}

/// Score one block with the built-in lexicon.
///
/// `sensitivity` is expected to be positive; it is not validated.
pub fn score_block(text: &str, sensitivity: Sensitivity) -> BlockResult {
    score_block_with(Lexicon::builtin(), text, sensitivity)
}

pub fn score_block_with(lexicon: &Lexicon, text: &str, sensitivity: Sensitivity) -> BlockResult {
    score_block_detailed(lexicon, text, sensitivity).result
}

pub fn score_block_detailed(lexicon: &Lexicon, text: &str, sensitivity: Sensitivity) -> ScoredBlock {
    let features = BlockFeatures::extract(lexicon, text);

    let mut hits: Vec<RuleHit> = ADDITIVE_RULES
        .iter()
        .filter_map(|rule| rule(&features, sensitivity))
        .collect();
    let mut raw_score: f64 = hits.iter().map(|h| h.amount).sum();

    // The offset floors at zero on its own; the upper clamp waits for finalize.
    if let Some(offset) = credibility_offset(&features, sensitivity) {
        raw_score = (raw_score + offset.amount).max(0.0);
        hits.push(offset);
    }

    let mut reasons: Vec<String> = Vec::with_capacity(hits.len());
    for hit in &hits {
        if !reasons.iter().any(|r| r == hit.reason) {
            reasons.push(hit.reason.to_string());
        }
    }

    let score = finalize_score(raw_score);

    ScoredBlock {
        result: BlockResult {
            text: text.to_string(),
            lang: features.lang,
            score,
            verdict: Verdict::from_score(score),
            reasons,
        },
        hits,
        raw_score,
    }
}

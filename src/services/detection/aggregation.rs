// Aggregation Logic
// Splits multi-review input, scores each block and folds the results
// into one report

use tracing::debug;

use super::block_scorer::{round_half_up, score_block_detailed};
use super::rules::RuleHit;
use super::sensitivity::Sensitivity;
use crate::models::{BlockResult, Report};
use crate::services::lexicon::Lexicon;
use crate::services::text_processor::{preview, split_review_blocks};

pub const MAX_COMBINED_REASONS: usize = 8;

/// Report plus the rule hits behind each block, in block order.
#[derive(Debug, Clone)]
pub struct DetailedReport {
    pub report: Report,
    pub hits: Vec<Vec<RuleHit>>,
}

/// Analyze raw input with the built-in lexicon.
///
/// Returns `None` when the input holds no non-empty block. `mode` is carried
/// for callers but has no effect on scoring. `sensitivity` is not validated.
pub fn analyze(raw: &str, sensitivity: Sensitivity, mode: &str) -> Option<Report> {
    analyze_with(Lexicon::builtin(), raw, sensitivity, mode)
}

pub fn analyze_with(lexicon: &Lexicon, raw: &str, sensitivity: Sensitivity, mode: &str) -> Option<Report> {
    analyze_detailed(lexicon, raw, sensitivity, mode).map(|d| d.report)
}

pub fn analyze_detailed(
    lexicon: &Lexicon,
    raw: &str,
    sensitivity: Sensitivity,
    mode: &str,
) -> Option<DetailedReport> {
    let blocks = split_review_blocks(raw);
    if blocks.is_empty() {
        return None;
    }

    let mut results = Vec::with_capacity(blocks.len());
    let mut hits = Vec::with_capacity(blocks.len());
    for (idx, block) in blocks.iter().enumerate() {
        let scored = score_block_detailed(lexicon, block, sensitivity);
        debug!(
            block = idx,
            lang = scored.result.lang.code(),
            score = scored.result.score,
            rules = scored.hits.len(),
            mode,
            preview = %preview(block, 60),
            "block.scored"
        );
        results.push(scored.result);
        hits.push(scored.hits);
    }

    let report = aggregate_blocks(results)?;
    Some(DetailedReport { report, hits })
}

/// Fold already-scored blocks into a report. `None` for an empty slice.
pub fn aggregate_blocks(results: Vec<BlockResult>) -> Option<Report> {
    if results.is_empty() {
        return None;
    }

    let total: f64 = results.iter().map(|r| r.score as f64).sum();
    let avg = round_half_up(total / results.len() as f64).clamp(0.0, 100.0) as i32;
    let combined = combine_reasons(&results, MAX_COMBINED_REASONS);

    Some(Report { avg, results, combined })
}

/// First `cap` distinct reasons across blocks, in first-seen order.
pub fn combine_reasons(results: &[BlockResult], cap: usize) -> Vec<String> {
    let mut combined: Vec<String> = Vec::new();
    for reason in results.iter().flat_map(|r| r.reasons.iter()) {
        if combined.len() >= cap {
            break;
        }
        if !combined.contains(reason) {
            combined.push(reason.clone());
        }
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, Verdict};
    use crate::services::detection::block_scorer::score_block;
    use crate::services::detection::rules::{REASON_CRITICISM, REASON_PRAISE};
    use crate::services::lexicon::LexiconEntry;

    fn block(score: i32, reasons: &[&str]) -> BlockResult {
        BlockResult {
            text: String::new(),
            lang: Language::English,
            score,
            verdict: Verdict::from_score(score),
            reasons: reasons.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input_has_no_report() {
        assert!(analyze("", Sensitivity::LOW, "x").is_none());
        assert!(analyze("   ", Sensitivity::LOW, "x").is_none());
        assert!(analyze("\n\n \r\n\t\n\n", Sensitivity::LOW, "x").is_none());
        assert!(aggregate_blocks(Vec::new()).is_none());
    }

    #[test]
    fn test_two_blocks_average() {
        let first = "Amazing perfect love it!!";
        let second = "This was broken and I am disappointed, returned it.";
        let raw = format!("{}\n\n{}", first, second);

        let report = analyze(&raw, Sensitivity::LOW, "x").unwrap();
        assert_eq!(report.results.len(), 2);

        let s1 = score_block(first, Sensitivity::LOW).score;
        let s2 = score_block(second, Sensitivity::LOW).score;
        assert_eq!(report.results[0].score, s1);
        assert_eq!(report.results[1].score, s2);
        assert_eq!(report.avg, round_half_up((s1 + s2) as f64 / 2.0) as i32);
        assert_eq!(report.results[0].text, first);
    }

    #[test]
    fn test_language_detected_per_block() {
        let report = analyze("Good value for the price overall.\n\nयह उत्पाद बहुत अच्छा है", Sensitivity::LOW, "x").unwrap();
        assert_eq!(report.results[0].lang, Language::English);
        assert_eq!(report.results[1].lang, Language::Hindi);
    }

    #[test]
    fn test_avg_rounds_half_up() {
        let report = aggregate_blocks(vec![block(10, &[]), block(11, &[])]).unwrap();
        assert_eq!(report.avg, 11);
    }

    #[test]
    fn test_combined_dedup_and_order() {
        let results = vec![block(0, &["b", "a"]), block(0, &["a", "c"]), block(0, &["b", "d"])];
        assert_eq!(combine_reasons(&results, 8), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_combined_capped() {
        let results: Vec<BlockResult> = (0..5)
            .map(|i| {
                let a = format!("r{}a", i);
                let b = format!("r{}b", i);
                block(0, &[a.as_str(), b.as_str()])
            })
            .collect();
        let report = aggregate_blocks(results).unwrap();
        assert_eq!(report.combined.len(), MAX_COMBINED_REASONS);
        assert_eq!(report.combined[0], "r0a");
        assert_eq!(report.combined[7], "r3b");
    }

    #[test]
    fn test_real_reasons_never_exceed_cap() {
        let long = format!("{} amazing perfect excellent best great", "word ".repeat(80));
        let raw = [
            "Great",
            "BEST!! deal call 9999999999",
            "WOW WOW WOW WOW WOW WOW",
            "It arrived broken, disappointed.",
            long.as_str(),
        ]
        .join("\n\n");
        let report = analyze(&raw, Sensitivity::HIGH, "x").unwrap();
        assert_eq!(report.results.len(), 5);
        assert!(report.combined.len() <= MAX_COMBINED_REASONS);
        for r in &report.results {
            assert!((0..=100).contains(&r.score));
        }
        assert!((0..=100).contains(&report.avg));
    }

    #[test]
    fn test_mode_is_inert_and_output_deterministic() {
        let raw = "Amazing!! call 1234567\n\nDecent, but the strap broke.";
        let a = analyze(raw, Sensitivity::MEDIUM, "quick").unwrap();
        let b = analyze(raw, Sensitivity::MEDIUM, "deep").unwrap();
        let c = analyze(raw, Sensitivity::MEDIUM, "quick").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    const KITCHEN_POSITIVE: &[&str] = &["stellar"];
    const KITCHEN_NEGATIVE: &[&str] = &["meh"];
    const KITCHEN_HI_POSITIVE: &[&str] = &["उम्दा"];
    const KITCHEN_HI_NEGATIVE: &[&str] = &["घटिया"];

    fn kitchen_lexicon() -> Lexicon {
        Lexicon::new(
            LexiconEntry { language: Language::English, positive: KITCHEN_POSITIVE, negative: KITCHEN_NEGATIVE },
            LexiconEntry { language: Language::Hindi, positive: KITCHEN_HI_POSITIVE, negative: KITCHEN_HI_NEGATIVE },
        )
    }

    fn reasons_of(lexicon: &Lexicon, text: &str) -> Vec<String> {
        analyze_with(lexicon, text, Sensitivity::LOW, "x").unwrap().results[0].reasons.clone()
    }

    #[test]
    fn test_injected_lexicon_drives_praise_and_criticism() {
        let custom = kitchen_lexicon();
        let builtin = Lexicon::builtin();

        let stellar = "A stellar kettle that boils water fast and quietly.";
        assert!(reasons_of(&custom, stellar).iter().any(|r| r == REASON_PRAISE));
        assert!(!reasons_of(builtin, stellar).iter().any(|r| r == REASON_PRAISE));

        let great = "This kettle is great and boils water quickly.";
        assert!(!reasons_of(&custom, great).iter().any(|r| r == REASON_PRAISE));
        assert!(reasons_of(builtin, great).iter().any(|r| r == REASON_PRAISE));

        let meh = "The kettle feels meh but boils water quickly enough.";
        assert!(reasons_of(&custom, meh).iter().any(|r| r == REASON_CRITICISM));
        assert!(!reasons_of(builtin, meh).iter().any(|r| r == REASON_CRITICISM));

        let broken = "It arrived broken but the kettle boils water quickly.";
        assert!(!reasons_of(&custom, broken).iter().any(|r| r == REASON_CRITICISM));
        assert!(reasons_of(builtin, broken).iter().any(|r| r == REASON_CRITICISM));
    }

    #[test]
    fn test_injected_lexicon_hindi_lists() {
        let custom = kitchen_lexicon();
        let report = analyze_with(&custom, "केतली उम्दा है\n\nकेतली घटिया है", Sensitivity::LOW, "x").unwrap();
        assert_eq!(report.results[0].lang, Language::Hindi);
        assert!(report.results[0].reasons.iter().any(|r| r == REASON_PRAISE));
        assert!(report.results[1].reasons.iter().any(|r| r == REASON_CRITICISM));
        // Built-in Hindi lists know neither word
        let builtin = analyze("केतली उम्दा है", Sensitivity::LOW, "x").unwrap();
        assert!(!builtin.results[0].reasons.iter().any(|r| r == REASON_PRAISE));
    }

    #[test]
    fn test_detailed_hits_align_with_blocks() {
        let detailed = analyze_detailed(Lexicon::builtin(), "Great\n\nfine fine fine", Sensitivity::LOW, "x").unwrap();
        assert_eq!(detailed.hits.len(), detailed.report.results.len());
        for (hits, result) in detailed.hits.iter().zip(&detailed.report.results) {
            let reasons: Vec<&str> = hits.iter().map(|h| h.reason).collect();
            let expected: Vec<&str> = result.reasons.iter().map(String::as_str).collect();
            assert_eq!(reasons, expected);
        }
    }
}

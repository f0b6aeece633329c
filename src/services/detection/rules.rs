// Heuristic Rules
// Each rule looks at precomputed block features and either fires with a
// weighted amount and a reason, or stays silent.

use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

use super::sensitivity::Sensitivity;
use crate::models::Language;
use crate::services::lexicon::{count_phrase_hits, Lexicon};
use crate::services::text_processor::{detect_language, tokenize};

pub const REASON_SHORT: &str = "Very short / generic";
pub const REASON_PRAISE: &str = "Many praise words";
pub const REASON_PUNCTUATION: &str = "Emoji / excessive punctuation";
pub const REASON_CAPS: &str = "Many ALL-CAPS letters";
pub const REASON_PROMO: &str = "Contains contact/URL/promo text";
pub const REASON_TEMPLATED: &str = "Repeating or templated wording";
pub const REASON_LONG_GUSHING: &str = "Very long with many praise words";
pub const REASON_CRITICISM: &str = "Contains criticism (increases credibility)";

const SHORT_MAX_TOKENS: usize = 6;
const PRAISE_CAP: f64 = 30.0;
const CAPS_RATIO_MIN: f64 = 0.12;
const TEMPLATED_UNIQUENESS_MAX: f64 = 0.45;
const TEMPLATED_MAX_TOKENS: usize = 40;
const LONG_MIN_TOKENS: usize = 80;
const LONG_PRAISE_DENSITY_MIN: f64 = 0.05;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    Brevity,
    PraiseDensity,
    PunctuationExcess,
    AllCaps,
    PromoContact,
    TemplatedRepetition,
    LongGushing,
    CredibilityOffset,
}

/// A fired rule. `amount` is the weighted contribution before any clamping
/// (negative for the credibility offset).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleHit {
    pub rule: RuleId,
    pub amount: f64,
    pub reason: &'static str,
}

impl RuleHit {
    fn new(rule: RuleId, amount: f64, reason: &'static str) -> Self {
        Self { rule, amount, reason }
    }
}

/// Everything the rules need, computed once per block.
#[derive(Debug, Clone)]
pub struct BlockFeatures<'a> {
    pub text: &'a str,
    pub lang: Language,
    pub token_count: usize,
    pub distinct_tokens: usize,
    pub pos_count: usize,
    pub neg_count: usize,
}

impl<'a> BlockFeatures<'a> {
    pub fn extract(lexicon: &Lexicon, text: &'a str) -> Self {
        let lang = detect_language(text);
        let tokens = tokenize(text);
        let distinct_tokens = tokens.iter().collect::<HashSet<_>>().len();
        let lowered = text.to_lowercase();

        Self {
            text,
            lang,
            token_count: tokens.len(),
            distinct_tokens,
            pos_count: count_phrase_hits(&lowered, lexicon.positives(lang)),
            neg_count: count_phrase_hits(&lowered, lexicon.negatives(lang)),
        }
    }
}

pub type Rule = fn(&BlockFeatures<'_>, Sensitivity) -> Option<RuleHit>;

/// Additive rules in evaluation order. The credibility offset is applied
/// separately, after these have been summed.
pub const ADDITIVE_RULES: &[Rule] = &[
    brevity,
    praise_density,
    punctuation_excess,
    all_caps,
    promo_contact,
    templated_repetition,
    long_gushing,
];

pub fn brevity(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    (f.token_count < SHORT_MAX_TOKENS).then(|| RuleHit::new(RuleId::Brevity, s.scale(18.0), REASON_SHORT))
}

pub fn praise_density(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    if f.pos_count == 0 {
        return None;
    }
    let amount = s.scale(f.pos_count as f64 * 10.0).min(PRAISE_CAP);
    Some(RuleHit::new(RuleId::PraiseDensity, amount, REASON_PRAISE))
}

/// Chars outside the BMP are stored as surrogate pairs, which covers emoji.
fn has_astral_char(text: &str) -> bool {
    text.chars().any(|c| u32::from(c) > 0xFFFF)
}

pub fn punctuation_excess(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    (f.text.contains("!!") || has_astral_char(f.text))
        .then(|| RuleHit::new(RuleId::PunctuationExcess, s.scale(8.0), REASON_PUNCTUATION))
}

/// Uppercase ASCII letters over text length, length in UTF-16 code units.
pub fn caps_ratio(text: &str) -> f64 {
    let caps = text.chars().filter(|c| c.is_ascii_uppercase()).count();
    let len = text.encode_utf16().count().max(1);
    caps as f64 / len as f64
}

pub fn all_caps(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    if f.lang != Language::English {
        return None;
    }
    (caps_ratio(f.text) > CAPS_RATIO_MIN).then(|| RuleHit::new(RuleId::AllCaps, s.scale(8.0), REASON_CAPS))
}

fn promo_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{6,}|https?://\S+|@").expect("promo regex"))
}

pub fn promo_contact(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    promo_re()
        .is_match(f.text)
        .then(|| RuleHit::new(RuleId::PromoContact, s.scale(14.0), REASON_PROMO))
}

pub fn templated_repetition(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    let uniqueness = f.distinct_tokens as f64 / f.token_count.max(1) as f64;
    (uniqueness < TEMPLATED_UNIQUENESS_MAX && f.token_count < TEMPLATED_MAX_TOKENS)
        .then(|| RuleHit::new(RuleId::TemplatedRepetition, s.scale(8.0), REASON_TEMPLATED))
}

pub fn long_gushing(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    if f.token_count <= LONG_MIN_TOKENS {
        return None;
    }
    let density = f.pos_count as f64 / f.token_count as f64;
    (density > LONG_PRAISE_DENSITY_MIN)
        .then(|| RuleHit::new(RuleId::LongGushing, s.scale(12.0), REASON_LONG_GUSHING))
}

pub fn credibility_offset(f: &BlockFeatures<'_>, s: Sensitivity) -> Option<RuleHit> {
    (f.neg_count > 0).then(|| RuleHit::new(RuleId::CredibilityOffset, -s.scale(18.0), REASON_CRITICISM))
}

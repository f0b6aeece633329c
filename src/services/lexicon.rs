// Lexicon Store
// Per-language praise/criticism phrase lists used for substring matching

use crate::models::Language;

const EN_POSITIVE: &[&str] = &[
    "best",
    "amazing",
    "excellent",
    "perfect",
    "highly recommend",
    "5 star",
    "five star",
    "love it",
    "must buy",
    "awesome",
    "great",
    "fantastic",
];

const EN_NEGATIVE: &[&str] = &[
    "disappointed",
    "bad",
    "never buy",
    "poor",
    "waste",
    "not recommended",
    "broken",
    "return",
];

const HI_POSITIVE: &[&str] = &[
    "शानदार",
    "बढ़िया",
    "बहुत अच्छा",
    "सर्वोत्तम",
    "बेहतरीन",
    "अच्छा",
    "आश्चर्यजनक",
    "सुपर",
];

const HI_NEGATIVE: &[&str] = &["नाराज", "खराब", "ठग", "बेकार", "नहीं खरीदना", "वापस"];

/// Phrase lists for one language.
#[derive(Debug, Clone, Copy)]
pub struct LexiconEntry {
    pub language: Language,
    pub positive: &'static [&'static str],
    pub negative: &'static [&'static str],
}

/// Read-only lexicon handed to the scorer.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    english: LexiconEntry,
    hindi: LexiconEntry,
}

static BUILTIN: Lexicon = Lexicon {
    english: LexiconEntry {
        language: Language::English,
        positive: EN_POSITIVE,
        negative: EN_NEGATIVE,
    },
    hindi: LexiconEntry {
        language: Language::Hindi,
        positive: HI_POSITIVE,
        negative: HI_NEGATIVE,
    },
};

impl Lexicon {
    pub const fn new(english: LexiconEntry, hindi: LexiconEntry) -> Self {
        Self { english, hindi }
    }

    /// The lists shipped with the scorer.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn entry(&self, lang: Language) -> &LexiconEntry {
        match lang {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
        }
    }

    pub fn positives(&self, lang: Language) -> &'static [&'static str] {
        self.entry(lang).positive
    }

    pub fn negatives(&self, lang: Language) -> &'static [&'static str] {
        self.entry(lang).negative
    }
}

/// Count phrases present in `lowered`; repeats of one phrase count once.
pub fn count_phrase_hits(lowered: &str, phrases: &[&str]) -> usize {
    phrases.iter().filter(|p| lowered.contains(**p)).count()
}

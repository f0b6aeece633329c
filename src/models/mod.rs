// TrueReview Data Models
// Shapes shared by the scoring core, the api layer and the CLI

use serde::{Deserialize, Serialize};

// ============ Language ============

/// Languages the scorer knows how to route.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
        }
    }
}

// ============ Verdict ============

/// Minimum score for "Likely Fake".
pub const FAKE_THRESHOLD: i32 = 65;
/// Minimum score for "Suspicious".
pub const SUSPICIOUS_THRESHOLD: i32 = 35;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Likely Real")]
    LikelyReal,
    #[serde(rename = "Suspicious")]
    Suspicious,
    #[serde(rename = "Likely Fake")]
    LikelyFake,
}

impl Verdict {
    /// Map a 0-100 score onto a verdict (lower bounds are inclusive).
    pub fn from_score(score: i32) -> Self {
        if score >= FAKE_THRESHOLD {
            Self::LikelyFake
        } else if score >= SUSPICIOUS_THRESHOLD {
            Self::Suspicious
        } else {
            Self::LikelyReal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LikelyReal => "Likely Real",
            Self::Suspicious => "Suspicious",
            Self::LikelyFake => "Likely Fake",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============ Scoring Results ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    pub text: String,
    pub lang: Language,
    pub score: i32,
    pub verdict: Verdict,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub avg: i32,
    pub results: Vec<BlockResult>,
    pub combined: Vec<String>,
}

impl Report {
    /// Overall verdict, derived from `avg` with the block thresholds.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_score(self.avg)
    }
}

// ============ API Envelope ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub sensitivity: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub request_id: String,
    pub version: String,
    pub analyzed_at: String,
    pub sensitivity: f64,
    pub mode: String,
    #[serde(default)]
    pub truncated: bool,
    pub verdict: Verdict,
    pub report: Report,
}

// TrueReview Core Services

pub mod text_processor;
pub mod lexicon;
pub mod config_store;
pub mod detection;

pub use text_processor::*;
pub use lexicon::{Lexicon, LexiconEntry};
pub use config_store::*;

// Re-export detection module items
pub use detection::{
    analyze,
    analyze_detailed,
    analyze_with,
    parse_sensitivity,
    score_block,
    score_block_detailed,
    score_block_with,
    DetailedReport,
    RuleHit,
    RuleId,
    Sensitivity,
    SensitivityPreset,
};

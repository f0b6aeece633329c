// Detection Module
// Fake-review scoring core organized into specialized submodules:
// - sensitivity: Weight multiplier and its presets
// - rules: Independent heuristic rule evaluators
// - block_scorer: Scores a single review block
// - aggregation: Splits multi-review input and builds the report

pub mod sensitivity;
pub mod rules;
pub mod block_scorer;
pub mod aggregation;

// Re-export commonly used items
pub use sensitivity::{parse_sensitivity, Sensitivity, SensitivityPreset};
pub use rules::{RuleHit, RuleId};
pub use block_scorer::{score_block, score_block_detailed, score_block_with, ScoredBlock};
pub use aggregation::{
    aggregate_blocks,
    analyze,
    analyze_detailed,
    analyze_with,
    combine_reasons,
    DetailedReport,
    MAX_COMBINED_REASONS,
};

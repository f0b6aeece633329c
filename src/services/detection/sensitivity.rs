// Sensitivity utilities
// Sensitivity is a plain multiplier on every rule weight; it never moves
// the verdict thresholds.

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SensitivityPreset {
    Low,
    Medium,
    High,
}

impl SensitivityPreset {
    pub fn from_name(val: &str) -> Option<Self> {
        match val.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "mid" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
        }
    }
}

/// Uniform weight multiplier, typically 1, 2 or 3.
///
/// The scorer does not validate it: zero, negative or non-finite values
/// are the caller's problem. Use [`parse_sensitivity`] at the edges.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sensitivity(f64);

impl Sensitivity {
    pub const LOW: Sensitivity = Sensitivity(1.0);
    pub const MEDIUM: Sensitivity = Sensitivity(2.0);
    pub const HIGH: Sensitivity = Sensitivity(3.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Weighted contribution of a rule with base weight `weight`.
    #[inline]
    pub fn scale(&self, weight: f64) -> f64 {
        weight * self.0
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl From<SensitivityPreset> for Sensitivity {
    fn from(preset: SensitivityPreset) -> Self {
        Self(preset.multiplier())
    }
}

impl From<f64> for Sensitivity {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Accepts a positive finite number or one of `low` / `medium` / `high`.
pub fn parse_sensitivity(val: &str) -> Option<Sensitivity> {
    let trimmed = val.trim();
    if let Some(preset) = SensitivityPreset::from_name(trimmed) {
        return Some(preset.into());
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(Sensitivity)
}

use serde::{Deserialize, Serialize};

/// Per-factor weights of the overall match score.
///
/// The factors are independent contributions: weights are applied as given
/// and are never rescaled to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub education: f64,
    pub experience: f64,
}

pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    skill: 0.5,
    education: 0.2,
    experience: 0.3,
};

impl Default for ScoringWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl ScoringWeights {
    /// Fills unspecified factors from the defaults.
    pub fn with_overrides(
        skill: Option<f64>,
        education: Option<f64>,
        experience: Option<f64>,
    ) -> Self {
        Self {
            skill: skill.unwrap_or(DEFAULT_WEIGHTS.skill),
            education: education.unwrap_or(DEFAULT_WEIGHTS.education),
            experience: experience.unwrap_or(DEFAULT_WEIGHTS.experience),
        }
    }

    pub fn sum(&self) -> f64 {
        self.skill + self.education + self.experience
    }

    pub fn is_unit_sum(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-9
    }
}

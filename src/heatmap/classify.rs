use serde::{Deserialize, Serialize};

use super::format::format_pct;

/// Changes strictly beyond this magnitude (in percent) are "strong".
pub const STRONG_MOVE_PCT: f64 = 3.0;
/// Changes strictly beyond this magnitude (in percent) leave the neutral band.
pub const MILD_MOVE_PCT: f64 = 0.5;

/// Discrete visual intensity of a percentage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeBucket {
    StrongPositive,
    Positive,
    Neutral,
    Negative,
    StrongNegative,
}

impl ChangeBucket {
    /// Bucket for a resolved change. Missing or NaN values are neutral.
    pub fn for_change(value: Option<f64>) -> Self {
        match value {
            None => Self::Neutral,
            Some(v) if v.is_nan() => Self::Neutral,
            Some(v) if v > STRONG_MOVE_PCT => Self::StrongPositive,
            Some(v) if v > MILD_MOVE_PCT => Self::Positive,
            Some(v) if v < -STRONG_MOVE_PCT => Self::StrongNegative,
            Some(v) if v < -MILD_MOVE_PCT => Self::Negative,
            Some(_) => Self::Neutral,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::StrongPositive | Self::Positive)
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Self::StrongNegative | Self::Negative)
    }
}

/// The change shown on a tile and its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedChange {
    pub display_value: Option<f64>,
    pub bucket: ChangeBucket,
}

impl ClassifiedChange {
    /// `"1.23%"`, or `"--"` when there is nothing to show.
    pub fn display(&self) -> String {
        format_pct(self.display_value)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Resolve the change to display (primary, falling back to secondary) and bucket it.
pub fn classify(primary: Option<f64>, secondary: Option<f64>) -> ClassifiedChange {
    let display_value = finite(primary).or_else(|| finite(secondary));
    ClassifiedChange {
        display_value,
        bucket: ChangeBucket::for_change(display_value),
    }
}

//! Color distance metrics and the match percentage transform
//!
//! The default metric is plain Euclidean distance in RGB space:
//!
//! `d = sqrt((r1 - r2)^2 + (g1 - g2)^2 + (b1 - b2)^2)`
//!
//! Its maximum is black to white, `255 * sqrt(3)` (about 441.67). The OKLab
//! metric is Euclidean distance over (L, a, b); its maximum is also taken as
//! the black to white distance (about 1.0).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::color::Rgb;

/// A symmetric distance between two colors, zero only at identity
pub trait DistanceMetric: Send + Sync {
    /// Distance between `a` and `b`
    fn distance(&self, a: Rgb, b: Rgb) -> f64;

    /// Largest distance the metric produces for two valid colors
    fn max_distance(&self) -> f64;

    /// Map a distance from this metric onto `[0, 100]`
    fn match_percentage(&self, distance: f64) -> f64 {
        percentage(distance, self.max_distance())
    }
}

/// Euclidean distance in RGB space
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanRgb;

impl DistanceMetric for EuclideanRgb {
    #[inline]
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        let dr = a.r as i32 - b.r as i32;
        let dg = a.g as i32 - b.g as i32;
        let db = a.b as i32 - b.b as i32;
        ((dr * dr + dg * dg + db * db) as f64).sqrt()
    }

    fn max_distance(&self) -> f64 {
        self.distance(Rgb::BLACK, Rgb::WHITE)
    }
}

/// Euclidean distance in OKLab space
#[derive(Debug, Clone, Copy, Default)]
pub struct OklabDistance;

impl DistanceMetric for OklabDistance {
    #[inline]
    fn distance(&self, a: Rgb, b: Rgb) -> f64 {
        if a == b {
            return 0.0;
        }
        (a.to_oklab().distance_squared(&b.to_oklab()) as f64).sqrt()
    }

    fn max_distance(&self) -> f64 {
        self.distance(Rgb::BLACK, Rgb::WHITE)
    }
}

/// Selectable metric, used by configuration and the `metric` query parameter
///
/// Both sources go through [`FromStr`], so names are trimmed and
/// case-insensitive everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Metric {
    /// Euclidean distance in RGB space
    #[default]
    Euclidean,
    /// Euclidean distance in OKLab space
    Oklab,
}

impl Metric {
    pub fn as_distance(self) -> &'static dyn DistanceMetric {
        match self {
            Metric::Euclidean => &EuclideanRgb,
            Metric::Oklab => &OklabDistance,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Euclidean => write!(f, "euclidean"),
            Metric::Oklab => write!(f, "oklab"),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "rgb" => Ok(Metric::Euclidean),
            "oklab" => Ok(Metric::Oklab),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}

impl TryFrom<String> for Metric {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `100 * (1 - distance / max_distance)`, clamped to `[0, 100]`
pub fn percentage(distance: f64, max_distance: f64) -> f64 {
    if distance <= 0.0 {
        return 100.0;
    }
    if distance >= max_distance {
        return 0.0;
    }
    (100.0 * (1.0 - distance / max_distance)).clamp(0.0, 100.0)
}

/// Match percentage for a distance produced by [`EuclideanRgb`]
pub fn match_percentage(distance: f64) -> f64 {
    EuclideanRgb.match_percentage(distance)
}

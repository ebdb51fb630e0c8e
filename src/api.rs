//! Request and response types for the HTTP API

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::color::Rgb;
use crate::matcher::MatchResult;
use crate::metric::Metric;
use crate::palette::{PaletteEntry, PaletteGroup};

/// A named palette color
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ColorInfo {
    /// Unique color name, also usable as an anchor id
    pub name: String,
    pub group: String,
    /// Canonical `#rrggbb`
    pub hex: String,
    pub rgb: Rgb,
}

impl From<&PaletteEntry> for ColorInfo {
    fn from(entry: &PaletteEntry) -> Self {
        Self {
            name: entry.name.clone(),
            group: entry.group.clone(),
            hex: entry.color.to_hex(),
            rgb: entry.color,
        }
    }
}

/// One palette group with its colors, in canonical order
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaletteGroupInfo {
    pub group: String,
    pub colors: Vec<ColorInfo>,
}

impl From<PaletteGroup<'_>> for PaletteGroupInfo {
    fn from(group: PaletteGroup<'_>) -> Self {
        Self {
            group: group.name.to_string(),
            colors: group.entries.iter().map(ColorInfo::from).collect(),
        }
    }
}

/// Query for the nearest palette color
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MatchParams {
    /// Color to match: `#rrggbb`, `rgb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`
    pub color: Option<String>,
    /// Distance metric, defaults to the server's configured metric
    pub metric: Option<Metric>,
}

/// Nearest palette color for a query
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MatchResponse {
    pub name: String,
    pub group: String,
    /// Palette color as stored
    pub hex: String,
    pub rgb: Rgb,
    /// The parsed query in canonical `#rrggbb` form
    pub input: String,
    pub distance: f64,
    /// Match quality in `[0, 100]`, 100 for an exact match
    pub percentage: f64,
    pub exact: bool,
    /// e.g. "Exact match" or "96.4% match"
    pub label: String,
    pub metric: Metric,
}

impl MatchResponse {
    pub fn new(result: MatchResult, percentage: f64, metric: Metric) -> Self {
        let exact = result.distance == 0.0;
        Self {
            hex: result.value.to_hex(),
            rgb: result.value,
            name: result.name,
            group: result.group,
            input: result.query.to_hex(),
            distance: result.distance,
            percentage,
            exact,
            label: match_label(percentage, exact),
            metric,
        }
    }
}

/// Human-readable match quality
pub fn match_label(percentage: f64, exact: bool) -> String {
    if exact {
        return "Exact match".to_string();
    }
    // Never round an inexact match up to 100
    let shown = (percentage * 10.0).floor() / 10.0;
    format!("{:.1}% match", shown.min(99.9))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(match_label(100.0, true), "Exact match");
        assert_eq!(match_label(99.99, false), "99.9% match");
        assert_eq!(match_label(96.47, false), "96.4% match");
        assert_eq!(match_label(0.0, false), "0.0% match");
    }

    #[test]
    fn response_carries_stored_color_and_parsed_input() {
        let result = MatchResult {
            name: "cherry".to_string(),
            group: "reds".to_string(),
            value: Rgb::new(255, 0, 0),
            query: Rgb::new(254, 1, 1),
            distance: 3f64.sqrt(),
        };
        let response = MatchResponse::new(result, 99.64, Metric::Euclidean);

        assert_eq!(response.hex, "#ff0000");
        assert_eq!(response.input, "#fe0101");
        assert!(!response.exact);
        assert_eq!(response.label, "99.6% match");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["metric"], "euclidean");
        assert_eq!(json["rgb"]["r"], 255);
    }
}

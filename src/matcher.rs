//! Nearest palette color matching
//!
//! A linear scan over the palette in canonical order. Only a strictly smaller
//! distance replaces the current best, so exact ties resolve to the entry
//! enumerated first.

use std::sync::Arc;
use thiserror::Error;

use crate::color::Rgb;
use crate::metric::{DistanceMetric, Metric};
use crate::palette::{Palette, PaletteEntry};
use crate::parse::{parse_color, ColorParseError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("unrecognized color: {0}")]
    Parse(#[from] ColorParseError),

    #[error("palette has no colors")]
    EmptyPalette,
}

/// The closest palette entry for a query
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub name: String,
    pub group: String,
    pub value: Rgb,
    /// The parsed query color
    pub query: Rgb,
    pub distance: f64,
}

/// Find the palette entry nearest to `color` under `metric`
pub fn nearest<'a>(
    color: Rgb,
    palette: &'a Palette,
    metric: &dyn DistanceMetric,
) -> Result<(&'a PaletteEntry, f64), MatchError> {
    let mut best: Option<(&PaletteEntry, f64)> = None;

    for entry in palette.entries() {
        let dist = metric.distance(color, entry.color);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((entry, dist)),
        }
    }

    best.ok_or(MatchError::EmptyPalette)
}

/// Matches free-form color input against a shared palette
#[derive(Clone)]
pub struct Matcher {
    palette: Arc<Palette>,
    metric: Metric,
}

impl Matcher {
    pub fn new(palette: Arc<Palette>, metric: Metric) -> Self {
        Self { palette, metric }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Default metric for queries that don't pick one
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Nearest entry to an already parsed color
    pub fn match_color(&self, color: Rgb, metric: Metric) -> Result<MatchResult, MatchError> {
        let (entry, distance) = nearest(color, &self.palette, metric.as_distance())?;

        tracing::debug!(
            "Nearest to {} under {}: {} ({}) at {:.4}",
            color,
            metric,
            entry.name,
            entry.color,
            distance
        );

        Ok(MatchResult {
            name: entry.name.clone(),
            group: entry.group.clone(),
            value: entry.color,
            query: color,
            distance,
        })
    }

    /// Parse `input` and find its nearest entry using the default metric
    pub fn parse_and_match(&self, input: &str) -> Result<MatchResult, MatchError> {
        self.parse_and_match_with(input, self.metric)
    }

    pub fn parse_and_match_with(
        &self,
        input: &str,
        metric: Metric,
    ) -> Result<MatchResult, MatchError> {
        let color = parse_color(input)?;
        self.match_color(color, metric)
    }

    /// Percentage score for a distance produced under `metric`
    pub fn match_percentage(&self, distance: f64, metric: Metric) -> f64 {
        metric.as_distance().match_percentage(distance)
    }
}

//! Nearest brand color matching
//!
//! Parses free-form hex or `rgb()` input, finds the closest entry in a named
//! palette and scores the match on a 0-100 scale.

pub mod api;
pub mod color;
pub mod config;
pub mod error;
pub mod matcher;
pub mod metric;
pub mod palette;
pub mod parse;

pub use color::Rgb;
pub use matcher::{MatchError, MatchResult, Matcher};
pub use metric::{match_percentage, DistanceMetric, Metric};
pub use palette::{Palette, PaletteEntry, PaletteError};
pub use parse::{parse_color, ColorParseError};

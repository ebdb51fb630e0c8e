//! Free-form color input parsing
//!
//! Accepted forms:
//! * `#rgb` / `rgb` (each digit doubled)
//! * `#rrggbb` / `rrggbb`
//! * `rgb(r, g, b)` with integer channels 0-255
//! * `rgba(r, g, b, a)`, alpha is validated then discarded

use std::str::FromStr;
use thiserror::Error;

use crate::color::Rgb;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex length: expected 3 or 6 digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digits")]
    InvalidHex,

    #[error("invalid rgb()/rgba() function")]
    InvalidFunction,

    #[error("component out of range: {0}")]
    OutOfRange(String),
}

/// Parse a color string into a canonical RGB triple
pub fn parse_color(input: &str) -> Result<Rgb, ColorParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ColorParseError::Empty);
    }

    let lower = s.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, "rgba") {
        return parse_rgb_function(args, 4);
    }
    if let Some(args) = function_args(&lower, "rgb") {
        return parse_rgb_function(args, 3);
    }
    if lower.starts_with("rgb") {
        return Err(ColorParseError::InvalidFunction);
    }

    parse_hex(s.strip_prefix('#').unwrap_or(s))
}

/// Extract `args` from `name(args)`, tolerating whitespace before the paren
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn parse_hex(hex: &str) -> Result<Rgb, ColorParseError> {
    let nibble = |c: u8| -> Result<u8, ColorParseError> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ColorParseError::InvalidHex),
        }
    };

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Ok(Rgb::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let byte = |hi: u8, lo: u8| -> Result<u8, ColorParseError> {
                Ok(nibble(hi)? << 4 | nibble(lo)?)
            };
            Ok(Rgb::new(
                byte(bytes[0], bytes[1])?,
                byte(bytes[2], bytes[3])?,
                byte(bytes[4], bytes[5])?,
            ))
        }
        n => {
            // Report non-hex content before length so "zzz!" reads as bad digits
            if !bytes.iter().all(u8::is_ascii_hexdigit) {
                return Err(ColorParseError::InvalidHex);
            }
            Err(ColorParseError::InvalidLength(n))
        }
    }
}

fn parse_rgb_function(args: &str, arity: usize) -> Result<Rgb, ColorParseError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != arity {
        return Err(ColorParseError::InvalidFunction);
    }

    let r = parse_channel(parts[0])?;
    let g = parse_channel(parts[1])?;
    let b = parse_channel(parts[2])?;
    if arity == 4 {
        parse_alpha(parts[3])?;
    }

    Ok(Rgb::new(r, g, b))
}

fn parse_channel(s: &str) -> Result<u8, ColorParseError> {
    let value: i64 = s.parse().map_err(|_| ColorParseError::InvalidFunction)?;
    u8::try_from(value).map_err(|_| ColorParseError::OutOfRange(s.to_string()))
}

/// Alpha is either a fraction in `[0, 1]` or an integer in `[0, 255]`
fn parse_alpha(s: &str) -> Result<(), ColorParseError> {
    if s.parse::<u8>().is_ok() {
        return Ok(());
    }
    let value: f32 = s.parse().map_err(|_| ColorParseError::InvalidFunction)?;
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ColorParseError::OutOfRange(s.to_string()))
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_prefix_is_optional() {
        assert_eq!(parse_color("#ff00aa"), Ok(Rgb::new(255, 0, 170)));
        assert_eq!(parse_color("#ff00aa"), parse_color("ff00aa"));
        assert_eq!(parse_color("#FF00AA"), parse_color("ff00aa"));
    }

    #[test]
    fn short_hex_doubles_each_digit() {
        assert_eq!(parse_color("f0a"), parse_color("ff00aa"));
        assert_eq!(parse_color("#fff"), Ok(Rgb::WHITE));
    }

    #[test]
    fn rgb_function_matches_hex() {
        assert_eq!(parse_color("rgb(255,0,170)"), parse_color("#ff00aa"));
        assert_eq!(parse_color("RGB( 255 , 0 , 170 )"), Ok(Rgb::new(255, 0, 170)));
    }

    #[test]
    fn rgba_alpha_is_ignored() {
        assert_eq!(parse_color("rgba(255, 0, 170, 0.5)"), Ok(Rgb::new(255, 0, 170)));
        assert_eq!(parse_color("rgba(255, 0, 170, 128)"), Ok(Rgb::new(255, 0, 170)));
        assert_eq!(
            parse_color("rgba(255, 0, 170, 2.5)"),
            Err(ColorParseError::OutOfRange("2.5".to_string()))
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(parse_color("  #0000ff\n"), Ok(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_color(""), Err(ColorParseError::Empty));
        assert_eq!(parse_color("   "), Err(ColorParseError::Empty));
        assert_eq!(parse_color("zzz"), Err(ColorParseError::InvalidHex));
        assert_eq!(parse_color("#12345"), Err(ColorParseError::InvalidLength(5)));
        assert_eq!(parse_color("#"), Err(ColorParseError::InvalidLength(0)));
        assert_eq!(
            parse_color("rgb(999,0,0)"),
            Err(ColorParseError::OutOfRange("999".to_string()))
        );
        assert_eq!(
            parse_color("rgb(-1,0,0)"),
            Err(ColorParseError::OutOfRange("-1".to_string()))
        );
        assert_eq!(parse_color("rgb(1,2)"), Err(ColorParseError::InvalidFunction));
        assert_eq!(parse_color("rgb(1,2,3"), Err(ColorParseError::InvalidFunction));
        assert_eq!(parse_color("rgba(1,2,3)"), Err(ColorParseError::InvalidFunction));
        assert_eq!(parse_color("rgb(a,b,c)"), Err(ColorParseError::InvalidFunction));
    }

    #[test]
    fn from_str_uses_the_same_grammar() {
        let parsed: Rgb = "#0a0b0c".parse().unwrap();
        assert_eq!(parsed, Rgb::new(10, 11, 12));
        assert!("nope".parse::<Rgb>().is_err());
    }
}

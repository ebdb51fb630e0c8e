//! Error types for the HTTP layer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::matcher::MatchError;
use crate::parse::ColorParseError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please provide a color value first")]
    EmptyInput,

    /// Grammar details stay in the logs, not the response
    #[error("Unrecognized color format")]
    UnrecognizedColor(#[source] ColorParseError),

    #[error("Color not found: {0}")]
    ColorNotFound(String),

    #[error("Palette is empty; the service is misconfigured")]
    EmptyPalette,
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::Parse(e) => AppError::UnrecognizedColor(e),
            MatchError::EmptyPalette => AppError::EmptyPalette,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyInput | AppError::UnrecognizedColor(_) => StatusCode::BAD_REQUEST,
            AppError::ColorNotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmptyPalette => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::EmptyPalette => tracing::error!("Match requested against an empty palette"),
            AppError::UnrecognizedColor(e) => tracing::warn!("Rejected color query: {}", e),
            AppError::EmptyInput => tracing::warn!("Rejected empty color query"),
            AppError::ColorNotFound(name) => tracing::debug!("Unknown color name: {}", name),
        }

        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_errors_map_to_user_facing_errors() {
        let parse = AppError::from(MatchError::Parse(ColorParseError::InvalidHex));
        assert!(matches!(parse, AppError::UnrecognizedColor(ColorParseError::InvalidHex)));
        assert_eq!(parse.to_string(), "Unrecognized color format");

        let empty = AppError::from(MatchError::EmptyPalette);
        assert!(matches!(empty, AppError::EmptyPalette));
    }

    #[test]
    fn status_codes() {
        assert_eq!(AppError::EmptyInput.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnrecognizedColor(ColorParseError::InvalidLength(5))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ColorNotFound("teal".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::EmptyPalette.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

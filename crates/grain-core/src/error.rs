//! Error types for Grain

use thiserror::Error;

/// The main error type for Grain operations
///
/// Only recoverable conditions live here. Breaking a store invariant (two
/// particles in one cell, removing from a vacant cell) is a programming error
/// and panics instead.
#[derive(Debug, Error)]
pub enum GrainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Grain operations
pub type Result<T> = std::result::Result<T, GrainError>;

impl From<toml::de::Error> for GrainError {
    fn from(err: toml::de::Error) -> Self {
        GrainError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for GrainError {
    fn from(err: toml::ser::Error) -> Self {
        GrainError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = GrainError::ValueOutOfRange {
            field: "spawn_rate".into(),
            min: 0.0,
            max: 1.0,
            value: 1.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("spawn_rate"));
        assert!(msg.contains("1.5"));
    }

    #[test]
    fn test_toml_error_converts() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("floor_y = ");
        let err: GrainError = parse.unwrap_err().into();
        assert!(matches!(err, GrainError::TomlParseError(_)));
    }
}

//! Error types for level files and settings.

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while reading or writing a level file.
#[derive(Debug)]
pub enum LevelError {
    /// The level file could not be opened, read or written.
    Io { path: PathBuf, source: std::io::Error },
    /// A field is missing or is not an integer.
    Parse { field: &'static str, token: Option<String> },
    /// A count field is negative.
    NegativeCount { field: &'static str, value: i32 },
    /// A coordinate or size is outside what a level can hold.
    OutOfRange { field: &'static str, value: i32 },
    /// A static particle has a charge outside `{-3..-1, 1..3}`.
    InvalidCharge(i32),
    /// There is no level number to save under.
    NoLevelLoaded,
    /// The level holds more entities than the stores accept.
    TooManyEntities { field: &'static str, count: usize, capacity: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io { path, source } => {
                write!(f, "Failed to access level file {}: {}", path.display(), source)
            }
            LevelError::Parse { field, token: Some(token) } => {
                write!(f, "Malformed level field `{}`: {:?} is not an integer", field, token)
            }
            LevelError::Parse { field, token: None } => {
                write!(f, "Level file ended before field `{}`", field)
            }
            LevelError::NegativeCount { field, value } => {
                write!(f, "Level count `{}` is negative ({})", field, value)
            }
            LevelError::OutOfRange { field, value } => {
                write!(f, "Level field `{}` is out of range ({})", field, value)
            }
            LevelError::InvalidCharge(charge) => {
                write!(f, "Invalid particle charge {} (expected -3..=-1 or 1..=3)", charge)
            }
            LevelError::NoLevelLoaded => write!(f, "No level is loaded"),
            LevelError::TooManyEntities { field, count, capacity } => {
                write!(f, "Level declares {} {} but capacity is {}", count, field, capacity)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that can occur while loading or saving settings.
#[derive(Debug)]
pub enum SettingsError {
    /// Failed to read or write the settings file.
    Io(std::io::Error),
    /// The settings file is not valid JSON for [`crate::Settings`].
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            SettingsError::Json(e) => write!(f, "Invalid settings file: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

//! CLI-specific error types and exit code mapping.

use taleplay_core::{SettingsError, StoryError};
use taleplay_engine::SessionError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing or validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The story document is malformed.
    #[error("Invalid story: {0}")]
    Story(String),

    /// Playback settings are out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The narrator could not narrate.
    #[error("Narration error: {0}")]
    Narration(String),

    /// Command output could not be rendered.
    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Narration(_) => 1,
            Self::Arguments(_) => 2,
            Self::Story(_) => 65,  // EX_DATAERR
            Self::Output(_) => 70, // EX_SOFTWARE
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<StoryError> for CliError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::Io { .. } => Self::Io(err.to_string()),
            _ => Self::Story(err.to_string()),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoParagraphs => Self::Story(err.to_string()),
            SessionError::Settings(settings) => settings.into(),
        }
    }
}

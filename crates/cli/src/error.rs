//! CLI errors with distinct exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: setup error (bad dimensions, source count, radius or speed range)
//! - 11: I/O error (PNG write)
//! - 12: input error (bad --params JSON)
//! - 13: serialization error

use metaball_core::MetaballError;
use std::fmt;

/// Everything `metaballs` can fail with, each mapped to its own exit code.
pub enum CliError {
    /// Configuration rejected before the first frame.
    Setup(MetaballError),
    /// The PNG could not be written.
    Io(String),
    /// `--params` was not valid JSON.
    Input(String),
    /// JSON output could not be produced.
    Serialization(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Setup(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Setup(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<MetaballError> for CliError {
    fn from(e: MetaballError) -> Self {
        match e {
            MetaballError::Io(msg) => CliError::Io(msg),
            other => CliError::Setup(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

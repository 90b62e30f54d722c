//! Script loading and execution errors.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use prism_arena::ArenaError;

/// Errors from running a scene script.
///
/// Statement numbers are 1-based positions in the script. When execution
/// aborts on a statement, everything inserted by earlier statements is
/// still in the scene.
#[derive(Debug)]
pub enum ScriptError {
    /// The script file could not be read.
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The script is not a well-formed statement list.
    Parse(serde_json::Error),
    /// A statement carries values the scene cannot accept.
    Invalid {
        /// Offending statement.
        statement: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// The scene rejected an insertion.
    Arena {
        /// Offending statement.
        statement: usize,
        /// The scene error.
        source: ArenaError,
    },
}

impl ScriptError {
    /// The statement execution stopped at, if any.
    pub fn statement(&self) -> Option<usize> {
        match self {
            Self::Invalid { statement, .. } | Self::Arena { statement, .. } => Some(*statement),
            Self::Io { .. } | Self::Parse(_) => None,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read script '{}': {source}", path.display())
            }
            Self::Parse(e) => write!(f, "malformed script: {e}"),
            Self::Invalid { statement, reason } => {
                write!(f, "statement {statement}: {reason}")
            }
            Self::Arena { statement, source } => {
                write!(f, "statement {statement}: {source}")
            }
        }
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Arena { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

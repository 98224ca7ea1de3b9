//! Error types for library resolution
//!
//! Only the terminal outcome of a search is surfaced: individual open
//! failures are collected into [`LoaderError::NotFound`] instead of being
//! raised one by one.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::loader::SearchStage;
use crate::lookup::CallingConvention;

/// One failed attempt to open a candidate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAttempt {
    pub path: PathBuf,
    pub stage: SearchStage,
    pub reason: String,
}

impl fmt::Display for OpenAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.path.display(), self.reason)
    }
}

/// Errors that can occur while loading a library or resolving its symbols
#[derive(Error, Debug)]
pub enum LoaderError {
    /// No candidate path could be opened
    #[error("library `{name}` not found ({} candidate(s) tried)", .attempts.len())]
    NotFound {
        name: String,
        attempts: Vec<OpenAttempt>,
    },

    /// The handle was never opened under the requested convention
    #[error("no `{convention}` calling convention established for {}", .path.display())]
    NoSuchConvention {
        convention: CallingConvention,
        path: PathBuf,
    },

    /// The convention tag names no known convention
    #[error("unknown calling convention `{tag}` requested from {}", .path.display())]
    UnknownConvention { tag: String, path: PathBuf },

    /// The library has no export with this name
    #[error("symbol `{symbol}` not found in {}: {reason}", .path.display())]
    SymbolNotFound {
        symbol: String,
        path: PathBuf,
        reason: String,
    },

    /// IO error while reading the loader config
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Loader config is not valid JSON
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

impl LoaderError {
    /// Every candidate tried before giving up, empty for other variants.
    pub fn attempts(&self) -> &[OpenAttempt] {
        match self {
            LoaderError::NotFound { attempts, .. } => attempts,
            _ => &[],
        }
    }

    /// Multi-line report listing each failed candidate.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        for attempt in self.attempts() {
            out.push_str("\n  ");
            out.push_str(&attempt.to_string());
        }
        out
    }
}

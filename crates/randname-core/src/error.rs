use std::path::PathBuf;

use randname_grammar::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// A range with `min > max` was about to be sampled.
    #[error("invalid range ({min},{max}): min is greater than max")]
    Configuration { min: u32, max: u32 },

    #[error("pattern cannot be turned into a matcher: {0}")]
    Matcher(#[from] regex::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A malformed policy file line. `line` is 1-based; 0 means the error is
    /// not tied to a line (e.g. an unknown rule name).
    #[error("{}{msg}", line_prefix(*line))]
    Policy { line: usize, msg: String },

    /// A policy rule whose pattern failed to compile or validate.
    #[error("{}rule {name:?}: {source}", line_prefix(*line))]
    Rule {
        line: usize,
        name: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Looks through [`Error::Rule`] to the underlying failure.
    pub fn is_grammar(&self) -> bool {
        match self {
            Error::Grammar(_) => true,
            Error::Rule { source, .. } => source.is_grammar(),
            _ => false,
        }
    }

    /// Looks through [`Error::Rule`] to the underlying failure.
    pub fn is_configuration(&self) -> bool {
        match self {
            Error::Configuration { .. } => true,
            Error::Rule { source, .. } => source.is_configuration(),
            _ => false,
        }
    }

    pub(crate) fn policy(line: usize, msg: impl Into<String>) -> Self {
        Error::Policy {
            line,
            msg: msg.into(),
        }
    }
}

fn line_prefix(line: usize) -> String {
    if line == 0 {
        String::new()
    } else {
        format!("line {line}: ")
    }
}

/// The pattern text itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("malformed pattern {pattern:?}: {source}")]
    Syntax {
        pattern: String,
        #[source]
        source: ParseError,
    },

    #[error(
        "malformed pattern {pattern:?}: invalid character class [{flags}] at byte {at}: {reason}"
    )]
    CharacterClass {
        pattern: String,
        flags: String,
        at: usize,
        reason: &'static str,
    },
}

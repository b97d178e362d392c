use crate::jvm;
use thiserror::Error;

/// Ways loading rules or transforming a class can go wrong
#[derive(Debug, Error)]
pub enum Error {
    /// The line does not have the shape of a directive
    #[error("Malformed directive '{line}': {reason}")]
    MalformedDirective { line: String, reason: String },

    #[error("Unknown modifier '{code}' in directive '{line}'")]
    UnknownModifier { line: String, code: String },

    /// Error from a specific line of a rule file
    #[error("{source_name}:{line_number}: {error}")]
    AtLine {
        source_name: String,
        line_number: usize,
        error: Box<Error>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid class file: {0}")]
    ClassFile(#[from] jvm::Error),
}

impl Error {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Error {
        Error::MalformedDirective {
            line: line.to_owned(),
            reason: reason.into(),
        }
    }

    /// Strip any location wrapper to get at the underlying error
    pub fn root(&self) -> &Error {
        match self {
            Error::AtLine { error, .. } => error.root(),
            other => other,
        }
    }
}

//! Unified error type for subscription parsing.
//!
//! Every failure is fail-fast: the first problem aborts the whole parse and
//! no partial document is produced. Each variant carries the fully-qualified
//! document path of the offending node.
//!
//! Paths have two roots. Scalar fields of the root object are prefixed with
//! `subscription` (`subscription.id`, `subscription.apps` when the `apps`
//! field itself has the wrong kind). Everything inside an app starts at the
//! app's position in the root array (`apps[0].id`,
//! `apps[0].groups[2].rules[1].matches`).

use serde_json::Value;

/// Longest rendering of an offending value kept in a [`Error::TypeMismatch`].
const MAX_FOUND_LEN: usize = 64;

/// Error type covering all failure modes of subscription parsing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field is absent or explicitly `null`.
    #[error("missing {path}")]
    MissingField {
        /// Fully-qualified path of the field.
        path: String,
    },

    /// A field is present but not of the expected kind.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Fully-qualified path of the field or element.
        path: String,
        /// Human-readable name of the expected kind.
        expected: &'static str,
        /// Rendering of the offending value.
        found: String,
    },

    /// The document does not have the required overall structure.
    #[error("malformed document: {0}")]
    Malformed(String),

    /// The input text is not valid JSON.
    #[error("JSON syntax error: {source}")]
    Syntax {
        /// The underlying decoder error.
        #[from]
        source: serde_json::Error,
    },

    /// The relaxed-syntax transcoder rejected its input.
    #[error("transcode error: {0}")]
    Transcode(String),

    /// Encoding the typed document failed.
    #[error("encode error: {0}")]
    Encode(String),
}

impl Error {
    /// Convenience constructor for [`Error::MissingField`].
    pub fn missing(path: impl Into<String>) -> Self {
        Error::MissingField { path: path.into() }
    }

    /// Convenience constructor for [`Error::TypeMismatch`], rendering the
    /// offending value as compact JSON.
    pub fn mismatch(path: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        let mut found = found.to_string();
        if found.len() > MAX_FOUND_LEN {
            let mut cut = MAX_FOUND_LEN;
            while !found.is_char_boundary(cut) {
                cut -= 1;
            }
            found.truncate(cut);
            found.push_str("...");
        }
        Error::TypeMismatch {
            path: path.into(),
            expected,
            found,
        }
    }

    /// Convenience constructor for [`Error::Malformed`].
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::Malformed(message.into())
    }

    /// The document path this error refers to, when it has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::MissingField { path } | Error::TypeMismatch { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

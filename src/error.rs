//! Purpose: Model decode and parse failures as plain values.
//! Exports: `DecodeError`, `DecodeErrorKind`, `ParseError`.
//! Role: Shared failure vocabulary for the decode engine and the parse boundary.
//! Invariants: Errors are constructed at the failure site and propagated unchanged.
//! Invariants: Every decode failure carries the path where decoding stopped.

use std::error::Error as StdError;
use std::fmt;

use crate::path::Path;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum DecodeErrorKind {
    /// The value's tag (or numeric shape) did not match what the decoder wanted.
    TypeMismatch { expected: String, found: String },
    /// An object was present but the requested key was not.
    MissingField { name: String },
    /// A user-supplied validation rejected the value.
    Custom { message: String },
    /// Every `one_of` branch failed; all branch errors are retained in order.
    NoMatch { attempts: Vec<DecodeError> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    path: Path,
}

impl DecodeError {
    pub fn type_mismatch(expected: impl Into<String>, found: &Value, path: Path) -> Self {
        Self {
            kind: DecodeErrorKind::TypeMismatch {
                expected: expected.into(),
                found: found.kind().to_string(),
            },
            path,
        }
    }

    /// Mismatch whose `found` side needs more detail than a bare value tag,
    /// e.g. a number with a fractional part.
    pub fn mismatch_detail(
        expected: impl Into<String>,
        found: impl Into<String>,
        path: Path,
    ) -> Self {
        Self {
            kind: DecodeErrorKind::TypeMismatch {
                expected: expected.into(),
                found: found.into(),
            },
            path,
        }
    }

    /// Note: `path` is the path of the *object* missing the field, not the
    /// field itself. `decode::optional` relies on this to tell an absent
    /// target apart from a malformed present one.
    pub fn missing_field(name: impl Into<String>, path: Path) -> Self {
        Self {
            kind: DecodeErrorKind::MissingField { name: name.into() },
            path,
        }
    }

    pub fn custom(message: impl Into<String>, path: Path) -> Self {
        Self {
            kind: DecodeErrorKind::Custom {
                message: message.into(),
            },
            path,
        }
    }

    pub fn no_match(attempts: Vec<DecodeError>, path: Path) -> Self {
        Self {
            kind: DecodeErrorKind::NoMatch { attempts },
            path,
        }
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DecodeErrorKind::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")?;
            }
            DecodeErrorKind::MissingField { name } => {
                write!(f, "missing field '{name}'")?;
            }
            DecodeErrorKind::Custom { message } => {
                write!(f, "{message}")?;
            }
            DecodeErrorKind::NoMatch { attempts } => {
                write!(f, "no decoder matched")?;
                for (idx, attempt) in attempts.iter().enumerate() {
                    write!(f, "\n  [{}] {attempt}", idx + 1)?;
                }
            }
        }
        if !self.path.is_root() {
            write!(f, " at {}", self.path)?;
        }
        Ok(())
    }
}

impl StdError for DecodeError {}

/// Failure from the external JSON grammar parser, with position when the
/// collaborator provides one.
#[derive(Debug)]
pub struct ParseError {
    source: serde_json::Error,
}

impl ParseError {
    pub(crate) fn new(source: serde_json::Error) -> Self {
        Self { source }
    }

    /// 1-based line of the syntax error, 0 when unknown.
    pub fn line(&self) -> usize {
        self.source.line()
    }

    /// 1-based column of the syntax error, 0 when unknown.
    pub fn column(&self) -> usize {
        self.source.column()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid JSON: {}", self.source)
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.source)
    }
}

//! Error types.

use std::fmt;

use thiserror::Error;

use crate::patch::Patch;
use crate::schema::SegmentId;

// ── Patch errors ──────────────────────────────────────────────────────────

/// Machine-checkable classification of a rejected patch.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown op, op not permitted at the resolved terminal, or illegal use
    /// of the append marker.
    #[error("InvalidOperation")]
    InvalidOperation,
    /// Empty path, missing `from`, undefined segment reached, missing
    /// required child, or `-` not terminal.
    #[error("InvalidPath")]
    InvalidPath,
    /// Unknown literal at a non-wildcard segment.
    #[error("InvalidSegment")]
    InvalidSegment,
    /// Missing value for add, replace or test.
    #[error("InvalidValue")]
    InvalidValue,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidOperation => "InvalidOperation",
            ErrorKind::InvalidPath => "InvalidPath",
            ErrorKind::InvalidSegment => "InvalidSegment",
            ErrorKind::InvalidValue => "InvalidValue",
        }
    }
}

/// A patch that failed validation.
///
/// Renders as `message` or `message (details)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchError {
    kind: ErrorKind,
    message: String,
    details: String,
    origin: Option<Box<Patch>>,
}

impl PatchError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: details.into(),
            origin: None,
        }
    }

    /// Attaches the patch that caused the error.
    pub fn with_origin(mut self, patch: Patch) -> Self {
        self.origin = Some(Box::new(patch));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The kind as a string code, e.g. `"InvalidPath"`.
    pub fn code(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn origin(&self) -> Option<&Patch> {
        self.origin.as_deref()
    }

    pub(crate) fn invalid_operation(message: &str, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidOperation, message, details)
    }

    pub(crate) fn invalid_path(message: &str, details: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, message, details)
    }
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.details.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{} ({})", self.message, self.details)
        }
    }
}

impl std::error::Error for PatchError {}

// ── Schema errors ─────────────────────────────────────────────────────────

/// Raised by [`SchemaBuilder::build`](crate::SchemaBuilder::build).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("segment {0} does not exist")]
    UnknownSegment(SegmentId),
    #[error("segment {0} was reserved but never defined")]
    Undefined(SegmentId),
    #[error("child {child} of segment {parent} does not exist")]
    DanglingChild { parent: SegmentId, child: SegmentId },
}

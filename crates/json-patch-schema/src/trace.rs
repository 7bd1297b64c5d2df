//! Walks a pointer through a [`PathSchema`], translating external segment
//! names into internal ones.

use tracing::trace;

use crate::error::{ErrorKind, PatchError};
use crate::patch::{split_segments, SEPARATOR};
use crate::schema::{PathSchema, PathSegment, PathValue, WILDCARD};

/// Result of a successful trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracedPath {
    /// The pointer rewritten with internal names.
    pub path: String,
    /// Value resolved for the final segment. Its `supported_ops` decide
    /// which operations may target the path.
    pub terminal: PathValue,
}

/// Traces `path` from the schema root.
///
/// Fails with [`ErrorKind::InvalidSegment`] on an unknown literal and with
/// [`ErrorKind::InvalidPath`] when `-` is followed by more segments, when the
/// path stops above a required segment, or when it runs past a leaf.
pub fn trace_path(path: &str, schema: &PathSchema) -> Result<TracedPath, PatchError> {
    let segments = split_segments(path);
    let Some(last) = segments.len().checked_sub(1) else {
        return Err(PatchError::invalid_path(
            "Empty Paths Not Supported",
            "paths must begin with /",
        ));
    };

    let mut current = Some(schema.root_segment());
    let mut out = String::with_capacity(path.len());
    let mut terminal = None;

    for (i, literal) in segments.into_iter().enumerate() {
        let Some(segment) = current else {
            return Err(undefined_segment(path));
        };
        let (value, next) = resolve_segment(schema, segment, literal)?;

        if value.is_append_marker() && i < last {
            return Err(PatchError::invalid_path(
                "Invalid Path",
                "'-' must be final path segment",
            ));
        }

        match next {
            Some(child) if i == last && !child.optional => {
                return Err(PatchError::invalid_path(
                    "Invalid Path",
                    "required path segment missing",
                ));
            }
            None if i < last => return Err(undefined_segment(path)),
            _ => {}
        }

        trace!(segment = literal, name = %value.name, depth = i, "resolved path segment");

        out.push(SEPARATOR);
        out.push_str(&value.name);
        current = next;
        terminal = Some(value);
    }

    let terminal = terminal.ok_or_else(|| undefined_segment(path))?;
    Ok(TracedPath {
        path: out,
        terminal,
    })
}

/// Resolves one literal against `segment`, returning its value and the
/// segment that follows it, if any.
///
/// Wildcard segments accept the literal verbatim as the value's name and
/// take supported operations from their [`WILDCARD`] entry.
pub fn resolve_segment<'s>(
    schema: &'s PathSchema,
    segment: &'s PathSegment,
    literal: &str,
) -> Result<(PathValue, Option<&'s PathSegment>), PatchError> {
    if segment.wildcard {
        let supported_ops = segment
            .values
            .get(WILDCARD)
            .map(|v| v.supported_ops.clone())
            .unwrap_or_default();
        let value = PathValue {
            name: literal.to_string(),
            supported_ops,
        };
        return Ok((value, schema.child(segment, WILDCARD)));
    }

    let value = segment.values.get(literal).ok_or_else(|| {
        PatchError::new(
            ErrorKind::InvalidSegment,
            "Invalid path",
            format!("unknown segment: {literal}"),
        )
    })?;
    Ok((value.clone(), schema.child(segment, literal)))
}

fn undefined_segment(path: &str) -> PatchError {
    PatchError::invalid_path(
        "Invalid path",
        format!("path reaches undefined segment: {path}"),
    )
}

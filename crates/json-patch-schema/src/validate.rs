//! Single-patch validation.
//!
//! [`validate_shape`] checks what can be checked without a schema: a known
//! operation, a non-empty `path`, `from` for move/copy and `value` for
//! add/replace/test. [`validate_patch`] then traces `path` (and `from`)
//! through the schema and enforces the terminal value's operation list.

use crate::error::{ErrorKind, PatchError};
use crate::op::{format_ops, OpKind};
use crate::patch::{has_segments, Patch};
use crate::schema::PathSchema;
use crate::trace::trace_path;

/// Checks a patch's shape independently of any schema.
///
/// Errors carry the offending patch as their origin.
pub fn validate_shape(patch: &Patch) -> Result<OpKind, PatchError> {
    let op: OpKind = patch.op.parse().map_err(|_| {
        PatchError::invalid_operation(
            "Invalid operation",
            format!(
                "supported operations are: {}, {}, {}, {}, {} and {}",
                OpKind::Add,
                OpKind::Remove,
                OpKind::Replace,
                OpKind::Copy,
                OpKind::Move,
                OpKind::Test
            ),
        )
        .with_origin(patch.clone())
    })?;

    if !has_segments(&patch.path) {
        return Err(
            PatchError::invalid_path("Empty Paths Not Supported", "paths must begin with /")
                .with_origin(patch.clone()),
        );
    }

    if op.requires_from() && !has_segments(&patch.from) {
        return Err(PatchError::invalid_path(
            "From path required",
            "copy and move operations require from",
        )
        .with_origin(patch.clone()));
    }

    if op.requires_value() && patch.value.is_none() {
        return Err(PatchError::new(
            ErrorKind::InvalidValue,
            "Value required",
            format!("value required for {op}"),
        )
        .with_origin(patch.clone()));
    }

    Ok(op)
}

/// Validates a patch against `schema` and returns it with `path` and `from`
/// rewritten to internal names.
///
/// `from` is only meaningful for move and copy; for other operations it is
/// dropped from the output.
///
/// ```
/// use json_patch_schema::{validate_patch, OpKind, Patch, PathSegment, PathValue, SchemaBuilder};
///
/// let mut b = SchemaBuilder::new();
/// let root = b.insert(
///     PathSegment::required().value("userName", PathValue::new("user_name").with_ops([OpKind::Remove])),
/// );
/// let schema = b.build(root).unwrap();
///
/// let out = validate_patch(&Patch::new("remove", "/userName"), &schema).unwrap();
/// assert_eq!(out.path, "/user_name");
/// ```
pub fn validate_patch(patch: &Patch, schema: &PathSchema) -> Result<Patch, PatchError> {
    validate(patch, schema).map(|(_, normalized)| normalized)
}

pub(crate) fn validate(patch: &Patch, schema: &PathSchema) -> Result<(OpKind, Patch), PatchError> {
    let op = validate_shape(patch)?;
    let path = validate_path(&patch.path, op, schema)?;
    let from = if op.requires_from() {
        validate_from(&patch.from, op, schema)?
    } else {
        String::new()
    };

    let normalized = Patch {
        op: patch.op.clone(),
        path,
        value: patch.value.clone(),
        from,
    };
    Ok((op, normalized))
}

/// Traces the target path and checks `op` against its terminal value.
pub fn validate_path(path: &str, op: OpKind, schema: &PathSchema) -> Result<String, PatchError> {
    let traced = trace_path(path, schema)?;

    if traced.terminal.is_append_marker() && op.reads_target() {
        return Err(PatchError::invalid_operation(
            "Invalid Operation",
            format!("cannot {op} array index of '-'"),
        ));
    }

    if !traced.terminal.supports(op) {
        return Err(PatchError::invalid_operation(
            "Invalid operation",
            format!(
                "supported operations are: {}",
                format_ops(&traced.terminal.supported_ops)
            ),
        ));
    }

    Ok(traced.path)
}

/// Traces a `from` path. No operation list applies to the source, but it
/// may not be the append marker.
pub fn validate_from(from: &str, op: OpKind, schema: &PathSchema) -> Result<String, PatchError> {
    let traced = trace_path(from, schema)?;

    if traced.terminal.is_append_marker() {
        return Err(PatchError::invalid_operation(
            "Invalid Operation",
            format!("cannot {op} from array index of '-'"),
        ));
    }

    Ok(traced.path)
}

//! The six RFC 6902 operation kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A JSON Patch operation name.
///
/// The wire representation of a [`Patch`](crate::Patch) keeps `op` as a raw
/// string so that unknown operations can be reported as validation errors
/// rather than decode failures; `OpKind` is what the string resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl OpKind {
    /// All operations, in the order they are listed in error messages.
    pub const ALL: [OpKind; 6] = [
        OpKind::Add,
        OpKind::Remove,
        OpKind::Replace,
        OpKind::Copy,
        OpKind::Move,
        OpKind::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Remove => "remove",
            OpKind::Replace => "replace",
            OpKind::Move => "move",
            OpKind::Copy => "copy",
            OpKind::Test => "test",
        }
    }

    /// Operations that read a source location through `from`.
    pub fn requires_from(&self) -> bool {
        matches!(self, OpKind::Move | OpKind::Copy)
    }

    /// Operations that carry a `value`.
    pub fn requires_value(&self) -> bool {
        matches!(self, OpKind::Add | OpKind::Replace | OpKind::Test)
    }

    /// Operations that may not target the append marker `-`.
    pub fn reads_target(&self) -> bool {
        matches!(self, OpKind::Remove | OpKind::Test | OpKind::Replace)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the six operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOp(pub String);

impl fmt::Display for UnknownOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation: {}", self.0)
    }
}

impl std::error::Error for UnknownOp {}

impl FromStr for OpKind {
    type Err = UnknownOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(OpKind::Add),
            "remove" => Ok(OpKind::Remove),
            "replace" => Ok(OpKind::Replace),
            "move" => Ok(OpKind::Move),
            "copy" => Ok(OpKind::Copy),
            "test" => Ok(OpKind::Test),
            other => Err(UnknownOp(other.to_string())),
        }
    }
}

/// Formats a list of operations as `[add remove]`.
pub(crate) fn format_ops(ops: &[OpKind]) -> String {
    let names: Vec<&str> = ops.iter().map(OpKind::as_str).collect();
    format!("[{}]", names.join(" "))
}

//! The wire-level patch record.
//!
//! A [`Patch`] is what the decoding layer produces from an RFC 6902 document:
//! `op` and `path` are always present, `value` and `from` are omitted when
//! absent. A JSON `null` value deserializes as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path separator.
pub const SEPARATOR: char = '/';

/// A single requested mutation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Patch {
    /// Operation name. Kept as a raw string so that unknown operations
    /// surface as validation errors.
    pub op: String,
    /// Target location, `/`-separated.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Source location for `move` and `copy`; empty when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
}

/// Which pointer of a patch to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerField {
    Path,
    From,
}

impl Patch {
    pub fn new(op: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    /// Path segments with the leading empty element discarded.
    ///
    /// ```
    /// use json_patch_schema::Patch;
    ///
    /// let p = Patch::new("remove", "/a/b");
    /// assert_eq!(p.segments(), vec!["a", "b"]);
    /// ```
    pub fn segments(&self) -> Vec<&str> {
        split_segments(&self.path)
    }

    /// Drops the first segment of `path` (and of `from`, when present),
    /// producing a patch addressed relative to a child object.
    ///
    /// ```
    /// use json_patch_schema::Patch;
    ///
    /// let p = Patch::new("move", "/l1/l2/l3").with_from("/l3");
    /// let shifted = p.shift();
    /// assert_eq!(shifted.path, "/l2/l3");
    /// assert_eq!(shifted.from, "/");
    /// ```
    pub fn shift(&self) -> Patch {
        Patch {
            op: self.op.clone(),
            path: shift_pointer(&self.path),
            value: self.value.clone(),
            from: if self.from.is_empty() {
                String::new()
            } else {
                shift_pointer(&self.from)
            },
        }
    }

    /// The final segment of `path` or `from` as a non-negative array index.
    pub fn array_index(&self, which: PointerField) -> Option<usize> {
        let pointer = match which {
            PointerField::Path => &self.path,
            PointerField::From => &self.from,
        };
        let last = split_segments(pointer).pop()?;
        last.parse::<i64>()
            .ok()
            .and_then(|i| usize::try_from(i).ok())
    }
}

/// Splits a pointer on `/`, discarding the element before the leading
/// separator. An empty pointer yields no segments.
pub fn split_segments(pointer: &str) -> Vec<&str> {
    pointer.split(SEPARATOR).skip(1).collect()
}

/// True when the pointer has at least one non-empty segment position,
/// i.e. it is neither `""` nor `"/"`.
pub(crate) fn has_segments(pointer: &str) -> bool {
    let segments = split_segments(pointer);
    !(segments.is_empty() || (segments.len() == 1 && segments[0].is_empty()))
}

fn shift_pointer(pointer: &str) -> String {
    let segments = split_segments(pointer);
    let rest = segments.get(1..).unwrap_or_default();
    format!("{}{}", SEPARATOR, rest.join("/"))
}

/// Whether a JSON value can address an array element: an integer, the
/// append marker `-`, or a string holding an integer.
pub fn valid_array_index(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => s == "-" || s.parse::<i64>().is_ok(),
        _ => false,
    }
}

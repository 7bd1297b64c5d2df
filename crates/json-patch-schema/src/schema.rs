//! Declarative path schema.
//!
//! A schema is a tree of [`PathSegment`]s describing every legal path into a
//! document. Each segment lists the external names it accepts (its
//! [`PathValue`]s, which also carry the internal storage name and the
//! operations allowed when the path ends there) and the child segment that
//! follows each name.
//!
//! Segments live in an arena owned by [`PathSchema`] and refer to their
//! children by [`SegmentId`]. This lets a schema describe recursive
//! documents (a child pointing back at an ancestor) without reference
//! cycles; tracing is bounded by the length of the traced path.
//!
//! ```
//! use json_patch_schema::{OpKind, PathSegment, PathValue, SchemaBuilder};
//!
//! let mut builder = SchemaBuilder::new();
//! let name = builder.insert(
//!     PathSegment::required()
//!         .value("first", PathValue::new("first_name").with_ops([OpKind::Replace]))
//!         .value("last", PathValue::new("last_name").with_ops([OpKind::Replace])),
//! );
//! let root = builder.insert(
//!     PathSegment::required()
//!         .value("name", PathValue::new("name"))
//!         .child("name", name),
//! );
//! let schema = builder.build(root).unwrap();
//! assert_eq!(schema.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::error::SchemaError;
use crate::op::OpKind;

/// Key under which a wildcard segment stores its default value and child.
pub const WILDCARD: &str = "*";

/// RFC 6902 "end of array" marker.
pub const APPEND_MARKER: &str = "-";

/// Index of a segment inside a [`PathSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl SegmentId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── PathValue ─────────────────────────────────────────────────────────────

/// The resolved identity of one segment.
///
/// `supported_ops` only matters when the segment is the last one in a path;
/// for intermediate segments the child's value governs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathValue {
    /// Internal name emitted in place of the external one.
    pub name: String,
    pub supported_ops: Vec<OpKind>,
}

impl PathValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supported_ops: Vec::new(),
        }
    }

    pub fn with_ops(mut self, ops: impl IntoIterator<Item = OpKind>) -> Self {
        for op in ops {
            if !self.supported_ops.contains(&op) {
                self.supported_ops.push(op);
            }
        }
        self
    }

    pub fn supports(&self, op: OpKind) -> bool {
        self.supported_ops.contains(&op)
    }

    pub fn is_append_marker(&self) -> bool {
        self.name == APPEND_MARKER
    }
}

// ── PathSegment ───────────────────────────────────────────────────────────

/// One level of the path tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegment {
    /// When false, a path may not stop at the parent of this segment.
    pub optional: bool,
    /// When true, any literal is accepted at this level.
    pub wildcard: bool,
    /// External name to value. Wildcard segments may hold a single entry
    /// under [`WILDCARD`] carrying the default supported operations.
    pub values: BTreeMap<String, PathValue>,
    /// External name (or [`WILDCARD`]) to the segment that follows it.
    pub children: BTreeMap<String, SegmentId>,
}

impl PathSegment {
    pub fn required() -> Self {
        Self::default()
    }

    pub fn optional() -> Self {
        Self {
            optional: true,
            ..Self::default()
        }
    }

    /// Accept any literal at this level.
    pub fn wildcard(mut self) -> Self {
        self.wildcard = true;
        self
    }

    pub fn value(mut self, external: impl Into<String>, value: PathValue) -> Self {
        self.values.insert(external.into(), value);
        self
    }

    /// Operations allowed on any literal matched by a wildcard segment.
    pub fn wildcard_ops(self, ops: impl IntoIterator<Item = OpKind>) -> Self {
        self.value(WILDCARD, PathValue::new(WILDCARD).with_ops(ops))
    }

    pub fn child(mut self, external: impl Into<String>, segment: SegmentId) -> Self {
        self.children.insert(external.into(), segment);
        self
    }

    /// Child followed after any literal matched by a wildcard segment.
    pub fn wildcard_child(self, segment: SegmentId) -> Self {
        self.child(WILDCARD, segment)
    }
}

// ── PathSchema ────────────────────────────────────────────────────────────

/// An immutable, validated schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSchema {
    segments: Vec<PathSegment>,
    root: SegmentId,
}

impl PathSchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn root(&self) -> SegmentId {
        self.root
    }

    pub fn root_segment(&self) -> &PathSegment {
        &self.segments[self.root.0]
    }

    pub fn segment(&self, id: SegmentId) -> Option<&PathSegment> {
        self.segments.get(id.0)
    }

    /// The segment following `key` under `segment`.
    ///
    /// Every id reachable from this schema was checked by
    /// [`SchemaBuilder::build`], so the lookup cannot dangle.
    pub fn child(&self, segment: &PathSegment, key: &str) -> Option<&PathSegment> {
        segment.children.get(key).and_then(|id| self.segment(*id))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

// ── SchemaBuilder ─────────────────────────────────────────────────────────

/// Assembles a [`PathSchema`] bottom-up.
///
/// Leaves are inserted first and their ids passed to the parents that
/// reference them. Recursive schemas reserve an id up front with
/// [`reserve`](Self::reserve) and fill it in later with
/// [`define`](Self::define).
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    slots: Vec<Option<PathSegment>>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, segment: PathSegment) -> SegmentId {
        self.slots.push(Some(segment));
        SegmentId(self.slots.len() - 1)
    }

    /// Allocates an id whose segment is supplied later.
    pub fn reserve(&mut self) -> SegmentId {
        self.slots.push(None);
        SegmentId(self.slots.len() - 1)
    }

    /// Sets (or replaces) the segment stored at `id`.
    pub fn define(&mut self, id: SegmentId, segment: PathSegment) -> Result<(), SchemaError> {
        let slot = self
            .slots
            .get_mut(id.0)
            .ok_or(SchemaError::UnknownSegment(id))?;
        *slot = Some(segment);
        Ok(())
    }

    pub fn build(self, root: SegmentId) -> Result<PathSchema, SchemaError> {
        if root.0 >= self.slots.len() {
            return Err(SchemaError::UnknownSegment(root));
        }
        let count = self.slots.len();
        let mut segments = Vec::with_capacity(count);
        for (i, slot) in self.slots.into_iter().enumerate() {
            let parent = SegmentId(i);
            let segment = slot.ok_or(SchemaError::Undefined(parent))?;
            if let Some(child) = segment.children.values().find(|c| c.0 >= count) {
                return Err(SchemaError::DanglingChild {
                    parent,
                    child: *child,
                });
            }
            segments.push(segment);
        }
        Ok(PathSchema { segments, root })
    }
}

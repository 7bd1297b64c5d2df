//! Schema-driven JSON Patch (RFC 6902) validation.
//!
//! Document types declare, once, the tree of paths they accept as a
//! [`PathSchema`]: which segments exist, which are optional, which accept
//! any literal (array indices, map keys), which operations each leaf allows
//! and how external (wire) names map to internal (storage) names. Incoming
//! patches are checked against that schema, rewritten to internal names,
//! reordered so destructive operations come first, and handed to the
//! document's own [`Patchable::finalize`] step.
//!
//! # Example
//!
//! ```
//! use json_patch_schema::{
//!     process_patches, OpKind, Patch, Patchable, PathSchema, PathSegment, PathValue,
//!     SchemaBuilder,
//! };
//! use serde_json::json;
//!
//! struct User {
//!     schema: PathSchema,
//! }
//!
//! impl Patchable for User {
//!     type Error = String;
//!
//!     fn root_segment(&self) -> &PathSchema {
//!         &self.schema
//!     }
//!
//!     fn finalize(&self, patches: Vec<Patch>) -> Result<Vec<Patch>, Vec<String>> {
//!         Ok(patches)
//!     }
//! }
//!
//! let mut b = SchemaBuilder::new();
//! let tags = b.insert(
//!     PathSegment::optional()
//!         .wildcard()
//!         .wildcard_ops([OpKind::Add, OpKind::Remove]),
//! );
//! let root = b.insert(
//!     PathSegment::required()
//!         .value("userName", PathValue::new("user_name").with_ops([OpKind::Replace]))
//!         .value("tags", PathValue::new("tags"))
//!         .child("tags", tags),
//! );
//! let user = User { schema: b.build(root).unwrap() };
//!
//! let out = process_patches(
//!     &[
//!         Patch::new("add", "/tags/-").with_value(json!("admin")),
//!         Patch::new("replace", "/userName").with_value(json!("ada")),
//!     ],
//!     &user,
//! )
//! .unwrap();
//! assert_eq!(out[0].path, "/user_name");
//! assert_eq!(out[1].path, "/tags/-");
//! ```

pub mod error;
pub mod op;
pub mod patch;
pub mod process;
pub mod schema;
pub mod trace;
pub mod validate;

pub use error::{ErrorKind, PatchError, SchemaError};
pub use op::{OpKind, UnknownOp};
pub use patch::{split_segments, valid_array_index, Patch, PointerField};
pub use process::{
    process_patches, process_patches_with, validate_batch, CopyTestPolicy, Patchable,
    ProcessError, ProcessOptions,
};
pub use schema::{
    PathSchema, PathSegment, PathValue, SchemaBuilder, SegmentId, APPEND_MARKER, WILDCARD,
};
pub use trace::{resolve_segment, trace_path, TracedPath};
pub use validate::{validate_from, validate_path, validate_patch, validate_shape};

//! Batch entry point.
//!
//! [`process_patches`] validates every patch in a batch against the host's
//! schema, collecting all failures instead of stopping at the first one. A
//! batch with any failure is rejected as a whole. Otherwise the normalized
//! patches are reordered (removals, replacements, moves, then adds) and
//! handed to the host's [`Patchable::finalize`] step.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::PatchError;
use crate::op::OpKind;
use crate::patch::Patch;
use crate::schema::PathSchema;
use crate::validate::validate;

/// A document type that accepts JSON Patch batches.
pub trait Patchable {
    /// Error type produced by [`finalize`](Self::finalize).
    type Error;

    /// The schema every patch is validated against.
    fn root_segment(&self) -> &PathSchema;

    /// Interprets a validated, reordered batch in terms of the backing
    /// store. May adjust, split or reject patches.
    fn finalize(&self, patches: Vec<Patch>) -> Result<Vec<Patch>, Vec<Self::Error>>;
}

/// Whether `copy` and `test` patches are forwarded to the finalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyTestPolicy {
    /// Validate copy and test patches but do not forward them.
    #[default]
    Drop,
    /// Forward copies, then tests, after the adds, each in input order.
    Forward,
}

/// Options for [`process_patches_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    pub copy_test_policy: CopyTestPolicy,
}

/// Why a batch was not applied.
#[derive(Debug, Error, PartialEq)]
pub enum ProcessError<E> {
    /// One or more patches failed validation, in input order.
    #[error("{} patch(es) failed validation", .0.len())]
    Invalid(Vec<PatchError>),
    /// The finalizer rejected the batch; its errors are passed through as is.
    #[error("finalizer rejected the batch with {} error(s)", .0.len())]
    Rejected(Vec<E>),
}

impl<E> ProcessError<E> {
    /// Validation errors, if the batch never reached the finalizer.
    pub fn validation_errors(&self) -> Option<&[PatchError]> {
        match self {
            ProcessError::Invalid(errs) => Some(errs),
            ProcessError::Rejected(_) => None,
        }
    }
}

/// Validates and finalizes `patches` with default options.
pub fn process_patches<P>(patches: &[Patch], target: &P) -> Result<Vec<Patch>, ProcessError<P::Error>>
where
    P: Patchable + ?Sized,
{
    process_patches_with(patches, target, &ProcessOptions::default())
}

/// Validates and finalizes `patches`.
pub fn process_patches_with<P>(
    patches: &[Patch],
    target: &P,
    options: &ProcessOptions,
) -> Result<Vec<Patch>, ProcessError<P::Error>>
where
    P: Patchable + ?Sized,
{
    debug!(patches = patches.len(), "processing patch batch");

    let ordered = match validate_batch(patches, target.root_segment(), options) {
        Ok(ordered) => ordered,
        Err(errs) => {
            debug!(errors = errs.len(), "patch batch rejected");
            return Err(ProcessError::Invalid(errs));
        }
    };

    debug!(forwarded = ordered.len(), "patch batch validated");
    target.finalize(ordered).map_err(ProcessError::Rejected)
}

/// Validates every patch and returns the reordered batch, or all errors.
pub fn validate_batch(
    patches: &[Patch],
    schema: &PathSchema,
    options: &ProcessOptions,
) -> Result<Vec<Patch>, Vec<PatchError>> {
    let mut errs = Vec::new();
    let mut buckets = Buckets::default();

    for patch in patches {
        match validate(patch, schema) {
            Ok((op, normalized)) => buckets.push(op, normalized),
            Err(e) => {
                let e = if e.origin().is_some() {
                    e
                } else {
                    e.with_origin(patch.clone())
                };
                errs.push(e);
            }
        }
    }

    if !errs.is_empty() {
        return Err(errs);
    }
    Ok(buckets.into_ordered(options.copy_test_policy))
}

#[derive(Default)]
struct Buckets {
    remove: Vec<Patch>,
    replace: Vec<Patch>,
    moves: Vec<Patch>,
    add: Vec<Patch>,
    copy: Vec<Patch>,
    test: Vec<Patch>,
}

impl Buckets {
    fn push(&mut self, op: OpKind, patch: Patch) {
        let bucket = match op {
            OpKind::Remove => &mut self.remove,
            OpKind::Replace => &mut self.replace,
            OpKind::Move => &mut self.moves,
            OpKind::Add => &mut self.add,
            OpKind::Copy => &mut self.copy,
            OpKind::Test => &mut self.test,
        };
        bucket.push(patch);
    }

    fn into_ordered(self, policy: CopyTestPolicy) -> Vec<Patch> {
        let mut out = self.remove;
        out.extend(self.replace);
        out.extend(self.moves);
        out.extend(self.add);
        if policy == CopyTestPolicy::Forward {
            out.extend(self.copy);
            out.extend(self.test);
        }
        out
    }
}

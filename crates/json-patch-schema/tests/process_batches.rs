use json_patch_schema::{
    process_patches, process_patches_with, CopyTestPolicy, ErrorKind, OpKind, Patch, Patchable,
    PathSchema, PathSegment, PathValue, PointerField, ProcessError, ProcessOptions, SchemaBuilder,
};
use serde_json::{json, Value};

/// A profile document:
///
/// ```text
/// /displayName           -> /display_name        replace, test
/// /emails/<n>            -> /emails/<n>          add, remove, replace, move, copy
/// /address/street        -> /address/street      replace
/// /address/city          -> /address/city        replace
/// /settings/<key>        -> /prefs/<key>         add, remove, replace
/// ```
struct Profile {
    schema: PathSchema,
    emails: Vec<String>,
}

impl Profile {
    fn new() -> Self {
        let mut b = SchemaBuilder::new();
        let emails = b.insert(
            PathSegment::optional()
                .wildcard()
                .wildcard_ops([OpKind::Add, OpKind::Remove, OpKind::Replace, OpKind::Move, OpKind::Copy]),
        );
        let address = b.insert(
            PathSegment::required()
                .value("street", PathValue::new("street").with_ops([OpKind::Replace]))
                .value("city", PathValue::new("city").with_ops([OpKind::Replace])),
        );
        let settings = b.insert(
            PathSegment::optional()
                .wildcard()
                .wildcard_ops([OpKind::Add, OpKind::Remove, OpKind::Replace]),
        );
        let root = b.insert(
            PathSegment::required()
                .value(
                    "displayName",
                    PathValue::new("display_name").with_ops([OpKind::Replace, OpKind::Test]),
                )
                .value("emails", PathValue::new("emails"))
                .value("address", PathValue::new("address"))
                .value("settings", PathValue::new("prefs"))
                .child("emails", emails)
                .child("address", address)
                .child("settings", settings),
        );
        Self {
            schema: b.build(root).unwrap(),
            emails: vec!["a@example.com".into(), "b@example.com".into()],
        }
    }
}

#[derive(Debug, PartialEq)]
enum StoreError {
    IndexOutOfBounds(usize),
}

impl Patchable for Profile {
    type Error = StoreError;

    fn root_segment(&self) -> &PathSchema {
        &self.schema
    }

    /// Array edits are rewritten into a single replace of the whole list.
    fn finalize(&self, patches: Vec<Patch>) -> Result<Vec<Patch>, Vec<StoreError>> {
        let mut errs = Vec::new();
        let mut out = Vec::new();
        let mut emails = self.emails.clone();
        let mut touched = false;

        for p in patches {
            if !p.path.starts_with("/emails/") {
                out.push(p);
                continue;
            }
            touched = true;
            let value = p.value.as_ref().and_then(Value::as_str).unwrap_or_default().to_string();
            match (p.op.as_str(), p.array_index(PointerField::Path)) {
                ("add", None) => emails.push(value),
                ("add", Some(i)) if i <= emails.len() => emails.insert(i, value),
                ("remove", Some(i)) if i < emails.len() => {
                    emails.remove(i);
                }
                ("replace", Some(i)) if i < emails.len() => emails[i] = value,
                (_, Some(i)) => errs.push(StoreError::IndexOutOfBounds(i)),
                _ => {}
            }
        }

        if !errs.is_empty() {
            return Err(errs);
        }
        if touched {
            out.push(Patch::new("replace", "/emails").with_value(json!(emails)));
        }
        Ok(out)
    }
}

#[test]
fn renames_and_forwards_valid_batch() {
    let batch = vec![
        Patch::new("replace", "/displayName").with_value(json!("Ada")),
        Patch::new("replace", "/address/city").with_value(json!("London")),
        Patch::new("add", "/settings/theme").with_value(json!("dark")),
    ];
    let out = process_patches(&batch, &Profile::new()).unwrap();
    let paths: Vec<&str> = out.iter().map(|p| p.path.as_str()).collect();
    assert_eq!(paths, vec!["/display_name", "/address/city", "/prefs/theme"]);
}

#[test]
fn one_bad_patch_rejects_the_batch() {
    let batch = vec![
        Patch::new("replace", "/displayName").with_value(json!("Ada")),
        Patch::new("remove", "/displayName"),
        Patch::new("replace", "/address/city").with_value(json!("London")),
    ];
    let err = process_patches(&batch, &Profile::new()).unwrap_err();
    match err {
        ProcessError::Invalid(errs) => {
            assert_eq!(errs.len(), 1);
            assert_eq!(errs[0].kind(), ErrorKind::InvalidOperation);
            assert_eq!(errs[0].details(), "supported operations are: [replace test]");
            assert_eq!(errs[0].origin(), Some(&batch[1]));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn address_requires_a_field() {
    let batch = vec![Patch::new("replace", "/address").with_value(json!({}))];
    let err = process_patches(&batch, &Profile::new()).unwrap_err();
    let errs = err.validation_errors().unwrap();
    assert_eq!(errs[0].kind(), ErrorKind::InvalidPath);
    assert_eq!(errs[0].details(), "required path segment missing");
    assert_eq!(
        errs[0].to_string(),
        "Invalid Path (required path segment missing)"
    );
}

#[test]
fn finalizer_may_rewrite_array_edits() {
    let batch = vec![
        Patch::new("add", "/emails/-").with_value(json!("c@example.com")),
        Patch::new("remove", "/emails/0"),
    ];
    let out = process_patches(&batch, &Profile::new()).unwrap();
    assert_eq!(
        out,
        vec![Patch::new("replace", "/emails").with_value(json!(["b@example.com", "c@example.com"]))]
    );
}

#[test]
fn finalizer_errors_pass_through() {
    let batch = vec![Patch::new("remove", "/emails/7")];
    let err = process_patches(&batch, &Profile::new()).unwrap_err();
    assert_eq!(err, ProcessError::Rejected(vec![StoreError::IndexOutOfBounds(7)]));
    assert!(err.validation_errors().is_none());
}

#[test]
fn append_marker_cannot_be_removed_or_moved_from() {
    let batch = vec![
        Patch::new("remove", "/emails/-"),
        Patch::new("move", "/emails/0").with_from("/emails/-"),
        Patch::new("replace", "/emails/-").with_value(json!("x")),
    ];
    let err = process_patches(&batch, &Profile::new()).unwrap_err();
    let errs = err.validation_errors().unwrap();
    assert_eq!(errs.len(), 3);
    assert!(errs.iter().all(|e| e.kind() == ErrorKind::InvalidOperation));
}

#[test]
fn test_ops_reach_finalizer_only_when_forwarded() {
    let batch = vec![
        Patch::new("test", "/displayName").with_value(json!("Ada")),
        Patch::new("replace", "/displayName").with_value(json!("Grace")),
    ];
    let profile = Profile::new();

    let out = process_patches(&batch, &profile).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].op, "replace");

    let options = ProcessOptions {
        copy_test_policy: CopyTestPolicy::Forward,
    };
    let out = process_patches_with(&batch, &profile, &options).unwrap();
    let ops: Vec<&str> = out.iter().map(|p| p.op.as_str()).collect();
    assert_eq!(ops, vec!["replace", "test"]);
}

#[test]
fn decodes_wire_batch() {
    let wire = r#"[
        {"op": "replace", "path": "/displayName", "value": "Ada"},
        {"op": "copy", "path": "/emails/-", "from": "/emails/1"},
        {"op": "add", "path": "/settings/lang", "value": null}
    ]"#;
    let batch: Vec<Patch> = serde_json::from_str(wire).unwrap();
    let err = process_patches(&batch, &Profile::new()).unwrap_err();
    let errs = err.validation_errors().unwrap();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind(), ErrorKind::InvalidValue);
    assert_eq!(errs[0].details(), "value required for add");
}

#[test]
fn options_load_from_toml() {
    let options: ProcessOptions = toml::from_str(r#"copy_test_policy = "forward""#).unwrap();
    assert_eq!(options.copy_test_policy, CopyTestPolicy::Forward);

    let options: ProcessOptions = toml::from_str("").unwrap();
    assert_eq!(options, ProcessOptions::default());
}

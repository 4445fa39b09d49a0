//! Field model builder: raw request entries → validated [`FieldSpec`] list.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{GenerateError, NameScope};
use crate::field::{ChildFieldSpec, FieldSpec, RawField, SelectOption};
use crate::naming::check_identifier;
use crate::registry::{registry, TypeRule};
use crate::types::FieldKind;

/// Validate raw declarations and build the ordered field list.
///
/// Output order equals input order. The first violation found aborts:
/// names and kinds of every top-level entry are checked first, then
/// composite children in declaration order.
pub fn build_fields(raw: &[RawField]) -> Result<Vec<FieldSpec>, GenerateError> {
    if raw.is_empty() {
        return Err(GenerateError::clarify("no fields were supplied"));
    }

    let mut top_names: HashSet<&str> = HashSet::new();
    let mut resolved: Vec<&'static TypeRule> = Vec::with_capacity(raw.len());

    for entry in raw {
        check_identifier(&entry.name)?;
        let rule = registry().lookup(&entry.name, &entry.kind)?;
        if !top_names.insert(entry.name.as_str()) {
            return Err(GenerateError::DuplicateName {
                name: entry.name.clone(),
                scope: NameScope::TopLevel,
            });
        }
        resolved.push(rule);
    }

    let mut fields = Vec::with_capacity(raw.len());
    for (entry, rule) in raw.iter().zip(resolved) {
        check_label(entry)?;
        let options = leaf_options(entry, rule)?;
        let children = match (&entry.children, rule.is_composite()) {
            (Some(_), false) => return Err(unexpected(&entry.name, "children")),
            (None, true) => {
                return Err(GenerateError::clarify(format!(
                    "composite field '{}' does not say which child fields it holds",
                    entry.name
                )));
            }
            (Some(list), true) if list.is_empty() => {
                return Err(GenerateError::EmptyComposite {
                    field: entry.name.clone(),
                });
            }
            (Some(list), true) => build_children(&entry.name, list, &top_names)?,
            (None, false) => Vec::new(),
        };

        fields.push(FieldSpec {
            name: entry.name.clone(),
            label: entry.label.trim().to_string(),
            kind: rule.kind,
            required: entry.required,
            group: normalize_group(entry.group.as_deref()),
            options,
            children,
        });
    }

    debug!(
        fields = fields.len(),
        composites = fields.iter().filter(|f| f.kind == FieldKind::Multifield).count(),
        "built field model"
    );
    Ok(fields)
}

fn build_children(
    parent: &str,
    raw: &[RawField],
    top_names: &HashSet<&str>,
) -> Result<Vec<ChildFieldSpec>, GenerateError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut children = Vec::with_capacity(raw.len());

    for entry in raw {
        check_identifier(&entry.name)?;
        let rule = registry().lookup(&entry.name, &entry.kind)?;
        if entry.group.is_some() {
            return Err(unexpected(&entry.name, "group"));
        }
        if entry.children.is_some() && !rule.is_composite() {
            return Err(unexpected(&entry.name, "children"));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(GenerateError::DuplicateName {
                name: entry.name.clone(),
                scope: NameScope::Composite(parent.to_string()),
            });
        }
        if top_names.contains(entry.name.as_str()) {
            return Err(GenerateError::AmbiguousChildName {
                composite: parent.to_string(),
                child: entry.name.clone(),
            });
        }
        check_label(entry)?;

        // A nested composite is kept as-is; depth is the validator's call.
        children.push(ChildFieldSpec {
            name: entry.name.clone(),
            label: entry.label.trim().to_string(),
            kind: rule.kind,
            required: entry.required,
            options: leaf_options(entry, rule)?,
        });
    }

    Ok(children)
}

fn check_label(entry: &RawField) -> Result<(), GenerateError> {
    if entry.label.trim().is_empty() {
        return Err(GenerateError::clarify(format!(
            "field '{}' has no label",
            entry.name
        )));
    }
    Ok(())
}

fn leaf_options(entry: &RawField, rule: &TypeRule) -> Result<Vec<SelectOption>, GenerateError> {
    match (&entry.options, rule.kind == FieldKind::Select) {
        (Some(_), false) => Err(unexpected(&entry.name, "options")),
        (Some(options), true) if !options.is_empty() => Ok(options.clone()),
        (_, true) => Err(GenerateError::clarify(format!(
            "dropdown '{}' declares no options",
            entry.name
        ))),
        (None, false) => Ok(Vec::new()),
    }
}

fn normalize_group(group: Option<&str>) -> Option<String> {
    group
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
}

fn unexpected(field: &str, attribute: &str) -> GenerateError {
    GenerateError::UnexpectedAttribute {
        field: field.to_string(),
        attribute: attribute.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite(name: &str, children: Vec<RawField>) -> RawField {
        RawField::new(name, "Items", "multifield").with_children(children)
    }

    #[test]
    fn preserves_declaration_order() {
        let fields = build_fields(&[
            RawField::new("title", "Title", "text").required(),
            RawField::new("description", "Description", "textarea"),
            RawField::new("image", "Image", "Path Field").in_group("Media"),
        ])
        .unwrap();

        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["title", "description", "image"]);
        assert!(fields[0].required);
        assert_eq!(fields[1].kind, FieldKind::TextArea);
        assert_eq!(fields[2].kind, FieldKind::Path);
        assert_eq!(fields[2].group.as_deref(), Some("Media"));
    }

    #[test]
    fn missing_label_needs_clarification() {
        let entries: Vec<RawField> =
            serde_json::from_str(r#"[{"name": "title", "kind": "text"}]"#).unwrap();
        assert_eq!(entries[0].label, "");
        let err = build_fields(&entries).unwrap_err();
        assert!(err.is_clarification());
        assert_eq!(err.error_code(), "CLARIFICATION_NEEDED");
    }

    #[test]
    fn empty_request_needs_clarification() {
        let err = build_fields(&[]).unwrap_err();
        assert!(err.is_clarification());
    }

    #[test]
    fn unknown_kind_names_entry() {
        let err = build_fields(&[
            RawField::new("title", "Title", "text"),
            RawField::new("volume", "Volume", "slider"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnknownFieldKind {
                field: "volume".into(),
                kind: "slider".into()
            }
        );
    }

    #[test]
    fn duplicate_top_level_name() {
        let err = build_fields(&[
            RawField::new("title", "Title", "text"),
            RawField::new("title", "Other", "textarea"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::DuplicateName {
                name: "title".into(),
                scope: NameScope::TopLevel
            }
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        let fields = build_fields(&[
            RawField::new("title", "Title", "text"),
            RawField::new("Title", "Title 2", "text"),
        ])
        .unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn child_colliding_with_top_level_is_ambiguous() {
        let err = build_fields(&[
            RawField::new("text", "Text", "text"),
            composite("items", vec![RawField::new("text", "Text", "text")]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::AmbiguousChildName {
                composite: "items".into(),
                child: "text".into()
            }
        );
    }

    #[test]
    fn collision_is_detected_regardless_of_declaration_order() {
        let err = build_fields(&[
            composite("items", vec![RawField::new("text", "Text", "text")]),
            RawField::new("text", "Text", "text"),
        ])
        .unwrap_err();
        assert_eq!(err.error_code(), "AMBIGUOUS_CHILD_NAME");
    }

    #[test]
    fn distinct_child_names_are_accepted() {
        let fields = build_fields(&[
            RawField::new("text", "Text", "text"),
            composite(
                "items",
                vec![
                    RawField::new("itemText", "Text", "text"),
                    RawField::new("itemNumber", "Number", "number"),
                ],
            ),
        ])
        .unwrap();
        assert_eq!(fields[1].children.len(), 2);
        assert_eq!(fields[1].children[1].kind, FieldKind::Number);
    }

    #[test]
    fn child_scopes_are_independent() {
        let fields = build_fields(&[
            composite("cards", vec![RawField::new("heading", "Heading", "text")]),
            composite("links", vec![RawField::new("heading", "Heading", "text")]),
        ])
        .unwrap();
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn duplicate_child_name() {
        let err = build_fields(&[composite(
            "cards",
            vec![
                RawField::new("heading", "Heading", "text"),
                RawField::new("heading", "Heading", "textarea"),
            ],
        )])
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::DuplicateName {
                name: "heading".into(),
                scope: NameScope::Composite("cards".into())
            }
        );
    }

    #[test]
    fn empty_composite() {
        let err = build_fields(&[composite("cards", vec![])]).unwrap_err();
        assert_eq!(err, GenerateError::EmptyComposite { field: "cards".into() });
    }

    #[test]
    fn composite_without_children_needs_clarification() {
        let err = build_fields(&[RawField::new("cards", "Cards", "multifield")]).unwrap_err();
        assert!(err.is_clarification());
    }

    #[test]
    fn children_on_leaf_rejected() {
        let err = build_fields(&[RawField::new("title", "Title", "text")
            .with_children(vec![RawField::new("x", "X", "text")])])
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnexpectedAttribute {
                field: "title".into(),
                attribute: "children".into()
            }
        );
    }

    #[test]
    fn group_on_child_rejected() {
        let err = build_fields(&[composite(
            "cards",
            vec![RawField::new("heading", "Heading", "text").in_group("Other")],
        )])
        .unwrap_err();
        assert_eq!(err.error_code(), "UNEXPECTED_ATTRIBUTE");
    }

    #[test]
    fn nested_composite_survives_building() {
        let fields = build_fields(&[composite(
            "cards",
            vec![RawField::new("links", "Links", "multifield")
                .with_children(vec![RawField::new("url", "URL", "path")])],
        )])
        .unwrap();
        assert_eq!(fields[0].children[0].kind, FieldKind::Multifield);
    }

    #[test]
    fn select_requires_options() {
        let err = build_fields(&[RawField::new("size", "Size", "select")]).unwrap_err();
        assert!(err.is_clarification());

        let err = build_fields(&[
            RawField::new("size", "Size", "text").with_options(vec![SelectOption::new("s", "S")])
        ])
        .unwrap_err();
        assert_eq!(err.error_code(), "UNEXPECTED_ATTRIBUTE");
    }

    #[test]
    fn blank_label_needs_clarification() {
        let err = build_fields(&[RawField::new("title", "  ", "text")]).unwrap_err();
        assert!(err.is_clarification());
    }

    #[test]
    fn invalid_names() {
        let err = build_fields(&[RawField::new("page title", "Title", "text")]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_IDENTIFIER");
        let err = build_fields(&[RawField::new("default", "Default", "text")]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_IDENTIFIER");
    }

    #[test]
    fn blank_group_is_default() {
        let fields = build_fields(&[RawField::new("title", "Title", "text").in_group("   ")]).unwrap();
        assert_eq!(fields[0].group, None);
    }
}

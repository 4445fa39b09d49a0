//! Partition (tab) resolution.
//!
//! Tabs are derived from `FieldSpec::group`, ordered by first mention in the
//! field list. Fields without a group land in the default tab, which sits
//! wherever its first member appears.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::GenerateError;
use crate::field::FieldSpec;
use crate::naming::fold_node_name;

/// Node name of the implicit default tab.
pub const DEFAULT_PARTITION_NAME: &str = "properties";

/// Title of the implicit default tab.
pub const DEFAULT_PARTITION_TITLE: &str = "Properties";

/// One dialog tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Node identifier (e.g. `contentTab`).
    pub name: String,

    /// Display title (e.g. `Content Tab`).
    pub title: String,

    /// Indices into `GenerationIr::fields`, in field order.
    pub fields: Vec<usize>,
}

/// Group fields into ordered tabs.
///
/// `declared` is the caller's optional tab list; when non-empty it must
/// match the groups actually used, otherwise the request is ambiguous.
pub fn resolve_partitions(
    fields: &[FieldSpec],
    declared: &[String],
) -> Result<Vec<Partition>, GenerateError> {
    let mut partitions: Vec<Partition> = Vec::new();
    // Group display name (None = default) → partition index.
    let mut by_group: HashMap<Option<&str>, usize> = HashMap::new();
    // Node identifier → the group display name that claimed it.
    let mut claimed: HashMap<String, String> = HashMap::new();

    for (idx, field) in fields.iter().enumerate() {
        let group = field.group.as_deref();

        if let Some(&existing) = by_group.get(&group) {
            partitions[existing].fields.push(idx);
            continue;
        }

        let (name, title) = match group {
            None => (
                DEFAULT_PARTITION_NAME.to_string(),
                DEFAULT_PARTITION_TITLE.to_string(),
            ),
            Some(display) => {
                if !declared.is_empty() && !declared.iter().any(|d| d.trim() == display) {
                    return Err(GenerateError::clarify(format!(
                        "field '{}' is placed in tab '{display}', which is not among the declared tabs",
                        field.name
                    )));
                }
                (fold_node_name(display)?, display.to_string())
            }
        };

        if let Some(first) = claimed.get(&name) {
            return Err(GenerateError::DuplicatePartitionIdentifier {
                identifier: name,
                first: first.clone(),
                second: title,
            });
        }
        claimed.insert(name.clone(), title.clone());

        by_group.insert(group, partitions.len());
        partitions.push(Partition {
            name,
            title,
            fields: vec![idx],
        });
    }

    for tab in declared {
        let tab = tab.trim();
        if !partitions.iter().any(|p| p.title == tab) {
            return Err(GenerateError::clarify(format!(
                "tab '{tab}' was declared but no field is placed in it"
            )));
        }
    }

    debug!(
        tabs = partitions.len(),
        order = ?partitions.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        "resolved partitions"
    );
    Ok(partitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    fn field(name: &str, group: Option<&str>) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            label: name.into(),
            kind: FieldKind::Text,
            required: false,
            group: group.map(String::from),
            options: vec![],
            children: vec![],
        }
    }

    #[test]
    fn no_groups_yields_single_default_tab() {
        let parts = resolve_partitions(&[field("title", None), field("description", None)], &[])
            .unwrap();
        assert_eq!(
            parts,
            vec![Partition {
                name: "properties".into(),
                title: "Properties".into(),
                fields: vec![0, 1],
            }]
        );
    }

    #[test]
    fn first_seen_order_wins() {
        let parts = resolve_partitions(
            &[
                field("a", Some("Content Tab")),
                field("b", None),
                field("c", Some("Items")),
                field("d", Some("Content Tab")),
                field("e", None),
            ],
            &[],
        )
        .unwrap();

        let summary: Vec<_> = parts
            .iter()
            .map(|p| (p.name.as_str(), p.title.as_str(), p.fields.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("contentTab", "Content Tab", vec![0, 3]),
                ("properties", "Properties", vec![1, 4]),
                ("items", "Items", vec![2]),
            ]
        );
    }

    #[test]
    fn declared_order_does_not_affect_result() {
        let fields = [field("a", Some("Content")), field("b", Some("Items"))];
        let one = resolve_partitions(&fields, &["Content".into(), "Items".into()]).unwrap();
        let two = resolve_partitions(&fields, &["Items".into(), "Content".into()]).unwrap();
        assert_eq!(one, two);
        assert_eq!(one[0].name, "content");
    }

    #[test]
    fn folding_collision_is_rejected() {
        let err = resolve_partitions(
            &[field("a", Some("Content Tab")), field("b", Some("content  tab"))],
            &[],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GenerateError::DuplicatePartitionIdentifier {
                identifier: "contentTab".into(),
                first: "Content Tab".into(),
                second: "content  tab".into(),
            }
        );
    }

    #[test]
    fn explicit_group_clashing_with_default_is_rejected() {
        let err = resolve_partitions(&[field("a", None), field("b", Some("Properties"))], &[])
            .unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_PARTITION_IDENTIFIER");
    }

    #[test]
    fn unfoldable_group_is_invalid() {
        let err = resolve_partitions(&[field("a", Some("!!!"))], &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_IDENTIFIER");
        let err = resolve_partitions(&[field("a", Some("2nd Tab"))], &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_IDENTIFIER");
    }

    #[test]
    fn java_keywords_are_ordinary_tab_names() {
        let parts = resolve_partitions(&[field("a", Some("Default"))], &[]).unwrap();
        assert_eq!(
            parts,
            vec![Partition {
                name: "default".into(),
                title: "Default".into(),
                fields: vec![0],
            }]
        );

        for tab in ["New", "Import", "Record"] {
            let parts = resolve_partitions(&[field("a", Some(tab))], &[]).unwrap();
            assert_eq!(parts[0].name, tab.to_ascii_lowercase());
            assert_eq!(parts[0].title, tab);
        }
    }

    #[test]
    fn non_ascii_tab_name_is_invalid() {
        let err = resolve_partitions(&[field("a", Some("Über Uns"))], &[]).unwrap_err();
        assert_eq!(
            err,
            GenerateError::InvalidIdentifier {
                name: "Über Uns".into(),
                reason: "tab name contains the non-ASCII letter 'Ü'".into(),
            }
        );
    }

    #[test]
    fn unused_declared_tab_needs_clarification() {
        let err = resolve_partitions(&[field("a", Some("Content"))], &["Content".into(), "Empty".into()])
            .unwrap_err();
        assert!(err.is_clarification());
    }

    #[test]
    fn undeclared_group_needs_clarification() {
        let err = resolve_partitions(&[field("a", Some("Other"))], &["Content".into()]).unwrap_err();
        assert!(err.is_clarification());
    }
}

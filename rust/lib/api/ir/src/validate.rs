//! Consistency checks over a fully assembled [`GenerationIr`].
//!
//! Runs after tab resolution and before any emitter. Pure; the first
//! violation aborts generation so no partial artifact is ever produced.

use std::collections::HashSet;

use crate::error::{GenerateError, NameScope};
use crate::generation::GenerationIr;
use crate::naming::{container_member, getter, item_class};
use crate::registry::registry;

pub fn validate(ir: &GenerationIr) -> Result<(), GenerateError> {
    check_structure(ir)?;
    check_placement(ir)?;
    check_binding_names(ir)?;
    Ok(())
}

/// Composites hold at least one child and no child is itself composite.
fn check_structure(ir: &GenerationIr) -> Result<(), GenerateError> {
    for field in &ir.fields {
        let rule = registry().rule(field.kind);
        if !rule.is_composite() {
            if !field.children.is_empty() {
                return Err(GenerateError::UnexpectedAttribute {
                    field: field.name.clone(),
                    attribute: "children".into(),
                });
            }
            continue;
        }
        if field.children.is_empty() {
            return Err(GenerateError::EmptyComposite {
                field: field.name.clone(),
            });
        }
        if let Some(nested) = field
            .children
            .iter()
            .find(|c| registry().rule(c.kind).is_composite())
        {
            return Err(GenerateError::StructuralDepthExceeded {
                composite: field.name.clone(),
                child: nested.name.clone(),
            });
        }
    }
    Ok(())
}

/// Every top-level field sits in exactly one tab.
fn check_placement(ir: &GenerationIr) -> Result<(), GenerateError> {
    let mut seen = vec![0usize; ir.fields.len()];
    for partition in &ir.partitions {
        for &idx in &partition.fields {
            match seen.get_mut(idx) {
                Some(count) => *count += 1,
                None => {
                    return Err(GenerateError::Internal(format!(
                        "tab '{}' references field #{idx}, which does not exist",
                        partition.name
                    )));
                }
            }
        }
    }
    if let Some(idx) = seen.iter().position(|&count| count != 1) {
        return Err(GenerateError::MissingGetterTarget {
            field: ir.fields[idx].name.clone(),
        });
    }
    Ok(())
}

/// Members, accessors and inner classes of the Sling Model are unique.
///
/// Field names are unique by construction, but the model also gets derived
/// names (`<name>Resource`, `<Name>Item`) and accessors that only
/// capitalise the first letter, so `title` and `Title` would clash.
fn check_binding_names(ir: &GenerationIr) -> Result<(), GenerateError> {
    let mut members: HashSet<String> = HashSet::new();
    let mut accessors = inherited_accessors();
    let mut classes: HashSet<String> = HashSet::new();

    for field in &ir.fields {
        claim(&mut members, field.name.clone())?;
        claim(&mut accessors, getter(&field.name))?;
    }
    for field in ir.composites() {
        let container = container_member(&field.name);
        claim(&mut members, container.clone())?;
        claim(&mut accessors, getter(&container))?;
        claim(&mut classes, item_class(&field.name))?;

        let mut child_accessors = inherited_accessors();
        for child in &field.children {
            claim(&mut child_accessors, getter(&child.name))?;
        }
    }
    Ok(())
}

/// Accessors every generated class already has from `java.lang.Object`.
/// `getClass()` is final, so a field named `class` can never bind.
const OBJECT_ACCESSORS: &[&str] = &["getClass"];

fn inherited_accessors() -> HashSet<String> {
    OBJECT_ACCESSORS.iter().map(|a| a.to_string()).collect()
}

fn claim(set: &mut HashSet<String>, name: String) -> Result<(), GenerateError> {
    if set.insert(name.clone()) {
        Ok(())
    } else {
        Err(GenerateError::DuplicateName {
            name,
            scope: NameScope::Binding,
        })
    }
}

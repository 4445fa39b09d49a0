//! The generation IR: the frozen aggregate every emitter reads.

use serde::Serialize;
use tracing::debug;

use crate::builder::build_fields;
use crate::error::GenerateError;
use crate::field::{FieldSpec, GenerationRequest};
use crate::partition::{resolve_partitions, Partition};
use crate::registry::{registry, TypeRule};
use crate::validate::validate;

/// Validated fields plus their tab layout.
///
/// Built fresh per request and never mutated afterwards; emitters only take
/// `&GenerationIr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationIr {
    /// Top-level fields in declaration order.
    pub fields: Vec<FieldSpec>,

    /// Tabs in first-mention order.
    pub partitions: Vec<Partition>,
}

impl GenerationIr {
    /// Build, lay out and validate a request.
    pub fn from_request(request: &GenerationRequest) -> Result<Self, GenerateError> {
        let fields = build_fields(&request.fields)?;
        let partitions = resolve_partitions(&fields, &request.tabs)?;
        let ir = GenerationIr { fields, partitions };
        validate(&ir)?;
        debug!(fields = ir.fields.len(), tabs = ir.partitions.len(), "IR ready");
        Ok(ir)
    }

    /// Find a top-level field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields of one tab, in order.
    pub fn partition_fields<'a>(
        &'a self,
        partition: &'a Partition,
    ) -> impl Iterator<Item = &'a FieldSpec> + 'a {
        partition.fields.iter().filter_map(|&idx| self.fields.get(idx))
    }

    /// Top-level fields paired with their registry rule.
    pub fn fields_with_rules(&self) -> impl Iterator<Item = (&FieldSpec, &'static TypeRule)> {
        self.fields.iter().map(|f| (f, registry().rule(f.kind)))
    }

    /// Composite fields only.
    pub fn composites(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields
            .iter()
            .filter(|f| registry().rule(f.kind).is_composite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::RawField;
    use crate::types::FieldKind;

    #[test]
    fn end_to_end_example_layout() {
        let request = GenerationRequest {
            fields: vec![
                RawField::new("title", "Title", "text").required(),
                RawField::new("description", "Description", "textarea"),
            ],
            tabs: vec![],
        };
        let ir = GenerationIr::from_request(&request).unwrap();

        assert_eq!(ir.partitions.len(), 1);
        assert_eq!(ir.partitions[0].name, "properties");
        let names: Vec<_> = ir
            .partition_fields(&ir.partitions[0])
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["title", "description"]);
        assert_eq!(ir.field("description").map(|f| f.kind), Some(FieldKind::TextArea));
        assert_eq!(ir.composites().count(), 0);
    }

    #[test]
    fn validation_runs_before_ir_is_returned() {
        let request = GenerationRequest {
            fields: vec![RawField::new("cards", "Cards", "multifield").with_children(vec![
                RawField::new("links", "Links", "multifield")
                    .with_children(vec![RawField::new("url", "URL", "path")]),
            ])],
            tabs: vec![],
        };
        let err = GenerationIr::from_request(&request).unwrap_err();
        assert_eq!(
            err,
            GenerateError::StructuralDepthExceeded {
                composite: "cards".into(),
                child: "links".into()
            }
        );
    }
}

//! Field IR: raw request entries and the validated field tree.

use serde::{Deserialize, Serialize};

use crate::types::FieldKind;

// ── Request side ────────────────────────────────────────────────────

/// One field declaration as it arrives from the caller.
///
/// The same shape is used for composite children; the builder rejects
/// attributes that do not apply at the level they appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawField {
    /// Identifier (e.g. `pageTitle`).
    pub name: String,

    /// Author-facing label (e.g. `Page Title`). Missing reads as blank,
    /// which the builder turns into a clarification.
    #[serde(default)]
    pub label: String,

    /// Kind spelling, resolved through the registry (`text`, `Check Box`, ...).
    pub kind: String,

    #[serde(default)]
    pub required: bool,

    /// Tab this field is placed in. Absent = the default tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Dropdown options (select fields only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,

    /// Child fields (composite fields only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawField>>,
}

impl RawField {
    /// Shorthand for a leaf declaration.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_children(mut self, children: Vec<RawField>) -> Self {
        self.children = Some(children);
        self
    }
}

/// A complete generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Top-level fields in declaration order.
    pub fields: Vec<RawField>,

    /// Optional list of tabs the caller intends to use. When present, every
    /// field group must be listed and every listed tab must be used.
    /// Never affects tab order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tabs: Vec<String>,
}

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stored value.
    pub value: String,

    /// Display text.
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

// ── Validated side ──────────────────────────────────────────────────

/// A top-level field after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,

    /// Tab display name; `None` = the default tab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,

    /// Children, in declaration order. Non-empty iff `kind` is composite.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildFieldSpec>,
}

/// A child of a composite field. No group, no grandchildren.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildFieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

/// Read access shared by top-level and child fields, for emitters that
/// render both the same way.
pub trait FieldView {
    fn name(&self) -> &str;
    fn label(&self) -> &str;
    fn kind(&self) -> FieldKind;
    fn required(&self) -> bool;
    fn options(&self) -> &[SelectOption];
}

impl FieldView for FieldSpec {
    fn name(&self) -> &str {
        &self.name
    }
    fn label(&self) -> &str {
        &self.label
    }
    fn kind(&self) -> FieldKind {
        self.kind
    }
    fn required(&self) -> bool {
        self.required
    }
    fn options(&self) -> &[SelectOption] {
        &self.options
    }
}

impl FieldView for ChildFieldSpec {
    fn name(&self) -> &str {
        &self.name
    }
    fn label(&self) -> &str {
        &self.label
    }
    fn kind(&self) -> FieldKind {
        self.kind
    }
    fn required(&self) -> bool {
        self.required
    }
    fn options(&self) -> &[SelectOption] {
        &self.options
    }
}

//! Shared types used across all IR layers.

use serde::{Deserialize, Serialize};

/// Closed set of supported field kinds.
///
/// Adding a kind means one registry entry plus one arm per emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    TextArea,
    RichText,
    Number,
    Checkbox,
    Date,
    Color,
    Password,
    Email,
    Path,
    Select,
    Tags,
    /// Repeating group of child fields (Granite composite multifield).
    Multifield,
}

impl FieldKind {
    /// Every kind, in registry order.
    pub const ALL: [FieldKind; 13] = [
        FieldKind::Text,
        FieldKind::TextArea,
        FieldKind::RichText,
        FieldKind::Number,
        FieldKind::Checkbox,
        FieldKind::Date,
        FieldKind::Color,
        FieldKind::Password,
        FieldKind::Email,
        FieldKind::Path,
        FieldKind::Select,
        FieldKind::Tags,
        FieldKind::Multifield,
    ];
}

/// Structural category of a field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Single value.
    LeafScalar,
    /// Multi-valued property (e.g. tags).
    LeafArray,
    /// Repeating group with its own child fields.
    Composite,
}

/// Java type a leaf field binds to in the Sling Model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingType {
    String,
    Integer,
    Boolean,
    /// `java.util.Calendar`.
    Timestamp,
    /// `String[]`.
    StringArray,
}

impl BindingType {
    /// Java source spelling of the type.
    pub fn java_type(&self) -> &'static str {
        match self {
            BindingType::String => "String",
            BindingType::Integer => "Integer",
            BindingType::Boolean => "Boolean",
            BindingType::Timestamp => "Calendar",
            BindingType::StringArray => "String[]",
        }
    }

    /// Fully-qualified import the type needs, if any.
    pub fn java_import(&self) -> Option<&'static str> {
        match self {
            BindingType::Timestamp => Some("java.util.Calendar"),
            _ => None,
        }
    }
}

/// How the HTL template renders a leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRule {
    /// `${model.x}` with the default text context.
    Plain,
    /// `${model.x @ context='html'}`.
    Html,
    /// `${'<pattern>' @ format=model.x}`.
    DateFormat(&'static str),
    /// Iterate the array with `data-sly-list`.
    List,
}

//! Field-type registry.
//!
//! One static table maps every [`FieldKind`] to its structural category and
//! the per-target rules the emitters read. The table is built once on first
//! use and never mutated, so concurrent requests read it without locking.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::GenerateError;
use crate::types::{BindingType, Category, FieldKind, TemplateRule};

/// Resource type of plain Granite layout containers.
pub const CONTAINER_RESOURCE_TYPE: &str = "granite/ui/components/coral/foundation/container";

/// Everything the emitters need to know about one field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRule {
    pub kind: FieldKind,

    /// Canonical spelling used in requests.
    pub name: &'static str,

    /// Other accepted spellings, including the original catalog labels.
    pub aliases: &'static [&'static str],

    pub category: Category,

    /// Sling Model property type. `None` for composites, which bind to a
    /// child resource instead.
    pub binding: Option<BindingType>,

    /// Granite `sling:resourceType` of the dialog node.
    pub resource_type: &'static str,

    /// Dialog attribute carrying the label (`text` for checkboxes).
    pub label_attr: &'static str,

    /// Extra dialog attributes, emitted verbatim in this order.
    pub defaults: &'static [(&'static str, &'static str)],

    /// HTL rendering of the bound value.
    pub template: TemplateRule,
}

impl TypeRule {
    pub fn is_composite(&self) -> bool {
        self.category == Category::Composite
    }
}

// ── Table ───────────────────────────────────────────────────────────

// Indexed by `FieldKind as usize`; order must match the enum.
static RULES: [TypeRule; 13] = [
    TypeRule {
        kind: FieldKind::Text,
        name: "text",
        aliases: &["textfield", "text field"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "granite/ui/components/coral/foundation/form/textfield",
        label_attr: "fieldLabel",
        defaults: &[],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::TextArea,
        name: "textarea",
        aliases: &["text-area", "text area"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "granite/ui/components/coral/foundation/form/textarea",
        label_attr: "fieldLabel",
        defaults: &[],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::RichText,
        name: "richtext",
        aliases: &["rich-text", "rte", "rte text field"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "cq/gui/components/authoring/dialog/richtext",
        label_attr: "fieldLabel",
        defaults: &[("useFixedInlineToolbar", "{Boolean}true")],
        template: TemplateRule::Html,
    },
    TypeRule {
        kind: FieldKind::Number,
        name: "number",
        aliases: &["numberfield", "number field"],
        category: Category::LeafScalar,
        binding: Some(BindingType::Integer),
        resource_type: "granite/ui/components/coral/foundation/form/numberfield",
        label_attr: "fieldLabel",
        defaults: &[],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::Checkbox,
        name: "checkbox",
        aliases: &["boolean", "check box"],
        category: Category::LeafScalar,
        binding: Some(BindingType::Boolean),
        resource_type: "granite/ui/components/coral/foundation/form/checkbox",
        label_attr: "text",
        defaults: &[
            ("value", "{Boolean}true"),
            ("uncheckedValue", "{Boolean}false"),
        ],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::Date,
        name: "date",
        aliases: &["datepicker", "date picker"],
        category: Category::LeafScalar,
        binding: Some(BindingType::Timestamp),
        resource_type: "granite/ui/components/coral/foundation/form/datepicker",
        label_attr: "fieldLabel",
        defaults: &[
            ("type", "date"),
            ("displayedFormat", "YYYY-MM-DD"),
            ("valueFormat", "YYYY-MM-DD"),
        ],
        template: TemplateRule::DateFormat("yyyy-MM-dd"),
    },
    TypeRule {
        kind: FieldKind::Color,
        name: "color",
        aliases: &["colorfield", "color field"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "granite/ui/components/coral/foundation/form/colorfield",
        label_attr: "fieldLabel",
        defaults: &[],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::Password,
        name: "password",
        aliases: &["password field"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "granite/ui/components/coral/foundation/form/password",
        label_attr: "fieldLabel",
        defaults: &[],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::Email,
        name: "email",
        aliases: &["email field"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "granite/ui/components/coral/foundation/form/textfield",
        label_attr: "fieldLabel",
        defaults: &[("maxlength", "{Long}254"), ("validation", "email")],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::Path,
        name: "path",
        aliases: &["pathfield", "path field"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "granite/ui/components/coral/foundation/form/pathfield",
        label_attr: "fieldLabel",
        defaults: &[("rootPath", "/content")],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::Select,
        name: "select",
        aliases: &["dropdown", "drop down field (select)"],
        category: Category::LeafScalar,
        binding: Some(BindingType::String),
        resource_type: "granite/ui/components/coral/foundation/form/select",
        label_attr: "fieldLabel",
        defaults: &[],
        template: TemplateRule::Plain,
    },
    TypeRule {
        kind: FieldKind::Tags,
        name: "tags",
        aliases: &["tag-list", "tagfield", "tags picker"],
        category: Category::LeafArray,
        binding: Some(BindingType::StringArray),
        resource_type: "cq/gui/components/coral/common/form/tagfield",
        label_attr: "fieldLabel",
        defaults: &[("multiple", "{Boolean}true")],
        template: TemplateRule::List,
    },
    TypeRule {
        kind: FieldKind::Multifield,
        name: "multifield",
        aliases: &["repeating-group", "composite"],
        category: Category::Composite,
        binding: None,
        resource_type: "granite/ui/components/coral/foundation/form/multifield",
        label_attr: "fieldLabel",
        defaults: &[("composite", "{Boolean}true")],
        template: TemplateRule::List,
    },
];

// ── Registry ────────────────────────────────────────────────────────

/// Read-only handle over the rule table with spelling lookup.
#[derive(Debug)]
pub struct Registry {
    rules: &'static [TypeRule],
    by_spelling: HashMap<String, usize>,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry::new(&RULES));

/// The process-wide registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

impl Registry {
    fn new(rules: &'static [TypeRule]) -> Self {
        let mut by_spelling = HashMap::new();
        for (idx, rule) in rules.iter().enumerate() {
            by_spelling.insert(normalize(rule.name), idx);
            for alias in rule.aliases {
                by_spelling.insert(normalize(alias), idx);
            }
        }
        Self { rules, by_spelling }
    }

    /// Resolve a request spelling (`"text"`, `"Check Box"`, ...) to its rule.
    ///
    /// `field` names the entry being resolved, for the error.
    pub fn lookup(&self, field: &str, kind: &str) -> Result<&'static TypeRule, GenerateError> {
        let rules: &'static [TypeRule] = self.rules;
        self.by_spelling
            .get(&normalize(kind))
            .map(|&idx| &rules[idx])
            .ok_or_else(|| GenerateError::UnknownFieldKind {
                field: field.to_string(),
                kind: kind.to_string(),
            })
    }

    /// Rule for a kind that is already resolved. Total over [`FieldKind`].
    pub fn rule(&self, kind: FieldKind) -> &'static TypeRule {
        let rules: &'static [TypeRule] = self.rules;
        &rules[kind as usize]
    }

    /// All rules in table order.
    pub fn rules(&self) -> &'static [TypeRule] {
        self.rules
    }
}

fn normalize(spelling: &str) -> String {
    spelling.trim().to_ascii_lowercase()
}

//! Component-level settings shared by all three emitters.
//!
//! Loaded from `aemgen.toml` by the CLI; every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use aemgen_ir::naming::{check_identifier, check_package, to_kebab_case, to_title, to_upper_camel_case};
use aemgen_ir::GenerateError;

/// Default Java package for generated models.
pub const DEFAULT_PACKAGE: &str = "com.example.core.models";

/// Simple type names the model source refers to, through imports or
/// `java.lang`. A class with one of these names would shadow it.
const MODEL_TYPE_NAMES: &[&str] = &[
    "ArrayList",
    "Boolean",
    "Calendar",
    "ChildResource",
    "DefaultInjectionStrategy",
    "Integer",
    "List",
    "Model",
    "Object",
    "PostConstruct",
    "Resource",
    "String",
    "ValueMap",
    "ValueMapValue",
];

/// Settings that name the component rather than its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ComponentConfig {
    /// Component node name (e.g. `hero-banner`). Drives the HTL file name,
    /// the CSS block and the default class name.
    pub name: String,

    /// Dialog title. Defaults to the title-cased name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Java package of the Sling Model.
    pub package: String,

    /// Sling Model class name. Defaults to `<Name>Model`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// `resourceType` added to `@Model`, if set (e.g. `mysite/components/hero`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        Self {
            name: "component".to_string(),
            title: None,
            package: DEFAULT_PACKAGE.to_string(),
            class_name: None,
            resource_type: None,
        }
    }
}

impl ComponentConfig {
    /// Config with the given component name and defaults elsewhere.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load config from disk, or return default if the file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ComponentConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject names that cannot appear in the generated sources.
    pub fn validate(&self) -> Result<(), GenerateError> {
        let valid_name = self
            .name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_name {
            return Err(GenerateError::InvalidIdentifier {
                name: self.name.clone(),
                reason: "component name must be letters, digits, '-' or '_'".into(),
            });
        }
        check_package(&self.package)?;
        let class_name = self.class_name();
        check_identifier(&class_name)?;
        if MODEL_TYPE_NAMES.contains(&class_name.as_str()) {
            return Err(GenerateError::InvalidIdentifier {
                name: class_name,
                reason: "clashes with a type the model refers to".into(),
            });
        }
        Ok(())
    }

    pub fn title(&self) -> String {
        self.title.clone().unwrap_or_else(|| to_title(&self.name))
    }

    pub fn class_name(&self) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| format!("{}Model", to_upper_camel_case(&self.name)))
    }

    /// `package.ClassName`, as referenced by `data-sly-use`.
    pub fn qualified_class(&self) -> String {
        format!("{}.{}", self.package, self.class_name())
    }

    /// BEM block used for template CSS classes (`cmp-hero-banner`).
    pub fn css_block(&self) -> String {
        format!("cmp-{}", to_kebab_case(&self.name))
    }

    /// File name of the HTL script (`hero-banner.html`).
    pub fn template_file(&self) -> String {
        format!("{}.html", self.name)
    }

    /// Source path of the Sling Model (`com/example/core/models/HeroModel.java`).
    pub fn class_file(&self) -> String {
        format!("{}/{}.java", self.package.replace('.', "/"), self.class_name())
    }
}

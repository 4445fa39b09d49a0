//! Codegen Library - AEM component generation from a field list
//!
//! Turns a `GenerationRequest` into three artifacts: the authoring dialog,
//! the Sling Model and the HTL template.

pub mod config;
pub mod dialog;
pub mod htl;
pub mod pipeline;
pub mod sling_model;

use serde::{Deserialize, Serialize};

pub use aemgen_ir as ir;
pub use aemgen_ir::{GenerateError, GenerationIr, GenerationRequest};
pub use config::ComponentConfig;
pub use dialog::DialogGenerator;
pub use htl::HtlGenerator;
pub use pipeline::{generate, generate_parallel, prepare, Outcome};
pub use sling_model::SlingModelGenerator;

/// Codegen trait - implement this for each target artifact
pub trait Codegen {
    fn generate(
        &self,
        ir: &GenerationIr,
        component: &ComponentConfig,
    ) -> Result<GeneratedFile, GenerateError>;
    fn target(&self) -> &str;
}

/// One generated file, path relative to the component folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// The three artifacts for one component. Always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedComponent {
    /// `_cq_dialog/.content.xml`
    pub ui_config: GeneratedFile,
    /// The Sling Model source.
    pub binding_class: GeneratedFile,
    /// The HTL script.
    pub template: GeneratedFile,
}

impl GeneratedComponent {
    pub fn files(&self) -> [&GeneratedFile; 3] {
        [&self.ui_config, &self.binding_class, &self.template]
    }
}

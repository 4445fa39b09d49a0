//! Request loading and file output for the CLI.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use aemgen_codegen_lib::{GeneratedComponent, GenerationRequest};

/// Read and parse a request JSON file.
pub fn load_request(path: &Path) -> anyhow::Result<GenerationRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let request: GenerationRequest = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid request", path.display()))?;
    debug!(fields = request.fields.len(), tabs = request.tabs.len(), "request loaded");
    Ok(request)
}

/// Write all three files under `dir`, creating folders as needed.
///
/// Nothing is written unless generation succeeded, so a failed request
/// never leaves a half-written component behind.
pub fn write_component(dir: &Path, generated: &GeneratedComponent) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for file in generated.files() {
        let path = dir.join(&file.path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

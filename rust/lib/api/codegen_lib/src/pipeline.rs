//! Request → IR → artifacts.
//!
//! Validation is fail-fast: the first error aborts and no file is produced.

use std::thread::ScopedJoinHandle;

use tracing::{debug, info, warn};

use aemgen_ir::naming::item_class;
use aemgen_ir::{GenerateError, GenerationIr, GenerationRequest, NameScope};

use crate::{
    Codegen, ComponentConfig, DialogGenerator, GeneratedComponent, GeneratedFile, HtlGenerator,
    SlingModelGenerator,
};

/// Result of one generation request. Never carries partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(GeneratedComponent),
    /// The request violates a structural rule.
    StructuralError(GenerateError),
    /// The request is well-formed but underspecified; holds the question.
    NeedsClarification(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Stable code of the failure, if any.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::StructuralError(e) => Some(e.error_code()),
            Outcome::NeedsClarification(_) => {
                Some(aemgen_ir::error_code::CLARIFICATION_NEEDED)
            }
        }
    }
}

impl From<Result<GeneratedComponent, GenerateError>> for Outcome {
    fn from(result: Result<GeneratedComponent, GenerateError>) -> Self {
        match result {
            Ok(component) => Outcome::Success(component),
            Err(GenerateError::ClarificationNeeded(question)) => {
                warn!(%question, "request needs clarification");
                Outcome::NeedsClarification(question)
            }
            Err(e) => {
                debug!(code = e.error_code(), error = %e, "generation rejected");
                Outcome::StructuralError(e)
            }
        }
    }
}

/// Validate the component settings and build the IR.
pub fn prepare(
    request: &GenerationRequest,
    component: &ComponentConfig,
) -> Result<GenerationIr, GenerateError> {
    component.validate()?;
    let ir = GenerationIr::from_request(request)?;

    // The model class shares a namespace with its inner item classes.
    let class_name = component.class_name();
    if ir.composites().any(|c| item_class(&c.name) == class_name) {
        return Err(GenerateError::DuplicateName {
            name: class_name,
            scope: NameScope::Binding,
        });
    }
    Ok(ir)
}

/// Run the three emitters one after another.
pub fn generate(request: &GenerationRequest, component: &ComponentConfig) -> Outcome {
    prepare(request, component)
        .and_then(|ir| emit(&ir, component))
        .into()
}

/// Same as [`generate`], with the emitters on scoped threads. Output is
/// byte-identical, including which error wins when several emitters fail.
pub fn generate_parallel(request: &GenerationRequest, component: &ComponentConfig) -> Outcome {
    prepare(request, component)
        .and_then(|ir| emit_parallel(&ir, component))
        .into()
}

fn emit(ir: &GenerationIr, component: &ComponentConfig) -> Result<GeneratedComponent, GenerateError> {
    let generated = GeneratedComponent {
        ui_config: run(&DialogGenerator, ir, component)?,
        binding_class: run(&SlingModelGenerator, ir, component)?,
        template: run(&HtlGenerator, ir, component)?,
    };
    info!(component = %component.name, fields = ir.fields.len(), "component generated");
    Ok(generated)
}

fn emit_parallel(
    ir: &GenerationIr,
    component: &ComponentConfig,
) -> Result<GeneratedComponent, GenerateError> {
    let generated = std::thread::scope(|scope| {
        let ui_config = scope.spawn(|| run(&DialogGenerator, ir, component));
        let binding_class = scope.spawn(|| run(&SlingModelGenerator, ir, component));
        let template = run(&HtlGenerator, ir, component);
        Ok::<_, GenerateError>(GeneratedComponent {
            ui_config: joined(ui_config)?,
            binding_class: joined(binding_class)?,
            template: template?,
        })
    })?;
    info!(component = %component.name, fields = ir.fields.len(), "component generated (parallel)");
    Ok(generated)
}

fn run(
    generator: &dyn Codegen,
    ir: &GenerationIr,
    component: &ComponentConfig,
) -> Result<GeneratedFile, GenerateError> {
    let file = generator.generate(ir, component)?;
    debug!(target_kind = generator.target(), path = %file.path, bytes = file.content.len(), "emitted");
    Ok(file)
}

fn joined(
    handle: ScopedJoinHandle<'_, Result<GeneratedFile, GenerateError>>,
) -> Result<GeneratedFile, GenerateError> {
    handle
        .join()
        .map_err(|_| GenerateError::Internal("emitter thread panicked".into()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use aemgen_ir::RawField;

    fn request(fields: Vec<RawField>) -> GenerationRequest {
        GenerationRequest {
            fields,
            tabs: vec![],
        }
    }

    #[test]
    fn success_carries_all_three_files() {
        let outcome = generate(
            &request(vec![RawField::new("title", "Title", "text")]),
            &ComponentConfig::named("hero"),
        );
        let generated = match outcome {
            Outcome::Success(generated) => generated,
            other => panic!("expected success, got {other:?}"),
        };
        let paths: Vec<_> = generated.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "_cq_dialog/.content.xml",
                "com/example/core/models/HeroModel.java",
                "hero.html"
            ]
        );
    }

    #[test]
    fn clarification_is_its_own_outcome() {
        let outcome = generate(&request(vec![]), &ComponentConfig::default());
        assert!(matches!(outcome, Outcome::NeedsClarification(_)));
        assert_eq!(outcome.error_code(), Some("CLARIFICATION_NEEDED"));
    }

    #[test]
    fn structural_error_outcome() {
        let outcome = generate(
            &request(vec![
                RawField::new("title", "Title", "text"),
                RawField::new("title", "Again", "text"),
            ]),
            &ComponentConfig::default(),
        );
        assert_eq!(outcome.error_code(), Some("DUPLICATE_NAME"));
        assert!(!outcome.is_success());
    }

    #[test]
    fn model_class_clashing_with_item_class() {
        let component = ComponentConfig {
            class_name: Some("CardsItem".into()),
            ..ComponentConfig::default()
        };
        let outcome = generate(
            &request(vec![RawField::new("cards", "Cards", "multifield")
                .with_children(vec![RawField::new("heading", "Heading", "text")])]),
            &component,
        );
        assert_eq!(
            outcome,
            Outcome::StructuralError(GenerateError::DuplicateName {
                name: "CardsItem".into(),
                scope: NameScope::Binding,
            })
        );
    }

    #[test]
    fn invalid_component_config_is_rejected() {
        let component = ComponentConfig {
            class_name: Some("class".into()),
            ..ComponentConfig::default()
        };
        let outcome = generate(&request(vec![RawField::new("a", "A", "text")]), &component);
        assert_eq!(outcome.error_code(), Some("INVALID_IDENTIFIER"));
    }
}

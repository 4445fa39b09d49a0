/// HTL template generator
///
/// One data-binding expression per leaf field, read through the Sling
/// Model (`${model.<name>}`); composite children are only reachable
/// through the iteration variable (`${item.<name>}`).

use aemgen_ir::*;

use crate::config::ComponentConfig;

/// Model variable bound by `data-sly-use`.
const MODEL_VAR: &str = "model";

/// Iteration variable for lists and composites.
const ITEM_VAR: &str = "item";

pub struct HtlGenerator;

impl crate::Codegen for HtlGenerator {
    fn generate(
        &self,
        ir: &GenerationIr,
        component: &ComponentConfig,
    ) -> Result<crate::GeneratedFile, GenerateError> {
        let block = component.css_block();
        let mut output = String::new();

        output.push_str(&format!(
            "<div data-sly-use.{MODEL_VAR}=\"{}\" class=\"{block}\">\n",
            component.qualified_class()
        ));

        for (field, rule) in ir.fields_with_rules() {
            if rule.is_composite() {
                output.push_str(&generate_composite(field, &block)?);
            } else {
                output.push_str(&generate_leaf(
                    &field.name,
                    rule,
                    MODEL_VAR,
                    &format!("{block}__{}", field.name),
                    "    ",
                ));
            }
        }

        output.push_str("</div>\n");

        Ok(crate::GeneratedFile {
            path: component.template_file(),
            content: output,
        })
    }

    fn target(&self) -> &str {
        "htl"
    }
}

/// Render one leaf value read from `scope` (`model` or `item`).
fn generate_leaf(name: &str, rule: &TypeRule, scope: &str, class: &str, indent: &str) -> String {
    let path = format!("{scope}.{name}");
    match rule.template {
        TemplateRule::Plain => {
            format!("{indent}<div class=\"{class}\">${{{path}}}</div>\n")
        }
        TemplateRule::Html => {
            format!("{indent}<div class=\"{class}\">${{{path} @ context='html'}}</div>\n")
        }
        TemplateRule::DateFormat(pattern) => {
            format!("{indent}<time class=\"{class}\">${{'{pattern}' @ format={path}}}</time>\n")
        }
        TemplateRule::List => {
            // Nested lists would shadow the outer `item`; a tag list inside
            // a composite entry is joined instead.
            if scope == ITEM_VAR {
                return format!(
                    "{indent}<div class=\"{class}\">${{{path} @ join=', '}}</div>\n"
                );
            }
            let mut output = String::new();
            output.push_str(&format!(
                "{indent}<ul class=\"{class}\" data-sly-list.{ITEM_VAR}=\"${{{path}}}\">\n"
            ));
            output.push_str(&format!(
                "{indent}    <li class=\"{class}-{}\">${{{ITEM_VAR}}}</li>\n",
                singular(name)
            ));
            output.push_str(&format!("{indent}</ul>\n"));
            output
        }
    }
}

fn generate_composite(field: &FieldSpec, block: &str) -> Result<String, GenerateError> {
    if field.children.is_empty() {
        return Err(GenerateError::EmptyComposite {
            field: field.name.clone(),
        });
    }

    let class = format!("{block}__{}", field.name);
    let mut output = String::new();
    output.push_str(&format!(
        "    <ul class=\"{class}\" data-sly-list.{ITEM_VAR}=\"${{{MODEL_VAR}.{}}}\">\n",
        field.name
    ));
    output.push_str(&format!("        <li class=\"{class}-item\">\n"));
    for child in &field.children {
        let rule = registry().rule(child.kind);
        if rule.is_composite() {
            return Err(GenerateError::StructuralDepthExceeded {
                composite: field.name.clone(),
                child: child.name.clone(),
            });
        }
        output.push_str(&generate_leaf(
            &child.name,
            rule,
            ITEM_VAR,
            &format!("{class}-{}", child.name),
            "            ",
        ));
    }
    output.push_str("        </li>\n");
    output.push_str("    </ul>\n");
    Ok(output)
}

/// `tags` → `tag`, for the `<li>` modifier class. Leaves other names alone.
fn singular(name: &str) -> &str {
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem,
        _ => name,
    }
}

/// Sling Model generator (the Java data-binding class)

use std::collections::BTreeSet;

use aemgen_ir::naming::{capitalize, container_member, getter, item_class};
use aemgen_ir::*;

use crate::config::ComponentConfig;

pub struct SlingModelGenerator;

impl crate::Codegen for SlingModelGenerator {
    fn generate(
        &self,
        ir: &GenerationIr,
        component: &ComponentConfig,
    ) -> Result<crate::GeneratedFile, GenerateError> {
        let members = collect_members(ir)?;
        let class_name = component.class_name();
        let mut output = String::new();

        output.push_str(&format!("package {};\n\n", component.package));
        for import in imports(&members) {
            output.push_str(&format!("import {import};\n"));
        }
        output.push('\n');

        output.push_str("@Model(\n");
        output.push_str("        adaptables = Resource.class,\n");
        if let Some(resource_type) = &component.resource_type {
            output.push_str(&format!(
                "        resourceType = \"{}\",\n",
                escape_java(resource_type)
            ));
        }
        output.push_str("        defaultInjectionStrategy = DefaultInjectionStrategy.OPTIONAL)\n");
        output.push_str(&format!("public class {class_name} {{\n"));

        // Fields
        for member in &members {
            output.push('\n');
            match member {
                Member::Property { name, binding } => {
                    output.push_str("    @ValueMapValue\n");
                    output.push_str(&format!("    private {} {name};\n", binding.java_type()));
                }
                Member::Collection { name, .. } => {
                    let item = item_class(name);
                    output.push_str(&format!("    @ChildResource(name = \"{name}\")\n"));
                    output.push_str(&format!(
                        "    private Resource {};\n\n",
                        container_member(name)
                    ));
                    output.push_str(&format!(
                        "    private final List<{item}> {name} = new ArrayList<>();\n"
                    ));
                }
            }
        }

        // Post-construct: decode every composite's entries
        let collections: Vec<&str> = members
            .iter()
            .filter_map(|m| match m {
                Member::Collection { name, .. } => Some(name.as_str()),
                Member::Property { .. } => None,
            })
            .collect();
        if !collections.is_empty() {
            output.push_str("\n    @PostConstruct\n");
            output.push_str("    protected void init() {\n");
            for (i, name) in collections.iter().enumerate() {
                if i > 0 {
                    output.push('\n');
                }
                let container = container_member(name);
                output.push_str(&format!("        if (this.{container} != null) {{\n"));
                output.push_str(&format!(
                    "            for (Resource entry : this.{container}.getChildren()) {{\n"
                ));
                output.push_str(&format!(
                    "                this.{name}.add(new {}(entry.getValueMap()));\n",
                    item_class(name)
                ));
                output.push_str("            }\n");
                output.push_str("        }\n");
            }
            output.push_str("    }\n");
        }

        // Getters
        for member in &members {
            match member {
                Member::Property { name, binding } => {
                    push_getter(&mut output, binding.java_type(), name);
                }
                Member::Collection { name, .. } => {
                    push_getter(&mut output, "Resource", &container_member(name));
                    push_getter(&mut output, &format!("List<{}>", item_class(name)), name);
                }
            }
        }

        // Item classes
        for member in &members {
            if let Member::Collection { name, children } = member {
                push_item_class(&mut output, &item_class(name), children);
            }
        }

        output.push_str("}\n");

        Ok(crate::GeneratedFile {
            path: component.class_file(),
            content: output,
        })
    }

    fn target(&self) -> &str {
        "sling-model"
    }
}

// ── Members ─────────────────────────────────────────────────────────

/// One top-level entry of the model, in field order.
enum Member {
    /// A leaf field bound straight from the resource's value map.
    Property { name: String, binding: BindingType },
    /// A composite: raw child resource plus decoded item list.
    Collection {
        name: String,
        children: Vec<(String, BindingType)>,
    },
}

fn collect_members(ir: &GenerationIr) -> Result<Vec<Member>, GenerateError> {
    ir.fields_with_rules()
        .map(|(field, rule)| {
            if !rule.is_composite() {
                return Ok(Member::Property {
                    name: field.name.clone(),
                    binding: binding_of(&field.name, rule)?,
                });
            }
            if field.children.is_empty() {
                return Err(GenerateError::EmptyComposite {
                    field: field.name.clone(),
                });
            }
            let children = field
                .children
                .iter()
                .map(|child| {
                    let rule = registry().rule(child.kind);
                    if rule.is_composite() {
                        return Err(GenerateError::StructuralDepthExceeded {
                            composite: field.name.clone(),
                            child: child.name.clone(),
                        });
                    }
                    Ok((child.name.clone(), binding_of(&child.name, rule)?))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Member::Collection {
                name: field.name.clone(),
                children,
            })
        })
        .collect()
}

fn binding_of(field: &str, rule: &TypeRule) -> Result<BindingType, GenerateError> {
    rule.binding.ok_or_else(|| {
        GenerateError::Internal(format!(
            "kind '{}' of field '{field}' has no binding type",
            rule.name
        ))
    })
}

/// Imports actually referenced by the class body, sorted.
fn imports(members: &[Member]) -> BTreeSet<&'static str> {
    let mut imports = BTreeSet::from([
        "org.apache.sling.api.resource.Resource",
        "org.apache.sling.models.annotations.DefaultInjectionStrategy",
        "org.apache.sling.models.annotations.Model",
    ]);
    for member in members {
        match member {
            Member::Property { binding, .. } => {
                imports.insert("org.apache.sling.models.annotations.injectorspecific.ValueMapValue");
                imports.extend(binding.java_import());
            }
            Member::Collection { children, .. } => {
                imports.extend([
                    "java.util.ArrayList",
                    "java.util.List",
                    "javax.annotation.PostConstruct",
                    "org.apache.sling.api.resource.ValueMap",
                    "org.apache.sling.models.annotations.injectorspecific.ChildResource",
                ]);
                imports.extend(children.iter().filter_map(|(_, b)| b.java_import()));
            }
        }
    }
    imports
}

// ── Rendering helpers ───────────────────────────────────────────────

fn push_getter(output: &mut String, ty: &str, member: &str) {
    output.push_str(&format!("\n    public {ty} {}() {{\n", getter(member)));
    output.push_str(&format!("        return {member};\n"));
    output.push_str("    }\n");
}

fn push_item_class(output: &mut String, class: &str, children: &[(String, BindingType)]) {
    output.push_str(&format!("\n    public static class {class} {{\n"));
    for (name, binding) in children {
        output.push_str(&format!("\n        private final {} {name};\n", binding.java_type()));
    }

    output.push_str(&format!("\n        {class}(ValueMap properties) {{\n"));
    for (name, binding) in children {
        output.push_str(&format!(
            "            this.{name} = properties.get(\"{name}\", {}.class);\n",
            binding.java_type()
        ));
    }
    output.push_str("        }\n");

    for (name, binding) in children {
        output.push_str(&format!(
            "\n        public {} get{}() {{\n",
            binding.java_type(),
            capitalize(name)
        ));
        output.push_str(&format!("            return {name};\n"));
        output.push_str("        }\n");
    }
    output.push_str("    }\n");
}

fn escape_java(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Authoring dialog generator (Granite UI `_cq_dialog/.content.xml`)

use aemgen_ir::*;

use crate::config::ComponentConfig;

/// Path of the dialog inside the component folder.
pub const DIALOG_PATH: &str = "_cq_dialog/.content.xml";

const DIALOG_RESOURCE_TYPE: &str = "cq/gui/components/authoring/dialog";
const TABS_RESOURCE_TYPE: &str = "granite/ui/components/coral/foundation/tabs";
const COLUMNS_RESOURCE_TYPE: &str = "granite/ui/components/coral/foundation/fixedcolumns";

const NAMESPACES: &str = concat!(
    r#"xmlns:sling="http://sling.apache.org/jcr/sling/1.0" "#,
    r#"xmlns:granite="http://www.adobe.com/jcr/granite/1.0" "#,
    r#"xmlns:cq="http://www.day.com/jcr/cq/1.0" "#,
    r#"xmlns:jcr="http://www.jcp.org/jcr/1.0" "#,
    r#"xmlns:nt="http://www.jcp.org/jcr/nt/1.0""#,
);

pub struct DialogGenerator;

impl crate::Codegen for DialogGenerator {
    fn generate(
        &self,
        ir: &GenerationIr,
        component: &ComponentConfig,
    ) -> Result<crate::GeneratedFile, GenerateError> {
        let mut xml = XmlWriter::default();

        xml.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.line(&format!("<jcr:root {NAMESPACES}"));
        xml.attrs(
            &[
                ("jcr:primaryType", "nt:unstructured".into()),
                ("jcr:title", escape_value(&component.title())),
                ("sling:resourceType", DIALOG_RESOURCE_TYPE.into()),
            ],
            ">",
        );
        xml.depth += 1;

        xml.open("content", &[container()]);
        xml.open_items();
        xml.open(
            "tabs",
            &[
                ("sling:resourceType", TABS_RESOURCE_TYPE.into()),
                ("maximized", "{Boolean}true".into()),
            ],
        );
        xml.open_items();
        for partition in &ir.partitions {
            write_partition(&mut xml, ir, partition)?;
        }
        xml.close("items");
        xml.close("tabs");
        xml.close("items");
        xml.close("content");

        xml.depth -= 1;
        xml.line("</jcr:root>");

        Ok(crate::GeneratedFile {
            path: DIALOG_PATH.to_string(),
            content: xml.out,
        })
    }

    fn target(&self) -> &str {
        "dialog"
    }
}

/// `tab → items → columns → items → column → items → fields`
fn write_partition(
    xml: &mut XmlWriter,
    ir: &GenerationIr,
    partition: &Partition,
) -> Result<(), GenerateError> {
    xml.open(
        &partition.name,
        &[
            ("jcr:title", escape_value(&partition.title)),
            container(),
            ("margin", "{Boolean}true".into()),
        ],
    );
    xml.open_items();
    xml.open(
        "columns",
        &[
            ("sling:resourceType", COLUMNS_RESOURCE_TYPE.into()),
            ("margin", "{Boolean}true".into()),
        ],
    );
    xml.open_items();
    xml.open("column", &[container()]);
    xml.open_items();

    for field in ir.partition_fields(partition) {
        let rule = registry().rule(field.kind);
        if rule.is_composite() {
            write_composite(xml, field, rule)?;
        } else {
            write_leaf(xml, field, rule);
        }
    }

    xml.close("items");
    xml.close("column");
    xml.close("items");
    xml.close("columns");
    xml.close("items");
    xml.close(&partition.name);
    Ok(())
}

fn write_leaf(xml: &mut XmlWriter, field: &dyn FieldView, rule: &TypeRule) {
    let mut attrs = vec![
        ("sling:resourceType", rule.resource_type.to_string()),
        (rule.label_attr, escape_value(field.label())),
        ("name", format!("./{}", field.name())),
    ];
    attrs.extend(rule.defaults.iter().map(|&(k, v)| (k, v.to_string())));
    if field.required() {
        attrs.push(("required", "{Boolean}true".into()));
    }

    if field.options().is_empty() {
        xml.leaf(field.name(), &attrs);
        return;
    }

    xml.open(field.name(), &attrs);
    xml.open_items();
    for (i, option) in field.options().iter().enumerate() {
        xml.leaf(
            &format!("option{}", i + 1),
            &[
                ("text", escape_value(&option.text)),
                ("value", escape_value(&option.value)),
            ],
        );
    }
    xml.close("items");
    xml.close(field.name());
}

/// A composite multifield: the outer node carries the label, the inner
/// `field` container carries the storage name and holds the children.
fn write_composite(
    xml: &mut XmlWriter,
    field: &FieldSpec,
    rule: &TypeRule,
) -> Result<(), GenerateError> {
    if field.children.is_empty() {
        return Err(GenerateError::EmptyComposite {
            field: field.name.clone(),
        });
    }

    let mut attrs = vec![
        ("sling:resourceType", rule.resource_type.to_string()),
        (rule.label_attr, escape_value(&field.label)),
    ];
    attrs.extend(rule.defaults.iter().map(|&(k, v)| (k, v.to_string())));
    if field.required {
        attrs.push(("required", "{Boolean}true".into()));
    }

    xml.open(&field.name, &attrs);
    xml.open("field", &[container(), ("name", format!("./{}", field.name))]);
    xml.open_items();
    for child in &field.children {
        let child_rule = registry().rule(child.kind);
        if child_rule.is_composite() {
            return Err(GenerateError::StructuralDepthExceeded {
                composite: field.name.clone(),
                child: child.name.clone(),
            });
        }
        write_leaf(xml, child, child_rule);
    }
    xml.close("items");
    xml.close("field");
    xml.close(&field.name);
    Ok(())
}

fn container() -> (&'static str, String) {
    ("sling:resourceType", CONTAINER_RESOURCE_TYPE.to_string())
}

// ── Escaping ────────────────────────────────────────────────────────

/// Escape author text for a FileVault attribute.
///
/// FileVault reads `{Type}` prefixes and `[a,b]` arrays out of attribute
/// values and treats `\` as its escape character, so those are escaped
/// first; the XML entities follow.
pub fn escape_value(value: &str) -> String {
    let mut jcr = value.replace('\\', "\\\\");
    if jcr.starts_with('{') || jcr.starts_with('[') {
        jcr.insert(0, '\\');
    }
    escape_xml(&jcr)
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── Writer ──────────────────────────────────────────────────────────

/// Indented node writer.
///
/// A node with only `jcr:primaryType` fits on one line; anything else puts
/// each attribute on its own line, one level deeper than the tag.
#[derive(Default)]
struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn attrs(&mut self, attrs: &[(&str, String)], end: &str) {
        self.depth += 1;
        let last = attrs.len().saturating_sub(1);
        for (i, (key, value)) in attrs.iter().enumerate() {
            let tail = if i == last { end } else { "" };
            self.line(&format!("{key}=\"{value}\"{tail}"));
        }
        self.depth -= 1;
    }

    fn open(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.tag(name, attrs, ">");
        self.depth += 1;
    }

    fn leaf(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.tag(name, attrs, "/>");
    }

    fn tag(&mut self, name: &str, attrs: &[(&str, String)], end: &str) {
        if attrs.is_empty() {
            self.line(&format!(r#"<{name} jcr:primaryType="nt:unstructured"{end}"#));
            return;
        }
        self.line(&format!("<{name}"));
        let mut all = Vec::with_capacity(attrs.len() + 1);
        all.push(("jcr:primaryType", "nt:unstructured".to_string()));
        all.extend(attrs.iter().map(|(k, v)| (*k, v.clone())));
        self.attrs(&all, end);
    }

    fn open_items(&mut self) {
        self.open("items", &[]);
    }

    fn close(&mut self, name: &str) {
        self.depth -= 1;
        self.line(&format!("</{name}>"));
    }
}

//! Zod backend.
//!
//! Emits one `export const <name>Schema = z.object({...});` declaration
//! per class. Optional properties get an `.optional()` suffix; nested
//! object types render as inline `z.object` expressions with two-space
//! indentation per level.

use crate::ir::{ParsedClass, Primitive, Property, PropertyType};

use super::{schema_name, SchemaBackend};

pub struct ZodBackend;

impl SchemaBackend for ZodBackend {
    fn id(&self) -> &'static str {
        "zod"
    }

    fn name(&self) -> &'static str {
        "Zod"
    }

    fn imports(&self) -> Vec<String> {
        vec!["import { z } from \"zod\";".to_string()]
    }

    fn generate(&self, classes: &[ParsedClass]) -> String {
        let mut output = String::new();
        for import in self.imports() {
            output.push_str(&import);
            output.push('\n');
        }
        for class in classes {
            output.push('\n');
            output.push_str(&format!(
                "export const {} = {};\n",
                schema_name(&class.name),
                render_object(&class.properties, 0)
            ));
        }
        output
    }
}

fn render_type(ty: &PropertyType, indent: usize) -> String {
    match ty {
        PropertyType::Primitive(Primitive::String) => "z.string()".to_string(),
        PropertyType::Primitive(Primitive::Number) => "z.number()".to_string(),
        PropertyType::Primitive(Primitive::Boolean) => "z.boolean()".to_string(),
        PropertyType::Primitive(Primitive::Date) => "z.date()".to_string(),
        PropertyType::Array(element) => format!("z.array({})", render_type(element, indent)),
        PropertyType::Union(members) => {
            let rendered = members
                .iter()
                .map(|member| render_type(member, indent))
                .collect::<Vec<_>>()
                .join(", ");
            format!("z.union([{}])", rendered)
        }
        PropertyType::Literal(value) => format!("z.literal({})", value.render()),
        PropertyType::Object(properties) => render_object(properties, indent),
    }
}

fn render_object(properties: &[Property], indent: usize) -> String {
    if properties.is_empty() {
        return "z.object({})".to_string();
    }
    let field_pad = "  ".repeat(indent + 1);
    let close_pad = "  ".repeat(indent);
    let body = properties
        .iter()
        .map(|prop| {
            let mut rendered = render_type(&prop.ty, indent + 1);
            if prop.is_optional {
                rendered.push_str(".optional()");
            }
            format!("{}{}: {}", field_pad, prop.name, rendered)
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("z.object({{\n{}\n{}}})", body, close_pad)
}

//! Valibot backend.
//!
//! Same declaration shape as the Zod backend but in Valibot's vocabulary:
//! optionality is the `v.optional(...)` wrapper rather than a method
//! suffix.

use crate::ir::{ParsedClass, Primitive, Property, PropertyType};

use super::{schema_name, SchemaBackend};

pub struct ValibotBackend;

impl SchemaBackend for ValibotBackend {
    fn id(&self) -> &'static str {
        "valibot"
    }

    fn name(&self) -> &'static str {
        "Valibot"
    }

    fn imports(&self) -> Vec<String> {
        vec!["import * as v from \"valibot\";".to_string()]
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
        PropertyType::Primitive(Primitive::String) => "v.string()".to_string(),
        PropertyType::Primitive(Primitive::Number) => "v.number()".to_string(),
        PropertyType::Primitive(Primitive::Boolean) => "v.boolean()".to_string(),
        PropertyType::Primitive(Primitive::Date) => "v.date()".to_string(),
        PropertyType::Array(element) => format!("v.array({})", render_type(element, indent)),
        PropertyType::Union(members) => {
            let rendered = members
                .iter()
                .map(|member| render_type(member, indent))
                .collect::<Vec<_>>()
                .join(", ");
            format!("v.union([{}])", rendered)
        }
        PropertyType::Literal(value) => format!("v.literal({})", value.render()),
        PropertyType::Object(properties) => render_object(properties, indent),
    }
}

fn render_object(properties: &[Property], indent: usize) -> String {
    if properties.is_empty() {
        return "v.object({})".to_string();
    }
    let field_pad = "  ".repeat(indent + 1);
    let close_pad = "  ".repeat(indent);
    let body = properties
        .iter()
        .map(|prop| {
            let mut rendered = render_type(&prop.ty, indent + 1);
            if prop.is_optional {
                rendered = format!("v.optional({})", rendered);
            }
            format!("{}{}: {}", field_pad, prop.name, rendered)
        })
        .collect::<Vec<_>>()
        .join(",\n");
    format!("v.object({{\n{}\n{}}})", body, close_pad)
}

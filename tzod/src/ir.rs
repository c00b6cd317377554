//! Intermediate representation for resolved class shapes.
//!
//! These types are the schema-agnostic output of the type resolver and the
//! input of every generator backend. The IR is a closed set: resolver and
//! backends match on it exhaustively, so adding a kind forces both sides to
//! be updated at compile time.

use serde::{Deserialize, Serialize};

/// Leaf scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Date,
}

/// A single exact value constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl LiteralValue {
    /// Source rendering of the value: strings double-quoted with `"` and
    /// `\` escaped, numbers and booleans bare. Integral numbers render
    /// without a fractional part.
    pub fn render(&self) -> String {
        match self {
            LiteralValue::String(s) => {
                format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            LiteralValue::Number(n) => format_number(*n),
            LiteralValue::Boolean(b) => b.to_string(),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::String(value.to_string())
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        LiteralValue::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Boolean(value)
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Resolved type of a property.
///
/// Every tree is finite and acyclic by construction: the resolver refuses
/// to re-enter a structural type that is already an ancestor on the
/// resolution path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PropertyType {
    /// A leaf scalar type.
    Primitive(Primitive),

    /// Homogeneous sequence.
    Array(Box<PropertyType>),

    /// A structural record type, members in declaration order.
    Object(Vec<Property>),

    /// A value must match exactly one alternative; never empty.
    Union(Vec<PropertyType>),

    /// A single exact value constraint.
    Literal(LiteralValue),
}

impl PropertyType {
    /// Wrap an element type as an array.
    pub fn array(element: PropertyType) -> Self {
        PropertyType::Array(Box::new(element))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, PropertyType::Primitive(_))
    }
}

/// A declared property with its resolved type and declaration flags.
///
/// The readonly and has-default flags are only meaningful at the top level
/// of a class; members of inferred structural types always carry `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: PropertyType,

    pub is_optional: bool,

    pub is_readonly: bool,

    pub has_default_value: bool,
}

impl Property {
    /// Create a property with all flags cleared.
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_optional: false,
            is_readonly: false,
            has_default_value: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default_value = true;
        self
    }
}

/// A fully resolved class-like declaration.
///
/// Constructed once per (file, class) pair, immutable thereafter, and
/// consumed as-is by generator backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedClass {
    pub name: String,

    pub file_path: String,

    pub is_exported: bool,

    /// Declaration order in source.
    pub properties: Vec<Property>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_builder_flags() {
        let prop = Property::new("id", PropertyType::Primitive(Primitive::String));
        assert!(!prop.is_optional);
        assert!(!prop.is_readonly);
        assert!(!prop.has_default_value);

        let prop = prop.optional().readonly().with_default();
        assert!(prop.is_optional);
        assert!(prop.is_readonly);
        assert!(prop.has_default_value);
    }

    #[test]
    fn test_structural_equality() {
        let a = Property::new("id", PropertyType::Primitive(Primitive::String));
        let b = Property::new("id", PropertyType::Primitive(Primitive::String));
        assert_eq!(a, b);
        assert_ne!(a.clone().optional(), b);
    }

    #[test]
    fn test_array_constructor() {
        let nested = PropertyType::array(PropertyType::array(PropertyType::Primitive(
            Primitive::Number,
        )));
        match nested {
            PropertyType::Array(inner) => match *inner {
                PropertyType::Array(leaf) => assert!(leaf.is_primitive()),
                other => panic!("expected inner array, got {:?}", other),
            },
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_render() {
        assert_eq!(LiteralValue::from("pending").render(), "\"pending\"");
        assert_eq!(LiteralValue::from("a\"b").render(), "\"a\\\"b\"");
        assert_eq!(LiteralValue::from(3.0).render(), "3");
        assert_eq!(LiteralValue::from(2.5).render(), "2.5");
        assert_eq!(LiteralValue::from(true).render(), "true");
    }

    #[test]
    fn test_ir_serializes() {
        let class = ParsedClass {
            name: "User".to_string(),
            file_path: "user.ts".to_string(),
            is_exported: true,
            properties: vec![Property::new(
                "name",
                PropertyType::Primitive(Primitive::String),
            )],
        };
        let json = serde_json::to_string(&class).unwrap();
        assert!(json.contains("\"name\""));
        let back: ParsedClass = serde_json::from_str(&json).unwrap();
        assert_eq!(back, class);
    }
}

//! Syntax tree for the declaration subset.
//!
//! `TypeExpr` doubles as the provider's type handle: it is the value the
//! resolver passes back into the introspection queries. Constructs the
//! tool does not model (function types, generics, intersections) are kept
//! as `Unsupported` nodes carrying their exact source text so diagnostics
//! stay faithful.

use crate::ir::LiteralValue;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// The `string` keyword.
    StringKeyword,

    /// The `number` keyword.
    NumberKeyword,

    /// The `boolean` keyword.
    BooleanKeyword,

    /// A named type reference, e.g. `Date` or a same-file class name.
    Named(String),

    /// `T[]` or `Array<T>`.
    Array(Box<TypeExpr>),

    /// `A | B | C`, members in declaration order.
    Union(Vec<TypeExpr>),

    /// A string, number, or boolean literal type.
    Literal(LiteralValue),

    /// An inline object type, e.g. `{ a: string; b?: number }`.
    ObjectLiteral(Vec<ObjectMember>),

    /// Anything the subset does not model; carries the source text.
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMember {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub is_optional: bool,
}

impl TypeExpr {
    /// Textual rendering of the expression, close to its source form.
    pub fn text(&self) -> String {
        match self {
            TypeExpr::StringKeyword => "string".to_string(),
            TypeExpr::NumberKeyword => "number".to_string(),
            TypeExpr::BooleanKeyword => "boolean".to_string(),
            TypeExpr::Named(name) => name.clone(),
            TypeExpr::Array(element) => match element.as_ref() {
                TypeExpr::Union(_) => format!("({})[]", element.text()),
                _ => format!("{}[]", element.text()),
            },
            TypeExpr::Union(members) => members
                .iter()
                .map(TypeExpr::text)
                .collect::<Vec<_>>()
                .join(" | "),
            TypeExpr::Literal(value) => value.render(),
            TypeExpr::ObjectLiteral(members) => {
                if members.is_empty() {
                    return "{}".to_string();
                }
                let body = members
                    .iter()
                    .map(|member| {
                        let marker = if member.is_optional { "?" } else { "" };
                        match &member.ty {
                            Some(ty) => format!("{}{}: {}", member.name, marker, ty.text()),
                            None => format!("{}{}", member.name, marker),
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                format!("{{ {} }}", body)
            }
            TypeExpr::Unsupported(text) => text.clone(),
        }
    }
}

/// A raw class-like declaration straight out of the parser.
#[derive(Debug, Clone)]
pub struct ClassItem {
    pub name: String,
    pub is_exported: bool,
    pub is_interface: bool,
    pub properties: Vec<PropertyItem>,
}

/// A raw property declaration.
#[derive(Debug, Clone)]
pub struct PropertyItem {
    pub name: String,
    pub ty: Option<TypeExpr>,
    pub is_optional: bool,
    pub is_readonly: bool,
    pub has_initializer: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_of_simple_types() {
        assert_eq!(TypeExpr::StringKeyword.text(), "string");
        assert_eq!(TypeExpr::Named("Date".to_string()).text(), "Date");
        assert_eq!(
            TypeExpr::Array(Box::new(TypeExpr::NumberKeyword)).text(),
            "number[]"
        );
    }

    #[test]
    fn test_union_element_arrays_are_parenthesized() {
        let union = TypeExpr::Union(vec![TypeExpr::StringKeyword, TypeExpr::NumberKeyword]);
        assert_eq!(
            TypeExpr::Array(Box::new(union)).text(),
            "(string | number)[]"
        );
    }

    #[test]
    fn test_text_of_object_literal() {
        let object = TypeExpr::ObjectLiteral(vec![
            ObjectMember {
                name: "a".to_string(),
                ty: Some(TypeExpr::StringKeyword),
                is_optional: false,
            },
            ObjectMember {
                name: "b".to_string(),
                ty: Some(TypeExpr::NumberKeyword),
                is_optional: true,
            },
        ]);
        assert_eq!(object.text(), "{ a: string; b?: number }");
    }

    #[test]
    fn test_text_of_literals() {
        assert_eq!(
            TypeExpr::Literal(LiteralValue::from("pending")).text(),
            "\"pending\""
        );
        assert_eq!(TypeExpr::Literal(LiteralValue::from(1.0)).text(), "1");
        assert_eq!(TypeExpr::Literal(LiteralValue::from(false)).text(), "false");
    }
}

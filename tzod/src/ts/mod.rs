//! TypeScript source-file provider.
//!
//! [`TsSourceFile`] parses a source file once and then answers the
//! introspection queries over the resulting syntax tree, using
//! [`TypeExpr`] as the type handle. Named types that refer to a class or
//! interface declared in the same file answer the object queries
//! structurally, so nested named types resolve through their declared
//! members.

mod ast;
mod lexer;
mod parser;

pub use ast::{ClassItem, ObjectMember, PropertyItem, TypeExpr};

use std::collections::HashMap;
use std::path::Path;

use crate::error::ParseError;
use crate::ir::LiteralValue;
use crate::provider::{ClassDecl, MemberDecl, PropertyDecl, SourceIntrospector, TypeIntrospector};

/// A parsed TypeScript source file.
#[derive(Debug)]
pub struct TsSourceFile {
    path: String,
    classes: Vec<ClassItem>,
    by_name: HashMap<String, usize>,
}

impl TsSourceFile {
    /// Parse source text into a queryable file.
    pub fn parse(content: &str, path: &str) -> Result<Self, ParseError> {
        let classes = parser::parse_declarations(content, path)?;
        let by_name = classes
            .iter()
            .enumerate()
            .map(|(index, class)| (class.name.clone(), index))
            .collect();
        Ok(Self {
            path: path.to_string(),
            classes,
            by_name,
        })
    }

    /// Read and parse a file from disk.
    pub fn open(path: &Path) -> Result<Self, ParseError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            file: display.clone(),
            source,
        })?;
        Self::parse(&content, &display)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn class_named(&self, name: &str) -> Option<&ClassItem> {
        self.by_name.get(name).map(|&index| &self.classes[index])
    }
}

impl TypeIntrospector for TsSourceFile {
    type Handle = TypeExpr;

    fn is_string_type(&self, ty: &TypeExpr) -> bool {
        matches!(ty, TypeExpr::StringKeyword)
    }

    fn is_number_type(&self, ty: &TypeExpr) -> bool {
        matches!(ty, TypeExpr::NumberKeyword)
    }

    fn is_boolean_type(&self, ty: &TypeExpr) -> bool {
        matches!(ty, TypeExpr::BooleanKeyword)
    }

    fn is_array_type(&self, ty: &TypeExpr) -> bool {
        matches!(ty, TypeExpr::Array(_))
    }

    fn element_type_of(&self, ty: &TypeExpr) -> Option<TypeExpr> {
        match ty {
            TypeExpr::Array(element) => Some((**element).clone()),
            _ => None,
        }
    }

    fn is_union_type(&self, ty: &TypeExpr) -> bool {
        matches!(ty, TypeExpr::Union(_))
    }

    fn union_members_of(&self, ty: &TypeExpr) -> Vec<TypeExpr> {
        match ty {
            TypeExpr::Union(members) => members.clone(),
            _ => Vec::new(),
        }
    }

    fn is_literal_type(&self, ty: &TypeExpr) -> bool {
        matches!(ty, TypeExpr::Literal(_))
    }

    fn literal_value_of(&self, ty: &TypeExpr) -> Option<LiteralValue> {
        match ty {
            TypeExpr::Literal(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn is_object_type(&self, ty: &TypeExpr) -> bool {
        match ty {
            TypeExpr::ObjectLiteral(_) => true,
            TypeExpr::Named(name) => self.class_named(name).is_some(),
            _ => false,
        }
    }

    fn member_declarations_of(&self, ty: &TypeExpr) -> Vec<MemberDecl<TypeExpr>> {
        match ty {
            TypeExpr::ObjectLiteral(members) => members
                .iter()
                .map(|member| MemberDecl {
                    name: member.name.clone(),
                    ty: member.ty.clone(),
                    is_optional: member.is_optional,
                })
                .collect(),
            TypeExpr::Named(name) => self
                .class_named(name)
                .map(|class| {
                    class
                        .properties
                        .iter()
                        .map(|prop| MemberDecl {
                            name: prop.name.clone(),
                            ty: prop.ty.clone(),
                            is_optional: prop.is_optional,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn text_of(&self, ty: &TypeExpr) -> String {
        ty.text()
    }
}

impl SourceIntrospector for TsSourceFile {
    fn class_declarations(&self) -> Vec<ClassDecl<TypeExpr>> {
        self.classes
            .iter()
            .map(|class| ClassDecl {
                name: class.name.clone(),
                is_exported: class.is_exported,
                properties: class
                    .properties
                    .iter()
                    .map(|prop| PropertyDecl {
                        name: prop.name.clone(),
                        ty: prop.ty.clone(),
                        is_optional: prop.is_optional,
                        is_readonly: prop.is_readonly,
                        has_initializer: prop.has_initializer,
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_type_with_same_file_class_is_object() {
        let file = TsSourceFile::parse(
            r#"
            export class Address { street: string; }
            export class User { home: Address; }
            "#,
            "test.ts",
        )
        .unwrap();

        let handle = TypeExpr::Named("Address".to_string());
        assert!(file.is_object_type(&handle));

        let members = file.member_declarations_of(&handle);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "street");
    }

    #[test]
    fn test_unknown_named_type_is_not_object() {
        let file = TsSourceFile::parse("export class User { id: string; }", "test.ts").unwrap();
        let handle = TypeExpr::Named("Elsewhere".to_string());
        assert!(!file.is_object_type(&handle));
        assert_eq!(file.text_of(&handle), "Elsewhere");
    }

    #[test]
    fn test_class_declarations_expose_markers() {
        let file = TsSourceFile::parse(
            "export class User { readonly id: string; name?: string; }",
            "test.ts",
        )
        .unwrap();
        let decls = file.class_declarations();
        assert_eq!(decls.len(), 1);
        assert!(decls[0].is_exported);
        assert!(decls[0].properties[0].is_readonly);
        assert!(decls[0].properties[1].is_optional);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let err = TsSourceFile::open(Path::new("/definitely/not/here.ts")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}

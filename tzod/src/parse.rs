//! Class parsing: thin orchestration over the type resolver.
//!
//! Lowers the provider's class declarations into `ParsedClass` values. The
//! optional/readonly/has-default flags are read from the declaration as
//! reported by the provider, never derived, and never recomputed for
//! nested structural members.

use crate::error::{ParseError, ResolveError};
use crate::ir::{ParsedClass, Property};
use crate::provider::{ClassDecl, SourceIntrospector};
use crate::resolver::TypeResolver;

/// Parser for class-like declarations.
pub struct ClassParser;

impl ClassParser {
    /// Parse one named class from the file backing `provider`.
    pub fn parse_class<P: SourceIntrospector>(
        provider: &P,
        file_path: &str,
        class_name: &str,
    ) -> Result<ParsedClass, ParseError> {
        let decl = provider
            .class_declarations()
            .into_iter()
            .find(|class| class.name == class_name)
            .ok_or_else(|| ParseError::class_not_found(class_name, file_path))?;
        Self::lower(provider, file_path, decl)
    }

    /// Parse every top-level class-like declaration, preserving file order.
    ///
    /// An empty file yields an empty list; a resolution failure in any
    /// class fails the whole call, with no partial result.
    pub fn parse_all<P: SourceIntrospector>(
        provider: &P,
        file_path: &str,
    ) -> Result<Vec<ParsedClass>, ParseError> {
        provider
            .class_declarations()
            .into_iter()
            .map(|decl| Self::lower(provider, file_path, decl))
            .collect()
    }

    fn lower<P: SourceIntrospector>(
        provider: &P,
        file_path: &str,
        decl: ClassDecl<P::Handle>,
    ) -> Result<ParsedClass, ParseError> {
        let resolver = TypeResolver::new(provider);
        let mut properties = Vec::with_capacity(decl.properties.len());

        for prop in decl.properties {
            let resolve_failure = |source: ResolveError| ParseError::Resolve {
                class_name: decl.name.clone(),
                property: prop.name.clone(),
                source,
            };

            let handle = prop.ty.as_ref().ok_or_else(|| {
                resolve_failure(ResolveError::MissingDeclaration {
                    member: prop.name.clone(),
                })
            })?;
            let ty = resolver.resolve(handle).map_err(resolve_failure)?;

            properties.push(Property {
                name: prop.name,
                ty,
                is_optional: prop.is_optional,
                is_readonly: prop.is_readonly,
                has_default_value: prop.has_initializer,
            });
        }

        Ok(ParsedClass {
            name: decl.name,
            file_path: file_path.to_string(),
            is_exported: decl.is_exported,
            properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ts::TsSourceFile;

    fn parse_all(source: &str) -> Vec<ParsedClass> {
        let file = TsSourceFile::parse(source, "test.ts").unwrap();
        ClassParser::parse_all(&file, "test.ts").unwrap()
    }

    #[test]
    fn test_class_not_found() {
        let file = TsSourceFile::parse("export class User { id: string; }", "test.ts").unwrap();
        let err = ClassParser::parse_class(&file, "test.ts", "Missing").unwrap_err();
        assert!(matches!(err, ParseError::ClassNotFound { .. }));
    }

    #[test]
    fn test_empty_file_yields_empty_list() {
        assert!(parse_all("// nothing declared here\n").is_empty());
    }

    #[test]
    fn test_class_without_properties_is_not_an_error() {
        let classes = parse_all("export class Empty {}");
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Empty");
        assert!(classes[0].properties.is_empty());
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let classes = parse_all(
            r#"
            class First { a: string; }
            export class Second { b: number; }
            interface Third { c: boolean; }
            "#,
        );
        let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert!(!classes[0].is_exported);
        assert!(classes[1].is_exported);
    }

    #[test]
    fn test_flags_read_not_derived() {
        let classes = parse_all(
            r#"
            export class Flags {
                plain: string;
                maybe?: string;
                readonly fixed: string;
                seeded: string = "hello";
                readonly all?: string = "x";
            }
            "#,
        );
        let props = &classes[0].properties;
        assert_eq!(props.len(), 5);

        assert!(!props[0].is_optional && !props[0].is_readonly && !props[0].has_default_value);
        assert!(props[1].is_optional && !props[1].is_readonly && !props[1].has_default_value);
        assert!(!props[2].is_optional && props[2].is_readonly && !props[2].has_default_value);
        assert!(!props[3].is_optional && !props[3].is_readonly && props[3].has_default_value);
        assert!(props[4].is_optional && props[4].is_readonly && props[4].has_default_value);
    }

    #[test]
    fn test_unsupported_property_fails_whole_class() {
        let file = TsSourceFile::parse(
            "export class Handlers { id: string; onClick: () => void; }",
            "test.ts",
        )
        .unwrap();
        let err = ClassParser::parse_all(&file, "test.ts").unwrap_err();
        match err {
            ParseError::Resolve {
                class_name,
                property,
                source,
            } => {
                assert_eq!(class_name, "Handlers");
                assert_eq!(property, "onClick");
                assert!(matches!(source, ResolveError::UnsupportedType { .. }));
            }
            other => panic!("expected resolve error, got {:?}", other),
        }
    }

    #[test]
    fn test_untyped_property_is_missing_declaration() {
        let file =
            TsSourceFile::parse("export class Inferred { id = 42; }", "test.ts").unwrap();
        let err = ClassParser::parse_all(&file, "test.ts").unwrap_err();
        match err {
            ParseError::Resolve { source, .. } => {
                assert!(matches!(source, ResolveError::MissingDeclaration { .. }));
            }
            other => panic!("expected resolve error, got {:?}", other),
        }
    }
}

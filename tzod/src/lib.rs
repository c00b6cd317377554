//! Structural type extraction and validation-schema generation.
//!
//! The pipeline has three stages with a schema-agnostic IR in the middle:
//!
//! 1. A source provider ([`ts::TsSourceFile`]) parses a TypeScript file
//!    and answers the introspection queries of [`provider::TypeIntrospector`].
//! 2. The [`resolver::TypeResolver`] classifies each property type into
//!    the [`ir::PropertyType`] tree, and [`parse::ClassParser`] lowers
//!    whole declarations into [`ir::ParsedClass`] values.
//! 3. A [`generator::SchemaBackend`] renders the IR into schema code;
//!    backends are selected through the [`generator::BackendRegistry`].
//!
//! # Example
//!
//! ```
//! use tzod::generator::{BackendRegistry, SchemaBackend};
//!
//! let classes = tzod::parse_source(
//!     "export class User { id: string; age?: number; }",
//!     "user.ts",
//! )?;
//!
//! let registry = BackendRegistry::default();
//! let backend = registry.backend_for("zod")?;
//! let code = backend.generate(&classes);
//! assert!(code.contains("export const userSchema"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod generator;
pub mod ir;
pub mod parse;
pub mod provider;
pub mod resolver;
pub mod ts;

pub use error::{GenerateError, ParseError, ResolveError};
pub use ir::{LiteralValue, ParsedClass, Primitive, Property, PropertyType};
pub use parse::ClassParser;
pub use resolver::TypeResolver;

use std::path::Path;

use ts::TsSourceFile;

/// Parse every class-like declaration in a source string.
pub fn parse_source(content: &str, file_path: &str) -> Result<Vec<ParsedClass>, ParseError> {
    let file = TsSourceFile::parse(content, file_path)?;
    ClassParser::parse_all(&file, file_path)
}

/// Parse every class-like declaration in a file on disk.
pub fn parse_file(path: &Path) -> Result<Vec<ParsedClass>, ParseError> {
    let file = TsSourceFile::open(path)?;
    ClassParser::parse_all(&file, file.path())
}

/// Parse one named class from a file on disk.
pub fn parse_class(path: &Path, class_name: &str) -> Result<ParsedClass, ParseError> {
    let file = TsSourceFile::open(path)?;
    ClassParser::parse_class(&file, file.path(), class_name)
}

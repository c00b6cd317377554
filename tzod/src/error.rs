//! Error types for the core library.
//!
//! All failures are synchronous, typed, and non-recoverable at the point
//! of occurrence: resolution is deterministic, so nothing is retried and
//! no partial IR or partial rendered output is ever returned.

use thiserror::Error;

/// Error during type resolution.
///
/// Fatal to the resolution of the enclosing property; propagates up
/// through the class parser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// A type expression does not match any of the five IR kinds.
    #[error("unsupported type: {type_text}")]
    UnsupportedType { type_text: String },

    /// A union type reported zero members; a resolver defect upstream.
    #[error("union type has no members: {type_text}")]
    EmptyUnion { type_text: String },

    /// An object member has no retrievable type declaration.
    #[error("member '{member}' has no resolvable type declaration")]
    MissingDeclaration { member: String },

    /// A structural type contains itself.
    #[error("cyclic type detected while resolving '{type_text}'")]
    CyclicType { type_text: String },

    /// Nesting exceeded the resolver's hard recursion bound.
    #[error("type nesting exceeds the maximum depth of {max}")]
    DepthExceeded { max: usize },
}

/// Error during class parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Requested class absent from the file.
    #[error("class '{class_name}' not found in {file}")]
    ClassNotFound { class_name: String, file: String },

    /// Malformed source text.
    #[error("syntax error in {file}:{line}:{column}: {message}")]
    Syntax {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// A property's declared type could not be resolved into the IR.
    #[error("failed to resolve property '{property}' of class '{class_name}': {source}")]
    Resolve {
        class_name: String,
        property: String,
        #[source]
        source: ResolveError,
    },

    /// IO error reading the source file.
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create a syntax error with location information.
    pub fn syntax(
        file: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a class-not-found error.
    pub fn class_not_found(class_name: impl Into<String>, file: impl Into<String>) -> Self {
        Self::ClassNotFound {
            class_name: class_name.into(),
            file: file.into(),
        }
    }
}

/// Error during schema generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// No registered backend declares support for the target identifier.
    #[error("no backend registered for target '{0}'")]
    UnknownTarget(String),
}

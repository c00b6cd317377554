//! Capability contract for the type-introspection provider.
//!
//! The resolver never talks to a concrete syntax tree: it consumes the
//! narrow query surface below through an opaque type handle. This keeps
//! the recursive classification algorithm portable across introspection
//! engines and trivially testable with an in-memory provider.

use crate::ir::LiteralValue;

/// An object-type member as reported by the provider.
#[derive(Debug, Clone)]
pub struct MemberDecl<H> {
    pub name: String,

    /// `None` when the member has no queryable type.
    pub ty: Option<H>,

    pub is_optional: bool,
}

/// A property declaration of a class-like declaration.
#[derive(Debug, Clone)]
pub struct PropertyDecl<H> {
    pub name: String,

    /// `None` when the property carries no resolvable type annotation.
    pub ty: Option<H>,

    pub is_optional: bool,

    pub is_readonly: bool,

    pub has_initializer: bool,
}

/// A class-like declaration as reported by the provider.
#[derive(Debug, Clone)]
pub struct ClassDecl<H> {
    pub name: String,

    pub is_exported: bool,

    /// Declaration order in source.
    pub properties: Vec<PropertyDecl<H>>,
}

/// Structural queries over one type expression.
///
/// The query categories overlap (a literal is also primitive-like, a
/// `Date`-shaped type is also object-like); the resolver's probe order is
/// what disambiguates them, so implementations only answer what the
/// expression *is*, never what it should resolve to.
pub trait TypeIntrospector {
    /// Opaque reference to one type expression.
    type Handle: Clone;

    fn is_string_type(&self, ty: &Self::Handle) -> bool;

    fn is_number_type(&self, ty: &Self::Handle) -> bool;

    fn is_boolean_type(&self, ty: &Self::Handle) -> bool;

    fn is_array_type(&self, ty: &Self::Handle) -> bool;

    /// Element type of an array type; `None` for non-arrays.
    fn element_type_of(&self, ty: &Self::Handle) -> Option<Self::Handle>;

    fn is_union_type(&self, ty: &Self::Handle) -> bool;

    /// Member types of a union in the provider's reported order.
    fn union_members_of(&self, ty: &Self::Handle) -> Vec<Self::Handle>;

    fn is_literal_type(&self, ty: &Self::Handle) -> bool;

    /// Value of a literal type; `None` when the value is not one of
    /// string/number/boolean.
    fn literal_value_of(&self, ty: &Self::Handle) -> Option<LiteralValue>;

    fn is_object_type(&self, ty: &Self::Handle) -> bool;

    /// Member declarations of a structural object type, in order.
    fn member_declarations_of(&self, ty: &Self::Handle) -> Vec<MemberDecl<Self::Handle>>;

    /// Textual rendering of the type, used for `Date` detection and error
    /// diagnostics.
    fn text_of(&self, ty: &Self::Handle) -> String;
}

/// File-level queries: the class-like declarations of one source file.
pub trait SourceIntrospector: TypeIntrospector {
    /// Top-level class-like declarations in file declaration order.
    fn class_declarations(&self) -> Vec<ClassDecl<Self::Handle>>;
}

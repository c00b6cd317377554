//! Recursive classification of type expressions into the IR.
//!
//! The probe order is semantically load-bearing: categories overlap, and
//! first match wins. A literal is also primitive-like, and a `Date`-shaped
//! named type is also object-like, so the checks run primitive → `Date`
//! text → array → union → literal → object, with an `UnsupportedType`
//! terminal for everything else.

use crate::error::ResolveError;
use crate::ir::{Primitive, Property, PropertyType};
use crate::provider::TypeIntrospector;

/// Hard bound on type-expression nesting.
pub const MAX_DEPTH: usize = 64;

/// Pure, deterministic resolver over an injected introspection provider.
pub struct TypeResolver<'p, P: TypeIntrospector> {
    provider: &'p P,
}

impl<'p, P: TypeIntrospector> TypeResolver<'p, P> {
    pub fn new(provider: &'p P) -> Self {
        Self { provider }
    }

    /// Resolve one type expression into a `PropertyType` tree.
    ///
    /// Resolution has no side effects and never returns partial IR: the
    /// first unsupported construct fails the whole expression.
    pub fn resolve(&self, ty: &P::Handle) -> Result<PropertyType, ResolveError> {
        self.resolve_at(ty, 0, &mut Vec::new())
    }

    /// `path` holds the textual renderings of the object-kind ancestors of
    /// the current expression; re-entering one of them is a cycle.
    fn resolve_at(
        &self,
        ty: &P::Handle,
        depth: usize,
        path: &mut Vec<String>,
    ) -> Result<PropertyType, ResolveError> {
        if depth >= MAX_DEPTH {
            return Err(ResolveError::DepthExceeded { max: MAX_DEPTH });
        }

        let provider = self.provider;

        if provider.is_string_type(ty) {
            return Ok(PropertyType::Primitive(Primitive::String));
        }
        if provider.is_number_type(ty) {
            return Ok(PropertyType::Primitive(Primitive::Number));
        }
        if provider.is_boolean_type(ty) {
            return Ok(PropertyType::Primitive(Primitive::Boolean));
        }

        let text = provider.text_of(ty);

        // Some introspection engines expose a dedicated date type only as a
        // named structural type; the nominal name is the reliable signal.
        if text == "Date" {
            return Ok(PropertyType::Primitive(Primitive::Date));
        }

        if provider.is_array_type(ty) {
            let element = provider
                .element_type_of(ty)
                .ok_or(ResolveError::UnsupportedType { type_text: text })?;
            let element = self.resolve_at(&element, depth + 1, path)?;
            return Ok(PropertyType::array(element));
        }

        if provider.is_union_type(ty) {
            let members = provider.union_members_of(ty);
            if members.is_empty() {
                return Err(ResolveError::EmptyUnion { type_text: text });
            }
            let mut types = Vec::with_capacity(members.len());
            for member in &members {
                types.push(self.resolve_at(member, depth + 1, path)?);
            }
            return Ok(PropertyType::Union(types));
        }

        if provider.is_literal_type(ty) {
            // A literal value outside string/number/boolean is not
            // representable and falls through to the terminal failure.
            if let Some(value) = provider.literal_value_of(ty) {
                return Ok(PropertyType::Literal(value));
            }
        } else if provider.is_object_type(ty) {
            if path.iter().any(|ancestor| *ancestor == text) {
                return Err(ResolveError::CyclicType { type_text: text });
            }
            path.push(text);
            let result = self.resolve_members(ty, depth, path);
            path.pop();
            return result;
        }

        Err(ResolveError::UnsupportedType { type_text: text })
    }

    fn resolve_members(
        &self,
        ty: &P::Handle,
        depth: usize,
        path: &mut Vec<String>,
    ) -> Result<PropertyType, ResolveError> {
        let members = self.provider.member_declarations_of(ty);
        let mut properties = Vec::with_capacity(members.len());
        for member in members {
            let member_ty = member.ty.ok_or(ResolveError::MissingDeclaration {
                member: member.name.clone(),
            })?;
            let resolved = self.resolve_at(&member_ty, depth + 1, path)?;
            // Readonly and default flags only exist at the top level of a
            // class declaration, not on inferred structural members.
            properties.push(Property {
                name: member.name,
                ty: resolved,
                is_optional: member.is_optional,
                is_readonly: false,
                has_default_value: false,
            });
        }
        Ok(PropertyType::Object(properties))
    }
}

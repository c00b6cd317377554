//! Schema generation backends.
//!
//! Backends consume the resolved IR and nothing else: no backend ever
//! reaches back into a provider or a syntax tree. The registry maps target
//! identifiers to backends at runtime so the front end can offer targets
//! without hardcoding them.

mod valibot;
mod zod;

pub use valibot::ValibotBackend;
pub use zod::ZodBackend;

use crate::error::GenerateError;
use crate::ir::ParsedClass;

/// A schema-code generation backend.
pub trait SchemaBackend {
    /// Stable identifier used for target selection, e.g. `"zod"`.
    fn id(&self) -> &'static str;

    /// Human-readable backend name.
    fn name(&self) -> &'static str;

    /// Extension of the emitted file, without the dot.
    fn file_extension(&self) -> &'static str {
        "ts"
    }

    /// Whether this backend serves the given target identifier.
    fn supports(&self, target: &str) -> bool {
        target.eq_ignore_ascii_case(self.id())
    }

    /// Import lines the emitted module needs, in order.
    fn imports(&self) -> Vec<String>;

    /// Render one schema declaration per class, in input order.
    ///
    /// The same IR always produces the same output.
    fn generate(&self, classes: &[ParsedClass]) -> String;
}

/// Derive the schema constant name for a class: the class name with its
/// first character lower-cased, suffixed with `Schema`.
pub fn schema_name(class_name: &str) -> String {
    let mut chars = class_name.chars();
    match chars.next() {
        Some(first) => format!("{}{}Schema", first.to_lowercase(), chars.as_str()),
        None => "Schema".to_string(),
    }
}

/// Runtime registry of generation backends.
pub struct BackendRegistry {
    backends: Vec<Box<dyn SchemaBackend>>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Register a backend. Later registrations never shadow earlier ones;
    /// lookup picks the first backend that supports the target.
    pub fn register(&mut self, backend: Box<dyn SchemaBackend>) {
        self.backends.push(backend);
    }

    /// Look up the backend serving `target`.
    pub fn backend_for(&self, target: &str) -> Result<&dyn SchemaBackend, GenerateError> {
        self.backends
            .iter()
            .map(|backend| backend.as_ref())
            .find(|backend| backend.supports(target))
            .ok_or_else(|| GenerateError::UnknownTarget(target.to_string()))
    }

    /// Identifiers of all registered backends, in registration order.
    pub fn targets(&self) -> Vec<&'static str> {
        self.backends.iter().map(|backend| backend.id()).collect()
    }
}

impl Default for BackendRegistry {
    /// Registry with the built-in backends.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ZodBackend));
        registry.register(Box::new(ValibotBackend));
        registry
    }
}

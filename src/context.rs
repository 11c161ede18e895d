//! The parser context: the single registry shared by all extraction passes
//! and the single point of truth for type-reference resolution.

use crate::error::SchemaError;
use crate::model::{
    ObjectRef, OneofRef, OneofWrapper, ParsedEndpoint, SchemaObject, ValueType,
};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Process-scoped registry populated by the extraction passes in order:
/// object symbols, oneof wrappers, schema objects, endpoints, and the
/// accumulated error list.
///
/// Created once per input file, mutated by the four passes in strict
/// sequence, read-only during rendering.
#[derive(Debug, Default)]
pub struct ParserContext {
    object_symbols: BTreeSet<String>,
    oneof_wrappers: BTreeMap<String, OneofWrapper>,
    objects: BTreeMap<String, SchemaObject>,
    endpoints: Vec<ParsedEndpoint>,
    errors: Vec<SchemaError>,
}

impl ParserContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object symbol. Duplicate insertions are deduplicated
    /// silently; the symbol pass carries no error conditions.
    pub fn add_symbol(&mut self, name: impl Into<String>) {
        self.object_symbols.insert(name.into());
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.object_symbols.contains(name)
    }

    /// Registers a oneof wrapper under its fully-qualified name.
    /// First registration wins; a duplicate is recorded and dropped.
    pub fn register_wrapper(&mut self, wrapper: OneofWrapper) {
        if self.oneof_wrappers.contains_key(&wrapper.wrapper_name) {
            self.record_error(SchemaError::DuplicateDeclaration {
                name: wrapper.wrapper_name,
            });
            return;
        }
        debug!("Registered oneof wrapper {}", wrapper.wrapper_name);
        self.oneof_wrappers
            .insert(wrapper.wrapper_name.clone(), wrapper);
    }

    /// Registers a schema object under its fully-qualified name and returns
    /// the name handle. First registration wins; a duplicate is recorded and
    /// dropped, but the handle is still valid (it names the first one).
    pub fn register_object(&mut self, object: SchemaObject) -> ObjectRef {
        let object_ref = object.make_ref();
        if self.objects.contains_key(&object.name) {
            self.record_error(SchemaError::DuplicateDeclaration { name: object.name });
            return object_ref;
        }
        debug!("Registered object {}", object.name);
        self.objects.insert(object.name.clone(), object);
        object_ref
    }

    /// Registers an endpoint, keeping registration order for rendering.
    /// First registration wins; a duplicate name is recorded and dropped.
    pub fn register_endpoint(&mut self, endpoint: ParsedEndpoint) {
        if self.endpoints.iter().any(|e| e.name == endpoint.name) {
            self.record_error(SchemaError::DuplicateDeclaration {
                name: endpoint.name,
            });
            return;
        }
        debug!("Registered endpoint {}", endpoint.name);
        self.endpoints.push(endpoint);
    }

    /// Looks up the schema object behind a name handle.
    pub fn object(&self, object_ref: &ObjectRef) -> Option<&SchemaObject> {
        self.objects.get(&object_ref.name)
    }

    /// Looks up the oneof wrapper behind a name handle.
    pub fn wrapper(&self, oneof_ref: &OneofRef) -> Option<&OneofWrapper> {
        self.oneof_wrappers.get(&oneof_ref.name)
    }

    /// All registered objects, sorted by fully-qualified name.
    pub fn objects(&self) -> impl Iterator<Item = &SchemaObject> {
        self.objects.values()
    }

    /// All registered wrappers, sorted by fully-qualified name.
    pub fn wrappers(&self) -> impl Iterator<Item = &OneofWrapper> {
        self.oneof_wrappers.values()
    }

    /// Registered endpoints in registration order.
    pub fn endpoints(&self) -> &[ParsedEndpoint] {
        &self.endpoints
    }

    pub fn record_error(&mut self, error: SchemaError) {
        debug!("Recorded error: {}", error);
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    /// Resolves a bare type name against the registries.
    ///
    /// Resolution order:
    /// 1. Primitive keywords (`Int`, `String`, `Bool`), namespace-independent.
    /// 2. With a namespace `P`: oneof wrappers, then object symbols, matched
    ///    against `P_name`. On a miss the namespace is widened one trailing
    ///    `_` segment at a time (`A_B_C`, then `A_B`, then `A`), so a
    ///    declaration inside `mod Message` sees its siblings even from a
    ///    deeper scope such as an enum's own name.
    /// 3. Global retry without the namespace: wrappers, then symbols, matched
    ///    against `name`.
    ///
    /// Matching prefers an exact fully-qualified hit; otherwise the longest
    /// registered name ending in `_name` wins (name order breaks length
    /// ties). Nested declarations are registered parent-prefixed while field
    /// references use local names, so suffix matching is what lets an inner
    /// declaration shadow an outer one of the same local name. Two sibling
    /// namespaces declaring the same local name at different depths remain
    /// ambiguous; the longest candidate is chosen deterministically.
    ///
    /// Resolution is a pure read of the registries and therefore idempotent.
    /// `None` means no match anywhere; the caller records the error with its
    /// own declaration context.
    pub fn resolve_type(&self, namespace: Option<&str>, name: &str) -> Option<ValueType> {
        match name {
            "Int" => return Some(ValueType::Number),
            "String" => return Some(ValueType::String),
            "Bool" => return Some(ValueType::Boolean),
            _ => {}
        }

        let mut scope = namespace;
        while let Some(ns) = scope {
            let qualified = format!("{}_{}", ns, name);
            if let Some(found) = match_name(self.oneof_wrappers.keys(), &qualified) {
                return Some(ValueType::Oneof(OneofRef::new(found)));
            }
            if let Some(found) = match_name(self.object_symbols.iter(), &qualified) {
                return Some(ValueType::Object(ObjectRef::new(found)));
            }
            scope = ns.rsplit_once('_').map(|(outer, _)| outer);
        }

        if let Some(found) = match_name(self.oneof_wrappers.keys(), name) {
            return Some(ValueType::Oneof(OneofRef::new(found)));
        }
        if let Some(found) = match_name(self.object_symbols.iter(), name) {
            return Some(ValueType::Object(ObjectRef::new(found)));
        }

        None
    }
}

/// Finds the registered name matching `target`: an exact match wins outright;
/// otherwise the longest name ending in `_target`. Callers iterate sorted
/// sets, so equal-length candidates fall back to name order.
fn match_name<'a>(
    names: impl Iterator<Item = &'a String>,
    target: &str,
) -> Option<String> {
    let suffix = format!("_{}", target);
    let mut best: Option<&'a String> = None;
    for candidate in names {
        if candidate == target {
            return Some(candidate.clone());
        }
        if candidate.ends_with(&suffix) {
            match best {
                Some(current) if candidate.len() <= current.len() => {}
                _ => best = Some(candidate),
            }
        }
    }
    best.cloned()
}

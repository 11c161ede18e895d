//! The resolved schema model.
//!
//! These types are what the extraction passes produce and the renderers
//! consume. Cross-references between objects and oneof wrappers are
//! name-keyed handles ([`ObjectRef`], [`OneofRef`]) looked up through the
//! [`ParserContext`](crate::context::ParserContext), never owned pointers:
//! objects live in the context's registries and a reference graph may
//! legally contain cycles.

use crate::decl::Literal;
use serde::Serialize;

/// A value type in the JSON-shaped payload model.
///
/// `Array` is recursive (array-of-array is representable). `Object` and
/// `Oneof` hold name handles resolved via the context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Unknown,
    String,
    Number,
    Boolean,
    Object(ObjectRef),
    Array(Box<ValueType>),
    Oneof(OneofRef),
}

/// A non-owning, name-only handle to a [`SchemaObject`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ObjectRef {
    pub name: String,
}

impl ObjectRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A non-owning, name-only handle to a [`OneofWrapper`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OneofRef {
    pub name: String,
}

impl OneofRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One schema object per `Object`-conforming record, keyed by its
/// fully-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaObject {
    pub name: String,
    pub comment: String,
    /// Members in source declaration order.
    pub members: Vec<Member>,
}

impl SchemaObject {
    pub fn make_ref(&self) -> ObjectRef {
        ObjectRef::new(&self.name)
    }
}

/// One member per stored field of a schema object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub key: String,
    pub value_type: ValueType,
    /// False exactly when the declared shape is optional or array.
    pub is_required: bool,
    pub default_value: Option<Literal>,
    pub comment: String,
}

/// The resolved representation of a qualifying sum type: its ordered variant
/// list with resolved payload types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OneofWrapper {
    pub wrapper_name: String,
    pub cases: Vec<Case>,
}

/// One variant of a oneof wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Case {
    pub name: String,
    pub value_type: ValueType,
}

/// HTTP methods recognized in endpoint `method` literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Parses a lowercase method literal as written in the DSL.
    pub fn parse(literal: &str) -> Option<Self> {
        match literal {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One parsed API operation per `Endpoint`-conforming record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEndpoint {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub header: ObjectRef,
    pub query: ObjectRef,
    pub body: ObjectRef,
    pub response: ObjectRef,
}

/// Converts a camelCase identifier to snake_case.
///
/// This is the canonical external field-naming rule: rendered member keys and
/// label-less case names both go through it.
pub fn camel_to_snake(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, ch) in input.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

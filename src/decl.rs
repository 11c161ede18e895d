//! The declaration tree consumed by the extraction passes.
//!
//! This is the input contract between the source-language frontend and the
//! schema extractors: a read-only tree of record and sum-type declarations
//! with their nesting, conformed marker names, fields, cases, and leading
//! comments. The extractors never look at syntax — they only see this tree,
//! which also makes each pass testable against hand-built fixtures.

use serde::Serialize;

/// Marker name identifying a record as a schema object.
pub const OBJECT_MARKER: &str = "Object";
/// Marker name identifying a sum type as a tagged union of payloads.
pub const ONEOF_MARKER: &str = "OneOf";
/// Marker name identifying a record as an API operation.
pub const ENDPOINT_MARKER: &str = "Endpoint";

/// A single node of the declaration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Record(RecordDecl),
    SumType(SumTypeDecl),
}

impl Declaration {
    /// The declaration's local (unqualified) name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Record(r) => &r.name,
            Declaration::SumType(s) => &s.name,
        }
    }

    /// Child declarations nested under this one.
    pub fn children(&self) -> &[Declaration] {
        match self {
            Declaration::Record(r) => &r.children,
            Declaration::SumType(s) => &s.children,
        }
    }
}

/// A record declaration: a named compound with an ordered list of typed
/// fields, optionally enclosing further declarations.
///
/// Namespace containers (plain `mod` blocks) lower to records with no
/// conformances and no fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordDecl {
    pub name: String,
    /// Conformed capability names (derive markers and marker attributes).
    pub conformances: Vec<String>,
    /// Stored fields in source order.
    pub fields: Vec<FieldDecl>,
    /// Nested declarations in source order.
    pub children: Vec<Declaration>,
    /// Leading doc-comment text, markers stripped, lines joined by newline.
    pub comment: String,
}

impl RecordDecl {
    pub fn conforms_to(&self, marker: &str) -> bool {
        self.conformances.iter().any(|c| c == marker)
    }
}

/// A sum-type declaration: a fixed set of mutually exclusive variants, each
/// optionally carrying payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SumTypeDecl {
    pub name: String,
    pub conformances: Vec<String>,
    /// Declared cases in source order.
    pub cases: Vec<CaseDecl>,
    pub children: Vec<Declaration>,
    pub comment: String,
}

impl SumTypeDecl {
    pub fn conforms_to(&self, marker: &str) -> bool {
        self.conformances.iter().any(|c| c == marker)
    }
}

/// A stored field of a record.
///
/// Fields without a type shape carry only a default literal; endpoint
/// `method`/`path` properties lower to such annotation-less fields, and the
/// record extractor skips them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldDecl {
    pub name: String,
    pub shape: Option<TypeShape>,
    pub default: Option<Literal>,
    pub comment: String,
}

/// The declared type shape of a field or case payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    /// A bare type name.
    Plain(String),
    /// An optional of a bare type name.
    Optional(String),
    /// An array of a bare type name.
    Array(String),
    /// Anything else (optional array, nested generics, non-path types).
    /// Carries a printable description for error messages.
    Unsupported(String),
}

impl TypeShape {
    /// A printable description for error messages.
    pub fn describe(&self) -> String {
        match self {
            TypeShape::Plain(name) => name.clone(),
            TypeShape::Optional(name) => format!("Option<{}>", name),
            TypeShape::Array(name) => format!("Vec<{}>", name),
            TypeShape::Unsupported(description) => description.clone(),
        }
    }
}

/// One variant of a sum type, with its associated payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseDecl {
    pub name: String,
    pub payloads: Vec<PayloadDecl>,
}

/// A single associated payload of a sum-type case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecl {
    /// The declared parameter label, if any.
    pub label: Option<String>,
    pub shape: TypeShape,
}

/// A literal default value. Only string, integer, and boolean literals are
/// interpreted; any other initializer expression yields no default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Literal::Str(v) => write!(f, "{}", v),
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Bool(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conformance_check() {
        let record = RecordDecl {
            name: "Image".to_string(),
            conformances: vec![OBJECT_MARKER.to_string()],
            ..Default::default()
        };

        assert!(record.conforms_to(OBJECT_MARKER));
        assert!(!record.conforms_to(ENDPOINT_MARKER));
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Str("hello".to_string()).to_string(), "hello");
        assert_eq!(Literal::Int(42).to_string(), "42");
        assert_eq!(Literal::Bool(true).to_string(), "true");
    }
}

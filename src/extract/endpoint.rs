//! Pass 4: endpoint extraction.
//!
//! Registers every `Endpoint`-conforming record as an API operation: the
//! `method` and `path` literal properties plus the four nested records named
//! `Header`, `Query`, `Body`, and `Response`, each resolved as a schema
//! object under the endpoint's namespace. A malformed endpoint (missing
//! property, unknown method, missing nested record) is recorded and skipped.

use super::{object, qualified_name, ExtractionPass};
use crate::context::ParserContext;
use crate::decl::{Declaration, Literal, RecordDecl, ENDPOINT_MARKER};
use crate::error::SchemaError;
use crate::model::{HttpMethod, ParsedEndpoint};
use log::debug;

const NESTED_RECORD_NAMES: [&str; 4] = ["Header", "Query", "Body", "Response"];

pub struct EndpointPass;

impl ExtractionPass for EndpointPass {
    fn name(&self) -> &'static str {
        "endpoints"
    }

    fn run(&self, declarations: &[Declaration], context: &mut ParserContext) {
        for declaration in declarations {
            walk(declaration, None, context);
        }
    }
}

fn walk(declaration: &Declaration, parent: Option<&str>, context: &mut ParserContext) {
    if let Declaration::Record(record) = declaration {
        if record.conforms_to(ENDPOINT_MARKER) {
            extract_endpoint(record, parent, context);
            return;
        }
    }
    let full_name = qualified_name(parent, declaration.name());
    for child in declaration.children() {
        walk(child, Some(&full_name), context);
    }
}

fn extract_endpoint(record: &RecordDecl, parent: Option<&str>, context: &mut ParserContext) {
    let name = qualified_name(parent, &record.name);
    debug!("Extracting endpoint {}", name);

    let Some(method_literal) = literal_property(record, "method") else {
        context.record_error(SchemaError::MissingEndpointProperty {
            endpoint: name,
            property: "method",
        });
        return;
    };
    let method = match method_literal {
        Literal::Str(value) => HttpMethod::parse(value),
        _ => None,
    };
    let Some(method) = method else {
        context.record_error(SchemaError::UnknownHttpMethod {
            endpoint: name,
            method: method_literal.to_string(),
        });
        return;
    };

    let Some(Literal::Str(path)) = literal_property(record, "path") else {
        context.record_error(SchemaError::MissingEndpointProperty {
            endpoint: name,
            property: "path",
        });
        return;
    };
    let path = path.clone();

    // All four must be present; report every one that is missing
    let mut missing = false;
    for expected in NESTED_RECORD_NAMES {
        if nested_record(record, expected).is_none() {
            context.record_error(SchemaError::MissingNestedRecord {
                endpoint: name.clone(),
                expected,
            });
            missing = true;
        }
    }
    if missing {
        return;
    }

    // Presence of all four was checked above
    let mut resolve = |expected: &str| {
        object::extract_record(nested_record(record, expected).unwrap(), Some(name.as_str()), context)
    };
    let header = resolve("Header");
    let query = resolve("Query");
    let body = resolve("Body");
    let response = resolve("Response");

    context.register_endpoint(ParsedEndpoint {
        name,
        method,
        path,
        header,
        query,
        body,
        response,
    });
}

fn literal_property<'a>(record: &'a RecordDecl, key: &str) -> Option<&'a Literal> {
    record
        .fields
        .iter()
        .find(|field| field.name == key)
        .and_then(|field| field.default.as_ref())
}

fn nested_record<'a>(record: &'a RecordDecl, name: &str) -> Option<&'a RecordDecl> {
    record.children.iter().find_map(|child| match child {
        Declaration::Record(nested) if nested.name == name => Some(nested),
        _ => None,
    })
}

//! Pass 3: schema object extraction.
//!
//! Registers every `Object`-conforming record as a schema object with an
//! ordered member list. Nested records are extracted first (bottom-up) under
//! parent-prefixed names, so nested payload shapes are available as named
//! objects in their own right. Field problems — an unsupported type shape or
//! an unresolvable type name — are recorded per field and the field is
//! dropped; the rest of the record still extracts.

use super::{qualified_name, ExtractionPass};
use crate::context::ParserContext;
use crate::decl::{Declaration, RecordDecl, TypeShape, ENDPOINT_MARKER, OBJECT_MARKER};
use crate::error::SchemaError;
use crate::model::{Member, ObjectRef, SchemaObject, ValueType};

pub struct ObjectPass;

impl ExtractionPass for ObjectPass {
    fn name(&self) -> &'static str {
        "objects"
    }

    fn run(&self, declarations: &[Declaration], context: &mut ParserContext) {
        for declaration in declarations {
            walk(declaration, None, context);
        }
    }
}

fn walk(declaration: &Declaration, parent: Option<&str>, context: &mut ParserContext) {
    match declaration {
        Declaration::Record(record) => {
            // Endpoint-nested records are extracted by the endpoint pass
            // under the endpoint's namespace.
            if record.conforms_to(ENDPOINT_MARKER) {
                return;
            }
            if record.conforms_to(OBJECT_MARKER) {
                extract_record(record, parent, context);
            } else {
                let full_name = qualified_name(parent, &record.name);
                for child in &record.children {
                    walk(child, Some(&full_name), context);
                }
            }
        }
        Declaration::SumType(sum_type) => {
            let full_name = qualified_name(parent, &sum_type.name);
            for child in &sum_type.children {
                walk(child, Some(&full_name), context);
            }
        }
    }
}

/// Resolves one record (and everything nested under it) as a schema object
/// registered under `parent`'s namespace, returning the name handle.
///
/// Also the entry point the endpoint pass uses for Header/Query/Body/Response
/// records, with the endpoint's name as parent.
pub fn extract_record(
    record: &RecordDecl,
    parent: Option<&str>,
    context: &mut ParserContext,
) -> ObjectRef {
    let full_name = qualified_name(parent, &record.name);

    // Nested declarations first, bottom-up
    for child in &record.children {
        walk(child, Some(&full_name), context);
    }

    let members = extract_members(record, &full_name, context);

    context.register_object(SchemaObject {
        name: full_name,
        comment: record.comment.clone(),
        members,
    })
}

fn extract_members(
    record: &RecordDecl,
    full_name: &str,
    context: &mut ParserContext,
) -> Vec<Member> {
    let mut members = Vec::new();

    for field in &record.fields {
        // Annotation-less fields carry only a literal (endpoint properties)
        let Some(shape) = &field.shape else {
            continue;
        };

        let (is_required, type_name, wrap_in_array) = match shape {
            TypeShape::Plain(name) => (true, name, false),
            TypeShape::Optional(name) => (false, name, false),
            TypeShape::Array(name) => (false, name, true),
            TypeShape::Unsupported(_) => {
                context.record_error(SchemaError::UnsupportedFieldShape {
                    declaration: full_name.to_string(),
                    field: field.name.clone(),
                    shape: shape.describe(),
                });
                continue;
            }
        };

        let Some(resolved) = context.resolve_type(Some(full_name), type_name) else {
            context.record_error(SchemaError::UnresolvedTypeName {
                declaration: full_name.to_string(),
                field: field.name.clone(),
                type_name: type_name.clone(),
            });
            continue;
        };

        let value_type = if wrap_in_array {
            ValueType::Array(Box::new(resolved))
        } else {
            resolved
        };

        members.push(Member {
            key: field.name.clone(),
            value_type,
            is_required,
            default_value: field.default.clone(),
            comment: field.comment.clone(),
        });
    }

    members
}

//! Markdown rendering of the populated parser context.
//!
//! Rendering is a pure function of the context: endpoints in registration
//! order, each with its four property tables, followed by the related-objects
//! closure of the Body and Response members, sorted by name. Object anchors
//! are keyed by `(endpoint namespace, object name)` so identically-named
//! objects documented under different endpoints do not collide.

use crate::context::ParserContext;
use crate::model::{camel_to_snake, Member, ParsedEndpoint, SchemaObject, ValueType};
use log::warn;
use std::collections::BTreeSet;

const TABLE_HEADER: &str = "|Key|ValueType|Required|Default|Description|";
const TABLE_RULE: &str = "|---|---|---|---|---|";

/// Renders the whole API document.
pub fn render_markdown(context: &ParserContext) -> String {
    let mut out = TextBuilder::new();
    for endpoint in context.endpoints() {
        render_endpoint(&mut out, endpoint, context);
    }
    out.render()
}

/// Line-oriented text accumulator.
struct TextBuilder {
    lines: Vec<String>,
}

impl TextBuilder {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn render(self) -> String {
        self.lines.join("\n")
    }
}

fn render_endpoint(out: &mut TextBuilder, endpoint: &ParsedEndpoint, context: &ParserContext) {
    let namespace = endpoint.name.as_str();

    out.push(format!("## {} : {}", endpoint.method.as_str(), endpoint.name));
    out.blank();
    out.push(format!("**Path** : {}", endpoint.path));
    out.push(format!("**Method** : {}", endpoint.method.as_str()));
    out.blank();

    let sections = [
        ("Header Fields", &endpoint.header),
        ("Query Parameters", &endpoint.query),
        ("Body Parameters", &endpoint.body),
        ("Response Format", &endpoint.response),
    ];
    for (heading, object_ref) in sections {
        out.push(format!("## {}", heading));
        out.blank();
        match context.object(object_ref) {
            Some(object) => property_table(out, &object.members, namespace, context),
            None => {
                warn!("Endpoint {} references unknown object {}", endpoint.name, object_ref.name);
                out.push(format!("_missing object: {}_", object_ref.name));
            }
        }
        out.blank();
        out.push("---");
        out.blank();
    }

    out.push("## Related Objects");
    out.blank();

    let mut related = BTreeSet::new();
    for object_ref in [&endpoint.body, &endpoint.response] {
        if let Some(object) = context.object(object_ref) {
            collect_related(&object.members, context, &mut related);
        }
    }

    for name in &related {
        let Some(object) = context.object(&crate::model::ObjectRef::new(name.clone())) else {
            continue;
        };
        render_object(out, object, namespace, context);
    }
    out.blank();
}

fn render_object(
    out: &mut TextBuilder,
    object: &SchemaObject,
    namespace: &str,
    context: &ParserContext,
) {
    out.push(format!(
        "### {}{} object",
        object_anchor(&object.name, namespace),
        object.name
    ));
    out.blank();
    if object.comment.is_empty() {
        out.push("No description");
    } else {
        out.push(object.comment.clone());
    }
    out.blank();
    property_table(out, &object.members, namespace, context);
    out.blank();
    out.push("---");
    out.blank();
}

fn property_table(
    out: &mut TextBuilder,
    members: &[Member],
    namespace: &str,
    context: &ParserContext,
) {
    out.push(TABLE_HEADER);
    out.push(TABLE_RULE);
    for member in members {
        let default = member
            .default_value
            .as_ref()
            .map(|literal| literal.to_string())
            .unwrap_or_default();
        out.push(format!(
            "|{}|{}|{}|{}|{}|",
            camel_to_snake(&member.key),
            type_description(&member.value_type, namespace, context),
            member.is_required,
            default,
            member.comment.replace('\n', " "),
        ));
    }
}

/// The human-readable description of a value type, with object references
/// rendered as links into the Related Objects section.
fn type_description(value_type: &ValueType, namespace: &str, context: &ParserContext) -> String {
    match value_type {
        ValueType::Unknown => "Unknown".to_string(),
        ValueType::String => "string".to_string(),
        ValueType::Number => "number".to_string(),
        ValueType::Boolean => "boolean".to_string(),
        ValueType::Object(object_ref) => {
            format!("{} object", object_link(&object_ref.name, namespace))
        }
        ValueType::Array(inner) => {
            format!("array of {}", type_description(inner, namespace, context))
        }
        ValueType::Oneof(oneof_ref) => match context.wrapper(oneof_ref) {
            Some(wrapper) => {
                let cases: Vec<String> = wrapper
                    .cases
                    .iter()
                    .map(|case| type_description(&case.value_type, namespace, context))
                    .collect();
                format!("one of {}", cases.join(", "))
            }
            None => {
                warn!("Unknown oneof wrapper reference: {}", oneof_ref.name);
                "Unknown".to_string()
            }
        },
    }
}

fn object_link(name: &str, namespace: &str) -> String {
    format!("[{}](#_{}_{})", name, namespace, name)
}

fn object_anchor(name: &str, namespace: &str) -> String {
    format!("<span id=\"_{}_{}\"></span>", namespace, name)
}

/// Collects the transitive set of object names reachable from the given
/// members by following object, array, and oneof references.
///
/// Cycle-safe: an object already in the set is never expanded again, so a
/// mutually referential payload graph terminates.
pub fn collect_related(
    members: &[Member],
    context: &ParserContext,
    collected: &mut BTreeSet<String>,
) {
    for member in members {
        collect_value_type(&member.value_type, context, collected);
    }
}

fn collect_value_type(
    value_type: &ValueType,
    context: &ParserContext,
    collected: &mut BTreeSet<String>,
) {
    match value_type {
        ValueType::Unknown | ValueType::String | ValueType::Number | ValueType::Boolean => {}
        ValueType::Object(object_ref) => {
            if !collected.insert(object_ref.name.clone()) {
                return;
            }
            match context.object(object_ref) {
                Some(object) => collect_related(&object.members, context, collected),
                None => warn!("Unknown object reference: {}", object_ref.name),
            }
        }
        ValueType::Array(inner) => collect_value_type(inner, context, collected),
        ValueType::Oneof(oneof_ref) => {
            if let Some(wrapper) = context.wrapper(oneof_ref) {
                for case in &wrapper.cases {
                    collect_value_type(&case.value_type, context, collected);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, ObjectRef, SchemaObject};

    fn object_with_refs(name: &str, refs: &[&str]) -> SchemaObject {
        SchemaObject {
            name: name.to_string(),
            comment: String::new(),
            members: refs
                .iter()
                .map(|target| Member {
                    key: format!("ref_{}", target.to_lowercase()),
                    value_type: ValueType::Object(ObjectRef::new(*target)),
                    is_required: true,
                    default_value: None,
                    comment: String::new(),
                })
                .collect(),
        }
    }

    fn string_member(key: &str, required: bool) -> Member {
        Member {
            key: key.to_string(),
            value_type: ValueType::String,
            is_required: required,
            default_value: None,
            comment: String::new(),
        }
    }

    #[test]
    fn test_closure_terminates_on_cycle() {
        let mut context = ParserContext::new();
        context.register_object(object_with_refs("A", &["B"]));
        context.register_object(object_with_refs("B", &["A"]));

        let start = context.object(&ObjectRef::new("A")).unwrap().members.clone();
        let mut collected = BTreeSet::new();
        collect_related(&start, &context, &mut collected);

        let names: Vec<_> = collected.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_closure_is_a_fixed_point() {
        let mut context = ParserContext::new();
        context.register_object(object_with_refs("A", &["B"]));
        context.register_object(object_with_refs("B", &["C"]));
        context.register_object(object_with_refs("C", &[]));

        let start = context.object(&ObjectRef::new("A")).unwrap().members.clone();
        let mut first = BTreeSet::new();
        collect_related(&start, &context, &mut first);

        // Re-running over the closure's own members adds nothing new
        let mut second = first.clone();
        for name in &first {
            let object = context.object(&ObjectRef::new(name.clone())).unwrap();
            collect_related(&object.members.clone(), &context, &mut second);
        }
        assert_eq!(first, second);
    }

    #[test]
    fn test_closure_follows_arrays_and_oneofs() {
        use crate::model::{Case, OneofRef, OneofWrapper};

        let mut context = ParserContext::new();
        context.register_object(object_with_refs("Image", &[]));
        context.register_object(object_with_refs("PlainText", &[]));
        context.register_wrapper(OneofWrapper {
            wrapper_name: "Body".to_string(),
            cases: vec![
                Case {
                    name: "text".to_string(),
                    value_type: ValueType::Object(ObjectRef::new("PlainText")),
                },
                Case {
                    name: "image".to_string(),
                    value_type: ValueType::Object(ObjectRef::new("Image")),
                },
            ],
        });

        let members = vec![Member {
            key: "bodies".to_string(),
            value_type: ValueType::Array(Box::new(ValueType::Oneof(OneofRef::new("Body")))),
            is_required: false,
            default_value: None,
            comment: String::new(),
        }];

        let mut collected = BTreeSet::new();
        collect_related(&members, &context, &mut collected);

        let names: Vec<_> = collected.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Image", "PlainText"]);
    }

    #[test]
    fn test_required_column_round_trip() {
        let context = ParserContext::new();
        let members = vec![
            string_member("alwaysThere", true),
            string_member("sometimesThere", false),
            string_member("alsoThere", true),
        ];

        let mut out = TextBuilder::new();
        property_table(&mut out, &members, "Test", &context);
        let table = out.render();

        // Re-parse the Required column out of the rendered rows
        let parsed: Vec<bool> = table
            .lines()
            .skip(2)
            .map(|row| {
                let cells: Vec<_> = row.split('|').collect();
                cells[3].parse::<bool>().unwrap()
            })
            .collect();
        let original: Vec<bool> = members.iter().map(|m| m.is_required).collect();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_member_keys_rendered_snake_case() {
        let context = ParserContext::new();
        let members = vec![string_member("updatedAt", true)];

        let mut out = TextBuilder::new();
        property_table(&mut out, &members, "Test", &context);

        assert!(out.render().contains("|updated_at|"));
    }

    #[test]
    fn test_type_descriptions() {
        use crate::model::{Case, OneofRef, OneofWrapper};

        let mut context = ParserContext::new();
        context.register_wrapper(OneofWrapper {
            wrapper_name: "Body".to_string(),
            cases: vec![
                Case {
                    name: "text".to_string(),
                    value_type: ValueType::String,
                },
                Case {
                    name: "image".to_string(),
                    value_type: ValueType::Object(ObjectRef::new("Image")),
                },
            ],
        });

        assert_eq!(type_description(&ValueType::Number, "NS", &context), "number");
        assert_eq!(
            type_description(
                &ValueType::Array(Box::new(ValueType::String)),
                "NS",
                &context
            ),
            "array of string"
        );
        assert_eq!(
            type_description(
                &ValueType::Object(ObjectRef::new("Image")),
                "NS",
                &context
            ),
            "[Image](#_NS_Image) object"
        );
        assert_eq!(
            type_description(&ValueType::Oneof(OneofRef::new("Body")), "NS", &context),
            "one of string, [Image](#_NS_Image) object"
        );
    }

    #[test]
    fn test_anchor_namespacing_keeps_same_names_apart() {
        assert_ne!(object_anchor("Image", "ListMessages"), object_anchor("Image", "SendMessage"));
    }
}

//! Pass 2: oneof wrapper extraction.
//!
//! Registers every `OneOf`-conforming sum type whose cases all carry exactly
//! one payload. A sum type where any case has zero or several payloads is an
//! ordinary, undocumented enum by convention and is skipped without error.
//! Case payloads resolve against the symbol table and previously registered
//! wrappers, so wrapper-to-wrapper references are source-order sensitive.

use super::{qualified_name, ExtractionPass};
use crate::context::ParserContext;
use crate::decl::{Declaration, SumTypeDecl, TypeShape, ONEOF_MARKER};
use crate::error::SchemaError;
use crate::model::{camel_to_snake, Case, OneofWrapper};
use log::debug;

pub struct OneofPass;

impl ExtractionPass for OneofPass {
    fn name(&self) -> &'static str {
        "oneof"
    }

    fn run(&self, declarations: &[Declaration], context: &mut ParserContext) {
        for declaration in declarations {
            walk(declaration, None, context);
        }
    }
}

fn walk(declaration: &Declaration, parent: Option<&str>, context: &mut ParserContext) {
    let full_name = qualified_name(parent, declaration.name());
    if let Declaration::SumType(sum_type) = declaration {
        if sum_type.conforms_to(ONEOF_MARKER) {
            extract_sum_type(sum_type, &full_name, context);
        }
    }
    for child in declaration.children() {
        walk(child, Some(&full_name), context);
    }
}

fn extract_sum_type(sum_type: &SumTypeDecl, full_name: &str, context: &mut ParserContext) {
    let mut cases = Vec::with_capacity(sum_type.cases.len());

    for case in &sum_type.cases {
        if case.payloads.len() != 1 {
            debug!(
                "Skipping sum type {}: case {} has {} payloads",
                full_name,
                case.name,
                case.payloads.len()
            );
            return;
        }
        let payload = &case.payloads[0];

        let type_name = match &payload.shape {
            TypeShape::Plain(name) => name,
            other => {
                context.record_error(SchemaError::UnsupportedFieldShape {
                    declaration: full_name.to_string(),
                    field: case.name.clone(),
                    shape: other.describe(),
                });
                return;
            }
        };

        let Some(value_type) = context.resolve_type(Some(full_name), type_name) else {
            context.record_error(SchemaError::UnresolvedTypeName {
                declaration: full_name.to_string(),
                field: case.name.clone(),
                type_name: type_name.clone(),
            });
            return;
        };

        let name = payload
            .label
            .clone()
            .unwrap_or_else(|| camel_to_snake(&case.name));
        cases.push(Case { name, value_type });
    }

    context.register_wrapper(OneofWrapper {
        wrapper_name: full_name.to_string(),
        cases,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::symbols::SymbolPass;
    use crate::lower::lower_file;
    use crate::model::{ObjectRef, OneofRef, ValueType};

    fn context_from_source(code: &str) -> ParserContext {
        let file = syn::parse_file(code).unwrap();
        let tree = lower_file(&file);
        let mut context = ParserContext::new();
        SymbolPass.run(&tree, &mut context);
        OneofPass.run(&tree, &mut context);
        context
    }

    #[test]
    fn test_two_case_wrapper() {
        let context = context_from_source(
            r#"
            #[derive(Object)]
            pub struct PlainText { pub text: String }
            #[derive(Object)]
            pub struct Image { pub url: String }

            #[derive(OneOf)]
            pub enum Body {
                Text(PlainText),
                Image(Image),
            }
        "#,
        );

        let wrapper = context.wrapper(&OneofRef::new("Body")).unwrap();
        assert_eq!(wrapper.cases.len(), 2);
        assert_eq!(wrapper.cases[0].name, "text");
        assert_eq!(
            wrapper.cases[0].value_type,
            ValueType::Object(ObjectRef::new("PlainText"))
        );
        assert_eq!(wrapper.cases[1].name, "image");
        assert_eq!(
            wrapper.cases[1].value_type,
            ValueType::Object(ObjectRef::new("Image"))
        );
        assert!(context.errors().is_empty());
    }

    #[test]
    fn test_payload_label_wins_over_case_name() {
        let context = context_from_source(
            r#"
            #[derive(Object)]
            pub struct PlainText { pub text: String }

            #[derive(OneOf)]
            pub enum Body {
                Text { body_text: PlainText },
            }
        "#,
        );

        let wrapper = context.wrapper(&OneofRef::new("Body")).unwrap();
        assert_eq!(wrapper.cases[0].name, "body_text");
    }

    #[test]
    fn test_unit_case_disqualifies_whole_sum_type() {
        let context = context_from_source(
            r#"
            #[derive(Object)]
            pub struct PlainText { pub text: String }

            #[derive(OneOf)]
            pub enum Body {
                Text(PlainText),
                Empty,
            }
        "#,
        );

        assert!(context.wrapper(&OneofRef::new("Body")).is_none());
        // Deliberate convention, not a failure
        assert!(context.errors().is_empty());
    }

    #[test]
    fn test_multi_payload_case_disqualifies_whole_sum_type() {
        let context = context_from_source(
            r#"
            #[derive(Object)]
            pub struct PlainText { pub text: String }

            #[derive(OneOf)]
            pub enum Body {
                Text(PlainText, PlainText),
            }
        "#,
        );

        assert!(context.wrapper(&OneofRef::new("Body")).is_none());
        assert!(context.errors().is_empty());
    }

    #[test]
    fn test_non_oneof_enum_ignored() {
        let context = context_from_source(
            r#"
            #[derive(Object)]
            pub struct PlainText { pub text: String }

            pub enum Body {
                Text(PlainText),
            }
        "#,
        );

        assert!(context.wrapper(&OneofRef::new("Body")).is_none());
    }

    #[test]
    fn test_primitive_payload() {
        let context = context_from_source(
            r#"
            #[derive(OneOf)]
            pub enum Value {
                Count(Int),
                Label(String),
            }
        "#,
        );

        let wrapper = context.wrapper(&OneofRef::new("Value")).unwrap();
        assert_eq!(wrapper.cases[0].value_type, ValueType::Number);
        assert_eq!(wrapper.cases[1].value_type, ValueType::String);
    }

    #[test]
    fn test_unresolved_payload_recorded_and_skipped() {
        let context = context_from_source(
            r#"
            #[derive(OneOf)]
            pub enum Body {
                Text(Mystery),
            }
        "#,
        );

        assert!(context.wrapper(&OneofRef::new("Body")).is_none());
        assert_eq!(
            context.errors(),
            &[SchemaError::UnresolvedTypeName {
                declaration: "Body".to_string(),
                field: "Text".to_string(),
                type_name: "Mystery".to_string(),
            }]
        );
    }

    #[test]
    fn test_forward_reference_to_object() {
        // The symbol table is complete before this pass, so a case may
        // reference an object declared later in the source.
        let context = context_from_source(
            r#"
            #[derive(OneOf)]
            pub enum Body {
                Image(Image),
            }

            #[derive(Object)]
            pub struct Image { pub url: String }
        "#,
        );

        let wrapper = context.wrapper(&OneofRef::new("Body")).unwrap();
        assert_eq!(
            wrapper.cases[0].value_type,
            ValueType::Object(ObjectRef::new("Image"))
        );
    }

    #[test]
    fn test_case_payload_sees_enclosing_namespace() {
        // A case inside mod Message resolves Image to the sibling
        // Message_Image, not the top-level Image of the same local name.
        let context = context_from_source(
            r#"
            #[derive(Object)]
            pub struct Image { pub url: String }

            pub mod Message {
                #[derive(Object)]
                pub struct Image { pub thumbnail_url: String }

                #[derive(OneOf)]
                pub enum Body {
                    Picture(Image),
                }
            }
        "#,
        );

        let wrapper = context.wrapper(&OneofRef::new("Message_Body")).unwrap();
        assert_eq!(
            wrapper.cases[0].value_type,
            ValueType::Object(ObjectRef::new("Message_Image"))
        );
        assert!(context.errors().is_empty());
    }

    #[test]
    fn test_nested_wrapper_namespaced() {
        let context = context_from_source(
            r#"
            #[derive(Object)]
            pub struct PlainText { pub text: String }

            pub mod Message {
                #[derive(OneOf)]
                pub enum Body {
                    Text(PlainText),
                }
            }
        "#,
        );

        assert!(context.wrapper(&OneofRef::new("Message_Body")).is_some());
        assert!(context.wrapper(&OneofRef::new("Body")).is_none());
    }
}

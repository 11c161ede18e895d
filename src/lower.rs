//! Lowers a parsed syntax tree into the declaration tree.
//!
//! This is where the DSL conventions live: derive lists are conformance
//! lists, `mod` blocks are nesting scopes, `#[endpoint(method, path)]` marks
//! an API operation, `#[schema(default = ...)]` carries a field's default
//! literal, and `///` doc comments carry descriptions. Everything downstream
//! of this module is syntax-free.

use crate::decl::{
    CaseDecl, Declaration, FieldDecl, Literal, PayloadDecl, RecordDecl, SumTypeDecl,
    TypeShape, ENDPOINT_MARKER,
};
use log::warn;

/// Lowers a whole source file into top-level declarations.
pub fn lower_file(file: &syn::File) -> Vec<Declaration> {
    lower_items(&file.items)
}

fn lower_items(items: &[syn::Item]) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for item in items {
        match item {
            syn::Item::Struct(item_struct) => declarations.push(lower_struct(item_struct)),
            syn::Item::Enum(item_enum) => declarations.push(lower_enum(item_enum)),
            syn::Item::Mod(item_mod) => {
                if let Some(declaration) = lower_mod(item_mod) {
                    declarations.push(declaration);
                }
            }
            _ => {}
        }
    }
    declarations
}

fn lower_struct(item: &syn::ItemStruct) -> Declaration {
    Declaration::Record(RecordDecl {
        name: item.ident.to_string(),
        conformances: derive_markers(&item.attrs),
        fields: lower_fields(&item.fields),
        children: Vec::new(),
        comment: doc_comment(&item.attrs),
    })
}

fn lower_enum(item: &syn::ItemEnum) -> Declaration {
    Declaration::SumType(SumTypeDecl {
        name: item.ident.to_string(),
        conformances: derive_markers(&item.attrs),
        cases: item.variants.iter().map(lower_variant).collect(),
        children: Vec::new(),
        comment: doc_comment(&item.attrs),
    })
}

/// Modules are nesting scopes. A plain `mod` lowers to a record with no
/// conformances; a `mod` carrying `#[endpoint(...)]` lowers to an
/// Endpoint-conforming record whose `method`/`path` properties become
/// annotation-less fields with default literals.
fn lower_mod(item: &syn::ItemMod) -> Option<Declaration> {
    let (_, items) = item.content.as_ref()?;

    let mut conformances = derive_markers(&item.attrs);
    let mut fields = Vec::new();
    if let Some(endpoint_fields) = endpoint_attribute(&item.attrs) {
        conformances.push(ENDPOINT_MARKER.to_string());
        fields = endpoint_fields;
    }

    Some(Declaration::Record(RecordDecl {
        name: item.ident.to_string(),
        conformances,
        fields,
        children: lower_items(items),
        comment: doc_comment(&item.attrs),
    }))
}

fn lower_fields(fields: &syn::Fields) -> Vec<FieldDecl> {
    let syn::Fields::Named(named) = fields else {
        return Vec::new();
    };
    named
        .named
        .iter()
        .filter_map(|field| {
            let name = field.ident.as_ref()?.to_string();
            Some(FieldDecl {
                name,
                shape: Some(type_shape(&field.ty)),
                default: schema_default(&field.attrs),
                comment: doc_comment(&field.attrs),
            })
        })
        .collect()
}

fn lower_variant(variant: &syn::Variant) -> CaseDecl {
    let payloads = match &variant.fields {
        syn::Fields::Unit => Vec::new(),
        syn::Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .map(|field| PayloadDecl {
                label: None,
                shape: type_shape(&field.ty),
            })
            .collect(),
        syn::Fields::Named(named) => named
            .named
            .iter()
            .map(|field| PayloadDecl {
                label: field.ident.as_ref().map(|ident| ident.to_string()),
                shape: type_shape(&field.ty),
            })
            .collect(),
    };
    CaseDecl {
        name: variant.ident.to_string(),
        payloads,
    }
}

/// Collects the idents of every `#[derive(...)]` entry as conformance names.
fn derive_markers(attrs: &[syn::Attribute]) -> Vec<String> {
    let mut markers = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }
        let parsed = attr.parse_args_with(
            syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
        );
        match parsed {
            Ok(paths) => {
                for path in &paths {
                    if let Some(segment) = path.segments.last() {
                        markers.push(segment.ident.to_string());
                    }
                }
            }
            Err(e) => warn!("Ignoring malformed derive attribute: {}", e),
        }
    }
    markers
}

/// Joins the `///` doc-comment lines, stripping the single leading space
/// the doc syntax conventionally carries.
fn doc_comment(attrs: &[syn::Attribute]) -> String {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            let syn::Meta::NameValue(name_value) = &attr.meta else {
                return None;
            };
            let syn::Expr::Lit(expr_lit) = &name_value.value else {
                return None;
            };
            let syn::Lit::Str(lit_str) = &expr_lit.lit else {
                return None;
            };
            let line = lit_str.value();
            Some(line.strip_prefix(' ').unwrap_or(&line).to_string())
        })
        .collect();
    lines.join("\n")
}

/// Reads `#[schema(default = <literal>)]` from a field's attributes.
/// A non-literal value yields no default.
fn schema_default(attrs: &[syn::Attribute]) -> Option<Literal> {
    let mut found = None;
    for attr in attrs {
        if !attr.path().is_ident("schema") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                let lit: syn::Lit = meta.value()?.parse()?;
                found = lit_to_literal(&lit);
            } else if meta.input.peek(syn::Token![=]) {
                // Consume values of unrelated keys so parsing continues
                let _: syn::Expr = meta.value()?.parse()?;
            }
            Ok(())
        });
    }
    found
}

/// Reads `#[endpoint(method = "...", path = "...")]`, returning each
/// name-value pair as an annotation-less field with a default literal.
fn endpoint_attribute(attrs: &[syn::Attribute]) -> Option<Vec<FieldDecl>> {
    for attr in attrs {
        if !attr.path().is_ident("endpoint") {
            continue;
        }
        let mut fields = Vec::new();
        let parsed = attr.parse_nested_meta(|meta| {
            let name = meta
                .path
                .get_ident()
                .map(|ident| ident.to_string())
                .unwrap_or_default();
            let lit: syn::Lit = meta.value()?.parse()?;
            if let Some(literal) = lit_to_literal(&lit) {
                fields.push(FieldDecl {
                    name,
                    shape: None,
                    default: Some(literal),
                    comment: String::new(),
                });
            }
            Ok(())
        });
        if let Err(e) = parsed {
            warn!("Malformed #[endpoint] attribute: {}", e);
        }
        // Present even when malformed: the endpoint extractor reports the
        // missing properties with the endpoint's name attached.
        return Some(fields);
    }
    None
}

fn lit_to_literal(lit: &syn::Lit) -> Option<Literal> {
    match lit {
        syn::Lit::Str(lit_str) => Some(Literal::Str(lit_str.value())),
        syn::Lit::Int(lit_int) => lit_int.base10_parse::<i64>().ok().map(Literal::Int),
        syn::Lit::Bool(lit_bool) => Some(Literal::Bool(lit_bool.value)),
        _ => None,
    }
}

/// Classifies a declared type as one of the supported shapes.
fn type_shape(ty: &syn::Type) -> TypeShape {
    let syn::Type::Path(type_path) = ty else {
        return TypeShape::Unsupported(describe_type(ty));
    };
    let Some(segment) = type_path.path.segments.last() else {
        return TypeShape::Unsupported(describe_type(ty));
    };
    let name = segment.ident.to_string();
    match &segment.arguments {
        syn::PathArguments::None => TypeShape::Plain(name),
        syn::PathArguments::AngleBracketed(args) if name == "Option" || name == "Vec" => {
            match single_type_argument(args).map(type_shape) {
                Some(TypeShape::Plain(inner_name)) if name == "Option" => {
                    TypeShape::Optional(inner_name)
                }
                Some(TypeShape::Plain(inner_name)) => TypeShape::Array(inner_name),
                _ => TypeShape::Unsupported(describe_type(ty)),
            }
        }
        _ => TypeShape::Unsupported(describe_type(ty)),
    }
}

fn single_type_argument(args: &syn::AngleBracketedGenericArguments) -> Option<&syn::Type> {
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first() {
        Some(syn::GenericArgument::Type(ty)) => Some(ty),
        _ => None,
    }
}

fn describe_type(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| {
                let name = segment.ident.to_string();
                match &segment.arguments {
                    syn::PathArguments::None => name,
                    syn::PathArguments::AngleBracketed(args) => {
                        let inner: Vec<String> = args
                            .args
                            .iter()
                            .map(|arg| match arg {
                                syn::GenericArgument::Type(t) => describe_type(t),
                                _ => "_".to_string(),
                            })
                            .collect();
                        format!("{}<{}>", name, inner.join(", "))
                    }
                    syn::PathArguments::Parenthesized(_) => format!("{}(..)", name),
                }
            })
            .unwrap_or_else(|| "<empty path>".to_string()),
        syn::Type::Reference(_) => "<reference type>".to_string(),
        _ => "<non-path type>".to_string(),
    }
}

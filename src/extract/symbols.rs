//! Pass 1: symbol table construction.
//!
//! Registers the fully-qualified name of every `Object`-conforming record
//! before any type resolution happens, so later passes can recognize forward
//! references instead of falling back to "unknown object". Endpoint-nested
//! records are included, registered under the endpoint's namespace, so they
//! can be referenced like any other object. No field resolution occurs here
//! and no errors are possible; duplicate insertions are set-deduplicated.

use super::{qualified_name, ExtractionPass};
use crate::context::ParserContext;
use crate::decl::{Declaration, OBJECT_MARKER};
use log::debug;

pub struct SymbolPass;

impl ExtractionPass for SymbolPass {
    fn name(&self) -> &'static str {
        "symbols"
    }

    fn run(&self, declarations: &[Declaration], context: &mut ParserContext) {
        for declaration in declarations {
            collect(declaration, None, context);
        }
    }
}

fn collect(declaration: &Declaration, parent: Option<&str>, context: &mut ParserContext) {
    match declaration {
        Declaration::Record(record) => {
            let full_name = qualified_name(parent, &record.name);
            if record.conforms_to(OBJECT_MARKER) {
                debug!("Collected object symbol {}", full_name);
                context.add_symbol(&full_name);
            }
            for child in &record.children {
                collect(child, Some(&full_name), context);
            }
        }
        Declaration::SumType(sum_type) => {
            let full_name = qualified_name(parent, &sum_type.name);
            for child in &sum_type.children {
                collect(child, Some(&full_name), context);
            }
        }
    }
}

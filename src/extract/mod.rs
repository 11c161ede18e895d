//! The extraction passes that populate a [`ParserContext`] from a
//! declaration tree.
//!
//! Control flow is strictly sequential: symbols, then oneof wrappers, then
//! objects, then endpoints. Later passes depend on the name sets populated
//! by earlier ones, so the order is part of the contract.

pub mod endpoint;
pub mod object;
pub mod oneof;
pub mod symbols;

use crate::context::ParserContext;
use crate::decl::Declaration;
use log::debug;

/// A single extraction pass over the whole declaration tree.
///
/// Passes record their problems in the context's error list and keep going;
/// running a pass never aborts the run.
pub trait ExtractionPass {
    /// Pass name for logging.
    fn name(&self) -> &'static str;

    /// Walks the tree once, mutating the context.
    fn run(&self, declarations: &[Declaration], context: &mut ParserContext);
}

/// Runs all four passes in their required order.
pub fn run_passes(declarations: &[Declaration], context: &mut ParserContext) {
    let passes: [&dyn ExtractionPass; 4] = [
        &symbols::SymbolPass,
        &oneof::OneofPass,
        &object::ObjectPass,
        &endpoint::EndpointPass,
    ];
    for pass in passes {
        debug!("Running pass: {}", pass.name());
        pass.run(declarations, context);
    }
}

/// Joins a parent namespace and a local name into a fully-qualified name.
pub(crate) fn qualified_name(parent: Option<&str>, name: &str) -> String {
    match parent {
        Some(parent) => format!("{}_{}", parent, name),
        None => name.to_string(),
    }
}

//! Serialization of the resolved schema model to YAML or JSON.
//!
//! The Markdown renderer is the primary output, but the full resolved model
//! can also be exported as structured data for tooling to consume.

use crate::context::ParserContext;
use crate::model::{OneofWrapper, ParsedEndpoint, SchemaObject};
use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// The complete resolved schema: every endpoint plus every registered object
/// and oneof wrapper, so name-keyed references in the members can be followed.
#[derive(Debug, Serialize)]
pub struct SchemaDocument<'a> {
    pub endpoints: &'a [ParsedEndpoint],
    pub objects: Vec<&'a SchemaObject>,
    pub oneofs: Vec<&'a OneofWrapper>,
}

impl<'a> SchemaDocument<'a> {
    pub fn from_context(context: &'a ParserContext) -> Self {
        Self {
            endpoints: context.endpoints(),
            objects: context.objects().collect(),
            oneofs: context.wrappers().collect(),
        }
    }
}

/// Serializes a schema document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &SchemaDocument) -> Result<String> {
    debug!("Serializing schema document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize schema document to YAML")
}

/// Serializes a schema document to JSON with pretty printing.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &SchemaDocument) -> Result<String> {
    debug!("Serializing schema document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize schema document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

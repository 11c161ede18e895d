//! API Doc Generator - Endpoint documentation from schema declaration files.
//!
//! This library turns a single schema declaration file into API documentation.
//! Schema files use Rust declaration syntax: `#[derive(Object)]` structs are
//! record objects, `#[derive(OneOf)]` enums are tagged unions, and `mod` blocks
//! annotated with `#[endpoint(...)]` group the Header, Query, Body, and Response
//! records of one HTTP endpoint. Plain `mod` blocks act as namespaces; enclosing
//! declarations prefix the names of everything inside them.
//!
//! # Architecture
//!
//! The library is organized as a sequential pipeline:
//!
//! 1. [`parser`] - Parses the schema file into an Abstract Syntax Tree (AST)
//! 2. [`lower`] - Lowers the AST into declaration trees
//! 3. [`extract`] - Runs the extraction passes: symbols, oneofs, objects, endpoints
//! 4. [`context`] - Accumulates the resolved schema model and recorded problems
//! 5. [`render`] - Renders the model as a Markdown document
//! 6. [`serialize`] - Serializes the model to JSON or YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use apidoc_from_source::{
//!     context::ParserContext,
//!     extract::run_passes,
//!     lower::lower_file,
//!     parser::AstParser,
//!     render::render_markdown,
//! };
//! use std::path::Path;
//!
//! // Parse and lower the schema file
//! let parsed = AstParser::parse_file(Path::new("./schema.rs")).unwrap();
//! let declarations = lower_file(&parsed.syntax_tree);
//!
//! // Run the extraction passes
//! let mut context = ParserContext::new();
//! run_passes(&declarations, &mut context);
//!
//! // Render the documentation
//! let markdown = render_markdown(&context);
//! println!("{}", markdown);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod context;
pub mod decl;
pub mod error;
pub mod extract;
pub mod lower;
pub mod model;
pub mod parser;
pub mod render;
pub mod serialize;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use std::path::PathBuf;

/// API Doc Generator - Generate endpoint documentation from schema declaration files
#[derive(Parser, Debug)]
#[command(name = "apidoc-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the schema declaration file
    #[arg(value_name = "SCHEMA_FILE")]
    pub schema_path: PathBuf,

    /// Output format (markdown, json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "markdown")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Markdown document
    Markdown,
    /// JSON dump of the resolved schema
    Json,
    /// YAML dump of the resolved schema
    Yaml,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.schema_path.exists() {
        anyhow::bail!("Schema file does not exist: {}", args.schema_path.display());
    }

    if !args.schema_path.is_file() {
        anyhow::bail!("Schema path is not a file: {}", args.schema_path.display());
    }

    info!("Schema file: {}", args.schema_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::context::ParserContext;
    use crate::extract::run_passes;
    use crate::lower::lower_file;
    use crate::parser::AstParser;
    use crate::render::render_markdown;
    use crate::serialize::{serialize_json, serialize_yaml, write_to_file, SchemaDocument};

    info!("Starting API documentation generation...");
    info!("Schema file: {}", args.schema_path.display());

    // Step 1: Parse the schema file into an AST
    info!("Parsing schema file...");
    let parsed = AstParser::parse_file(&args.schema_path)?;

    // Step 2: Lower the AST into declaration trees
    let declarations = lower_file(&parsed.syntax_tree);
    info!("Found {} top-level declarations", declarations.len());

    // Step 3: Run the extraction passes in order
    info!("Extracting schema model...");
    let mut context = ParserContext::new();
    run_passes(&declarations, &mut context);

    info!("Extracted {} endpoints", context.endpoints().len());
    if context.endpoints().is_empty() {
        warn!("No endpoints found in the schema file");
    }

    if !context.errors().is_empty() {
        warn!("Encountered {} schema problems:", context.errors().len());
        for error in context.errors() {
            warn!("  - {}", error);
        }
    }

    // Step 4: Render to the requested format
    info!("Rendering {:?} output...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Markdown => render_markdown(&context),
        OutputFormat::Json => serialize_json(&SchemaDocument::from_context(&context))?,
        OutputFormat::Yaml => serialize_yaml(&SchemaDocument::from_context(&context))?,
    };

    // Step 5: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Successfully wrote documentation to {}", output_path.display());
    } else {
        // Markdown gets a banner line so the document is visually separated
        // from any preceding log output; data formats stay machine-readable
        if matches!(args.output_format, OutputFormat::Markdown) {
            println!("Result");
            println!();
        }
        println!("{}", content);
    }

    // Step 6: Display summary
    info!("Generation complete!");
    info!("Summary:");
    info!("  - Endpoints: {}", context.endpoints().len());
    info!("  - Objects: {}", context.objects().count());
    info!("  - Oneof wrappers: {}", context.wrappers().count());
    info!("  - Problems: {}", context.errors().len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args_for(path: PathBuf) -> CliArgs {
        CliArgs {
            schema_path: path,
            output_format: OutputFormat::Markdown,
            output_path: None,
            verbose: false,
        }
    }

    #[test]
    fn test_validation_rejects_missing_file() {
        let result = parse_args_from_parsed(args_for(PathBuf::from("/nonexistent/schema.rs")));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = parse_args_from_parsed(args_for(temp_dir.path().to_path_buf()));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_accepts_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("schema.rs");
        fs::write(&path, "struct Empty {}").unwrap();

        let result = parse_args_from_parsed(args_for(path));
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let schema_path = temp_dir.path().join("schema.rs");
        fs::write(
            &schema_path,
            r#"
            #[endpoint(method = "get", path = "/v1/ping")]
            mod Ping {
                #[derive(Object)]
                struct Header {}
                #[derive(Object)]
                struct Query {}
                #[derive(Object)]
                struct Body {}
                #[derive(Object)]
                struct Response {
                    pong: Bool,
                }
            }
            "#,
        )
        .unwrap();

        let output_path = temp_dir.path().join("out.md");
        let mut args = args_for(schema_path);
        args.output_path = Some(output_path.clone());
        run(args).unwrap();

        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("## GET : Ping"));
        assert!(content.contains("**Path** : /v1/ping"));
    }
}

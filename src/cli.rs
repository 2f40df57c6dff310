use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Generate API documentation metadata from annotated Rust controller sources
#[derive(Parser, Debug)]
#[command(name = "apidoc-from-source")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the project directory containing annotated controllers
    #[arg(value_name = "PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Output format (yaml or json)
    #[arg(short = 'f', long = "format", value_enum, default_value = "yaml")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// API version recorded in the generated documentation
    #[arg(long = "api-version", default_value = "1.0")]
    pub api_version: String,

    /// Base path recorded in the generated documentation
    #[arg(long = "base-path", default_value = "/")]
    pub base_path: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    Yaml,
    /// JSON format
    Json,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.project_path.exists() {
        anyhow::bail!(
            "Project path does not exist: {}",
            args.project_path.display()
        );
    }
    if !args.project_path.is_dir() {
        anyhow::bail!(
            "Project path is not a directory: {}",
            args.project_path.display()
        );
    }

    info!("Project path: {}", args.project_path.display());
    info!("Output format: {:?}", args.output_format);
    match &args.output_path {
        Some(output) => info!("Output file: {}", output.display()),
        None => info!("Output: stdout"),
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::config::DocConfiguration;
    use crate::model::ApiDocumentation;
    use crate::operation_reader::OperationReader;
    use crate::parser;
    use crate::reflection;
    use crate::resource::ResourceDescriptor;
    use crate::scanner::SourceScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting documentation generation...");

    // Step 1: Scan the project directory for source files
    let scanner = SourceScanner::new(args.project_path.clone());
    let scan_result = scanner.scan()?;
    info!("Found {} source files", scan_result.source_files.len());
    for warning in &scan_result.warnings {
        log::warn!("{}", warning);
    }
    if scan_result.source_files.is_empty() {
        anyhow::bail!("No Rust files found in the project directory");
    }

    // Step 2: Parse into ASTs; unparseable files were already warned about
    let parsed_files = parser::parse_files(&scan_result.source_files);
    info!("Successfully parsed {} files", parsed_files.len());
    if parsed_files.is_empty() {
        anyhow::bail!("No files could be parsed successfully");
    }

    // Step 3: Build the reflection model
    let model = reflection::reflect(&parsed_files);
    info!(
        "Reflected {} controllers and {} annotated error types",
        model.controllers.len(),
        model.errors.len()
    );
    if model.controllers.is_empty() {
        log::warn!("No controllers found in the project");
    }

    // Step 4: Read each controller's documentation
    let configuration = DocConfiguration::new(args.api_version.clone(), args.base_path.clone());
    let mut endpoints = Vec::new();
    let mut controllers = Vec::new();

    for controller in &model.controllers {
        let resource = ResourceDescriptor::new(controller, &configuration);
        if resource.is_internal_resource() {
            debug!("Skipping internal resource {}", resource);
            continue;
        }
        // An unresolved URI means "skip this controller"; the warning has
        // already been emitted during resolution.
        let Some(mut docs) = resource.create_empty_api_documentation() else {
            continue;
        };
        debug!("Documenting {}", resource);

        for handler in &controller.methods {
            let Some(mapping) = handler.annotations.request_mapping() else {
                continue;
            };
            let (Some(path), Some(verb)) = (mapping.paths.first(), mapping.method.as_deref())
            else {
                debug!(
                    "Method {} has an incomplete #[request_mapping], skipping",
                    handler.name
                );
                continue;
            };

            let reader = OperationReader::new(handler, &model.errors);
            docs.add_operation(path, reader.summary().map(str::to_string), reader.get_operation(verb));
        }

        endpoints.push(resource.describe_as_endpoint());
        controllers.push(docs);
    }

    let documentation = ApiDocumentation {
        api_version: configuration.api_version.clone(),
        swagger_version: configuration.swagger_version.clone(),
        base_path: configuration.base_path.clone(),
        apis: endpoints,
        controllers,
    };
    info!("Documented {} controllers", documentation.controllers.len());

    // Step 5: Serialize and write
    let content = match args.output_format {
        OutputFormat::Yaml => serialize_yaml(&documentation)?,
        OutputFormat::Json => serialize_json(&documentation)?,
    };
    match &args.output_path {
        Some(output_path) => {
            write_to_file(&content, output_path)?;
            info!("Wrote documentation to {}", output_path.display());
        }
        None => println!("{}", content),
    }

    info!("Generation complete");
    Ok(())
}

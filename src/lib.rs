//! apidoc-from-source - API documentation metadata from annotated controllers.
//!
//! This library derives an in-memory documentation model from Rust source
//! files whose controller types and handler methods carry documentation
//! attributes (`#[controller]`, `#[request_mapping]`, `#[api_operation]`,
//! `#[api_param]` and friends). The sources are analyzed statically; the
//! attributes are read from the AST and never compiled.
//!
//! # Architecture
//!
//! The modules form a pipeline:
//!
//! 1. [`scanner`] - Recursively scans a project directory for Rust files
//! 2. [`parser`] - Parses source files into syntax trees
//! 3. [`annotations`] - Parses documentation attributes into structured values
//! 4. [`reflection`] - Links controllers, handler methods, parameters and
//!    annotated error types into a reflection model
//! 5. [`operation_reader`] - Derives per-method operation documentation
//! 6. [`resource`] - Resolves per-controller resource descriptors
//! 7. [`serializer`] - Serializes the assembled documentation to YAML or JSON
//!
//! # Example Usage
//!
//! ```no_run
//! use apidoc_from_source::{
//!     config::DocConfiguration,
//!     operation_reader::OperationReader,
//!     parser,
//!     reflection,
//!     resource::ResourceDescriptor,
//!     scanner::SourceScanner,
//! };
//! use std::path::PathBuf;
//!
//! // Scan and parse the project
//! let scanner = SourceScanner::new(PathBuf::from("./my-project"));
//! let scan_result = scanner.scan().unwrap();
//! let parsed_files = parser::parse_files(&scan_result.source_files);
//!
//! // Build the reflection model
//! let model = reflection::reflect(&parsed_files);
//!
//! // Read documentation per controller and method
//! let configuration = DocConfiguration::new("1.0", "/");
//! for controller in &model.controllers {
//!     let resource = ResourceDescriptor::new(controller, &configuration);
//!     if resource.controller_uri().is_none() || resource.is_internal_resource() {
//!         continue;
//!     }
//!     for handler in &controller.methods {
//!         let reader = OperationReader::new(handler, &model.errors);
//!         let operation = reader.get_operation("GET");
//!         println!("{}: {:?}", operation.nickname, operation.summary);
//!     }
//! }
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete
//! CLI application.

pub mod annotations;
pub mod cli;
pub mod config;
pub mod model;
pub mod operation_reader;
pub mod parser;
pub mod ranges;
pub mod reflection;
pub mod resource;
pub mod scanner;
pub mod serializer;

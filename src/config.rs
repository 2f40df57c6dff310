//! Documentation-generation configuration.

use crate::model::ControllerDocumentation;
use crate::resource::ResourceDescriptor;

/// Swagger-style documentation format version emitted by this crate.
pub const SWAGGER_VERSION: &str = "1.1";

/// Configuration collaborator for the documentation readers.
///
/// Owns the deployment-level facts (API version, base path) and the single
/// factory operation the resource descriptors consume: building an empty
/// per-controller documentation container.
#[derive(Debug, Clone)]
pub struct DocConfiguration {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
}

impl DocConfiguration {
    pub fn new(api_version: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: base_path.into(),
        }
    }

    /// Builds an empty documentation container for a resource descriptor.
    pub fn new_documentation(&self, resource: &ResourceDescriptor) -> ControllerDocumentation {
        ControllerDocumentation {
            api_version: self.api_version.clone(),
            swagger_version: self.swagger_version.clone(),
            base_path: self.base_path.clone(),
            resource_path: resource.controller_uri().unwrap_or_default(),
            apis: Vec::new(),
        }
    }
}

impl Default for DocConfiguration {
    fn default() -> Self {
        Self::new("1.0", "/")
    }
}

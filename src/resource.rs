//! Per-controller resource descriptors.
//!
//! A [`ResourceDescriptor`] resolves a controller's base URI from its
//! class-level annotations and either summarizes it as a resource-listing
//! endpoint or delegates creation of the full documentation container to the
//! configuration collaborator.

use std::fmt;

use log::warn;

use crate::config::DocConfiguration;
use crate::model::{ControllerDocumentation, Endpoint};
use crate::reflection::Controller;

/// Type name of the built-in documentation-serving controller. Its resource
/// is excluded from the documentation it serves.
pub const DOCUMENTATION_CONTROLLER: &str = "DocumentationController";

/// Resolves and describes the documentation resource of one controller.
pub struct ResourceDescriptor<'a> {
    controller: &'a Controller,
    configuration: &'a DocConfiguration,
}

impl<'a> ResourceDescriptor<'a> {
    pub fn new(controller: &'a Controller, configuration: &'a DocConfiguration) -> Self {
        Self {
            controller,
            configuration,
        }
    }

    pub fn controller(&self) -> &Controller {
        self.controller
    }

    /// Resolves the controller's documented URI.
    ///
    /// `None` signals "no documentation for this controller": the class-level
    /// route mapping is missing or declares no route. When several routes are
    /// declared only the first is used. A non-empty `listing_path` on the
    /// class-level `#[api]` annotation supersedes the mapped route entirely.
    /// The resolved route is flattened: every `/` becomes `_`, with a leading
    /// separator preserved as a single leading `/`.
    pub fn controller_uri(&self) -> Option<String> {
        let Some(mapping) = self.controller.annotations.request_mapping() else {
            warn!(
                "Controller {} has handler methods, but no class-level #[request_mapping]. \
                 No documentation will be generated",
                self.controller.name
            );
            return None;
        };
        if mapping.paths.is_empty() {
            warn!(
                "Controller {} has a #[request_mapping] without a route. \
                 No documentation will be generated",
                self.controller.name
            );
            return None;
        }
        if mapping.paths.len() > 1 {
            warn!(
                "Controller {} has a #[request_mapping] with multiple routes. \
                 Only the first one will be documented",
                self.controller.name
            );
        }

        let mut uri = mapping.paths[0].clone();
        if let Some(api) = self.controller.annotations.api() {
            if !api.listing_path.is_empty() {
                uri = api.listing_path.clone();
            }
        }
        Some(flatten_separators(&uri))
    }

    /// Pairs the resolved URI with the class-level API description.
    ///
    /// Does not apply the skip-if-unresolved rule; an unresolved URI yields
    /// an empty string and the caller is expected to have checked
    /// [`controller_uri`](Self::controller_uri) first if it cares.
    pub fn describe_as_endpoint(&self) -> Endpoint {
        Endpoint {
            uri: self.controller_uri().unwrap_or_default(),
            description: self.api_description(),
        }
    }

    /// Builds an empty documentation container via the configuration
    /// collaborator, or `None` when the controller has no resolvable URI.
    pub fn create_empty_api_documentation(&self) -> Option<ControllerDocumentation> {
        self.controller_uri()?;
        Some(self.configuration.new_documentation(self))
    }

    /// True iff this is the built-in documentation-serving controller.
    pub fn is_internal_resource(&self) -> bool {
        self.controller.name == DOCUMENTATION_CONTROLLER
    }

    fn api_description(&self) -> Option<String> {
        self.controller
            .annotations
            .api()
            .map(|api| api.description.clone())
    }
}

impl fmt::Display for ResourceDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApiResource for {} at {}",
            self.controller.name,
            self.controller_uri().unwrap_or_default()
        )
    }
}

/// Flattens a route into a single path segment: every `/` is replaced with
/// `_`, except that a route starting with `/` keeps one leading `/`.
fn flatten_separators(uri: &str) -> String {
    let replaced = uri.replace('/', "_");
    if uri.starts_with('/') {
        format!("/{}", &replaced[1..])
    } else {
        replaced
    }
}

//! Derives operation documentation from one handler method.
//!
//! An [`OperationReader`] performs all derivation eagerly at construction:
//! operation metadata from the method-level annotations, one documentation
//! entry per formal parameter (explicit annotation or synthesized defaults),
//! and the ordered error list from its three declaration sources.
//! [`OperationReader::get_operation`] then assembles the final value and may
//! be called repeatedly with different HTTP verbs without re-deriving.

use log::warn;

use crate::annotations::{ApiParamAttr, DEFAULT_NONE};
use crate::model::{AllowableValues, ErrorResponse, Operation, Parameter};
use crate::ranges::build_allowable_range_values;
use crate::reflection::{ErrorRegistry, HandlerMethod, MethodParameter};

/// Transport-infrastructure parameter types that are never documented.
const IGNORED_PARAMETER_TYPES: [&str; 2] = ["HttpRequest", "HttpResponse"];

/// Reads the documentation of a single handler method.
pub struct OperationReader {
    summary: Option<String>,
    notes: Option<String>,
    /// Raw comma-separated tag string; split during operation assembly
    tags: Option<String>,
    nickname: String,
    deprecated: bool,
    parameters: Vec<Parameter>,
    errors: Vec<ErrorResponse>,
}

impl OperationReader {
    pub fn new(handler: &HandlerMethod, registry: &ErrorRegistry) -> Self {
        let mut reader = Self {
            summary: None,
            notes: None,
            tags: None,
            nickname: handler.name.clone(),
            deprecated: handler.annotations.is_deprecated(),
            parameters: Vec::new(),
            errors: Vec::new(),
        };
        reader.document_operation(handler);
        reader.document_parameters(handler);
        reader.document_errors(handler, registry);
        reader
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn errors(&self) -> &[ErrorResponse] {
        &self.errors
    }

    /// Assembles the operation for one HTTP verb from the already-derived
    /// fields.
    pub fn get_operation(&self, http_method: &str) -> Operation {
        Operation {
            http_method: http_method.to_string(),
            summary: self.summary.clone(),
            notes: self.notes.clone(),
            nickname: self.nickname.clone(),
            deprecated: self.deprecated,
            tags: self.split_tags(),
            parameters: self.parameters.clone(),
            errors: self.errors.clone(),
        }
    }

    fn split_tags(&self) -> Option<Vec<String>> {
        match self.tags.as_deref() {
            Some(tags) if !tags.is_empty() => {
                Some(tags.split(',').map(str::to_string).collect())
            }
            _ => None,
        }
    }

    fn document_operation(&mut self, handler: &HandlerMethod) {
        if let Some(api_operation) = handler.annotations.api_operation() {
            self.summary = Some(api_operation.value.clone());
            self.notes = Some(api_operation.notes.clone());
            self.tags = Some(api_operation.tags.clone());
        }
    }

    fn document_parameters(&mut self, handler: &HandlerMethod) {
        for parameter in &handler.parameters {
            match parameter.annotations.api_param() {
                Some(api_param) => self.document_annotated_parameter(parameter, api_param),
                None => {
                    if IGNORED_PARAMETER_TYPES.contains(&parameter.data_type.as_str()) {
                        continue;
                    }
                    warn!(
                        "{} is missing #[api_param] - generating default documentation",
                        parameter.name
                    );
                    self.generate_default_parameter_documentation(parameter);
                }
            }
        }
    }

    /// Documents a parameter carrying an explicit `#[api_param]`.
    ///
    /// Location is always "path" for explicitly annotated parameters,
    /// regardless of any binding annotation also present.
    fn document_annotated_parameter(&mut self, parameter: &MethodParameter, api_param: &ApiParamAttr) {
        self.parameters.push(Parameter {
            name: select_best_parameter_name(parameter),
            description: non_empty(&api_param.value),
            internal_description: non_empty(&api_param.internal_description),
            location: Some("path".to_string()),
            default_value: non_empty(&api_param.default_value),
            allowable_values: convert_to_allowable_values(&api_param.allowable_values),
            required: api_param.required,
            allow_multiple: api_param.allow_multiple,
            data_type: parameter.data_type.clone(),
        });
    }

    /// Synthesizes documentation for a parameter without `#[api_param]`,
    /// inferring location and required-ness from the binding annotation.
    fn generate_default_parameter_documentation(&mut self, parameter: &MethodParameter) {
        let mut location = None;
        let mut default_value = None;
        let mut required = false;

        if parameter.annotations.path_variable().is_some() {
            location = Some("path".to_string());
            required = true;
        } else if let Some(request_param) = parameter.annotations.request_param() {
            location = Some("query".to_string());
            required = request_param.required;
            if request_param.default_value != DEFAULT_NONE {
                default_value = Some(request_param.default_value.clone());
            }
        }

        self.parameters.push(Parameter {
            name: select_best_parameter_name(parameter),
            description: None,
            internal_description: None,
            location,
            default_value,
            allowable_values: None,
            required,
            allow_multiple: false,
            data_type: parameter.data_type.clone(),
        });
    }

    /// Appends errors from the three declaration sources in their fixed
    /// order: inline declarations, exception-class list, throws clause.
    /// Entries are never deduplicated.
    fn document_errors(&mut self, handler: &HandlerMethod, registry: &ErrorRegistry) {
        self.discover_declared_errors(handler);
        self.discover_exception_list_errors(handler, registry);
        self.discover_throws_errors(handler, registry);
    }

    fn discover_declared_errors(&mut self, handler: &HandlerMethod) {
        if let Some(api_errors) = handler.annotations.api_errors() {
            self.errors.extend(api_errors.errors.iter().cloned());
        }
    }

    fn discover_exception_list_errors(&mut self, handler: &HandlerMethod, registry: &ErrorRegistry) {
        if let Some(api_exceptions) = handler.annotations.api_exceptions() {
            for exception_type in &api_exceptions.types {
                self.append_error_from_type(exception_type, registry);
            }
        }
    }

    fn discover_throws_errors(&mut self, handler: &HandlerMethod, registry: &ErrorRegistry) {
        for exception_type in &handler.throws {
            self.append_error_from_type(exception_type, registry);
        }
    }

    /// Exception types without an `#[api_error]` registry entry are skipped.
    fn append_error_from_type(&mut self, exception_type: &str, registry: &ErrorRegistry) {
        if let Some(error) = registry.lookup(exception_type) {
            self.errors.push(error.clone());
        }
    }
}

/// Resolves a parameter's documented name: explicit annotation name, then
/// path-variable, model-attribute and request-param names, then the
/// reflected parameter name. Each step short-circuits on a non-empty match.
fn select_best_parameter_name(parameter: &MethodParameter) -> String {
    if let Some(api_param) = parameter.annotations.api_param() {
        if !api_param.name.is_empty() {
            return api_param.name.clone();
        }
    }
    if let Some(path_variable) = parameter.annotations.path_variable() {
        if !path_variable.value.is_empty() {
            return path_variable.value.clone();
        }
    }
    if let Some(model_attribute) = parameter.annotations.model_attribute() {
        if !model_attribute.value.is_empty() {
            return model_attribute.value.clone();
        }
    }
    if let Some(request_param) = parameter.annotations.request_param() {
        if !request_param.value.is_empty() {
            return request_param.value.clone();
        }
    }
    parameter.name.clone()
}

/// Parses an allowable-values constraint string: `range[...]` and
/// `rangeexclusive[...]` (case-insensitive) delegate to the range builder,
/// any other non-empty string is a comma-separated enumeration, and an empty
/// string means no constraint.
fn convert_to_allowable_values(csv: &str) -> Option<AllowableValues> {
    let lowered = csv.to_lowercase();
    if lowered.starts_with("range[") {
        let body = bracket_body(csv, "range[".len());
        let tokens: Vec<&str> = body.split(',').collect();
        return build_allowable_range_values(&tokens, csv);
    }
    if lowered.starts_with("rangeexclusive[") {
        let body = bracket_body(csv, "rangeexclusive[".len());
        let tokens: Vec<&str> = body.split(',').collect();
        return build_allowable_range_values(&tokens, csv);
    }
    if csv.is_empty() {
        return None;
    }
    Some(AllowableValues::List {
        values: csv.split(',').map(str::to_string).collect(),
    })
}

/// Content between a matched prefix and the trailing bracket.
fn bracket_body(csv: &str, prefix_len: usize) -> &str {
    let rest = &csv[prefix_len..];
    rest.strip_suffix(']').unwrap_or(rest)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

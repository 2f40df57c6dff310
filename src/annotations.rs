//! Documentation-annotation vocabulary.
//!
//! Controllers declare their documentation through a small set of attributes
//! (`#[controller]`, `#[request_mapping]`, `#[api_operation]`, `#[api_param]`,
//! binding annotations and error declarations). The attributes are never
//! compiled; they are read straight off the AST produced by `syn` and turned
//! into structured values.
//!
//! Lookup is uniform: an [`AnnotationSet`] is built from the raw attribute
//! list of any annotated element (controller struct, handler method, formal
//! parameter, exception type) and answers "is annotation kind X present, and
//! with which values" as an `Option`.

use log::warn;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Lit, Meta, Token};

use crate::model::ErrorResponse;

/// Reserved marker meaning "no default value was declared".
///
/// Distinct from the empty string, which is a legal declared default. A
/// `#[request_param]` without a `default_value` key carries this marker.
pub const DEFAULT_NONE: &str = "\n\t\t\n\t\t\n\u{E000}\u{E001}\u{E002}\n\t\t\t\t\n";

/// `#[api_operation(value = "...", notes = "...", tags = "a,b")]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiOperationAttr {
    /// Short summary of the operation
    pub value: String,
    /// Free-text notes
    pub notes: String,
    /// Comma-separated tag list; split only during operation assembly
    pub tags: String,
}

/// `#[api_param(...)]` - explicit parameter documentation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiParamAttr {
    pub name: String,
    /// Human-readable description
    pub value: String,
    pub internal_description: String,
    pub default_value: String,
    /// Raw allowable-values constraint string (range or enumeration)
    pub allowable_values: String,
    pub required: bool,
    pub allow_multiple: bool,
}

/// `#[path_variable("name")]` - binds a parameter to a path segment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVariableAttr {
    pub value: String,
}

/// `#[request_param(value = "name", required = false, default_value = "...")]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParamAttr {
    pub value: String,
    pub required: bool,
    pub default_value: String,
}

impl Default for RequestParamAttr {
    fn default() -> Self {
        Self {
            value: String::new(),
            required: true,
            default_value: DEFAULT_NONE.to_string(),
        }
    }
}

/// `#[model_attribute("name")]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelAttributeAttr {
    pub value: String,
}

/// `#[request_mapping(...)]` - route mapping on a controller or a method.
///
/// Class-level form lists one or more route strings; method-level form adds
/// the HTTP verb: `#[request_mapping(path = "/pets/{id}", method = "GET")]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMappingAttr {
    pub paths: Vec<String>,
    pub method: Option<String>,
}

/// `#[api(description = "...", listing_path = "...")]` - class-level API
/// description; a non-empty `listing_path` supersedes the mapped route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiAttr {
    pub description: String,
    pub listing_path: String,
}

/// `#[api_errors(error(code = 404, reason = "..."), ...)]` - inline error
/// declarations on a handler method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiErrorsAttr {
    pub errors: Vec<ErrorResponse>,
}

/// `#[api_exceptions(TypeA, TypeB)]` - error declarations by exception type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiExceptionsAttr {
    pub types: Vec<String>,
}

/// `#[throws(TypeA, TypeB)]` - the declared-exceptions clause of a handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrowsAttr {
    pub types: Vec<String>,
}

/// `#[api_error(code = 404, reason = "...")]` - on an exception type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorAttr {
    pub code: u16,
    pub reason: String,
}

/// One parsed documentation annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// `#[controller]` marker on a struct
    Controller,
    RequestMapping(RequestMappingAttr),
    Api(ApiAttr),
    ApiOperation(ApiOperationAttr),
    ApiParam(ApiParamAttr),
    PathVariable(PathVariableAttr),
    RequestParam(RequestParamAttr),
    ModelAttribute(ModelAttributeAttr),
    ApiErrors(ApiErrorsAttr),
    ApiExceptions(ApiExceptionsAttr),
    Throws(ThrowsAttr),
    ApiError(ApiErrorAttr),
    /// `#[deprecated]` marker on a method
    Deprecated,
}

/// The annotations present on one annotated element.
///
/// Each accessor returns the first annotation of its kind, or `None` when the
/// element does not carry it.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    items: Vec<Annotation>,
}

impl AnnotationSet {
    /// Parses all recognized documentation annotations out of a raw attribute
    /// list. Unknown attributes are ignored; malformed known attributes are
    /// logged and treated as absent.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let items = attrs.iter().filter_map(parse_annotation).collect();
        Self { items }
    }

    pub fn is_controller(&self) -> bool {
        self.items.iter().any(|a| matches!(a, Annotation::Controller))
    }

    pub fn is_deprecated(&self) -> bool {
        self.items.iter().any(|a| matches!(a, Annotation::Deprecated))
    }

    pub fn request_mapping(&self) -> Option<&RequestMappingAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::RequestMapping(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn api(&self) -> Option<&ApiAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::Api(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn api_operation(&self) -> Option<&ApiOperationAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::ApiOperation(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn api_param(&self) -> Option<&ApiParamAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::ApiParam(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn path_variable(&self) -> Option<&PathVariableAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::PathVariable(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn request_param(&self) -> Option<&RequestParamAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::RequestParam(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn model_attribute(&self) -> Option<&ModelAttributeAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::ModelAttribute(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn api_errors(&self) -> Option<&ApiErrorsAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::ApiErrors(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn api_exceptions(&self) -> Option<&ApiExceptionsAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::ApiExceptions(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn throws(&self) -> Option<&ThrowsAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::Throws(attr) => Some(attr),
            _ => None,
        })
    }

    pub fn api_error(&self) -> Option<&ApiErrorAttr> {
        self.items.iter().find_map(|a| match a {
            Annotation::ApiError(attr) => Some(attr),
            _ => None,
        })
    }
}

/// Parse a single attribute into an annotation, if it is a recognized kind.
fn parse_annotation(attr: &Attribute) -> Option<Annotation> {
    let name = attr.path().segments.last()?.ident.to_string();

    match name.as_str() {
        "controller" => Some(Annotation::Controller),
        "deprecated" => Some(Annotation::Deprecated),
        "request_mapping" => {
            Some(Annotation::RequestMapping(parse_request_mapping(&attr_args(attr, &name)?)))
        }
        "api" => Some(Annotation::Api(parse_api(&attr_args(attr, &name)?))),
        "api_operation" => {
            Some(Annotation::ApiOperation(parse_api_operation(&attr_args(attr, &name)?)))
        }
        "api_param" => Some(Annotation::ApiParam(parse_api_param(&attr_args(attr, &name)?))),
        "path_variable" => {
            Some(Annotation::PathVariable(parse_path_variable(&attr_args(attr, &name)?)))
        }
        "request_param" => {
            Some(Annotation::RequestParam(parse_request_param(&attr_args(attr, &name)?)))
        }
        "model_attribute" => {
            Some(Annotation::ModelAttribute(parse_model_attribute(&attr_args(attr, &name)?)))
        }
        "api_errors" => Some(Annotation::ApiErrors(parse_api_errors(&attr_args(attr, &name)?))),
        "api_exceptions" => {
            Some(Annotation::ApiExceptions(parse_api_exceptions(&attr_args(attr, &name)?)))
        }
        "throws" => Some(Annotation::Throws(parse_throws(&attr_args(attr, &name)?))),
        "api_error" => parse_api_error(&attr_args(attr, &name)?).map(Annotation::ApiError),
        _ => None,
    }
}

/// Extract the comma-separated argument expressions of an attribute.
///
/// A bare marker (`#[controller]`) yields an empty list. Malformed argument
/// lists are logged and yield `None`, which makes the annotation absent.
fn attr_args(attr: &Attribute, name: &str) -> Option<Vec<Expr>> {
    match &attr.meta {
        Meta::Path(_) => Some(Vec::new()),
        Meta::List(_) => {
            match attr.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated) {
                Ok(args) => Some(args.into_iter().collect()),
                Err(e) => {
                    warn!("Malformed #[{}] attribute, treating as absent: {}", name, e);
                    None
                }
            }
        }
        Meta::NameValue(_) => {
            warn!("Unsupported #[{} = ...] attribute form, treating as absent", name);
            None
        }
    }
}

fn string_value(expr: &Expr) -> Option<String> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Some(lit_str.value());
        }
    }
    None
}

fn bool_value(expr: &Expr) -> Option<bool> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Bool(lit_bool) = &expr_lit.lit {
            return Some(lit_bool.value());
        }
    }
    None
}

fn int_value(expr: &Expr) -> Option<u16> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Int(lit_int) = &expr_lit.lit {
            return lit_int.base10_parse().ok();
        }
    }
    None
}

/// A bare type or ident argument, e.g. `PetNotFoundError` in `#[throws(...)]`.
fn ident_value(expr: &Expr) -> Option<String> {
    if let Expr::Path(expr_path) = expr {
        return Some(expr_path.path.segments.last()?.ident.to_string());
    }
    None
}

/// A `key = value` argument; returns the key name and the value expression.
fn assignment(expr: &Expr) -> Option<(String, &Expr)> {
    if let Expr::Assign(assign) = expr {
        if let Expr::Path(expr_path) = assign.left.as_ref() {
            let key = expr_path.path.segments.last()?.ident.to_string();
            return Some((key, assign.right.as_ref()));
        }
    }
    None
}

/// A nested call argument, e.g. `error(code = 404, reason = "...")`.
fn nested_call(expr: &Expr) -> Option<(String, Vec<&Expr>)> {
    if let Expr::Call(call) = expr {
        if let Expr::Path(expr_path) = call.func.as_ref() {
            let name = expr_path.path.segments.last()?.ident.to_string();
            return Some((name, call.args.iter().collect()));
        }
    }
    None
}

fn parse_request_mapping(args: &[Expr]) -> RequestMappingAttr {
    let mut mapping = RequestMappingAttr::default();
    for arg in args {
        if let Some(path) = string_value(arg) {
            mapping.paths.push(path);
        } else if let Some((key, value)) = assignment(arg) {
            match key.as_str() {
                "path" => {
                    if let Some(path) = string_value(value) {
                        mapping.paths.push(path);
                    }
                }
                "method" => mapping.method = string_value(value),
                other => warn!("Unknown #[request_mapping] key: {}", other),
            }
        }
    }
    mapping
}

fn parse_api(args: &[Expr]) -> ApiAttr {
    let mut api = ApiAttr::default();
    for arg in args {
        if let Some((key, value)) = assignment(arg) {
            match key.as_str() {
                "description" => api.description = string_value(value).unwrap_or_default(),
                "listing_path" => api.listing_path = string_value(value).unwrap_or_default(),
                other => warn!("Unknown #[api] key: {}", other),
            }
        }
    }
    api
}

fn parse_api_operation(args: &[Expr]) -> ApiOperationAttr {
    let mut operation = ApiOperationAttr::default();
    for arg in args {
        if let Some((key, value)) = assignment(arg) {
            match key.as_str() {
                "value" => operation.value = string_value(value).unwrap_or_default(),
                "notes" => operation.notes = string_value(value).unwrap_or_default(),
                "tags" => operation.tags = string_value(value).unwrap_or_default(),
                other => warn!("Unknown #[api_operation] key: {}", other),
            }
        }
    }
    operation
}

fn parse_api_param(args: &[Expr]) -> ApiParamAttr {
    let mut param = ApiParamAttr::default();
    for arg in args {
        if let Some((key, value)) = assignment(arg) {
            match key.as_str() {
                "name" => param.name = string_value(value).unwrap_or_default(),
                "value" => param.value = string_value(value).unwrap_or_default(),
                "internal_description" => {
                    param.internal_description = string_value(value).unwrap_or_default()
                }
                "default_value" => param.default_value = string_value(value).unwrap_or_default(),
                "allowable_values" => {
                    param.allowable_values = string_value(value).unwrap_or_default()
                }
                "required" => param.required = bool_value(value).unwrap_or_default(),
                "allow_multiple" => param.allow_multiple = bool_value(value).unwrap_or_default(),
                other => warn!("Unknown #[api_param] key: {}", other),
            }
        }
    }
    param
}

fn parse_path_variable(args: &[Expr]) -> PathVariableAttr {
    let mut path_variable = PathVariableAttr::default();
    for arg in args {
        if let Some(name) = string_value(arg) {
            path_variable.value = name;
        } else if let Some((key, value)) = assignment(arg) {
            if key == "value" {
                path_variable.value = string_value(value).unwrap_or_default();
            }
        }
    }
    path_variable
}

fn parse_request_param(args: &[Expr]) -> RequestParamAttr {
    let mut request_param = RequestParamAttr::default();
    for arg in args {
        if let Some(name) = string_value(arg) {
            request_param.value = name;
        } else if let Some((key, value)) = assignment(arg) {
            match key.as_str() {
                "value" => request_param.value = string_value(value).unwrap_or_default(),
                "required" => {
                    if let Some(required) = bool_value(value) {
                        request_param.required = required;
                    }
                }
                "default_value" => {
                    if let Some(default_value) = string_value(value) {
                        request_param.default_value = default_value;
                    }
                }
                other => warn!("Unknown #[request_param] key: {}", other),
            }
        }
    }
    request_param
}

fn parse_model_attribute(args: &[Expr]) -> ModelAttributeAttr {
    let mut model_attribute = ModelAttributeAttr::default();
    for arg in args {
        if let Some(name) = string_value(arg) {
            model_attribute.value = name;
        } else if let Some((key, value)) = assignment(arg) {
            if key == "value" {
                model_attribute.value = string_value(value).unwrap_or_default();
            }
        }
    }
    model_attribute
}

fn parse_api_errors(args: &[Expr]) -> ApiErrorsAttr {
    let mut api_errors = ApiErrorsAttr::default();
    for arg in args {
        match nested_call(arg) {
            Some((name, entry_args)) if name == "error" => {
                let mut code = None;
                let mut reason = String::new();
                for entry_arg in entry_args {
                    if let Some((key, value)) = assignment(entry_arg) {
                        match key.as_str() {
                            "code" => code = int_value(value),
                            "reason" => reason = string_value(value).unwrap_or_default(),
                            other => warn!("Unknown #[api_errors] error key: {}", other),
                        }
                    }
                }
                match code {
                    Some(code) => api_errors.errors.push(ErrorResponse { code, reason }),
                    None => warn!("#[api_errors] entry without a code, skipping"),
                }
            }
            _ => warn!("Unrecognized #[api_errors] entry, skipping"),
        }
    }
    api_errors
}

fn parse_api_exceptions(args: &[Expr]) -> ApiExceptionsAttr {
    ApiExceptionsAttr {
        types: args.iter().filter_map(ident_value).collect(),
    }
}

fn parse_throws(args: &[Expr]) -> ThrowsAttr {
    ThrowsAttr {
        types: args.iter().filter_map(ident_value).collect(),
    }
}

fn parse_api_error(args: &[Expr]) -> Option<ApiErrorAttr> {
    let mut code = None;
    let mut reason = String::new();
    for arg in args {
        if let Some((key, value)) = assignment(arg) {
            match key.as_str() {
                "code" => code = int_value(value),
                "reason" => reason = string_value(value).unwrap_or_default(),
                other => warn!("Unknown #[api_error] key: {}", other),
            }
        }
    }
    match code {
        Some(code) => Some(ApiErrorAttr { code, reason }),
        None => {
            warn!("#[api_error] without a code, treating as absent");
            None
        }
    }
}

//! Reflection facade over parsed controller sources.
//!
//! This module turns `syn` ASTs into the metadata the readers consume:
//! controller types with their class-level annotations, handler methods with
//! their formal parameters and declared exceptions, and the registry of
//! exception types carrying `#[api_error]` metadata.
//!
//! Collection is two-pass: a visitor first gathers controller structs, impl
//! blocks and exception types from all files, then methods are linked to
//! their controllers by type name. Impl blocks may therefore live in a
//! different file than the struct they extend.

use std::collections::HashMap;

use log::debug;
use syn::visit::Visit;
use syn::{FnArg, ImplItem, Pat, Type};

use crate::annotations::AnnotationSet;
use crate::model::ErrorResponse;
use crate::parser::ParsedFile;

/// One formal parameter of a handler method.
#[derive(Debug, Clone)]
pub struct MethodParameter {
    /// The reflected parameter name from the source pattern
    pub name: String,
    /// Simple name of the declared type (references stripped, generics
    /// dropped, e.g. `&Vec<String>` reflects as `Vec`)
    pub data_type: String,
    pub annotations: AnnotationSet,
}

/// One method of a controller impl block.
#[derive(Debug, Clone)]
pub struct HandlerMethod {
    pub name: String,
    pub annotations: AnnotationSet,
    pub parameters: Vec<MethodParameter>,
    /// Exception type names from the declared `#[throws(...)]` clause
    pub throws: Vec<String>,
}

/// A controller type: a struct carrying the `#[controller]` marker, with the
/// methods collected from all of its impl blocks.
#[derive(Debug, Clone)]
pub struct Controller {
    pub name: String,
    pub annotations: AnnotationSet,
    pub methods: Vec<HandlerMethod>,
}

/// Lookup table from exception-type name to its declared error metadata.
///
/// Pure function of type identity: inheritance or module position play no
/// part, only the `#[api_error]` annotation on the type itself.
#[derive(Debug, Clone, Default)]
pub struct ErrorRegistry {
    entries: HashMap<String, ErrorResponse>,
}

impl ErrorRegistry {
    pub fn lookup(&self, type_name: &str) -> Option<&ErrorResponse> {
        self.entries.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the documentation readers need from a set of parsed files.
#[derive(Debug, Clone)]
pub struct ReflectionModel {
    pub controllers: Vec<Controller>,
    pub errors: ErrorRegistry,
}

/// Builds the reflection model from all parsed files.
pub fn reflect(parsed_files: &[ParsedFile]) -> ReflectionModel {
    let mut visitor = ControllerVisitor::default();
    for parsed_file in parsed_files {
        visitor.visit_file(&parsed_file.syntax_tree);
    }
    visitor.link()
}

/// Visitor collecting controller structs, impl-block methods and annotated
/// exception types across files.
#[derive(Default)]
struct ControllerVisitor {
    controllers: Vec<Controller>,
    /// Methods keyed by the impl block's self type name, in visit order
    methods: HashMap<String, Vec<HandlerMethod>>,
    errors: ErrorRegistry,
}

impl ControllerVisitor {
    /// Attach collected methods to their controllers by type name.
    fn link(mut self) -> ReflectionModel {
        for controller in &mut self.controllers {
            if let Some(methods) = self.methods.remove(&controller.name) {
                controller.methods = methods;
            }
        }
        debug!(
            "Reflected {} controllers, {} annotated error types",
            self.controllers.len(),
            self.errors.len()
        );
        ReflectionModel {
            controllers: self.controllers,
            errors: self.errors,
        }
    }

    fn record_error_type(&mut self, name: &str, annotations: &AnnotationSet) {
        if let Some(api_error) = annotations.api_error() {
            self.errors.entries.insert(
                name.to_string(),
                ErrorResponse {
                    code: api_error.code,
                    reason: api_error.reason.clone(),
                },
            );
        }
    }

    fn reflect_method(item_fn_sig: &syn::Signature, annotations: AnnotationSet) -> HandlerMethod {
        let parameters = item_fn_sig
            .inputs
            .iter()
            .filter_map(|input| match input {
                FnArg::Receiver(_) => None,
                FnArg::Typed(pat_type) => Some(pat_type),
            })
            .enumerate()
            .map(|(index, pat_type)| MethodParameter {
                name: pattern_name(&pat_type.pat, index),
                data_type: type_simple_name(&pat_type.ty),
                annotations: AnnotationSet::from_attrs(&pat_type.attrs),
            })
            .collect();

        let throws = annotations
            .throws()
            .map(|t| t.types.clone())
            .unwrap_or_default();

        HandlerMethod {
            name: item_fn_sig.ident.to_string(),
            annotations,
            parameters,
            throws,
        }
    }
}

impl<'ast> Visit<'ast> for ControllerVisitor {
    fn visit_item_struct(&mut self, node: &'ast syn::ItemStruct) {
        let annotations = AnnotationSet::from_attrs(&node.attrs);
        let name = node.ident.to_string();

        if annotations.is_controller() {
            self.controllers.push(Controller {
                name: name.clone(),
                annotations: annotations.clone(),
                methods: Vec::new(),
            });
        }
        self.record_error_type(&name, &annotations);

        syn::visit::visit_item_struct(self, node);
    }

    fn visit_item_enum(&mut self, node: &'ast syn::ItemEnum) {
        let annotations = AnnotationSet::from_attrs(&node.attrs);
        self.record_error_type(&node.ident.to_string(), &annotations);

        syn::visit::visit_item_enum(self, node);
    }

    fn visit_item_impl(&mut self, node: &'ast syn::ItemImpl) {
        // Trait impls never carry handler methods
        if node.trait_.is_some() {
            return;
        }
        let Some(self_type) = type_simple_name_of(&node.self_ty) else {
            return;
        };

        for item in &node.items {
            if let ImplItem::Fn(method) = item {
                let annotations = AnnotationSet::from_attrs(&method.attrs);
                let handler = Self::reflect_method(&method.sig, annotations);
                self.methods.entry(self_type.clone()).or_default().push(handler);
            }
        }

        syn::visit::visit_item_impl(self, node);
    }
}

fn pattern_name(pat: &Pat, index: usize) -> String {
    match pat {
        Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
        _ => format!("arg{}", index),
    }
}

/// Simple name of a declared type: strip references, take the last path
/// segment, drop generic arguments.
fn type_simple_name(ty: &Type) -> String {
    type_simple_name_of(ty).unwrap_or_else(|| "unknown".to_string())
}

fn type_simple_name_of(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => type_simple_name_of(&reference.elem),
        Type::Path(type_path) => Some(type_path.path.segments.last()?.ident.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_code(code: &str) -> ParsedFile {
        let syntax_tree = syn::parse_file(code).expect("Failed to parse test code");
        ParsedFile {
            path: PathBuf::from("test.rs"),
            syntax_tree,
        }
    }

    #[test]
    fn test_reflect_controller_with_methods() {
        let code = r#"
            #[controller]
            #[request_mapping("/pets")]
            pub struct PetController;

            impl PetController {
                #[request_mapping(path = "/pets/{id}", method = "GET")]
                pub fn get_pet(&self, #[path_variable("id")] id: u64) -> Pet {
                    unimplemented!()
                }

                pub fn helper(&self) {}
            }
        "#;

        let model = reflect(&[parse_code(code)]);

        assert_eq!(model.controllers.len(), 1);
        let controller = &model.controllers[0];
        assert_eq!(controller.name, "PetController");
        assert!(controller.annotations.request_mapping().is_some());
        assert_eq!(controller.methods.len(), 2);

        let get_pet = &controller.methods[0];
        assert_eq!(get_pet.name, "get_pet");
        assert_eq!(get_pet.parameters.len(), 1);
        assert_eq!(get_pet.parameters[0].name, "id");
        assert_eq!(get_pet.parameters[0].data_type, "u64");
        assert_eq!(
            get_pet.parameters[0].annotations.path_variable().unwrap().value,
            "id"
        );
    }

    #[test]
    fn test_cross_file_impl_linking() {
        let struct_code = r#"
            #[controller]
            #[request_mapping("/pets")]
            pub struct PetController;
        "#;
        let impl_code = r#"
            impl PetController {
                #[request_mapping(path = "/pets", method = "GET")]
                pub fn list_pets(&self) -> Vec<Pet> {
                    unimplemented!()
                }
            }
        "#;

        let model = reflect(&[parse_code(struct_code), parse_code(impl_code)]);

        assert_eq!(model.controllers.len(), 1);
        assert_eq!(model.controllers[0].methods.len(), 1);
        assert_eq!(model.controllers[0].methods[0].name, "list_pets");
    }

    #[test]
    fn test_unmarked_struct_is_not_a_controller() {
        let code = r#"
            pub struct Pet {
                pub id: u64,
            }
        "#;

        let model = reflect(&[parse_code(code)]);
        assert!(model.controllers.is_empty());
    }

    #[test]
    fn test_error_registry_from_structs_and_enums() {
        let code = r#"
            #[api_error(code = 404, reason = "Pet not found")]
            pub struct PetNotFoundError;

            #[api_error(code = 409, reason = "Store closed")]
            pub enum StoreClosedError {
                Holiday,
                Night,
            }

            pub struct PlainError;
        "#;

        let model = reflect(&[parse_code(code)]);

        assert_eq!(model.errors.len(), 2);
        assert_eq!(model.errors.lookup("PetNotFoundError").unwrap().code, 404);
        assert_eq!(model.errors.lookup("StoreClosedError").unwrap().reason, "Store closed");
        assert!(model.errors.lookup("PlainError").is_none());
    }

    #[test]
    fn test_throws_clause_is_surfaced() {
        let code = r#"
            #[controller]
            pub struct PetController;

            impl PetController {
                #[throws(PetNotFoundError, StoreClosedError)]
                pub fn get_pet(&self, id: u64) -> Pet {
                    unimplemented!()
                }
            }
        "#;

        let model = reflect(&[parse_code(code)]);
        let method = &model.controllers[0].methods[0];
        assert_eq!(method.throws, vec!["PetNotFoundError", "StoreClosedError"]);
    }

    #[test]
    fn test_reference_and_generic_parameter_types() {
        let code = r#"
            #[controller]
            pub struct PetController;

            impl PetController {
                pub fn update(&self, request: &HttpRequest, names: Vec<String>) {}
            }
        "#;

        let model = reflect(&[parse_code(code)]);
        let parameters = &model.controllers[0].methods[0].parameters;
        assert_eq!(parameters[0].data_type, "HttpRequest");
        assert_eq!(parameters[1].data_type, "Vec");
    }

    #[test]
    fn test_trait_impls_are_skipped() {
        let code = r#"
            #[controller]
            pub struct PetController;

            impl Clone for PetController {
                fn clone(&self) -> Self {
                    PetController
                }
            }
        "#;

        let model = reflect(&[parse_code(code)]);
        assert!(model.controllers[0].methods.is_empty());
    }
}

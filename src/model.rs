//! The in-memory documentation model.
//!
//! These types are what the readers produce and the serializer emits. Field
//! names follow the swagger-style camelCase wire format; optional fields are
//! omitted from the output entirely rather than serialized as null.

use serde::{Deserialize, Serialize};

/// Documentation for one handler method under one HTTP verb.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub http_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Always the handler method's declared name
    pub nickname: String,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub parameters: Vec<Parameter>,
    #[serde(rename = "errorResponses")]
    pub errors: Vec<ErrorResponse>,
}

/// Documentation for one formal handler-method parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_description: Option<String>,
    /// Where the value is taken from ("path" or "query"); absent when no
    /// binding annotation allowed it to be inferred
    #[serde(rename = "paramType", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowable_values: Option<AllowableValues>,
    pub required: bool,
    pub allow_multiple: bool,
    /// Simple name of the parameter's declared type
    pub data_type: String,
}

/// A declared constraint on a parameter's legal inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "valueType", rename_all = "UPPERCASE")]
pub enum AllowableValues {
    /// An enumerated set of legal values
    List { values: Vec<String> },
    /// A numeric range; `exclusive` marks open bounds
    Range { min: f64, max: f64, exclusive: bool },
}

/// One documented error outcome. The same code/reason pair may appear more
/// than once when declared in more than one source; no deduplication happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub reason: String,
}

/// Resource-listing entry for one controller: its normalized URI and the
/// description from the class-level API annotation, when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One documented path within a controller's documentation container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub operations: Vec<Operation>,
}

/// Per-controller documentation container.
///
/// Created empty by the configuration collaborator and filled with one
/// [`ApiEntry`] per documented path during assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerDocumentation {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    pub resource_path: String,
    pub apis: Vec<ApiEntry>,
}

impl ControllerDocumentation {
    /// Appends an operation under `path`, creating the entry on first use.
    pub fn add_operation(&mut self, path: &str, description: Option<String>, operation: Operation) {
        match self.apis.iter_mut().find(|api| api.path == path) {
            Some(api) => api.operations.push(operation),
            None => self.apis.push(ApiEntry {
                path: path.to_string(),
                description,
                operations: vec![operation],
            }),
        }
    }
}

/// The whole-application documentation tree: the resource listing plus the
/// per-controller containers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocumentation {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    /// One endpoint summary per documented controller
    pub apis: Vec<Endpoint>,
    pub controllers: Vec<ControllerDocumentation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_serialization_omits_absent_fields() {
        let operation = Operation {
            http_method: "GET".to_string(),
            summary: None,
            notes: None,
            nickname: "get_pet".to_string(),
            deprecated: false,
            tags: None,
            parameters: Vec::new(),
            errors: Vec::new(),
        };

        let json = serde_json::to_value(&operation).unwrap();
        assert_eq!(json["httpMethod"], "GET");
        assert_eq!(json["nickname"], "get_pet");
        assert!(json.get("summary").is_none());
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_parameter_wire_names() {
        let parameter = Parameter {
            name: "id".to_string(),
            description: Some("Pet id".to_string()),
            internal_description: None,
            location: Some("path".to_string()),
            default_value: None,
            allowable_values: None,
            required: true,
            allow_multiple: false,
            data_type: "u64".to_string(),
        };

        let json = serde_json::to_value(&parameter).unwrap();
        assert_eq!(json["paramType"], "path");
        assert_eq!(json["dataType"], "u64");
        assert_eq!(json["allowMultiple"], false);
    }

    #[test]
    fn test_allowable_values_variants() {
        let list = AllowableValues::List {
            values: vec!["a".to_string(), "b".to_string()],
        };
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["valueType"], "LIST");

        let range = AllowableValues::Range {
            min: 1.0,
            max: 5.0,
            exclusive: false,
        };
        let json = serde_json::to_value(&range).unwrap();
        assert_eq!(json["valueType"], "RANGE");
        assert_eq!(json["min"], 1.0);
    }

    #[test]
    fn test_add_operation_groups_by_path() {
        let mut docs = ControllerDocumentation {
            api_version: "1.0".to_string(),
            swagger_version: "1.1".to_string(),
            base_path: "/".to_string(),
            resource_path: "/pets".to_string(),
            apis: Vec::new(),
        };

        let operation = |nickname: &str| Operation {
            http_method: "GET".to_string(),
            summary: None,
            notes: None,
            nickname: nickname.to_string(),
            deprecated: false,
            tags: None,
            parameters: Vec::new(),
            errors: Vec::new(),
        };

        docs.add_operation("/pets/{id}", None, operation("get_pet"));
        docs.add_operation("/pets/{id}", None, operation("delete_pet"));
        docs.add_operation("/pets", None, operation("list_pets"));

        assert_eq!(docs.apis.len(), 2);
        assert_eq!(docs.apis[0].operations.len(), 2);
        assert_eq!(docs.apis[1].operations.len(), 1);
    }
}

//! Annotated pet-store controllers used by the integration tests. This file
//! is parsed as source text, never compiled.

#[controller]
#[request_mapping("/pets")]
#[api(description = "Everything about pets")]
pub struct PetController;

impl PetController {
    #[request_mapping(path = "/pets", method = "GET")]
    #[api_operation(value = "List pets", notes = "Paged pet listing", tags = "pets")]
    pub fn list_pets(
        &self,
        #[request_param(value = "page", required = false, default_value = "1")] page: u32,
        request: HttpRequest,
    ) -> Vec<Pet> {
        unimplemented!()
    }

    #[request_mapping(path = "/pets/{id}", method = "GET")]
    #[api_operation(value = "Find pet by ID", notes = "Lookup a single pet", tags = "pets,store")]
    #[api_errors(error(code = 400, reason = "Invalid id supplied"))]
    #[throws(PetNotFoundError, StoreClosedError)]
    pub fn get_pet(&self, #[path_variable("id")] id: u64) -> Pet {
        unimplemented!()
    }

    #[request_mapping(path = "/pets", method = "POST")]
    #[deprecated]
    pub fn create_pet(
        &self,
        #[api_param(name = "pet", value = "The pet to add", required = true)] pet: NewPet,
    ) -> Pet {
        unimplemented!()
    }
}

/// The built-in documentation endpoint; excluded from its own output.
#[controller]
#[request_mapping("/docs")]
pub struct DocumentationController;

impl DocumentationController {
    #[request_mapping(path = "/docs", method = "GET")]
    pub fn serve_docs(&self) -> String {
        unimplemented!()
    }
}

/// Has handler methods but no class-level route mapping; skipped with a
/// warning.
#[controller]
pub struct OrphanController;

impl OrphanController {
    #[request_mapping(path = "/orphan", method = "GET")]
    pub fn orphan(&self) {}
}

#[api_error(code = 404, reason = "Pet not found")]
pub struct PetNotFoundError;

pub struct StoreClosedError;

pub struct Pet {
    pub id: u64,
    pub name: String,
}

pub struct NewPet {
    pub name: String,
}

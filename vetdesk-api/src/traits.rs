use async_trait::async_trait;

use crate::cep::CepAddress;
use crate::error::Result;
use crate::registration::TutorWithPetRequest;
use crate::types::{ListQuery, ListResult};

/// A paginated, searchable, deletable collection.
///
/// The list component only ever talks to this seam; the HTTP-backed
/// implementation is [`ResourceEndpoint`](crate::resources::ResourceEndpoint).
#[async_trait]
pub trait ListSource<R>: Send + Sync {
    /// Fetch one page.
    ///
    /// Errors are returned once, never retried.
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListResult<R>>;

    /// Delete one record by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// CEP to address resolution.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// `Ok(None)` when the code is unknown.
    async fn lookup_cep(&self, cep: &str) -> Result<Option<CepAddress>>;
}

/// Creates a tutor together with their first pet.
#[async_trait]
pub trait TutorRegistrar: Send + Sync {
    async fn register_tutor_with_pet(&self, request: &TutorWithPetRequest) -> Result<()>;
}

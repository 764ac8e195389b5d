//! The registry abstraction consumed by the views.

use std::sync::Arc;

use async_trait::async_trait;

use locator_core::{PagedResult, PersonRecord, RegistryError, SearchQuery, TipSubmission};

/// Read/write access to the missing-persons registry.
///
/// Implementations hold no mutable session state and may be shared between
/// views via `Arc<dyn Registry>`.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Fetch one page of records. An empty page is a success.
    async fn search(&self, query: &SearchQuery) -> Result<PagedResult, RegistryError>;

    /// Fetch a single record. A blank `id` fails with `InvalidArgument`
    /// before any I/O.
    async fn get_by_id(&self, id: &str) -> Result<PersonRecord, RegistryError>;

    /// Send a tip. Not idempotent: retrying after a network failure may
    /// deliver the tip twice.
    async fn submit_tip(&self, tip: &TipSubmission) -> Result<(), RegistryError>;
}

#[async_trait]
impl<R: Registry + ?Sized> Registry for Arc<R> {
    async fn search(&self, query: &SearchQuery) -> Result<PagedResult, RegistryError> {
        (**self).search(query).await
    }

    async fn get_by_id(&self, id: &str) -> Result<PersonRecord, RegistryError> {
        (**self).get_by_id(id).await
    }

    async fn submit_tip(&self, tip: &TipSubmission) -> Result<(), RegistryError> {
        (**self).submit_tip(tip).await
    }
}

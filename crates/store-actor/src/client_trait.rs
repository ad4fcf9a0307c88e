//! # EntityClient Trait
//!
//! Shared interface for the domain-specific client wrappers. A wrapper
//! supplies access to its inner [`StoreClient`] and an error mapping; `get`,
//! `query` and `delete` come for free.

use crate::{StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the standard read and delete
/// operations.
#[async_trait]
pub trait EntityClient<T: StoreEntity>: Send + Sync {
    /// The wrapper's error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &StoreClient<T>;

    /// Map framework errors to the wrapper's error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch all records matching a filter, in id order.
    #[tracing::instrument(skip(self))]
    async fn query(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(filter).await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}

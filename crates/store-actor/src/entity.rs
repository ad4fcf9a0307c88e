//! # StoreEntity Trait
//!
//! The contract every stored record type must implement to be managed by a
//! [`StoreActor`](crate::StoreActor). Associated types pin down the DTOs,
//! filters, actions and errors for the type, so a client for one entity
//! cannot be fed another entity's payloads.
//!
//! Construction ([`StoreEntity::from_create_params`]) is synchronous and is
//! where field validation belongs. The lifecycle hooks (`on_create`,
//! `on_update`, `on_delete`) are async so an entity can consult other stores
//! through its [`StoreEntity::Context`]; the hooks with default bodies only
//! need implementing when there is something to do.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait implemented by every record type a [`StoreActor`](crate::StoreActor)
/// can manage.
///
/// # Context
/// `Context` carries the entity's runtime dependencies (typically clients of
/// other stores) and is injected into every hook. Use `()` when the entity
/// has none.
#[async_trait]
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// Typed record identifier. `From<u32>` lets the actor generate fresh
    /// ids from its internal counter; `Ord` gives queries a stable order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a record.
    type Create: Send + Sync + Debug;

    /// Partial-update payload.
    type Update: Send + Sync + Debug;

    /// Entity-specific operations that must run atomically on one record
    /// (e.g. check-and-decrement of stock).
    type Action: Send + Sync + Debug;

    /// Result type of [`StoreEntity::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Field-equality filter evaluated by [`StoreEntity::matches`].
    type Filter: Send + Sync + Debug;

    /// Runtime dependencies injected via [`StoreActor::run`](crate::StoreActor::run).
    type Context: Send + Sync;

    /// The entity's error type, surfaced to callers through
    /// [`StoreError::EntityError`](crate::StoreError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its id and creation payload. Runs before
    /// `on_create`; field validation belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this record satisfies a query filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Store-wide unique key for this record, if the collection enforces
    /// one. The actor rejects a write whose key is already held by another
    /// record.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Called after construction, before the record is stored. Use for
    /// cross-store validation and for filling denormalized fields.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a partial update. The actor applies this to a copy and commits
    /// only on success, so a failed update leaves the stored record intact.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Run an entity-specific action against this record.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

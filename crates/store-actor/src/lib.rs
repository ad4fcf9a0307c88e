//! # Store Actor
//!
//! A small framework for actor-backed document stores. Each entity type gets
//! its own [`StoreActor`], a Tokio task that owns an in-memory collection and
//! processes requests sequentially over an mpsc channel. Because every read
//! and write for a given collection flows through one task, there is no
//! shared mutable state and no locking: check-and-mutate operations (stock
//! reservation, uniqueness checks) are atomic by construction.
//!
//! ## Store primitives
//!
//! A store exposes the operations of a typical hosted document database:
//!
//! - **Insert** — create a record under a freshly generated id
//! - **Get** — fetch a record by id
//! - **Query** — fetch all records matching an entity-defined [`StoreEntity::Filter`]
//! - **Update** — apply a partial-update payload to one record
//! - **Set** — create-or-replace a record under a caller-chosen id
//! - **Delete** — remove a record
//! - **Action** — run an entity-specific operation against one record,
//!   atomically with respect to every other request on that store
//!
//! ## Layers
//!
//! 1. **Entity** ([`StoreEntity`]) — the domain type plus its DTOs,
//!    validation and action handlers.
//! 2. **Actor** ([`StoreActor`]) — the message loop, id generation and the
//!    unique-key index.
//! 3. **Client** ([`StoreClient`], [`EntityClient`]) — the type-safe async
//!    interface handed to the rest of the application.
//!
//! Dependencies between stores are injected late: an actor receives its
//! [`StoreEntity::Context`] (usually clients of other stores) through
//! [`StoreActor::run`], not at construction time, so wiring stays acyclic.
//!
//! ## Uniqueness
//!
//! An entity may declare a store-wide unique key via
//! [`StoreEntity::unique_key`]. The actor maintains the index next to the
//! collection and rejects a conflicting insert, set or update with
//! [`StoreError::Duplicate`] before anything is written. Since all writes to
//! the collection are serialized through the actor, the check cannot race.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`mock::MockStore`], a drop-in stand-in for
//! a store that replays scripted responses, plus raw channel helpers for
//! asserting on individual requests.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::EntityClient;
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};

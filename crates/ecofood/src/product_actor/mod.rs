//! # Product Store
//!
//! Catalog of products published by companies. Beyond CRUD and queries, the
//! store handles the two stock actions the order workflow depends on:
//!
//! - [`ProductAction::CheckStock`] — read the current quantity;
//! - [`ProductAction::ReserveStock`] — re-validate sufficiency and decrement
//!   in one step. Because the store processes requests sequentially, two
//!   reservations against the same product can never interleave: the loser
//!   of a race sees the already-decremented quantity and fails cleanly.
//!
//! Stock can therefore never go negative, and a product driven to zero
//! simply derives `out-of-stock` on its next read.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use store_actor::{StoreActor, StoreClient};

/// Creates the product store actor and its generic client.
pub fn new() -> (StoreActor<Product>, StoreClient<Product>) {
    StoreActor::new(32)
}

//! Type-safe wrappers around [`StoreClient`](store_actor::StoreClient).
//!
//! Each wrapper exposes the operations its screen surfaces actually use,
//! maps framework errors back to the domain error type (downcasting boxed
//! entity errors to their concrete enum), and inherits `get`/`query`/
//! `delete` from [`EntityClient`](store_actor::EntityClient).

pub mod account_client;
pub mod order_client;
pub mod product_client;

pub use account_client::*;
pub use order_client::*;
pub use product_client::*;

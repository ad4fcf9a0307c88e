//! # Account Store
//!
//! Clients, companies and administrators in one collection, distinguished by
//! the role attribute. The lowercased email is the store's unique key, so
//! two registrations for the same address cannot both succeed — the check
//! and the insert happen inside a single store message.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Account;
use store_actor::{StoreActor, StoreClient};

/// Creates the account store actor and its generic client.
pub fn new() -> (StoreActor<Account>, StoreClient<Account>) {
    StoreActor::new(32)
}

//! # Order Store
//!
//! The order workflow. An order enters as `pending` after cross-store
//! validation in the entity's `on_create` hook (client exists and is a
//! client, product exists and is orderable, requested quantity is covered by
//! the stock on record). Resolution happens through actions:
//!
//! - [`OrderAction::Approve`] — re-validates stock sufficiency *at approval
//!   time* by asking the product store to reserve the quantity (an atomic
//!   check-and-decrement), then flips the order to `approved`. The reserve
//!   is the only fallible step and it precedes the status flip, so the
//!   workflow can never decrement stock without approving, nor approve
//!   without decrementing.
//! - [`OrderAction::Reject`] — flips a pending order to `rejected`; the
//!   product record is never touched.
//! - [`OrderAction::MarkDelivered`] — company confirms hand-over of an
//!   approved order.
//!
//! Every transition is checked against the status table; resolving the same
//! order twice fails with an invalid-transition error.
//!
//! Creation does not reserve stock: the sufficiency check at that point is
//! advisory, and two pending orders may together ask for more than is on
//! record. The conflict is settled at approval, where the later approval
//! fails cleanly.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::model::Order;
use store_actor::{StoreActor, StoreClient};

/// Creates the order store actor and its generic client. The account and
/// product clients it validates against are injected via `run`.
pub fn new() -> (StoreActor<Order>, StoreClient<Order>) {
    StoreActor::new(32)
}

//! Client orders and their state machine.
//!
//! An order snapshots the product name and the owning company at creation
//! time, so order listings stay readable even after the product record
//! changes. Orders are never deleted; resolution only moves the status
//! forward along the transition table below.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{AccountId, ProductId};

/// Type-safe identifier for orders.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(format!("order_{id}"))
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order lifecycle: `Pending → {Approved, Rejected}`, `Approved → Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "rejected")]
    Rejected,
    #[serde(rename = "delivered")]
    Delivered,
}

impl OrderStatus {
    /// Returns true if moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Approved)
                | (OrderStatus::Pending, OrderStatus::Rejected)
                | (OrderStatus::Approved, OrderStatus::Delivered)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Delivered => "delivered",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub client_id: AccountId,
    pub product_id: ProductId,
    /// Owning company at creation time (denormalized from the product).
    pub company_id: AccountId,
    /// Product name at creation time (denormalized from the product).
    pub product_name: String,
    pub quantity: u32,
    pub created_on: NaiveDate,
    pub status: OrderStatus,
}

/// Payload for placing an order. The company reference, product name and
/// creation date are filled in from the product record when the order is
/// admitted.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub client_id: AccountId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Field-equality filters over the order store.
#[derive(Debug, Clone)]
pub enum OrderFilter {
    ByClient(AccountId),
    ByCompany(AccountId),
    ByStatus(OrderStatus),
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;

    #[test]
    fn transition_table() {
        assert!(Pending.can_transition_to(&Approved));
        assert!(Pending.can_transition_to(&Rejected));
        assert!(Approved.can_transition_to(&Delivered));

        assert!(!Approved.can_transition_to(&Rejected));
        assert!(!Rejected.can_transition_to(&Approved));
        assert!(!Rejected.can_transition_to(&Delivered));
        assert!(!Delivered.can_transition_to(&Pending));
        assert!(!Pending.can_transition_to(&Delivered));
        assert!(!Pending.can_transition_to(&Pending));
    }
}

//! Resolution actions for the order store.

use crate::model::OrderStatus;

/// Operations that resolve an order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Approve a pending order, reserving its quantity from the product's
    /// stock in the same step.
    Approve,
    /// Reject a pending order. Stock is not touched.
    Reject,
    /// Record that an approved order was handed over.
    MarkDelivered,
}

/// Result of an [`OrderAction`]: the status the order ended up in.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    StatusChanged(OrderStatus),
}

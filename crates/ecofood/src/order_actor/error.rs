//! Error types for the order store.

use thiserror::Error;

use crate::model::{OrderStatus, ProductStatus};
use crate::validate::ValidationError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The ordering account does not exist or is not a client.
    #[error("Invalid client: {0}")]
    InvalidClient(String),

    /// The product referenced by the order does not exist.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// The product cannot be ordered in its current state.
    #[error("Product not orderable (status: {0})")]
    ProductUnavailable(ProductStatus),

    /// The requested quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// There is not enough stock to cover the order.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The order is not in a state that allows the requested transition.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A field failed validation.
    #[error("Order validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An error occurred while communicating with a store.
    #[error("Order store error: {0}")]
    Store(String),
}

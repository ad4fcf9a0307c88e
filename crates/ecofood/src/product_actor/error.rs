//! Error types for the product store.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (zero).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// A field failed validation.
    #[error("Product validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An error occurred while communicating with the store.
    #[error("Product store error: {0}")]
    Store(String),
}

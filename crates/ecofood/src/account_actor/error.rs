//! Error types for the account store.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur during account operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// The requested account was not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// An account with the same email already exists.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// A field failed validation.
    #[error("Account validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The account is not a company, but the operation requires one.
    #[error("Account is not a company: {0}")]
    NotACompany(String),

    /// A company cannot be deleted while it still owns products.
    #[error("Company still owns {0} product(s)")]
    CompanyHasProducts(usize),

    /// A company cannot be deleted while accounts are linked to it.
    #[error("Company still has {0} linked account(s)")]
    CompanyHasUsers(usize),

    /// An error occurred while communicating with the store.
    #[error("Account store error: {0}")]
    Store(String),
}

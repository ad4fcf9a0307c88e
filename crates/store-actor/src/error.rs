//! # Framework Errors
//!
//! Errors raised by the store machinery itself. Entity-specific failures
//! travel boxed inside [`StoreError::EntityError`] and can be downcast back
//! to their concrete type by client wrappers.

/// Errors that can occur within the store framework.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store closed")]
    ActorClosed,
    #[error("store dropped response channel")]
    ActorDropped,
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

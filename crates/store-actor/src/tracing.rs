//! # Observability
//!
//! Tracing setup shared by every binary and integration harness built on the
//! framework. Stores log each operation with structured fields
//! (`entity_type`, record id, collection size), clients add span context via
//! `#[instrument]`, and the subscriber below renders it compactly.
//!
//! Verbosity is controlled through `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per operation
//! RUST_LOG=debug cargo run     # full request payloads
//! ```

/// Initializes the global tracing subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type fields carry the context instead
        .compact()
        .init();
}

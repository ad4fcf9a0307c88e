//! # System Lifecycle & Orchestration
//!
//! Wiring the stores together is where the system's shape lives, and this
//! module is its single owner:
//!
//! 1. **Creation** — each store actor and its client come from the module's
//!    factory function, with no dependencies yet.
//! 2. **Wiring** — dependencies are injected when the actors start: the
//!    order actor receives the account and product clients as its context,
//!    and the account client carries the product client for the
//!    company-deletion checks. The dependency graph is acyclic, so channel
//!    closure alone drives shutdown.
//! 3. **Bootstrap** — a root administrator is provisioned under a fixed id
//!    so the admin panel is reachable on a fresh system.
//! 4. **Shutdown** — dropping the clients closes the request channels; each
//!    actor drains its queue and exits, and `shutdown` awaits them all.

pub mod system;

pub use system::*;

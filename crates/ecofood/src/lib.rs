//! # EcoFood
//!
//! Backend for a surplus-food marketplace: companies publish near-expiry or
//! surplus products, clients request them, and an administrator manages the
//! account base. Built on the [`store_actor`] framework — one store actor
//! per collection (accounts, products, orders), so every stock mutation and
//! status transition is serialized through the owning store.
//!
//! ## Module map
//!
//! - [`model`] — domain types: [`Product`](model::Product) with its derived
//!   status, [`Order`](model::Order) and its state machine,
//!   [`Account`](model::Account) with roles.
//! - [`product_actor`], [`order_actor`], [`account_actor`] — the
//!   [`StoreEntity`](store_actor::StoreEntity) implementations; the order
//!   workflow (create / approve / reject / deliver) lives in the order
//!   entity's hooks and actions.
//! - [`clients`] — typed wrappers over the generic store clients.
//! - [`auth`] — the identity/session layer: registration, sign-in,
//!   verification and password-reset tokens, and the session-changed
//!   observable.
//! - [`access`] — the role gate for the route trees.
//! - [`validate`] — the declarative field-rule tables shared by every
//!   create/update path.
//! - [`geo`] — region/commune reference data.
//! - [`lifecycle`] — [`EcoFoodSystem`](lifecycle::EcoFoodSystem), the
//!   orchestrator that wires and runs everything.

pub mod access;
pub mod account_actor;
pub mod auth;
pub mod clients;
pub mod geo;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod validate;

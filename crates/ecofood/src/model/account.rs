//! Accounts: clients, companies and administrators.
//!
//! A single record type carries all three roles; the role decides which of
//! the optional fields are required (see [`crate::validate`]). The email is
//! the store-wide unique key and is fixed at registration — profile updates
//! cover everything else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for accounts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl From<u32> for AccountId {
    fn from(id: u32) -> Self {
        Self(format!("account_{id}"))
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role attribute every access-control decision is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "cliente")]
    Client,
    #[serde(rename = "empresa")]
    Company,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Client => "cliente",
            Role::Company => "empresa",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Street address; required for clients and companies.
    pub address: Option<String>,
    pub region: Option<String>,
    pub commune: Option<String>,
    /// Clients only; 8–12 digits when present.
    pub phone: Option<String>,
    /// Tax identifier; companies only.
    pub rut: Option<String>,
    /// Set on accounts that belong to a company (blocks that company's
    /// deletion while present).
    pub company_id: Option<AccountId>,
    pub registered_on: NaiveDate,
}

/// Payload for registering an account.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub address: Option<String>,
    pub region: Option<String>,
    pub commune: Option<String>,
    pub phone: Option<String>,
    pub rut: Option<String>,
    pub company_id: Option<AccountId>,
}

impl AccountCreate {
    /// A client registration with the commonly required fields.
    pub fn client(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        region: impl Into<String>,
        commune: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Client,
            address: Some(address.into()),
            region: Some(region.into()),
            commune: Some(commune.into()),
            phone: None,
            rut: None,
            company_id: None,
        }
    }

    /// A company registration.
    pub fn company(
        name: impl Into<String>,
        email: impl Into<String>,
        rut: impl Into<String>,
        address: impl Into<String>,
        region: impl Into<String>,
        commune: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Company,
            address: Some(address.into()),
            region: Some(region.into()),
            commune: Some(commune.into()),
            phone: None,
            rut: Some(rut.into()),
            company_id: None,
        }
    }

    /// An administrator record (admin-panel provisioning).
    pub fn admin(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Admin,
            address: None,
            region: None,
            commune: None,
            phone: None,
            rut: None,
            company_id: None,
        }
    }
}

/// Profile update payload. Email and role are immutable after registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub region: Option<String>,
    pub commune: Option<String>,
    pub phone: Option<String>,
    pub rut: Option<String>,
}

/// Field-equality filters over the account store.
#[derive(Debug, Clone)]
pub enum AccountFilter {
    ByRole(Role),
    ByEmail(String),
    /// Accounts linked to a company through `company_id`.
    ByCompany(AccountId),
}

//! Entity trait implementation for the Account domain type.

use async_trait::async_trait;
use chrono::Utc;
use store_actor::StoreEntity;

use super::error::AccountError;
use crate::model::{Account, AccountCreate, AccountFilter, AccountId, AccountUpdate};
use crate::validate;

impl Account {
    fn normalized_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

#[async_trait]
impl StoreEntity for Account {
    type Id = AccountId;
    type Create = AccountCreate;
    type Update = AccountUpdate;
    type Action = ();
    type ActionResult = ();
    type Filter = AccountFilter;
    type Context = ();
    type Error = AccountError;

    fn from_create_params(id: AccountId, params: AccountCreate) -> Result<Self, AccountError> {
        validate::account_create(&params)?;
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
            email: Self::normalized_email(&params.email),
            role: params.role,
            address: params.address,
            region: params.region,
            commune: params.commune,
            phone: params.phone,
            rut: params.rut,
            company_id: params.company_id,
            registered_on: Utc::now().date_naive(),
        })
    }

    fn matches(&self, filter: &AccountFilter) -> bool {
        match filter {
            AccountFilter::ByRole(role) => self.role == *role,
            AccountFilter::ByEmail(email) => self.email == Self::normalized_email(email),
            AccountFilter::ByCompany(company_id) => self.company_id.as_ref() == Some(company_id),
        }
    }

    /// Registered email, lowercased — one account per address.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    /// Applies a profile edit. Email and role are not editable.
    async fn on_update(&mut self, update: AccountUpdate, _ctx: &()) -> Result<(), AccountError> {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(region) = update.region {
            self.region = Some(region);
        }
        if let Some(commune) = update.commune {
            self.commune = Some(commune);
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(rut) = update.rut {
            self.rut = Some(rut);
        }

        validate::check_text(&validate::account::NAME, &self.name)?;
        validate::check_opt_text(&validate::account::PHONE, self.phone.as_deref())?;
        match self.role {
            crate::model::Role::Admin => {}
            crate::model::Role::Client => {
                validate::check_opt_text(&validate::account::ADDRESS, self.address.as_deref())?;
                validate::region_commune(self.region.as_deref(), self.commune.as_deref())?;
            }
            crate::model::Role::Company => {
                validate::check_opt_text(&validate::account::RUT, self.rut.as_deref())?;
                validate::check_opt_text(&validate::account::ADDRESS, self.address.as_deref())?;
                validate::region_commune(self.region.as_deref(), self.commune.as_deref())?;
            }
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), AccountError> {
        Ok(())
    }
}

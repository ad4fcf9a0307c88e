//! Entity trait implementation for the Product domain type.
//!
//! Creation and edits run the shared product rule table; the stock actions
//! implement the check-and-decrement the order workflow relies on.

use async_trait::async_trait;
use chrono::Utc;
use store_actor::StoreEntity;

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductCreate, ProductFilter, ProductId, ProductUpdate};
use crate::validate;

#[async_trait]
impl StoreEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Filter = ProductFilter;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        let today = Utc::now().date_naive();
        validate::product_fields(
            &params.name,
            &params.description,
            params.price,
            params.quantity,
            params.expiry,
            today,
        )?;
        Ok(Self {
            id,
            company_id: params.company_id,
            name: params.name.trim().to_string(),
            description: params.description.trim().to_string(),
            price: params.price,
            quantity: params.quantity,
            expiry: params.expiry,
        })
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        match filter {
            ProductFilter::ByCompany(company_id) => &self.company_id == company_id,
            ProductFilter::Orderable { on } => self.orderable(*on),
        }
    }

    /// Applies an edit, re-running the full rule table against the
    /// resulting field set.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(expiry) = update.expiry {
            self.expiry = Some(expiry);
        }
        let today = Utc::now().date_naive();
        validate::product_fields(
            &self.name,
            &self.description,
            self.price,
            self.quantity,
            self.expiry,
            today,
        )?;
        Ok(())
    }

    /// Handles the stock actions.
    ///
    /// `ReserveStock` is the only place stock is ever decremented; it fails
    /// whole (no partial decrement) when the product cannot cover the
    /// requested quantity.
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
            ProductAction::ReserveStock(quantity) => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.quantity < quantity {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: self.quantity,
                    });
                }
                self.quantity -= quantity;
                Ok(ProductActionResult::ReserveStock(()))
            }
        }
    }
}

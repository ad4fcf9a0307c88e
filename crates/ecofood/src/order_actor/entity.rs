//! Entity trait implementation for the Order domain type.
//!
//! The order entity depends on the account and product stores; their clients
//! arrive as the actor's context, injected at `run` time.

use async_trait::async_trait;
use chrono::Utc;
use store_actor::{EntityClient, StoreEntity};

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::clients::{AccountClient, ProductClient};
use crate::model::{
    AccountId, Order, OrderCreate, OrderFilter, OrderId, OrderStatus, Role,
};
use crate::product_actor::ProductError;

/// Clients the order entity validates and reserves against.
pub type OrderContext = (AccountClient, ProductClient);

fn product_error(e: ProductError) -> OrderError {
    match e {
        ProductError::NotFound(id) => OrderError::InvalidProduct(id),
        ProductError::InsufficientStock {
            requested,
            available,
        } => OrderError::InsufficientStock {
            requested,
            available,
        },
        other => OrderError::Store(other.to_string()),
    }
}

#[async_trait]
impl StoreEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.quantity == 0 {
            return Err(OrderError::InvalidQuantity(params.quantity));
        }
        Ok(Self {
            id,
            client_id: params.client_id,
            product_id: params.product_id,
            // Filled from the product record in on_create.
            company_id: AccountId(String::new()),
            product_name: String::new(),
            quantity: params.quantity,
            created_on: Utc::now().date_naive(),
            status: OrderStatus::Pending,
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::ByClient(client_id) => &self.client_id == client_id,
            OrderFilter::ByCompany(company_id) => &self.company_id == company_id,
            OrderFilter::ByStatus(status) => self.status == *status,
        }
    }

    /// Validates the order against the account and product stores and takes
    /// the denormalized snapshots. Stock is checked but not reserved.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        let (accounts, products) = ctx;

        let account = accounts
            .get(self.client_id.clone())
            .await
            .map_err(|e| OrderError::Store(e.to_string()))?
            .ok_or_else(|| OrderError::InvalidClient(self.client_id.to_string()))?;
        if account.role != Role::Client {
            return Err(OrderError::InvalidClient(self.client_id.to_string()));
        }

        let product = products
            .get(self.product_id.clone())
            .await
            .map_err(|e| OrderError::Store(e.to_string()))?
            .ok_or_else(|| OrderError::InvalidProduct(self.product_id.to_string()))?;

        let today = Utc::now().date_naive();
        if !product.orderable(today) {
            return Err(OrderError::ProductUnavailable(product.status(today)));
        }
        if product.quantity < self.quantity {
            return Err(OrderError::InsufficientStock {
                requested: self.quantity,
                available: product.quantity,
            });
        }

        self.company_id = product.company_id;
        self.product_name = product.name;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), OrderError> {
        Ok(())
    }

    /// Resolves the order.
    ///
    /// Approval asks the product store to reserve the quantity before the
    /// status flips; the reserve is atomic inside the product store, and
    /// the flip cannot fail, so the two records cannot diverge.
    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        let (_, products) = ctx;
        let target = match action {
            OrderAction::Approve => OrderStatus::Approved,
            OrderAction::Reject => OrderStatus::Rejected,
            OrderAction::MarkDelivered => OrderStatus::Delivered,
        };
        if !self.status.can_transition_to(&target) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        if target == OrderStatus::Approved {
            products
                .reserve_stock(self.product_id.clone(), self.quantity)
                .await
                .map_err(product_error)?;
        }
        self.status = target;
        Ok(OrderActionResult::StatusChanged(target))
    }
}

//! # Order Client
//!
//! High-level API for the order store: placement for client screens,
//! pending-request listings and resolution for company screens.
//! Cross-store validation and the approval-time stock reservation happen in
//! the order entity's hooks, inside the store.

use async_trait::async_trait;
use store_actor::{EntityClient, StoreClient, StoreError};
use tracing::{debug, instrument};

use crate::model::{AccountId, Order, OrderCreate, OrderFilter, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Client for interacting with the order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<Order>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> OrderError {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            StoreError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(err) => *err,
                Err(other) => OrderError::Store(other.to_string()),
            },
            other => OrderError::Store(other.to_string()),
        }
    }
}

impl OrderClient {
    /// Place an order. Validation runs in the order entity's `on_create`.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending create_order to store");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Approve a pending order, reserving its stock.
    #[instrument(skip(self))]
    pub async fn approve(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.resolve(id, OrderAction::Approve).await
    }

    /// Reject a pending order.
    #[instrument(skip(self))]
    pub async fn reject(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.resolve(id, OrderAction::Reject).await
    }

    /// Record an approved order as delivered.
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.resolve(id, OrderAction::MarkDelivered).await
    }

    async fn resolve(&self, id: OrderId, action: OrderAction) -> Result<OrderStatus, OrderError> {
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::StatusChanged(status) => Ok(status),
        }
    }

    /// A client's own orders.
    #[instrument(skip(self))]
    pub async fn orders_by_client(&self, client_id: AccountId) -> Result<Vec<Order>, OrderError> {
        self.query(OrderFilter::ByClient(client_id)).await
    }

    /// Orders against a company's products.
    #[instrument(skip(self))]
    pub async fn orders_by_company(&self, company_id: AccountId) -> Result<Vec<Order>, OrderError> {
        self.query(OrderFilter::ByCompany(company_id)).await
    }

    /// All orders awaiting resolution.
    #[instrument(skip(self))]
    pub async fn pending_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.query(OrderFilter::ByStatus(OrderStatus::Pending)).await
    }
}

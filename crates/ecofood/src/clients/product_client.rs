//! # Product Client
//!
//! High-level API for the product store: catalog management for company
//! screens, orderable listings for client screens, and the stock actions
//! used by the order workflow.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use store_actor::{EntityClient, StoreClient, StoreError};
use tracing::{debug, instrument};

use crate::model::{AccountId, Product, ProductCreate, ProductFilter, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the product store.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<Product>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> ProductError {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            StoreError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(err) => *err,
                Err(other) => ProductError::Store(other.to_string()),
            },
            other => ProductError::Store(other.to_string()),
        }
    }
}

impl ProductClient {
    /// Publish a product.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Edit a product.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// All products published by a company.
    #[instrument(skip(self))]
    pub async fn products_by_company(
        &self,
        company_id: AccountId,
    ) -> Result<Vec<Product>, ProductError> {
        self.query(ProductFilter::ByCompany(company_id)).await
    }

    /// Products a client may order as of `on`.
    #[instrument(skip(self))]
    pub async fn orderable_products(&self, on: NaiveDate) -> Result<Vec<Product>, ProductError> {
        self.query(ProductFilter::Orderable { on }).await
    }

    /// Products a client may order today.
    pub async fn orderable_products_today(&self) -> Result<Vec<Product>, ProductError> {
        self.orderable_products(Utc::now().date_naive()).await
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            _ => unreachable!("CheckStock action must return CheckStock result"),
        }
    }

    /// Reserve a quantity of stock for a product.
    ///
    /// Returns `Ok(())` on success; fails with
    /// [`ProductError::InsufficientStock`] without touching the record when
    /// the stock cannot cover the request.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<(), ProductError> {
        debug!(quantity, "Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReserveStock(()) => Ok(()),
            _ => unreachable!("ReserveStock action must return ReserveStock result"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_actor::mock::{expect_action, mock_client};

    #[tokio::test]
    async fn check_stock_returns_the_reported_level() {
        let (client, mut receiver) = mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task = tokio::spawn(async move {
            product_client.check_stock(ProductId::from(1)).await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId::from(1));
        assert!(matches!(action, ProductAction::CheckStock));

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn reserve_stock_passes_the_quantity_through() {
        let (client, mut receiver) = mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task = tokio::spawn(async move {
            product_client.reserve_stock(ProductId::from(1), 5).await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId::from(1));
        match action {
            ProductAction::ReserveStock(quantity) => assert_eq!(quantity, 5),
            other => panic!("Expected ReserveStock, got {other:?}"),
        }

        responder
            .send(Ok(ProductActionResult::ReserveStock(())))
            .unwrap();

        assert!(reserve_task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn reserve_stock_surfaces_the_typed_error() {
        let (client, mut receiver) = mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task = tokio::spawn(async move {
            product_client.reserve_stock(ProductId::from(1), 100).await
        });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        responder
            .send(Err(StoreError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    requested: 100,
                    available: 7,
                },
            ))))
            .unwrap();

        let err = reserve_task.await.unwrap().unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                requested: 100,
                available: 7,
            }
        );
    }
}

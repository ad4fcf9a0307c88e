//! The runtime orchestrator for the EcoFood backend.

use tracing::{error, info};

use crate::account_actor::{self, AccountError};
use crate::auth::AuthService;
use crate::clients::{AccountClient, OrderClient, ProductClient};
use crate::model::{AccountCreate, AccountId};
use crate::{order_actor, product_actor};

/// Fixed id of the provisioned root administrator.
pub const ROOT_ADMIN_ID: &str = "admin_root";

/// The assembled system: three store actors and the identity layer.
///
/// # Example
///
/// ```ignore
/// let system = EcoFoodSystem::start().await?;
/// let products = system.products.orderable_products_today().await?;
/// system.shutdown().await?;
/// ```
pub struct EcoFoodSystem {
    pub auth: AuthService,
    pub accounts: AccountClient,
    pub products: ProductClient,
    pub orders: OrderClient,

    /// Task handles for all running actors, used for graceful shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EcoFoodSystem {
    /// Creates, wires and starts the whole system, and seeds the root
    /// administrator.
    pub async fn start() -> Result<Self, AccountError> {
        // Product store: no dependencies.
        let (product_actor, product_store) = product_actor::new();
        let products = ProductClient::new(product_store);
        let product_handle = tokio::spawn(product_actor.run(()));

        // Account store: the client needs the product client for the
        // company-deletion dependency checks.
        let (account_actor, account_store) = account_actor::new();
        let accounts = AccountClient::new(account_store, products.clone());
        let account_handle = tokio::spawn(account_actor.run(()));

        // Order store: validates and reserves through the other two.
        let (order_actor, order_store) = order_actor::new();
        let orders = OrderClient::new(order_store);
        let order_handle = tokio::spawn(order_actor.run((accounts.clone(), products.clone())));

        // A fresh system always has an administrator.
        accounts
            .put_account(
                AccountId(ROOT_ADMIN_ID.to_string()),
                AccountCreate::admin("Administrator", "admin@ecofood.cl"),
            )
            .await?;
        info!(id = ROOT_ADMIN_ID, "Root administrator provisioned");

        let auth = AuthService::new(accounts.clone());

        Ok(Self {
            auth,
            accounts,
            products,
            orders,
            handles: vec![product_handle, account_handle, order_handle],
        })
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops every client so the request channels close, then waits for
    /// each actor task to drain and exit. The order actor holds clones of
    /// the account and product clients in its context; those are released
    /// when its own loop ends, so the stores wind down in dependency order.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.auth);
        drop(self.accounts);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {e:?}");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

//! Demo run of the EcoFood backend.
//!
//! Walks the core flow end to end: a company and a client register and
//! verify their emails, the company publishes a surplus product, the client
//! orders part of the stock, and the company resolves the orders — showing
//! the approval-time stock check in action when a second order asks for
//! more than remains.

use ecofood::access::{self, SessionState};
use ecofood::auth::MailEvent;
use ecofood::lifecycle::EcoFoodSystem;
use ecofood::model::{AccountCreate, OrderCreate, ProductCreate};
use rust_decimal::Decimal;
use store_actor::tracing::setup_tracing;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    info!("Starting EcoFood system");
    let system = EcoFoodSystem::start().await?;

    // Register and verify the two actors of the scenario.
    let span = tracing::info_span!("registration");
    let (company_id, client_id) = async {
        let company_id = system
            .auth
            .sign_up(
                AccountCreate::company(
                    "Panadería Lucero",
                    "contacto@lucero.cl",
                    "76543210-k",
                    "Calle Larga 45",
                    "Valparaíso",
                    "Quilpué",
                ),
                "masa123",
            )
            .await?;
        let client_id = system
            .auth
            .sign_up(
                AccountCreate::client(
                    "Juana Rivas",
                    "juana@example.com",
                    "Av. Siempre Viva 123",
                    "Metropolitana",
                    "Ñuñoa",
                ),
                "pan4567",
            )
            .await?;

        // Both click the links from their verification mails.
        for mail in system.auth.mail_outbox() {
            if let MailEvent::Verification { token, .. } = mail {
                system.auth.verify_email(&token)?;
            }
        }
        Ok::<_, Box<dyn std::error::Error>>((company_id, client_id))
    }
    .instrument(span)
    .await?;

    info!(%company_id, %client_id, "Accounts ready");

    // The company signs in; the gate admits it to its own tree only.
    let session = system.auth.sign_in("contacto@lucero.cl", "masa123").await?;
    let state = SessionState::Authenticated(session);
    info!(
        empresa = ?access::resolve("/empresa/productos", &state),
        admin = ?access::resolve("/admin/empresas", &state),
        "Gate decisions for the company session"
    );

    // Publish a donation: five units, price zero.
    let product_id = system
        .products
        .create_product(ProductCreate {
            company_id: company_id.clone(),
            name: "Pan integral del día".to_string(),
            description: "Cinco hogazas del lote de ayer, para retiro hoy.".to_string(),
            price: Decimal::ZERO,
            quantity: 5,
            expiry: None,
        })
        .await?;
    let listed = system.products.orderable_products_today().await?;
    info!(%product_id, listed = listed.len(), "Product published");

    // The client asks for three units.
    let span = tracing::info_span!("order_processing");
    async {
        let first_order = system
            .orders
            .create_order(OrderCreate {
                client_id: client_id.clone(),
                product_id: product_id.clone(),
                quantity: 3,
            })
            .await?;
        info!(%first_order, "Order placed");

        let status = system.orders.approve(first_order.clone()).await?;
        let remaining = system.products.check_stock(product_id.clone()).await?;
        info!(%first_order, %status, remaining, "Order approved");

        // A second order for four units goes through, but approval fails:
        // only two units are left by now.
        let second_order = system
            .orders
            .create_order(OrderCreate {
                client_id: client_id.clone(),
                product_id: product_id.clone(),
                quantity: 2,
            })
            .await?;
        let third_order = system
            .orders
            .create_order(OrderCreate {
                client_id: client_id.clone(),
                product_id: product_id.clone(),
                quantity: 2,
            })
            .await?;
        system.orders.approve(second_order).await?;
        match system.orders.approve(third_order).await {
            Ok(status) => warn!(%status, "Unexpected approval"),
            Err(e) => info!(error = %e, "Approval correctly refused"),
        }

        system.orders.mark_delivered(first_order).await?;
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let pending = system.orders.pending_orders().await?;
    info!(pending = pending.len(), "Unresolved orders remaining");

    system.auth.sign_out();
    system.shutdown().await?;

    info!("Demo complete");
    Ok(())
}

use chrono::Utc;
use rust_decimal::Decimal;
use store_actor::EntityClient;

use ecofood::account_actor::AccountError;
use ecofood::auth::{AuthError, MailEvent};
use ecofood::lifecycle::EcoFoodSystem;
use ecofood::model::{
    AccountCreate, AccountId, AccountUpdate, OrderCreate, OrderStatus, ProductCreate,
    ProductId, ProductStatus, ProductUpdate, Role,
};
use ecofood::order_actor::OrderError;
use ecofood::product_actor::ProductError;

/// Full end-to-end tests with all real stores.

async fn register_company(system: &EcoFoodSystem, email: &str) -> AccountId {
    system
        .accounts
        .register(AccountCreate::company(
            "Panadería Lucero",
            email,
            "76543210-k",
            "Calle Larga 45",
            "Valparaíso",
            "Quilpué",
        ))
        .await
        .expect("company registration failed")
}

async fn register_client(system: &EcoFoodSystem, email: &str) -> AccountId {
    system
        .accounts
        .register(AccountCreate::client(
            "Juana Rivas",
            email,
            "Av. Siempre Viva 123",
            "Metropolitana",
            "Ñuñoa",
        ))
        .await
        .expect("client registration failed")
}

async fn publish(
    system: &EcoFoodSystem,
    company_id: &AccountId,
    price: i64,
    quantity: u32,
) -> ProductId {
    system
        .products
        .create_product(ProductCreate {
            company_id: company_id.clone(),
            name: "Pan integral del día".to_string(),
            description: "Hogazas del lote de ayer, para retiro hoy.".to_string(),
            price: Decimal::from(price),
            quantity,
            expiry: None,
        })
        .await
        .expect("product creation failed")
}

async fn place(
    system: &EcoFoodSystem,
    client_id: &AccountId,
    product_id: &ProductId,
    quantity: u32,
) -> ecofood::model::OrderId {
    system
        .orders
        .create_order(OrderCreate {
            client_id: client_id.clone(),
            product_id: product_id.clone(),
            quantity,
        })
        .await
        .expect("order creation failed")
}

/// The canonical scenario: a free product with five units, an approved
/// order for three, and a second pending order for four that must fail the
/// re-validated sufficiency check at approval time.
#[tokio::test]
async fn end_to_end_scenario() {
    let system = EcoFoodSystem::start().await.unwrap();
    let today = Utc::now().date_naive();

    let company_id = register_company(&system, "contacto@lucero.cl").await;
    let client_id = register_client(&system, "juana@example.com").await;
    let product_id = publish(&system, &company_id, 0, 5).await;

    // Both orders are placed while five units are on record.
    let first = place(&system, &client_id, &product_id, 3).await;
    let second = place(&system, &client_id, &product_id, 4).await;

    let product = system.products.get(product_id.clone()).await.unwrap().unwrap();
    assert_eq!(product.status(today), ProductStatus::Free);
    assert_eq!(product.quantity, 5, "creation must not touch stock");

    let first_order = system.orders.get(first.clone()).await.unwrap().unwrap();
    assert_eq!(first_order.status, OrderStatus::Pending);
    assert_eq!(first_order.quantity, 3);
    assert_eq!(first_order.company_id, company_id);

    // Approving the first order decrements the stock.
    assert_eq!(system.orders.approve(first).await.unwrap(), OrderStatus::Approved);
    assert_eq!(system.products.check_stock(product_id.clone()).await.unwrap(), 2);

    // The second order passed its advisory check at creation, but approval
    // re-validates against the two remaining units and refuses.
    let err = system.orders.approve(second.clone()).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InsufficientStock {
            requested: 4,
            available: 2,
        }
    );
    let second_order = system.orders.get(second).await.unwrap().unwrap();
    assert_eq!(second_order.status, OrderStatus::Pending);
    assert_eq!(system.products.check_stock(product_id).await.unwrap(), 2);

    // The company's request list sees both orders against its products.
    let incoming = system.orders.orders_by_company(company_id).await.unwrap();
    assert_eq!(incoming.len(), 2);
    assert_eq!(system.orders.pending_orders().await.unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejection_never_changes_stock() {
    let system = EcoFoodSystem::start().await.unwrap();

    let company_id = register_company(&system, "contacto@lucero.cl").await;
    let client_id = register_client(&system, "juana@example.com").await;
    let product_id = publish(&system, &company_id, 990, 10).await;

    let order = place(&system, &client_id, &product_id, 4).await;
    assert_eq!(system.orders.reject(order.clone()).await.unwrap(), OrderStatus::Rejected);

    assert_eq!(system.products.check_stock(product_id).await.unwrap(), 10);

    // A resolved order stays resolved.
    let err = system.orders.approve(order).await.unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn exhaustion_is_terminal_and_never_negative() {
    let system = EcoFoodSystem::start().await.unwrap();
    let today = Utc::now().date_naive();

    let company_id = register_company(&system, "contacto@lucero.cl").await;
    let client_id = register_client(&system, "juana@example.com").await;
    let product_id = publish(&system, &company_id, 500, 3).await;

    // Two pending orders, together asking for more than exists.
    let exact = place(&system, &client_id, &product_id, 3).await;
    let excess = place(&system, &client_id, &product_id, 2).await;

    // Driving the stock to exactly zero derives out-of-stock.
    system.orders.approve(exact).await.unwrap();
    assert_eq!(system.products.check_stock(product_id.clone()).await.unwrap(), 0);
    let product = system.products.get(product_id.clone()).await.unwrap().unwrap();
    assert_eq!(product.status(today), ProductStatus::OutOfStock);

    // The remaining pending order cannot be approved any more.
    let err = system.orders.approve(excess).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InsufficientStock {
            requested: 2,
            available: 0,
        }
    );
    assert_eq!(system.products.check_stock(product_id.clone()).await.unwrap(), 0);

    // New orders against the exhausted product are refused outright, and
    // the catalog no longer lists it as orderable.
    let err = system
        .orders
        .create_order(OrderCreate {
            client_id: client_id.clone(),
            product_id: product_id.clone(),
            quantity: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::ProductUnavailable(ProductStatus::OutOfStock));
    assert!(system
        .products
        .orderable_products_today()
        .await
        .unwrap()
        .is_empty());

    system.shutdown().await.unwrap();
}

/// Product edits run the same rule table as creation, and a rejected edit
/// leaves the stored record untouched.
#[tokio::test]
async fn product_edits_run_the_shared_rules() {
    let system = EcoFoodSystem::start().await.unwrap();

    let company_id = register_company(&system, "contacto@lucero.cl").await;
    let product_id = publish(&system, &company_id, 990, 10).await;

    let updated = system
        .products
        .update_product(
            product_id.clone(),
            ProductUpdate {
                price: Some(Decimal::new(49950, 2)), // 499.50
                quantity: Some(8),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, Decimal::new(49950, 2));
    assert_eq!(updated.quantity, 8);

    let err = system
        .products
        .update_product(
            product_id.clone(),
            ProductUpdate {
                quantity: Some(20_000),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::Validation(_)));

    let product = system.products.get(product_id).await.unwrap().unwrap();
    assert_eq!(product.quantity, 8, "rejected edit must not apply");

    let mine = system.products.products_by_company(company_id).await.unwrap();
    assert_eq!(mine.len(), 1);

    system.shutdown().await.unwrap();
}

/// Ten concurrent approvals against one product: every decrement lands
/// exactly once and the stock ends at zero, not below.
#[tokio::test]
async fn concurrent_approvals_do_not_overcommit() {
    let system = EcoFoodSystem::start().await.unwrap();

    let company_id = register_company(&system, "contacto@lucero.cl").await;
    let client_id = register_client(&system, "juana@example.com").await;
    let product_id = publish(&system, &company_id, 100, 20).await;

    let mut order_ids = Vec::new();
    for _ in 0..10 {
        order_ids.push(place(&system, &client_id, &product_id, 2).await);
    }

    let mut handles = Vec::new();
    for order_id in order_ids {
        let orders = system.orders.clone();
        handles.push(tokio::spawn(async move { orders.approve(order_id).await }));
    }

    let mut approved = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            approved += 1;
        }
    }
    assert_eq!(approved, 10, "twenty units cover ten orders of two");
    assert_eq!(system.products.check_stock(product_id).await.unwrap(), 0);

    system.shutdown().await.unwrap();
}

/// Two registrations for one address racing each other: exactly one wins,
/// whatever the interleaving.
#[tokio::test]
async fn concurrent_duplicate_registrations_cannot_both_succeed() {
    let system = EcoFoodSystem::start().await.unwrap();

    let first = system.auth.sign_up(
        AccountCreate::client(
            "Juana Rivas",
            "misma@example.com",
            "Av. Siempre Viva 123",
            "Metropolitana",
            "Ñuñoa",
        ),
        "clave123",
    );
    let second = system.auth.sign_up(
        AccountCreate::client(
            "Otra Juana",
            "misma@example.com",
            "Calle Falsa 456",
            "Metropolitana",
            "Maipú",
        ),
        "clave456",
    );

    let (a, b) = tokio::join!(first, second);
    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one registration may win");
    let loser = if a.is_ok() { b } else { a };
    assert!(matches!(loser, Err(AuthError::EmailTaken(_))));

    // Exactly one account record exists for the address.
    let account = system
        .accounts
        .find_by_email("misma@example.com")
        .await
        .unwrap()
        .expect("winner's account missing");
    assert_eq!(account.role, Role::Client);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn company_deletion_blocked_while_dependents_exist() {
    let system = EcoFoodSystem::start().await.unwrap();

    let company_id = register_company(&system, "contacto@lucero.cl").await;
    let product_id = publish(&system, &company_id, 0, 4).await;

    let err = system.accounts.delete_company(company_id.clone()).await.unwrap_err();
    assert_eq!(err, AccountError::CompanyHasProducts(1));

    // Nothing changed.
    assert!(system.accounts.get(company_id.clone()).await.unwrap().is_some());
    assert!(system.products.get(product_id.clone()).await.unwrap().is_some());

    // Linked accounts block deletion too.
    system.products.delete(product_id).await.unwrap();
    let mut staff = AccountCreate::client(
        "Pedro Soto",
        "pedro@lucero.cl",
        "Calle Larga 45",
        "Valparaíso",
        "Quilpué",
    );
    staff.company_id = Some(company_id.clone());
    let staff_id = system.accounts.register(staff).await.unwrap();

    let err = system.accounts.delete_company(company_id.clone()).await.unwrap_err();
    assert_eq!(err, AccountError::CompanyHasUsers(1));

    // With both dependents gone the deletion proceeds.
    system.accounts.delete(staff_id).await.unwrap();
    system.accounts.delete_company(company_id.clone()).await.unwrap();
    assert!(system.accounts.get(company_id).await.unwrap().is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn approved_orders_can_be_delivered() {
    let system = EcoFoodSystem::start().await.unwrap();

    let company_id = register_company(&system, "contacto@lucero.cl").await;
    let client_id = register_client(&system, "juana@example.com").await;
    let product_id = publish(&system, &company_id, 0, 5).await;

    let order = place(&system, &client_id, &product_id, 1).await;

    // Delivery is only reachable from approved.
    let err = system.orders.mark_delivered(order.clone()).await.unwrap_err();
    assert_eq!(
        err,
        OrderError::InvalidTransition {
            from: OrderStatus::Pending,
            to: OrderStatus::Delivered,
        }
    );

    system.orders.approve(order.clone()).await.unwrap();
    assert_eq!(
        system.orders.mark_delivered(order.clone()).await.unwrap(),
        OrderStatus::Delivered
    );

    // Listings see the final state.
    let mine = system.orders.orders_by_client(client_id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, OrderStatus::Delivered);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn auth_flow_with_verification_and_session_observable() {
    let system = EcoFoodSystem::start().await.unwrap();
    let mut sessions = system.auth.subscribe();

    system
        .auth
        .sign_up(
            AccountCreate::client(
                "Juana Rivas",
                "juana@example.com",
                "Av. Siempre Viva 123",
                "Metropolitana",
                "Ñuñoa",
            ),
            "clave123",
        )
        .await
        .unwrap();

    // Sign-in before verification is refused.
    let err = system.auth.sign_in("juana@example.com", "clave123").await.unwrap_err();
    assert!(matches!(err, AuthError::EmailNotVerified(_)));

    // The verification mail carries the token.
    let token = match system.auth.mail_outbox().first() {
        Some(MailEvent::Verification { token, .. }) => token.clone(),
        other => panic!("expected a verification mail, got {other:?}"),
    };
    system.auth.verify_email(&token).unwrap();

    let err = system.auth.sign_in("juana@example.com", "wrong9pw").await.unwrap_err();
    assert_eq!(err, AuthError::WrongPassword);

    let session = system.auth.sign_in("juana@example.com", "clave123").await.unwrap();
    assert_eq!(session.role, Role::Client);
    assert_eq!(system.auth.current_session(), Some(session.clone()));

    // The subscription observes the sign-in and the sign-out.
    sessions.changed().await.unwrap();
    assert_eq!(sessions.borrow_and_update().clone(), Some(session));
    system.auth.sign_out();
    sessions.changed().await.unwrap();
    assert_eq!(sessions.borrow_and_update().clone(), None);
    assert_eq!(system.auth.current_session(), None);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn password_reset_round_trip() {
    let system = EcoFoodSystem::start().await.unwrap();

    system
        .auth
        .sign_up(
            AccountCreate::client(
                "Juana Rivas",
                "juana@example.com",
                "Av. Siempre Viva 123",
                "Metropolitana",
                "Ñuñoa",
            ),
            "clave123",
        )
        .await
        .unwrap();
    let token = match system.auth.mail_outbox().first() {
        Some(MailEvent::Verification { token, .. }) => token.clone(),
        other => panic!("expected a verification mail, got {other:?}"),
    };
    system.auth.verify_email(&token).unwrap();

    assert!(matches!(
        system.auth.send_password_reset("nadie@example.com"),
        Err(AuthError::UnknownEmail(_))
    ));
    system.auth.send_password_reset("juana@example.com").unwrap();

    let token = match system.auth.mail_outbox().last() {
        Some(MailEvent::PasswordReset { token, .. }) => token.clone(),
        other => panic!("expected a reset mail, got {other:?}"),
    };

    // The new password must satisfy the policy.
    assert!(matches!(
        system.auth.reset_password(&token, "corta"),
        Err(AuthError::Validation(_))
    ));
    system.auth.reset_password(&token, "nueva456").unwrap();

    // The token is spent.
    assert!(matches!(
        system.auth.reset_password(&token, "otra7890"),
        Err(AuthError::InvalidToken(_))
    ));

    let err = system.auth.sign_in("juana@example.com", "clave123").await.unwrap_err();
    assert_eq!(err, AuthError::WrongPassword);
    let session = system.auth.sign_in("juana@example.com", "nueva456").await.unwrap();
    assert_eq!(session.email, "juana@example.com");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn root_admin_is_provisioned_and_profiles_are_editable() {
    let system = EcoFoodSystem::start().await.unwrap();

    let admins = system.accounts.accounts_by_role(Role::Admin).await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].id, AccountId(ecofood::lifecycle::ROOT_ADMIN_ID.to_string()));

    let client_id = register_client(&system, "juana@example.com").await;
    let updated = system
        .accounts
        .update_account(
            client_id.clone(),
            AccountUpdate {
                phone: Some("987654321".to_string()),
                commune: Some("Maipú".to_string()),
                ..AccountUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.phone.as_deref(), Some("987654321"));
    assert_eq!(updated.commune.as_deref(), Some("Maipú"));

    // An invalid edit bounces and changes nothing.
    let err = system
        .accounts
        .update_account(
            client_id.clone(),
            AccountUpdate {
                phone: Some("12".to_string()),
                ..AccountUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::Validation(_)));
    let account = system.accounts.get(client_id).await.unwrap().unwrap();
    assert_eq!(account.phone.as_deref(), Some("987654321"));

    system.shutdown().await.unwrap();
}

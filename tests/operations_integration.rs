//! End-to-end operation flows with real hashing, real tokens and live events.

mod common;

use std::time::Duration;

use common::{TestApp, ADMIN_PASSWORD};
use shipment_tracker::application::handlers::{
    AddShipmentCommand, ChangePasswordCommand, ListShipmentsQuery, LoginCommand,
    RegisterCommand, UpdateShipmentCommand, UpdateUserCommand,
};
use shipment_tracker::application::OperationError;
use shipment_tracker::domain::foundation::{Principal, Role};
use shipment_tracker::domain::shipment::{
    ShipmentEvent, ShipmentEventKind, ShipmentFilter, ShipmentStatus,
};
use tokio::time::timeout;

async fn login(app: &TestApp, username: &str, password: &str) -> Result<String, OperationError> {
    let payload = app
        .state
        .login_handler()
        .handle(LoginCommand {
            username: Some(username.into()),
            email: None,
            password: Some(password.into()),
        })
        .await?;
    Ok(payload.token)
}

async fn principal(app: &TestApp, token: &str) -> Principal {
    app.state
        .resolver
        .resolve(token)
        .await
        .expect("user store reachable")
        .expect("token resolves")
}

fn add_command(tracking: &str) -> AddShipmentCommand {
    AddShipmentCommand {
        tracking_number: tracking.into(),
        origin: "Rotterdam".into(),
        destination: "Antwerp".into(),
        status: None,
        carrier: "Maersk".into(),
        weight: 120.5,
        dimensions: "120x80x100".into(),
        estimated_delivery: "2031-05-20T08:00:00Z".into(),
        customer_name: "Fenna".into(),
        customer_email: "fenna@example.com".into(),
    }
}

#[tokio::test]
async fn bootstrap_admin_registers_employee_who_manages_shipments() {
    let app = TestApp::start().await;

    let admin_token = login(&app, "admin", ADMIN_PASSWORD).await.unwrap();
    let admin = principal(&app, &admin_token).await;
    assert_eq!(admin.role, Role::Admin);

    let registered = app
        .state
        .register_handler()
        .handle(
            Some(&admin),
            RegisterCommand {
                username: "Clerk".into(),
                email: "clerk@tms.com".into(),
                password: "clerkpass".into(),
                role: Role::Employee,
                scopes: Some(vec!["shipments".into()]),
            },
        )
        .await
        .unwrap();
    assert_eq!(registered.user.username, "clerk");

    let clerk_token = login(&app, "clerk", "clerkpass").await.unwrap();
    let clerk = principal(&app, &clerk_token).await;
    assert_eq!(clerk.scopes, vec!["shipments".to_string()]);

    let mut added = app.broadcaster.subscribe(ShipmentEventKind::ShipmentAdded);
    let mut updated = app.broadcaster.subscribe(ShipmentEventKind::ShipmentUpdated);
    let mut deleted = app.broadcaster.subscribe(ShipmentEventKind::ShipmentDeleted);

    let shipment = app
        .state
        .add_shipment_handler()
        .handle(Some(&clerk), add_command("TN-E2E-1"))
        .await
        .unwrap();
    assert_eq!(shipment.status, ShipmentStatus::Pending);
    assert_eq!(shipment.creator_email.as_deref(), Some("clerk@tms.com"));

    let event = timeout(Duration::from_secs(1), added.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, ShipmentEvent::Added(shipment.clone()));

    let mut cmd = UpdateShipmentCommand::new(shipment.id);
    cmd.status = Some(ShipmentStatus::Delivered);
    cmd.actual_delivery = Some("2031-05-19".into());
    let delivered = app
        .state
        .update_shipment_handler()
        .handle(Some(&clerk), cmd)
        .await
        .unwrap();
    assert_eq!(delivered.status, ShipmentStatus::Delivered);
    assert!(delivered.actual_delivery.is_some());

    let event = timeout(Duration::from_secs(1), updated.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, ShipmentEvent::Updated(delivered));

    let denied = app
        .state
        .delete_shipment_handler()
        .handle(Some(&clerk), shipment.id)
        .await
        .unwrap_err();
    assert!(matches!(denied, OperationError::AuthorizationDenied(_)));

    app.state
        .delete_shipment_handler()
        .handle(Some(&admin), shipment.id)
        .await
        .unwrap();
    let event = timeout(Duration::from_secs(1), deleted.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, ShipmentEvent::Deleted { id: shipment.id });
}

#[tokio::test]
async fn listing_filters_and_pages_consistently() {
    let app = TestApp::start().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await.unwrap();
    let admin = principal(&app, &token).await;
    let add = app.state.add_shipment_handler();

    for i in 0..7 {
        let mut cmd = add_command(&format!("TN-PAGE-{}", i));
        if i % 2 == 0 {
            cmd.carrier = "DHL Express".into();
        }
        add.handle(Some(&admin), cmd).await.unwrap();
    }

    let list = app.state.list_shipments_handler();
    let mut seen = Vec::new();
    for page in 1..=3 {
        let result = list
            .handle(
                Some(&admin),
                ListShipmentsQuery {
                    page: shipment_tracker::domain::shipment::PageRequest::new(page, 3).unwrap(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(result.total_count, 7);
        assert_eq!(result.page_info.total_pages, 3);
        seen.extend(result.shipments.into_iter().map(|s| s.id));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 7);

    let dhl = list
        .handle(
            Some(&admin),
            ListShipmentsQuery {
                filter: ShipmentFilter {
                    carrier: Some("dhl".into()),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(dhl.total_count, 4);
}

#[tokio::test]
async fn role_and_password_changes_take_effect_without_new_token() {
    let app = TestApp::start().await;
    let admin_token = login(&app, "admin", ADMIN_PASSWORD).await.unwrap();
    let admin = principal(&app, &admin_token).await;

    let registered = app
        .state
        .register_handler()
        .handle(
            Some(&admin),
            RegisterCommand {
                username: "promo".into(),
                email: "promo@tms.com".into(),
                password: "firstpass".into(),
                role: Role::Employee,
                scopes: None,
            },
        )
        .await
        .unwrap();
    let promo_token = registered.token;

    let mut promote = UpdateUserCommand::new(registered.user.id);
    promote.role = Some(Role::Admin);
    app.state
        .update_user_handler()
        .handle(Some(&admin), promote)
        .await
        .unwrap();

    // Same token, fresh role.
    let promo = principal(&app, &promo_token).await;
    assert_eq!(promo.role, Role::Admin);

    app.state
        .change_password_handler()
        .handle(
            Some(&promo),
            ChangePasswordCommand {
                current_password: "firstpass".into(),
                new_password: "secondpass".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        login(&app, "promo", "firstpass").await.unwrap_err(),
        OperationError::InvalidCredential
    );
    assert!(login(&app, "promo", "secondpass").await.is_ok());

    app.state
        .delete_user_handler()
        .handle(Some(&admin), promo.id)
        .await
        .unwrap();
    assert!(app
        .state
        .resolver
        .resolve(&promo_token)
        .await
        .unwrap()
        .is_none());
}

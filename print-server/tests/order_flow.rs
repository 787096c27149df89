//! End-to-end order flow: creation, pricing, lifecycle, deletion.

mod common;

use std::sync::Arc;

use common::{
    FailingGateway, FailingMailer, create_user, flyer_product, pdf_file, setup, small_config,
};
use print_server::services::{CreateOrderInput, OrderListFilter};
use print_server::state::AppState;
use shared::error::ErrorCode;
use shared::models::{
    FormatClass, OrderStatus, PaymentStatus, PrintConfigurationInput, Role, SmallFormat,
};
use sqlx::SqlitePool;

async fn table_count(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

fn order_input(config: PrintConfigurationInput) -> CreateOrderInput {
    CreateOrderInput {
        configuration: config,
        files: vec![],
        payment_phone: "0341234567".to_string(),
        payment_method: None,
    }
}

async fn setup_with_product() -> (common::TestEnv, shared::models::Actor, shared::models::Actor, i64)
{
    let env = setup().await;
    let (_, user) = create_user(&env.state, "rakoto", Role::User).await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let product = env
        .state
        .catalog()
        .create_product(&admin, flyer_product())
        .await
        .unwrap();
    (env, user, admin, product.id.unwrap())
}

#[tokio::test]
async fn test_create_order_standard_pricing() {
    let (env, user, _, product_id) = setup_with_product().await;

    let mut input = order_input(small_config(product_id, SmallFormat::A4, 20));
    input.files.push(pdf_file());
    let detail = env.state.orders().create_order(&user, input).await.unwrap();

    // base 500 x 1.0 (matching default format) x 20 + 5000 delivery
    assert_eq!(detail.order.total_amount, 15_000);
    assert_eq!(detail.order.status, OrderStatus::Pending);
    assert_eq!(detail.files.len(), 1);

    let payment = detail.payment.expect("payment created with the order");
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.amount, 15_000);
    let reference = payment.transaction_ref.expect("test transaction reference");
    assert!(reference.starts_with("TEST-"));
}

#[tokio::test]
async fn test_create_order_book_pricing() {
    let env = setup().await;
    let (_, user) = create_user(&env.state, "rasoa", Role::User).await;

    let config = PrintConfigurationInput {
        format_class: Some(FormatClass::Petit),
        small_format: Some(SmallFormat::A4),
        quantity: 1,
        is_book: true,
        book_pages: Some(100),
        cover_paper: Some(shared::models::CoverPaper::Simple),
        duplex: Some(shared::models::DuplexMode::Recto),
        binding: Some(shared::models::BindingType::Spirale),
        ..Default::default()
    };
    let detail = env
        .state
        .orders()
        .create_order(&user, order_input(config))
        .await
        .unwrap();

    // 100x500x1 + 1000x1.0x1 + 2000x1 + 5000
    assert_eq!(detail.order.total_amount, 58_000);
}

#[tokio::test]
async fn test_minimum_quantity_boundary_at_service_level() {
    let (env, user, _, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let rejected = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A5, 29)))
        .await;
    assert_eq!(rejected.unwrap_err().code(), ErrorCode::Validation);

    let accepted = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A5, 30)))
        .await;
    assert!(accepted.is_ok());
}

#[tokio::test]
async fn test_large_format_bounds_at_service_level() {
    let (env, user, _, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let mut config = PrintConfigurationInput {
        format_class: Some(FormatClass::Grand),
        width_cm: Some(170.0),
        height_cm: Some(80.0),
        quantity: 1,
        product_id: Some(product_id),
        ..Default::default()
    };
    let rejected = orders.create_order(&user, order_input(config.clone())).await;
    assert_eq!(rejected.unwrap_err().code(), ErrorCode::Validation);

    config.width_cm = Some(160.0);
    config.height_cm = Some(100.0);
    assert!(orders.create_order(&user, order_input(config)).await.is_ok());
}

#[tokio::test]
async fn test_order_creation_is_all_or_nothing() {
    let env = setup().await;
    let (_, user) = create_user(&env.state, "rakoto", Role::User).await;
    let (_, admin) = create_user(&env.state, "admin", Role::Admin).await;
    let product = env
        .state
        .catalog()
        .create_product(&admin, flyer_product())
        .await
        .unwrap();

    // Same pool, but the gateway dies after configuration and order are
    // already written inside the transaction
    let failing = AppState::with_collaborators(
        env.state.pool.clone(),
        env.mailer.clone(),
        Arc::new(FailingGateway),
        0,
    );

    let mut input = order_input(small_config(product.id.unwrap(), SmallFormat::A4, 20));
    input.files.push(pdf_file());
    let result = failing.orders().create_order(&user, input).await;
    assert!(result.is_err());

    assert_eq!(table_count(&env.state.pool, "print_configurations").await, 0);
    assert_eq!(table_count(&env.state.pool, "orders").await, 0);
    assert_eq!(table_count(&env.state.pool, "order_files").await, 0);
    assert_eq!(table_count(&env.state.pool, "payments").await, 0);
}

#[tokio::test]
async fn test_invalid_file_rejected_before_any_write() {
    let (env, user, _, product_id) = setup_with_product().await;

    let mut bad_file = pdf_file();
    bad_file.file_name = "scan.png".to_string();
    let mut input = order_input(small_config(product_id, SmallFormat::A4, 20));
    input.files.push(bad_file);

    let result = env.state.orders().create_order(&user, input).await;
    assert_eq!(result.unwrap_err().code(), ErrorCode::Validation);
    assert_eq!(table_count(&env.state.pool, "orders").await, 0);
    assert_eq!(table_count(&env.state.pool, "print_configurations").await, 0);
}

#[tokio::test]
async fn test_confirmation_job_fires_after_creation() {
    let (env, user, _, product_id) = setup_with_product().await;

    env.state
        .orders()
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();

    assert_eq!(table_count(&env.state.pool, "notify_jobs").await, 1);

    // Delay 0: the job is due immediately
    let completed = env.state.notify_worker().run_due_jobs().await;
    assert_eq!(completed, 1);
    assert_eq!(table_count(&env.state.pool, "notify_jobs").await, 0);

    // One in-app notification and one email for the owner
    assert_eq!(
        env.state.notifications().unread_count(&user).await.unwrap(),
        1
    );
    assert_eq!(env.mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_printing_and_done_dispatch_owner_notifications() {
    let (env, user, admin, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let detail = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let order_id = detail.order.id.unwrap();

    let change = orders
        .set_status(&admin, order_id, OrderStatus::Printing)
        .await
        .unwrap();
    assert_eq!(change.order.status, OrderStatus::Printing);
    assert!(change.notified);
    assert_eq!(env.mailer.sent_count(), 1);

    let change = orders
        .set_status(&admin, order_id, OrderStatus::Done)
        .await
        .unwrap();
    assert!(change.notified);
    assert_eq!(env.mailer.sent_count(), 2);

    // No side effect for the other statuses
    let change = orders
        .set_status(&admin, order_id, OrderStatus::Shipping)
        .await
        .unwrap();
    assert!(!change.notified);
    assert!(change.notify_error.is_none());
    assert_eq!(env.mailer.sent_count(), 2);

    // Two in-app rows landed with the status writes
    assert_eq!(
        env.state.notifications().unread_count(&user).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_status_write_survives_mail_failure() {
    let (env, user, admin, product_id) = setup_with_product().await;

    let detail = env
        .state
        .orders()
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let order_id = detail.order.id.unwrap();

    let broken_mail = AppState::with_collaborators(
        env.state.pool.clone(),
        Arc::new(FailingMailer),
        env.state.gateway.clone(),
        0,
    );

    let change = broken_mail
        .orders()
        .set_status(&admin, order_id, OrderStatus::Printing)
        .await
        .unwrap();
    assert!(!change.notified);
    assert!(change.notify_error.is_some());

    // Durable despite the failed dispatch
    let reloaded = env.state.orders().get_order(&admin, order_id).await.unwrap();
    assert_eq!(reloaded.order.status, OrderStatus::Printing);
}

#[tokio::test]
async fn test_status_jumps_are_permitted_for_admins_only() {
    let (env, user, admin, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let detail = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let order_id = detail.order.id.unwrap();

    // Arbitrary jumps are accepted, including backwards
    orders
        .set_status(&admin, order_id, OrderStatus::Delivered)
        .await
        .unwrap();
    let change = orders
        .set_status(&admin, order_id, OrderStatus::Pending)
        .await
        .unwrap();
    assert_eq!(change.order.status, OrderStatus::Pending);

    // Non-admins cannot touch the status at all
    let denied = orders.set_status(&user, order_id, OrderStatus::Received).await;
    assert_eq!(denied.unwrap_err().code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn test_soft_delete_restore_round_trip() {
    let (env, user, _, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let detail = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let order_id = detail.order.id.unwrap();

    let before: Vec<i64> = orders
        .list_orders(&user, OrderListFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|o| o.id.unwrap())
        .collect();

    orders.soft_delete(&user, order_id).await.unwrap();
    assert!(
        orders
            .list_orders(&user, OrderListFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(orders.list_trash(&user).await.unwrap().len(), 1);

    orders.restore(&user, order_id).await.unwrap();
    let after: Vec<i64> = orders
        .list_orders(&user, OrderListFilter::default())
        .await
        .unwrap()
        .iter()
        .map(|o| o.id.unwrap())
        .collect();
    assert_eq!(before, after);
    assert!(orders.list_trash(&user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_hard_delete_cascades_to_owned_records() {
    let (env, user, _, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let mut input = order_input(small_config(product_id, SmallFormat::A4, 20));
    input.files.push(pdf_file());
    let detail = orders.create_order(&user, input).await.unwrap();

    orders.hard_delete(&user, detail.order.id.unwrap()).await.unwrap();

    assert_eq!(table_count(&env.state.pool, "orders").await, 0);
    assert_eq!(table_count(&env.state.pool, "print_configurations").await, 0);
    assert_eq!(table_count(&env.state.pool, "order_files").await, 0);
    assert_eq!(table_count(&env.state.pool, "payments").await, 0);
}

#[tokio::test]
async fn test_foreign_orders_read_as_not_found() {
    let (env, user, admin, product_id) = setup_with_product().await;
    let (_, other) = create_user(&env.state, "voleur", Role::User).await;
    let orders = env.state.orders();

    let detail = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let order_id = detail.order.id.unwrap();

    // Not forbidden — not found, existence stays hidden
    let masked = orders.get_order(&other, order_id).await;
    assert_eq!(masked.unwrap_err().code(), ErrorCode::NotFound);
    let masked = orders.soft_delete(&other, order_id).await;
    assert_eq!(masked.unwrap_err().code(), ErrorCode::NotFound);

    // Admins see everything
    assert!(orders.get_order(&admin, order_id).await.is_ok());
}

#[tokio::test]
async fn test_admin_listing_and_ordering() {
    let (env, user, admin, product_id) = setup_with_product().await;
    let (_, second) = create_user(&env.state, "rasoa", Role::User).await;
    let orders = env.state.orders();

    let first = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let second_order = orders
        .create_order(&second, order_input(small_config(product_id, SmallFormat::A3, 10)))
        .await
        .unwrap();

    // Users only see their own orders
    let mine = orders.list_orders(&user, OrderListFilter::default()).await.unwrap();
    assert_eq!(mine.len(), 1);

    // The all-users view is admin only, newest first
    let denied = orders
        .list_orders(
            &user,
            OrderListFilter {
                all_users: true,
                ..Default::default()
            },
        )
        .await;
    assert_eq!(denied.unwrap_err().code(), ErrorCode::Forbidden);

    let all = orders
        .list_orders(
            &admin,
            OrderListFilter {
                all_users: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second_order.order.id);
    assert_eq!(all[1].id, first.order.id);
}

#[tokio::test]
async fn test_payment_callback_updates_status_only() {
    let (env, user, _, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let detail = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let reference = detail.payment.unwrap().transaction_ref.unwrap();

    let updated = orders
        .update_payment_status(&reference, PaymentStatus::Success)
        .await
        .unwrap();
    assert_eq!(updated.status, PaymentStatus::Success);
    assert_eq!(updated.amount, 15_000);

    let missing = orders
        .update_payment_status("TEST-unknown", PaymentStatus::Failed)
        .await;
    assert_eq!(missing.unwrap_err().code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn test_orphaned_configuration_prices_at_fallback_on_read() {
    let (env, user, admin, product_id) = setup_with_product().await;
    let orders = env.state.orders();

    let detail = orders
        .create_order(&user, order_input(small_config(product_id, SmallFormat::A4, 20)))
        .await
        .unwrap();
    let order_id = detail.order.id.unwrap();
    assert_eq!(detail.order.total_amount, 15_000);

    // Removing the product orphans the configuration (reference nulled);
    // the read-side recomputation degrades to the fallback amount
    env.state.catalog().delete_product(&admin, product_id).await.unwrap();

    let reloaded = orders.get_order(&user, order_id).await.unwrap();
    assert_eq!(reloaded.order.total_amount, 10_000);
    assert!(reloaded.configuration.product_id.is_none());
}

#[tokio::test]
async fn test_catalog_writes_require_admin() {
    let env = setup().await;
    let (_, user) = create_user(&env.state, "rakoto", Role::User).await;

    let denied = env.state.catalog().create_product(&user, flyer_product()).await;
    assert_eq!(denied.unwrap_err().code(), ErrorCode::Forbidden);
}

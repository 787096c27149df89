//! Order database operations
//!
//! Orders own their configuration, files and payment. Creation happens in a
//! single transaction assembled by the service layer from the functions
//! here; reads are plain pool queries.

use shared::models::{
    FileInput, Order, OrderStatus, Payment, PaymentStatus, PrintConfiguration, PrintFile,
};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqliteExecutor};

// ── Configurations ──────────────────────────────────────────────────

pub async fn insert_configuration(
    ex: impl SqliteExecutor<'_>,
    cfg: &PrintConfiguration,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO print_configurations ( \
            format_class, small_format, width_cm, height_cm, paper_type, finish, \
            duplex, binding, cover_paper, quantity, is_book, book_pages, options, product_id \
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(cfg.format_class)
    .bind(cfg.small_format)
    .bind(cfg.width_cm)
    .bind(cfg.height_cm)
    .bind(cfg.paper_type)
    .bind(cfg.finish)
    .bind(cfg.duplex)
    .bind(cfg.binding)
    .bind(cfg.cover_paper)
    .bind(cfg.quantity)
    .bind(cfg.is_book)
    .bind(cfg.book_pages)
    .bind(&cfg.options)
    .bind(cfg.product_id)
    .execute(ex)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_configuration(
    ex: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<PrintConfiguration>, sqlx::Error> {
    sqlx::query_as::<_, PrintConfiguration>("SELECT * FROM print_configurations WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

// ── Orders ──────────────────────────────────────────────────────────

pub async fn insert_order(
    ex: impl SqliteExecutor<'_>,
    user_id: i64,
    configuration_id: i64,
    total_amount: i64,
    payment_method: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO orders (user_id, configuration_id, status, total_amount, payment_method, is_deleted, created_at) \
         VALUES ($1, $2, $3, $4, $5, 0, $6)",
    )
    .bind(user_id)
    .bind(configuration_id)
    .bind(OrderStatus::Pending)
    .bind(total_amount)
    .bind(payment_method)
    .bind(now_millis())
    .execute(ex)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get(ex: impl SqliteExecutor<'_>, id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// A user's orders, newest first. `include_deleted` also returns
/// soft-deleted rows.
pub async fn list_by_user(
    ex: impl SqliteExecutor<'_>,
    user_id: i64,
    include_deleted: bool,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders \
         WHERE user_id = $1 AND ($2 OR is_deleted = 0) \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .bind(include_deleted)
    .fetch_all(ex)
    .await
}

/// All users' orders (admin view), newest first.
pub async fn list_all(
    ex: impl SqliteExecutor<'_>,
    include_deleted: bool,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE $1 OR is_deleted = 0 ORDER BY created_at DESC, id DESC",
    )
    .bind(include_deleted)
    .fetch_all(ex)
    .await
}

/// Soft-deleted orders only (trash view). `user_id` of None means all users.
pub async fn list_trash(
    ex: impl SqliteExecutor<'_>,
    user_id: Option<i64>,
) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT * FROM orders \
         WHERE is_deleted = 1 AND ($1 IS NULL OR user_id = $1) \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(ex)
    .await
}

pub async fn set_deleted(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    deleted: bool,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET is_deleted = $2 WHERE id = $1")
        .bind(id)
        .bind(deleted)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_status(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    status: OrderStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Update the cached total after a read-side recomputation.
pub async fn update_total(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    total_amount: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE orders SET total_amount = $2 WHERE id = $1")
        .bind(id)
        .bind(total_amount)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Permanently remove an order and everything it owns. Runs four deletes;
/// call inside a transaction.
pub async fn hard_delete(conn: &mut SqliteConnection, order: &Order) -> Result<(), sqlx::Error> {
    let order_id = order.id.unwrap_or_default();
    sqlx::query("DELETE FROM payments WHERE order_id = $1")
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM order_files WHERE order_id = $1")
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(order_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM print_configurations WHERE id = $1")
        .bind(order.configuration_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

// ── Files ───────────────────────────────────────────────────────────

pub async fn insert_file(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    file: &FileInput,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO order_files (order_id, file_name, handle, format, size_kb, resolution_dpi, color_profile, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(order_id)
    .bind(&file.file_name)
    .bind(&file.handle)
    .bind(&file.format)
    .bind(file.size_kb)
    .bind(file.resolution_dpi)
    .bind(&file.color_profile)
    .bind(now_millis())
    .execute(ex)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn list_files(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> Result<Vec<PrintFile>, sqlx::Error> {
    sqlx::query_as::<_, PrintFile>(
        "SELECT * FROM order_files WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(ex)
    .await
}

// ── Payments ────────────────────────────────────────────────────────

pub async fn insert_payment(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
    phone: &str,
    amount: i64,
    transaction_ref: &str,
    status: PaymentStatus,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO payments (order_id, phone, amount, transaction_ref, status, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(order_id)
    .bind(phone)
    .bind(amount)
    .bind(transaction_ref)
    .bind(status)
    .bind(now_millis())
    .execute(ex)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn get_payment_by_order(
    ex: impl SqliteExecutor<'_>,
    order_id: i64,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = $1")
        .bind(order_id)
        .fetch_optional(ex)
        .await
}

/// Status update from the payment gateway; amount and linkage never change.
pub async fn update_payment_status(
    ex: impl SqliteExecutor<'_>,
    transaction_ref: &str,
    status: PaymentStatus,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        "UPDATE payments SET status = $2 WHERE transaction_ref = $1 RETURNING *",
    )
    .bind(transaction_ref)
    .bind(status)
    .fetch_optional(ex)
    .await
}

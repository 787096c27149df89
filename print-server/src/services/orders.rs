//! Order Service
//!
//! Order creation is all-or-nothing: configuration, order, files and the
//! pending payment either all persist or none do. The deferred confirmation
//! is enqueued after commit — losing the schedule must never lose the order.
//!
//! The stored total is a cache; every read recomputes the price from the
//! configuration and the recomputed value wins.

use std::sync::Arc;

use shared::error::AppError;
use shared::models::{
    Actor, FileInput, Order, OrderDetail, OrderStatus, Payment, PaymentStatus, PrintConfiguration,
    PrintConfigurationInput,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::db::store::{notification, order, product, user};
use crate::error::{BoxError, ServiceResult};
use crate::pricing;
use crate::services::mailer::{self, Mailer};
use crate::services::payment::PaymentGateway;
use crate::services::worker;
use crate::utils::validation::{validate_configuration, validate_file, validate_phone};

const DEFAULT_PAYMENT_METHOD: &str = "MOBILE_MONEY";

/// Create order payload
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    pub configuration: PrintConfigurationInput,
    pub files: Vec<FileInput>,
    pub payment_phone: String,
    pub payment_method: Option<String>,
}

/// Listing scope for [`OrderService::list_orders`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderListFilter {
    pub include_deleted: bool,
    /// All users' orders; requires an admin actor
    pub all_users: bool,
}

/// Outcome of a status change. The status write is durable even when the
/// notification email failed; the error is reported here instead of rolling
/// anything back.
#[derive(Debug)]
pub struct StatusChange {
    pub order: Order,
    pub notified: bool,
    pub notify_error: Option<String>,
}

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    mailer: Arc<dyn Mailer>,
    gateway: Arc<dyn PaymentGateway>,
    confirmation_delay_ms: i64,
}

impl OrderService {
    pub fn new(
        pool: SqlitePool,
        mailer: Arc<dyn Mailer>,
        gateway: Arc<dyn PaymentGateway>,
        confirmation_delay_ms: i64,
    ) -> Self {
        Self {
            pool,
            mailer,
            gateway,
            confirmation_delay_ms,
        }
    }

    /// Create an order with its configuration, files and pending payment in
    /// one transaction.
    pub async fn create_order(
        &self,
        actor: &Actor,
        input: CreateOrderInput,
    ) -> ServiceResult<OrderDetail> {
        // Everything is validated before the first row is written
        validate_phone(&input.payment_phone)?;
        validate_configuration(&input.configuration)?;
        for file in &input.files {
            validate_file(file)?;
        }

        let resolved_product = match input.configuration.product_id {
            Some(product_id) => match product::get(&self.pool, product_id).await? {
                Some(p) if p.is_active => Some(p),
                Some(_) => {
                    return Err(
                        AppError::validation(format!("product {product_id} is not available"))
                            .into(),
                    );
                }
                None => {
                    return Err(AppError::validation(format!("unknown product {product_id}")).into());
                }
            },
            None => None,
        };

        let mut config = input.configuration.clone().into_config();
        let total = pricing::price_or_fallback(&config, resolved_product.as_ref());
        let payment_method = input
            .payment_method
            .clone()
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string());

        let mut tx = self.pool.begin().await?;
        let config_id = order::insert_configuration(&mut *tx, &config).await?;
        config.id = Some(config_id);
        let order_id =
            order::insert_order(&mut *tx, actor.user_id, config_id, total, &payment_method).await?;
        for file in &input.files {
            order::insert_file(&mut *tx, order_id, file).await?;
        }
        // Simulated gateway; a real integration would initiate outside the
        // transaction and reconcile through the status callback
        let init = self
            .gateway
            .initiate(&input.payment_phone, total, order_id)
            .await?;
        order::insert_payment(
            &mut *tx,
            order_id,
            &input.payment_phone,
            total,
            &init.transaction_id,
            init.status,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(order_id, user_id = actor.user_id, total, "Order created");

        // Deferred confirmation, off the critical path
        let due_at = now_millis() + self.confirmation_delay_ms;
        if let Err(e) =
            worker::enqueue_confirmation(&self.pool, order_id, actor.user_id, due_at).await
        {
            tracing::warn!(order_id, error = %e, "Failed to enqueue confirmation notification");
        }

        let order = order::get(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("order {order_id} vanished after create")))?;
        let files = order::list_files(&self.pool, order_id).await?;
        let payment = order::get_payment_by_order(&self.pool, order_id).await?;
        Ok(OrderDetail {
            order,
            configuration: config,
            files,
            payment,
        })
    }

    /// One order with its owned records, ownership-masked.
    pub async fn get_order(&self, actor: &Actor, order_id: i64) -> ServiceResult<OrderDetail> {
        let order = self.owned(actor, order_id).await?;
        let configuration = order::get_configuration(&self.pool, order.configuration_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "configuration {} missing for order {order_id}",
                    order.configuration_id
                ))
            })?;
        let order = self.refresh_total(order, &configuration).await?;
        let files = order::list_files(&self.pool, order_id).await?;
        let payment = order::get_payment_by_order(&self.pool, order_id).await?;
        Ok(OrderDetail {
            order,
            configuration,
            files,
            payment,
        })
    }

    /// Orders newest first: the actor's own, or everyone's for admins.
    pub async fn list_orders(
        &self,
        actor: &Actor,
        filter: OrderListFilter,
    ) -> ServiceResult<Vec<Order>> {
        if filter.all_users && !actor.is_admin() {
            return Err(AppError::forbidden("listing all orders requires an admin").into());
        }
        let orders = if filter.all_users {
            order::list_all(&self.pool, filter.include_deleted).await?
        } else {
            order::list_by_user(&self.pool, actor.user_id, filter.include_deleted).await?
        };

        let mut refreshed = Vec::with_capacity(orders.len());
        for entry in orders {
            match order::get_configuration(&self.pool, entry.configuration_id).await? {
                Some(cfg) => refreshed.push(self.refresh_total(entry, &cfg).await?),
                None => refreshed.push(entry),
            }
        }
        Ok(refreshed)
    }

    /// Soft-deleted orders: the actor's own, or everyone's for admins.
    pub async fn list_trash(&self, actor: &Actor) -> ServiceResult<Vec<Order>> {
        let scope = if actor.is_admin() {
            None
        } else {
            Some(actor.user_id)
        };
        Ok(order::list_trash(&self.pool, scope).await?)
    }

    pub async fn soft_delete(&self, actor: &Actor, order_id: i64) -> ServiceResult<()> {
        let order = self.owned(actor, order_id).await?;
        order::set_deleted(&self.pool, order.id.unwrap_or_default(), true).await?;
        Ok(())
    }

    pub async fn restore(&self, actor: &Actor, order_id: i64) -> ServiceResult<()> {
        let order = self.owned(actor, order_id).await?;
        order::set_deleted(&self.pool, order.id.unwrap_or_default(), false).await?;
        Ok(())
    }

    /// Permanently remove the order and cascade to its configuration,
    /// files and payment.
    pub async fn hard_delete(&self, actor: &Actor, order_id: i64) -> ServiceResult<()> {
        let order = self.owned(actor, order_id).await?;
        let mut tx = self.pool.begin().await?;
        order::hard_delete(&mut tx, &order).await?;
        tx.commit().await?;
        tracing::info!(order_id, "Order permanently removed");
        Ok(())
    }

    /// Set an order's status (admin only). Any of the six values may be set
    /// directly; the enum is the only guard. Entering `PRINTING` or `DONE`
    /// dispatches exactly one owner notification: the in-app row commits
    /// with the status write, the email afterwards is best-effort.
    pub async fn set_status(
        &self,
        actor: &Actor,
        order_id: i64,
        status: OrderStatus,
    ) -> ServiceResult<StatusChange> {
        if !actor.is_admin() {
            return Err(AppError::forbidden("status changes require an admin").into());
        }
        let mut order = order::get(&self.pool, order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("order {order_id} not found")))?;

        let message = match status {
            OrderStatus::Printing => Some(mailer::order_printing(order_id)),
            OrderStatus::Done => Some(mailer::order_ready(order_id)),
            _ => None,
        };

        let mut tx = self.pool.begin().await?;
        order::update_status(&mut *tx, order_id, status).await?;
        if let Some((subject, _)) = &message {
            notification::insert(&mut *tx, None, order.user_id, subject).await?;
        }
        tx.commit().await?;
        order.status = status;
        tracing::info!(order_id, status = status.as_str(), "Order status updated");

        let (notified, notify_error) = match &message {
            Some((subject, body)) => match self.email_owner(order.user_id, subject, body).await {
                Ok(()) => (true, None),
                Err(e) => {
                    tracing::warn!(
                        order_id,
                        error = %e,
                        "Status notification email failed; status change is durable"
                    );
                    (false, Some(e.to_string()))
                }
            },
            None => (false, None),
        };

        Ok(StatusChange {
            order,
            notified,
            notify_error,
        })
    }

    /// Out-of-band status update from the payment gateway. Amount and order
    /// linkage never change.
    pub async fn update_payment_status(
        &self,
        transaction_ref: &str,
        status: PaymentStatus,
    ) -> ServiceResult<Payment> {
        let updated = order::update_payment_status(&self.pool, transaction_ref, status)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("transaction {transaction_ref} not found"))
            })?;
        tracing::info!(transaction_ref, status = ?status, "Payment status updated");
        Ok(updated)
    }

    /// Fetch an order the actor may act on: the owner or an admin. Unknown
    /// ids and foreign ids read the same to non-admins.
    async fn owned(&self, actor: &Actor, order_id: i64) -> ServiceResult<Order> {
        match order::get(&self.pool, order_id).await? {
            Some(order) if actor.is_admin() || order.user_id == actor.user_id => Ok(order),
            _ => Err(AppError::not_found(format!("order {order_id} not found")).into()),
        }
    }

    /// Recompute the price from the configuration; the cached column is
    /// refreshed when it drifted.
    async fn refresh_total(
        &self,
        mut order: Order,
        configuration: &PrintConfiguration,
    ) -> ServiceResult<Order> {
        let resolved_product = match configuration.product_id {
            Some(product_id) => product::get(&self.pool, product_id).await?,
            None => None,
        };
        let computed = pricing::price_or_fallback(configuration, resolved_product.as_ref());
        if computed != order.total_amount {
            tracing::warn!(
                order_id = ?order.id,
                cached = order.total_amount,
                computed,
                "Cached order total drifted, recomputed value wins"
            );
            order::update_total(&self.pool, order.id.unwrap_or_default(), computed).await?;
            order.total_amount = computed;
        }
        Ok(order)
    }

    async fn email_owner(&self, user_id: i64, subject: &str, body: &str) -> Result<(), BoxError> {
        let owner = user::get(&self.pool, user_id)
            .await
            .map_err(|e| -> BoxError { e.into() })?
            .ok_or_else(|| -> BoxError { format!("user {user_id} not found").into() })?;
        self.mailer.send_email(&owner.email, subject, body).await
    }
}

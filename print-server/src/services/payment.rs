//! Payment gateway seam
//!
//! The core's contract with the gateway is fire-and-forget initiation plus
//! a later out-of-band status update on the payment record. The real mobile
//! money integration lives outside; [`SandboxGateway`] stands in with test
//! transaction ids.

use async_trait::async_trait;
use shared::models::PaymentStatus;
use uuid::Uuid;

use crate::error::BoxError;

/// Result of initiating a payment
#[derive(Debug, Clone)]
pub struct PaymentInit {
    pub transaction_id: String,
    pub status: PaymentStatus,
}

/// Payment initiation collaborator
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initiate(
        &self,
        phone: &str,
        amount: i64,
        order_ref: i64,
    ) -> Result<PaymentInit, BoxError>;
}

/// Simulated gateway: always pending, unique test references
pub struct SandboxGateway;

#[async_trait]
impl PaymentGateway for SandboxGateway {
    async fn initiate(
        &self,
        phone: &str,
        amount: i64,
        order_ref: i64,
    ) -> Result<PaymentInit, BoxError> {
        let transaction_id = format!("TEST-{order_ref}-{}", Uuid::new_v4().simple());
        tracing::info!(
            phone = phone,
            amount = amount,
            order_ref = order_ref,
            transaction_id = %transaction_id,
            "Sandbox payment initiated"
        );
        Ok(PaymentInit {
            transaction_id,
            status: PaymentStatus::Pending,
        })
    }
}

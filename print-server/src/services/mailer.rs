//! Mail delivery seam
//!
//! Email is best-effort: failures are logged and reported, never fatal to
//! the operation that triggered them. The real SMTP/SES transport lives
//! outside the core; [`LogMailer`] is the default collaborator and simply
//! records the send.

use async_trait::async_trait;

use crate::error::BoxError;

/// Outbound email collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError>;
}

/// Default mailer: logs the message instead of delivering it
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError> {
        tracing::info!(
            from = %self.from,
            to = to,
            subject = subject,
            body_len = body.len(),
            "Email dispatched (log transport)"
        );
        Ok(())
    }
}

// ── Message templates ───────────────────────────────────────────────

pub fn order_confirmation(order_id: i64) -> (String, String) {
    let subject = "Commande confirmée / Order confirmed".to_string();
    let body = format!(
        "Votre commande n°{order_id} a bien été enregistrée.\n\
         Vous recevrez un email à chaque étape.\n\n\
         Your order #{order_id} has been recorded.\n\
         You will receive an email at every step."
    );
    (subject, body)
}

pub fn order_printing(order_id: i64) -> (String, String) {
    let subject = "Impression en cours / Now printing".to_string();
    let body = format!(
        "Votre commande n°{order_id} est en cours d'impression.\n\n\
         Your order #{order_id} is now being printed."
    );
    (subject, body)
}

pub fn order_ready(order_id: i64) -> (String, String) {
    let subject = "Commande prête / Ready for delivery".to_string();
    let body = format!(
        "Votre commande n°{order_id} est terminée et prête pour la livraison.\n\n\
         Your order #{order_id} is finished and ready for delivery."
    );
    (subject, body)
}

//! Service layer
//!
//! Business operations over the store layer plus the collaborator seams
//! (mail delivery, payment gateway). Every operation takes an explicit
//! [`shared::models::Actor`].

pub mod catalog;
pub mod mailer;
pub mod notifications;
pub mod orders;
pub mod payment;
pub mod worker;

pub use catalog::CatalogService;
pub use mailer::{LogMailer, Mailer};
pub use notifications::NotificationService;
pub use orders::{CreateOrderInput, OrderListFilter, OrderService, StatusChange};
pub use payment::{PaymentGateway, PaymentInit, SandboxGateway};
pub use worker::NotifyWorker;

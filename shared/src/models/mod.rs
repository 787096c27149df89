//! Entity models and input payloads
//!
//! One module per entity, mirroring the relational layout described in the
//! migrations. Entities carry `id: Option<i64>` (None before insert);
//! `*Create` / `*Input` types are the write payloads.

pub mod file;
pub mod notification;
pub mod order;
pub mod payment;
pub mod print_config;
pub mod product;
pub mod user;

pub use file::{FileInput, PrintFile};
pub use notification::Notification;
pub use order::{Order, OrderDetail, OrderStatus};
pub use payment::{Payment, PaymentStatus};
pub use print_config::{
    BindingType, CoverPaper, DuplexMode, Finish, FormatClass, PaperType, PrintConfiguration,
    PrintConfigurationInput, SmallFormat,
};
pub use product::{Product, ProductCreate, ProductUpdate};
pub use user::{Actor, Role, User, UserCreate};

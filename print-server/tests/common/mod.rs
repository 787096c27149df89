#![allow(dead_code)]

//! Shared test harness: temp-file SQLite state with recording/failing
//! collaborators.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use print_server::db::DbService;
use print_server::db::store::user;
use print_server::error::BoxError;
use print_server::services::{Mailer, PaymentGateway, PaymentInit, SandboxGateway};
use print_server::state::AppState;
use shared::models::{
    Actor, FileInput, FormatClass, PrintConfigurationInput, ProductCreate, Role, SmallFormat, User,
    UserCreate,
};
use tempfile::TempDir;

/// Mailer that records every send
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

impl RecordingMailer {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), BoxError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Mailer whose transport is always down
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send_email(&self, _to: &str, _subject: &str, _body: &str) -> Result<(), BoxError> {
        Err("mail transport unavailable".into())
    }
}

/// Gateway that fails mid-creation (atomicity probe)
pub struct FailingGateway;

#[async_trait]
impl PaymentGateway for FailingGateway {
    async fn initiate(
        &self,
        _phone: &str,
        _amount: i64,
        _order_ref: i64,
    ) -> Result<PaymentInit, BoxError> {
        Err("gateway unreachable".into())
    }
}

pub struct TestEnv {
    // Held so the database file outlives the state
    pub _dir: TempDir,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
}

/// State over a fresh database with a recording mailer and the sandbox
/// gateway. Confirmation jobs are due immediately (delay 0).
pub async fn setup() -> TestEnv {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(db_path.to_str().unwrap())
        .await
        .expect("open test db");
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::with_collaborators(
        db.pool,
        mailer.clone(),
        Arc::new(SandboxGateway),
        0,
    );
    TestEnv {
        _dir: dir,
        state,
        mailer,
    }
}

pub async fn create_user(state: &AppState, name: &str, role: Role) -> (User, Actor) {
    let created = user::insert(
        &state.pool,
        &UserCreate {
            name: name.to_string(),
            email: format!("{name}@example.mg"),
            phone: Some("0341234567".to_string()),
            role,
        },
    )
    .await
    .expect("insert user");
    let actor = Actor {
        user_id: created.id.unwrap(),
        role,
    };
    (created, actor)
}

/// A flyer product: base price 500, default format A4
pub fn flyer_product() -> ProductCreate {
    ProductCreate {
        name: "Flyer A4".to_string(),
        description: Some("Flyers couleur".to_string()),
        base_price: 500,
        default_format: Some(SmallFormat::A4),
        is_large_format: false,
    }
}

pub fn small_config(product_id: i64, format: SmallFormat, quantity: i64) -> PrintConfigurationInput {
    PrintConfigurationInput {
        format_class: Some(FormatClass::Petit),
        small_format: Some(format),
        quantity,
        product_id: Some(product_id),
        ..Default::default()
    }
}

pub fn pdf_file() -> FileInput {
    FileInput {
        file_name: "affiche.pdf".to_string(),
        handle: "fichiers/1/affiche.pdf".to_string(),
        format: "pdf".to_string(),
        size_kb: 512.0,
        resolution_dpi: 300,
        color_profile: "CMJN".to_string(),
    }
}

//! Catalog Service — product management
//!
//! Reads are open to any actor; writes require an admin
//! ("admin-or-read-only").

use shared::error::AppError;
use shared::models::{Actor, Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

use crate::db::store::product;
use crate::error::ServiceResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_required_text};

#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn require_admin(actor: &Actor) -> ServiceResult<()> {
        if !actor.is_admin() {
            return Err(AppError::forbidden("catalog writes require an admin").into());
        }
        Ok(())
    }

    pub async fn create_product(
        &self,
        actor: &Actor,
        data: ProductCreate,
    ) -> ServiceResult<Product> {
        Self::require_admin(actor)?;
        validate_required_text(&data.name, "product name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NAME_LEN)?;
        if data.base_price <= 0 {
            return Err(AppError::validation("base price must be positive").into());
        }

        let created = product::insert(&self.pool, &data).await?;
        tracing::info!(product_id = ?created.id, name = %created.name, "Product created");
        Ok(created)
    }

    pub async fn update_product(
        &self,
        actor: &Actor,
        id: i64,
        data: ProductUpdate,
    ) -> ServiceResult<Product> {
        Self::require_admin(actor)?;
        if let Some(name) = &data.name {
            validate_required_text(name, "product name", MAX_NAME_LEN)?;
        }
        if let Some(price) = data.base_price
            && price <= 0
        {
            return Err(AppError::validation("base price must be positive").into());
        }

        product::update(&self.pool, id, &data)
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {id} not found")).into())
    }

    pub async fn delete_product(&self, actor: &Actor, id: i64) -> ServiceResult<()> {
        Self::require_admin(actor)?;
        if !product::delete(&self.pool, id).await? {
            return Err(AppError::not_found(format!("product {id} not found")).into());
        }
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    pub async fn get_product(&self, id: i64) -> ServiceResult<Product> {
        product::get(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("product {id} not found")).into())
    }

    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        Ok(product::list_active(&self.pool).await?)
    }
}

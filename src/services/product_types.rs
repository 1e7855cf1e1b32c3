use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::auth::Session;
use crate::db::DbPool;
use crate::entities::{global_product, product_type, GlobalProduct, ProductType};
use crate::errors::ServiceError;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductTypeInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product type name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub machine_category_id: Uuid,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductTypeInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product type name must be between 1 and 255 characters"
    ))]
    pub name: Option<String>,
    pub machine_category_id: Option<Uuid>,
}

/// Service for managing product types
pub struct ProductTypeService {
    db_pool: Arc<DbPool>,
}

impl ProductTypeService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self, session))]
    pub async fn list(&self, session: &Session) -> Result<Vec<product_type::Model>, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let types = ProductType::find()
            .order_by_asc(product_type::Column::Name)
            .all(db)
            .await?;

        Ok(types)
    }

    #[instrument(skip(self, session))]
    pub async fn list_by_category(
        &self,
        session: &Session,
        category_id: Uuid,
    ) -> Result<Vec<product_type::Model>, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let types = ProductType::find()
            .filter(product_type::Column::MachineCategoryId.eq(category_id))
            .order_by_asc(product_type::Column::Name)
            .all(db)
            .await?;

        Ok(types)
    }

    #[instrument(skip(self, session, input))]
    pub async fn create(
        &self,
        session: &Session,
        input: CreateProductTypeInput,
    ) -> Result<product_type::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let product_type = product_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            machine_category_id: Set(input.machine_category_id),
            ..Default::default()
        };

        let created = product_type.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create product type");
            ServiceError::DatabaseError(e)
        })?;

        info!(product_type_id = %created.id, name = %created.name, "Product type created");
        Ok(created)
    }

    #[instrument(skip(self, session, input))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        input: UpdateProductTypeInput,
    ) -> Result<product_type::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let existing = ProductType::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product type {} not found", id)))?;

        let mut active = existing.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(category_id) = input.machine_category_id {
            active.machine_category_id = Set(category_id);
        }

        let updated = active.update(db).await.map_err(|e| {
            error!(product_type_id = %id, error = %e, "Failed to update product type");
            ServiceError::DatabaseError(e)
        })?;

        Ok(updated)
    }

    /// Delete a product type.
    ///
    /// Refused while global products still reference it, mirroring the
    /// category guard.
    #[instrument(skip(self, session))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), ServiceError> {
        session.require_admin()?;
        let db = &*self.db_pool;

        let referencing = GlobalProduct::find()
            .filter(global_product::Column::ProductTypeId.eq(id))
            .count(db)
            .await?;

        if referencing > 0 {
            return Err(ServiceError::DependencyConflict(format!(
                "Cannot delete product type: {} global product(s) still reference it",
                referencing
            )));
        }

        let result = ProductType::delete_by_id(id).exec(db).await.map_err(|e| {
            error!(product_type_id = %id, error = %e, "Failed to delete product type");
            ServiceError::DatabaseError(e)
        })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Product type {} not found",
                id
            )));
        }

        info!(product_type_id = %id, "Product type deleted");
        Ok(())
    }
}

use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::auth::Session;
use crate::db::DbPool;
use crate::entities::{
    global_product, machine_category, machine_template, product_type, GlobalProduct,
    MachineCategory, MachineTemplate, ProductType,
};
use crate::errors::ServiceError;

/// Per-type reference counts gathered before a category delete.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDependencies {
    pub has_product_types: bool,
    pub has_global_products: bool,
    pub has_machine_templates: bool,
    pub product_types_count: u64,
    pub global_products_count: u64,
    pub machine_templates_count: u64,
}

impl CategoryDependencies {
    pub fn is_blocked(&self) -> bool {
        self.has_product_types || self.has_global_products || self.has_machine_templates
    }
}

/// Result of a delete, distinguishing a real removal from a silent no-op.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub count: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMachineCategoryInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Category name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMachineCategoryInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Category name must be between 1 and 255 characters"
    ))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Service for managing machine categories
pub struct MachineCategoryService {
    db_pool: Arc<DbPool>,
}

impl MachineCategoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// List all categories ordered by name
    #[instrument(skip(self, session))]
    pub async fn list(
        &self,
        session: &Session,
    ) -> Result<Vec<machine_category::Model>, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let categories = MachineCategory::find()
            .order_by_asc(machine_category::Column::Name)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list machine categories");
                ServiceError::DatabaseError(e)
            })?;

        Ok(categories)
    }

    #[instrument(skip(self, session))]
    pub async fn get(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<machine_category::Model, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        MachineCategory::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Machine category {} not found", id)))
    }

    #[instrument(skip(self, session, input))]
    pub async fn create(
        &self,
        session: &Session,
        input: CreateMachineCategoryInput,
    ) -> Result<machine_category::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let category = machine_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            description: Set(input.description),
            icon: Set(input.icon),
            ..Default::default()
        };

        let created = category.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create machine category");
            ServiceError::DatabaseError(e)
        })?;

        info!(category_id = %created.id, name = %created.name, "Machine category created");
        Ok(created)
    }

    #[instrument(skip(self, session, input))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        input: UpdateMachineCategoryInput,
    ) -> Result<machine_category::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let existing = MachineCategory::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Machine category {} not found", id)))?;

        let mut active = existing.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(icon) = input.icon {
            active.icon = Set(Some(icon));
        }

        let updated = active.update(db).await.map_err(|e| {
            error!(category_id = %id, error = %e, "Failed to update machine category");
            ServiceError::DatabaseError(e)
        })?;

        Ok(updated)
    }

    /// Count referencing rows in the three dependent tables.
    ///
    /// The counts have no ordering dependency on each other and run
    /// concurrently.
    #[instrument(skip(self, session))]
    pub async fn check_dependencies(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<CategoryDependencies, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let (product_types_count, global_products_count, machine_templates_count) = tokio::try_join!(
            ProductType::find()
                .filter(product_type::Column::MachineCategoryId.eq(id))
                .count(db),
            GlobalProduct::find()
                .filter(global_product::Column::MachineCategoryId.eq(id))
                .count(db),
            MachineTemplate::find()
                .filter(machine_template::Column::MachineCategoryId.eq(id))
                .count(db),
        )?;

        Ok(CategoryDependencies {
            has_product_types: product_types_count > 0,
            has_global_products: global_products_count > 0,
            has_machine_templates: machine_templates_count > 0,
            product_types_count,
            global_products_count,
            machine_templates_count,
        })
    }

    /// Delete a category.
    ///
    /// The dependency check runs again inside the service so the refusal
    /// holds even when the caller skipped it. A delete matching zero rows is
    /// reported as not-found rather than success.
    #[instrument(skip(self, session))]
    pub async fn delete(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<DeleteOutcome, ServiceError> {
        session.require_admin()?;

        let deps = self.check_dependencies(session, id).await?;
        if deps.is_blocked() {
            return Err(ServiceError::DependencyConflict(format!(
                "Cannot delete category: {} product type(s), {} global product(s) and {} machine template(s) still reference it",
                deps.product_types_count, deps.global_products_count, deps.machine_templates_count
            )));
        }

        let db = &*self.db_pool;
        let result = MachineCategory::delete_by_id(id).exec(db).await.map_err(|e| {
            error!(category_id = %id, error = %e, "Failed to delete machine category");
            ServiceError::DatabaseError(e)
        })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Machine category {} not found",
                id
            )));
        }

        info!(category_id = %id, "Machine category deleted");
        Ok(DeleteOutcome {
            deleted: true,
            count: result.rows_affected,
        })
    }
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, FromQueryResult, IntoActiveModel,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::auth::Session;
use crate::db::DbPool;
use crate::entities::{
    company_product, global_product, machine_category, product_type, CompanyProduct,
    GlobalProduct,
};
use crate::errors::ServiceError;

/// Global product row flattened with the display names of its category and
/// type, as listings render them.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct GlobalProductListing {
    pub id: Uuid,
    pub machine_category_id: Uuid,
    pub product_type_id: Uuid,
    pub brand: String,
    pub product_name: String,
    pub image: String,
    pub in_global_catalog: bool,
    pub in_company_catalog: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
    pub product_type_name: Option<String>,
}

impl GlobalProductListing {
    /// Assemble a listing from separately fetched rows (used where the
    /// flattened join is not available, e.g. nested under a company product).
    pub fn from_parts(
        product: global_product::Model,
        category: Option<&machine_category::Model>,
        product_type: Option<&product_type::Model>,
    ) -> Self {
        Self {
            id: product.id,
            machine_category_id: product.machine_category_id,
            product_type_id: product.product_type_id,
            brand: product.brand,
            product_name: product.product_name,
            image: product.image,
            in_global_catalog: product.in_global_catalog,
            in_company_catalog: product.in_company_catalog,
            created_at: product.created_at,
            updated_at: product.updated_at,
            category_name: category.map(|c| c.name.clone()),
            category_icon: category.and_then(|c| c.icon.clone()),
            product_type_name: product_type.map(|t| t.name.clone()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGlobalProductInput {
    pub machine_category_id: Uuid,
    pub product_type_id: Uuid,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Brand must be between 1 and 255 characters"
    ))]
    pub brand: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1 and 255 characters"
    ))]
    pub product_name: String,
    /// Omitted or blank falls back to the placeholder URL
    pub image: Option<String>,
    #[serde(default = "default_in_global_catalog")]
    pub in_global_catalog: bool,
    #[serde(default)]
    pub in_company_catalog: bool,
}

fn default_in_global_catalog() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGlobalProductInput {
    pub machine_category_id: Option<Uuid>,
    pub product_type_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Brand must be between 1 and 255 characters"))]
    pub brand: Option<String>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1 and 255 characters"
    ))]
    pub product_name: Option<String>,
    pub image: Option<String>,
    pub in_global_catalog: Option<bool>,
    pub in_company_catalog: Option<bool>,
}

/// Service for managing the admin-curated global product catalog
pub struct GlobalProductService {
    db_pool: Arc<DbPool>,
}

impl GlobalProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    fn listing_query() -> Select<GlobalProduct> {
        GlobalProduct::find()
            .column_as(machine_category::Column::Name, "category_name")
            .column_as(machine_category::Column::Icon, "category_icon")
            .column_as(product_type::Column::Name, "product_type_name")
            .join(
                JoinType::LeftJoin,
                global_product::Relation::MachineCategory.def(),
            )
            .join(
                JoinType::LeftJoin,
                global_product::Relation::ProductType.def(),
            )
            .order_by_asc(global_product::Column::ProductName)
    }

    /// List all global products with category and type names, ordered by
    /// product name
    #[instrument(skip(self, session))]
    pub async fn list(
        &self,
        session: &Session,
    ) -> Result<Vec<GlobalProductListing>, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let products = Self::listing_query()
            .into_model::<GlobalProductListing>()
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list global products");
                ServiceError::DatabaseError(e)
            })?;

        Ok(products)
    }

    #[instrument(skip(self, session))]
    pub async fn list_by_category(
        &self,
        session: &Session,
        category_id: Uuid,
    ) -> Result<Vec<GlobalProductListing>, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let products = Self::listing_query()
            .filter(global_product::Column::MachineCategoryId.eq(category_id))
            .into_model::<GlobalProductListing>()
            .all(db)
            .await?;

        Ok(products)
    }

    #[instrument(skip(self, session))]
    pub async fn get(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<global_product::Model, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        GlobalProduct::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Global product {} not found", id)))
    }

    /// Create a global product.
    ///
    /// The two catalog flags are stored as given; a missing or blank image
    /// falls back to the placeholder URL.
    #[instrument(skip(self, session, input))]
    pub async fn create(
        &self,
        session: &Session,
        input: CreateGlobalProductInput,
    ) -> Result<global_product::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let image = match input.image {
            Some(url) if !url.trim().is_empty() => ActiveValue::Set(url),
            _ => ActiveValue::NotSet,
        };

        let product = global_product::ActiveModel {
            id: Set(Uuid::new_v4()),
            machine_category_id: Set(input.machine_category_id),
            product_type_id: Set(input.product_type_id),
            brand: Set(input.brand),
            product_name: Set(input.product_name),
            image,
            in_global_catalog: Set(input.in_global_catalog),
            in_company_catalog: Set(input.in_company_catalog),
            ..Default::default()
        };

        let created = product.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create global product");
            ServiceError::DatabaseError(e)
        })?;

        info!(
            product_id = %created.id,
            brand = %created.brand,
            product_name = %created.product_name,
            "Global product created"
        );
        Ok(created)
    }

    #[instrument(skip(self, session, input))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        input: UpdateGlobalProductInput,
    ) -> Result<global_product::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let existing = GlobalProduct::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Global product {} not found", id)))?;

        let mut active = existing.into_active_model();
        if let Some(category_id) = input.machine_category_id {
            active.machine_category_id = Set(category_id);
        }
        if let Some(type_id) = input.product_type_id {
            active.product_type_id = Set(type_id);
        }
        if let Some(brand) = input.brand {
            active.brand = Set(brand);
        }
        if let Some(product_name) = input.product_name {
            active.product_name = Set(product_name);
        }
        if let Some(image) = input.image {
            if !image.trim().is_empty() {
                active.image = Set(image);
            }
        }
        if let Some(flag) = input.in_global_catalog {
            active.in_global_catalog = Set(flag);
        }
        if let Some(flag) = input.in_company_catalog {
            active.in_company_catalog = Set(flag);
        }

        let updated = active.update(db).await.map_err(|e| {
            error!(product_id = %id, error = %e, "Failed to update global product");
            ServiceError::DatabaseError(e)
        })?;

        Ok(updated)
    }

    /// Delete a global product.
    ///
    /// Refused while company products reference it; deleting would orphan
    /// company catalog rows.
    #[instrument(skip(self, session))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), ServiceError> {
        session.require_admin()?;
        let db = &*self.db_pool;

        let referencing = CompanyProduct::find()
            .filter(company_product::Column::ProductId.eq(id))
            .count(db)
            .await?;

        if referencing > 0 {
            return Err(ServiceError::DependencyConflict(format!(
                "Cannot delete product: {} company catalog record(s) still reference it",
                referencing
            )));
        }

        let result = GlobalProduct::delete_by_id(id).exec(db).await.map_err(|e| {
            error!(product_id = %id, error = %e, "Failed to delete global product");
            ServiceError::DatabaseError(e)
        })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Global product {} not found",
                id
            )));
        }

        info!(product_id = %id, "Global product deleted");
        Ok(())
    }
}

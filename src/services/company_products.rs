use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::auth::Session;
use crate::db::DbPool;
use crate::entities::{
    company_product, machine_category, product_type, CompanyProduct, GlobalProduct,
    MachineCategory, ProductType,
};
use crate::errors::ServiceError;
use crate::services::global_products::GlobalProductListing;

/// Company catalog row together with the referenced global product.
#[derive(Debug, Serialize)]
pub struct CompanyCatalogEntry {
    #[serde(flatten)]
    pub company_product: company_product::Model,
    pub global_product: Option<GlobalProductListing>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCompanyProductInput {
    pub product_id: Uuid,
    pub company_id: String,
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub active_for_customer_building: bool,
    #[serde(default)]
    pub commission_enabled: bool,
    pub commission_rate: Option<Decimal>,
}

/// Partial update. Absent fields are left unchanged; activation is gated on
/// an effective base price.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCompanyProductInput {
    pub base_price: Option<Decimal>,
    pub active_for_customer_building: Option<bool>,
    pub commission_enabled: Option<bool>,
    pub commission_rate: Option<Decimal>,
}

/// Service for managing per-company catalog rows
pub struct CompanyProductService {
    db_pool: Arc<DbPool>,
}

impl CompanyProductService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// List a company's catalog, newest import first, each row joined with
    /// its global product and that product's category and type names.
    #[instrument(skip(self, session))]
    pub async fn list_by_company(
        &self,
        session: &Session,
        company_id: &str,
    ) -> Result<Vec<CompanyCatalogEntry>, ServiceError> {
        session.require_company_access(company_id)?;
        let db = &*self.db_pool;

        let rows = CompanyProduct::find()
            .filter(company_product::Column::CompanyId.eq(company_id))
            .find_also_related(GlobalProduct)
            .order_by_desc(company_product::Column::CreatedAt)
            .all(db)
            .await
            .map_err(|e| {
                error!(company_id = %company_id, error = %e, "Failed to list company products");
                ServiceError::DatabaseError(e)
            })?;

        let category_ids: Vec<Uuid> = rows
            .iter()
            .filter_map(|(_, product)| product.as_ref().map(|p| p.machine_category_id))
            .collect();
        let type_ids: Vec<Uuid> = rows
            .iter()
            .filter_map(|(_, product)| product.as_ref().map(|p| p.product_type_id))
            .collect();

        let categories: HashMap<Uuid, machine_category::Model> = MachineCategory::find()
            .filter(machine_category::Column::Id.is_in(category_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let types: HashMap<Uuid, product_type::Model> = ProductType::find()
            .filter(product_type::Column::Id.is_in(type_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let entries = rows
            .into_iter()
            .map(|(company_product, product)| {
                let global_product = product.map(|p| {
                    let category = categories.get(&p.machine_category_id);
                    let product_type = types.get(&p.product_type_id);
                    GlobalProductListing::from_parts(p, category, product_type)
                });
                CompanyCatalogEntry {
                    company_product,
                    global_product,
                }
            })
            .collect();

        Ok(entries)
    }

    #[instrument(skip(self, session))]
    pub async fn get(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<company_product::Model, ServiceError> {
        let db = &*self.db_pool;

        let row = CompanyProduct::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Company product {} not found", id)))?;

        session.require_company_access(&row.company_id)?;
        Ok(row)
    }

    /// Create a company catalog row directly.
    ///
    /// Enforces the same invariants as import plus the activation gate:
    /// a row may not start active without a base price.
    #[instrument(skip(self, session, input))]
    pub async fn create(
        &self,
        session: &Session,
        input: CreateCompanyProductInput,
    ) -> Result<company_product::Model, ServiceError> {
        session.require_company_access(&input.company_id)?;
        let db = &*self.db_pool;

        if input.active_for_customer_building && input.base_price.is_none() {
            return Err(ServiceError::ValidationError(
                "A base price must be set before activating a product for customer building"
                    .to_string(),
            ));
        }

        self.ensure_not_imported(input.product_id, &input.company_id)
            .await?;

        GlobalProduct::find_by_id(input.product_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Global product {} not found", input.product_id))
            })?;

        let row = company_product::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(input.product_id),
            company_id: Set(input.company_id.clone()),
            base_price: Set(input.base_price),
            active_for_customer_building: Set(input.active_for_customer_building),
            commission_enabled: Set(input.commission_enabled),
            commission_rate: Set(input.commission_rate),
            ..Default::default()
        };

        let created = row.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create company product");
            ServiceError::DatabaseError(e)
        })?;

        info!(
            company_product_id = %created.id,
            company_id = %created.company_id,
            "Company product created"
        );
        Ok(created)
    }

    /// Fork a global product into a company's catalog.
    ///
    /// Import never carries pricing: the new row starts without a base
    /// price, inactive and without commission. Importing an already-imported
    /// product is a conflict distinct from any transport error.
    #[instrument(skip(self, session))]
    pub async fn import_from_global(
        &self,
        session: &Session,
        product_id: Uuid,
        company_id: &str,
    ) -> Result<company_product::Model, ServiceError> {
        session.require_company_access(company_id)?;
        let db = &*self.db_pool;

        GlobalProduct::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Global product {} not found", product_id))
            })?;

        self.ensure_not_imported(product_id, company_id).await?;

        let row = company_product::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            company_id: Set(company_id.to_string()),
            base_price: Set(None),
            active_for_customer_building: Set(false),
            commission_enabled: Set(false),
            commission_rate: Set(None),
            ..Default::default()
        };

        let created = row.insert(db).await.map_err(|e| {
            error!(product_id = %product_id, company_id = %company_id, error = %e, "Failed to import product");
            ServiceError::DatabaseError(e)
        })?;

        info!(
            company_product_id = %created.id,
            product_id = %product_id,
            company_id = %company_id,
            "Product imported into company catalog"
        );
        Ok(created)
    }

    /// Update pricing, commission or activation.
    ///
    /// The `Inactive -> Active` transition requires an effective base price
    /// (the incoming value, else the stored one); `Active -> Inactive` is
    /// always allowed.
    #[instrument(skip(self, session, input))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        input: UpdateCompanyProductInput,
    ) -> Result<company_product::Model, ServiceError> {
        let db = &*self.db_pool;

        let existing = CompanyProduct::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Company product {} not found", id)))?;

        session.require_company_access(&existing.company_id)?;

        if input.active_for_customer_building == Some(true) {
            let effective_price = input.base_price.or(existing.base_price);
            if effective_price.is_none() {
                return Err(ServiceError::ValidationError(
                    "A base price must be set before activating a product for customer building"
                        .to_string(),
                ));
            }
        }

        let mut active = existing.into_active_model();
        if let Some(price) = input.base_price {
            active.base_price = Set(Some(price));
        }
        if let Some(flag) = input.active_for_customer_building {
            active.active_for_customer_building = Set(flag);
        }
        if let Some(flag) = input.commission_enabled {
            active.commission_enabled = Set(flag);
        }
        if let Some(rate) = input.commission_rate {
            active.commission_rate = Set(Some(rate));
        }

        let updated = active.update(db).await.map_err(|e| {
            error!(company_product_id = %id, error = %e, "Failed to update company product");
            ServiceError::DatabaseError(e)
        })?;

        Ok(updated)
    }

    /// Remove a product from the company catalog. A later re-import is
    /// allowed once the row is gone.
    #[instrument(skip(self, session))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let existing = CompanyProduct::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Company product {} not found", id)))?;

        session.require_company_access(&existing.company_id)?;

        let result = CompanyProduct::delete_by_id(id).exec(db).await.map_err(|e| {
            error!(company_product_id = %id, error = %e, "Failed to delete company product");
            ServiceError::DatabaseError(e)
        })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Company product {} not found",
                id
            )));
        }

        info!(company_product_id = %id, "Company product deleted");
        Ok(())
    }

    async fn ensure_not_imported(
        &self,
        product_id: Uuid,
        company_id: &str,
    ) -> Result<(), ServiceError> {
        let db = &*self.db_pool;

        let existing = CompanyProduct::find()
            .filter(company_product::Column::ProductId.eq(product_id))
            .filter(company_product::Column::CompanyId.eq(company_id))
            .one(db)
            .await?;

        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Product already exists in company catalog".to_string(),
            ));
        }

        Ok(())
    }
}

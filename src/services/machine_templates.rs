use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, IntoActiveModel, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::auth::Session;
use crate::db::DbPool;
use crate::entities::{machine_category, machine_template, MachineTemplate};
use crate::errors::ServiceError;

/// Template row flattened with its category's display name and icon.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct MachineTemplateListing {
    pub id: Uuid,
    pub name: String,
    pub machine_category_id: Uuid,
    pub description: Option<String>,
    pub template_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMachineTemplateInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Template name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub machine_category_id: Uuid,
    pub description: Option<String>,
    /// Opaque machine configuration; stored and returned uninterpreted
    pub template_data: serde_json::Value,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMachineTemplateInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Template name must be between 1 and 255 characters"
    ))]
    pub name: Option<String>,
    pub machine_category_id: Option<Uuid>,
    pub description: Option<String>,
    pub template_data: Option<serde_json::Value>,
}

/// Service for managing machine templates
pub struct MachineTemplateService {
    db_pool: Arc<DbPool>,
}

impl MachineTemplateService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    fn listing_query() -> Select<MachineTemplate> {
        MachineTemplate::find()
            .column_as(machine_category::Column::Name, "category_name")
            .column_as(machine_category::Column::Icon, "category_icon")
            .join(
                JoinType::LeftJoin,
                machine_template::Relation::MachineCategory.def(),
            )
            .order_by_asc(machine_template::Column::Name)
    }

    #[instrument(skip(self, session))]
    pub async fn list(
        &self,
        session: &Session,
    ) -> Result<Vec<MachineTemplateListing>, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let templates = Self::listing_query()
            .into_model::<MachineTemplateListing>()
            .all(db)
            .await?;

        Ok(templates)
    }

    #[instrument(skip(self, session))]
    pub async fn list_by_category(
        &self,
        session: &Session,
        category_id: Uuid,
    ) -> Result<Vec<MachineTemplateListing>, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        let templates = Self::listing_query()
            .filter(machine_template::Column::MachineCategoryId.eq(category_id))
            .into_model::<MachineTemplateListing>()
            .all(db)
            .await?;

        Ok(templates)
    }

    #[instrument(skip(self, session))]
    pub async fn get(
        &self,
        session: &Session,
        id: Uuid,
    ) -> Result<machine_template::Model, ServiceError> {
        session.require_staff()?;
        let db = &*self.db_pool;

        MachineTemplate::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Machine template {} not found", id)))
    }

    #[instrument(skip(self, session, input))]
    pub async fn create(
        &self,
        session: &Session,
        input: CreateMachineTemplateInput,
    ) -> Result<machine_template::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let template = machine_template::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            machine_category_id: Set(input.machine_category_id),
            description: Set(input.description),
            template_data: Set(input.template_data),
            ..Default::default()
        };

        let created = template.insert(db).await.map_err(|e| {
            error!(error = %e, "Failed to create machine template");
            ServiceError::DatabaseError(e)
        })?;

        info!(template_id = %created.id, name = %created.name, "Machine template created");
        Ok(created)
    }

    #[instrument(skip(self, session, input))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        input: UpdateMachineTemplateInput,
    ) -> Result<machine_template::Model, ServiceError> {
        session.require_admin()?;
        input.validate()?;
        let db = &*self.db_pool;

        let existing = MachineTemplate::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Machine template {} not found", id)))?;

        let mut active = existing.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(category_id) = input.machine_category_id {
            active.machine_category_id = Set(category_id);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(template_data) = input.template_data {
            active.template_data = Set(template_data);
        }

        let updated = active.update(db).await.map_err(|e| {
            error!(template_id = %id, error = %e, "Failed to update machine template");
            ServiceError::DatabaseError(e)
        })?;

        Ok(updated)
    }

    #[instrument(skip(self, session))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), ServiceError> {
        session.require_admin()?;
        let db = &*self.db_pool;

        let result = MachineTemplate::delete_by_id(id).exec(db).await.map_err(|e| {
            error!(template_id = %id, error = %e, "Failed to delete machine template");
            ServiceError::DatabaseError(e)
        })?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Machine template {} not found",
                id
            )));
        }

        info!(template_id = %id, "Machine template deleted");
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Machine template entity
///
/// `template_data` is an opaque structured payload describing a machine
/// configuration; the service stores and returns it without interpretation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "machine_templates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Template name must be between 1 and 255 characters"
    ))]
    pub name: String,

    /// Owning machine category
    pub machine_category_id: Uuid,

    pub description: Option<String>,

    /// Opaque machine configuration payload
    pub template_data: Json,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::machine_category::Entity",
        from = "Column::MachineCategoryId",
        to = "super::machine_category::Column::Id"
    )]
    MachineCategory,
}

impl Related<super::machine_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineCategory.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            active_model.created_at = Set(Utc::now());
        }
        active_model.updated_at = Set(Utc::now());

        Ok(active_model)
    }
}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product type within a machine category (e.g. "12oz Can", "Bagged Snack")
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "product_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Product type name must be between 1 and 255 characters"
    ))]
    pub name: String,

    /// Owning machine category
    pub machine_category_id: Uuid,

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
    #[sea_orm(has_many = "super::global_product::Entity")]
    GlobalProducts,
}

impl Related<super::machine_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineCategory.def()
    }
}

impl Related<super::global_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GlobalProducts.def()
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

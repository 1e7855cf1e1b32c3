use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Machine category entity (e.g. "Snack", "Drink")
///
/// Parent of product types, global products and machine templates; deletion
/// is refused while any of those still reference the category.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "machine_categories")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Category name
    #[validate(length(
        min = 1,
        max = 255,
        message = "Category name must be between 1 and 255 characters"
    ))]
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Optional icon (emoji or short glyph shown in listings)
    pub icon: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_type::Entity")]
    ProductTypes,
    #[sea_orm(has_many = "super::global_product::Entity")]
    GlobalProducts,
    #[sea_orm(has_many = "super::machine_template::Entity")]
    MachineTemplates,
}

impl Related<super::product_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductTypes.def()
    }
}

impl Related<super::global_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GlobalProducts.def()
    }
}

impl Related<super::machine_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineTemplates.def()
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

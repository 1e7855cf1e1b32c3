use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Company product entity
///
/// A company-scoped fork of a global product carrying pricing, commission
/// and activation state. At most one row may exist per
/// (product_id, company_id) pair; activation requires a base price.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Referenced global product
    pub product_id: Uuid,

    /// Owning company
    pub company_id: String,

    /// Operator-set price; never carried over by import
    pub base_price: Option<Decimal>,

    /// Eligible to appear in customer-facing building flows
    pub active_for_customer_building: bool,

    /// Commission applies to this product
    pub commission_enabled: bool,

    /// Commission percentage; meaningful only while commission is enabled
    pub commission_rate: Option<Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::global_product::Entity",
        from = "Column::ProductId",
        to = "super::global_product::Column::Id"
    )]
    GlobalProduct,
}

impl Related<super::global_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GlobalProduct.def()
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
            if let ActiveValue::NotSet = active_model.active_for_customer_building {
                active_model.active_for_customer_building = Set(false);
            }
            if let ActiveValue::NotSet = active_model.commission_enabled {
                active_model.commission_enabled = Set(false);
            }

            active_model.created_at = Set(Utc::now());
        }

        active_model.updated_at = Set(Utc::now());

        Ok(active_model)
    }
}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Image URL stored when a product is created without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/150x150?text=Product";

/// Global product entity
///
/// The admin-curated master record a company product is forked from. The two
/// catalog flags model placement, not existence: a product may exist without
/// being visible in either catalog.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "global_products")]
pub struct Model {
    /// Primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Owning machine category
    pub machine_category_id: Uuid,

    /// Product type within the category
    pub product_type_id: Uuid,

    /// Brand name (e.g. "Coca-Cola", "Doritos")
    #[validate(length(
        min = 1,
        max = 255,
        message = "Brand must be between 1 and 255 characters"
    ))]
    pub brand: String,

    /// Product name (e.g. "Classic Cola", "Nacho Cheese Chips")
    #[validate(length(
        min = 1,
        max = 255,
        message = "Product name must be between 1 and 255 characters"
    ))]
    pub product_name: String,

    /// Image URL; defaults to [`PLACEHOLDER_IMAGE_URL`] when omitted
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,

    /// Visible in the shared global catalog
    pub in_global_catalog: bool,

    /// Visible in company catalogs for import
    pub in_company_catalog: bool,

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
    #[sea_orm(
        belongs_to = "super::product_type::Entity",
        from = "Column::ProductTypeId",
        to = "super::product_type::Column::Id"
    )]
    ProductType,
    #[sea_orm(has_many = "super::company_product::Entity")]
    CompanyProducts,
}

impl Related<super::machine_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MachineCategory.def()
    }
}

impl Related<super::product_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductType.def()
    }
}

impl Related<super::company_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompanyProducts.def()
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
            // Store-level defaults for omitted fields
            if let ActiveValue::NotSet = active_model.image {
                active_model.image = Set(PLACEHOLDER_IMAGE_URL.to_string());
            }
            if let ActiveValue::NotSet = active_model.in_global_catalog {
                active_model.in_global_catalog = Set(true);
            }
            if let ActiveValue::NotSet = active_model.in_company_catalog {
                active_model.in_company_catalog = Set(false);
            }

            active_model.created_at = Set(Utc::now());
        }

        active_model.updated_at = Set(Utc::now());

        let model: Model = active_model.clone().try_into().map_err(|_| {
            DbErr::Custom("Failed to convert ActiveModel to Model for validation".to_string())
        })?;

        if let Err(err) = model.validate() {
            return Err(DbErr::Custom(format!("Validation error: {}", err)));
        }

        Ok(active_model)
    }
}

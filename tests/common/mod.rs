#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use uuid::Uuid;

use vending_catalog_api::auth::{roles, Session};
use vending_catalog_api::entities::{global_product, machine_category, product_type};
use vending_catalog_api::migrator::Migrator;
use vending_catalog_api::services::global_products::{
    CreateGlobalProductInput, GlobalProductService,
};
use vending_catalog_api::services::machine_categories::{
    CreateMachineCategoryInput, MachineCategoryService,
};
use vending_catalog_api::services::machine_templates::{
    CreateMachineTemplateInput, MachineTemplateService,
};
use vending_catalog_api::services::product_types::{CreateProductTypeInput, ProductTypeService};

/// Fresh in-memory SQLite database with the catalog schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1);

    let db = Database::connect(opt)
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations failed");

    Arc::new(db)
}

pub fn admin_session() -> Session {
    Session {
        user_id: "admin-1".to_string(),
        email: Some("admin@example.com".to_string()),
        company_id: None,
        roles: vec![roles::ADMIN.to_string()],
    }
}

pub fn operator_session(company_id: &str) -> Session {
    Session {
        user_id: format!("operator-{}", company_id),
        email: None,
        company_id: Some(company_id.to_string()),
        roles: vec![roles::OPERATOR.to_string()],
    }
}

/// A session carrying no catalog role at all.
pub fn unprivileged_session() -> Session {
    Session {
        user_id: "visitor-1".to_string(),
        email: None,
        company_id: None,
        roles: vec![],
    }
}

pub async fn create_category(
    db: &Arc<DatabaseConnection>,
    name: &str,
    icon: Option<&str>,
) -> machine_category::Model {
    MachineCategoryService::new(db.clone())
        .create(
            &admin_session(),
            CreateMachineCategoryInput {
                name: name.to_string(),
                description: None,
                icon: icon.map(str::to_string),
            },
        )
        .await
        .expect("failed to create category")
}

pub async fn create_product_type(
    db: &Arc<DatabaseConnection>,
    name: &str,
    category_id: Uuid,
) -> product_type::Model {
    ProductTypeService::new(db.clone())
        .create(
            &admin_session(),
            CreateProductTypeInput {
                name: name.to_string(),
                machine_category_id: category_id,
            },
        )
        .await
        .expect("failed to create product type")
}

pub async fn create_global_product(
    db: &Arc<DatabaseConnection>,
    brand: &str,
    product_name: &str,
    category_id: Uuid,
    type_id: Uuid,
) -> global_product::Model {
    GlobalProductService::new(db.clone())
        .create(
            &admin_session(),
            CreateGlobalProductInput {
                machine_category_id: category_id,
                product_type_id: type_id,
                brand: brand.to_string(),
                product_name: product_name.to_string(),
                image: None,
                in_global_catalog: true,
                in_company_catalog: false,
            },
        )
        .await
        .expect("failed to create global product")
}

pub async fn create_template(
    db: &Arc<DatabaseConnection>,
    name: &str,
    category_id: Uuid,
) -> vending_catalog_api::entities::machine_template::Model {
    MachineTemplateService::new(db.clone())
        .create(
            &admin_session(),
            CreateMachineTemplateInput {
                name: name.to_string(),
                machine_category_id: category_id,
                description: None,
                template_data: json!({ "rows": 6, "columns": 8 }),
            },
        )
        .await
        .expect("failed to create machine template")
}

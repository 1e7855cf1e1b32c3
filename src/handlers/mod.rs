//! HTTP surface: thin axum handlers that decode the session, call a domain
//! service and render the result as JSON. All user notification decisions
//! live with the caller; handlers only translate `ServiceError` via its
//! `IntoResponse` impl.

pub mod company_products;
pub mod global_products;
pub mod health;
pub mod machine_categories;
pub mod machine_templates;
pub mod product_types;

use std::sync::Arc;

use axum::Router;

use crate::db::DbPool;
use crate::services::{
    CompanyProductService, GlobalProductService, MachineCategoryService, MachineTemplateService,
    ProductTypeService,
};
use crate::AppState;

/// Aggregated domain services shared by the HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub machine_categories: Arc<MachineCategoryService>,
    pub product_types: Arc<ProductTypeService>,
    pub global_products: Arc<GlobalProductService>,
    pub company_products: Arc<CompanyProductService>,
    pub machine_templates: Arc<MachineTemplateService>,
}

impl AppServices {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            machine_categories: Arc::new(MachineCategoryService::new(db.clone())),
            product_types: Arc::new(ProductTypeService::new(db.clone())),
            global_products: Arc::new(GlobalProductService::new(db.clone())),
            company_products: Arc::new(CompanyProductService::new(db.clone())),
            machine_templates: Arc::new(MachineTemplateService::new(db)),
        }
    }
}

/// All catalog routes, nested under `/api/v1`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/machine-categories", machine_categories::routes())
        .nest("/product-types", product_types::routes())
        .nest("/global-products", global_products::routes())
        .nest("/company-products", company_products::routes())
        .nest("/machine-templates", machine_templates::routes())
}

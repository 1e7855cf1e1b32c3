//! Catalog domain services.
//!
//! One service per entity. Each method takes the caller's [`Session`]
//! explicitly and performs its own role and company checks, so the
//! invariants hold regardless of which surface invoked them.
//!
//! [`Session`]: crate::auth::Session

pub mod company_products;
pub mod global_products;
pub mod machine_categories;
pub mod machine_templates;
pub mod product_types;

pub use company_products::CompanyProductService;
pub use global_products::GlobalProductService;
pub use machine_categories::MachineCategoryService;
pub use machine_templates::MachineTemplateService;
pub use product_types::ProductTypeService;

//! Sea-ORM entities for the catalog schema.
//!
//! Five tables: machine categories, product types, global products,
//! company products and machine templates. Field names, nullability and
//! defaults are the contract with the backing store and must not drift.

pub mod company_product;
pub mod global_product;
pub mod machine_category;
pub mod machine_template;
pub mod product_type;

pub use company_product::Entity as CompanyProduct;
pub use global_product::Entity as GlobalProduct;
pub use machine_category::Entity as MachineCategory;
pub use machine_template::Entity as MachineTemplate;
pub use product_type::Entity as ProductType;

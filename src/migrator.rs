#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_catalog_tables::Migration),
            Box::new(m20250301_000002_create_company_products_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250301_000001_create_catalog_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MachineCategories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MachineCategories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MachineCategories::Name).string().not_null())
                        .col(ColumnDef::new(MachineCategories::Description).string().null())
                        .col(ColumnDef::new(MachineCategories::Icon).string().null())
                        .col(
                            ColumnDef::new(MachineCategories::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MachineCategories::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductTypes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductTypes::Name).string().not_null())
                        .col(
                            ColumnDef::new(ProductTypes::MachineCategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductTypes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProductTypes::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_types_machine_category")
                                .from(ProductTypes::Table, ProductTypes::MachineCategoryId)
                                .to(MachineCategories::Table, MachineCategories::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_types_machine_category_id")
                        .table(ProductTypes::Table)
                        .col(ProductTypes::MachineCategoryId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GlobalProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GlobalProducts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GlobalProducts::MachineCategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GlobalProducts::ProductTypeId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(GlobalProducts::Brand).string().not_null())
                        .col(
                            ColumnDef::new(GlobalProducts::ProductName)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(GlobalProducts::Image).string().not_null())
                        .col(
                            ColumnDef::new(GlobalProducts::InGlobalCatalog)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(GlobalProducts::InCompanyCatalog)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(GlobalProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GlobalProducts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_global_products_machine_category")
                                .from(GlobalProducts::Table, GlobalProducts::MachineCategoryId)
                                .to(MachineCategories::Table, MachineCategories::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_global_products_product_type")
                                .from(GlobalProducts::Table, GlobalProducts::ProductTypeId)
                                .to(ProductTypes::Table, ProductTypes::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_global_products_machine_category_id")
                        .table(GlobalProducts::Table)
                        .col(GlobalProducts::MachineCategoryId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_global_products_product_type_id")
                        .table(GlobalProducts::Table)
                        .col(GlobalProducts::ProductTypeId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MachineTemplates::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MachineTemplates::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(MachineTemplates::Name).string().not_null())
                        .col(
                            ColumnDef::new(MachineTemplates::MachineCategoryId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MachineTemplates::Description)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(MachineTemplates::TemplateData)
                                .json()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MachineTemplates::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MachineTemplates::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_machine_templates_machine_category")
                                .from(MachineTemplates::Table, MachineTemplates::MachineCategoryId)
                                .to(MachineCategories::Table, MachineCategories::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_machine_templates_machine_category_id")
                        .table(MachineTemplates::Table)
                        .col(MachineTemplates::MachineCategoryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MachineTemplates::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GlobalProducts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductTypes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(MachineCategories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum MachineCategories {
        Table,
        Id,
        Name,
        Description,
        Icon,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum ProductTypes {
        Table,
        Id,
        Name,
        MachineCategoryId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum GlobalProducts {
        Table,
        Id,
        MachineCategoryId,
        ProductTypeId,
        Brand,
        ProductName,
        Image,
        InGlobalCatalog,
        InCompanyCatalog,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum MachineTemplates {
        Table,
        Id,
        Name,
        MachineCategoryId,
        Description,
        TemplateData,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250301_000002_create_company_products_table {

    use sea_orm_migration::prelude::*;

    use super::m20250301_000001_create_catalog_tables::GlobalProducts;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_company_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CompanyProducts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CompanyProducts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CompanyProducts::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(CompanyProducts::CompanyId)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CompanyProducts::BasePrice).decimal().null())
                        .col(
                            ColumnDef::new(CompanyProducts::ActiveForCustomerBuilding)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(CompanyProducts::CommissionEnabled)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(CompanyProducts::CommissionRate)
                                .decimal()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(CompanyProducts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CompanyProducts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_company_products_global_product")
                                .from(CompanyProducts::Table, CompanyProducts::ProductId)
                                .to(GlobalProducts::Table, GlobalProducts::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // Store-level backstop for the at-most-one-import invariant
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uniq_company_products_product_company")
                        .table(CompanyProducts::Table)
                        .col(CompanyProducts::ProductId)
                        .col(CompanyProducts::CompanyId)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_company_products_company_id")
                        .table(CompanyProducts::Table)
                        .col(CompanyProducts::CompanyId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CompanyProducts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum CompanyProducts {
        Table,
        Id,
        ProductId,
        CompanyId,
        BasePrice,
        ActiveForCustomerBuilding,
        CommissionEnabled,
        CommissionRate,
        CreatedAt,
        UpdatedAt,
    }
}

//! Global product catalog: placeholder image default, catalog flags stored
//! as-is, joined listings and the delete guard against company references.

mod common;

use common::{
    admin_session, create_category, create_global_product, create_product_type, operator_session,
    setup_db,
};
use vending_catalog_api::entities::global_product::PLACEHOLDER_IMAGE_URL;
use vending_catalog_api::errors::ServiceError;
use vending_catalog_api::services::company_products::CompanyProductService;
use vending_catalog_api::services::global_products::{
    CreateGlobalProductInput, GlobalProductService, UpdateGlobalProductInput,
};

#[tokio::test]
async fn missing_image_falls_back_to_placeholder() {
    let db = setup_db().await;
    let session = admin_session();

    let category = create_category(&db, "Drink", None).await;
    let product_type = create_product_type(&db, "12oz Can", category.id).await;

    let product = create_global_product(&db, "Acme", "Cola", category.id, product_type.id).await;
    assert_eq!(product.image, PLACEHOLDER_IMAGE_URL);

    // Blank string counts as omitted too
    let service = GlobalProductService::new(db.clone());
    let product = service
        .create(
            &session,
            CreateGlobalProductInput {
                machine_category_id: category.id,
                product_type_id: product_type.id,
                brand: "Acme".to_string(),
                product_name: "Diet Cola".to_string(),
                image: Some("   ".to_string()),
                in_global_catalog: true,
                in_company_catalog: false,
            },
        )
        .await
        .unwrap();
    assert_eq!(product.image, PLACEHOLDER_IMAGE_URL);
}

#[tokio::test]
async fn explicit_image_is_preserved() {
    let db = setup_db().await;
    let service = GlobalProductService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Snack", None).await;
    let product_type = create_product_type(&db, "Chips", category.id).await;

    let product = service
        .create(
            &session,
            CreateGlobalProductInput {
                machine_category_id: category.id,
                product_type_id: product_type.id,
                brand: "Acme".to_string(),
                product_name: "Nacho Chips".to_string(),
                image: Some("https://example.com/chips.jpg".to_string()),
                in_global_catalog: true,
                in_company_catalog: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(product.image, "https://example.com/chips.jpg");
}

#[tokio::test]
async fn catalog_flags_are_stored_as_given() {
    let db = setup_db().await;
    let service = GlobalProductService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Snack", None).await;
    let product_type = create_product_type(&db, "Chips", category.id).await;

    // A product can exist without being visible in either catalog
    let product = service
        .create(
            &session,
            CreateGlobalProductInput {
                machine_category_id: category.id,
                product_type_id: product_type.id,
                brand: "Acme".to_string(),
                product_name: "Hidden Chips".to_string(),
                image: None,
                in_global_catalog: false,
                in_company_catalog: false,
            },
        )
        .await
        .unwrap();

    assert!(!product.in_global_catalog);
    assert!(!product.in_company_catalog);
}

#[tokio::test]
async fn listings_carry_category_and_type_names() {
    let db = setup_db().await;
    let service = GlobalProductService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Snack", Some("🍿")).await;
    let product_type = create_product_type(&db, "Chips", category.id).await;
    create_global_product(&db, "Acme", "Nacho Chips", category.id, product_type.id).await;
    create_global_product(&db, "Acme", "BBQ Chips", category.id, product_type.id).await;

    let listings = service.list(&session).await.unwrap();
    assert_eq!(listings.len(), 2);

    // Ordered by product name
    assert_eq!(listings[0].product_name, "BBQ Chips");
    assert_eq!(listings[1].product_name, "Nacho Chips");

    let first = &listings[0];
    assert_eq!(first.category_name.as_deref(), Some("Snack"));
    assert_eq!(first.category_icon.as_deref(), Some("🍿"));
    assert_eq!(first.product_type_name.as_deref(), Some("Chips"));

    let filtered = service
        .list_by_category(&session, category.id)
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2);
}

#[tokio::test]
async fn delete_refused_while_company_products_reference_product() {
    let db = setup_db().await;
    let service = GlobalProductService::new(db.clone());
    let company_products = CompanyProductService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Drink", None).await;
    let product_type = create_product_type(&db, "12oz Can", category.id).await;
    let product = create_global_product(&db, "Acme", "Cola", category.id, product_type.id).await;

    let imported = company_products
        .import_from_global(&operator_session("company-1"), product.id, "company-1")
        .await
        .unwrap();

    let err = service.delete(&session, product.id).await.unwrap_err();
    assert!(err.is_dependency_conflict());

    company_products
        .delete(&session, imported.id)
        .await
        .unwrap();
    service.delete(&session, product.id).await.unwrap();
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let db = setup_db().await;
    let service = GlobalProductService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Snack", None).await;
    let product_type = create_product_type(&db, "Chips", category.id).await;
    let product = create_global_product(&db, "Acme", "Nacho Chips", category.id, product_type.id).await;

    let updated = service
        .update(
            &session,
            product.id,
            UpdateGlobalProductInput {
                brand: Some("Bolt".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.brand, "Bolt");
    assert_eq!(updated.product_name, "Nacho Chips");
    assert_eq!(updated.image, product.image);
}

#[tokio::test]
async fn blank_brand_is_rejected() {
    let db = setup_db().await;
    let service = GlobalProductService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Snack", None).await;
    let product_type = create_product_type(&db, "Chips", category.id).await;

    let err = service
        .create(
            &session,
            CreateGlobalProductInput {
                machine_category_id: category.id,
                product_type_id: product_type.id,
                brand: "".to_string(),
                product_name: "Nameless".to_string(),
                image: None,
                in_global_catalog: true,
                in_company_catalog: false,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

//! Product type CRUD and the delete guard against referencing global
//! products.

mod common;

use common::{
    admin_session, create_category, create_global_product, create_product_type, operator_session,
    setup_db,
};
use uuid::Uuid;
use vending_catalog_api::errors::ServiceError;
use vending_catalog_api::services::global_products::GlobalProductService;
use vending_catalog_api::services::product_types::{
    CreateProductTypeInput, ProductTypeService, UpdateProductTypeInput,
};

#[tokio::test]
async fn list_by_category_filters_and_orders() {
    let db = setup_db().await;
    let service = ProductTypeService::new(db.clone());
    let session = admin_session();

    let snacks = create_category(&db, "Snack", None).await;
    let drinks = create_category(&db, "Drink", None).await;

    create_product_type(&db, "Chips", snacks.id).await;
    create_product_type(&db, "Candy Bar", snacks.id).await;
    create_product_type(&db, "12oz Can", drinks.id).await;

    let snack_types = service.list_by_category(&session, snacks.id).await.unwrap();
    let names: Vec<&str> = snack_types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Candy Bar", "Chips"]);

    let all = service.list(&session).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn update_can_move_type_to_another_category() {
    let db = setup_db().await;
    let service = ProductTypeService::new(db.clone());
    let session = admin_session();

    let snacks = create_category(&db, "Snack", None).await;
    let drinks = create_category(&db, "Drink", None).await;
    let product_type = create_product_type(&db, "Bottled Water", snacks.id).await;

    let updated = service
        .update(
            &session,
            product_type.id,
            UpdateProductTypeInput {
                machine_category_id: Some(drinks.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.machine_category_id, drinks.id);
    assert_eq!(updated.name, "Bottled Water");
}

#[tokio::test]
async fn delete_refused_while_global_products_reference_type() {
    let db = setup_db().await;
    let service = ProductTypeService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Snack", None).await;
    let product_type = create_product_type(&db, "Chips", category.id).await;
    let product =
        create_global_product(&db, "Acme", "Nacho Chips", category.id, product_type.id).await;

    let err = service.delete(&session, product_type.id).await.unwrap_err();
    assert!(err.is_dependency_conflict());

    // Removing the referencing product unblocks the delete
    GlobalProductService::new(db.clone())
        .delete(&session, product.id)
        .await
        .unwrap();
    service.delete(&session, product_type.id).await.unwrap();

    let remaining = service.list(&session).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn delete_of_missing_type_is_not_found() {
    let db = setup_db().await;
    let service = ProductTypeService::new(db.clone());

    let err = service
        .delete(&admin_session(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn operator_cannot_create_types() {
    let db = setup_db().await;
    let service = ProductTypeService::new(db.clone());
    let category = create_category(&db, "Snack", None).await;

    let err = service
        .create(
            &operator_session("company-1"),
            CreateProductTypeInput {
                name: "Chips".to_string(),
                machine_category_id: category.id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

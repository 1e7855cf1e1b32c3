//! Machine category lifecycle: ordering, partial updates and the
//! dependency-checked delete.

mod common;

use common::{
    admin_session, create_category, create_global_product, create_product_type, create_template,
    operator_session, setup_db,
};
use uuid::Uuid;
use vending_catalog_api::errors::ServiceError;
use vending_catalog_api::services::machine_categories::{
    CreateMachineCategoryInput, MachineCategoryService, UpdateMachineCategoryInput,
};

#[tokio::test]
async fn list_is_ordered_by_name() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    create_category(&db, "Snack", None).await;
    create_category(&db, "Drink", None).await;
    create_category(&db, "Coffee", None).await;

    let categories = service.list(&session).await.unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Coffee", "Drink", "Snack"]);
}

#[tokio::test]
async fn create_round_trips_fields() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    let created = service
        .create(
            &session,
            CreateMachineCategoryInput {
                name: "Snack".to_string(),
                description: Some("Chips and candy".to_string()),
                icon: Some("🍿".to_string()),
            },
        )
        .await
        .unwrap();

    let fetched = service.get(&session, created.id).await.unwrap();
    assert_eq!(fetched.name, "Snack");
    assert_eq!(fetched.description.as_deref(), Some("Chips and candy"));
    assert_eq!(fetched.icon.as_deref(), Some("🍿"));
}

#[tokio::test]
async fn update_leaves_absent_fields_unchanged() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    let created = create_category(&db, "Snack", Some("🍿")).await;

    let updated = service
        .update(
            &session,
            created.id,
            UpdateMachineCategoryInput {
                icon: Some("🥨".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Snack");
    assert_eq!(updated.icon.as_deref(), Some("🥨"));
}

#[tokio::test]
async fn delete_refused_while_product_type_references_category() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Snack", Some("🍿")).await;
    create_product_type(&db, "Chips", category.id).await;

    let deps = service
        .check_dependencies(&session, category.id)
        .await
        .unwrap();
    assert!(deps.has_product_types);
    assert_eq!(deps.product_types_count, 1);
    assert_eq!(deps.global_products_count, 0);
    assert_eq!(deps.machine_templates_count, 0);

    let err = service.delete(&session, category.id).await.unwrap_err();
    assert!(err.is_dependency_conflict());
    assert!(err.to_string().contains("1 product type(s)"));

    // Category and referent are untouched by the refusal
    let categories = service.list(&session).await.unwrap();
    assert!(categories.iter().any(|c| c.id == category.id));
}

#[tokio::test]
async fn dependency_check_counts_all_three_tables() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Drink", None).await;
    let product_type = create_product_type(&db, "12oz Can", category.id).await;
    create_global_product(&db, "Acme", "Cola", category.id, product_type.id).await;
    create_template(&db, "Standard Drink Machine", category.id).await;

    let deps = service
        .check_dependencies(&session, category.id)
        .await
        .unwrap();
    assert_eq!(deps.product_types_count, 1);
    assert_eq!(deps.global_products_count, 1);
    assert_eq!(deps.machine_templates_count, 1);
    assert!(deps.is_blocked());
}

#[tokio::test]
async fn delete_removes_unreferenced_category() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    let category = create_category(&db, "Fresh Food", None).await;

    let outcome = service.delete(&session, category.id).await.unwrap();
    assert!(outcome.deleted);
    assert_eq!(outcome.count, 1);

    let categories = service.list(&session).await.unwrap();
    assert!(categories.iter().all(|c| c.id != category.id));
}

#[tokio::test]
async fn delete_of_missing_category_is_not_found() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    let err = service.delete(&session, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn operator_cannot_mutate_categories() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let operator = operator_session("company-1");

    let err = service
        .create(
            &operator,
            CreateMachineCategoryInput {
                name: "Snack".to_string(),
                description: None,
                icon: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    // Reads are allowed for operators
    assert!(service.list(&operator).await.is_ok());
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let db = setup_db().await;
    let service = MachineCategoryService::new(db.clone());
    let session = admin_session();

    let err = service
        .create(
            &session,
            CreateMachineCategoryInput {
                name: "".to_string(),
                description: None,
                icon: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

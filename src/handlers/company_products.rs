use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::ServiceError;
use crate::services::company_products::{CreateCompanyProductInput, UpdateCompanyProductInput};
use crate::AppState;

#[derive(Deserialize)]
struct ListParams {
    company_id: String,
}

#[derive(Deserialize)]
struct ImportRequest {
    product_id: Uuid,
    company_id: String,
}

async fn list_company_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let entries = state
        .services
        .company_products
        .list_by_company(&session, &params.company_id)
        .await?;
    Ok(Json(entries))
}

async fn get_company_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let row = state.services.company_products.get(&session, id).await?;
    Ok(Json(row))
}

async fn create_company_product(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateCompanyProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .company_products
        .create(&session, input)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn import_from_global(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<ImportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .company_products
        .import_from_global(&session, request.product_id, &request.company_id)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn update_company_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Json(input): Json<UpdateCompanyProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .company_products
        .update(&session, id, input)
        .await?;
    Ok(Json(updated))
}

async fn delete_company_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.company_products.delete(&session, id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_company_products))
        .route("/", post(create_company_product))
        .route("/import", post(import_from_global))
        .route("/:id", get(get_company_product))
        .route("/:id", put(update_company_product))
        .route("/:id", delete(delete_company_product))
}

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
use crate::services::global_products::{CreateGlobalProductInput, UpdateGlobalProductInput};
use crate::AppState;

#[derive(Deserialize)]
struct ListParams {
    category_id: Option<Uuid>,
}

async fn list_global_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let products = match params.category_id {
        Some(category_id) => {
            state
                .services
                .global_products
                .list_by_category(&session, category_id)
                .await?
        }
        None => state.services.global_products.list(&session).await?,
    };
    Ok(Json(products))
}

async fn get_global_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.global_products.get(&session, id).await?;
    Ok(Json(product))
}

async fn create_global_product(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateGlobalProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .global_products
        .create(&session, input)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn update_global_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Json(input): Json<UpdateGlobalProductInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .global_products
        .update(&session, id, input)
        .await?;
    Ok(Json(updated))
}

async fn delete_global_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.global_products.delete(&session, id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_global_products))
        .route("/", post(create_global_product))
        .route("/:id", get(get_global_product))
        .route("/:id", put(update_global_product))
        .route("/:id", delete(delete_global_product))
}

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
use crate::services::product_types::{CreateProductTypeInput, UpdateProductTypeInput};
use crate::AppState;

#[derive(Deserialize)]
struct ListParams {
    category_id: Option<Uuid>,
}

async fn list_product_types(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let types = match params.category_id {
        Some(category_id) => {
            state
                .services
                .product_types
                .list_by_category(&session, category_id)
                .await?
        }
        None => state.services.product_types.list(&session).await?,
    };
    Ok(Json(types))
}

async fn create_product_type(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateProductTypeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.product_types.create(&session, input).await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn update_product_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Json(input): Json<UpdateProductTypeInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .product_types
        .update(&session, id, input)
        .await?;
    Ok(Json(updated))
}

async fn delete_product_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.product_types.delete(&session, id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_product_types))
        .route("/", post(create_product_type))
        .route("/:id", put(update_product_type))
        .route("/:id", delete(delete_product_type))
}

use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;

use crate::auth::Session;
use crate::errors::ServiceError;
use crate::services::machine_categories::{
    CreateMachineCategoryInput, UpdateMachineCategoryInput,
};
use crate::AppState;

async fn list_categories(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let categories = state.services.machine_categories.list(&session).await?;
    Ok(Json(categories))
}

async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let category = state.services.machine_categories.get(&session, id).await?;
    Ok(Json(category))
}

async fn create_category(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateMachineCategoryInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .machine_categories
        .create(&session, input)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Json(input): Json<UpdateMachineCategoryInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .machine_categories
        .update(&session, id, input)
        .await?;
    Ok(Json(updated))
}

async fn check_category_dependencies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let deps = state
        .services
        .machine_categories
        .check_dependencies(&session, id)
        .await?;
    Ok(Json(deps))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let outcome = state
        .services
        .machine_categories
        .delete(&session, id)
        .await?;
    Ok(Json(outcome))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/", post(create_category))
        .route("/:id", get(get_category))
        .route("/:id", put(update_category))
        .route("/:id", delete(delete_category))
        .route("/:id/dependencies", get(check_category_dependencies))
}

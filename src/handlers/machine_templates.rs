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
use crate::services::machine_templates::{CreateMachineTemplateInput, UpdateMachineTemplateInput};
use crate::AppState;

#[derive(Deserialize)]
struct ListParams {
    category_id: Option<Uuid>,
}

async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let templates = match params.category_id {
        Some(category_id) => {
            state
                .services
                .machine_templates
                .list_by_category(&session, category_id)
                .await?
        }
        None => state.services.machine_templates.list(&session).await?,
    };
    Ok(Json(templates))
}

async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    let template = state.services.machine_templates.get(&session, id).await?;
    Ok(Json(template))
}

async fn create_template(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<CreateMachineTemplateInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .machine_templates
        .create(&session, input)
        .await?;
    Ok((axum::http::StatusCode::CREATED, Json(created)))
}

async fn update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
    Json(input): Json<UpdateMachineTemplateInput>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state
        .services
        .machine_templates
        .update(&session, id, input)
        .await?;
    Ok(Json(updated))
}

async fn delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    session: Session,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.machine_templates.delete(&session, id).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_templates))
        .route("/", post(create_template))
        .route("/:id", get(get_template))
        .route("/:id", put(update_template))
        .route("/:id", delete(delete_template))
}

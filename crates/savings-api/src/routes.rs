//! Route table and handlers.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/healthz` | liveness |
//! | GET, POST | `/api/settings` | read / partially update rates |
//! | GET, POST | `/api/projects` | list / upsert |
//! | GET, PUT, DELETE | `/api/projects/{id}` | read / patch / remove |
//! | GET | `/api/summary` | totals across all projects |

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value, json};

use savings_core::{ProjectInput, ProjectPatch, ProjectView, Settings, SettingsPatch, Totals};

use crate::{AppState, Result, middleware};

/// Build the full router with middleware applied.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/settings", get(get_settings).post(update_settings))
        .route("/projects", get(list_projects).post(upsert_project))
        .route(
            "/projects/{id}",
            get(get_project).put(patch_project).delete(delete_project),
        )
        .route("/summary", get(summary));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::cors())
        .layer(middleware::trace())
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.get())
}

async fn update_settings(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Settings>> {
    let patch = SettingsPatch::from_json(json_body(&body)?)?;
    let updated = state.settings.update(&patch);
    tracing::info!(
        it_rate = updated.it_rate,
        business_rate = updated.business_rate,
        "Settings updated"
    );
    Ok(Json(updated))
}

async fn list_projects(State(state): State<AppState>) -> Json<Vec<ProjectView>> {
    Json(state.projects.list())
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectView>> {
    Ok(Json(state.projects.get(&id)?))
}

async fn upsert_project(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProjectView>> {
    let view = state.projects.upsert(ProjectInput::from_json(json_body(&body)?)?)?;
    tracing::info!(id = %view.project.id, "Project saved");
    Ok(Json(view))
}

async fn patch_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<ProjectView>> {
    let patch = ProjectPatch::from_json(json_body(&body)?)?;
    let view = state.projects.patch(&id, &patch)?;
    tracing::info!(id = %id, "Project patched");
    Ok(Json(view))
}

async fn delete_project(State(state): State<AppState>, Path(id): Path<String>) -> Json<Value> {
    let removed = state.projects.remove(&id);
    tracing::info!(id = %id, removed, "Project delete");
    Json(json!({ "success": true }))
}

async fn summary(State(state): State<AppState>) -> Json<Totals> {
    Json(state.projects.totals())
}

/// Parse a request body as JSON regardless of its content type.
///
/// A missing or blank body reads as `{}`, so a create without a body fails
/// the id check rather than the parser.
fn json_body(body: &Bytes) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_slice(body)?)
}

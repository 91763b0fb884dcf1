use crate::{
    error::{self, Error},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use liborgmap::{core::loadable::Loadable, organisation::Organisation};
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_organisations))
        .route("/create", post(create_organisation))
        .route("/{id}", get(show_organisation))
}

#[derive(Deserialize)]
struct CreateParams {
    name: String,
}

async fn create_organisation(
    State(state): State<AppState>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Organisation>, error::Error> {
    let mut organisation = Organisation::new(params.name);
    organisation.insert(&state.db).await?;
    // re-read the committed row so the response carries the generated id
    let organisation = Organisation::load(organisation.id, &state.db).await?;
    Ok(Json(organisation))
}

async fn list_organisations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Organisation>>, error::Error> {
    let organisations = Organisation::load_all(None, &state.db).await?;
    Ok(Json(organisations))
}

async fn show_organisation(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Organisation>, error::Error> {
    let organisation = Organisation::load(id, &state.db).await.map_err(|e| match e {
        liborgmap::Error::DatabaseRowNotFound(_) => {
            Error::NotFound("Organisation not found".to_string())
        }
        e => e.into(),
    })?;
    Ok(Json(organisation))
}

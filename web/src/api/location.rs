use crate::{
    error::{self, Error},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use liborgmap::{
    core::loadable::Loadable,
    location::{BoundingBox, Location},
    organisation::Organisation,
};
use serde::{Deserialize, Serialize};

/// The organisation that legacy default locations are attached to
const DEFAULT_ORGANISATION_ID: i64 = 1;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create/locations", post(create_location))
        .route("/create/location", get(create_default_location))
        .route("/{id}/locations", get(list_organisation_locations))
}

/// Location creation has no agreed payload contract yet. The request body is
/// not extracted at all, so the endpoint reports itself unimplemented no
/// matter what it is sent.
async fn create_location() -> Result<(), error::Error> {
    Err(Error::NotImplemented("location creation".to_string()))
}

/// The view of a location that is exposed when listing the locations of an
/// organisation
#[derive(Serialize)]
struct LocationView {
    location_name: String,
    location_longitude: f64,
    location_latitude: f64,
}

impl From<Location> for LocationView {
    fn from(location: Location) -> Self {
        Self {
            location_name: location.name,
            location_longitude: location.longitude,
            location_latitude: location.latitude,
        }
    }
}

#[derive(Deserialize)]
struct ListParams {
    bounding_box: Option<String>,
}

async fn list_organisation_locations(
    Path(id): Path<i64>,
    Query(params): Query<ListParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<LocationView>>, error::Error> {
    Organisation::load(id, &state.db).await.map_err(|e| match e {
        liborgmap::Error::DatabaseRowNotFound(_) => {
            Error::NotFound("Organisation not found".to_string())
        }
        e => e.into(),
    })?;

    let bounding_box = params
        .bounding_box
        .as_deref()
        .map(str::parse::<BoundingBox>)
        .transpose()?;
    let locations = Location::load_all_organisation(id, bounding_box, &state.db).await?;
    Ok(Json(locations.into_iter().map(LocationView::from).collect()))
}

#[derive(Serialize)]
struct CreatedResponse {
    message: String,
    location: Location,
}

/// Legacy creation endpoint retained for an existing caller. Inserts a fixed
/// placeholder location attached to organisation 1, with no input and no
/// check that organisation 1 exists.
async fn create_default_location(
    State(state): State<AppState>,
) -> Result<Json<CreatedResponse>, error::Error> {
    let mut location = Location::new(
        "Default Name".to_string(),
        0.0,
        0.0,
        DEFAULT_ORGANISATION_ID,
    );
    location.insert(&state.db).await?;
    let location = Location::load(location.id, &state.db).await?;
    Ok(Json(CreatedResponse {
        message: "Location created".to_string(),
        location,
    }))
}

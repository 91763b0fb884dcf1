use crate::state::AppState;
use axum::{Router, response::Html, routing::get};

mod location;
mod organisation;

#[cfg(test)]
mod tests;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root)).nest(
        "/organisations",
        organisation::router().merge(location::router()),
    )
}

async fn root() -> Html<String> {
    Html("orgmap API root here".to_string())
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Orgmap(#[from] liborgmap::Error),
    #[error("Resource Not Found: {0}")]
    NotFound(String),
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::Orgmap(liborgmap::Error::InvalidBoundingBox(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            Error::Orgmap(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Library error".to_string(),
            ),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Error::NotImplemented(_) => (StatusCode::NOT_IMPLEMENTED, self.to_string()),
        }
    }
}

// Tell axum how to convert `Error` into a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warn!("Got error for response: {self:?}");
        self.to_client_status().into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use explorer_core::ExplorerError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    #[error(transparent)]
    Core(#[from] ExplorerError),

    #[error("Unknown carousel view: {0}")]
    UnknownView(Uuid),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event id {0:?} cannot be used as a page path")]
    UnsafeEventId(String),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            WebError::UnknownView(_) | WebError::Core(ExplorerError::ControllerClosed) => {
                StatusCode::NOT_FOUND
            }
            WebError::Core(ExplorerError::SlideOutOfRange { .. }) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate event id in dataset: {0}")]
    DuplicateEventId(String),

    #[error("Carousel needs at least one slide")]
    EmptyCarousel,

    #[error("Slide {index} out of range (carousel has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    #[error("Carousel controller is no longer running")]
    ControllerClosed,
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("mount node not found: `{mount}`")]
    MissingSurface { mount: String },

    #[error("2d drawing context unavailable for surface `{mount}`")]
    MissingContext { mount: String },

    #[error("unknown scene identifier: {0}")]
    UnknownScene(String),

    #[error("session storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

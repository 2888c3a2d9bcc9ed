use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicError {
    #[error("Unknown species '{given}'; expected one of: {allowed}")]
    InvalidSpecies { given: String, allowed: String },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Empty selection: {0}")]
    EmptySelection(String),

    #[error("Conflicting parameters: {0}")]
    ConflictingParameters(String),

    #[error("Variable '{name}' not present in '{archive}'")]
    MissingVariable { name: String, archive: String },

    #[error("Snapshot read error: {0}")]
    Snapshot(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type PicResult<T> = Result<T, PicError>;

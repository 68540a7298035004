use thiserror::Error;

#[derive(Error, Debug)]
pub enum AcademyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Document {collection}/{id} does not match its record shape: {source}")]
    Decode {
        collection: String,
        id: String,
        source: serde_json::Error,
    },

    #[error("Render error: {0}")]
    Render(#[from] stencil::Error),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Unknown form: {0}")]
    UnknownForm(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Submission failed: {0}")]
    Submission(String),
}

pub type Result<T> = std::result::Result<T, AcademyError>;

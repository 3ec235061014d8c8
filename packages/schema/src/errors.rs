use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema root must be an object with `properties`")]
    MissingProperties,
}

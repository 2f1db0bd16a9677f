use std::path::PathBuf;

/// Authoring defects in the style specification. None of these are
/// recoverable at generation time.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid style specification: {0}")]
    InvalidDocument(String),
    #[error("style specification is missing `{0}`")]
    MissingSection(String),
    #[error("malformed definition for property `{property}`: {message}")]
    MalformedProperty { property: String, message: String },
    #[error("`{0}` is not a valid property name")]
    InvalidPropertyName(String),
    #[error("unknown type `{ty}` for property `{property}`")]
    UnknownType { property: String, ty: String },
    #[error("array property `{0}` does not declare an element type")]
    MissingElementType(String),
    #[error("invalid color `{value}` for property `{property}`")]
    InvalidColor { property: String, value: String },
    #[error("invalid default for property `{property}`: {reason}")]
    InvalidDefault { property: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("failed to read `{}`: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("failed to parse JSON in `{}`: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
    #[error("jq preprocessing failed: {0}")]
    Jq(#[source] anyhow::Error),
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

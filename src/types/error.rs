use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

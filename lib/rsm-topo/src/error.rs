use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("{0}")]
    NotFound(String),

    #[error("object {0} already exists")]
    AlreadyExists(String),

    #[error("topology service unavailable: {0}")]
    Unavailable(String),
}

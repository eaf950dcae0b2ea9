pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Degree {0} is not tracked")]
    DegreeNotFound(u32),

    #[error("Self-loop on vertex {0}")]
    SelfLoop(String),

    #[error("Timestamp error: {0}")]
    Timestamp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        GraphError::InvalidParameter(msg.into())
    }

    pub fn timestamp<S: Into<String>>(msg: S) -> Self {
        GraphError::Timestamp(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        GraphError::Config(msg.into())
    }
}

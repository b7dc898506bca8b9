use thiserror::Error;

#[derive(Error, Debug)]
pub enum RcmEngineError {
    #[error("Only CSV files are accepted (got '{0}')")]
    UnsupportedUpload(String),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "chatbot")]
    #[error("Chat service error: {0}")]
    ChatService(String),

    #[cfg(feature = "chatbot")]
    #[error("Chat transport error: {0}")]
    ChatTransport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, RcmEngineError>;

use async_trait::async_trait;
use thiserror::Error;

use crate::detection::Person;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("unreadable image: {0}")]
    UnreadableImage(String),
    #[error("image exceeds service limits: {0}")]
    LimitExceeded(String),
    #[error("invalid service response: {0}")]
    InvalidResponse(String),
    #[error("service error: {0}")]
    ServiceError(String),
}

/// Image-analysis service that finds persons and the protective equipment they wear.
#[async_trait]
pub trait PpeAnalyzer: Send + Sync {
    async fn analyze(&self, image: &[u8]) -> Result<Vec<Person>, AnalyzeError>;
}

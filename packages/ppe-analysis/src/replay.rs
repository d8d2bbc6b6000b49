use std::path::PathBuf;

use async_trait::async_trait;

use crate::analyzer::{AnalyzeError, PpeAnalyzer};
use crate::detection::{DetectionResponse, Person};

/// Largest raw image the analysis service accepts inline.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn check_image(image: &[u8]) -> Result<(), AnalyzeError> {
    if image.is_empty() {
        return Err(AnalyzeError::UnreadableImage("empty image".into()));
    }
    if image.len() > MAX_IMAGE_BYTES {
        return Err(AnalyzeError::LimitExceeded(format!(
            "{} bytes (max {})",
            image.len(),
            MAX_IMAGE_BYTES
        )));
    }
    Ok(())
}

/// Replays a recorded detection response from a JSON file.
pub struct ReplayAnalyzer {
    response_path: PathBuf,
}

impl ReplayAnalyzer {
    pub fn new(response_path: impl Into<PathBuf>) -> Self {
        Self {
            response_path: response_path.into(),
        }
    }
}

#[async_trait]
impl PpeAnalyzer for ReplayAnalyzer {
    async fn analyze(&self, image: &[u8]) -> Result<Vec<Person>, AnalyzeError> {
        check_image(image)?;
        let raw = tokio::fs::read_to_string(&self.response_path)
            .await
            .map_err(|e| {
                AnalyzeError::ServiceError(format!("{}: {}", self.response_path.display(), e))
            })?;
        let response: DetectionResponse = serde_json::from_str(&raw)
            .map_err(|e| AnalyzeError::InvalidResponse(e.to_string()))?;
        Ok(response.persons)
    }
}

/// Answers every request with the same persons.
#[derive(Debug, Clone, Default)]
pub struct FixedAnalyzer {
    persons: Vec<Person>,
}

impl FixedAnalyzer {
    pub fn new(persons: Vec<Person>) -> Self {
        Self { persons }
    }
}

#[async_trait]
impl PpeAnalyzer for FixedAnalyzer {
    async fn analyze(&self, image: &[u8]) -> Result<Vec<Person>, AnalyzeError> {
        check_image(image)?;
        Ok(self.persons.clone())
    }
}

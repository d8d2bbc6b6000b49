use ppe_analysis::AnalyzeError;
use thiserror::Error;

use crate::storage::StoreError;

/// Everything that can abort an invocation. None of these are retried.
#[derive(Debug, Error)]
pub enum DetectError {
  #[error("configuration error: {0}")]
  Config(String),
  #[error("invalid trigger event: {0}")]
  Event(String),
  #[error("failed to fetch {bucket}/{key}: {source}")]
  Fetch {
    bucket: String,
    key: String,
    source: StoreError,
  },
  #[error("analysis failed: {0}")]
  Analyze(#[from] AnalyzeError),
  #[error("image error: {0}")]
  Image(#[from] image::ImageError),
  #[error("failed to store {bucket}/{key}: {source}")]
  Store {
    bucket: String,
    key: String,
    source: StoreError,
  },
}

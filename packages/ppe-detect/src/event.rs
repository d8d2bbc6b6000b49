//! Object-created notifications that trigger an invocation.
use serde::Deserialize;
use std::fmt;

use crate::error::DetectError;

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCreatedEvent {
  #[serde(rename = "Records", default)]
  pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
  #[serde(default)]
  pub event_name: Option<String>,
  pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
  pub bucket: BucketEntity,
  pub object: ObjectEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketEntity {
  pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntity {
  pub key: String,
  #[serde(default)]
  pub size: Option<u64>,
}

/// A bucket/key pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
  pub bucket: String,
  pub key: String,
}

impl ObjectRef {
  pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
    Self {
      bucket: bucket.into(),
      key: key.into(),
    }
  }
}

impl fmt::Display for ObjectRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.bucket, self.key)
  }
}

impl ObjectCreatedEvent {
  pub fn parse(raw: &str) -> Result<Self, DetectError> {
    serde_json::from_str(raw).map_err(|e| DetectError::Event(e.to_string()))
  }

  /// Objects named by the event, in record order. An event without records is an error.
  pub fn objects(&self) -> Result<Vec<ObjectRef>, DetectError> {
    if self.records.is_empty() {
      return Err(DetectError::Event("event has no records".into()));
    }
    Ok(
      self
        .records
        .iter()
        .map(|record| ObjectRef::new(&record.s3.bucket.name, &record.s3.object.key))
        .collect(),
    )
  }
}

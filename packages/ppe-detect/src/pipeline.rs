//! One invocation: fetch, analyze, annotate, store.
use log::{info, warn};
use ppe_analysis::PpeAnalyzer;

use crate::annotate::annotate_image;
use crate::config::DetectConfig;
use crate::error::DetectError;
use crate::event::{ObjectCreatedEvent, ObjectRef};
use crate::storage::ObjectStore;

/// Annotates one source object and uploads the result to the destination bucket.
///
/// Returns where the annotated image was written. Any failure aborts the invocation
/// and nothing is uploaded.
pub async fn detect_ppe(
  object: &ObjectRef,
  store: &dyn ObjectStore,
  analyzer: &dyn PpeAnalyzer,
  config: &DetectConfig,
) -> Result<ObjectRef, DetectError> {
  let destination = config.destination()?;

  info!("fetching {}", object);
  let bytes = store
    .fetch(&object.bucket, &object.key)
    .await
    .map_err(|source| DetectError::Fetch {
      bucket: object.bucket.clone(),
      key: object.key.clone(),
      source,
    })?;

  let persons = analyzer.analyze(&bytes).await?;
  info!("analysis of {} found {} person(s)", object, persons.len());

  let annotated = annotate_image(&bytes, &persons, config.confidence_threshold, &config.style)?;
  info!("{}: {}", object, annotated.summary);

  let output = ObjectRef::new(destination, config.output_key(&object.key));
  info!("uploading image to {}", output);
  store
    .store(&output.bucket, &output.key, annotated.bytes)
    .await
    .map_err(|source| DetectError::Store {
      bucket: output.bucket.clone(),
      key: output.key.clone(),
      source,
    })?;

  Ok(output)
}

/// Runs [`detect_ppe`] for every record of the event, stopping at the first failure.
///
/// Objects this tool produced itself are skipped so that writing into a watched
/// bucket does not trigger another round.
pub async fn handle_event(
  event: &ObjectCreatedEvent,
  store: &dyn ObjectStore,
  analyzer: &dyn PpeAnalyzer,
  config: &DetectConfig,
) -> Result<Vec<ObjectRef>, DetectError> {
  let mut written = Vec::new();
  for object in event.objects()? {
    if config.is_output_key(&object.key) {
      warn!("skipping {}: already annotated", object);
      continue;
    }
    written.push(detect_ppe(&object, store, analyzer, config).await?);
  }
  Ok(written)
}

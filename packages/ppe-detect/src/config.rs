//! Invocation settings: confidence threshold, destination bucket and overlay style.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::DetectError;
use crate::style::AnnotationStyle;

pub const DEFAULT_CONFIDENCE: f32 = 80.0;
pub const DEFAULT_OUTPUT_PREFIX: &str = "ppe-detected-";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DetectConfigFile {
  confidence: Option<f32>,
  destination_bucket: Option<String>,
  output_prefix: Option<String>,
  style: Option<AnnotationStyle>,
}

/// Values supplied on the command line or through the environment. They win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub config_path: Option<PathBuf>,
  pub confidence: Option<f32>,
  pub destination_bucket: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DetectConfig {
  /// Coverage confidence (0..=100) under which a mask gets a warning box.
  pub confidence_threshold: f32,
  /// Never defaulted; see [`DetectConfig::destination`].
  pub destination_bucket: String,
  pub output_prefix: String,
  pub style: AnnotationStyle,
}

impl Default for DetectConfig {
  fn default() -> Self {
    Self {
      confidence_threshold: DEFAULT_CONFIDENCE,
      destination_bucket: String::new(),
      output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
      style: AnnotationStyle::default(),
    }
  }
}

impl DetectConfig {
  pub fn new(destination_bucket: impl Into<String>) -> Self {
    Self {
      destination_bucket: destination_bucket.into(),
      ..Self::default()
    }
  }

  /// Reads the optional TOML file, applies overrides and validates the result.
  pub fn load(overrides: &ConfigOverrides) -> Result<Self, DetectError> {
    let raw = match &overrides.config_path {
      Some(path) => read_config_file(path)?,
      None => String::new(),
    };
    Self::from_toml_str(&raw, overrides)
  }

  pub fn from_toml_str(raw: &str, overrides: &ConfigOverrides) -> Result<Self, DetectError> {
    let file: DetectConfigFile =
      toml::from_str(raw).map_err(|e| DetectError::Config(format!("invalid config: {}", e)))?;
    let defaults = Self::default();

    let config = Self {
      confidence_threshold: overrides
        .confidence
        .or(file.confidence)
        .unwrap_or(defaults.confidence_threshold),
      destination_bucket: overrides
        .destination_bucket
        .clone()
        .or(file.destination_bucket)
        .unwrap_or(defaults.destination_bucket),
      output_prefix: file.output_prefix.unwrap_or(defaults.output_prefix),
      style: file.style.unwrap_or(defaults.style),
    };
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), DetectError> {
    if !(0.0..=100.0).contains(&self.confidence_threshold) {
      return Err(DetectError::Config(format!(
        "confidence threshold must be within 0..=100, got {}",
        self.confidence_threshold
      )));
    }
    if self.output_prefix.is_empty() {
      return Err(DetectError::Config("output prefix must not be empty".into()));
    }
    if self.style.line_width == 0 {
      return Err(DetectError::Config("line width must be at least 1".into()));
    }
    Ok(())
  }

  /// The destination bucket, or an error when none was configured.
  pub fn destination(&self) -> Result<&str, DetectError> {
    let bucket = self.destination_bucket.trim();
    if bucket.is_empty() {
      return Err(DetectError::Config(
        "destination bucket is not set (use --dest-bucket or PPE_DEST_BUCKET)".into(),
      ));
    }
    Ok(bucket)
  }

  pub fn output_key(&self, key: &str) -> String {
    format!("{}{}", self.output_prefix, key)
  }

  /// True for objects this tool wrote itself.
  pub fn is_output_key(&self, key: &str) -> bool {
    key.starts_with(&self.output_prefix)
  }
}

fn read_config_file(path: &Path) -> Result<String, DetectError> {
  std::fs::read_to_string(path)
    .map_err(|e| DetectError::Config(format!("failed to read {}: {}", path.display(), e)))
}

//! Command line arguments backing the `ppe-detect` binary.
use clap::{Parser, Subcommand};
use ppe_detect::ConfigOverrides;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "ppe-detect",
  about = "Annotates images with face covering detections",
  version
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Process an object-created event against a directory-backed object store
  Handle {
    /// Event notification JSON file
    #[arg(long, short = 'e')]
    event: PathBuf,

    /// Directory holding one subdirectory per bucket
    #[arg(long, short = 's')]
    store_root: PathBuf,

    /// Recorded detection response JSON file
    #[arg(long, short = 'd')]
    detections: PathBuf,

    #[command(flatten)]
    settings: Settings,
  },
  /// Annotate a local image file
  Annotate {
    /// Image to annotate
    #[arg(long, short = 'i')]
    image: PathBuf,

    /// Recorded detection response JSON file
    #[arg(long, short = 'd')]
    detections: PathBuf,

    /// Where to write the annotated image
    #[arg(long, short = 'o')]
    output: PathBuf,

    #[command(flatten)]
    settings: Settings,
  },
}

#[derive(clap::Args, Debug)]
pub struct Settings {
  /// TOML configuration file
  #[arg(long, short = 'c', env = "PPE_CONFIG")]
  config: Option<PathBuf>,

  /// Coverage confidence (0-100) below which a mask is flagged
  #[arg(long, env = "PPE_CONFIDENCE")]
  confidence: Option<f32>,

  /// Bucket receiving annotated images
  #[arg(long, env = "PPE_DEST_BUCKET")]
  dest_bucket: Option<String>,
}

impl Settings {
  pub fn overrides(&self) -> ConfigOverrides {
    ConfigOverrides {
      config_path: self.config.clone(),
      confidence: self.confidence,
      destination_bucket: self.dest_bucket.clone(),
    }
  }
}

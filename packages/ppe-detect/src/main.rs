mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, Commands};
use log::info;
use ppe_detect::{annotate_image, handle_event, DetectConfig, FsObjectStore, ObjectCreatedEvent, PpeAnalyzer, ReplayAnalyzer};

#[tokio::main(flavor = "current_thread")]
async fn main() {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args = Args::parse();

  if let Err(e) = run(args).await {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

async fn run(args: Args) -> Result<()> {
  match args.command {
    Commands::Version => {
      println!("ppe-detect {}", env!("CARGO_PKG_VERSION"));
    }
    Commands::Handle {
      event,
      store_root,
      detections,
      settings,
    } => {
      let config = DetectConfig::load(&settings.overrides()).context("Failed to load configuration")?;
      let raw = tokio::fs::read_to_string(&event)
        .await
        .with_context(|| format!("Failed to read event {}", event.display()))?;
      let event = ObjectCreatedEvent::parse(&raw)?;

      let store = FsObjectStore::new(store_root);
      let analyzer = ReplayAnalyzer::new(detections);

      for object in handle_event(&event, &store, &analyzer, &config).await? {
        println!("{}", object);
      }
    }
    Commands::Annotate {
      image,
      detections,
      output,
      settings,
    } => {
      let config = DetectConfig::load(&settings.overrides()).context("Failed to load configuration")?;
      let bytes = tokio::fs::read(&image)
        .await
        .with_context(|| format!("Failed to read image {}", image.display()))?;

      let persons = ReplayAnalyzer::new(detections).analyze(&bytes).await?;
      let annotated = annotate_image(&bytes, &persons, config.confidence_threshold, &config.style)
        .context("Failed to annotate image")?;

      tokio::fs::write(&output, &annotated.bytes)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
      info!("wrote {}", output.display());
      println!("{}", annotated.summary);
    }
  }
  Ok(())
}

//! # ppe-detect
//!
//! Checks whether the persons in an image wear face coverings, burns the verdict into
//! the image and stores the annotated copy next to the original.
//!
//! ## Features
//!
//! - **Annotation**: green box for a properly worn mask, red box for a mask that does not
//!   cover the face, yellow inset box when the service is unsure, red full-body box when
//!   no mask was found
//! - **Pluggable services**: the analysis service ([`PpeAnalyzer`]) and the object store
//!   ([`ObjectStore`]) are traits, with filesystem, in-memory and replay adapters
//! - **Configurable style**: colors, line width and labels come from [`AnnotationStyle`]
//!
//! ## Quick Start
//!
//! ```ignore
//! use ppe_detect::prelude::*;
//!
//! let store = FsObjectStore::new("/srv/buckets");
//! let analyzer = ReplayAnalyzer::new("response.json");
//! let config = DetectConfig::new("annotated");
//!
//! let output = detect_ppe(&ObjectRef::new("uploads", "lobby.jpg"), &store, &analyzer, &config).await?;
//! assert_eq!(output.key, "ppe-detected-lobby.jpg");
//! ```

pub mod annotate;
pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod storage;
pub mod style;

// Re-export commonly used types at the root level
pub use annotate::{
  annotate_image, plan_person, render_overlays, AnnotatedImage, AnnotationSummary, MaskStatus, Overlay,
  OverlayKind, PersonPlan, PixelRect,
};
pub use config::{ConfigOverrides, DetectConfig, DEFAULT_CONFIDENCE, DEFAULT_OUTPUT_PREFIX};
pub use error::DetectError;
pub use event::{ObjectCreatedEvent, ObjectRef};
pub use pipeline::{detect_ppe, handle_event};
pub use ppe_analysis::{
  AnalyzeError, BodyPart, BodyPartName, BoundingBox, Coverage, DetectionResponse, EquipmentDetection,
  EquipmentType, FixedAnalyzer, Person, PpeAnalyzer, ReplayAnalyzer,
};
pub use storage::{FsObjectStore, MemoryObjectStore, ObjectStore, StoreError};
pub use style::AnnotationStyle;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```ignore
/// use ppe_detect::prelude::*;
/// ```
pub mod prelude {
  pub use crate::{
    annotate_image, detect_ppe, handle_event, plan_person, AnnotationStyle, AnnotationSummary, BoundingBox,
    DetectConfig, DetectError, EquipmentDetection, FixedAnalyzer, FsObjectStore, MaskStatus, MemoryObjectStore,
    ObjectCreatedEvent, ObjectRef, ObjectStore, OverlayKind, Person, PpeAnalyzer, ReplayAnalyzer,
  };
}

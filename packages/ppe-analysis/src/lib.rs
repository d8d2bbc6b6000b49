pub mod analyzer;
pub mod detection;
pub mod replay;

pub use analyzer::{AnalyzeError, PpeAnalyzer};
pub use detection::{
    BodyPart, BodyPartName, BoundingBox, Coverage, DetectionResponse, EquipmentDetection,
    EquipmentType, Person,
};
pub use replay::{FixedAnalyzer, ReplayAnalyzer};

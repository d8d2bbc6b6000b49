//! Per-person protective equipment detections as reported by the analysis service.
//!
//! Field names follow the service's JSON response (`Persons`, `BodyParts`,
//! `EquipmentDetections`, ...), so a recorded response deserializes directly.
use serde::{Deserialize, Deserializer, Serialize};

/// Fractional rectangle relative to the analysed image. Every coordinate is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Maps the box onto an image of `image_width` x `image_height` pixels.
    ///
    /// Returns `(left, top, right, bottom)` in pixels. No rounding is applied.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> (f32, f32, f32, f32) {
        let w = image_width as f32;
        let h = image_height as f32;
        let left = w * self.left;
        let top = h * self.top;
        (left, top, left + w * self.width, top + h * self.height)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PartialBox {
    left: Option<f32>,
    top: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
}

/// Reads a box that may be absent or incomplete. Anything short of all four
/// coordinates becomes `None`, so no overlay is drawn for it.
fn complete_box<'de, D>(deserializer: D) -> Result<Option<BoundingBox>, D::Error>
where
    D: Deserializer<'de>,
{
    let partial = Option::<PartialBox>::deserialize(deserializer)?;
    Ok(partial.and_then(|b| {
        Some(BoundingBox::new(b.left?, b.top?, b.width?, b.height?))
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentType {
    FaceCover,
    HandCover,
    HeadCover,
    #[serde(other)]
    Unknown,
}

/// Whether a piece of equipment covers the body part it was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Coverage {
    pub value: bool,
    /// 0..=100
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EquipmentDetection {
    #[serde(rename = "Type")]
    pub kind: EquipmentType,
    #[serde(default, deserialize_with = "complete_box")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub covers_body_part: Coverage,
}

impl EquipmentDetection {
    pub fn face_cover(bounding_box: BoundingBox, covers: bool, confidence: f32) -> Self {
        Self {
            kind: EquipmentType::FaceCover,
            bounding_box: Some(bounding_box),
            confidence: 100.0,
            covers_body_part: Coverage {
                value: covers,
                confidence,
            },
        }
    }

    pub fn is_face_cover(&self) -> bool {
        self.kind == EquipmentType::FaceCover
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyPartName {
    Face,
    Head,
    LeftHand,
    RightHand,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BodyPart {
    pub name: BodyPartName,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub equipment_detections: Vec<EquipmentDetection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default, deserialize_with = "complete_box")]
    pub bounding_box: Option<BoundingBox>,
    #[serde(default)]
    pub confidence: f32,
    #[serde(default)]
    pub body_parts: Vec<BodyPart>,
}

impl Person {
    /// Face coverings across all body parts, in detection order.
    pub fn face_covers(&self) -> impl Iterator<Item = &EquipmentDetection> {
        self.body_parts
            .iter()
            .flat_map(|part| part.equipment_detections.iter())
            .filter(|item| item.is_face_cover())
    }
}

/// Top level of a protective equipment detection response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectionResponse {
    #[serde(default)]
    pub persons: Vec<Person>,
}

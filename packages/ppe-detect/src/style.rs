//! Colors, line width and label text used when burning overlays into an image.
use image::Rgba;
use serde::Deserialize;

pub const MASK_ON_LABEL: &str = "Mask is on properly";
pub const FIX_MASK_LABEL: &str = "Please Fix Mask";
pub const NO_MASK_LABEL: &str = "No Mask";

/// Overlay palette and labels. Passed into the annotator rather than read from globals
/// so callers (and tests) can swap them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
  pub mask_on_color: [u8; 3],
  pub mask_off_color: [u8; 3],
  pub warning_color: [u8; 3],
  pub line_width: u32,
  /// Integer scale applied to the 8x8 label glyphs.
  pub text_scale: u32,
  pub mask_on_label: String,
  pub fix_mask_label: String,
  pub no_mask_label: String,
}

impl Default for AnnotationStyle {
  fn default() -> Self {
    Self {
      mask_on_color: [0x00, 0xd4, 0x00],
      mask_off_color: [0xff, 0x00, 0x00],
      warning_color: [0xff, 0xff, 0x00],
      line_width: 3,
      text_scale: 1,
      mask_on_label: MASK_ON_LABEL.to_string(),
      fix_mask_label: FIX_MASK_LABEL.to_string(),
      no_mask_label: NO_MASK_LABEL.to_string(),
    }
  }
}

fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
  Rgba([r, g, b, 0xff])
}

impl AnnotationStyle {
  pub fn green(&self) -> Rgba<u8> {
    opaque(self.mask_on_color)
  }

  pub fn red(&self) -> Rgba<u8> {
    opaque(self.mask_off_color)
  }

  pub fn yellow(&self) -> Rgba<u8> {
    opaque(self.warning_color)
  }

  /// Distance between the outer mask box and the low-confidence warning box.
  pub fn inset(&self) -> f32 {
    (self.line_width * 2) as f32
  }

  /// Height in pixels of one line of label text.
  pub fn line_height(&self) -> f32 {
    (8 * self.text_scale.max(1)) as f32
  }
}

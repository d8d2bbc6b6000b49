//! Turns per-person equipment detections into overlays and burns them into the image.
//!
//! Annotation happens in two steps. [`plan_person`] decides what a single person gets
//! (mask status plus the rectangles and labels to draw), and [`render_overlays`] draws
//! them. [`annotate_image`] glues both to image decoding and encoding.
use std::fmt;
use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{DynamicImage, GenericImage, GenericImageView, ImageFormat, ImageResult, Rgba};
use imageproc::drawing::draw_line_segment_mut;
use ppe_analysis::{BoundingBox, Person};

use crate::style::AnnotationStyle;

/// Rectangle in pixel coordinates of the analysed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PixelRect {
    pub fn from_box(bbox: &BoundingBox, image_width: u32, image_height: u32) -> Self {
        let (left, top, right, bottom) = bbox.to_pixels(image_width, image_height);
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Shrinks the rectangle by `by` pixels on every side, or `None` if nothing is left.
    pub fn inset(&self, by: f32) -> Option<Self> {
        let inner = Self {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
        };
        (inner.right > inner.left && inner.bottom > inner.top).then_some(inner)
    }

    pub fn bottom_left(&self) -> (f32, f32) {
        (self.left, self.bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Face covering reported as covering the face.
    MaskCovering,
    /// Face covering found, but not covering the face.
    MaskNotCovering,
    /// Coverage confidence under the threshold; drawn inside the mask box.
    LowConfidence,
    /// Whole-body box for a person without any face covering.
    NoMask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    pub rect: PixelRect,
    pub color: Rgba<u8>,
    pub label: String,
    /// Top-left corner of the label text.
    pub label_at: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskStatus {
    Worn,
    NotCovering,
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonPlan {
    pub status: MaskStatus,
    /// Any face covering had a coverage confidence below the threshold.
    pub low_confidence: bool,
    pub overlays: Vec<Overlay>,
}

/// Decides the overlays for one person.
///
/// Every face covering gets an outline (green when it covers the face, red otherwise),
/// plus a yellow inset box when the coverage confidence is below `threshold`. A person
/// without any face covering gets a single red outline around the whole body instead.
pub fn plan_person(
    person: &Person,
    image_width: u32,
    image_height: u32,
    threshold: f32,
    style: &AnnotationStyle,
) -> PersonPlan {
    let mut found_mask = false;
    let mut covering = false;
    let mut low_confidence = false;
    let mut overlays = Vec::new();

    for item in person.face_covers() {
        found_mask = true;
        let coverage = item.covers_body_part;
        covering |= coverage.value;
        let below_threshold = coverage.confidence < threshold;
        low_confidence |= below_threshold;

        let Some(bbox) = item.bounding_box else {
            continue;
        };
        let rect = PixelRect::from_box(&bbox, image_width, image_height);
        let (kind, color) = if coverage.value {
            (OverlayKind::MaskCovering, style.green())
        } else {
            (OverlayKind::MaskNotCovering, style.red())
        };
        overlays.push(Overlay {
            kind,
            rect,
            color,
            label: style.mask_on_label.clone(),
            label_at: rect.bottom_left(),
        });

        if below_threshold {
            if let Some(inner) = rect.inset(style.inset()) {
                overlays.push(Overlay {
                    kind: OverlayKind::LowConfidence,
                    rect: inner,
                    color: style.yellow(),
                    label: style.fix_mask_label.clone(),
                    label_at: (rect.left, rect.bottom + style.line_height()),
                });
            }
        }
    }

    if !found_mask {
        if let Some(bbox) = person.bounding_box {
            let rect = PixelRect::from_box(&bbox, image_width, image_height);
            overlays.push(Overlay {
                kind: OverlayKind::NoMask,
                rect,
                color: style.red(),
                label: style.no_mask_label.clone(),
                label_at: rect.bottom_left(),
            });
        }
    }

    let status = match (found_mask, covering) {
        (false, _) => MaskStatus::Missing,
        (true, true) => MaskStatus::Worn,
        (true, false) => MaskStatus::NotCovering,
    };

    PersonPlan {
        status,
        low_confidence,
        overlays,
    }
}

/// Per-image tally of mask statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub persons: usize,
    pub masks_worn: usize,
    pub masks_not_covering: usize,
    pub no_mask: usize,
    pub low_confidence: usize,
}

impl AnnotationSummary {
    fn record(&mut self, plan: &PersonPlan) {
        self.persons += 1;
        match plan.status {
            MaskStatus::Worn => self.masks_worn += 1,
            MaskStatus::NotCovering => self.masks_not_covering += 1,
            MaskStatus::Missing => self.no_mask += 1,
        }
        if plan.low_confidence {
            self.low_confidence += 1;
        }
    }
}

impl fmt::Display for AnnotationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} person(s): {} mask on, {} mask not covering, {} no mask, {} low confidence",
            self.persons, self.masks_worn, self.masks_not_covering, self.no_mask, self.low_confidence
        )
    }
}

fn draw_outline(image: &mut DynamicImage, rect: &PixelRect, color: Rgba<u8>, line_width: u32) {
    let strokes = line_width.max(1);
    let half = (strokes - 1) as f32 / 2.0;
    // imageproc visits every point of a segment, even off-canvas ones, so edges far
    // outside the image are pulled in to just beyond the border first.
    let margin = strokes as f32;
    let (width, height) = image.dimensions();
    let clamp_x = |x: f32| x.clamp(-margin, width as f32 + margin);
    let clamp_y = |y: f32| y.clamp(-margin, height as f32 + margin);
    for step in 0..strokes {
        // Offset of this stroke from the rectangle edge; strokes are centred on the edge.
        let d = step as f32 - half;
        let (l, t, r, b) = (
            clamp_x(rect.left - d),
            clamp_y(rect.top - d),
            clamp_x(rect.right + d),
            clamp_y(rect.bottom + d),
        );
        draw_line_segment_mut(image, (l, t), (r, t), color);
        draw_line_segment_mut(image, (r, t), (r, b), color);
        draw_line_segment_mut(image, (r, b), (l, b), color);
        draw_line_segment_mut(image, (l, b), (l, t), color);
    }
}

fn draw_label(
    image: &mut DynamicImage,
    (x, y): (f32, f32),
    text: &str,
    color: Rgba<u8>,
    text_scale: u32,
) {
    let scale = i64::from(text_scale.max(1));
    let (width, height) = image.dimensions();
    let (width, height) = (i64::from(width), i64::from(height));
    let glyph_size = 8 * scale;
    let text_width = glyph_size * text.chars().count() as i64;

    // Keep the label on the canvas when the box touches the image border.
    let mut pen_x = (x.round() as i64).min(width - text_width).max(0);
    let pen_y = (y.round() as i64).min(height - glyph_size).max(0);

    for ch in text.chars() {
        if let Some(glyph) = BASIC_FONTS.get(ch) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..8 {
                    if bits >> col & 1 == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let px = pen_x + col as i64 * scale + sx;
                            let py = pen_y + row as i64 * scale + sy;
                            if (0..width).contains(&px) && (0..height).contains(&py) {
                                image.put_pixel(px as u32, py as u32, color);
                            }
                        }
                    }
                }
            }
        }
        pen_x += glyph_size;
    }
}

/// Draws outlines and labels in order, mutating `image` in place.
pub fn render_overlays(image: &mut DynamicImage, overlays: &[Overlay], style: &AnnotationStyle) {
    for overlay in overlays {
        draw_outline(image, &overlay.rect, overlay.color, style.line_width);
        draw_label(image, overlay.label_at, &overlay.label, overlay.color, style.text_scale);
    }
}

/// Grayscale images cannot show the overlay palette.
fn promote_to_color(image: DynamicImage) -> DynamicImage {
    let color = image.color();
    if color.has_color() {
        image
    } else if color.has_alpha() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    }
}

pub struct AnnotatedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub summary: AnnotationSummary,
}

/// Decodes `bytes`, draws every person's overlays and re-encodes in the source format.
///
/// The image is never resized, so the fractional boxes map onto the same pixel grid
/// the analysis service saw.
pub fn annotate_image(
    bytes: &[u8],
    persons: &[Person],
    threshold: f32,
    style: &AnnotationStyle,
) -> ImageResult<AnnotatedImage> {
    let format = image::guess_format(bytes)?;
    let mut image = promote_to_color(image::load_from_memory_with_format(bytes, format)?);
    let (width, height) = image.dimensions();

    let mut summary = AnnotationSummary::default();
    for person in persons {
        let plan = plan_person(person, width, height, threshold, style);
        summary.record(&plan);
        render_overlays(&mut image, &plan.overlays, style);
    }

    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format)?;

    Ok(AnnotatedImage {
        bytes: out.into_inner(),
        format,
        width,
        height,
        summary,
    })
}

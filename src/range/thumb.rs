//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::vello::kurbo::{Point, Rect};
use xilem::masonry::vello::peniko::Color;

use super::config::{SegmentStyle, ThumbOptions};
use super::layers::{CanvasSnapshot, TextRole};

/// Value label size relative to the thumb radius.
pub const LABEL_SIZE_FACTOR: f32 = 0.6;
/// Segment stroke width and label top margin, relative to canvas width.
pub const STROKE_WIDTH_FACTOR: f64 = 0.005393743257821;
/// Label bottom margin relative to canvas width.
pub const MARGIN_BOTTOM_FACTOR: f64 = 0.001078748651564;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThumbSide {
    #[default]
    Left,
    Right,
}

impl ThumbSide {
    pub const BOTH: [ThumbSide; 2] = [ThumbSide::Left, ThumbSide::Right];

    pub fn other(self) -> Self {
        match self {
            ThumbSide::Left => ThumbSide::Right,
            ThumbSide::Right => ThumbSide::Left,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            ThumbSide::Left => 0,
            ThumbSide::Right => 1,
        }
    }
}

/// Extent of a shaped piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    /// First line's ascent and descent around its baseline.
    pub ascent: f64,
    pub descent: f64,
}

/// Shapes text for the icon glyphs and value labels.
pub trait TextMeasure {
    fn measure(&mut self, text: &str, font_size: f32, role: TextRole) -> TextMetrics;
}

/// Colors and sizes used to draw one thumb.
///
/// Held by the composer for the lifetime of the slider and overwritten in
/// place on every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbPaints {
    pub fill: Color,
    pub text: Color,
    pub icon: Color,
    pub icon_size: f32,
    pub label_size: f32,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Default for ThumbPaints {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            text: Color::BLACK,
            icon: Color::WHITE,
            icon_size: 0.0,
            label_size: 0.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }
}

impl ThumbPaints {
    pub fn resolve_colors(&mut self, options: &ThumbOptions, default: Color) {
        self.fill = options.background_color.unwrap_or(default);
        self.text = options.text_color.unwrap_or(default);
        self.icon = options.icon_color.unwrap_or(default);
    }

    pub fn scale_to(&mut self, width: f64) {
        self.margin_top = width * STROKE_WIDTH_FACTOR;
        self.margin_bottom = width * MARGIN_BOTTOM_FACTOR;
    }

    pub fn size_text(&mut self, radius: f64, icon_scale: f32) {
        self.icon_size = radius as f32 * icon_scale;
        self.label_size = radius as f32 * LABEL_SIZE_FACTOR;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentPaints {
    pub selected: Color,
    pub remaining: Color,
    pub stroke_width: f64,
}

impl Default for SegmentPaints {
    fn default() -> Self {
        let style = SegmentStyle::default();
        Self { selected: style.selected, remaining: style.remaining, stroke_width: 0.0 }
    }
}

impl SegmentPaints {
    pub fn recolor(&mut self, style: &SegmentStyle) {
        self.selected = style.selected;
        self.remaining = style.remaining;
    }

    pub fn scale_to(&mut self, width: f64) {
        self.stroke_width = width * STROKE_WIDTH_FACTOR;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueLabel {
    pub text: String,
    pub metrics: TextMetrics,
    pub origin: Point,
}

/// Where a thumb ended up in the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbGeometry {
    pub center: Point,
    pub radius: f64,
    pub hit_box: Rect,
    pub paints: ThumbPaints,
    pub icon: Option<TextMetrics>,
    pub label: Option<ValueLabel>,
}

impl ThumbGeometry {
    /// Place a thumb at `percentage` of the canvas, kept fully inside it.
    pub fn place(percentage: f64, canvas: &CanvasSnapshot, paints: ThumbPaints) -> Self {
        let mid_y = canvas.mid_y();
        let radius = mid_y - mid_y * 0.5;
        let x = clamp_to_track(percentage * canvas.width(), radius, canvas.rect);
        let center = Point::new(x, mid_y);
        Self {
            center,
            radius,
            hit_box: Rect::new(center.x - radius, center.y - radius, center.x + radius, center.y + radius),
            paints,
            icon: None,
            label: None,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.hit_box.contains(point)
    }

    /// Top-left of an icon layout whose glyph band (ascent plus descent)
    /// is centered on the thumb. Line gap is left out.
    pub fn icon_origin(&self, metrics: &TextMetrics) -> Point {
        let band = metrics.ascent + metrics.descent;
        Point::new(self.center.x - metrics.width / 2.0, self.center.y - band / 2.0)
    }

    /// Top-left of the value label layout inside `rect`.
    pub fn label_origin(&self, metrics: &TextMetrics, rect: Rect) -> Point {
        let x = label_x(self.center.x, metrics.width, rect);
        let baseline = self.center.y
            + self.radius
            + f64::from(self.paints.label_size)
            + self.paints.margin_top;
        Point::new(x, baseline - metrics.ascent)
    }
}

/// Shift `x` so a circle of `radius` stays within `rect` horizontally.
pub fn clamp_to_track(x: f64, radius: f64, rect: Rect) -> f64 {
    if x - radius < rect.x0 {
        rect.x0 + radius
    } else if x + radius > rect.x1 {
        rect.x1 - radius
    } else {
        x
    }
}

/// Left edge of a label centered under `thumb_x`, pinned to the rect edges.
pub fn label_x(thumb_x: f64, text_width: f64, rect: Rect) -> f64 {
    let half = text_width / 2.0;
    if thumb_x - half < rect.x0 {
        rect.x0
    } else if thumb_x + half > rect.x1 {
        rect.x1 - text_width
    } else {
        thumb_x - half
    }
}

/// Per-frame thumb records, rebuilt on every Thumbs paint.
#[derive(Debug, Default)]
pub struct FrameGeometry {
    slots: [Option<ThumbGeometry>; 2],
}

impl FrameGeometry {
    pub fn clear(&mut self) {
        self.slots = [None, None];
    }

    pub fn get(&self, side: ThumbSide) -> Option<&ThumbGeometry> {
        self.slots[side.slot()].as_ref()
    }

    pub fn get_mut(&mut self, side: ThumbSide) -> Option<&mut ThumbGeometry> {
        self.slots[side.slot()].as_mut()
    }

    pub fn set(&mut self, side: ThumbSide, geometry: ThumbGeometry) {
        self.slots[side.slot()] = Some(geometry);
    }

    pub fn contains(&self, side: ThumbSide, point: Point) -> bool {
        self.get(side).is_some_and(|g| g.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xilem::masonry::vello::kurbo::Size;

    #[test]
    fn radius_follows_canvas_height() {
        let canvas = CanvasSnapshot::new(Size::new(300.0, 80.0));
        let thumb = ThumbGeometry::place(0.5, &canvas, ThumbPaints::default());
        assert_eq!(thumb.radius, 20.0);
        assert_eq!(thumb.center, Point::new(150.0, 40.0));
        assert_eq!(thumb.hit_box, Rect::new(130.0, 20.0, 170.0, 60.0));
    }

    #[test]
    fn thumbs_never_leave_the_track() {
        for width in [1.0, 7.0, 40.0, 220.0, 1333.0] {
            let rect = Rect::new(0.0, 0.0, width, 10.0);
            for radius in [0.0, width / 8.0, width * 0.375] {
                for step in 0..=20 {
                    let x = clamp_to_track(width * step as f64 / 20.0, radius, rect);
                    assert!(x - radius >= rect.x0, "width {width} radius {radius}");
                    assert!(x + radius <= rect.x1, "width {width} radius {radius}");
                }
            }
        }
    }

    #[test]
    fn clamping_moves_center_not_radius() {
        let canvas = CanvasSnapshot::new(Size::new(200.0, 40.0));
        let left = ThumbGeometry::place(0.0, &canvas, ThumbPaints::default());
        let right = ThumbGeometry::place(1.0, &canvas, ThumbPaints::default());
        assert_eq!(left.radius, 10.0);
        assert_eq!(left.center.x, 10.0);
        assert_eq!(right.center.x, 190.0);
    }

    #[test]
    fn labels_stick_to_the_edges() {
        let rect = Rect::new(0.0, 0.0, 100.0, 30.0);
        assert_eq!(label_x(5.0, 20.0, rect), 0.0);
        assert_eq!(label_x(95.0, 20.0, rect), 80.0);
        assert_eq!(label_x(50.0, 20.0, rect), 40.0);
    }

    #[test]
    fn label_sits_below_the_thumb() {
        let canvas = CanvasSnapshot::new(Size::new(1000.0, 80.0));
        let mut paints = ThumbPaints::default();
        paints.scale_to(canvas.width());
        paints.size_text(20.0, 0.75);
        let thumb = ThumbGeometry::place(0.5, &canvas, paints);
        let metrics = TextMetrics { width: 30.0, height: 14.0, ascent: 10.0, descent: 3.0 };
        let origin = thumb.label_origin(&metrics, canvas.rect);
        assert_eq!(origin.x, 485.0);
        let baseline = 40.0 + 20.0 + 12.0 + 1000.0 * STROKE_WIDTH_FACTOR;
        assert!((origin.y - (baseline - 10.0)).abs() < 1e-4);
    }

    #[test]
    fn icon_glyphs_are_centered_without_line_gap() {
        let canvas = CanvasSnapshot::new(Size::new(100.0, 80.0));
        let thumb = ThumbGeometry::place(0.5, &canvas, ThumbPaints::default());
        // A tall line box must not push the glyphs upwards.
        let metrics = TextMetrics { width: 10.0, height: 20.0, ascent: 8.0, descent: 2.0 };
        assert_eq!(thumb.icon_origin(&metrics), Point::new(45.0, 35.0));
    }

    #[test]
    fn unset_colors_fall_back_to_default() {
        let mut paints = ThumbPaints::default();
        let options = ThumbOptions::default().with_background(Color::WHITE);
        paints.resolve_colors(&options, Color::BLACK);
        assert_eq!(paints.fill, Color::WHITE);
        assert_eq!(paints.text, Color::BLACK);
        assert_eq!(paints.icon, Color::BLACK);
    }
}

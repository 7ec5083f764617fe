//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use smallvec::SmallVec;
use tracing::{debug, trace};
use xilem::masonry::vello::kurbo::{Point, Size};
use xilem::masonry::vello::peniko::Color;

use super::config::{PropertyChange, RangeSliderConfig, SegmentStyle, ThumbPair};
use super::layers::{DrawCommand, LayerKind, LayerSet, TextRole};
use super::pointer::{DragMachine, DragState};
use super::thumb::{
    FrameGeometry, SegmentPaints, TextMeasure, ThumbGeometry, ThumbPaints, ThumbSide, ValueLabel,
};
use super::value::{Culture, SliderValue, ValueType, format_value};
use crate::theme::{DEFAULT_COLOR, THUMB_SHADOW, THUMB_SHADOW_BLUR};

/// The two selected values, reported when a drag ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeResult {
    pub from: Option<SliderValue>,
    pub to: Option<SliderValue>,
}

/// Observable outcome of a pointer event.
#[derive(Clone, Debug, PartialEq)]
pub enum SliderEvent {
    Pressed(ThumbSide),
    Moved { side: ThumbSide, value: SliderValue },
    Released(RangeResult),
}

/// Host-independent range slider.
///
/// Owns the configuration, the three layers and the drag state. The host
/// forwards pointer events, calls [`paint`](Self::paint) whenever
/// [`needs_paint`](Self::needs_paint) says so, and replays the layers'
/// display lists bottom to top.
pub struct RangeSliderCore<P> {
    config: RangeSliderConfig,
    default_color: Color,
    layers: LayerSet,
    frame: FrameGeometry,
    thumb_paints: [ThumbPaints; 2],
    segment_paints: SegmentPaints,
    drag: DragMachine<P>,
    size: Size,
    from: Option<SliderValue>,
    to: Option<SliderValue>,
    is_moving: bool,
}

impl<P: Copy + PartialEq> RangeSliderCore<P> {
    pub fn new(config: RangeSliderConfig) -> Self {
        let mut segment_paints = SegmentPaints::default();
        segment_paints.recolor(&config.segments);
        let (from, to) = seed(config.thumbs.as_ref());
        Self {
            config,
            default_color: DEFAULT_COLOR,
            layers: LayerSet::default(),
            frame: FrameGeometry::default(),
            thumb_paints: [ThumbPaints::default(); 2],
            segment_paints,
            drag: DragMachine::default(),
            size: Size::ZERO,
            from,
            to,
            is_moving: false,
        }
    }

    /// Color used for thumb colors left unset.
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self.layers.invalidate(LayerKind::Thumbs);
        self
    }

    pub fn set_default_color(&mut self, color: Color) -> bool {
        if self.default_color == color {
            return false;
        }
        self.default_color = color;
        self.layers.invalidate(LayerKind::Thumbs);
        true
    }

    pub fn config(&self) -> &RangeSliderConfig {
        &self.config
    }

    pub fn from(&self) -> Option<&SliderValue> {
        self.from.as_ref()
    }

    pub fn to(&self) -> Option<&SliderValue> {
        self.to.as_ref()
    }

    pub fn range(&self) -> RangeResult {
        RangeResult { from: self.from.clone(), to: self.to.clone() }
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn drag_state(&self) -> &DragState<P> {
        self.drag.state()
    }

    pub fn last_active(&self) -> ThumbSide {
        self.drag.last_active()
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    /// Thumb geometry of the latest paint pass.
    pub fn frame(&self) -> &FrameGeometry {
        &self.frame
    }

    pub fn needs_paint(&self) -> bool {
        self.layers.any_dirty()
    }

    /// Force a full repaint, e.g. after the host reloaded its fonts.
    pub fn invalidate(&mut self) {
        self.layers.invalidate_all();
    }

    // --- configuration ---

    /// Each setter reports whether anything changed.
    pub fn set_values(&mut self, values: Vec<SliderValue>) -> bool {
        let change = self.config.set_values(values);
        self.apply(change)
    }

    pub fn set_thumbs(&mut self, thumbs: Option<ThumbPair>) -> bool {
        let change = self.config.set_thumbs(thumbs);
        self.apply(change)
    }

    pub fn set_segments(&mut self, segments: SegmentStyle) -> bool {
        let change = self.config.set_segments(segments);
        self.apply(change)
    }

    pub fn set_format(&mut self, format: impl Into<String>) -> bool {
        let change = self.config.set_format(format);
        self.apply(change)
    }

    pub fn set_value_type(&mut self, value_type: Option<ValueType>) -> bool {
        let change = self.config.set_value_type(value_type);
        self.apply(change)
    }

    pub fn set_culture(&mut self, culture: Culture) -> bool {
        let change = self.config.set_culture(culture);
        self.apply(change)
    }

    pub fn set_icon_font(&mut self, family: Option<String>) -> bool {
        let change = self.config.set_icon_font(family);
        self.apply(change)
    }

    fn apply(&mut self, change: Option<PropertyChange>) -> bool {
        let Some(change) = change else {
            return false;
        };
        debug!(?change, "range slider property changed");
        match change {
            PropertyChange::Values => {
                if self.config.thumbs.is_some() {
                    self.layers.invalidate(LayerKind::Thumbs);
                }
            }
            PropertyChange::IconFont => self.layers.invalidate(LayerKind::Thumbs),
            PropertyChange::Thumbs => {
                if self.config.thumbs.is_some() {
                    (self.from, self.to) = seed(self.config.thumbs.as_ref());
                }
                self.layers.invalidate(LayerKind::Thumbs);
            }
            PropertyChange::Segments => {
                self.segment_paints.recolor(&self.config.segments);
                self.layers.invalidate(LayerKind::Segments);
            }
            PropertyChange::Format | PropertyChange::ValueType | PropertyChange::Culture => {
                self.layers.invalidate(LayerKind::ValueLabels);
            }
        }
        true
    }

    // --- painting ---

    /// Surface size for the following paint passes.
    pub fn resize(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.layers.invalidate_all();
        }
    }

    /// Repaint every dirty layer, Thumbs first so the others see fresh
    /// geometry. Returns the layers that were repainted.
    pub fn paint(&mut self, measure: &mut dyn TextMeasure) -> SmallVec<[LayerKind; 3]> {
        let mut painted = SmallVec::new();
        for kind in LayerKind::CAUSAL {
            if !self.layers.is_dirty(kind) {
                continue;
            }
            match kind {
                LayerKind::Thumbs => self.paint_thumbs(measure),
                LayerKind::Segments => self.paint_segments(),
                LayerKind::ValueLabels => self.paint_value_labels(measure),
            }
            painted.push(kind);
        }
        trace!(?painted, "range slider paint pass");
        painted
    }

    fn paint_thumbs(&mut self, measure: &mut dyn TextMeasure) {
        let layer = self.layers.get_mut(LayerKind::Thumbs);
        let canvas = layer.begin(self.size);
        self.frame.clear();
        self.segment_paints.scale_to(canvas.width());
        for paints in &mut self.thumb_paints {
            paints.scale_to(canvas.width());
        }

        if let Some(thumbs) = self.config.thumbs.as_ref() {
            // The thumb in front is drawn last.
            let front = self.drag.front();
            for side in [front.other(), front] {
                let options = thumbs.get(side);
                let paints = &mut self.thumb_paints[side.slot()];
                paints.resolve_colors(options, self.default_color);

                let Some(percentage) = options
                    .value
                    .as_ref()
                    .and_then(|v| self.config.values.percentage_of_value(v))
                else {
                    continue;
                };

                let mut geometry = ThumbGeometry::place(percentage, &canvas, *paints);
                paints.size_text(geometry.radius, options.icon_scale);
                geometry.paints = *paints;

                layer.push(DrawCommand::Shadow {
                    center: geometry.center,
                    radius: geometry.radius,
                    blur: THUMB_SHADOW_BLUR,
                    color: THUMB_SHADOW,
                });
                layer.push(DrawCommand::Circle {
                    center: geometry.center,
                    radius: geometry.radius,
                    color: paints.fill,
                });

                if let Some(icon) = options.icon.as_deref().filter(|icon| !icon.is_empty()) {
                    let metrics = measure.measure(icon, paints.icon_size, TextRole::Icon);
                    layer.push(DrawCommand::Text {
                        text: icon.to_string(),
                        origin: geometry.icon_origin(&metrics),
                        font_size: paints.icon_size,
                        color: paints.icon,
                        role: TextRole::Icon,
                    });
                    geometry.icon = Some(metrics);
                }

                self.frame.set(side, geometry);
            }
        }

        // Segments and labels are derived from the geometry placed above.
        self.layers.invalidate(LayerKind::Segments);
        self.layers.invalidate(LayerKind::ValueLabels);
    }

    fn paint_segments(&mut self) {
        let mid_y = self.layers.get(LayerKind::Thumbs).snapshot().mid_y();
        let layer = self.layers.get_mut(LayerKind::Segments);
        let canvas = layer.begin(self.size);
        let paints = self.segment_paints;
        let rect = canvas.rect;
        let mut line = |from_x: f64, to_x: f64, color: Color| {
            layer.push(DrawCommand::Line {
                from: Point::new(from_x, mid_y),
                to: Point::new(to_x, mid_y),
                width: paints.stroke_width,
                color,
            });
        };

        match (self.frame.get(ThumbSide::Left), self.frame.get(ThumbSide::Right)) {
            (Some(left), Some(right)) => {
                line(rect.x0, left.center.x, paints.remaining);
                line(right.center.x, rect.x1, paints.remaining);
                line(left.center.x, right.center.x, paints.selected);
            }
            _ => line(rect.x0, rect.x1, paints.remaining),
        }
    }

    fn paint_value_labels(&mut self, measure: &mut dyn TextMeasure) {
        let layer = self.layers.get_mut(LayerKind::ValueLabels);
        let canvas = layer.begin(self.size);

        let Some(thumbs) = self.config.thumbs.as_ref() else {
            return;
        };
        if thumbs.left.value.is_none() || thumbs.right.value.is_none() {
            return;
        }

        let front = self.drag.front();
        for side in [front.other(), front] {
            let (Some(value), Some(geometry)) = (thumbs.get(side).value.as_ref(), self.frame.get_mut(side))
            else {
                continue;
            };
            let text = format_value(value, self.config.value_type, &self.config.format, self.config.culture);
            let font_size = geometry.paints.label_size;
            let metrics = measure.measure(&text, font_size, TextRole::Label);
            let origin = geometry.label_origin(&metrics, canvas.rect);
            layer.push(DrawCommand::Text {
                text: text.clone(),
                origin,
                font_size,
                color: geometry.paints.text,
                role: TextRole::Label,
            });
            geometry.label = Some(ValueLabel { text, metrics, origin });
        }
    }

    // --- pointer input ---

    pub fn pointer_down(&mut self, id: P, position: Point) -> Option<SliderEvent> {
        let track = self.layers.get(LayerKind::Thumbs).snapshot().rect;
        let side = self.drag.press(id, position, track, &self.frame)?;
        self.is_moving = true;
        // The grabbed thumb moves to the front.
        self.layers.invalidate(LayerKind::Thumbs);
        Some(SliderEvent::Pressed(side))
    }

    /// Follow a drag. An event is returned only when the value changed,
    /// though the thumbs are repainted either way.
    pub fn pointer_move(&mut self, id: P, position: Point) -> Option<SliderEvent> {
        let track = self.layers.get(LayerKind::Thumbs).snapshot().rect;
        let track_width = self.layers.get(LayerKind::Segments).snapshot().width();
        let side = self.drag.drag(id, position, track)?;
        let value = self.config.values.value_at_pixel(position.x, track_width)?.clone();
        let thumbs = self.config.thumbs.as_mut()?;

        let slot = &mut thumbs.get_mut(side).value;
        let changed = slot.as_ref() != Some(&value);
        *slot = Some(value.clone());
        match side {
            ThumbSide::Left => self.from = Some(value.clone()),
            ThumbSide::Right => self.to = Some(value.clone()),
        }
        self.layers.invalidate(LayerKind::Thumbs);

        if changed {
            trace!(?side, ?value, "thumb moved");
            Some(SliderEvent::Moved { side, value })
        } else {
            None
        }
    }

    /// Release or cancel; the only place a finished range is reported.
    pub fn pointer_up(&mut self, id: P) -> Option<SliderEvent> {
        self.drag.release(id)?;
        self.is_moving = false;
        let range = self.range();
        debug!(?range, "range selected");
        Some(SliderEvent::Released(range))
    }
}

fn seed(thumbs: Option<&ThumbPair>) -> (Option<SliderValue>, Option<SliderValue>) {
    match thumbs {
        Some(t) => (t.left.value.clone(), t.right.value.clone()),
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::config::ThumbOptions;
    use crate::range::thumb::TextMetrics;

    struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn measure(&mut self, text: &str, font_size: f32, _role: TextRole) -> TextMetrics {
            let size = f64::from(font_size);
            TextMetrics { width: text.chars().count() as f64 * size * 0.5, height: size * 1.2, ascent: size, descent: size * 0.2 }
        }
    }

    fn core(left: f64, right: f64) -> RangeSliderCore<u64> {
        let config = RangeSliderConfig {
            values: (0..=10).map(|i| SliderValue::Numeric(i as f64 * 10.0)).collect::<Vec<_>>().into(),
            thumbs: Some(ThumbPair::new(
                ThumbOptions::new(left).with_background(Color::WHITE).with_icon("<"),
                ThumbOptions::new(right).with_background(Color::BLACK).with_icon(">"),
            )),
            value_type: Some(ValueType::Numeric),
            ..RangeSliderConfig::default()
        };
        let mut core = RangeSliderCore::new(config);
        core.resize(Size::new(220.0, 40.0));
        core.paint(&mut FixedWidth);
        core
    }

    fn circle_colors(core: &RangeSliderCore<u64>) -> Vec<Color> {
        core.layers()
            .get(LayerKind::Thumbs)
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn first_pass_paints_every_layer_in_causal_order() {
        let mut core = core(0.0, 100.0);
        core.resize(Size::new(300.0, 40.0));
        let painted = core.paint(&mut FixedWidth);
        assert_eq!(painted.as_slice(), &LayerKind::CAUSAL);
        assert!(!core.needs_paint());
    }

    #[test]
    fn segment_change_repaints_segments_only() {
        let mut core = core(0.0, 100.0);
        let style = SegmentStyle { selected: Color::WHITE, remaining: Color::BLACK };
        assert!(core.set_segments(style));
        assert_eq!(core.paint(&mut FixedWidth).as_slice(), &[LayerKind::Segments]);
        assert!(!core.set_segments(style));
        assert!(core.paint(&mut FixedWidth).is_empty());
    }

    #[test]
    fn format_change_repaints_labels_only() {
        let mut core = core(0.0, 100.0);
        assert!(core.set_format("{0:F1}"));
        assert_eq!(core.paint(&mut FixedWidth).as_slice(), &[LayerKind::ValueLabels]);
        let label = core.frame().get(ThumbSide::Left).and_then(|g| g.label.as_ref()).unwrap();
        assert_eq!(label.text, "0.0");
    }

    #[test]
    fn last_dragged_thumb_draws_on_top() {
        let mut core = core(0.0, 100.0);
        // Default front is the left thumb: right (black) first, left (white) last.
        assert_eq!(circle_colors(&core), vec![Color::BLACK, Color::WHITE]);

        core.pointer_down(1, Point::new(212.0, 20.0));
        core.pointer_up(1);
        core.paint(&mut FixedWidth);
        assert_eq!(circle_colors(&core), vec![Color::WHITE, Color::BLACK]);
    }

    #[test]
    fn segments_split_at_thumb_centers() {
        let mut core = core(20.0, 60.0);
        core.set_segments(SegmentStyle { selected: Color::WHITE, remaining: Color::BLACK });
        core.paint(&mut FixedWidth);
        let lines: Vec<_> = core
            .layers()
            .get(LayerKind::Segments)
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, color, .. } => Some((from.x, to.x, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![(0.0, 44.0, Color::BLACK), (132.0, 220.0, Color::BLACK), (44.0, 132.0, Color::WHITE)]);
    }

    #[test]
    fn new_thumbs_reseed_the_range_and_repaint_everything() {
        let mut core = core(0.0, 100.0);
        let thumbs = ThumbPair::new(ThumbOptions::new(30.0), ThumbOptions::new(70.0));
        assert!(core.set_thumbs(Some(thumbs.clone())));
        assert_eq!(core.from(), Some(&SliderValue::Numeric(30.0)));
        assert_eq!(core.to(), Some(&SliderValue::Numeric(70.0)));
        assert!(core.layers().is_dirty(LayerKind::Thumbs));
        assert!(!core.layers().is_dirty(LayerKind::Segments));
        assert_eq!(core.paint(&mut FixedWidth).as_slice(), &LayerKind::CAUSAL);

        assert!(!core.set_thumbs(Some(thumbs)));
        assert!(!core.needs_paint());
    }

    #[test]
    fn values_change_with_thumbs_repaints_from_thumbs() {
        let mut core = core(20.0, 60.0);
        assert!(core.set_values((0..=20).map(|i| SliderValue::Numeric(i as f64 * 10.0)).collect()));
        let painted = core.paint(&mut FixedWidth);
        assert_eq!(painted.first(), Some(&LayerKind::Thumbs));
        // Twice as many values: 20 now sits at a tenth of the track.
        let left = core.frame().get(ThumbSide::Left).map(|g| g.center.x).unwrap();
        assert_eq!(left, 22.0);
    }

    #[test]
    fn values_change_without_thumbs_does_not_repaint_thumbs() {
        let mut core = RangeSliderCore::<u64>::new(RangeSliderConfig::default());
        core.resize(Size::new(100.0, 20.0));
        core.paint(&mut FixedWidth);
        assert!(core.set_values(vec![SliderValue::Numeric(1.0)]));
        assert!(!core.needs_paint());
    }
}

//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use xilem::masonry::accesskit::{Node, Role};
use xilem::masonry::core::{
    AccessCtx, BoxConstraints, BrushIndex, EventCtx, LayoutCtx, PaintCtx, PointerButtonEvent,
    PointerEvent, PointerId, PointerUpdate, PropertiesMut, PropertiesRef, RegisterCtx,
    StyleProperty, Update, UpdateCtx, Widget, WidgetId, WidgetMut, render_text,
};
use xilem::masonry::parley::{FontContext, FontStack, Layout, LayoutContext};
use xilem::masonry::vello::Scene;
use xilem::masonry::vello::kurbo::{Affine, Cap, Circle, Line, Point, Rect, Size, Stroke, Vec2};
use xilem::masonry::vello::peniko::{Color, Fill};

use smallvec::SmallVec;
use tracing::{trace, trace_span};

use crate::range::{
    Culture, DrawCommand, RangeResult, RangeSliderConfig, RangeSliderCore, SegmentStyle,
    SliderEvent, SliderValue, TextMeasure, TextMetrics, TextRole, ThumbPair, ThumbSide, ValueType,
    format_value,
};

const SLIDER_WIDTH: f64 = 280.0;
const SLIDER_HEIGHT: f64 = 56.0;

/// What a [`RangeSlider`] reports to its view.
#[derive(Clone, Debug, PartialEq)]
pub enum RangeSliderAction {
    /// A thumb was grabbed; the slider is moving until the matching release.
    Pressed(ThumbSide),
    /// A dragged thumb snapped to a new value.
    Changed(RangeResult),
    /// The gesture ended. Sent exactly once per press.
    Released(RangeResult),
}

type TextKey = (String, u32, TextRole);

fn text_key(text: &str, font_size: f32, role: TextRole) -> TextKey {
    (text.to_string(), font_size.to_bits(), role)
}

/// A horizontal slider with two thumbs selecting a sub-range of a list of
/// values.
///
/// Drawing happens in three layers computed by [`RangeSliderCore`]. Text
/// needs the parley contexts, so the dirty layers are recomputed during
/// layout and `paint` only replays them.
pub struct RangeSlider {
    core: RangeSliderCore<Option<PointerId>>,
    text: HashMap<TextKey, Layout<BrushIndex>>,
}

impl RangeSlider {
    pub fn new(config: RangeSliderConfig) -> Self {
        Self { core: RangeSliderCore::new(config), text: HashMap::new() }
    }

    pub fn with_default_color(mut self, color: Color) -> Self {
        self.core = self.core.with_default_color(color);
        self
    }

    pub fn range(&self) -> RangeResult {
        self.core.range()
    }

    pub fn is_moving(&self) -> bool {
        self.core.is_moving()
    }

    pub fn set_default_color(this: &mut WidgetMut<'_, Self>, color: Color) {
        let changed = this.widget.core.set_default_color(color);
        Self::refresh(this, changed);
    }

    pub fn set_values(this: &mut WidgetMut<'_, Self>, values: Vec<SliderValue>) {
        let changed = this.widget.core.set_values(values);
        Self::refresh(this, changed);
    }

    pub fn set_thumbs(this: &mut WidgetMut<'_, Self>, thumbs: Option<ThumbPair>) {
        let changed = this.widget.core.set_thumbs(thumbs);
        Self::refresh(this, changed);
    }

    pub fn set_segments(this: &mut WidgetMut<'_, Self>, segments: SegmentStyle) {
        let changed = this.widget.core.set_segments(segments);
        Self::refresh(this, changed);
    }

    pub fn set_format(this: &mut WidgetMut<'_, Self>, format: impl Into<String>) {
        let changed = this.widget.core.set_format(format);
        Self::refresh(this, changed);
    }

    pub fn set_value_type(this: &mut WidgetMut<'_, Self>, value_type: Option<ValueType>) {
        let changed = this.widget.core.set_value_type(value_type);
        Self::refresh(this, changed);
    }

    pub fn set_culture(this: &mut WidgetMut<'_, Self>, culture: Culture) {
        let changed = this.widget.core.set_culture(culture);
        Self::refresh(this, changed);
    }

    pub fn set_icon_font(this: &mut WidgetMut<'_, Self>, family: Option<String>) {
        if this.widget.core.set_icon_font(family) {
            // Cached icon layouts were shaped with the old family.
            this.widget.text.clear();
            Self::refresh(this, true);
        }
    }

    fn refresh(this: &mut WidgetMut<'_, Self>, changed: bool) {
        if changed {
            this.ctx.request_layout();
            this.ctx.request_render();
        }
    }

    fn repaint_after_input(&self, ctx: &mut EventCtx<'_>) {
        if self.core.needs_paint() {
            ctx.request_layout();
            ctx.request_render();
        }
    }

    /// Drop shaped text no layer refers to anymore.
    fn prune_text(&mut self) {
        let live: HashSet<TextKey> = self
            .core
            .layers()
            .composited()
            .flat_map(|(_, layer)| layer.commands())
            .filter_map(|command| match command {
                DrawCommand::Text { text, font_size, role, .. } => Some(text_key(text, *font_size, *role)),
                _ => None,
            })
            .collect();
        self.text.retain(|key, _| live.contains(key));
    }

    fn describe(&self) -> Option<String> {
        let config = self.core.config();
        let label = |value: &SliderValue| format_value(value, config.value_type, &config.format, config.culture);
        match (self.core.from(), self.core.to()) {
            (Some(from), Some(to)) => Some(format!("{} to {}", label(from), label(to))),
            _ => None,
        }
    }
}

/// Shapes text with parley and keeps the layouts for the paint pass.
struct ParleyMeasure<'a> {
    font_ctx: &'a mut FontContext,
    layout_ctx: &'a mut LayoutContext<BrushIndex>,
    cache: &'a mut HashMap<TextKey, Layout<BrushIndex>>,
    icon_font: Option<&'a str>,
}

impl TextMeasure for ParleyMeasure<'_> {
    fn measure(&mut self, text: &str, font_size: f32, role: TextRole) -> TextMetrics {
        let layout = match self.cache.entry(text_key(text, font_size, role)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut builder = self.layout_ctx.ranged_builder(self.font_ctx, text, 1.0, true);
                builder.push_default(StyleProperty::FontSize(font_size));
                if let (TextRole::Icon, Some(family)) = (role, self.icon_font) {
                    builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Owned(
                        family.to_string(),
                    ))));
                }
                let mut layout = builder.build(text);
                layout.break_all_lines(None);
                entry.insert(layout)
            }
        };
        let (ascent, descent) = layout
            .lines()
            .next()
            .map_or((layout.height(), 0.0), |line| (line.metrics().ascent, line.metrics().descent));
        TextMetrics {
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
            ascent: f64::from(ascent),
            descent: f64::from(descent),
        }
    }
}

impl Widget for RangeSlider {
    type Action = RangeSliderAction;

    fn on_pointer_event(
        &mut self,
        ctx: &mut EventCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        event: &PointerEvent,
    ) {
        if ctx.is_disabled() {
            return;
        }
        match event {
            PointerEvent::Down(PointerButtonEvent { pointer, state, .. }) => {
                let pos = ctx.local_position(state.position);
                if let Some(SliderEvent::Pressed(side)) = self.core.pointer_down(pointer.pointer_id, pos) {
                    ctx.capture_pointer();
                    ctx.submit_action::<RangeSliderAction>(RangeSliderAction::Pressed(side));
                }
                self.repaint_after_input(ctx);
            }
            PointerEvent::Move(PointerUpdate { pointer, current, .. }) => {
                if ctx.is_active() {
                    let pos = ctx.local_position(current.position);
                    if let Some(SliderEvent::Moved { .. }) = self.core.pointer_move(pointer.pointer_id, pos) {
                        ctx.submit_action::<RangeSliderAction>(RangeSliderAction::Changed(self.core.range()));
                    }
                    self.repaint_after_input(ctx);
                }
            }
            PointerEvent::Up(PointerButtonEvent { pointer, .. }) | PointerEvent::Cancel(pointer) => {
                if let Some(SliderEvent::Released(range)) = self.core.pointer_up(pointer.pointer_id) {
                    if ctx.is_active() {
                        ctx.release_pointer();
                    }
                    ctx.submit_action::<RangeSliderAction>(RangeSliderAction::Released(range));
                }
                self.repaint_after_input(ctx);
            }
            _ => {}
        }
    }

    fn accepts_pointer_interaction(&self) -> bool {
        true
    }

    fn register_children(&mut self, _ctx: &mut RegisterCtx<'_>) {}

    fn update(&mut self, _ctx: &mut UpdateCtx<'_>, _props: &mut PropertiesMut<'_>, _event: &Update) {}

    fn layout(
        &mut self,
        ctx: &mut LayoutCtx<'_>,
        _props: &mut PropertiesMut<'_>,
        bc: &BoxConstraints,
    ) -> Size {
        let size = bc.constrain(Size::new(SLIDER_WIDTH, SLIDER_HEIGHT));
        if ctx.fonts_changed() {
            self.text.clear();
            self.core.invalidate();
        }
        self.core.resize(size);

        if self.core.needs_paint() {
            let icon_font = self.core.config().icon_font.clone();
            let (font_ctx, layout_ctx) = ctx.text_contexts();
            let mut measure = ParleyMeasure {
                font_ctx,
                layout_ctx,
                cache: &mut self.text,
                icon_font: icon_font.as_deref(),
            };
            let painted = self.core.paint(&mut measure);
            trace!(?painted, "range slider layers recomputed");
            self.prune_text();
        }
        size
    }

    fn paint(&mut self, _ctx: &mut PaintCtx<'_>, _props: &PropertiesRef<'_>, scene: &mut Scene) {
        for (_, layer) in self.core.layers().composited() {
            for command in layer.commands() {
                match command {
                    DrawCommand::Line { from, to, width, color } => {
                        scene.stroke(
                            &Stroke::new(*width).with_caps(Cap::Butt),
                            Affine::IDENTITY,
                            *color,
                            None,
                            &Line::new(*from, *to),
                        );
                    }
                    DrawCommand::Shadow { center, radius, blur, color } => {
                        let rect = Rect::from_center_size(*center, Size::new(radius * 2.0, radius * 2.0));
                        scene.draw_blurred_rounded_rect(Affine::IDENTITY, rect, *color, *radius, blur * 0.5);
                    }
                    DrawCommand::Circle { center, radius, color } => {
                        scene.fill(Fill::NonZero, Affine::IDENTITY, *color, None, &Circle::new(*center, *radius));
                    }
                    DrawCommand::Text { text, origin, font_size, color, role } => {
                        let Some(layout) = self.text.get(&text_key(text, *font_size, *role)) else {
                            continue;
                        };
                        let Point { x, y } = *origin;
                        render_text(
                            scene,
                            Affine::translate(Vec2::new(x, y)),
                            layout,
                            &[(*color).into()],
                            true,
                        );
                    }
                }
            }
        }
    }

    fn accessibility_role(&self) -> Role {
        Role::Slider
    }

    fn accessibility(
        &mut self,
        _ctx: &mut AccessCtx<'_>,
        _props: &PropertiesRef<'_>,
        node: &mut Node,
    ) {
        if let Some(description) = self.describe() {
            node.set_description(description);
        }
    }

    fn children_ids(&self) -> SmallVec<[WidgetId; 16]> {
        SmallVec::new()
    }

    fn make_trace_span(&self, id: WidgetId) -> tracing::Span {
        trace_span!("RangeSlider", id = id.trace())
    }
}

//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::core::{MessageContext, MessageResult, Mut, View, ViewMarker};
use xilem::masonry::vello::peniko::Color;
use xilem::{Pod, ViewCtx};

use crate::range::{Culture, RangeSliderConfig, SegmentStyle, SliderValue, ThumbPair, ValueType};
use crate::range::value::DEFAULT_FORMAT;
use crate::widgets::range_slider::{RangeSlider as RangeSliderWidget, RangeSliderAction};

/// A two-thumb slider selecting a sub-range of `values`.
///
/// The callback sees every press, value change and release. Only
/// [`RangeSliderAction::Released`] carries a finished selection.
pub struct RangeSlider<F> {
    values: Vec<SliderValue>,
    thumbs: Option<ThumbPair>,
    segments: SegmentStyle,
    format: String,
    value_type: Option<ValueType>,
    culture: Culture,
    icon_font: Option<String>,
    default_color: Option<Color>,
    on_action: F,
}

/// Create a range slider over `values`. Nothing is drawn until `thumbs`
/// is set and both thumb values are members of `values`.
pub fn range_slider<State, Action>(
    values: Vec<SliderValue>,
    thumbs: Option<ThumbPair>,
    on_action: impl Fn(&mut State, RangeSliderAction) -> Action + Send + Sync + 'static,
) -> RangeSlider<impl Fn(&mut State, RangeSliderAction) -> Action + Send + Sync + 'static> {
    RangeSlider {
        values,
        thumbs,
        segments: SegmentStyle::default(),
        format: DEFAULT_FORMAT.to_string(),
        value_type: None,
        culture: Culture::default(),
        icon_font: None,
        default_color: None,
        on_action,
    }
}

impl<F> RangeSlider<F> {
    pub fn segments(mut self, segments: SegmentStyle) -> Self {
        self.segments = segments;
        self
    }

    /// Composite format for the value labels, e.g. `"{0:N1} kg"`,
    /// `"{0:#,##0.00}"` or `"{0:%d.%m.%Y}"`.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    /// Font family used for the thumb icons.
    pub fn icon_font(mut self, family: impl Into<String>) -> Self {
        self.icon_font = Some(family.into());
        self
    }

    pub fn default_color(mut self, color: Color) -> Self {
        self.default_color = Some(color);
        self
    }

    fn config(&self) -> RangeSliderConfig {
        RangeSliderConfig {
            format: self.format.clone(),
            value_type: self.value_type,
            culture: self.culture,
            values: self.values.clone().into(),
            thumbs: self.thumbs.clone(),
            segments: self.segments,
            icon_font: self.icon_font.clone(),
        }
    }
}

impl<F> ViewMarker for RangeSlider<F> {}

impl<F, State, Action> View<State, Action, ViewCtx> for RangeSlider<F>
where
    State: 'static,
    Action: 'static,
    F: Fn(&mut State, RangeSliderAction) -> Action + Send + Sync + 'static,
{
    type Element = Pod<RangeSliderWidget>;
    type ViewState = ();

    fn build(&self, ctx: &mut ViewCtx, _: &mut State) -> (Self::Element, Self::ViewState) {
        let mut w = RangeSliderWidget::new(self.config());
        if let Some(c) = self.default_color { w = w.with_default_color(c); }
        let pod = ctx.with_action_widget(|ctx| ctx.create_pod(w));
        (pod, ())
    }

    fn rebuild(
        &self, prev: &Self, _: &mut (), _: &mut ViewCtx,
        mut element: Mut<'_, Self::Element>, _: &mut State,
    ) {
        if prev.values != self.values {
            RangeSliderWidget::set_values(&mut element, self.values.clone());
        }
        if prev.thumbs != self.thumbs {
            RangeSliderWidget::set_thumbs(&mut element, self.thumbs.clone());
        }
        if prev.segments != self.segments {
            RangeSliderWidget::set_segments(&mut element, self.segments);
        }
        if prev.format != self.format {
            RangeSliderWidget::set_format(&mut element, self.format.clone());
        }
        if prev.value_type != self.value_type {
            RangeSliderWidget::set_value_type(&mut element, self.value_type);
        }
        if prev.culture != self.culture {
            RangeSliderWidget::set_culture(&mut element, self.culture);
        }
        if prev.default_color != self.default_color {
            if let Some(c) = self.default_color { RangeSliderWidget::set_default_color(&mut element, c); }
        }
        if prev.icon_font != self.icon_font {
            RangeSliderWidget::set_icon_font(&mut element, self.icon_font.clone());
        }
    }

    fn teardown(&self, _: &mut (), ctx: &mut ViewCtx, element: Mut<'_, Self::Element>) {
        ctx.teardown_leaf(element);
    }

    fn message(
        &self, _: &mut (), message: &mut MessageContext,
        _: Mut<'_, Self::Element>, state: &mut State,
    ) -> MessageResult<Action> {
        if message.take_first().is_some() { return MessageResult::Stale; }
        match message.take_message::<RangeSliderAction>() {
            Some(action) => MessageResult::Action((self.on_action)(state, *action)),
            None => MessageResult::Stale,
        }
    }
}

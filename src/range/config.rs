//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use serde::Deserialize;
use xilem::masonry::vello::peniko::Color;
use xilem::masonry::vello::peniko::color::{Srgb, parse_color as parse_css_color};

use super::domain::ValueDomain;
use super::thumb::ThumbSide;
use super::value::{Culture, DEFAULT_FORMAT, SliderValue, ValueType};
use crate::error::ConfigError;

/// Icon glyph size relative to the thumb radius.
pub const DEFAULT_ICON_SCALE: f32 = 0.75;

/// Parse a CSS color (`"#1e90ff"`, `"white"`, `"rgb(...)"`) for `field`.
pub fn parse_color(field: &'static str, value: &str) -> Result<Color, ConfigError> {
    parse_css_color(value)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| ConfigError::InvalidColor {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_optional(field: &'static str, value: Option<&str>) -> Result<Option<Color>, ConfigError> {
    value.map(|v| parse_color(field, v)).transpose()
}

/// Styling and current value of one thumb.
///
/// Colors left at `None` are drawn with the slider's default color.
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbOptions {
    pub background_color: Option<Color>,
    pub text_color: Option<Color>,
    pub icon_color: Option<Color>,
    pub icon: Option<String>,
    pub icon_scale: f32,
    pub value: Option<SliderValue>,
}

impl Default for ThumbOptions {
    fn default() -> Self {
        Self {
            background_color: None,
            text_color: None,
            icon_color: None,
            icon: None,
            icon_scale: DEFAULT_ICON_SCALE,
            value: None,
        }
    }
}

impl ThumbOptions {
    pub fn new(value: impl Into<SliderValue>) -> Self {
        Self { value: Some(value.into()), ..Self::default() }
    }

    pub fn with_background(mut self, color: Color) -> Self { self.background_color = Some(color); self }
    pub fn with_text_color(mut self, color: Color) -> Self { self.text_color = Some(color); self }
    pub fn with_icon_color(mut self, color: Color) -> Self { self.icon_color = Some(color); self }
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self { self.icon = Some(icon.into()); self }
    pub fn with_icon_scale(mut self, scale: f32) -> Self { self.icon_scale = scale; self }
}

/// Unvalidated thumb configuration, colors as strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThumbSpec {
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub icon_color: Option<String>,
    pub icon: Option<String>,
    pub icon_scale: Option<f32>,
    pub value: Option<SliderValue>,
}

impl TryFrom<ThumbSpec> for ThumbOptions {
    type Error = ConfigError;

    fn try_from(spec: ThumbSpec) -> Result<Self, Self::Error> {
        let icon_scale = spec.icon_scale.unwrap_or(DEFAULT_ICON_SCALE);
        if !icon_scale.is_finite() || icon_scale <= 0.0 {
            return Err(ConfigError::InvalidIconScale(icon_scale));
        }
        Ok(Self {
            background_color: parse_optional("background_color", spec.background_color.as_deref())?,
            text_color: parse_optional("text_color", spec.text_color.as_deref())?,
            icon_color: parse_optional("icon_color", spec.icon_color.as_deref())?,
            icon: spec.icon,
            icon_scale,
            value: spec.value,
        })
    }
}

/// The two thumbs of a slider.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ThumbPair {
    pub left: ThumbOptions,
    pub right: ThumbOptions,
}

impl ThumbPair {
    pub fn new(left: ThumbOptions, right: ThumbOptions) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: ThumbSide) -> &ThumbOptions {
        match side {
            ThumbSide::Left => &self.left,
            ThumbSide::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: ThumbSide) -> &mut ThumbOptions {
        match side {
            ThumbSide::Left => &mut self.left,
            ThumbSide::Right => &mut self.right,
        }
    }
}

/// Unvalidated thumb pair.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ThumbPairSpec {
    pub left: ThumbSpec,
    pub right: ThumbSpec,
}

impl TryFrom<ThumbPairSpec> for ThumbPair {
    type Error = ConfigError;

    fn try_from(spec: ThumbPairSpec) -> Result<Self, Self::Error> {
        Ok(Self::new(spec.left.try_into()?, spec.right.try_into()?))
    }
}

/// Colors of the track segments.
///
/// `selected` is the stretch between the thumbs, `remaining` the two outer
/// stretches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentStyle {
    pub selected: Color,
    pub remaining: Color,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self { selected: Color::TRANSPARENT, remaining: Color::TRANSPARENT }
    }
}

/// Unvalidated segment colors.
#[derive(Clone, Debug, Deserialize)]
pub struct SegmentSpec {
    pub selected: String,
    pub remaining: String,
}

impl TryFrom<SegmentSpec> for SegmentStyle {
    type Error = ConfigError;

    fn try_from(spec: SegmentSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            selected: parse_color("selected", &spec.selected)?,
            remaining: parse_color("remaining", &spec.remaining)?,
        })
    }
}

/// Named configuration fields, reported when a setter changes one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyChange {
    Values,
    Thumbs,
    Segments,
    Format,
    ValueType,
    Culture,
    IconFont,
}

/// Everything the host supplies to a range slider.
///
/// The `set_*` methods are edge triggered: they return the changed property
/// only when the new value differs from the stored one.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeSliderConfig {
    pub format: String,
    pub value_type: Option<ValueType>,
    pub culture: Culture,
    pub values: ValueDomain,
    pub thumbs: Option<ThumbPair>,
    pub segments: SegmentStyle,
    pub icon_font: Option<String>,
}

impl Default for RangeSliderConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            value_type: None,
            culture: Culture::default(),
            values: ValueDomain::default(),
            thumbs: None,
            segments: SegmentStyle::default(),
            icon_font: None,
        }
    }
}

/// A configuration document as written, colors still unparsed.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RangeSliderSpec {
    pub format: Option<String>,
    pub value_type: Option<ValueType>,
    pub culture: Culture,
    pub values: ValueDomain,
    pub thumbs: Option<ThumbPairSpec>,
    pub segments: Option<SegmentSpec>,
    pub icon_font: Option<String>,
}

impl TryFrom<RangeSliderSpec> for RangeSliderConfig {
    type Error = ConfigError;

    fn try_from(spec: RangeSliderSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            format: spec.format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            value_type: spec.value_type,
            culture: spec.culture,
            values: spec.values,
            thumbs: spec.thumbs.map(ThumbPair::try_from).transpose()?,
            segments: spec.segments.map(SegmentStyle::try_from).transpose()?.unwrap_or_default(),
            icon_font: spec.icon_font,
        })
    }
}

impl RangeSliderConfig {
    /// Load a full configuration. Syntax errors come back as
    /// [`ConfigError::Toml`], bad colors as [`ConfigError::InvalidColor`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let spec: RangeSliderSpec = toml::from_str(text)?;
        spec.try_into()
    }

    pub fn set_values(&mut self, values: Vec<SliderValue>) -> Option<PropertyChange> {
        replace_if_changed(&mut self.values, ValueDomain::new(values)).then_some(PropertyChange::Values)
    }

    pub fn set_thumbs(&mut self, thumbs: Option<ThumbPair>) -> Option<PropertyChange> {
        replace_if_changed(&mut self.thumbs, thumbs).then_some(PropertyChange::Thumbs)
    }

    pub fn set_segments(&mut self, segments: SegmentStyle) -> Option<PropertyChange> {
        replace_if_changed(&mut self.segments, segments).then_some(PropertyChange::Segments)
    }

    pub fn set_format(&mut self, format: impl Into<String>) -> Option<PropertyChange> {
        replace_if_changed(&mut self.format, format.into()).then_some(PropertyChange::Format)
    }

    pub fn set_value_type(&mut self, value_type: Option<ValueType>) -> Option<PropertyChange> {
        replace_if_changed(&mut self.value_type, value_type).then_some(PropertyChange::ValueType)
    }

    pub fn set_culture(&mut self, culture: Culture) -> Option<PropertyChange> {
        replace_if_changed(&mut self.culture, culture).then_some(PropertyChange::Culture)
    }

    pub fn set_icon_font(&mut self, family: Option<String>) -> Option<PropertyChange> {
        replace_if_changed(&mut self.icon_font, family).then_some(PropertyChange::IconFont)
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_spec_parses_colors() {
        let spec = ThumbSpec {
            background_color: Some("#ff0000".into()),
            text_color: Some("white".into()),
            ..ThumbSpec::default()
        };
        let options = ThumbOptions::try_from(spec).unwrap();
        assert_eq!(options.background_color, Some(Color::from_rgb8(0xFF, 0, 0)));
        assert_eq!(options.text_color, Some(Color::from_rgb8(0xFF, 0xFF, 0xFF)));
        assert_eq!(options.icon_color, None);
        assert_eq!(options.icon_scale, DEFAULT_ICON_SCALE);
    }

    #[test]
    fn malformed_color_fails_fast() {
        let spec = ThumbSpec { icon_color: Some("#zz".into()), ..ThumbSpec::default() };
        match ThumbOptions::try_from(spec) {
            Err(ConfigError::InvalidColor { field, value, .. }) => {
                assert_eq!(field, "icon_color");
                assert_eq!(value, "#zz");
            }
            other => panic!("expected color error, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_icon_scale_is_rejected() {
        let spec = ThumbSpec { icon_scale: Some(0.0), ..ThumbSpec::default() };
        assert!(matches!(ThumbOptions::try_from(spec), Err(ConfigError::InvalidIconScale(_))));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = RangeSliderConfig::try_from(RangeSliderSpec::default()).unwrap();
        assert_eq!(config, RangeSliderConfig::default());
    }

    #[test]
    fn bad_thumb_color_keeps_its_error_variant() {
        let spec = ThumbPairSpec {
            left: ThumbSpec::default(),
            right: ThumbSpec { background_color: Some("nope".into()), ..ThumbSpec::default() },
        };
        assert!(matches!(
            ThumbPair::try_from(spec),
            Err(ConfigError::InvalidColor { field: "background_color", .. })
        ));
    }

    #[test]
    fn setters_are_edge_triggered() {
        let mut config = RangeSliderConfig::default();
        let values = vec![SliderValue::Numeric(1.0), SliderValue::Numeric(2.0)];
        assert_eq!(config.set_values(values.clone()), Some(PropertyChange::Values));
        assert_eq!(config.set_values(values), None);

        let style = SegmentStyle { selected: Color::WHITE, remaining: Color::BLACK };
        assert_eq!(config.set_segments(style), Some(PropertyChange::Segments));
        assert_eq!(config.set_segments(style), None);

        assert_eq!(config.set_format(DEFAULT_FORMAT), None);
        assert_eq!(config.set_format("{0:F1}"), Some(PropertyChange::Format));
        assert_eq!(config.set_value_type(Some(ValueType::Numeric)), Some(PropertyChange::ValueType));
        assert_eq!(config.set_culture(Culture::default()), None);
    }
}

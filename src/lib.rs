//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

mod widgets;
mod views;
pub mod error;
pub mod range;
pub mod theme;

pub use error::ConfigError;
pub use range::{
    Culture, RangeResult, RangeSliderConfig, SegmentStyle, SliderValue, ThumbOptions, ThumbPair,
    ThumbSide, ValueType,
};
pub use views::range_slider::{range_slider, RangeSlider};
pub use widgets::range_slider::{RangeSlider as RangeSliderWidget, RangeSliderAction};

pub use xilem;

//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

//! Host-independent range slider: value mapping, layered display lists,
//! thumb geometry and drag handling. The Masonry widget drives this.

pub mod composer;
pub mod config;
pub mod domain;
pub mod layers;
pub mod pointer;
pub mod thumb;
pub mod value;

pub use composer::{RangeResult, RangeSliderCore, SliderEvent};
pub use config::{
    PropertyChange, RangeSliderConfig, RangeSliderSpec, SegmentSpec, SegmentStyle, ThumbOptions,
    ThumbPair, ThumbPairSpec, ThumbSpec, parse_color,
};
pub use domain::ValueDomain;
pub use layers::{CanvasSnapshot, DrawCommand, Layer, LayerKind, LayerSet, TextRole};
pub use pointer::{DragMachine, DragState, PointerState};
pub use thumb::{FrameGeometry, TextMeasure, TextMetrics, ThumbGeometry, ThumbSide};
pub use value::{Culture, SliderValue, ValueType, format_value, parse_date_time};

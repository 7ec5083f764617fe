//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use chrono::{Days, NaiveDate, NaiveDateTime};
use tracing_subscriber::EnvFilter;
use xilem::masonry::properties::types::{AsUnit, CrossAxisAlignment};
use xilem::masonry::vello::peniko::Color;
use xilem::style::Style as _;
use xilem::view::{flex_col, label};
use xilem::{EventLoop, WidgetView, WindowOptions, Xilem};

use xilem_range_slider::{
    range_slider, Culture, RangeResult, RangeSliderAction, RangeSliderConfig, SliderValue,
    ThumbOptions, ThumbPair, ValueType,
};

const TEXT_COLOR: Color = Color::from_rgb8(0x33, 0x33, 0x33);
const DIM_TEXT: Color = Color::from_rgb8(0x88, 0x88, 0x88);
const ACCENT: Color = Color::from_rgb8(0x1E, 0x90, 0xFF);

/// Price slider styling, loaded the same way an application would read it
/// from disk.
const PRICE_SLIDER: &str = r##"
format = "{0:N0} EUR"
value_type = "numeric"
values = [0, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 1500, 2000]

[thumbs.left]
value = 200
background_color = "#1e90ff"
text_color = "#333333"
icon_color = "white"
icon = "<"

[thumbs.right]
value = 1500
background_color = "#1e90ff"
text_color = "#333333"
icon_color = "white"
icon = ">"

[segments]
selected = "#1e90ff"
remaining = "#d0d0d0"
"##;

struct DemoState {
    price: RangeSliderConfig,
    price_moving: bool,
    last_price: Option<RangeResult>,
    days: Vec<SliderValue>,
    stay: ThumbPair,
    last_stay: Option<RangeResult>,
}

impl DemoState {
    fn new() -> Self {
        let price = match RangeSliderConfig::from_toml_str(PRICE_SLIDER) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("price slider config rejected: {e}");
                RangeSliderConfig::default()
            }
        };

        let first = NaiveDate::from_ymd_opt(2026, 7, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN);
        let days: Vec<SliderValue> = (0..14)
            .filter_map(|i| first.checked_add_days(Days::new(i)))
            .map(SliderValue::from)
            .collect();
        let stay = ThumbPair::new(
            ThumbOptions::new(days[2].clone()).with_background(ACCENT).with_text_color(TEXT_COLOR),
            ThumbOptions::new(days[9].clone()).with_background(ACCENT).with_text_color(TEXT_COLOR),
        );

        Self { price, price_moving: false, last_price: None, days, stay, last_stay: None }
    }
}

fn describe(range: Option<&RangeResult>) -> String {
    match range {
        Some(RangeResult { from: Some(from), to: Some(to) }) => format!("{from:?} .. {to:?}"),
        _ => "nothing selected yet".to_string(),
    }
}

fn app_logic(state: &mut DemoState) -> impl WidgetView<DemoState> + use<> {
    let price = &state.price;
    let moving = if state.price_moving { "dragging" } else { "idle" };

    flex_col((
        label("Price").text_size(12.0).color(TEXT_COLOR),
        range_slider(
            price.values.values().to_vec(),
            price.thumbs.clone(),
            |s: &mut DemoState, action| match action {
                RangeSliderAction::Pressed(_) => s.price_moving = true,
                RangeSliderAction::Changed(_) => {}
                RangeSliderAction::Released(range) => {
                    s.price_moving = false;
                    if let Some(thumbs) = s.price.thumbs.as_mut() {
                        thumbs.left.value = range.from.clone();
                        thumbs.right.value = range.to.clone();
                    }
                    s.last_price = Some(range);
                }
            },
        )
        .segments(price.segments)
        .format(price.format.clone())
        .value_type(ValueType::Numeric)
        .culture(Culture { decimal_separator: ',', group_separator: '.' }),
        label(format!("{moving}: {}", describe(state.last_price.as_ref())))
            .text_size(10.0)
            .color(DIM_TEXT),
        label("Stay").text_size(12.0).color(TEXT_COLOR),
        range_slider(state.days.clone(), Some(state.stay.clone()), |s: &mut DemoState, action| {
            if let RangeSliderAction::Released(range) = action {
                s.stay.left.value = range.from.clone();
                s.stay.right.value = range.to.clone();
                s.last_stay = Some(range);
            }
        })
        .format("{0:%d %b}")
        .value_type(ValueType::DateTime),
        label(describe(state.last_stay.as_ref())).text_size(10.0).color(DIM_TEXT),
    ))
    .cross_axis_alignment(CrossAxisAlignment::Fill)
    .gap(6.0.px())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app = Xilem::new_simple(
        DemoState::new(),
        app_logic,
        WindowOptions::new("Range Slider Demo")
            .with_initial_inner_size(xilem::winit::dpi::LogicalSize::new(360.0, 260.0)),
    );
    app.run_in(EventLoop::with_user_event()).unwrap();
}

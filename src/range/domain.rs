//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use serde::Deserialize;

use super::value::SliderValue;

/// The ordered list of values a thumb can snap to.
///
/// The index is the canonical position; percentages and pixels are derived
/// from it. Fewer than two values means there is no track to position on.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ValueDomain {
    values: Vec<SliderValue>,
}

impl ValueDomain {
    pub fn new(values: Vec<SliderValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[SliderValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SliderValue> {
        self.values.get(index)
    }

    pub fn index_of(&self, value: &SliderValue) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Normalized position of `index` on the track, `index / (len - 1)`.
    pub fn percentage_of(&self, index: usize) -> Option<f64> {
        let count = self.values.len();
        if count <= 1 {
            return None;
        }
        Some(index as f64 / (count - 1) as f64)
    }

    /// Position of `value`, or `None` when it cannot be placed.
    pub fn percentage_of_value(&self, value: &SliderValue) -> Option<f64> {
        self.index_of(value).and_then(|index| self.percentage_of(index))
    }

    /// Index picked by a pointer at `x` on a track `track_width` pixels wide.
    ///
    /// The fractional index is truncated and its magnitude taken, so a pointer
    /// left of the track maps to a positive index. Anything that lands past
    /// the last value resolves to index 0, not to the last value.
    pub fn index_at_pixel(&self, x: f64, track_width: f64) -> Option<usize> {
        let count = self.values.len();
        if count == 0 {
            return None;
        }
        let percentage = x / track_width;
        // `as` saturates and maps NaN to 0.
        let index = ((percentage * (count - 1) as f64) as i64).unsigned_abs();
        match usize::try_from(index) {
            Ok(index) if index < count => Some(index),
            _ => Some(0),
        }
    }

    pub fn value_at_pixel(&self, x: f64, track_width: f64) -> Option<&SliderValue> {
        self.index_at_pixel(x, track_width).and_then(|index| self.get(index))
    }
}

impl From<Vec<SliderValue>> for ValueDomain {
    fn from(values: Vec<SliderValue>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<SliderValue> for ValueDomain {
    fn from_iter<I: IntoIterator<Item = SliderValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tens(count: usize) -> ValueDomain {
        ValueDomain::new((0..count).map(|i| SliderValue::Numeric(i as f64 * 10.0)).collect())
    }

    #[test]
    fn percentages_span_unit_interval_in_order() {
        for count in 2..40 {
            let domain = tens(count);
            let mut previous = -1.0;
            for (index, value) in domain.values().iter().enumerate() {
                let pct = domain.percentage_of_value(value).unwrap();
                assert!((0.0..=1.0).contains(&pct));
                assert!(pct >= previous);
                assert_eq!(pct, index as f64 / (count - 1) as f64);
                previous = pct;
            }
        }
    }

    #[test]
    fn degenerate_domains_have_no_position() {
        assert_eq!(tens(0).percentage_of(0), None);
        assert_eq!(tens(1).percentage_of(0), None);
        assert_eq!(tens(1).percentage_of_value(&SliderValue::Numeric(0.0)), None);
    }

    #[test]
    fn unknown_value_has_no_position() {
        assert_eq!(tens(5).percentage_of_value(&SliderValue::Numeric(15.0)), None);
    }

    #[test]
    fn midpoint_of_eleven_values() {
        let domain = tens(11);
        assert_eq!(domain.value_at_pixel(110.0, 220.0), Some(&SliderValue::Numeric(50.0)));
    }

    #[test]
    fn pixel_round_trip_recovers_index() {
        for width in [64.0, 220.0, 256.0, 1000.0] {
            let domain = tens(9);
            for index in 0..domain.len() {
                let x = domain.percentage_of(index).unwrap() * width;
                assert_eq!(domain.index_at_pixel(x, width), Some(index), "width {width}");
            }
        }
    }

    #[test]
    fn past_the_end_falls_back_to_first_value() {
        let domain = tens(11);
        assert_eq!(domain.index_at_pixel(220.0, 220.0), Some(10));
        assert_eq!(domain.index_at_pixel(250.0, 220.0), Some(0));
        assert_eq!(domain.value_at_pixel(1e9, 220.0), Some(&SliderValue::Numeric(0.0)));
    }

    #[test]
    fn left_of_track_mirrors_into_positive_index() {
        let domain = tens(11);
        assert_eq!(domain.index_at_pixel(-44.0, 220.0), Some(2));
        assert_eq!(domain.index_at_pixel(-10.0, 220.0), Some(0));
    }

    #[test]
    fn empty_domain_yields_nothing() {
        assert_eq!(tens(0).value_at_pixel(10.0, 100.0), None);
        assert_eq!(tens(3).index_at_pixel(10.0, 0.0), Some(0));
    }
}

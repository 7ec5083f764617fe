//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Format string used when none is configured.
pub const DEFAULT_FORMAT: &str = "{0}";

/// Text shown when a value cannot be rendered with the configured type.
pub const PLACEHOLDER: &str = "_";

const DEFAULT_DATE_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// One candidate position of the slider.
///
/// Deserializes from a number, a date-time string, or a native TOML
/// date-time (`2024-01-01T08:00:00`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SliderValue {
    Numeric(f64),
    DateTime(NaiveDateTime),
}

impl<'de> Deserialize<'de> for SliderValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
            Toml(toml::value::Datetime),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => return Ok(Self::Numeric(n)),
            Raw::Text(text) => text,
            Raw::Toml(datetime) => datetime.to_string(),
        };
        parse_date_time(&text)
            .map(Self::DateTime)
            .ok_or_else(|| de::Error::custom(format!("{text:?} is neither a number nor a date-time")))
    }
}

/// Parse an ISO 8601 date-time. An offset is dropped and the wall-clock time
/// kept; a bare date means midnight.
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

impl From<f64> for SliderValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<NaiveDateTime> for SliderValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Selects how values are turned into label text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Numeric,
    DateTime,
}

/// Separators used by numeric formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Culture {
    pub decimal_separator: char,
    pub group_separator: char,
}

impl Default for Culture {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: ',',
        }
    }
}

/// Render `value` as label text.
///
/// Numeric values go through composite formatting (`"{0:F2} kg"`), date-time
/// values through strftime, either as the whole string or inside the hole
/// (`"{0:%d.%m}"`). A missing value type, a value of the other kind, or a
/// format that cannot be applied all yield [`PLACEHOLDER`].
pub fn format_value(
    value: &SliderValue,
    value_type: Option<ValueType>,
    format: &str,
    culture: Culture,
) -> String {
    let text = match (value_type, value) {
        (Some(ValueType::Numeric), SliderValue::Numeric(n)) => format_numeric(*n, format, culture),
        (Some(ValueType::DateTime), SliderValue::DateTime(dt)) => format_date_time(dt, format),
        _ => None,
    };
    text.unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn format_numeric(value: f64, format: &str, culture: Culture) -> Option<String> {
    expand_composite(format, |spec| numeric_spec(value, spec, culture))
}

fn format_date_time(value: &NaiveDateTime, format: &str) -> Option<String> {
    if format.contains('{') {
        expand_composite(format, |spec| {
            strftime(value, if spec.is_empty() { DEFAULT_DATE_TIME } else { spec })
        })
    } else {
        strftime(value, format)
    }
}

fn strftime(value: &NaiveDateTime, pattern: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    // Items valid for the parser can still fail here (e.g. %z on a naive value).
    write!(out, "{}", value.format_with_items(items.iter())).ok()?;
    Some(out)
}

/// Expand `{0}` / `{0:spec}` holes, honoring `{{` and `}}` escapes.
///
/// Only argument 0 exists; any other index or an unbalanced brace fails.
fn expand_composite(format: &str, mut arg: impl FnMut(&str) -> Option<String>) -> Option<String> {
    let mut out = String::with_capacity(format.len() + 8);
    let mut rest = format;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('{') {
            let end = tail.find('}')?;
            let hole = &tail[1..end];
            let (index, spec) = hole.split_once(':').unwrap_or((hole, ""));
            // Alignment (`{0,8}`) is accepted and ignored.
            let index = index.split_once(',').map_or(index, |(i, _)| i);
            if index.trim() != "0" {
                return None;
            }
            out.push_str(&arg(spec)?);
            rest = &tail[end + 1..];
        } else {
            return None;
        }
    }
    out.push_str(rest);
    Some(out)
}

fn numeric_spec(value: f64, spec: &str, culture: Culture) -> Option<String> {
    let mut chars = spec.chars();
    let Some(kind) = chars.next() else {
        return Some(plain(value, culture));
    };
    if !kind.is_ascii_alphabetic() {
        return custom(value, spec, culture);
    }
    let digits = chars.as_str();
    let precision = if digits.is_empty() {
        None
    } else {
        Some(digits.parse::<usize>().ok()?)
    };
    match kind.to_ascii_uppercase() {
        'F' => Some(fixed(value, precision.unwrap_or(2), false, culture)),
        'N' => Some(fixed(value, precision.unwrap_or(2), true, culture)),
        'P' => Some(format!("{} %", fixed(value * 100.0, precision.unwrap_or(2), true, culture))),
        'D' => {
            if value.fract() != 0.0 || !value.is_finite() {
                return None;
            }
            let whole = value as i64;
            let sign = if whole < 0 { "-" } else { "" };
            Some(format!("{sign}{:0width$}", whole.unsigned_abs(), width = precision.unwrap_or(0)))
        }
        'G' => Some(plain(value, culture)),
        _ => None,
    }
}

/// Picture formats built from `0` (digit), `#` (optional digit), `,`
/// (grouping) and `.` (decimal point), e.g. `0.00` or `#,##0`.
fn custom(value: f64, picture: &str, culture: Culture) -> Option<String> {
    if !picture.chars().all(|c| matches!(c, '0' | '#' | ',' | '.'))
        || !picture.contains(['0', '#'])
        || picture.matches('.').count() > 1
        || !value.is_finite()
    {
        return None;
    }
    let (whole, frac) = picture.split_once('.').unwrap_or((picture, ""));
    if frac.contains(',') {
        return None;
    }
    let min_whole = whole.chars().filter(|&c| c == '0').count();
    let min_frac = frac.chars().filter(|&c| c == '0').count();
    let max_frac = frac.len();
    let grouped = whole.contains(',');

    let mut text = fixed(value.abs(), max_frac, grouped, culture);
    if max_frac > min_frac {
        let keep = text.len() - (max_frac - min_frac);
        while text.len() > keep && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with(culture.decimal_separator) {
            text.pop();
        }
    }
    let digits = text.split(culture.decimal_separator).next().unwrap_or_default();
    let whole_digits = digits.chars().filter(char::is_ascii_digit).count();
    if whole_digits < min_whole {
        text.insert_str(0, &"0".repeat(min_whole - whole_digits));
    } else if min_whole == 0 && digits == "0" {
        text.remove(0);
    }
    let negative = value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        text.insert(0, '-');
    }
    Some(text)
}

fn plain(value: f64, culture: Culture) -> String {
    value.to_string().replace('.', &culture.decimal_separator.to_string())
}

fn fixed(value: f64, precision: usize, grouped: bool, culture: Culture) -> String {
    let digits = format!("{:.*}", precision, value.abs());
    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (digits.as_str(), None),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    if grouped {
        let len = whole.len();
        for (i, c) in whole.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(culture.group_separator);
            }
            out.push(c);
        }
    } else {
        out.push_str(whole);
    }
    if let Some(frac) = frac {
        out.push(culture.decimal_separator);
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(value: f64, format: &str) -> String {
        format_value(&SliderValue::Numeric(value), Some(ValueType::Numeric), format, Culture::default())
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .unwrap()
    }

    #[test]
    fn default_format_prints_shortest_number() {
        assert_eq!(numeric(50.0, DEFAULT_FORMAT), "50");
        assert_eq!(numeric(2.5, DEFAULT_FORMAT), "2.5");
    }

    #[test]
    fn standard_numeric_specifiers() {
        assert_eq!(numeric(3.14159, "{0:F2}"), "3.14");
        assert_eq!(numeric(1234567.891, "{0:N1}"), "1,234,567.9");
        assert_eq!(numeric(0.25, "{0:P0}"), "25 %");
        assert_eq!(numeric(7.0, "{0:D3}"), "007");
        assert_eq!(numeric(-1500.0, "{0:N0}"), "-1,500");
    }

    #[test]
    fn picture_formats() {
        assert_eq!(numeric(3.14159, "{0:0.00}"), "3.14");
        assert_eq!(numeric(1234567.0, "{0:#,##0}"), "1,234,567");
        assert_eq!(numeric(7.0, "{0:000}"), "007");
        assert_eq!(numeric(2.5, "{0:0.##}"), "2.5");
        assert_eq!(numeric(2.0, "{0:0.##}"), "2");
        assert_eq!(numeric(0.5, "{0:#.#}"), ".5");
        assert_eq!(numeric(-1234.5, "{0:#,##0.0}"), "-1,234.5");
        assert_eq!(numeric(1.0, "{0:0.0.0}"), PLACEHOLDER);
        assert_eq!(numeric(1.0, "{0:0x}"), PLACEHOLDER);
    }

    #[test]
    fn literal_text_and_escapes_survive() {
        assert_eq!(numeric(40.0, "{0} kg"), "40 kg");
        assert_eq!(numeric(40.0, "{{{0}}}"), "{40}");
    }

    #[test]
    fn culture_changes_separators() {
        let culture = Culture { decimal_separator: ',', group_separator: '.' };
        let text = format_value(&SliderValue::Numeric(1234.5), Some(ValueType::Numeric), "{0:N2}", culture);
        assert_eq!(text, "1.234,50");
    }

    #[test]
    fn bad_numeric_format_degrades_to_placeholder() {
        assert_eq!(numeric(1.0, "{1}"), PLACEHOLDER);
        assert_eq!(numeric(1.0, "{0"), PLACEHOLDER);
        assert_eq!(numeric(1.5, "{0:D2}"), PLACEHOLDER);
        assert_eq!(numeric(1.0, "{0:Q}"), PLACEHOLDER);
    }

    #[test]
    fn date_time_uses_strftime() {
        let value = SliderValue::DateTime(noon());
        let ty = Some(ValueType::DateTime);
        assert_eq!(format_value(&value, ty, DEFAULT_FORMAT, Culture::default()), "2024-03-09 12:30:00");
        assert_eq!(format_value(&value, ty, "%d.%m.", Culture::default()), "09.03.");
        assert_eq!(format_value(&value, ty, "at {0:%H:%M}", Culture::default()), "at 12:30");
    }

    #[test]
    fn kind_mismatch_renders_placeholder() {
        let date = SliderValue::DateTime(noon());
        assert_eq!(format_value(&date, Some(ValueType::Numeric), "{0}", Culture::default()), PLACEHOLDER);
        let number = SliderValue::Numeric(1.0);
        assert_eq!(format_value(&number, Some(ValueType::DateTime), "{0}", Culture::default()), PLACEHOLDER);
        assert_eq!(format_value(&number, None, "{0}", Culture::default()), PLACEHOLDER);
    }

    #[test]
    fn unformattable_date_item_renders_placeholder() {
        let value = SliderValue::DateTime(noon());
        assert_eq!(format_value(&value, Some(ValueType::DateTime), "%z", Culture::default()), PLACEHOLDER);
    }
}

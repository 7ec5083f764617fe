//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

/// Errors raised while turning raw configuration into slider settings.
///
/// Everything is validated when the configuration is applied, so a paint
/// pass never has to deal with a bad color or a malformed document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid color {value:?} for {field}: {reason}")]
    InvalidColor {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("icon scale must be a positive finite number, got {0}")]
    InvalidIconScale(f32),
    #[error("range slider config is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

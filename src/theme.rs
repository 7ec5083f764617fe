//! This file is part of the xilem_range_slider project.
//! (c) 2026 by Jacek Wisniowski
//!
//! This project was released as open source under the
//! Apache License, Version 2.0: http://www.apache.org/licenses/LICENSE-2.0
//! (compatible with the Xilem licence).

use xilem::masonry::vello::peniko::Color;

/// Fallback for any thumb color left unset in the configuration.
pub const DEFAULT_COLOR: Color = Color::from_rgb8(0x00, 0x00, 0x00);

/// Soft grey halo drawn underneath each thumb.
pub const THUMB_SHADOW: Color = Color::from_rgb8(0xD8, 0xD8, 0xD8);

/// Blur applied to the thumb halo.
pub const THUMB_SHADOW_BLUR: f64 = 10.0;

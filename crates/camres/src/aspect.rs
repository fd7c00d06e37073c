// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Aspect-ratio classification
//!
//! A resolution's ratio `width / height` is truncated to one decimal digit
//! and looked up in a fixed table:
//!
//! | Truncated ratio | Label |
//! |-----------------|-------|
//! | 0.7 | 3:4 |
//! | 0.8 | 4:5 |
//! | 1.0 | 1:1 |
//! | 1.2 | 5:4 |
//! | 1.3 | 4:3 |
//! | 1.5 | 3:2 |
//! | 1.6 | 16:10 |
//! | 1.7 | 16:9 |
//! | 1.8 | 9:5 |
//!
//! Anything else is [`AspectRatio::Unknown`], rendered `?:?`.

use std::fmt;

use crate::capability::Resolution;

/// Tolerance used when comparing the truncated ratio against the table.
pub const EPSILON: f64 = 1e-4;

const RATIOS: &[(f64, &str)] = &[
    (0.7, "3:4"),
    (0.8, "4:5"),
    (1.0, "1:1"),
    (1.2, "5:4"),
    (1.3, "4:3"),
    (1.5, "3:2"),
    (1.6, "16:10"),
    (1.7, "16:9"),
    (1.8, "9:5"),
];

/// Canonical aspect-ratio label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    Known(&'static str),
    Unknown,
}

impl AspectRatio {
    pub const FOUR_THREE: AspectRatio = AspectRatio::Known("4:3");
    pub const SIXTEEN_NINE: AspectRatio = AspectRatio::Known("16:9");

    /// Label text, `?:?` when unknown
    pub fn label(&self) -> &'static str {
        match *self {
            AspectRatio::Known(label) => label,
            AspectRatio::Unknown => "?:?",
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, AspectRatio::Known(_))
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a resolution by its aspect ratio. The framerate is ignored.
///
/// ```
/// use camres::aspect::classify;
/// use camres::capability::Resolution;
///
/// assert_eq!(classify(&Resolution::new(640, 480)).label(), "4:3");
/// assert_eq!(classify(&Resolution::new(1920, 1080)).label(), "16:9");
/// assert_eq!(classify(&Resolution::new(500, 500)).label(), "1:1");
/// assert_eq!(classify(&Resolution::new(250, 100)).label(), "?:?");
/// ```
pub fn classify(resolution: &Resolution) -> AspectRatio {
    let (width, height) = (resolution.width, resolution.height);

    if height == 0 {
        log::warn!("Could not find aspect ratio for {}x{}", width, height);
        return AspectRatio::Unknown;
    }

    // Truncated in integers: 1250x1000 is exactly 12 tenths
    let tenths = u64::from(width) * 10 / u64::from(height);
    let r = tenths as f64 / 10.0;

    match RATIOS.iter().find(|(key, _)| (r - key).abs() < EPSILON) {
        Some(&(_, label)) => AspectRatio::Known(label),
        None => {
            log::warn!("Could not find aspect ratio for {}x{}", width, height);
            AspectRatio::Unknown
        }
    }
}

/// Classify a resolution given in text form (`WxH`, optionally with a
/// framerate suffix). Unparseable text is [`AspectRatio::Unknown`].
pub fn classify_str(resolution: &str) -> AspectRatio {
    match resolution.parse::<Resolution>() {
        Ok(res) => classify(&res),
        Err(e) => {
            log::warn!("Could not find aspect ratio for {}: {}", resolution, e);
            AspectRatio::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(w: u32, h: u32) -> &'static str {
        classify(&Resolution::new(w, h)).label()
    }

    #[test]
    fn test_common_ratios() {
        assert_eq!(label(640, 480), "4:3");
        assert_eq!(label(1920, 1080), "16:9");
        assert_eq!(label(500, 500), "1:1");
        assert_eq!(label(1280, 1024), "5:4");
        assert_eq!(label(720, 480), "3:2");
        assert_eq!(label(1920, 1200), "16:10");
        assert_eq!(label(480, 640), "3:4");
        assert_eq!(label(1440, 800), "9:5");
        assert_eq!(label(1024, 1280), "4:5");
    }

    #[test]
    fn test_truncation_not_rounding() {
        // 1.39 truncates to 1.3
        assert_eq!(label(139, 100), "4:3");
        // 1.79 truncates to 1.7
        assert_eq!(label(179, 100), "16:9");
    }

    #[test]
    fn test_exact_boundaries() {
        assert_eq!(label(120, 100), "5:4");
        assert_eq!(label(130, 100), "4:3");
        assert_eq!(label(170, 100), "16:9");
        assert_eq!(label(70, 100), "3:4");
    }

    #[test]
    fn test_unknown_ratio() {
        assert_eq!(label(250, 100), "?:?");
        assert_eq!(label(1100, 1000), "?:?");
        assert!(!classify(&Resolution::new(250, 100)).is_known());
    }

    #[test]
    fn test_zero_height() {
        assert_eq!(classify(&Resolution::new(640, 0)), AspectRatio::Unknown);
    }

    #[test]
    fn test_framerate_ignored() {
        assert_eq!(classify_str("640x480@30/1"), AspectRatio::FOUR_THREE);
        assert_eq!(classify_str("1280x720@1/1-30/1"), AspectRatio::SIXTEEN_NINE);
        assert_eq!(classify_str("bogus"), AspectRatio::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(AspectRatio::Unknown.to_string(), "?:?");
        assert_eq!(AspectRatio::SIXTEEN_NINE.to_string(), "16:9");
    }
}

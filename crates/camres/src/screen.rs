// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Screen geometry
//!
//! The usable display area bounds the viewfinder resolutions that can be
//! selected. Geometry comes from the command line (`WxH`) or from the Linux
//! framebuffer sysfs attribute `virtual_size` (`W,H`).

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::capability::Resolution;
use crate::Error;

/// Default framebuffer attribute holding the display size
pub const FRAMEBUFFER_SIZE: &str = "/sys/class/graphics/fb0/virtual_size";

/// Usable display width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub width: u32,
    pub height: u32,
}

impl ScreenGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        ScreenGeometry { width, height }
    }

    /// True if `resolution` fits the screen in either orientation.
    ///
    /// The shorter side must not exceed the screen's shorter side and the
    /// longer side must not exceed the screen's longer side.
    pub fn fits(&self, resolution: &Resolution) -> bool {
        let (screen_min, screen_max) = min_max(self.width, self.height);
        let (res_min, res_max) = min_max(resolution.width, resolution.height);
        screen_min >= res_min && screen_max >= res_max
    }

    /// Read the geometry from a framebuffer `virtual_size` attribute.
    pub fn from_framebuffer(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let (w, h) = content.trim().split_once(',').ok_or_else(|| {
            Error::InvalidData(format!(
                "Unexpected framebuffer size in {}: {}",
                path.display(),
                content.trim()
            ))
        })?;
        parse_dimensions(w, h, content.trim())
    }
}

impl fmt::Display for ScreenGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ScreenGeometry {
    type Err = Error;

    /// Parse `WxH` or `W*H`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once('x').or_else(|| s.split_once('*')).ok_or_else(|| {
            Error::InvalidData(format!(
                "Invalid screen geometry format (expected WxH or W*H): {}",
                s
            ))
        })?;
        parse_dimensions(w, h, s)
    }
}

fn parse_dimensions(w: &str, h: &str, original: &str) -> Result<ScreenGeometry, Error> {
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::InvalidData(format!("Invalid width in screen geometry: {}", original)))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| Error::InvalidData(format!("Invalid height in screen geometry: {}", original)))?;

    if width == 0 || height == 0 {
        return Err(Error::InvalidData(format!(
            "Screen dimensions must be positive: {}",
            original
        )));
    }

    Ok(ScreenGeometry::new(width, height))
}

fn min_max(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_geometry() {
        assert_eq!(
            "1080x1920".parse::<ScreenGeometry>().unwrap(),
            ScreenGeometry::new(1080, 1920)
        );
        assert_eq!(
            "720*1280".parse::<ScreenGeometry>().unwrap(),
            ScreenGeometry::new(720, 1280)
        );
        assert!("1080".parse::<ScreenGeometry>().is_err());
        assert!("0x1920".parse::<ScreenGeometry>().is_err());
        assert!("axb".parse::<ScreenGeometry>().is_err());
    }

    #[test]
    fn test_fits_either_orientation() {
        let portrait = ScreenGeometry::new(1080, 1920);
        assert!(portrait.fits(&Resolution::new(1920, 1080)));
        assert!(portrait.fits(&Resolution::new(1080, 1920)));
        assert!(portrait.fits(&Resolution::new(640, 480)));
        assert!(!portrait.fits(&Resolution::new(2560, 1440)));
        assert!(!portrait.fits(&Resolution::new(1200, 1200)));
    }

    #[test]
    fn test_from_framebuffer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "720,1280").unwrap();

        let screen = ScreenGeometry::from_framebuffer(file.path()).unwrap();
        assert_eq!(screen, ScreenGeometry::new(720, 1280));
        assert_eq!(screen.to_string(), "720x1280");
    }

    #[test]
    fn test_from_framebuffer_missing() {
        let err = ScreenGeometry::from_framebuffer("/nonexistent/virtual_size").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}

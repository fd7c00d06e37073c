// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Capability types
//!
//! This module defines the data passed between the capability backends and
//! the processing stages:
//!
//! - [`Camera`] - A physical camera (numeric id and display name)
//! - [`CapabilityClass`] - Image capture, video capture or viewfinder
//! - [`RawCapabilityEntry`] - One loosely-structured capability descriptor
//! - [`Resolution`] - Normalized `WxH[@rate]` record produced by the parser
//! - [`CameraResolutions`] - Parsed resolution lists of one camera

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::Error;

/// A physical camera as reported by the device enumerator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    /// Backend identifier (enum value or device index)
    pub id: u32,
    /// Display name
    pub name: String,
}

impl Camera {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Camera {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Category of resolution support queried independently per camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityClass {
    /// Still image capture
    ImageCapture,
    /// Video recording
    VideoCapture,
    /// Live preview
    Viewfinder,
}

impl CapabilityClass {
    /// Every class, in query order.
    pub const ALL: &'static [CapabilityClass] = &[
        CapabilityClass::ImageCapture,
        CapabilityClass::VideoCapture,
        CapabilityClass::Viewfinder,
    ];

    /// Name of the camera source property holding this class's caps
    pub fn property_name(&self) -> &'static str {
        match self {
            CapabilityClass::ImageCapture => "image-capture-supported-caps",
            CapabilityClass::VideoCapture => "video-capture-supported-caps",
            CapabilityClass::Viewfinder => "viewfinder-supported-caps",
        }
    }

    /// Short lowercase name used in reports and JSON keys
    pub fn short_name(&self) -> &'static str {
        match self {
            CapabilityClass::ImageCapture => "image",
            CapabilityClass::VideoCapture => "video",
            CapabilityClass::Viewfinder => "viewfinder",
        }
    }

    /// Hardware-profile key prefix
    pub fn profile_prefix(&self) -> &'static str {
        match self {
            CapabilityClass::ImageCapture => "IMAGE",
            CapabilityClass::VideoCapture => "VIDEO",
            CapabilityClass::Viewfinder => "VF",
        }
    }

    pub fn is_video(&self) -> bool {
        *self == CapabilityClass::VideoCapture
    }

    pub fn is_viewfinder(&self) -> bool {
        *self == CapabilityClass::Viewfinder
    }

    /// Resolve a class from a property or short name by prefix.
    ///
    /// `"image-capture-supported-caps"`, `"image-capture"` and `"image"` all
    /// resolve to [`CapabilityClass::ImageCapture`]. Unknown names give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.starts_with("image") {
            Some(CapabilityClass::ImageCapture)
        } else if name.starts_with("video") {
            Some(CapabilityClass::VideoCapture)
        } else if name.starts_with("viewfinder") {
            Some(CapabilityClass::Viewfinder)
        } else {
            None
        }
    }
}

impl fmt::Display for CapabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// A framerate fraction, e.g. `30/1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Fraction {
            numerator,
            denominator,
        }
    }

    /// Whole frames per second, rounded toward zero.
    ///
    /// Returns `None` for a zero denominator.
    pub fn whole(&self) -> Option<u32> {
        self.numerator.checked_div(self.denominator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Fraction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, den) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidData(format!("Fraction must be N/D: {}", s)))?;
        let numerator = num
            .trim()
            .parse()
            .map_err(|_| Error::InvalidData(format!("Invalid numerator in fraction: {}", s)))?;
        let denominator = den
            .trim()
            .parse()
            .map_err(|_| Error::InvalidData(format!("Invalid denominator in fraction: {}", s)))?;
        Ok(Fraction::new(numerator, denominator))
    }
}

impl TryFrom<String> for Fraction {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A capability field holding one value or an enumerated list of values
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    /// Enumerated list, every value is iterated
    List(Vec<T>),
    /// Single value
    Scalar(T),
}

impl<T> Field<T> {
    /// Values in declaration order. A scalar yields exactly one value.
    pub fn values(&self) -> &[T] {
        match self {
            Field::List(values) => values,
            Field::Scalar(value) => std::slice::from_ref(value),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Scalar(value)
    }
}

impl<T> From<Vec<T>> for Field<T> {
    fn from(values: Vec<T>) -> Self {
        Field::List(values)
    }
}

/// One framerate value of a raw capability entry
///
/// In a capability dump a fraction is written `"30/1"` and a range
/// `{"min": "1/1", "max": "30/1"}`. Anything else is kept verbatim as
/// [`Framerate::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Framerate {
    Fraction(Fraction),
    Range { min: Fraction, max: Fraction },
    Unrecognized(serde_json::Value),
}

/// A raw capability descriptor as supplied by a backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCapabilityEntry {
    #[serde(default)]
    pub width: Option<Field<u32>>,
    #[serde(default)]
    pub height: Option<Field<u32>>,
    #[serde(default)]
    pub framerate: Option<Field<Framerate>>,
}

impl RawCapabilityEntry {
    pub fn new(width: impl Into<Field<u32>>, height: impl Into<Field<u32>>) -> Self {
        RawCapabilityEntry {
            width: Some(width.into()),
            height: Some(height.into()),
            framerate: None,
        }
    }

    /// Single `width` x `height` entry without framerate information
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(width, height)
    }

    pub fn with_framerate(mut self, framerate: impl Into<Field<Framerate>>) -> Self {
        self.framerate = Some(framerate.into());
        self
    }
}

/// Framerate attached to a normalized resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rate {
    Single(Fraction),
    Range { min: Fraction, max: Fraction },
}

impl Rate {
    /// Whole frames per second, taking the top of a range.
    pub fn top_fps(&self) -> Option<u32> {
        match self {
            Rate::Single(f) => f.whole(),
            Rate::Range { max, .. } => max.whole(),
        }
    }
}

/// Normalized resolution record
///
/// Renders as `WxH`, `WxH@N/D` or `WxH@N1/D1-N2/D2` and parses back from
/// those forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub rate: Option<Rate>,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Resolution {
            width,
            height,
            rate: None,
        }
    }

    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Same resolution with the framerate stripped
    pub const fn base(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Pixel area
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        match self.rate {
            None => Ok(()),
            Some(Rate::Single(rate)) => write!(f, "@{}", rate),
            Some(Rate::Range { min, max }) => write!(f, "@{}-{}", min, max),
        }
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split(['x', '@', '-', '/'])
            .map(|t| t.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidData(format!("Invalid resolution: {}", s)))?;

        match tokens.as_slice() {
            &[w, h] => Ok(Resolution::new(w, h)),
            &[w, h, n, d] => Ok(Resolution::new(w, h).with_rate(Rate::Single(Fraction::new(n, d)))),
            &[w, h, n1, d1, n2, d2] => Ok(Resolution::new(w, h).with_rate(Rate::Range {
                min: Fraction::new(n1, d1),
                max: Fraction::new(n2, d2),
            })),
            _ => Err(Error::InvalidData(format!(
                "Resolution must be WxH, WxH@N/D or WxH@N/D-N/D: {}",
                s
            ))),
        }
    }
}

/// Parsed resolutions of one capability class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassResolutions {
    pub class: CapabilityClass,
    pub resolutions: Vec<Resolution>,
}

/// Parsed resolutions of one camera, in query order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraResolutions {
    pub camera: Camera,
    pub classes: Vec<ClassResolutions>,
}

impl CameraResolutions {
    /// True if no class holds a single resolution
    pub fn is_empty(&self) -> bool {
        self.classes.iter().all(|c| c.resolutions.is_empty())
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Camera Resolution Discovery for Rust
//!
//! Discovers the capture and viewfinder resolutions supported by the cameras
//! of a device and derives three artifacts from them:
//!
//! - a plain-text report ([`report`])
//! - a JSON capability manifest for a camera application ([`profile::build_json`])
//! - a hardware-profile file filled from a `@TOKEN@` template
//!   ([`profile::build_hardware_profile`], [`template`])
//!
//! # Quick Start
//!
//! ```no_run
//! use camres::capability::CapabilityClass;
//! use camres::source::V4l2Source;
//! use camres::{collect, report};
//!
//! let source = V4l2Source::new();
//! let cameras = collect(&source, CapabilityClass::ALL)?;
//! print!("{}", report::render(&cameras));
//! # Ok::<(), camres::Error>(())
//! ```
//!
//! # Pipeline
//!
//! Raw capability entries enter [`parser::parse`] and come out as ordered,
//! deduplicated [`capability::Resolution`] lists. [`aspect::classify`] and
//! [`viewfinder::find_best_viewfinder`] are applied per resolution while the
//! [`profile`] module assembles the outputs. Every step is deterministic:
//! identical input always produces identical output.

use std::{error, fmt, io};

/// Error type for camres library operations
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading a device, a capability dump or a template
    Io(io::Error),

    /// Capability dump could not be decoded
    Json(serde_json::Error),

    /// No camera or capability data could be obtained from the backend
    Unavailable(String),

    /// Malformed input that cannot be recovered locally
    InvalidData(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Unavailable(msg) => write!(f, "Unavailable: {}", msg),
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Unavailable(_) | Error::InvalidData(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

/// Capability classes, raw capability entries and normalized resolutions.
pub mod capability;

/// Expansion of raw capability entries into resolution lists.
pub mod parser;

/// Aspect-ratio classification.
pub mod aspect;

/// Viewfinder selection for a capture resolution.
pub mod viewfinder;

/// JSON manifest and hardware-profile assembly.
pub mod profile;

/// Plain-text report rendering.
pub mod report;

/// `@TOKEN@` template substitution.
pub mod template;

/// Screen geometry.
pub mod screen;

/// ISO speed discovery.
pub mod iso;

/// Camera enumeration and capability retrieval backends.
pub mod source;

use capability::{CameraResolutions, CapabilityClass, ClassResolutions};
use source::CapabilitySource;

/// Query every camera of `source` for the requested capability classes.
///
/// Cameras are returned in enumeration order. A class whose retrieval fails
/// is logged and left out of that camera's list; other classes and cameras
/// are still queried.
///
/// # Errors
///
/// Returns [`Error::Unavailable`] if the source reports no cameras at all.
pub fn collect<S: CapabilitySource + ?Sized>(
    source: &S,
    classes: &[CapabilityClass],
) -> Result<Vec<CameraResolutions>, Error> {
    log::info!("Searching cameras...");

    let cameras = source.cameras()?;
    if cameras.is_empty() {
        return Err(Error::Unavailable("no cameras found".to_string()));
    }

    let mut result = Vec::with_capacity(cameras.len());
    for camera in cameras {
        log::info!("Searching resolutions for {}...", camera.name);

        let mut found = Vec::with_capacity(classes.len());
        for &class in classes {
            match source.capabilities(&camera, class) {
                Ok(entries) => found.push(ClassResolutions {
                    class,
                    resolutions: parser::parse(&entries),
                }),
                Err(e) => log::warn!(
                    "Failed to query {} for {} ({}): {}",
                    class.property_name(),
                    camera.name,
                    camera.id,
                    e
                ),
            }
        }

        result.push(CameraResolutions {
            camera,
            classes: found,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use capability::{Camera, RawCapabilityEntry};

    struct OneCamera;

    impl CapabilitySource for OneCamera {
        fn cameras(&self) -> Result<Vec<Camera>, Error> {
            Ok(vec![Camera::new(0, "primary")])
        }

        fn capabilities(
            &self,
            _camera: &Camera,
            class: CapabilityClass,
        ) -> Result<Vec<RawCapabilityEntry>, Error> {
            match class {
                CapabilityClass::ImageCapture => Ok(vec![RawCapabilityEntry::sized(640, 480)]),
                CapabilityClass::VideoCapture => Err(Error::Unavailable("no video".into())),
                CapabilityClass::Viewfinder => Ok(Vec::new()),
            }
        }
    }

    struct NoCameras;

    impl CapabilitySource for NoCameras {
        fn cameras(&self) -> Result<Vec<Camera>, Error> {
            Ok(Vec::new())
        }

        fn capabilities(
            &self,
            _camera: &Camera,
            _class: CapabilityClass,
        ) -> Result<Vec<RawCapabilityEntry>, Error> {
            unreachable!("no cameras to query")
        }
    }

    #[test]
    fn test_collect_skips_failed_class() {
        let cameras = collect(&OneCamera, CapabilityClass::ALL).unwrap();
        assert_eq!(cameras.len(), 1);

        let classes: Vec<_> = cameras[0].classes.iter().map(|c| c.class).collect();
        assert_eq!(
            classes,
            vec![CapabilityClass::ImageCapture, CapabilityClass::Viewfinder]
        );
        assert_eq!(cameras[0].classes[0].resolutions[0].to_string(), "640x480");
        assert!(cameras[0].classes[1].resolutions.is_empty());
    }

    #[test]
    fn test_collect_without_cameras_fails() {
        let err = collect(&NoCameras, CapabilityClass::ALL).unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::InvalidData("bad fraction".to_string());
        assert_eq!(format!("{}", err), "Invalid data: bad fraction");
    }
}

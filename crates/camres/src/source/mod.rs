// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Camera enumeration and capability retrieval
//!
//! A [`CapabilitySource`] lists the cameras of a device and returns the raw
//! capability entries of one camera for one [`CapabilityClass`]. Two
//! backends are provided:
//!
//! - [`V4l2Source`] queries `/dev/video*` capture nodes through the `v4l`
//!   crate
//! - [`DumpSource`] reads a JSON capability dump, for offline generation
//!
//! # Example
//!
//! ```no_run
//! use camres::capability::CapabilityClass;
//! use camres::source::{CapabilitySource, DumpSource};
//!
//! let source = DumpSource::from_file("caps.json")?;
//! for camera in source.cameras()? {
//!     let entries = source.capabilities(&camera, CapabilityClass::Viewfinder)?;
//!     println!("{}: {} viewfinder entries", camera, entries.len());
//! }
//! # Ok::<(), camres::Error>(())
//! ```

use crate::capability::{Camera, CapabilityClass, RawCapabilityEntry};
use crate::Error;

mod dump;
mod v4l2;

pub use dump::DumpSource;
pub use v4l2::V4l2Source;

/// Backend providing cameras and their raw capability entries
pub trait CapabilitySource {
    /// Cameras in enumeration order, default camera first.
    fn cameras(&self) -> Result<Vec<Camera>, Error>;

    /// Raw capability entries of `camera` for `class`.
    ///
    /// An error only affects this camera and class; callers keep querying
    /// the remaining ones.
    fn capabilities(
        &self,
        camera: &Camera,
        class: CapabilityClass,
    ) -> Result<Vec<RawCapabilityEntry>, Error>;
}

impl<S: CapabilitySource + ?Sized> CapabilitySource for Box<S> {
    fn cameras(&self) -> Result<Vec<Camera>, Error> {
        (**self).cameras()
    }

    fn capabilities(
        &self,
        camera: &Camera,
        class: CapabilityClass,
    ) -> Result<Vec<RawCapabilityEntry>, Error> {
        (**self).capabilities(camera, class)
    }
}

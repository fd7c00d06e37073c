// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::CapabilitySource;
use crate::capability::{Camera, CapabilityClass, RawCapabilityEntry};
use crate::Error;

/// Capability source reading a JSON capability dump
///
/// ```json
/// {
///     "cameras": [
///         {
///             "name": "primary",
///             "id": 0,
///             "default": true,
///             "caps": {
///                 "image-capture": [{"width": 4000, "height": 3000}],
///                 "video-capture": [{"width": [1280, 1920], "height": 720,
///                                    "framerate": "30/1"}],
///                 "viewfinder": [{"width": 1280, "height": 960,
///                                 "framerate": {"min": "15/1", "max": "30/1"}}]
///             }
///         }
///     ]
/// }
/// ```
///
/// The camera marked `default` is listed first, the others keep file
/// order. `id` defaults to the position in the file. Class keys accept the
/// short name (`image`), the dashed name (`image-capture`) or the full
/// property name (`image-capture-supported-caps`). A camera without a key
/// for a class reports that class as unavailable.
#[derive(Debug, Clone)]
pub struct DumpSource {
    cameras: Vec<DumpCamera>,
}

#[derive(Debug, Deserialize)]
struct DumpFile {
    cameras: Vec<DumpCameraRecord>,
}

#[derive(Debug, Deserialize)]
struct DumpCameraRecord {
    name: String,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    default: bool,
    #[serde(default)]
    caps: BTreeMap<String, Vec<RawCapabilityEntry>>,
}

#[derive(Debug, Clone)]
struct DumpCamera {
    camera: Camera,
    caps: BTreeMap<CapabilityClass, Vec<RawCapabilityEntry>>,
}

impl DumpSource {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::debug!("Reading capability dump {}", path.display());
        fs::read_to_string(path)?.parse()
    }
}

impl FromStr for DumpSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let file: DumpFile = serde_json::from_str(s)?;

        let mut cameras = Vec::with_capacity(file.cameras.len());
        let mut default_camera = None;

        for (index, record) in file.cameras.into_iter().enumerate() {
            let mut caps = BTreeMap::new();
            for (key, entries) in record.caps {
                match CapabilityClass::from_name(&key) {
                    Some(class) => {
                        caps.insert(class, entries);
                    }
                    None => log::warn!(
                        "Ignoring unknown capability class '{}' of {}",
                        key,
                        record.name
                    ),
                }
            }

            if record.default && default_camera.is_none() {
                default_camera = Some(cameras.len());
            }

            cameras.push(DumpCamera {
                camera: Camera::new(record.id.unwrap_or(index as u32), record.name),
                caps,
            });
        }

        if let Some(pos) = default_camera {
            let camera = cameras.remove(pos);
            cameras.insert(0, camera);
        }

        Ok(DumpSource { cameras })
    }
}

impl CapabilitySource for DumpSource {
    fn cameras(&self) -> Result<Vec<Camera>, Error> {
        Ok(self.cameras.iter().map(|c| c.camera.clone()).collect())
    }

    fn capabilities(
        &self,
        camera: &Camera,
        class: CapabilityClass,
    ) -> Result<Vec<RawCapabilityEntry>, Error> {
        let dumped = self
            .cameras
            .iter()
            .find(|c| c.camera == *camera)
            .ok_or_else(|| Error::Unavailable(format!("camera {} not in dump", camera)))?;

        dumped.caps.get(&class).cloned().ok_or_else(|| {
            Error::Unavailable(format!(
                "{} not provided for {}",
                class.property_name(),
                camera
            ))
        })
    }
}

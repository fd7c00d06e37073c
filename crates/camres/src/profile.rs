// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Profile assembly
//!
//! Turns parsed per-camera resolutions into the two generated artifacts:
//!
//! - [`JsonProfile`] - camera → class → `{resolution, viewFinder, aspectRatio}`
//!   manifest consumed by the camera application
//! - [`HardwareProfile`] - flat key → value map used to fill the
//!   hardware-profile template
//!
//! # Hardware-profile keys
//!
//! Keys are built from a three letter camera key (first three characters of
//! the camera name, uppercased), the class prefix (`IMAGE`, `VIDEO`, `VF`)
//! and an aspect bucket (`43` or `169`):
//!
//! | Key | Value |
//! |-----|-------|
//! | `PRIIMAGE43RES` | largest 4:3 image resolution |
//! | `PRIIMAGE169RES` | largest 16:9 image resolution |
//! | `PRIVF43RES` | largest 4:3 viewfinder resolution fitting the screen |
//! | `PRIVF169RES` | largest 16:9 viewfinder resolution fitting the screen |
//! | `PRIVIDEO169RES` | largest 16:9 video resolution without framerate loss |
//! | `PRIVIDEO169FPS` | framerate of the chosen video resolution |
//! | `PRIISO` | supported ISO speeds |

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::aspect::{classify, AspectRatio};
use crate::capability::{CameraResolutions, CapabilityClass, Resolution};
use crate::iso::{iso_value, IsoSpeedSource};
use crate::screen::ScreenGeometry;
use crate::viewfinder::find_best_viewfinder;
use crate::Error;

/// Marker written when no viewfinder matches a resolution
pub const UNKNOWN: &str = "?:?";

/// One `{resolution, viewFinder, aspectRatio}` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonEntry {
    pub resolution: String,
    pub view_finder: String,
    pub aspect_ratio: String,
}

/// Entries of one capability class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonClass {
    pub key: String,
    pub entries: Vec<JsonEntry>,
}

/// Classes of one camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonCamera {
    pub key: String,
    pub classes: Vec<JsonClass>,
}

/// JSON manifest, keyed in camera and class encounter order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonProfile {
    pub cameras: Vec<JsonCamera>,
}

impl JsonProfile {
    /// Look up the entries for a camera and class key
    pub fn entries(&self, camera: &str, class: &str) -> Option<&[JsonEntry]> {
        self.cameras
            .iter()
            .find(|c| c.key == camera)?
            .classes
            .iter()
            .find(|c| c.key == class)
            .map(|c| c.entries.as_slice())
    }

    /// Render as pretty-printed JSON with four-space indentation
    pub fn to_json_string(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| Error::InvalidData(e.to_string()))
    }
}

impl Serialize for JsonProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cameras.len()))?;
        for camera in &self.cameras {
            map.serialize_entry(&camera.key, &ClassMap(&camera.classes))?;
        }
        map.end()
    }
}

struct ClassMap<'a>(&'a [JsonClass]);

impl Serialize for ClassMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for class in self.0 {
            map.serialize_entry(&class.key, &class.entries)?;
        }
        map.end()
    }
}

/// JSON key of a camera: first word of its name, lowercased
pub fn json_camera_key(name: &str) -> String {
    name.split(' ').next().unwrap_or_default().to_lowercase()
}

/// Build the JSON manifest.
///
/// Cameras without any resolution are omitted, as are the viewfinder class
/// (it only feeds the viewfinder lookup) and empty classes. Within a class
/// framerates are stripped and the resulting base resolutions deduplicated.
pub fn build_json(cameras: &[CameraResolutions], screen: &ScreenGeometry) -> JsonProfile {
    let mut profile = JsonProfile::default();

    for cam in cameras {
        if cam.is_empty() {
            log::debug!("Omitting {} from JSON, no resolutions", cam.camera);
            continue;
        }

        let key = json_camera_key(&cam.camera.name);
        if profile.cameras.iter().any(|c| c.key == key) {
            log::warn!("Duplicate camera key {} in JSON output", key);
        }

        let mut classes = Vec::new();
        for class in &cam.classes {
            if class.class.is_viewfinder() || class.resolutions.is_empty() {
                continue;
            }

            let mut seen: Vec<Resolution> = Vec::new();
            let mut entries = Vec::new();
            for res in &class.resolutions {
                let base = res.base();
                if seen.contains(&base) {
                    continue;
                }
                seen.push(base);

                let view_finder = find_best_viewfinder(&base, &cam.classes, screen)
                    .map_or_else(|| UNKNOWN.to_string(), |vf| vf.to_string());

                entries.push(JsonEntry {
                    resolution: base.to_string(),
                    view_finder,
                    aspect_ratio: classify(&base).to_string(),
                });
            }

            classes.push(JsonClass {
                key: class.class.short_name().to_string(),
                entries,
            });
        }

        profile.cameras.push(JsonCamera { key, classes });
    }

    profile
}

/// Hardware-profile bucket of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    FourThree,
    SixteenNine,
}

impl Bucket {
    fn suffix(&self) -> &'static str {
        match self {
            Bucket::FourThree => "43",
            Bucket::SixteenNine => "169",
        }
    }

    /// Buckets a class can fill
    fn for_class(class: CapabilityClass) -> &'static [Bucket] {
        if class.is_video() {
            &[Bucket::SixteenNine]
        } else {
            &[Bucket::FourThree, Bucket::SixteenNine]
        }
    }

    /// Video only takes 16:9; image and viewfinder take 4:3, then 16:9.
    fn of(class: CapabilityClass, aspect: AspectRatio) -> Option<Bucket> {
        if aspect == AspectRatio::FOUR_THREE && !class.is_video() {
            Some(Bucket::FourThree)
        } else if aspect == AspectRatio::SIXTEEN_NINE {
            Some(Bucket::SixteenNine)
        } else {
            None
        }
    }
}

/// Running best candidate of a bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pick {
    area: u64,
    framerate: u32,
}

impl Pick {
    /// A candidate replaces the best only if it loses on neither area nor
    /// framerate.
    fn supersedes(&self, best: Option<&Pick>) -> bool {
        match best {
            None => true,
            Some(best) => self.area >= best.area && self.framerate >= best.framerate,
        }
    }
}

/// Flat key → value map filling the hardware-profile template
///
/// Keys are stored without the surrounding `@`. A key with an empty value
/// was expected but never resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HardwareProfile {
    values: BTreeMap<String, String>,
}

impl HardwareProfile {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// All keys in sorted order, including unresolved ones
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys that never received a value
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn expect(&mut self, key: String) {
        self.values.entry(key).or_default();
    }

    fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }
}

/// Hardware-profile key of a camera: first three characters, uppercased
pub fn camera_key(name: &str) -> String {
    name.chars().take(3).collect::<String>().to_uppercase()
}

/// Build the hardware-profile map.
///
/// For every camera with resolutions, each class fills its aspect buckets
/// with the largest candidate. Viewfinder candidates must fit `screen`.
/// Video candidates need a framerate and may not lower the bucket's
/// framerate: `1280x720@60/1` followed by `1920x1080@30/1` keeps
/// `1280x720`.
pub fn build_hardware_profile(
    cameras: &[CameraResolutions],
    screen: &ScreenGeometry,
    iso: &dyn IsoSpeedSource,
) -> HardwareProfile {
    let mut profile = HardwareProfile::default();

    for (index, cam) in cameras.iter().enumerate() {
        if cam.is_empty() {
            continue;
        }

        let cam_key = camera_key(&cam.camera.name);
        profile.set(format!("{}ISO", cam_key), iso_value(iso.iso_speeds(index)));

        for class in &cam.classes {
            let prefix = format!("{}{}", cam_key, class.class.profile_prefix());
            let is_video = class.class.is_video();

            for bucket in Bucket::for_class(class.class) {
                profile.expect(format!("{}{}RES", prefix, bucket.suffix()));
                if is_video {
                    profile.expect(format!("{}{}FPS", prefix, bucket.suffix()));
                }
            }

            let mut best: BTreeMap<Bucket, Pick> = BTreeMap::new();

            for res in &class.resolutions {
                if class.class.is_viewfinder() && !screen.fits(res) {
                    continue;
                }

                let Some(bucket) = Bucket::of(class.class, classify(res)) else {
                    continue;
                };

                let framerate = if is_video {
                    match res.rate.and_then(|r| r.top_fps()) {
                        Some(fps) => fps,
                        None => {
                            log::debug!("Skipping video resolution {} without framerate", res);
                            continue;
                        }
                    }
                } else {
                    0
                };

                let candidate = Pick {
                    area: res.area(),
                    framerate,
                };
                if !candidate.supersedes(best.get(&bucket)) {
                    continue;
                }

                best.insert(bucket, candidate);
                profile.set(
                    format!("{}{}RES", prefix, bucket.suffix()),
                    res.base().to_string(),
                );
                if is_video {
                    profile.set(
                        format!("{}{}FPS", prefix, bucket.suffix()),
                        framerate.to_string(),
                    );
                }
            }
        }
    }

    profile
}

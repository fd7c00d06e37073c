// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! ISO speed discovery
//!
//! The droid camera source keeps per-camera settings in INI files named
//! `gstdroidcamsrc-<index>.conf`. The keys of their `[iso-speed]` group are
//! the ISO speeds the sensor supports.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory of the droid camera source configuration files
pub const DEFAULT_CONF_DIR: &str = "/etc/gst-droid";

/// ISO list used when a camera reports none
pub const DEFAULT_ISO_SPEEDS: &str = "[0, 100, 200, 400]";

const ISO_GROUP: &str = "iso-speed";

/// Provides the supported ISO speeds of a camera, by enumeration index.
pub trait IsoSpeedSource {
    fn iso_speeds(&self, camera_index: usize) -> Option<Vec<String>>;
}

impl<F> IsoSpeedSource for F
where
    F: Fn(usize) -> Option<Vec<String>>,
{
    fn iso_speeds(&self, camera_index: usize) -> Option<Vec<String>> {
        self(camera_index)
    }
}

/// Source reporting no ISO speeds, so every camera gets the default list
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIsoSpeeds;

impl IsoSpeedSource for NoIsoSpeeds {
    fn iso_speeds(&self, _camera_index: usize) -> Option<Vec<String>> {
        None
    }
}

/// ISO speeds read from droid camera source configuration files
#[derive(Debug, Clone)]
pub struct DroidConfIso {
    dir: PathBuf,
}

impl Default for DroidConfIso {
    fn default() -> Self {
        Self::new(DEFAULT_CONF_DIR)
    }
}

impl DroidConfIso {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DroidConfIso { dir: dir.into() }
    }

    /// Path of the configuration file for `camera_index`
    pub fn conf_path(&self, camera_index: usize) -> PathBuf {
        self.dir.join(format!("gstdroidcamsrc-{}.conf", camera_index))
    }
}

impl IsoSpeedSource for DroidConfIso {
    fn iso_speeds(&self, camera_index: usize) -> Option<Vec<String>> {
        let path = self.conf_path(camera_index);
        read_iso_speeds(&path)
    }
}

fn read_iso_speeds(path: &Path) -> Option<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("No ISO configuration at {}: {}", path.display(), e);
            return None;
        }
    };

    let keys = group_keys(&content, ISO_GROUP);
    if keys.is_empty() {
        log::debug!("No ISO speeds listed in {}", path.display());
        return None;
    }

    log::debug!("Found {} ISO speeds in {}", keys.len(), path.display());
    Some(keys)
}

/// Keys of `[group]` in INI-formatted `content`, in file order.
///
/// Only keys are read. Keys are taken verbatim: quoted keys are not
/// unescaped and backslash line continuations are not joined, so a value
/// continued onto the next line shows up as an extra key.
fn group_keys(content: &str, group: &str) -> Vec<String> {
    let mut in_group = false;
    let mut keys = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_group = name.trim() == group;
            continue;
        }

        if in_group {
            let key = line.split_once('=').map_or(line, |(k, _)| k).trim();
            if !key.is_empty() && !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }

    keys
}

/// Sort ISO speeds numerically ascending. Non-numeric entries sort after
/// the numeric ones, lexically.
pub fn sort_numeric(speeds: &mut [String]) {
    speeds.sort_by(|a, b| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    });
}

/// Hardware-profile value for a camera's ISO speeds: `[a, b, c]` sorted
/// numerically, or [`DEFAULT_ISO_SPEEDS`] when none are known.
pub fn iso_value(speeds: Option<Vec<String>>) -> String {
    match speeds {
        Some(mut speeds) if !speeds.is_empty() => {
            sort_numeric(&mut speeds);
            format!("[{}]", speeds.join(", "))
        }
        _ => DEFAULT_ISO_SPEEDS.to_string(),
    }
}

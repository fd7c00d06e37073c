// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

use v4l::capability::Flags as CapFlags;
use v4l::format::description::Flags as FormatFlags;
use v4l::frameinterval::FrameIntervalEnum;
use v4l::framesize::FrameSizeEnum;
use v4l::video::Capture;
use v4l::{Device, FourCC};

use super::CapabilitySource;
use crate::capability::{Camera, CapabilityClass, Field, Fraction, Framerate, RawCapabilityEntry};
use crate::Error;

/// Resolutions sampled from stepwise and continuous frame size ranges
const COMMON_SIZES: &[(u32, u32)] = &[
    (320, 240),
    (640, 480),
    (800, 600),
    (1024, 768),
    (1280, 720),
    (1280, 960),
    (1920, 1080),
    (2560, 1440),
    (2592, 1944),
    (3840, 2160),
    (4000, 3000),
];

/// Capability source backed by V4L2 capture devices
///
/// Every `/dev/videoN` node advertising `VIDEO_CAPTURE` is a camera, ordered
/// by node index so the lowest node is the default camera. The camera id is
/// the node index and the name is the driver's card name.
///
/// The viewfinder class lists the uncompressed formats only; image and
/// video capture list every format.
#[derive(Debug, Clone, Copy, Default)]
pub struct V4l2Source;

impl V4l2Source {
    pub fn new() -> Self {
        V4l2Source
    }
}

impl CapabilitySource for V4l2Source {
    fn cameras(&self) -> Result<Vec<Camera>, Error> {
        let mut nodes = v4l::context::enum_devices();
        nodes.sort_by_key(|node| node.index());

        let mut cameras = Vec::new();
        for node in nodes {
            let path = node.path().to_path_buf();
            let device = match Device::with_path(&path) {
                Ok(device) => device,
                Err(e) => {
                    log::debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            let caps = match device.query_caps() {
                Ok(caps) => caps,
                Err(e) => {
                    log::debug!("Failed to query {}: {}", path.display(), e);
                    continue;
                }
            };

            if !caps.capabilities.contains(CapFlags::VIDEO_CAPTURE) {
                log::debug!("{} is not a capture device", path.display());
                continue;
            }

            let name = if caps.card.is_empty() {
                node.name().unwrap_or_else(|| path.display().to_string())
            } else {
                caps.card
            };

            log::debug!("Found camera {} at {}", name, path.display());
            cameras.push(Camera::new(node.index() as u32, name));
        }

        Ok(cameras)
    }

    fn capabilities(
        &self,
        camera: &Camera,
        class: CapabilityClass,
    ) -> Result<Vec<RawCapabilityEntry>, Error> {
        let device = Device::new(camera.id as usize)?;

        let formats = device.enum_formats()?;
        let mut entries = Vec::new();

        for format in formats {
            if class.is_viewfinder() && format.flags.contains(FormatFlags::COMPRESSED) {
                continue;
            }

            let sizes = match device.enum_framesizes(format.fourcc) {
                Ok(sizes) => sizes,
                Err(e) => {
                    log::debug!(
                        "Failed to enumerate frame sizes of {} for {}: {}",
                        format.fourcc,
                        camera,
                        e
                    );
                    continue;
                }
            };

            for size in sizes {
                for (width, height) in frame_sizes(&size.size) {
                    let framerates = framerates(&device, format.fourcc, width, height);
                    let mut entry = RawCapabilityEntry::sized(width, height);
                    if !framerates.is_empty() {
                        entry = entry.with_framerate(Field::List(framerates));
                    }
                    entries.push(entry);
                }
            }
        }

        log::debug!(
            "{} {} entries for {}",
            entries.len(),
            class.short_name(),
            camera
        );

        Ok(entries)
    }
}

fn frame_sizes(size: &FrameSizeEnum) -> Vec<(u32, u32)> {
    match size {
        FrameSizeEnum::Discrete(discrete) => vec![(discrete.width, discrete.height)],
        FrameSizeEnum::Stepwise(stepwise) => COMMON_SIZES
            .iter()
            .copied()
            .filter(|&(w, h)| {
                w >= stepwise.min_width
                    && w <= stepwise.max_width
                    && h >= stepwise.min_height
                    && h <= stepwise.max_height
            })
            .collect(),
    }
}

/// Framerates of a frame size, as frames per second.
///
/// V4L2 reports frame intervals (seconds per frame), so each fraction is
/// inverted. A stepwise interval becomes a range from the slowest to the
/// fastest rate.
fn framerates(device: &Device, fourcc: FourCC, width: u32, height: u32) -> Vec<Framerate> {
    let intervals = match device.enum_frameintervals(fourcc, width, height) {
        Ok(intervals) => intervals,
        Err(e) => {
            log::debug!(
                "Failed to enumerate frame intervals for {}x{}: {}",
                width,
                height,
                e
            );
            return Vec::new();
        }
    };

    intervals
        .into_iter()
        .filter_map(|interval| match interval.interval {
            FrameIntervalEnum::Discrete(frac) => {
                interval_to_rate(frac.numerator, frac.denominator).map(Framerate::Fraction)
            }
            FrameIntervalEnum::Stepwise(stepwise) => {
                let min = interval_to_rate(stepwise.max.numerator, stepwise.max.denominator)?;
                let max = interval_to_rate(stepwise.min.numerator, stepwise.min.denominator)?;
                Some(Framerate::Range { min, max })
            }
        })
        .collect()
}

fn interval_to_rate(numerator: u32, denominator: u32) -> Option<Fraction> {
    if numerator == 0 || denominator == 0 {
        return None;
    }
    Some(Fraction::new(denominator, numerator))
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Plain-text resolution report

use std::fmt::Write;

use crate::aspect::classify;
use crate::capability::CameraResolutions;

/// Render the plain-text resolution report.
///
/// ```text
/// Resolutions for primary:
/// image resolutions:
/// 4000x3000 (4:3)
/// video resolutions:
/// 1920x1080@30/1 (16:9)
/// ```
///
/// Cameras and classes without resolutions are logged as warnings and left
/// out of the report.
pub fn render(cameras: &[CameraResolutions]) -> String {
    let mut out = String::new();

    for cam in cameras {
        if cam.is_empty() {
            log::warn!("No resolutions found for {}", cam.camera);
            continue;
        }

        let _ = writeln!(out, "Resolutions for {}:", cam.camera.name);

        for class in &cam.classes {
            if class.resolutions.is_empty() {
                log::warn!(
                    "No {} resolutions found for {}",
                    class.class.short_name(),
                    cam.camera
                );
                continue;
            }

            let _ = writeln!(out, "{} resolutions:", class.class.short_name());
            for res in &class.resolutions {
                let _ = writeln!(out, "{} ({})", res, classify(res));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Camera, CapabilityClass, ClassResolutions, Resolution};

    #[test]
    fn test_render_report() {
        let cameras = vec![
            CameraResolutions {
                camera: Camera::new(0, "primary"),
                classes: vec![
                    ClassResolutions {
                        class: CapabilityClass::ImageCapture,
                        resolutions: vec![Resolution::new(640, 480), Resolution::new(250, 100)],
                    },
                    ClassResolutions {
                        class: CapabilityClass::VideoCapture,
                        resolutions: Vec::new(),
                    },
                    ClassResolutions {
                        class: CapabilityClass::Viewfinder,
                        resolutions: vec!["1280x720@30/1".parse().unwrap()],
                    },
                ],
            },
            CameraResolutions {
                camera: Camera::new(1, "secondary"),
                classes: Vec::new(),
            },
        ];

        assert_eq!(
            render(&cameras),
            "Resolutions for primary:\n\
             image resolutions:\n\
             640x480 (4:3)\n\
             250x100 (?:?)\n\
             viewfinder resolutions:\n\
             1280x720@30/1 (16:9)\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "");
    }
}

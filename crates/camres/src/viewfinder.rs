// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Viewfinder selection
//!
//! Pairs a capture resolution with the first viewfinder resolution of the
//! same aspect ratio that fits the screen.

use crate::aspect::classify;
use crate::capability::{ClassResolutions, Resolution};
use crate::screen::ScreenGeometry;

/// Find the viewfinder resolution to pair with a capture resolution.
///
/// Walks the viewfinder classes of `classes` in parser order and returns the
/// first candidate that fits `screen` (see [`ScreenGeometry::fits`]) and has
/// the same aspect label as `target`. The framerate of the result is
/// stripped.
///
/// Returns `None`, after logging an error, when no candidate qualifies.
/// Callers render that as the unknown marker `?:?`.
pub fn find_best_viewfinder(
    target: &Resolution,
    classes: &[ClassResolutions],
    screen: &ScreenGeometry,
) -> Option<Resolution> {
    let wanted = classify(target);

    let found = classes
        .iter()
        .filter(|c| c.class.is_viewfinder())
        .flat_map(|c| c.resolutions.iter())
        .find(|candidate| screen.fits(candidate) && classify(candidate) == wanted)
        .map(Resolution::base);

    if found.is_none() {
        log::error!("Could not find viewfinder for {}", target);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{CapabilityClass, Fraction, Rate};

    fn at30(w: u32, h: u32) -> Resolution {
        Resolution::new(w, h).with_rate(Rate::Single(Fraction::new(30, 1)))
    }

    fn classes(viewfinder: Vec<Resolution>) -> Vec<ClassResolutions> {
        vec![
            ClassResolutions {
                class: CapabilityClass::ImageCapture,
                resolutions: vec![Resolution::new(640, 480), Resolution::new(4000, 3000)],
            },
            ClassResolutions {
                class: CapabilityClass::Viewfinder,
                resolutions: viewfinder,
            },
        ]
    }

    #[test]
    fn test_first_fit_with_matching_aspect() {
        let classes = classes(vec![at30(1920, 1080), at30(1280, 960), at30(640, 480)]);
        let screen = ScreenGeometry::new(1080, 1920);

        let vf = find_best_viewfinder(&Resolution::new(4000, 3000), &classes, &screen);
        // First fit in parser order, not the largest
        assert_eq!(vf, Some(Resolution::new(1280, 960)));

        let vf = find_best_viewfinder(&Resolution::new(3840, 2160), &classes, &screen);
        assert_eq!(vf, Some(Resolution::new(1920, 1080)));
    }

    #[test]
    fn test_candidates_larger_than_screen_rejected() {
        let classes = classes(vec![at30(1440, 1080), at30(800, 600)]);
        let screen = ScreenGeometry::new(720, 1280);

        let vf = find_best_viewfinder(&Resolution::new(640, 480), &classes, &screen);
        assert_eq!(vf, Some(Resolution::new(800, 600)));
    }

    #[test]
    fn test_only_viewfinder_class_considered() {
        // The image class holds a 4:3 resolution that would fit
        let classes = classes(vec![at30(1920, 1080)]);
        let screen = ScreenGeometry::new(1080, 1920);

        assert_eq!(
            find_best_viewfinder(&Resolution::new(640, 480), &classes, &screen),
            None
        );
    }

    #[test]
    fn test_no_viewfinder_class() {
        let classes = vec![ClassResolutions {
            class: CapabilityClass::VideoCapture,
            resolutions: vec![at30(640, 480)],
        }];
        let screen = ScreenGeometry::new(1080, 1920);

        assert_eq!(
            find_best_viewfinder(&Resolution::new(640, 480), &classes, &screen),
            None
        );
    }

    #[test]
    fn test_result_always_fits_screen() {
        let candidates: Vec<Resolution> = [
            (4000, 3000),
            (2560, 1440),
            (1920, 1080),
            (1440, 1080),
            (1280, 720),
            (960, 720),
            (640, 480),
            (320, 240),
        ]
        .iter()
        .map(|&(w, h)| at30(w, h))
        .collect();
        let classes = classes(candidates.clone());

        for screen in [
            ScreenGeometry::new(480, 854),
            ScreenGeometry::new(1080, 1920),
            ScreenGeometry::new(1920, 1080),
            ScreenGeometry::new(300, 300),
        ] {
            for target in &candidates {
                if let Some(vf) = find_best_viewfinder(target, &classes, &screen) {
                    assert!(screen.fits(&vf), "{} does not fit {}", vf, screen);
                    assert_eq!(classify(&vf), classify(target));
                    assert!(vf.rate.is_none());
                }
            }
        }
    }
}

// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Capability parser
//!
//! Expands raw capability entries into a flat, ordered and deduplicated list
//! of [`Resolution`]s. Every (width, height, framerate) combination of an
//! entry is visited in that nesting order; a framerate range is kept whole
//! rather than expanded.

use crate::capability::{Framerate, Rate, RawCapabilityEntry, Resolution};

/// Parse raw capability entries into normalized resolutions.
///
/// - Entries without a width or a height are skipped.
/// - A missing framerate or an empty framerate list yields a bare `WxH`
///   resolution.
/// - An unrecognized framerate is logged and degrades to `WxH`.
/// - Duplicates are dropped, the first occurrence keeps its position.
///
/// # Example
///
/// ```
/// use camres::capability::{Fraction, Framerate, RawCapabilityEntry};
/// use camres::parser::parse;
///
/// let entry = RawCapabilityEntry::new(vec![640, 1280], vec![480, 720])
///     .with_framerate(Framerate::Fraction(Fraction::new(30, 1)));
/// let res: Vec<String> = parse(&[entry]).iter().map(|r| r.to_string()).collect();
/// assert_eq!(
///     res,
///     ["640x480@30/1", "640x720@30/1", "1280x480@30/1", "1280x720@30/1"]
/// );
/// ```
pub fn parse(entries: &[RawCapabilityEntry]) -> Vec<Resolution> {
    let mut res: Vec<Resolution> = Vec::new();

    for entry in entries {
        let (Some(width), Some(height)) = (&entry.width, &entry.height) else {
            log::debug!("Skipping capability entry without width or height");
            continue;
        };

        for &w in width.values() {
            for &h in height.values() {
                match entry.framerate.as_ref().map(|f| f.values()) {
                    None => push_unique(&mut res, Resolution::new(w, h)),
                    Some([]) => {
                        log::warn!("Empty framerate list for {}x{}", w, h);
                        push_unique(&mut res, Resolution::new(w, h));
                    }
                    Some(rates) => {
                        for rate in rates {
                            push_unique(&mut res, render(w, h, rate));
                        }
                    }
                }
            }
        }
    }

    res
}

fn render(width: u32, height: u32, rate: &Framerate) -> Resolution {
    let res = Resolution::new(width, height);
    match rate {
        Framerate::Fraction(f) => res.with_rate(Rate::Single(*f)),
        Framerate::Range { min, max } => res.with_rate(Rate::Range {
            min: *min,
            max: *max,
        }),
        Framerate::Unrecognized(value) => {
            log::warn!(
                "Unknown framerate type {} for {}x{}",
                value,
                width,
                height
            );
            res
        }
    }
}

fn push_unique(res: &mut Vec<Resolution>, item: Resolution) {
    if !res.contains(&item) {
        res.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Field, Fraction};
    use rand::Rng;

    fn fps(n: u32, d: u32) -> Framerate {
        Framerate::Fraction(Fraction::new(n, d))
    }

    fn strings(res: &[Resolution]) -> Vec<String> {
        res.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_parse_scalar_entry() {
        let entry = RawCapabilityEntry::new(1920, 1080).with_framerate(fps(30, 1));
        assert_eq!(strings(&parse(&[entry])), ["1920x1080@30/1"]);
    }

    #[test]
    fn test_parse_range_not_expanded() {
        let entry = RawCapabilityEntry::new(640, 480).with_framerate(Framerate::Range {
            min: Fraction::new(1, 1),
            max: Fraction::new(30, 1),
        });
        assert_eq!(strings(&parse(&[entry])), ["640x480@1/1-30/1"]);
    }

    #[test]
    fn test_parse_without_framerate() {
        let entry = RawCapabilityEntry::sized(320, 240);
        assert_eq!(strings(&parse(&[entry])), ["320x240"]);
    }

    #[test]
    fn test_parse_empty_framerate_list_degrades() {
        let entry: RawCapabilityEntry =
            serde_json::from_str(r#"{"width": 640, "height": 480, "framerate": []}"#).unwrap();
        assert_eq!(strings(&parse(&[entry])), ["640x480"]);

        let entry = RawCapabilityEntry::new(vec![640, 320], 240)
            .with_framerate(Vec::<Framerate>::new());
        assert_eq!(strings(&parse(&[entry])), ["640x240", "320x240"]);
    }

    #[test]
    fn test_parse_unrecognized_framerate_degrades() {
        let entry = RawCapabilityEntry::new(320, 240)
            .with_framerate(Framerate::Unrecognized(serde_json::json!(true)));
        assert_eq!(strings(&parse(&[entry])), ["320x240"]);
    }

    #[test]
    fn test_parse_framerate_list_order() {
        let entry = RawCapabilityEntry::new(vec![640, 320], 480)
            .with_framerate(vec![fps(30, 1), fps(15, 1)]);
        assert_eq!(
            strings(&parse(&[entry])),
            ["640x480@30/1", "640x480@15/1", "320x480@30/1", "320x480@15/1"]
        );
    }

    #[test]
    fn test_parse_skips_incomplete_entries() {
        let no_height = RawCapabilityEntry {
            width: Some(Field::Scalar(640)),
            ..Default::default()
        };
        let no_width = RawCapabilityEntry {
            height: Some(Field::Scalar(480)),
            ..Default::default()
        };
        let neither = RawCapabilityEntry::default();
        assert!(parse(&[no_height, no_width, neither]).is_empty());
    }

    #[test]
    fn test_parse_empty_list_contributes_nothing() {
        let entry = RawCapabilityEntry::new(Vec::<u32>::new(), 480);
        assert!(parse(&[entry]).is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse(&[]).is_empty());
    }

    #[test]
    fn test_parse_deduplicates_across_entries() {
        let a = RawCapabilityEntry::new(640, 480).with_framerate(fps(30, 1));
        let b = RawCapabilityEntry::new(vec![1280, 640], 480).with_framerate(fps(30, 1));
        assert_eq!(
            strings(&parse(&[a, b])),
            ["640x480@30/1", "1280x480@30/1"]
        );
    }

    #[test]
    fn test_parse_same_size_different_rate_kept() {
        let a = RawCapabilityEntry::new(640, 480).with_framerate(fps(30, 1));
        let b = RawCapabilityEntry::sized(640, 480);
        assert_eq!(strings(&parse(&[a, b])), ["640x480@30/1", "640x480"]);
    }

    #[test]
    fn test_parse_list_expansion_bounded_and_unique() {
        let mut rng = rand::rng();

        for _ in 0..50 {
            let widths: Vec<u32> = (0..rng.random_range(1..6))
                .map(|_| rng.random_range(1..5) * 320)
                .collect();
            let heights: Vec<u32> = (0..rng.random_range(1..6))
                .map(|_| rng.random_range(1..5) * 240)
                .collect();
            let (m, n) = (widths.len(), heights.len());

            let entry = RawCapabilityEntry::new(widths, heights).with_framerate(fps(30, 1));
            let entries = [entry];
            let res = parse(&entries);

            assert!(res.len() <= m * n);
            for (i, r) in res.iter().enumerate() {
                assert!(!res[i + 1..].contains(r), "duplicate {}", r);
                assert_eq!(r.rate, Some(Rate::Single(Fraction::new(30, 1))));
            }

            // Parsing is deterministic
            assert_eq!(parse(&entries), res);
        }
    }
}

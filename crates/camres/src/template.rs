// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Hardware-profile template substitution
//!
//! A template is plain text containing `@KEY@` placeholders, where `KEY`
//! consists of uppercase ASCII letters, digits and underscores. Every
//! placeholder with a resolved [`HardwareProfile`] value is replaced; the
//! rest stay in place and are reported.

use std::fs;
use std::path::Path;

use crate::profile::HardwareProfile;
use crate::Error;

/// Default location of the hardware-profile template
pub const DEFAULT_TEMPLATE: &str = "/usr/share/droid-camres/jolla-camera-hw-template.txt";

/// Template lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    lines: Vec<String>,
}

/// Result of filling a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filled {
    /// Substituted lines
    pub lines: Vec<String>,
    /// Placeholders left in the output, with their `@` delimiters, in order
    /// of first appearance
    pub unresolved: Vec<String>,
}

impl Filled {
    /// Output text, one line per template line
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

impl Template {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        Template {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Substitute every resolved key of `profile`.
    ///
    /// Keys without a value are logged as errors and their placeholders are
    /// left untouched, as is any placeholder the profile has no key for.
    pub fn fill(&self, profile: &HardwareProfile) -> Filled {
        let mut lines = self.lines.clone();

        for (key, value) in profile.iter() {
            if value.is_empty() {
                log::error!(
                    "Not found suitable resolution for @{}@. Check output!",
                    key
                );
                continue;
            }

            let token = format!("@{}@", key);
            for line in lines.iter_mut() {
                if line.contains(&token) {
                    *line = line.replace(&token, value);
                }
            }
        }

        let mut unresolved: Vec<String> = Vec::new();
        for line in &lines {
            for token in placeholders(line) {
                if !unresolved.iter().any(|t| t == token) {
                    unresolved.push(token.to_string());
                }
            }
        }

        for token in &unresolved {
            log::warn!("Placeholder {} left unreplaced", token);
        }

        Filled { lines, unresolved }
    }
}

/// `@KEY@` placeholders of `line`, delimiters included
pub fn placeholders(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut found = Vec::new();
    let mut start = 0;

    while let Some(offset) = line[start..].find('@') {
        let open = start + offset;
        let key_len = bytes[open + 1..]
            .iter()
            .take_while(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || **b == b'_')
            .count();
        let close = open + 1 + key_len;

        if key_len > 0 && bytes.get(close) == Some(&b'@') {
            found.push(&line[open..=close]);
            start = close + 1;
        } else {
            start = open + 1;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Camera, CameraResolutions, CapabilityClass, ClassResolutions};
    use crate::iso::NoIsoSpeeds;
    use crate::profile::build_hardware_profile;
    use crate::screen::ScreenGeometry;

    fn profile() -> HardwareProfile {
        let cameras = vec![CameraResolutions {
            camera: Camera::new(0, "primary"),
            classes: vec![
                ClassResolutions {
                    class: CapabilityClass::ImageCapture,
                    resolutions: vec!["4000x3000".parse().unwrap()],
                },
                ClassResolutions {
                    class: CapabilityClass::VideoCapture,
                    resolutions: vec!["640x480@30/1".parse().unwrap()],
                },
            ],
        }];
        build_hardware_profile(&cameras, &ScreenGeometry::new(1080, 1920), &NoIsoSpeeds)
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("a=@PRIIMAGE43RES@"), ["@PRIIMAGE43RES@"]);
        assert_eq!(placeholders("@A@@B@"), ["@A@", "@B@"]);
        assert_eq!(placeholders("user@host @X_1@"), ["@X_1@"]);
        assert!(placeholders("mail@example.com").is_empty());
        assert!(placeholders("@@").is_empty());
        assert!(placeholders("@lower@").is_empty());
    }

    #[test]
    fn test_fill_resolved_keys() {
        let template = Template::parse(
            "[/apps/jolla-camera/primary/image]\n\
             imageResolution=@PRIIMAGE43RES@\n\
             iso=@PRIISO@\n",
        );

        let filled = template.fill(&profile());
        assert_eq!(
            filled.lines,
            [
                "[/apps/jolla-camera/primary/image]",
                "imageResolution=4000x3000",
                "iso=[0, 100, 200, 400]",
            ]
        );
        assert!(filled.unresolved.is_empty());
        assert_eq!(
            filled.to_text(),
            "[/apps/jolla-camera/primary/image]\nimageResolution=4000x3000\niso=[0, 100, 200, 400]\n"
        );
    }

    #[test]
    fn test_unresolved_left_in_place() {
        let template = Template::parse(
            "videoResolution=@PRIVIDEO169RES@\n\
             videoFps=@PRIVIDEO169FPS@\n\
             front=@CAM0VIDEO169RES@\n",
        );

        let filled = template.fill(&profile());
        assert_eq!(filled.lines[0], "videoResolution=@PRIVIDEO169RES@");
        assert_eq!(filled.lines[2], "front=@CAM0VIDEO169RES@");
        assert_eq!(
            filled.unresolved,
            ["@PRIVIDEO169RES@", "@PRIVIDEO169FPS@", "@CAM0VIDEO169RES@"]
        );
    }

    #[test]
    fn test_read_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.txt");
        fs::write(&path, "a=@PRIISO@\nb\n").unwrap();

        let template = Template::read(&path).unwrap();
        assert_eq!(template.lines(), ["a=@PRIISO@", "b"]);
        assert!(Template::read(dir.path().join("missing.txt")).is_err());
    }
}

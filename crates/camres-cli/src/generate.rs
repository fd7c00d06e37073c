// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Au-Zone Technologies

//! Resolution discovery and output generation.

use std::fs;
use std::path::{Path, PathBuf};

use camres::capability::{CameraResolutions, CapabilityClass};
use camres::iso::{DroidConfIso, DEFAULT_CONF_DIR};
use camres::profile::{build_hardware_profile, build_json};
use camres::screen::{ScreenGeometry, FRAMEBUFFER_SIZE};
use camres::source::{CapabilitySource, DumpSource, V4l2Source};
use camres::template::{Template, DEFAULT_TEMPLATE};
use camres::{collect, report};
use clap::Args as ClapArgs;

use crate::error::CliError;

/// Default JSON manifest file name
const DEFAULT_JSON: &str = "camera-resolutions.json";

/// Default hardware profile file name
const DEFAULT_HW_PROFILE: &str = "jolla-camera-hw.txt";

#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Generate the JSON resolution manifest
    #[arg(
        short = 'o',
        long = "json",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_JSON
    )]
    json: Option<PathBuf>,

    /// Generate the hardware profile from the template
    #[arg(
        short = 'w',
        long = "hw-profile",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_HW_PROFILE
    )]
    hw_profile: Option<PathBuf>,

    /// Hardware profile template
    #[arg(long, value_name = "FILE", default_value = DEFAULT_TEMPLATE)]
    template: PathBuf,

    /// Screen geometry (e.g., 1080x1920), read from the framebuffer if omitted
    #[arg(long, value_name = "WxH")]
    screen: Option<ScreenGeometry>,

    /// Read capabilities from a JSON dump instead of V4L2 devices
    #[arg(long, value_name = "FILE")]
    caps: Option<PathBuf>,

    /// Directory of gstdroidcamsrc-N.conf ISO configuration files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CONF_DIR)]
    iso_dir: PathBuf,

    /// Fail if any camera reports no resolutions
    #[arg(long)]
    strict: bool,
}

pub fn execute(args: Args) -> Result<(), CliError> {
    log::debug!("Executing generate: {:?}", args);

    let source: Box<dyn CapabilitySource> = match &args.caps {
        Some(path) => Box::new(DumpSource::from_file(path).map_err(|e| {
            CliError::InvalidArgs(format!(
                "Failed to read capability dump {}: {}",
                path.display(),
                e
            ))
        })?),
        None => Box::new(V4l2Source::new()),
    };

    let cameras = collect(&source, CapabilityClass::ALL)?;

    print!("{}", report::render(&cameras));

    if args.strict {
        check_strict(&cameras)?;
    }

    if args.json.is_none() && args.hw_profile.is_none() {
        return Ok(());
    }

    let screen = screen_geometry(args.screen)?;
    log::debug!("Screen geometry {}", screen);

    let mut failures = Vec::new();

    if let Some(path) = &args.json {
        if let Err(e) = write_json(&cameras, &screen, path) {
            log::error!("{}", e);
            failures.push(e);
        }
    }

    if let Some(path) = &args.hw_profile {
        if let Err(e) = write_hw_profile(&cameras, &screen, &args, path) {
            log::error!("{}", e);
            failures.push(e);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::Output(failures.join("; ")))
    }
}

fn check_strict(cameras: &[CameraResolutions]) -> Result<(), CliError> {
    let empty: Vec<&str> = cameras
        .iter()
        .filter(|c| c.is_empty())
        .map(|c| c.camera.name.as_str())
        .collect();

    if empty.is_empty() {
        Ok(())
    } else {
        Err(CliError::NoResolutions(empty.join(", ")))
    }
}

fn screen_geometry(screen: Option<ScreenGeometry>) -> Result<ScreenGeometry, CliError> {
    if let Some(screen) = screen {
        return Ok(screen);
    }

    ScreenGeometry::from_framebuffer(FRAMEBUFFER_SIZE).map_err(|e| {
        CliError::InvalidArgs(format!(
            "Screen geometry unavailable ({}), use --screen WxH",
            e
        ))
    })
}

fn write_json(
    cameras: &[CameraResolutions],
    screen: &ScreenGeometry,
    path: &Path,
) -> Result<(), String> {
    log::info!("Writing json to file {}", path.display());

    let text = build_json(cameras, screen)
        .to_json_string()
        .map_err(|e| format!("Failed to encode JSON: {}", e))?;

    fs::write(path, text).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn write_hw_profile(
    cameras: &[CameraResolutions],
    screen: &ScreenGeometry,
    args: &Args,
    path: &Path,
) -> Result<(), String> {
    log::info!("Writing hardware profile to file {}", path.display());

    let template = Template::read(&args.template).map_err(|e| {
        format!(
            "Failed to read template {}: {}",
            args.template.display(),
            e
        )
    })?;

    let iso = DroidConfIso::new(&args.iso_dir);
    let profile = build_hardware_profile(cameras, screen, &iso);
    let filled = template.fill(&profile);

    if !filled.unresolved.is_empty() {
        log::warn!(
            "{} placeholders left in {}, check output",
            filled.unresolved.len(),
            path.display()
        );
    }

    fs::write(path, filled.to_text())
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

//! Saves the current capture as a timestamped PNG.

use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::PathBuf;

use super::{ActionContext, ActionInput, CustomAction};
use crate::logging::format_timestamp;

/// Expected device aspect ratio.
const TARGET_RATIO: f64 = 16.0 / 9.0;

/// Relative deviation from 16:9 tolerated before warning.
const RATIO_TOLERANCE: f64 = 0.01;

/// Parameter: `{"save_dir": "<directory>"}` (optional).
pub struct Screenshot;

/// True when `width x height` is within tolerance of 16:9.
pub fn is_sixteen_by_nine(width: u32, height: u32) -> bool {
    if height == 0 {
        return false;
    }
    let ratio = f64::from(width) / f64::from(height);
    (ratio - TARGET_RATIO).abs() / TARGET_RATIO <= RATIO_TOLERANCE
}

impl CustomAction for Screenshot {
    fn name(&self) -> &'static str {
        "Screenshot"
    }

    fn execute(&self, ctx: &mut ActionContext<'_>, input: &ActionInput) -> Result<()> {
        let screen = ctx.host.capture_screen().context("Failed to capture screen")?;
        let (width, height) = (screen.width(), screen.height());
        if width == 0 || height == 0 {
            return Err(anyhow!("Capture is empty ({}x{})", width, height));
        }

        if !is_sixteen_by_nine(width, height) {
            tracing::error!("Emulator resolution is not 16:9! Current: {}x{}", width, height);
        }

        let save_dir = match input.get("save_dir").and_then(|v| v.as_str()) {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => crate::paths::get_screenshots_dir(),
        };
        fs::create_dir_all(&save_dir)
            .with_context(|| format!("Failed to create {}", save_dir.display()))?;

        let path = save_dir.join(format!("{}.png", format_timestamp()));
        screen
            .image()
            .save(&path)
            .with_context(|| format!("Failed to save screenshot to {}", path.display()))?;

        tracing::info!("Screenshot saved to {}", path.display());
        Ok(())
    }
}

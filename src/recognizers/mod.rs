//! Custom recognizers: read the current screen and decide where to act.
//!
//! A recognizer returns `Ok(None)` when nothing actionable is on screen and
//! `Err` only when talking to the host failed.

pub mod challenge;
pub mod flower;

pub use challenge::FindToChallenge;
pub use flower::FindPlantableFlower;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::geometry::Rect;
use crate::host::{AutomationHost, Screen, TextOutcome};

/// Arguments for one recognition pass.
#[derive(Clone, Debug)]
pub struct RecognizerInput {
    pub screen: Screen,
}

impl RecognizerInput {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }
}

/// Box to act on plus free-form detail for the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Recognition {
    pub rect: Rect,
    pub detail: Value,
}

impl Recognition {
    pub fn new(rect: Rect, detail: Value) -> Self {
        Self { rect, detail }
    }
}

pub trait CustomRecognizer {
    fn name(&self) -> &'static str;

    fn analyze(
        &self,
        host: &mut dyn AutomationHost,
        input: &RecognizerInput,
    ) -> Result<Option<Recognition>>;
}

/// OCR at `roi`, returning the best text only on a real hit.
pub(crate) fn read_text(
    host: &mut dyn AutomationHost,
    screen: &Screen,
    roi: Rect,
) -> Result<Option<String>> {
    let outcome = host
        .recognize_text(screen, roi)
        .with_context(|| format!("Text recognition failed at {}", roi))?;
    match outcome {
        TextOutcome::Hit(text) => Ok(Some(text)),
        TextOutcome::HitWithoutText => {
            tracing::warn!("ROI {}: text recognized but no best result", roi);
            Ok(None)
        }
        TextOutcome::Miss => {
            tracing::debug!("ROI {}: no text", roi);
            Ok(None)
        }
    }
}

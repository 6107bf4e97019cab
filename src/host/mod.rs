//! The automation host seam.
//!
//! Template matching, OCR, input injection and pipeline execution all live in
//! the host framework. Actions only see it through [`AutomationHost`]; every
//! call is a blocking round-trip that completes before the next one starts.

#[cfg(test)]
pub mod testing;

use anyhow::{Result, anyhow};
use image::RgbaImage;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::geometry::Rect;

/// A captured frame of the device screen.
#[derive(Clone, Debug)]
pub struct Screen {
    image: RgbaImage,
}

impl Screen {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// A black frame of the given size, for hosts without a real capture.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbaImage::new(width, height))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// One template name or several alternatives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchTarget {
    Single(String),
    AnyOf(Vec<String>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("template must be a string or a list of strings, got {0}")]
    WrongType(String),
    #[error("template is empty: {0}")]
    Empty(String),
}

impl SearchTarget {
    pub fn single(name: impl Into<String>) -> Self {
        SearchTarget::Single(name.into())
    }

    /// Reads a `template` parameter: a non-blank string or a non-empty list
    /// of strings.
    pub fn from_param(value: &Value) -> Result<Self, TargetError> {
        match value {
            Value::String(s) if s.trim().is_empty() => Err(TargetError::Empty(value.to_string())),
            Value::String(s) => Ok(SearchTarget::Single(s.clone())),
            Value::Array(items) if items.is_empty() => Err(TargetError::Empty(value.to_string())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(SearchTarget::AnyOf)
                .ok_or_else(|| TargetError::WrongType(value.to_string())),
            other => Err(TargetError::WrongType(other.to_string())),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            SearchTarget::Single(name) => vec![name.as_str()],
            SearchTarget::AnyOf(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join("|"))
    }
}

/// A template-match request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateQuery {
    pub target: SearchTarget,
    /// Selects the n-th hit (ordered by the host) instead of the best one.
    pub index: Option<usize>,
}

impl TemplateQuery {
    pub fn new(target: SearchTarget) -> Self {
        Self {
            target,
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Hit(Rect),
    /// The host reported a hit but returned no usable box.
    HitWithoutBox,
    Miss,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextOutcome {
    Hit(String),
    /// The host reported a hit but returned no best result.
    HitWithoutText,
    Miss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeDirection::Left => write!(f, "left"),
            SwipeDirection::Right => write!(f, "right"),
        }
    }
}

/// Operations the automation host provides.
///
/// `Err` means the round-trip itself failed; an unsuccessful but completed
/// operation is reported through the `bool`/outcome value.
pub trait AutomationHost {
    fn capture_screen(&mut self) -> Result<Screen>;

    fn match_template(&mut self, screen: &Screen, query: &TemplateQuery) -> Result<MatchOutcome>;

    fn recognize_text(&mut self, screen: &Screen, roi: Rect) -> Result<TextOutcome>;

    fn click(&mut self, x: i32, y: i32) -> Result<bool>;

    fn swipe(&mut self, direction: SwipeDirection) -> Result<bool>;

    /// Types `text` into the control at `target`.
    fn input_text(&mut self, text: &str, target: Rect) -> Result<bool>;

    fn is_stop_requested(&self) -> bool;

    /// Asks the host to stop the running task after the current action.
    fn request_stop(&mut self);
}

/// Shared stop flag a host adapter can expose to the task thread.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Host used when no automation framework is connected, e.g. from the
/// operator CLI. Every device operation fails.
#[derive(Debug, Default)]
pub struct DetachedHost {
    stop: StopSignal,
}

impl DetachedHost {
    pub fn new() -> Self {
        Self::default()
    }
}

fn detached() -> anyhow::Error {
    anyhow!("no automation host attached")
}

impl AutomationHost for DetachedHost {
    fn capture_screen(&mut self) -> Result<Screen> {
        Err(detached())
    }

    fn match_template(&mut self, _screen: &Screen, _query: &TemplateQuery) -> Result<MatchOutcome> {
        Err(detached())
    }

    fn recognize_text(&mut self, _screen: &Screen, _roi: Rect) -> Result<TextOutcome> {
        Err(detached())
    }

    fn click(&mut self, _x: i32, _y: i32) -> Result<bool> {
        Err(detached())
    }

    fn swipe(&mut self, _direction: SwipeDirection) -> Result<bool> {
        Err(detached())
    }

    fn input_text(&mut self, _text: &str, _target: Rect) -> Result<bool> {
        Err(detached())
    }

    fn is_stop_requested(&self) -> bool {
        self.stop.is_requested()
    }

    fn request_stop(&mut self) {
        self.stop.request();
    }
}

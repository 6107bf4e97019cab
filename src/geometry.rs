//! Screen rectangles and the adjacent-input offset transform.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Offset multiplier for `bottom` placements (in box heights).
pub const BOTTOM_MULTIPLIER: f64 = 1.5;

/// A rectangle in screen-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rect from an `[x, y, w, h]` ROI literal.
    pub const fn from_roi(roi: [i32; 4]) -> Self {
        Self::new(roi[0], roi[1], roi[2], roi[3])
    }

    pub const fn to_roi(self) -> [i32; 4] {
        [self.x, self.y, self.w, self.h]
    }

    /// Picks a uniformly random pixel inside the rect.
    ///
    /// Degenerate rects (zero or negative size) collapse to the origin.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (i32, i32) {
        let px = self.x + rng.random_range(0..self.w.max(1));
        let py = self.y + rng.random_range(0..self.h.max(1));
        (px, py)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x, self.y, self.w, self.h)
    }
}

/// Where an input control sits relative to its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Right,
    Bottom,
}

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("unsupported direction: {0}")]
    UnsupportedDirection(String),
    #[error("offset of {multiplier} x {extent} from {origin} is out of range")]
    OffsetOutOfRange {
        origin: i32,
        extent: i32,
        multiplier: f64,
    },
}

impl FromStr for Position {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "right" => Ok(Position::Right),
            "bottom" => Ok(Position::Bottom),
            other => Err(GeometryError::UnsupportedDirection(other.to_string())),
        }
    }
}

/// Shifts `origin` by `multiplier * extent`, truncated toward zero.
fn shifted(origin: i32, extent: i32, multiplier: f64) -> Result<i32, GeometryError> {
    let offset = (multiplier * f64::from(extent)).trunc();
    let out_of_range = || GeometryError::OffsetOutOfRange {
        origin,
        extent,
        multiplier,
    };
    if !offset.is_finite() || offset < f64::from(i32::MIN) || offset > f64::from(i32::MAX) {
        return Err(out_of_range());
    }
    origin.checked_add(offset as i32).ok_or_else(out_of_range)
}

/// Returns the presumed box of the input control next to `label`.
///
/// `right` shifts x by `right_multiplier` box widths, `bottom` shifts y by
/// 1.5 box heights. Offsets are truncated toward zero. A shift that leaves
/// the `i32` coordinate space is an error.
pub fn adjacent_box(
    label: Rect,
    position: Position,
    right_multiplier: f64,
) -> Result<Rect, GeometryError> {
    Ok(match position {
        Position::Right => Rect {
            x: shifted(label.x, label.w, right_multiplier)?,
            ..label
        },
        Position::Bottom => Rect {
            y: shifted(label.y, label.h, BOTTOM_MULTIPLIER)?,
            ..label
        },
    })
}

/// String-keyed form of [`adjacent_box`], as used by action parameters.
pub fn compute_adjacent_box(
    label: Rect,
    position: &str,
    right_multiplier: f64,
) -> Result<Rect, GeometryError> {
    let position = position.parse::<Position>()?;
    adjacent_box(label, position, right_multiplier)
}

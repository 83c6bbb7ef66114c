use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Artboard dimensions in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }

    /// Shrinks both dimensions by `margin`, keeping the top-left anchor.
    ///
    /// Fails when the remaining box is empty.
    pub fn inset(self, margin: f64) -> ChartResult<Self> {
        Self::new(self.width - margin, self.height - margin).validate()
    }

    #[must_use]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    /// `viewBox` attribute value for an artboard of this size.
    #[must_use]
    pub fn view_box(self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Circle in box coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    #[must_use]
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    #[must_use]
    pub fn distance_to(self, other: Circle) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.r.is_finite()
    }
}

//! Viewport geometry for tooltip placement

use serde::{Deserialize, Serialize};

/// An element's bounding box in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

/// Place a tooltip above `anchor`, horizontally centred on it, `gap` pixels clear.
pub fn tooltip_position(anchor: Rect, tooltip: Size, gap: f64) -> Point {
    Point {
        left: anchor.center_x() - tooltip.width / 2.0,
        top: anchor.top - tooltip.height - gap,
    }
}

use serde::{Deserialize, Serialize};

use crate::config::KeyboardConfig;
use crate::geometry::kle::Layout;
use crate::geometry::Rect;

/// The plate's outer boundary. Always a single axis-aligned rectangle;
/// non-rectangular footprints (ISO-enter plates and the like) are
/// approximated by their bounding rectangle and the frame collaborator
/// carves the unused corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateOutline {
    /// Rightmost key reach, unit space.
    pub width_units: f64,
    /// One unit per row, regardless of which keys occupy it.
    pub height_units: f64,
    /// Physical size, millimeters, including the border padding.
    pub width: f64,
    pub height: f64,
    /// Border padding: the inter-switch gap, carried once on each axis so
    /// the outermost hook cutouts stay enclosed.
    pub margin: f64,
}

impl PlateOutline {
    /// Offset between a key's unit-space position scaled to mm and its
    /// physical position on the plate.
    pub fn left_margin(&self) -> f64 {
        self.margin / 2.0
    }

    pub fn border_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Scans all keys for the minimal padded outline containing every cutout.
pub fn compute_outline(layout: &Layout, config: &KeyboardConfig) -> PlateOutline {
    let unit = config.switch.unit;
    let margin = unit - config.switch.switch_width;

    let width_units = layout.width_in_units();
    let height_units = layout.height_in_units;

    PlateOutline {
        width_units,
        height_units,
        width: width_units * unit + margin,
        height: height_units * unit + margin,
        margin,
    }
}

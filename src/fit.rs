use serde::{Deserialize, Serialize};

use crate::config::KeyboardConfig;
use crate::geometry::{hook_cutouts_at, switch_cutout_at, Rect};

/// A small 3x3 test coupon: print this first, check the switch fit, adjust
/// `fit_tolerance`, repeat. Rows are staggered so the coupon also exercises
/// the common row offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitChecker {
    pub border: Rect,
    pub switch_cutouts: Vec<Rect>,
    pub hook_cutouts: Vec<Rect>,
}

const ROW_OFFSETS: [f64; 3] = [0.75, 0.5, 0.0];

pub fn fit_checker(config: &KeyboardConfig) -> FitChecker {
    let unit = config.switch.unit;
    let margin = unit - config.switch.switch_width;

    let border = Rect::new(
        0.0,
        0.0,
        margin + 3.75 * unit,
        margin + config.switch.hook_depth + 3.0 * unit,
    );

    let mut switch_cutouts = Vec::with_capacity(9);
    let mut hook_cutouts = Vec::with_capacity(18);

    for (row, offset) in ROW_OFFSETS.iter().enumerate() {
        for col in 0..3 {
            // (col + offset) * unit is the pocket's left edge; the offset
            // rows stagger rightward, inside the border.
            let cx = margin + (col as f64 + offset) * unit + config.hole_width() / 2.0;
            let cy = margin + (row as f64 + 0.5) * unit;
            switch_cutouts.push(switch_cutout_at(cx, cy, config));
            hook_cutouts.extend(hook_cutouts_at(cx, cy, config));
        }
    }

    FitChecker {
        border,
        switch_cutouts,
        hook_cutouts,
    }
}

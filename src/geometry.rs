use clap::ValueEnum;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::warn;

use crate::config::KeyboardConfig;
use crate::error::Diagnostic;

pub mod kle;

/// Axis-aligned rectangle, min corner + size, physical millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SupportDirection {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl SupportDirection {
    pub fn is_supported(&self) -> bool {
        !matches!(self, SupportDirection::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, ValueEnum)]
pub enum SwitchType {
    CherryMx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, ValueEnum)]
pub enum SupportType {
    CherryMx,
}

/// One normalized key. Coordinates are unit-space: `x` is the geometric
/// center of the key, `y` the row baseline (both increase rightward/downward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub is_multi_switch: bool,
    #[serde(default)]
    pub support: SupportDirection,
    /// Sub-switch centers when `is_multi_switch`; empty otherwise.
    #[serde(default)]
    pub switches: Vec<(f64, f64)>,
    /// Stabilizer anchors when `support` is set; empty otherwise.
    #[serde(default)]
    pub supports: Vec<(f64, f64)>,
}

impl KeyRecord {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            is_multi_switch: false,
            support: SupportDirection::None,
            switches: Vec::new(),
            supports: Vec::new(),
        }
    }

    /// Horizontal footprint in unit space.
    pub fn span(&self) -> (f64, f64) {
        (self.x - self.width / 2.0, self.x + self.width / 2.0)
    }
}

/// The cutout set for one key, physical millimeters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGeometry {
    pub switch_cutouts: Vec<Rect>,
    pub hook_cutouts: Vec<Rect>,
    pub support_cutouts: Vec<Rect>,
}

/// Second pass over the parsed rows: decide per key whether it becomes a
/// multi-switch key, needs stabilizer supports, or neither. Mutates the
/// records in place; returns the non-fatal findings.
pub fn annotate_rows(rows: &mut [Vec<KeyRecord>], config: &KeyboardConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (row_idx, row) in rows.iter_mut().enumerate() {
        for (key_idx, key) in row.iter_mut().enumerate() {
            key.is_multi_switch = false;
            key.support = SupportDirection::None;
            key.switches.clear();
            key.supports.clear();

            if config.flags.double_switch_for_space
                && key.width >= config.switch.multi_switch_threshold
            {
                // Two real switches beat one wide switch plus stabilizer.
                key.is_multi_switch = true;
                key.switches.push((key.x - key.width / 4.0, key.y));
                key.switches.push((key.x + key.width / 4.0, key.y));
            } else if key.height >= config.switch.support_trigger_size {
                match config.support_offset(key.height) {
                    Some(offset) => {
                        // The table is physical; anchors live in unit space.
                        let offset = offset / config.switch.unit;
                        key.support = SupportDirection::Vertical;
                        key.supports.push((key.x, key.y - offset));
                        key.supports.push((key.x, key.y + offset));
                    }
                    None => {
                        warn!(
                            row = row_idx,
                            key = key_idx,
                            size = key.height,
                            "no stabilizer spacing known for this key size, support skipped"
                        );
                        diagnostics.push(Diagnostic::UnsupportedSupportSize {
                            row: row_idx,
                            key: key_idx,
                            size: key.height,
                        });
                    }
                }
            } else if key.width >= config.switch.support_trigger_size {
                match config.support_offset(key.width) {
                    Some(offset) => {
                        let offset = offset / config.switch.unit;
                        key.support = SupportDirection::Horizontal;
                        key.supports.push((key.x - offset, key.y));
                        key.supports.push((key.x + offset, key.y));
                    }
                    None => {
                        warn!(
                            row = row_idx,
                            key = key_idx,
                            size = key.width,
                            "no stabilizer spacing known for this key size, support skipped"
                        );
                        diagnostics.push(Diagnostic::UnsupportedSupportSize {
                            row: row_idx,
                            key: key_idx,
                            size: key.width,
                        });
                    }
                }
            }
        }
    }

    diagnostics
}

/// Physical center of a unit-space x coordinate. The plate carries half the
/// inter-switch gap as a border, so every key shifts right by that margin.
fn to_phys_x(xu: f64, config: &KeyboardConfig) -> f64 {
    xu * config.switch.unit + (config.switch.unit - config.switch.switch_width) / 2.0
}

/// Physical center of a row-baseline y coordinate; the row's cell center
/// plus the border margin, y increasing downward.
fn to_phys_y(yu: f64, config: &KeyboardConfig) -> f64 {
    (yu + 0.5) * config.switch.unit + (config.switch.unit - config.switch.switch_depth) / 2.0
}

// Cherry MX stabilizer insert: 3.3x14.0 through-cut plus a 5.0x17.0 lip
// recess. Fixed dimensions, not derived from the switch parameters.
const MX_STAB_CUT: (f64, f64) = (3.3, 14.0);
const MX_STAB_LIP: (f64, f64) = (5.0, 17.0);

/// Switch hole centered at a physical point.
pub fn switch_cutout_at(cx: f64, cy: f64, config: &KeyboardConfig) -> Rect {
    Rect::centered(cx, cy, config.hole_width(), config.hole_depth())
}

/// Retention-clip reliefs flush against the hole's top and bottom edges,
/// reaching hook_depth outward.
pub fn hook_cutouts_at(cx: f64, cy: f64, config: &KeyboardConfig) -> [Rect; 2] {
    let hole_d = config.hole_depth();
    let hook_w = config.switch.hook_width;
    let hook_d = config.switch.hook_depth;
    [
        Rect::centered(cx, cy - hole_d / 2.0 - hook_d / 2.0, hook_w, hook_d),
        Rect::centered(cx, cy + hole_d / 2.0 + hook_d / 2.0, hook_w, hook_d),
    ]
}

/// Derives all cutout rectangles for one annotated key. Pure function of the
/// key and the config; deterministic, no side effects.
pub fn derive_key(key: &KeyRecord, config: &KeyboardConfig) -> KeyGeometry {
    let mut geo = KeyGeometry::default();

    let single = [(key.x, key.y)];
    let centers: &[(f64, f64)] = if key.is_multi_switch {
        &key.switches
    } else {
        &single
    };

    for &(sx, sy) in centers {
        let cx = to_phys_x(sx, config);
        let cy = to_phys_y(sy, config);

        geo.switch_cutouts.push(switch_cutout_at(cx, cy, config));
        geo.hook_cutouts.extend(hook_cutouts_at(cx, cy, config));
    }

    if key.support.is_supported() {
        for &(ux, uy) in &key.supports {
            let cx = to_phys_x(ux, config);
            let cy = to_phys_y(uy, config);
            match config.switch.support_type {
                SupportType::CherryMx => {
                    // Fixed Cherry MX stabilizer dimensions, oriented along
                    // the support axis.
                    let ((cut_w, cut_h), (lip_w, lip_h)) = match key.support {
                        SupportDirection::Horizontal => (MX_STAB_CUT, MX_STAB_LIP),
                        _ => (
                            (MX_STAB_CUT.1, MX_STAB_CUT.0),
                            (MX_STAB_LIP.1, MX_STAB_LIP.0),
                        ),
                    };
                    geo.support_cutouts
                        .push(Rect::centered(cx, cy, cut_w, cut_h));
                    geo.support_cutouts
                        .push(Rect::centered(cx, cy, lip_w, lip_h));
                }
            }
        }
    }

    geo
}

/// Derives geometry for every key, row structure preserved. Keys are
/// independent, so rows are mapped in parallel.
pub fn derive_all(rows: &[Vec<KeyRecord>], config: &KeyboardConfig) -> Vec<Vec<KeyGeometry>> {
    rows.par_iter()
        .map(|row| row.iter().map(|key| derive_key(key, config)).collect())
        .collect()
}

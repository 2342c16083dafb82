use clap::{ArgAction, Args};
use serde::{Deserialize, Serialize};

use crate::error::{PfResult, PlateForgeError};
use crate::geometry::{SupportType, SwitchType};

/// Default dimensions, all in millimeters. Taken from Cherry MX data sheets
/// and the standard 19.05mm key pitch.
pub mod defaults {
    pub const UNIT: f64 = 19.05;
    pub const SWITCH_WIDTH: f64 = 14.0;
    pub const SWITCH_DEPTH: f64 = 14.0;
    pub const HOOK_WIDTH: f64 = 5.0;
    pub const HOOK_DEPTH: f64 = 1.5;
    pub const HOOK_HEIGHT: f64 = 1.4;
    pub const PLATE_THICKNESS: f64 = 4.0;
    pub const FRAME_OVER_PLATE: f64 = 6.0;
    pub const PRINTER_WIDTH: f64 = 200.0;
    pub const PRINTER_DEPTH: f64 = 200.0;
    pub const PRINTER_HEIGHT: f64 = 200.0;
    pub const MULTI_SWITCH_THRESHOLD: f64 = 4.0;
    pub const SUPPORT_TRIGGER_SIZE: f64 = 2.0;
}

/// The full parameter set for one generation run. Assembled once (from the
/// CLI or programmatically), read-only afterwards.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardConfig {
    #[command(flatten)]
    pub switch: SwitchParams,
    #[command(flatten)]
    pub printer: PrinterParams,
    #[command(flatten)]
    pub flags: GenerationFlags,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct SwitchParams {
    /// Key pitch: the physical length of 1u.
    #[arg(long, default_value_t = defaults::UNIT)]
    pub unit: f64,

    #[arg(long, default_value_t = defaults::SWITCH_WIDTH)]
    pub switch_width: f64,
    #[arg(long, default_value_t = defaults::SWITCH_DEPTH)]
    pub switch_depth: f64,

    /// Retention-clip relief width.
    #[arg(long, default_value_t = defaults::HOOK_WIDTH)]
    pub hook_width: f64,
    #[arg(long, default_value_t = defaults::HOOK_DEPTH)]
    pub hook_depth: f64,
    #[arg(long, default_value_t = defaults::HOOK_HEIGHT)]
    pub hook_height: f64,

    #[arg(long, default_value_t = defaults::PLATE_THICKNESS)]
    pub plate_thickness: f64,

    /// How far the frame wall rises above the plate surface.
    #[arg(long, default_value_t = defaults::FRAME_OVER_PLATE)]
    pub frame_over_plate: f64,

    /// Enlarges (positive) or shrinks (negative) every switch hole, for
    /// printers that over- or under-extrude. Print the fit checker first.
    #[arg(long, default_value_t = 0.0)]
    pub fit_tolerance: f64,

    #[arg(long, value_enum, default_value_t = SwitchType::CherryMx)]
    pub switch_type: SwitchType,
    #[arg(long, value_enum, default_value_t = SupportType::CherryMx)]
    pub support_type: SupportType,

    /// Keys at least this wide are candidates for two switches instead of
    /// one switch plus stabilizer.
    #[arg(long, default_value_t = defaults::MULTI_SWITCH_THRESHOLD)]
    pub multi_switch_threshold: f64,

    /// Keys at least this wide (or tall) get stabilizer cutouts.
    #[arg(long, default_value_t = defaults::SUPPORT_TRIGGER_SIZE)]
    pub support_trigger_size: f64,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct PrinterParams {
    #[arg(long, default_value_t = defaults::PRINTER_WIDTH)]
    pub printer_width: f64,
    #[arg(long, default_value_t = defaults::PRINTER_DEPTH)]
    pub printer_depth: f64,
    #[arg(long, default_value_t = defaults::PRINTER_HEIGHT)]
    pub printer_height: f64,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct GenerationFlags {
    /// Two switches for the spacebar instead of one switch + stabilizer.
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub double_switch_for_space: bool,

    /// Split the plate into printer-bed-sized parts when it overflows.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub make_printable: bool,

    /// Equal-sized parts instead of maximal parts plus a remainder.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub fair_split: bool,

    /// Give the bottom/frame body one straight cut instead of reusing the
    /// plate's zig-zag split line.
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub split_bottom_straight: bool,

    /// Emit dimensions as parametric values rather than fixed geometry.
    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub parametric_model: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub fixed_sketch: bool,

    /// Generate the 3x3 fit-checker coupon alongside the plate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub fit_checker: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub create_frame: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            switch: SwitchParams {
                unit: defaults::UNIT,
                switch_width: defaults::SWITCH_WIDTH,
                switch_depth: defaults::SWITCH_DEPTH,
                hook_width: defaults::HOOK_WIDTH,
                hook_depth: defaults::HOOK_DEPTH,
                hook_height: defaults::HOOK_HEIGHT,
                plate_thickness: defaults::PLATE_THICKNESS,
                frame_over_plate: defaults::FRAME_OVER_PLATE,
                fit_tolerance: 0.0,
                switch_type: SwitchType::CherryMx,
                support_type: SupportType::CherryMx,
                multi_switch_threshold: defaults::MULTI_SWITCH_THRESHOLD,
                support_trigger_size: defaults::SUPPORT_TRIGGER_SIZE,
            },
            printer: PrinterParams {
                printer_width: defaults::PRINTER_WIDTH,
                printer_depth: defaults::PRINTER_DEPTH,
                printer_height: defaults::PRINTER_HEIGHT,
            },
            flags: GenerationFlags {
                double_switch_for_space: false,
                make_printable: true,
                fair_split: true,
                split_bottom_straight: false,
                parametric_model: false,
                fixed_sketch: true,
                fit_checker: true,
                create_frame: true,
            },
        }
    }
}

impl KeyboardConfig {
    /// Stabilizer anchor offset from the key center, physical millimeters,
    /// by nominal key size (Cherry MX stabilizer spacings: 24mm for 2u,
    /// 100mm for the 6.25u spacebar). Returns `None` for sizes with no
    /// known spacing.
    pub fn support_offset(&self, size: f64) -> Option<f64> {
        // Keys are matched on the nominal size, to the hundredth of a unit.
        match (size * 100.0).round() as i64 {
            200 | 225 | 275 => Some(12.0),
            600 => Some(49.0),
            625 => Some(50.0),
            650 => Some(52.5),
            _ => None,
        }
    }

    /// Effective switch hole width/depth with the fit tolerance applied.
    pub fn hole_width(&self) -> f64 {
        self.switch.switch_width + self.switch.fit_tolerance
    }

    pub fn hole_depth(&self) -> f64 {
        self.switch.switch_depth + self.switch.fit_tolerance
    }

    pub fn validate(&self) -> PfResult<()> {
        let s = &self.switch;
        if s.unit <= 0.0 {
            return Err(PlateForgeError::Config(format!(
                "unit must be positive, got {}",
                s.unit
            )));
        }
        if s.switch_width <= 0.0 || s.switch_depth <= 0.0 {
            return Err(PlateForgeError::Config(
                "switch dimensions must be positive".to_string(),
            ));
        }
        if s.switch_width >= s.unit || s.switch_depth >= s.unit {
            return Err(PlateForgeError::Config(format!(
                "switch cutout ({}x{}) does not fit inside one unit ({})",
                s.switch_width, s.switch_depth, s.unit
            )));
        }
        if s.plate_thickness <= s.hook_height {
            return Err(PlateForgeError::Config(format!(
                "plate thickness {} leaves no material above {} hook height",
                s.plate_thickness, s.hook_height
            )));
        }
        let p = &self.printer;
        if p.printer_width <= 0.0 || p.printer_depth <= 0.0 || p.printer_height <= 0.0 {
            return Err(PlateForgeError::Config(
                "printer build volume must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::KeyboardConfig;
use crate::error::{PfResult, PlateForgeError};
use crate::geometry::Rect;
use crate::outline::PlateOutline;

/// How split frame parts are rejoined after printing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
pub enum JoinOption {
    AlignmentPins,
    Dovetail,
}

/// Frame geometry handed to the solid-modeling collaborator: the outer wall,
/// the recess the plate drops into, and an optional controller pocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameGeometry {
    pub outer: Rect,
    pub plate_recess: Rect,
    pub wall_height: f64,
    pub microcontroller_mount: Option<Rect>,
}

/// A frame flavor. Implementations are pure geometry producers; selection
/// happens once at configuration time via [`FrameKind`].
pub trait Frame {
    fn generate(
        &self,
        config: &KeyboardConfig,
        outline: &PlateOutline,
        join: JoinOption,
    ) -> PfResult<FrameGeometry>;

    fn supported_join_options(&self) -> &[JoinOption];

    fn microcontroller_mount(&self, config: &KeyboardConfig, outline: &PlateOutline)
        -> Option<Rect>;
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[strum(serialize_all = "snake_case")]
pub enum FrameKind {
    UkcDefault,
}

/// Static registry: every frame kind maps to a fixed implementation, no
/// runtime loading.
pub fn frame_for(kind: FrameKind) -> &'static dyn Frame {
    match kind {
        FrameKind::UkcDefault => &UkcDefaultFrame,
    }
}

/// The built-in frame: a plain wall around the plate with a controller
/// pocket in the top wall.
pub struct UkcDefaultFrame;

impl UkcDefaultFrame {
    const WALL_THICKNESS: f64 = 3.0;
    /// Pro Micro footprint.
    const MOUNT_WIDTH: f64 = 33.0;
}

impl Frame for UkcDefaultFrame {
    fn generate(
        &self,
        config: &KeyboardConfig,
        outline: &PlateOutline,
        join: JoinOption,
    ) -> PfResult<FrameGeometry> {
        if !self.supported_join_options().contains(&join) {
            return Err(PlateForgeError::Validation(format!(
                "frame '{}' does not support join option '{}'",
                FrameKind::UkcDefault,
                join
            )));
        }

        let wall = Self::WALL_THICKNESS;
        let recess = outline.border_rect();

        Ok(FrameGeometry {
            outer: Rect::new(
                recess.x - wall,
                recess.y - wall,
                recess.width + 2.0 * wall,
                recess.height + 2.0 * wall,
            ),
            plate_recess: recess,
            wall_height: config.switch.plate_thickness + config.switch.frame_over_plate,
            microcontroller_mount: self.microcontroller_mount(config, outline),
        })
    }

    fn supported_join_options(&self) -> &[JoinOption] {
        &[JoinOption::AlignmentPins]
    }

    fn microcontroller_mount(
        &self,
        _config: &KeyboardConfig,
        outline: &PlateOutline,
    ) -> Option<Rect> {
        // Pocket through the top wall, centered on the plate.
        Some(Rect::centered(
            outline.width / 2.0,
            -Self::WALL_THICKNESS / 2.0,
            Self::MOUNT_WIDTH,
            Self::WALL_THICKNESS,
        ))
    }
}

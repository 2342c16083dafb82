use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::KeyboardConfig;
use crate::error::{Diagnostic, PfResult};
use crate::fit::{fit_checker, FitChecker};
use crate::frame::{frame_for, FrameGeometry, FrameKind, JoinOption};
use crate::geometry::kle::{parse_kle, Layout};
use crate::geometry::{annotate_rows, derive_all, KeyGeometry};
use crate::outline::{compute_outline, PlateOutline};
use crate::splitter::{plan_split, SplitPlan};

/// Everything the solid-modeling collaborator needs to build the keyboard:
/// normalized keys, per-key cutouts, the plate outline, split lines, and the
/// frame. Produced by one [`generate`] run; immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardModel {
    pub layout: Layout,
    pub key_geometry: Vec<Vec<KeyGeometry>>,
    pub outline: PlateOutline,
    pub split_plan: SplitPlan,
    pub frame: Option<FrameGeometry>,
    pub fit_checker: Option<FitChecker>,
    /// Every non-fatal finding from parsing, annotation and splitting.
    pub diagnostics: Vec<Diagnostic>,
}

impl KeyboardModel {
    pub fn part_count(&self) -> usize {
        self.split_plan.part_count()
    }

    /// Total work units for progress reporting: three sketch passes per key,
    /// plus the fit-checker coupon when enabled.
    pub fn progress_steps(&self) -> usize {
        let mut steps = self.layout.key_count * 3;
        if self.fit_checker.is_some() {
            steps += 9 * 3;
        }
        steps
    }
}

/// Runs the full pipeline on raw KLE JSON with the default frame.
pub fn generate(content: &str, config: &KeyboardConfig) -> PfResult<KeyboardModel> {
    let layout = parse_kle(content)?;
    generate_from_layout(layout, config, FrameKind::UkcDefault, None)
}

/// Runs the pipeline on an already-parsed layout. `join` defaults to the
/// frame's first supported option.
pub fn generate_from_layout(
    mut layout: Layout,
    config: &KeyboardConfig,
    frame_kind: FrameKind,
    join: Option<JoinOption>,
) -> PfResult<KeyboardModel> {
    config.validate()?;

    let mut diagnostics = std::mem::take(&mut layout.diagnostics);
    diagnostics.extend(annotate_rows(&mut layout.rows, config));

    let key_geometry = derive_all(&layout.rows, config);
    let outline = compute_outline(&layout, config);

    let split_plan = if config.flags.make_printable {
        let plan = plan_split(&layout, &outline, config);
        diagnostics.extend(plan.diagnostics.iter().cloned());
        plan
    } else {
        SplitPlan::default()
    };

    let frame = if config.flags.create_frame {
        let frame = frame_for(frame_kind);
        let join = join.unwrap_or(frame.supported_join_options()[0]);
        Some(frame.generate(config, &outline, join)?)
    } else {
        None
    };

    let fit = config.flags.fit_checker.then(|| fit_checker(config));

    info!(
        keys = layout.key_count,
        width = outline.width,
        height = outline.height,
        parts = split_plan.part_count(),
        "keyboard model generated"
    );

    Ok(KeyboardModel {
        layout,
        key_geometry,
        outline,
        split_plan,
        frame,
        fit_checker: fit,
        diagnostics,
    })
}

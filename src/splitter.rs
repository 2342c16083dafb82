use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::KeyboardConfig;
use crate::error::Diagnostic;
use crate::geometry::kle::Layout;
use crate::outline::PlateOutline;

const EPS: f64 = 1e-9;

/// A polyline in plate coordinates, top edge to bottom edge.
pub type Polyline = Vec<(f64, f64)>;

/// One split line: the per-row cut positions and the zig-zag polyline that
/// threads them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitGroup {
    /// Cut x per row, top to bottom. Never inside a key's occupied span
    /// unless flagged as infeasible.
    pub cut_points: Vec<f64>,
    pub polyline: Polyline,
}

/// Where to cut the plate (and the bottom/frame body) so every part fits the
/// printer bed. Empty when no split is needed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPlan {
    /// Parts along the swept (width) axis.
    pub width_splits: usize,
    /// The nominal cut pitch used by the sweep.
    pub width_to_split: f64,
    pub groups: Vec<SplitGroup>,
    pub bottom_cuts: Vec<Polyline>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SplitPlan {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of printable parts, for progress reporting.
    pub fn part_count(&self) -> usize {
        self.groups.len() + 1
    }
}

/// Plans the split lines for a plate that overflows the printer bed.
///
/// The sweep runs along the plate's width; each split line is pushed as far
/// right as the pitch allows, then pulled back per row so it never bisects a
/// key, and the whole group is aligned on the leftmost row cut before the
/// next sweep starts. Depth overflow is only detected, not swept.
pub fn plan_split(layout: &Layout, outline: &PlateOutline, config: &KeyboardConfig) -> SplitPlan {
    let mut plan = SplitPlan::default();

    let width = outline.width;
    let depth = outline.height;
    let printer_w = config.printer.printer_width;
    let printer_d = config.printer.printer_depth;

    // Fits either way around: nothing to do.
    if width.max(depth) < printer_w.max(printer_d) && width.min(depth) < printer_w.min(printer_d) {
        return plan;
    }

    // Orient: the longer plate axis absorbs the longer printer axis.
    let (printer_for_width, printer_for_depth) = if (width >= depth) == (printer_w >= printer_d) {
        (printer_w, printer_d)
    } else {
        (printer_d, printer_w)
    };
    let width_splits = (width / printer_for_width).ceil() as usize;
    let depth_splits = (depth / printer_for_depth).ceil() as usize;

    if width_splits <= 1 && depth_splits <= 1 {
        return plan;
    }

    if depth_splits > 1 {
        // TODO: transpose the sweep below to also split along the depth axis.
        warn!(
            depth,
            printer_depth = printer_for_depth,
            "plate overflows the printer along its depth, only the width axis is split"
        );
        plan.diagnostics.push(Diagnostic::DepthOverflow {
            depth,
            printer_depth: printer_for_depth,
        });
    }

    if width_splits <= 1 || layout.rows.is_empty() {
        return plan;
    }

    // Fair split yields equal parts; otherwise pack full printer widths and
    // leave a remainder.
    let width_to_split = if config.flags.fair_split {
        width / width_splits as f64
    } else {
        printer_for_width
    };
    plan.width_splits = width_splits;
    plan.width_to_split = width_to_split;

    let unit = config.switch.unit;
    let left_margin = outline.left_margin();

    // Row baselines in unit space. Every key in a row carries the baseline
    // plus half its height excess, so any key recovers it; rows with no
    // keys sit one unit below the previous row.
    let baselines: Vec<f64> = {
        let mut bases: Vec<f64> = Vec::with_capacity(layout.rows.len());
        for row in &layout.rows {
            let base = row
                .first()
                .map(|k| k.y - (k.height - 1.0) / 2.0)
                .unwrap_or_else(|| bases.last().map_or(0.0, |b| b + 1.0));
            bases.push(base);
        }
        bases
    };
    // Physical y of each row-to-row boundary: midway between adjacent
    // baseline cell centers, so explicit y gaps widen the clearance instead
    // of shifting the jog into a row.
    let row_boundaries: Vec<f64> = baselines
        .windows(2)
        .map(|pair| ((pair[0] + pair[1]) / 2.0 + 0.5) * unit + left_margin)
        .collect();

    let mut split_x = width_to_split;

    loop {
        let mut cut_points = Vec::with_capacity(layout.rows.len());

        for (row_idx, row) in layout.rows.iter().enumerate() {
            // First key whose right reach meets the target cut position.
            let blocking = row
                .iter()
                .find(|k| (k.x + 0.5) * unit + left_margin >= split_x);

            let cut = match blocking {
                None => split_x,
                Some(key) => {
                    let key_left = (key.x - key.width / 2.0) * unit + left_margin;
                    if key_left >= split_x {
                        // Key sits entirely right of the target.
                        split_x
                    } else {
                        // Pull back to the key's left edge, at most one unit.
                        // A key wider than that cannot be cleared and the cut
                        // stays inside it (flagged below).
                        key_left.max(split_x - unit)
                    }
                }
            };

            // Best effort: the cut is emitted even when a key straddles it,
            // but the caller gets told.
            if let Some(key) = row.iter().find(|k| {
                let (start, end) = k.span();
                let start = start * unit + left_margin;
                let end = end * unit + left_margin;
                cut > start + EPS && cut < end - EPS
            }) {
                let (start, end) = key.span();
                let start = start * unit + left_margin;
                let end = end * unit + left_margin;
                warn!(
                    row = row_idx,
                    cut_x = cut,
                    span_start = start,
                    span_end = end,
                    "split line crosses a key, part does not fit on printer"
                );
                plan.diagnostics.push(Diagnostic::SplitInfeasible {
                    row: row_idx,
                    cut_x: cut,
                    span_start: start,
                    span_end: end,
                });
            }

            cut_points.push(cut);
        }

        // Align the whole group on the leftmost row cut so every part stays
        // within the pitch.
        let lowest_x = cut_points.iter().copied().fold(f64::INFINITY, f64::min);

        debug!(split_x, lowest_x, "split group placed");
        plan.groups.push(SplitGroup {
            polyline: zigzag(&cut_points, &row_boundaries, depth),
            cut_points,
        });

        // N parts need N-1 cuts; stop as well once another full pitch from
        // the aligned cut would run past the plate.
        if plan.groups.len() + 1 >= width_splits || lowest_x + width_to_split >= width {
            break;
        }
        let next = lowest_x + width_to_split;
        if next <= split_x + EPS {
            // A heavily pulled-back group would stall the sweep.
            warn!(split_x, next, "split sweep cannot advance, stopping early");
            break;
        }
        split_x = next;
    }

    plan.bottom_cuts = if config.flags.split_bottom_straight {
        vec![vec![(width / 2.0, 0.0), (width / 2.0, depth)]]
    } else {
        plan.groups.iter().map(|g| g.polyline.clone()).collect()
    };

    plan
}

/// Connects per-row cut positions into one polyline: a vertical segment down
/// each row, then a horizontal jog at the row boundary to the next row's
/// cut. The boundaries sit between adjacent rows' cutouts, so the jogs stay
/// clear of every hole.
fn zigzag(cut_points: &[f64], row_boundaries: &[f64], total_height: f64) -> Polyline {
    let mut points: Polyline = Vec::with_capacity(cut_points.len() * 2);
    points.push((cut_points[0], 0.0));

    for (i, &cut) in cut_points.iter().enumerate() {
        let y = match row_boundaries.get(i) {
            Some(&boundary) => boundary,
            None => total_height,
        };
        points.push((cut, y));
        if let Some(&next) = cut_points.get(i + 1) {
            if (next - cut).abs() > EPS {
                points.push((next, y));
            }
        }
    }

    points
}

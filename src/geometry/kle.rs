use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::KeyRecord;
use crate::error::{Diagnostic, PfResult, PlateForgeError};

/// A parsed keyboard-layout-editor document: normalized key rows plus the
/// metadata the document carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub name: String,
    pub author: String,
    pub rows: Vec<Vec<KeyRecord>>,
    pub key_count: usize,
    /// Total plate height in units: one per row plus any explicit y deltas.
    pub height_in_units: f64,
    pub diagnostics: Vec<Diagnostic>,
}

impl Layout {
    /// Rightmost key reach in unit space, across all rows.
    pub fn width_in_units(&self) -> f64 {
        self.rows
            .iter()
            .flatten()
            .map(|k| k.x + k.width / 2.0)
            .fold(0.0, f64::max)
    }
}

/// Secondary-rectangle attributes: recognized so the document parses, but
/// they produce no geometry (ISO-enter style keys are approximated by their
/// primary rectangle).
const IGNORED_ATTRIBUTES: [&str; 4] = ["w2", "x2", "y2", "h2"];

/// Parses raw KLE JSON into normalized key rows.
///
/// The document is an array of rows. An object row is metadata (name,
/// author) and does not advance the row position. An array row is a key-run:
/// string tokens emit one key each, object tokens mutate the pending
/// size/position cursors for the next key only.
pub fn parse_kle(content: &str) -> PfResult<Layout> {
    let json: Value = serde_json::from_str(content)?;

    let document = json.as_array().ok_or_else(|| {
        PlateForgeError::MalformedLayout("top-level document must be an array of rows".to_string())
    })?;

    let mut layout = Layout::default();

    // State cursors
    let mut row_position = 0.0_f64;
    let mut column_position;
    let mut pending_width = 1.0_f64;
    let mut pending_height = 1.0_f64;
    let mut pending_height_offset = 0.0_f64;

    for row_val in document {
        if let Some(meta) = row_val.as_object() {
            // Metadata block; consumes no row.
            if let Some(name) = meta.get("name").and_then(Value::as_str) {
                layout.name = name.to_string();
            }
            if let Some(author) = meta.get("author").and_then(Value::as_str) {
                layout.author = author.to_string();
            }
            continue;
        }

        let Some(run) = row_val.as_array() else {
            return Err(PlateForgeError::MalformedLayout(format!(
                "row {} is neither a key-run array nor a metadata object",
                layout.rows.len()
            )));
        };

        let mut layout_row: Vec<KeyRecord> = Vec::new();
        column_position = 0.0;

        for token in run {
            match token {
                Value::Object(attrs) => {
                    for (attr, value) in attrs {
                        match attr.as_str() {
                            "w" => pending_width = value.as_f64().unwrap_or(1.0),
                            "x" => column_position += value.as_f64().unwrap_or(0.0),
                            "y" => row_position += value.as_f64().unwrap_or(0.0),
                            "h" => {
                                pending_height = value.as_f64().unwrap_or(1.0);
                                // Taller keys stay centered on the row
                                // baseline by half the excess.
                                pending_height_offset = (pending_height - 1.0) / 2.0;
                            }
                            a if IGNORED_ATTRIBUTES.contains(&a) => {
                                warn!(
                                    row = layout.rows.len(),
                                    attribute = a,
                                    "attribute not handled, ignored"
                                );
                                layout.diagnostics.push(Diagnostic::UnsupportedKeyAttribute {
                                    row: layout.rows.len(),
                                    attribute: a.to_string(),
                                });
                            }
                            // Legends, colors, profiles: irrelevant to plate
                            // geometry.
                            _ => {}
                        }
                    }
                }
                Value::String(_) => {
                    layout_row.push(KeyRecord::new(
                        column_position + pending_width / 2.0,
                        row_position + pending_height_offset,
                        pending_width,
                        pending_height,
                    ));
                    layout.key_count += 1;
                    column_position += pending_width;
                    pending_width = 1.0;
                    pending_height = 1.0;
                    pending_height_offset = 0.0;
                }
                other => {
                    warn!(row = layout.rows.len(), token = %other, "unknown token, skipped");
                }
            }
        }

        row_position += 1.0;
        layout.rows.push(layout_row);
    }

    layout.height_in_units = row_position;
    Ok(layout)
}

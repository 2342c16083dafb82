use plateforge::error::{Diagnostic, PlateForgeError};
use plateforge::geometry::kle::parse_kle;

#[test]
fn plain_tokens_form_a_unit_grid() {
    let layout = parse_kle(r#"[["A","B","C"],["D","E","F"]]"#).unwrap();

    assert_eq!(layout.key_count, 6);
    assert_eq!(layout.rows.len(), 2);
    assert_eq!(layout.height_in_units, 2.0);

    for (row_idx, row) in layout.rows.iter().enumerate() {
        assert_eq!(row.len(), 3);
        for (key_idx, key) in row.iter().enumerate() {
            assert_eq!(key.x, key_idx as f64 + 0.5);
            assert_eq!(key.y, row_idx as f64);
            assert_eq!(key.width, 1.0);
            assert_eq!(key.height, 1.0);
        }
    }
}

#[test]
fn width_attribute_shifts_the_following_keys() {
    // 2u key occupies [0, 2], so its center is 1.0 and the next key lands
    // at 2.5; the run ends at column 3.
    let layout = parse_kle(r#"[[{"w":2},"1","2"]]"#).unwrap();
    let row = &layout.rows[0];

    assert_eq!(row[0].x, 1.0);
    assert_eq!(row[0].width, 2.0);
    assert_eq!(row[1].x, 2.5);
    assert_eq!(row[1].width, 1.0);
    assert_eq!(layout.width_in_units(), 3.0);
}

#[test]
fn x_offset_shifts_only_the_next_key() {
    let layout = parse_kle(r#"[[{"x":1},"A","B"]]"#).unwrap();
    let row = &layout.rows[0];

    assert_eq!(row[0].x, 1.5);
    assert_eq!(row[1].x, 2.5);
}

#[test]
fn y_offset_advances_the_row_position() {
    let layout = parse_kle(r#"[["A"],[{"y":0.5},"B"],["C"]]"#).unwrap();

    assert_eq!(layout.rows[0][0].y, 0.0);
    assert_eq!(layout.rows[1][0].y, 1.5);
    assert_eq!(layout.rows[2][0].y, 2.5);
    // One unit per row plus the explicit half-unit gap.
    assert_eq!(layout.height_in_units, 3.5);
}

#[test]
fn tall_keys_center_on_the_row_baseline() {
    let layout = parse_kle(r#"[[{"h":2},"+","A"]]"#).unwrap();
    let row = &layout.rows[0];

    assert_eq!(row[0].height, 2.0);
    assert_eq!(row[0].y, 0.5);
    // The height offset resets after the emitting key.
    assert_eq!(row[1].height, 1.0);
    assert_eq!(row[1].y, 0.0);
}

#[test]
fn metadata_captures_name_and_author_without_consuming_a_row() {
    let layout =
        parse_kle(r#"[{"name":"Test Board","author":"someone"},["A","B"]]"#).unwrap();

    assert_eq!(layout.name, "Test Board");
    assert_eq!(layout.author, "someone");
    assert_eq!(layout.rows.len(), 1);
    assert_eq!(layout.rows[0][0].y, 0.0);
}

#[test]
fn secondary_rect_attributes_are_ignored_with_a_diagnostic() {
    let layout = parse_kle(r#"[[{"w":1.5,"w2":2.25,"x2":-0.75},"Enter"]]"#).unwrap();

    // Geometry only reflects the primary rectangle.
    assert_eq!(layout.rows[0][0].width, 1.5);
    assert_eq!(layout.rows[0][0].x, 0.75);

    let attrs: Vec<_> = layout
        .diagnostics
        .iter()
        .filter_map(|d| match d {
            Diagnostic::UnsupportedKeyAttribute { attribute, .. } => Some(attribute.as_str()),
            _ => None,
        })
        .collect();
    assert!(attrs.contains(&"w2"));
    assert!(attrs.contains(&"x2"));
}

#[test]
fn legend_attributes_are_silently_irrelevant() {
    let layout = parse_kle(r#"[[{"a":7,"f":3},"A"]]"#).unwrap();
    assert_eq!(layout.key_count, 1);
    assert!(layout.diagnostics.is_empty());
}

#[test]
fn non_array_document_is_malformed() {
    let err = parse_kle(r#"{"name":"not a layout"}"#).unwrap_err();
    assert!(matches!(err, PlateForgeError::MalformedLayout(_)));
}

#[test]
fn invalid_json_is_a_json_error() {
    let err = parse_kle("not json at all").unwrap_err();
    assert!(matches!(err, PlateForgeError::Json(_)));
}

#[test]
fn scalar_row_is_malformed() {
    let err = parse_kle(r#"[["A"],42]"#).unwrap_err();
    assert!(matches!(err, PlateForgeError::MalformedLayout(_)));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// N plain tokens across R rows yield N unit-spaced keys in R rows.
        #[test]
        fn plain_layouts_stay_on_the_unit_grid(rows in 1usize..8, keys in 1usize..24) {
            let row_json = format!(
                "[{}]",
                (0..keys).map(|i| format!("\"k{}\"", i)).collect::<Vec<_>>().join(",")
            );
            let doc = format!(
                "[{}]",
                (0..rows).map(|_| row_json.clone()).collect::<Vec<_>>().join(",")
            );

            let layout = parse_kle(&doc).unwrap();
            prop_assert_eq!(layout.key_count, rows * keys);
            prop_assert_eq!(layout.height_in_units, rows as f64);
            for (r, row) in layout.rows.iter().enumerate() {
                for (k, key) in row.iter().enumerate() {
                    prop_assert_eq!(key.x, k as f64 + 0.5);
                    prop_assert_eq!(key.y, r as f64);
                }
            }
        }

        /// Emitted key widths account for the full column position.
        #[test]
        fn widths_sum_to_the_final_column(widths in prop::collection::vec(1u32..5, 1..12)) {
            let tokens: Vec<String> = widths
                .iter()
                .map(|w| format!("{{\"w\":{}}},\"k\"", w))
                .collect();
            let doc = format!("[[{}]]", tokens.join(","));

            let layout = parse_kle(&doc).unwrap();
            let total: f64 = widths.iter().map(|&w| w as f64).sum();
            let last = layout.rows[0].last().unwrap();
            prop_assert_eq!(last.x + last.width / 2.0, total);
        }
    }
}

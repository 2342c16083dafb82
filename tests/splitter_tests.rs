use plateforge::config::KeyboardConfig;
use plateforge::error::Diagnostic;
use plateforge::geometry::kle::parse_kle;
use plateforge::outline::compute_outline;
use plateforge::splitter::plan_split;

/// Toy scale: 1mm pitch, 0.8mm switch. Keeps the arithmetic readable.
fn toy_config(printer: f64) -> KeyboardConfig {
    let mut config = KeyboardConfig::default();
    config.switch.unit = 1.0;
    config.switch.switch_width = 0.8;
    config.switch.switch_depth = 0.8;
    config.printer.printer_width = printer;
    config.printer.printer_depth = printer;
    config.printer.printer_height = printer;
    config
}

fn row_of(keys: usize) -> String {
    (0..keys)
        .map(|i| format!("\"k{}\"", i))
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn plate_that_fits_needs_no_split() {
    let config = toy_config(200.0);
    let layout = parse_kle(&format!("[[{}]]", row_of(10))).unwrap();
    let outline = compute_outline(&layout, &config);

    let plan = plan_split(&layout, &outline, &config);
    assert!(plan.is_empty());
    assert_eq!(plan.part_count(), 1);
    assert!(plan.diagnostics.is_empty());
}

#[test]
fn fair_split_threads_a_gap_between_key_blocks() {
    // Two 19-key blocks with a 2u gap: 40.2mm wide on a 21mm bed. The one
    // cut lands at the fair pitch, inside the gap, untouched by any key.
    let config = toy_config(21.0);
    let layout = parse_kle(&format!("[[{},{{\"x\":2}},{}]]", row_of(19), row_of(19))).unwrap();
    let outline = compute_outline(&layout, &config);
    assert!((outline.width - 40.2).abs() < 1e-9);

    let plan = plan_split(&layout, &outline, &config);
    assert_eq!(plan.width_splits, 2);
    assert!((plan.width_to_split - 20.1).abs() < 1e-9);
    assert_eq!(plan.groups.len(), 1);
    assert_eq!(plan.groups[0].cut_points.len(), 1);
    assert!((plan.groups[0].cut_points[0] - 20.1).abs() < 1e-9);
    assert!(plan.diagnostics.is_empty());
}

#[test]
fn cut_pulls_back_to_the_blocking_keys_left_edge() {
    // 39 unit keys plus a 0.8u key: exactly 40mm wide, 20mm bed. The fair
    // cut at 20 would bisect the 20th key, so it retreats to that key's
    // left edge at 19.1.
    let config = toy_config(20.0);
    let layout = parse_kle(&format!("[[{},{{\"w\":0.8}},\"end\"]]", row_of(39))).unwrap();
    let outline = compute_outline(&layout, &config);
    assert!((outline.width - 40.0).abs() < 1e-9);

    let plan = plan_split(&layout, &outline, &config);
    assert_eq!(plan.width_splits, 2);
    assert!((plan.width_to_split - 20.0).abs() < 1e-9);
    assert_eq!(plan.groups.len(), 1);

    let cut = plan.groups[0].cut_points[0];
    assert!((cut - 19.1).abs() < 1e-9);
    assert!(cut <= plan.width_to_split);
    assert!(plan.diagnostics.is_empty());

    // The cut never lands strictly inside an occupied span.
    let margin = outline.left_margin();
    for key in &layout.rows[0] {
        let (start, end) = key.span();
        let start = start * config.switch.unit + margin;
        let end = end * config.switch.unit + margin;
        assert!(
            cut <= start + 1e-9 || cut >= end - 1e-9,
            "cut {} inside span [{}, {}]",
            cut,
            start,
            end
        );
    }
}

#[test]
fn rows_get_independent_cuts_joined_by_a_zigzag() {
    let config = toy_config(21.0);
    // Row 0 forces a pull-back to 19.1, row 1 (2u keys) cuts cleanly at the
    // pitch. The polyline jogs between them.
    let wide_row = (0..20)
        .map(|i| format!("{{\"w\":2}},\"w{}\"", i))
        .collect::<Vec<_>>()
        .join(",");
    let layout = parse_kle(&format!("[[{}],[{}]]", row_of(40), wide_row)).unwrap();
    let outline = compute_outline(&layout, &config);

    let plan = plan_split(&layout, &outline, &config);
    assert_eq!(plan.groups.len(), 1);

    let group = &plan.groups[0];
    assert!((group.cut_points[0] - 19.1).abs() < 1e-9);
    assert!((group.cut_points[1] - 20.1).abs() < 1e-9);

    // Top of the plate to the bottom, one jog at the row boundary: midway
    // between row 0's holes (ending at 1.0) and row 1's (starting at 1.2).
    let polyline = &group.polyline;
    assert_eq!(polyline.first().map(|p| p.1), Some(0.0));
    assert_eq!(polyline.last().map(|p| p.1), Some(outline.height));
    assert_eq!(polyline.len(), 4);
    assert!((polyline[1].1 - 1.1).abs() < 1e-9);
    assert!((polyline[2].1 - 1.1).abs() < 1e-9);
    assert!(plan.diagnostics.is_empty());
}

#[test]
fn jog_sits_inside_an_explicit_row_gap() {
    let config = toy_config(21.0);
    // Same rows as above, but the second one drops half a unit. The jog has
    // to follow the gap, not assume one-unit rows.
    let wide_row = (0..20)
        .map(|i| format!("{{\"w\":2}},\"w{}\"", i))
        .collect::<Vec<_>>()
        .join(",");
    let layout = parse_kle(&format!(
        "[[{}],[{{\"y\":0.5}},{}]]",
        row_of(40),
        wide_row
    ))
    .unwrap();
    let outline = compute_outline(&layout, &config);
    assert!((outline.height - 2.7).abs() < 1e-9);

    let plan = plan_split(&layout, &outline, &config);
    assert_eq!(plan.groups.len(), 1);

    let jog_y = plan.groups[0].polyline[1].1;
    assert!((jog_y - 1.35).abs() < 1e-9);
    // Row 0 holes end at 1.0, row 1 holes start at 1.7.
    assert!(jog_y > 1.0 && jog_y < 1.7);
    assert_eq!(plan.groups[0].polyline.last().map(|p| p.1), Some(2.7));
}

#[test]
fn unclearable_key_is_flagged_infeasible() {
    let config = toy_config(20.0);
    let layout = parse_kle(r#"[[{"w":30},"Space"]]"#).unwrap();
    let outline = compute_outline(&layout, &config);

    let plan = plan_split(&layout, &outline, &config);
    assert!(!plan.groups.is_empty());
    assert!(plan
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::SplitInfeasible { row: 0, .. })));
}

#[test]
fn depth_overflow_is_reported_but_not_swept() {
    let config = toy_config(20.0);
    let doc = format!(
        "[{}]",
        (0..30).map(|_| "[\"A\"]").collect::<Vec<_>>().join(",")
    );
    let layout = parse_kle(&doc).unwrap();
    let outline = compute_outline(&layout, &config);

    let plan = plan_split(&layout, &outline, &config);
    assert!(plan.groups.is_empty());
    assert_eq!(plan.diagnostics.len(), 1);
    assert!(matches!(
        plan.diagnostics[0],
        Diagnostic::DepthOverflow { .. }
    ));
}

#[test]
fn bottom_follows_the_plate_cuts_by_default() {
    let config = toy_config(21.0);
    let layout = parse_kle(&format!("[[{},{{\"x\":2}},{}]]", row_of(19), row_of(19))).unwrap();
    let outline = compute_outline(&layout, &config);

    let plan = plan_split(&layout, &outline, &config);
    assert_eq!(plan.bottom_cuts.len(), plan.groups.len());
    assert_eq!(plan.bottom_cuts[0], plan.groups[0].polyline);
}

#[test]
fn straight_bottom_cut_ignores_the_zigzag() {
    let mut config = toy_config(21.0);
    config.flags.split_bottom_straight = true;
    let layout = parse_kle(&format!("[[{},{{\"x\":2}},{}]]", row_of(19), row_of(19))).unwrap();
    let outline = compute_outline(&layout, &config);

    let plan = plan_split(&layout, &outline, &config);
    assert_eq!(plan.bottom_cuts.len(), 1);
    let cut = &plan.bottom_cuts[0];
    assert_eq!(cut.len(), 2);
    assert!((cut[0].0 - outline.width / 2.0).abs() < 1e-9);
    assert_eq!(cut[0].1, 0.0);
    assert_eq!(cut[1].1, outline.height);
}

#[test]
fn unfair_split_packs_full_printer_widths() {
    let mut config = toy_config(21.0);
    config.flags.fair_split = false;
    let layout = parse_kle(&format!("[[{},{{\"x\":2}},{}]]", row_of(19), row_of(19))).unwrap();
    let outline = compute_outline(&layout, &config);

    let plan = plan_split(&layout, &outline, &config);
    assert!((plan.width_to_split - 21.0).abs() < 1e-9);
    assert_eq!(plan.groups.len(), 1);
    // The full printer width lands in the gap, ahead of the second block.
    let cut = plan.groups[0].cut_points[0];
    assert!((cut - 21.0).abs() < 1e-9);
    assert!(plan.diagnostics.is_empty());
}

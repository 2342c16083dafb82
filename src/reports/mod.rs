use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use plateforge::api::KeyboardModel;
use plateforge::error::Diagnostic;
use plateforge::geometry::kle::Layout;

pub fn print_summary(model: &KeyboardModel) {
    println!("\n📊 === GENERATION SUMMARY === 📊");

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Value"]);

    table.add_row(vec![
        Cell::new("Keys"),
        Cell::new(model.layout.key_count).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Rows"),
        Cell::new(model.layout.rows.len()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Plate (mm)"),
        Cell::new(format!(
            "{:.1} x {:.1}",
            model.outline.width, model.outline.height
        ))
        .set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Printable parts"),
        Cell::new(model.part_count()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Progress steps"),
        Cell::new(model.progress_steps()).set_alignment(CellAlignment::Right),
    ]);

    println!("{table}");

    if !model.split_plan.is_empty() {
        println!(
            "✂️  Split: {} part(s) at {:.1} mm pitch",
            model.split_plan.width_splits, model.split_plan.width_to_split
        );
    }
}

pub fn print_key_table(layout: &Layout) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Row", "Key", "x (u)", "y (u)", "w (u)", "h (u)", "Support", "Switches",
        ]);

    for (row_idx, row) in layout.rows.iter().enumerate() {
        for (key_idx, key) in row.iter().enumerate() {
            let switches = if key.is_multi_switch {
                format!("{} (multi)", key.switches.len())
            } else {
                "1".to_string()
            };
            table.add_row(vec![
                Cell::new(row_idx),
                Cell::new(key_idx),
                Cell::new(format!("{:.2}", key.x)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", key.y)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", key.width)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}", key.height)).set_alignment(CellAlignment::Right),
                Cell::new(key.support),
                Cell::new(switches),
            ]);
        }
    }

    println!("{table}");
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("✅ No diagnostics");
        return;
    }
    println!("\n⚠️  {} diagnostic(s):", diagnostics.len());
    for d in diagnostics {
        println!("   - {}", d);
    }
}

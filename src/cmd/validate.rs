use clap::Args;
use plateforge::config::KeyboardConfig;
use plateforge::error::PfResult;
use plateforge::geometry::annotate_rows;
use plateforge::layouts::KnownLayout;
use plateforge::outline::compute_outline;
use std::path::PathBuf;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: KeyboardConfig,

    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    pub preset: Option<KnownLayout>,
}

pub fn run(args: ValidateArgs) -> PfResult<()> {
    args.config.validate()?;
    let mut layout = super::load_layout(&args.layout, args.preset.or(Some(KnownLayout::Ansi104)))?;

    let mut diagnostics = std::mem::take(&mut layout.diagnostics);
    diagnostics.extend(annotate_rows(&mut layout.rows, &args.config));

    println!("\n🔎 === LAYOUT AUDIT === 🔎");
    reports::print_key_table(&layout);

    let outline = compute_outline(&layout, &args.config);
    println!(
        "\n📐 Plate outline: {:.1} x {:.1} mm ({:.2}u x {:.2}u)",
        outline.width, outline.height, outline.width_units, outline.height_units
    );

    reports::print_diagnostics(&diagnostics);
    Ok(())
}

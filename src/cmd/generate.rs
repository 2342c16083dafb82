use clap::Args;
use plateforge::api::{generate_from_layout, KeyboardModel};
use plateforge::config::KeyboardConfig;
use plateforge::error::PfResult;
use plateforge::frame::{FrameKind, JoinOption};
use plateforge::layouts::KnownLayout;
use std::fs;
use std::path::PathBuf;

use crate::reports;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: KeyboardConfig,

    /// KLE JSON layout file (keyboard-layout-editor.com export).
    #[arg(short, long)]
    pub layout: Option<PathBuf>,

    /// Built-in layout, used when no file is given.
    #[arg(short, long, value_enum, default_value_t = KnownLayout::Ansi104)]
    pub preset: KnownLayout,

    #[arg(long, value_enum, default_value_t = FrameKind::UkcDefault)]
    pub frame: FrameKind,

    #[arg(long, value_enum)]
    pub join: Option<JoinOption>,

    /// Output path for the model JSON; stdout when omitted.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> PfResult<()> {
    let layout = super::load_layout(&args.layout, Some(args.preset))?;
    println!("⌨️  Layout: {} ({} keys)", layout.name, layout.key_count);

    let model = generate_from_layout(layout, &args.config, args.frame, args.join)?;

    reports::print_summary(&model);
    reports::print_diagnostics(&model.diagnostics);

    emit(&model, &args.out)
}

fn emit(model: &KeyboardModel, out: &Option<PathBuf>) -> PfResult<()> {
    let json = serde_json::to_string_pretty(model)?;
    match out {
        Some(path) => {
            fs::write(path, json)?;
            println!("💾 Model written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

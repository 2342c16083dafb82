pub mod generate;
pub mod validate;

use plateforge::error::{PfResult, PlateForgeError};
use plateforge::geometry::kle::{parse_kle, Layout};
use plateforge::layouts::KnownLayout;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads the layout from a file or a built-in preset. Exactly the file-I/O
/// collaborator role; the library itself never touches the filesystem.
pub fn load_layout(file: &Option<PathBuf>, preset: Option<KnownLayout>) -> PfResult<Layout> {
    match (file, preset) {
        (Some(path), _) => {
            let content = fs::read_to_string(path)?;
            let mut layout = parse_kle(&content)?;
            if layout.name.is_empty() {
                // Fall back to the file name, like an unnamed KLE export.
                layout.name = Path::new(path)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
            }
            Ok(layout)
        }
        (None, Some(preset)) => parse_kle(preset.kle_json()),
        (None, None) => Err(PlateForgeError::Config(
            "either --layout <file> or --preset <name> is required".to_string(),
        )),
    }
}

//! Path utilities for input selection and destination naming

use std::path::{Path, PathBuf};

/// Path utilities
pub struct PathUtils;

impl PathUtils {
    /// File extension exactly as written (no dot, case preserved)
    pub fn get_extension(path: &Path) -> String {
        path.extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name as a string
    pub fn get_file_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Case-insensitive extension check against an accepted list
    pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                extensions
                    .iter()
                    .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            })
            .unwrap_or(false)
    }

    /// Destination for a rendered name: `rename` stays beside the source,
    /// other modes go to `output_dir` when one is given.
    pub fn destination_for(
        source: &Path,
        output_dir: Option<&Path>,
        stay_in_place: bool,
        rendered_name: &str,
    ) -> PathBuf {
        let source_dir = source.parent().unwrap_or_else(|| Path::new(""));
        let base = match output_dir {
            Some(dir) if !stay_in_place => dir,
            _ => source_dir,
        };
        base.join(rendered_name)
    }
}

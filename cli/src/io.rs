use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::WorkspaceError;

pub const INPUT_DIR: &str = "input";
pub const OUTPUT_DIR: &str = "output";

/// Directories making up a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new(root: &Path) -> Self {
        Self {
            input: root.join(INPUT_DIR),
            output: root.join(OUTPUT_DIR),
        }
    }

    /// Create `input/` and `output/` (and the root) if missing.
    pub fn init(root: &Path) -> Result<Self, WorkspaceError> {
        let workspace = Self::new(root);
        for dir in [&workspace.input, &workspace.output] {
            fs::create_dir_all(dir).map_err(|e| WorkspaceError::CreateDir {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(workspace)
    }
}

/// Collect the regular files directly inside `dir`, sorted by name.
///
/// Subdirectories are skipped, not recursed. Files of any extension are
/// returned so that unsupported inputs are reported by the transcoder.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>, WorkspaceError> {
    if !dir.is_dir() {
        return Err(WorkspaceError::NotADirectory(dir.to_path_buf()));
    }

    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_file() => Some(Ok(e.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(WorkspaceError::from(e))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_both_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("ws");

        let ws = Workspace::init(&root).unwrap();
        assert!(ws.input.is_dir());
        assert!(ws.output.is_dir());

        // Existing directories are fine.
        assert_eq!(Workspace::init(&root).unwrap(), ws);
    }

    #[test]
    fn test_collect_inputs_flat_and_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("c.png"), b"c").unwrap();
        fs::write(temp.path().join("a.jpg"), b"a").unwrap();
        fs::write(temp.path().join("b.bmp"), b"b").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("d.png"), b"d").unwrap();

        let files = collect_inputs(temp.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.bmp", "c.png"]);
    }

    #[test]
    fn test_collect_inputs_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = collect_inputs(&temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotADirectory(_)));
    }
}

#![deny(missing_docs)]

//! # File Helpers
//!
//! Loading group files and writing command output.

use apidoc_core::{parse_group_file, AppError, AppResult, PathGroup};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Parses every group file, in command-line order.
pub fn load_groups(paths: &[PathBuf]) -> AppResult<Vec<PathGroup>> {
    if paths.is_empty() {
        return Err(AppError::General("No group files given".to_string()));
    }

    paths
        .iter()
        .map(|path| {
            if !path.exists() {
                return Err(AppError::General(format!(
                    "Group file not found: {:?}",
                    path
                )));
            }
            debug!(file = ?path, "Loading path group.");
            parse_group_file(path)
        })
        .collect()
}

/// Writes `content` to `output`, or to stdout when no output is given.
pub fn write_output(output: Option<&Path>, content: &str) -> AppResult<()> {
    let Some(out_path) = output else {
        println!("{}", content);
        return Ok(());
    };

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::General(format!("Failed to create output directory: {}", e))
            })?;
        }
    }
    fs::write(out_path, content)
        .map_err(|e| AppError::General(format!("Failed to write output file: {}", e)))?;
    eprintln!("Wrote {:?}", out_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_groups_names_by_stem() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pets.yaml");
        fs::write(&path, "paths: {}\n").unwrap();

        let groups = load_groups(&[path]).unwrap();
        assert_eq!(groups[0].name(), "pets");
    }

    #[test]
    fn test_load_groups_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_groups(&[dir.path().join("nope.yaml")]);
        match result {
            Err(AppError::General(msg)) => assert!(msg.contains("Group file not found")),
            other => panic!("unexpected: {:?}", other.map(|g| g.len())),
        }
    }

    #[test]
    fn test_write_output_creates_dirs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested/out.json");
        write_output(Some(&out), "{}").unwrap();
        assert_eq!(fs::read_to_string(out).unwrap(), "{}");
    }
}

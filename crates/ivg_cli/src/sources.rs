//! SVG source discovery

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand files and directories into the SVG files to convert
///
/// Directories are walked recursively in file-name order. Files are kept in
/// the order given and repeated files are dropped.
pub fn collect(sources: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for source in sources {
        if source.is_dir() {
            for entry in WalkDir::new(source).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("Failed to walk {}", source.display()))?;
                if entry.file_type().is_file() && is_svg(entry.path()) {
                    push_unique(&mut files, entry.into_path());
                }
            }
        } else if source.is_file() {
            push_unique(&mut files, source.clone());
        } else {
            anyhow::bail!("{} does not exist", source.display());
        }
    }

    tracing::debug!(count = files.len(), "collected svg sources");
    Ok(files)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("a/b.svg")));
        assert!(is_svg(Path::new("B.SVG")));
        assert!(!is_svg(Path::new("b.svgz")));
        assert!(!is_svg(Path::new("svg")));
    }

    #[test]
    fn test_collect_walks_sorted() {
        let root = std::env::temp_dir().join(format!("svg2ivg-sources-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("nested")).unwrap();
        for name in ["b.svg", "a.svg", "notes.txt", "nested/c.svg"] {
            fs::write(root.join(name), "<svg/>").unwrap();
        }

        let files = collect(&[root.clone(), root.join("a.svg")]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(&root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.svg"),
                PathBuf::from("b.svg"),
                PathBuf::from("nested/c.svg"),
            ]
        );

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_source() {
        let missing = std::env::temp_dir().join("svg2ivg-missing-source.svg");
        assert!(collect(&[missing]).is_err());
    }
}

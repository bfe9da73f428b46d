use crate::classify::{Classifier, normalize};
use std::path::Path;
use tracing::{debug, trace};

const MAX_WALK_DEPTH: usize = 64;

/// Collect scannable files under `root`, pruning excluded directories.
///
/// Entries are visited in sorted order so repeated runs list files identically.
pub fn collect_files(root: &Path, classifier: &Classifier) -> Vec<String> {
    let mut files = Vec::new();
    if let Err(e) = walk_recursive(root, classifier, &mut files, 0) {
        debug!("Walk of {} stopped early: {}", root.display(), e);
    }
    debug!("Walk found {} scannable files", files.len());
    files
}

fn walk_recursive(
    path: &Path,
    classifier: &Classifier,
    files: &mut Vec<String>,
    depth: usize,
) -> std::io::Result<()> {
    if depth > MAX_WALK_DEPTH {
        return Ok(());
    }

    let mut entries = std::fs::read_dir(path)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    entries.sort();

    for entry_path in entries {
        let Some(name) = entry_path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if entry_path.is_dir() {
            if classifier.is_excluded_dir(name) {
                trace!("Pruning {}", entry_path.display());
                continue;
            }
            if let Err(e) = walk_recursive(&entry_path, classifier, files, depth + 1) {
                debug!("Skipping unreadable directory {}: {}", entry_path.display(), e);
            }
        } else if entry_path.is_file() {
            if let Some(path_str) = entry_path.to_str() {
                if classifier.is_scannable_extension(path_str) {
                    files.push(normalize(path_str));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use std::fs;

    #[test]
    fn test_walk_prunes_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("App")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".build")).unwrap();
        fs::write(root.join("App/b.swift"), "").unwrap();
        fs::write(root.join("App/a.swift"), "").unwrap();
        fs::write(root.join("App/script.py"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();
        fs::write(root.join("node_modules/pkg/index.json"), "").unwrap();
        fs::write(root.join(".build/out.json"), "").unwrap();

        let classifier = Classifier::new(&ScanConfig::default()).unwrap();
        let files = collect_files(root, &classifier);
        let relative: Vec<String> = files
            .iter()
            .map(|f| {
                Path::new(f)
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(relative, vec!["App/a.swift", "App/b.swift", "README.md"]);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let classifier = Classifier::new(&ScanConfig::default()).unwrap();
        assert!(collect_files(&dir.path().join("absent"), &classifier).is_empty());
    }
}

//! Lazy, restartable file walk.
//!
//! An explicit-stack iterator over eligible files under a root. Depth is
//! irrelevant to callers; exclusion and extension filters are applied as
//! entries are discovered. Unreadable directories are skipped and the
//! walk continues.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use vigil_core::DetectorConfig;

use super::filters::WalkFilters;

/// Iterator over the eligible files under a root path.
///
/// Restartable: constructing a new `FileWalk` over the same root yields
/// the same sequence. Directory entries are visited in name order so the
/// sequence is stable across platforms.
pub struct FileWalk {
    root: PathBuf,
    stack: Vec<PathBuf>,
    filters: WalkFilters,
}

impl FileWalk {
    pub fn new(root: &Path, config: &DetectorConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            stack: vec![root.to_path_buf()],
            filters: WalkFilters::new(root, config),
        }
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    fn push_children(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "unreadable directory, skipped");
                return;
            }
        };
        let mut children: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
        // Reverse name order: the stack pops the lexically first entry next.
        children.sort();
        children.reverse();
        self.stack.extend(children);
    }
}

impl Iterator for FileWalk {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        while let Some(path) = self.stack.pop() {
            if path.is_dir() {
                let prune = path != self.root && {
                    let relative = self.relative(&path);
                    self.filters.prune_dir(relative)
                };
                if !prune {
                    self.push_children(&path);
                }
                continue;
            }
            if !path.is_file() {
                continue;
            }

            // A root that is itself a file has an empty relative path;
            // filter on its file name instead.
            let eligible = if path == self.root {
                path.file_name()
                    .map(|name| self.filters.eligible_file(Path::new(name)))
                    .unwrap_or(false)
            } else {
                self.filters.eligible_file(self.relative(&path))
            };
            if eligible {
                return Some(path);
            }
        }
        None
    }
}

/// Relative path of `path` under `root` as a forward-slash string,
/// suitable for classification and receipts.
pub fn relative_str(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let s = relative.to_string_lossy().replace('\\', "/");
    if s.is_empty() {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "content").unwrap();
    }

    #[test]
    fn walks_eligible_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("hot/bronze/b.ts"));
        touch(&dir.path().join("hot/bronze/a.ts"));
        touch(&dir.path().join("hot/bronze/image.png"));
        touch(&dir.path().join("node_modules/dep/index.js"));

        let config = DetectorConfig::default();
        let files: Vec<String> = FileWalk::new(dir.path(), &config)
            .map(|p| relative_str(dir.path(), &p))
            .collect();

        assert_eq!(files, vec!["hot/bronze/a.ts", "hot/bronze/b.ts"]);
    }

    #[test]
    fn restartable_yields_same_sequence() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("cold/silver/x.rs"));
        touch(&dir.path().join("cold/silver/y.rs"));

        let config = DetectorConfig::default();
        let first: Vec<PathBuf> = FileWalk::new(dir.path(), &config).collect();
        let second: Vec<PathBuf> = FileWalk::new(dir.path(), &config).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn root_may_be_a_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("solo.ts");
        touch(&file);

        let config = DetectorConfig::default();
        let files: Vec<PathBuf> = FileWalk::new(&file, &config).collect();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let config = DetectorConfig::default();
        let files: Vec<PathBuf> = FileWalk::new(Path::new("/no/such/dir"), &config).collect();
        assert!(files.is_empty());
    }
}

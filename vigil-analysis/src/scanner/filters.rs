//! Walk filters: directory exclusion, extension matching, whitelist.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use rustc_hash::FxHashSet;

use vigil_core::DetectorConfig;

/// Compiled filters applied during a walk.
pub struct WalkFilters {
    excludes: Gitignore,
    extensions: FxHashSet<String>,
    whitelist: Option<GlobSet>,
}

impl WalkFilters {
    /// Compile filters from a detector configuration.
    pub fn new(root: &Path, config: &DetectorConfig) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in &config.exclude_dirs {
            let _ = builder.add_line(None, pattern);
        }
        let excludes = builder
            .build()
            .unwrap_or_else(|_| Gitignore::empty());

        let extensions = config
            .file_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        let whitelist = config.whitelist.as_ref().map(|patterns| {
            let mut builder = GlobSetBuilder::new();
            for pattern in patterns {
                if let Ok(glob) = Glob::new(pattern) {
                    builder.add(glob);
                }
            }
            builder.build().unwrap_or_else(|_| GlobSet::empty())
        });

        Self {
            excludes,
            extensions,
            whitelist,
        }
    }

    /// Whether a directory should be pruned from the walk.
    pub fn prune_dir(&self, relative: &Path) -> bool {
        self.excludes.matched(relative, true).is_ignore()
    }

    /// Whether a file is eligible: not excluded, extension-matched, and
    /// whitelist-matched if a whitelist is given.
    pub fn eligible_file(&self, relative: &Path) -> bool {
        if self.excludes.matched(relative, false).is_ignore() {
            return false;
        }
        let matched_ext = relative
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_ascii_lowercase()))
            .unwrap_or(false);
        if !matched_ext {
            return false;
        }
        match &self.whitelist {
            Some(globs) => globs.is_match(relative),
            None => true,
        }
    }
}

//! Per-detector scan configuration.

use serde::{Deserialize, Serialize};

use crate::violation::Severity;

/// Directories excluded from every scan unless overridden: version
/// control, dependencies, build output, caches.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    "node_modules",
    "vendor",
    "target",
    "dist",
    "build",
    "out",
    "__pycache__",
    ".venv",
    "venv",
    "coverage",
    ".cache",
    ".idea",
    ".vscode",
    "tmp",
];

/// Extensions eligible for scanning by default: common source files
/// plus the report/config formats score claims hide in.
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "py", "rs", "go", "java", "cs", "rb", "php", "kt",
    "swift", "md", "json", "yaml", "yml", "toml",
];

/// Recognized options for a detector run. Unspecified options take the
/// documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Disabled detectors return an empty result without walking.
    pub enabled: bool,
    /// Violations below this severity are not reported.
    pub severity_floor: Severity,
    /// Directory names (gitignore-style patterns) pruned from the walk.
    pub exclude_dirs: Vec<String>,
    /// File extensions eligible for scanning.
    pub file_extensions: Vec<String>,
    /// Optional glob whitelist; when present, files must also match it.
    pub whitelist: Option<Vec<String>>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity_floor: Severity::Warning,
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            file_extensions: DEFAULT_FILE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            whitelist: None,
        }
    }
}

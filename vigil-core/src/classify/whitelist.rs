//! Root-tier whitelist.
//!
//! Only consulted for ROOT-classified paths: a small explicit set of
//! files and directories that are allowed to live outside the storage
//! roots, plus filename patterns for dated notes and generated config.

use once_cell::sync::Lazy;
use regex::Regex;

/// Files allowed at the repository root.
const WHITELISTED_FILES: &[&str] = &[
    "README.md",
    "LICENSE",
    "CHANGELOG.md",
    "Cargo.toml",
    "package.json",
    "tsconfig.json",
    ".gitignore",
    ".gitattributes",
    "vigil.toml",
];

/// Directories allowed at the repository root.
const WHITELISTED_DIRS: &[&str] = &[
    "docs",
    "scripts",
    ".github",
    ".vigil",
];

static WHITELISTED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Dated notes: 2024-06-01-retro.md
        r"^\d{4}-\d{2}-\d{2}-[\w-]+\.md$",
        // Generated rc files: .eslintrc, .prettierrc.json, .babelrc.js
        r"^\.[\w-]+rc(\.(js|cjs|json|ya?ml|toml))?$",
        // Tool config modules: vite.config.ts, jest.config.js
        r"^[\w-]+\.config\.(js|cjs|mjs|ts|json)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static whitelist pattern"))
    .collect()
});

/// Check the first path segment of `name` against the root whitelist.
pub fn is_whitelisted(name: &str) -> bool {
    let normalized = name.replace('\\', "/");
    let first = normalized
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();
    if first.is_empty() {
        return false;
    }

    WHITELISTED_FILES.contains(&first)
        || WHITELISTED_DIRS.contains(&first)
        || WHITELISTED_PATTERNS.iter().any(|p| p.is_match(first))
}

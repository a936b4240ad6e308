//! Loading type-checked modules.
//!
//! The [`Loader`] trait is the seam between the resolver and whatever
//! produces type information. [`DumpLoader`] reads modules serialized as
//! JSON semantic dumps.

use crate::error::{GedError, Result};
use crate::semantic::Module;
use glob::glob;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Produces fully type-checked modules for a list of module identifiers.
///
/// Implementations must fail the whole call if any module cannot be loaded
/// or has type errors; callers never see partially analysed modules.
pub trait Loader {
    /// Load every module named by `modules`.
    fn load(&self, modules: &[String]) -> Result<Vec<Module>>;
}

/// Suffix requesting a recursive directory search, as in `./...`.
const RECURSIVE_SUFFIX: &str = "/...";

/// Loader for JSON semantic dumps on disk.
///
/// Module identifiers are resolved relative to `root`:
/// - `mod.json` loads that file,
/// - `dir` loads every `*.json` directly inside `dir`,
/// - `dir/...` loads every `*.json` below `dir`.
#[derive(Debug, Clone)]
pub struct DumpLoader {
    root: PathBuf,
}

impl DumpLoader {
    /// Create a loader resolving identifiers against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loader rooted at the current working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Expand one module identifier into the dump files it names.
    fn dump_files(&self, module: &str) -> Result<Vec<PathBuf>> {
        let (dir, recursive) = match module.strip_suffix(RECURSIVE_SUFFIX) {
            Some(dir) => (if dir.is_empty() { "." } else { dir }, true),
            None if module == "..." => (".", true),
            None => (module, false),
        };
        let base = self.root.join(dir);

        if !recursive && base.is_file() {
            return Ok(vec![base]);
        }
        if !base.is_dir() {
            return Err(GedError::load(module, "no such dump file or directory"));
        }

        let pattern = if recursive {
            base.join("**").join("*.json")
        } else {
            base.join("*.json")
        };
        let pattern = pattern.to_str().ok_or_else(|| {
            GedError::load(module, format!("invalid UTF-8 in path: {:?}", base))
        })?;

        let mut files = Vec::new();
        let entries = glob(pattern)
            .map_err(|e| GedError::load(module, format!("invalid glob pattern: {}", e)))?;
        for entry in entries {
            let path = entry.map_err(|e| GedError::load(module, format!("glob error: {}", e)))?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(GedError::load(module, "no semantic dumps found"));
        }
        Ok(files)
    }
}

impl Loader for DumpLoader {
    fn load(&self, modules: &[String]) -> Result<Vec<Module>> {
        let mut seen = BTreeSet::new();
        let mut loaded = Vec::new();
        let mut failed = 0;

        for module in modules {
            for path in self.dump_files(module)? {
                if !seen.insert(path.clone()) {
                    continue;
                }
                let parsed = read_dump(&path)?;
                if !parsed.errors.is_empty() {
                    for err in &parsed.errors {
                        log::error!("{}: {}", parsed.path, err);
                    }
                    failed += 1;
                }
                loaded.push(parsed);
            }
        }

        if failed > 0 {
            let bad: Vec<&str> = loaded
                .iter()
                .filter(|m| !m.errors.is_empty())
                .map(|m| m.path.as_str())
                .collect();
            return Err(GedError::load(
                &bad.join(", "),
                format!("package loading has error ({} module(s))", failed),
            ));
        }

        log::info!(
            "loaded {} module(s) from {} identifier(s)",
            loaded.len(),
            modules.len()
        );
        Ok(loaded)
    }
}

/// Read, parse and validate a single dump file.
pub fn read_dump(path: &Path) -> Result<Module> {
    let content = fs::read_to_string(path).map_err(|e| GedError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let display = path.display().to_string();
    let module: Module = serde_json::from_str(&content)
        .map_err(|e| GedError::load(&display, format!("JSON parse error: {}", e)))?;

    if module.path.is_empty() {
        return Err(GedError::load(&display, "dump has an empty module path"));
    }
    module
        .check_references()
        .map_err(|msg| GedError::load(&module.path, msg))?;

    log::debug!(
        "read {} ({} file(s), {} use(s), {} selection(s))",
        module.path,
        module.files.len(),
        module.uses.len(),
        module.selections.len()
    );
    Ok(module)
}

use anyhow::{Context, Result, bail};
use isect_checker::{CheckerOptions, check_sources};
use isect_common::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};
use walkdir::WalkDir;

/// Everything a `check` run produced.
#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
    pub files_checked: Vec<PathBuf>,
    /// File text keyed by the path used in diagnostics.
    pub sources: FxHashMap<String, String>,
}

impl CheckResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

/// Expand `paths` into the files to check, in a stable order.
///
/// Files named explicitly are always included; directories contribute
/// files whose extension is in `extensions`.
pub fn collect_files(
    paths: &[PathBuf],
    extensions: &[String],
    cwd: &Path,
) -> Result<Vec<PathBuf>> {
    let _span = info_span!("collect_files", roots = paths.len()).entered();
    let mut seen = FxHashSet::default();
    let mut files = Vec::new();

    for root in paths {
        // Drops `.` components so `isect check .` reports `Foo.php`, not `./Foo.php`.
        let root: PathBuf = cwd.join(root).components().collect();
        if root.is_file() {
            if seen.insert(root.clone()) {
                files.push(root);
            }
            continue;
        }
        if !root.is_dir() {
            bail!("no such file or directory: {}", root.display());
        }

        let mut found: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(&root).follow_links(false) {
            let entry =
                entry.with_context(|| format!("failed to walk directory: {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)));
            if matches {
                found.push(entry.into_path());
            }
        }
        found.sort();
        for path in found {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    debug!(files = files.len(), "collected source files");
    Ok(files)
}

/// Diagnostics name files relative to `cwd` when possible.
fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Read, parse and link `files`.
pub fn check_files(
    files: &[PathBuf],
    options: &CheckerOptions,
    cwd: &Path,
) -> Result<CheckResult> {
    let _span = info_span!("check_files", files = files.len()).entered();
    let mut sources: Vec<(String, String)> = Vec::with_capacity(files.len());
    for path in files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        sources.push((display_path(path, cwd), text));
    }

    let outcome = check_sources(
        sources.iter().map(|(name, text)| (name.as_str(), text.as_str())),
        options,
    );
    debug!(
        diagnostics = outcome.diagnostics.len(),
        classes = outcome.hierarchy.len(),
        "check finished"
    );

    Ok(CheckResult {
        diagnostics: outcome.diagnostics,
        files_checked: files.to_vec(),
        sources: sources.into_iter().collect(),
    })
}

//! `isect.json` loading and command-line overlay.
//!
//! ```json
//! {
//!   "unresolvedPolicy": "permissive",
//!   "lintCallableMembers": false,
//!   "maxSubtypeDepth": 50,
//!   "extensions": ["php", "inc"]
//! }
//! ```
//!
//! Every field is optional. Flags given on the command line win over the
//! file.

use anyhow::{Context, Result, bail};
use isect_checker::CheckerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::args::CheckArgs;

pub const CONFIG_FILE_NAME: &str = "isect.json";

fn default_extensions() -> Vec<String> {
    vec!["php".to_string()]
}

/// Contents of an `isect.json` file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsectConfig {
    #[serde(flatten)]
    pub checker: CheckerOptions,
    /// File extensions collected when walking directories, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for IsectConfig {
    fn default() -> Self {
        Self {
            checker: CheckerOptions::default(),
            extensions: default_extensions(),
        }
    }
}

pub fn parse_config(source: &str) -> Result<IsectConfig> {
    let config = serde_json::from_str(source).context("failed to parse isect.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<IsectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("invalid config: {}", path.display()))
}

/// The explicit `--config` path, or `isect.json` in `cwd` if it exists.
fn config_path(args: &CheckArgs, cwd: &Path) -> Result<Option<PathBuf>> {
    match &args.config {
        Some(path) => {
            let path = cwd.join(path);
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            Ok(Some(path))
        }
        None => {
            let path = cwd.join(CONFIG_FILE_NAME);
            Ok(path.is_file().then_some(path))
        }
    }
}

/// Load the config file (if any) and apply command-line overrides.
pub fn resolve_config(args: &CheckArgs, cwd: &Path) -> Result<IsectConfig> {
    let mut config = match config_path(args, cwd)? {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)?
        }
        None => IsectConfig::default(),
    };

    if args.permissive {
        config.checker = config.checker.permissive();
    }
    if args.no_lint {
        config.checker.lint_callable_members = false;
    }
    if let Some(extensions) = &args.extensions {
        config.extensions = extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
    }
    Ok(config)
}

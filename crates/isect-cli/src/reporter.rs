use colored::Colorize;
use isect_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, LineMap};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;

/// Renders diagnostics for a terminal.
///
/// ```text
/// src/Child.php:3:21 - error IS2001: Declaration of Child::make(): A must be compatible with Base::make(): A&X
///     3   class Child extends Base { public function make(): A {} }
///                                                    ~~~~
/// ```
pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Use already-loaded file text instead of reading files again.
    pub fn with_sources(mut self, sources: FxHashMap<String, String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let mut output = match self.format_location(&diagnostic.file, diagnostic.start) {
            Some(location) => location,
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };

        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        let code = self.format_code(diagnostic.code);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
        }
        output
    }

    /// `Found 2 errors and 1 warning in 3 files.`
    pub fn summary(&self, errors: usize, warnings: usize, files: usize) -> String {
        let plural = |n: usize, word: &str| {
            if n == 1 {
                format!("{n} {word}")
            } else {
                format!("{n} {word}s")
            }
        };
        let line = if errors == 0 && warnings == 0 {
            format!("No problems found in {}.", plural(files, "file"))
        } else {
            format!(
                "Found {} and {} in {}.",
                plural(errors, "error"),
                plural(warnings, "warning"),
                plural(files, "file")
            )
        };
        if !self.color {
            return line;
        }
        if errors > 0 {
            line.red().bold().to_string()
        } else if warnings > 0 {
            line.yellow().to_string()
        } else {
            line.green().to_string()
        }
    }

    /// The source line and a `~` underline below the span.
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }

        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_text = source.lines().nth((line_num - 1) as usize)?;

        let mut underline = String::new();
        let first = column - 1;
        for (i, ch) in line_text.chars().enumerate() {
            let i = i as u32;
            if i < first {
                underline.push_str(if ch == '\t' { "    " } else { " " });
            } else if i < first + length {
                underline.push_str(if ch == '\t' { "~~~~" } else { "~" });
            } else {
                break;
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn format_related(&mut self, related: &DiagnosticRelatedInformation) -> String {
        let location = self
            .format_location(&related.file, related.start)
            .unwrap_or_else(|| related.file.clone());
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };
        format!("{prefix}: {location} - {}", related.message_text)
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        let (line, column) = self.position_for(file, offset)?;
        let location = format!("{file}:{line}:{column}");
        Some(if self.color {
            location.cyan().to_string()
        } else {
            location
        })
    }

    /// 1-based line and column of `offset`.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        let source = self.sources.get(file)?;
        let line_map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }
        let label = format!("IS{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    error_count: usize,
    warning_count: usize,
    files_checked: usize,
}

/// Machine-readable report of a check run.
pub fn render_json(
    diagnostics: &[Diagnostic],
    errors: usize,
    warnings: usize,
    files: usize,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        diagnostics,
        error_count: errors,
        warning_count: warnings,
        files_checked: files,
    })
}

//! Command-line driver for the isect checker.
//!
//! `isect check <paths>` parses and links every source file it finds and
//! reports diagnostics as text or JSON. `isect render <type>` shows how a
//! single type expression is parsed, rendered and validated.

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

use anyhow::{Context, Result};
use isect_checker::validate_declaration;
use isect_solver::{canonical_form, render};
use serde_json::json;
use std::io::Write;
use std::path::Path;
use tracing::info;

use args::{CheckArgs, CliArgs, Command, OutputFormat, RenderArgs};
use reporter::{Reporter, render_json};

pub const EXIT_SUCCESS: i32 = 0;
/// Errors were reported, or the input could not be parsed.
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// The run itself failed: unreadable input, bad config.
pub const EXIT_FAILURE: i32 = 2;

/// Execute one command, writing its report to `out`. Returns the exit code.
pub fn run(args: &CliArgs, cwd: &Path, out: &mut impl Write) -> Result<i32> {
    match &args.command {
        Command::Check(check) => run_check(check, cwd, out),
        Command::Render(render) => run_render(render, out),
    }
}

fn run_check(args: &CheckArgs, cwd: &Path, out: &mut impl Write) -> Result<i32> {
    let config = config::resolve_config(args, cwd)?;
    let files = driver::collect_files(&args.paths, &config.extensions, cwd)?;
    let result = driver::check_files(&files, &config.checker, cwd)?;
    let errors = result.error_count();
    let warnings = result.warning_count();
    info!(files = files.len(), errors, warnings, "check complete");

    match args.format {
        OutputFormat::Json => {
            let report = render_json(&result.diagnostics, errors, warnings, files.len())
                .context("failed to serialize diagnostics")?;
            writeln!(out, "{report}")?;
        }
        OutputFormat::Text => {
            let mut reporter = Reporter::new(!args.no_color).with_sources(result.sources);
            if !result.diagnostics.is_empty() {
                writeln!(out, "{}", reporter.render(&result.diagnostics))?;
                writeln!(out)?;
            }
            writeln!(out, "{}", reporter.summary(errors, warnings, files.len()))?;
        }
    }

    Ok(if errors > 0 {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_SUCCESS
    })
}

fn run_render(args: &RenderArgs, out: &mut impl Write) -> Result<i32> {
    let ty = match isect_parser::parse_type(&args.ty) {
        Ok(ty) => ty,
        Err(err) => {
            match args.format {
                OutputFormat::Json => {
                    let value = json!({ "input": args.ty, "syntaxError": err.to_string() });
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                }
                OutputFormat::Text => writeln!(out, "syntax error: {err}")?,
            }
            return Ok(EXIT_DIAGNOSTICS);
        }
    };

    let rendered = render(&ty);
    let canonical = render(&canonical_form(&ty));
    let members: Vec<String> = ty
        .composite_members()
        .map(|members| members.iter().map(render).collect())
        .unwrap_or_default();
    let report = validate_declaration(&ty);
    let errors: Vec<String> = report.errors.iter().map(ToString::to_string).collect();
    let warnings: Vec<String> = report.warnings.iter().map(ToString::to_string).collect();

    match args.format {
        OutputFormat::Json => {
            let value = json!({
                "input": args.ty,
                "rendered": rendered,
                "kind": ty.kind_label(),
                "canonical": canonical,
                "members": members,
                "errors": errors,
                "warnings": warnings,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "rendered:  {rendered}")?;
            writeln!(out, "kind:      {}", ty.kind_label())?;
            writeln!(out, "canonical: {canonical}")?;
            if !members.is_empty() {
                writeln!(out, "members:   {}", members.join(", "))?;
            }
            for error in &errors {
                writeln!(out, "error:     {error}")?;
            }
            for warning in &warnings {
                writeln!(out, "warning:   {warning}")?;
            }
        }
    }

    Ok(if report.is_valid() {
        EXIT_SUCCESS
    } else {
        EXIT_DIAGNOSTICS
    })
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;

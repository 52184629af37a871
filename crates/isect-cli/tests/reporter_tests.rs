use super::*;
use isect_common::Diagnostic;
use rustc_hash::FxHashMap;

const SOURCE: &str = "<?php\nclass Child extends Base {\n    public function make(): A {}\n}\n";

fn reporter() -> Reporter {
    let mut sources = FxHashMap::default();
    sources.insert("src/Child.php".to_string(), SOURCE.to_string());
    Reporter::new(false).with_sources(sources)
}

fn make_diagnostic() -> Diagnostic {
    let start = SOURCE.find("make").unwrap() as u32;
    let base_decl = SOURCE.find("Base").unwrap() as u32;
    Diagnostic::error(
        "src/Child.php".to_string(),
        start,
        4,
        "Declaration of Child::make(): A must be compatible with Base::make(): A&X".to_string(),
        2001,
    )
    .with_related(
        "src/Child.php".to_string(),
        base_decl,
        4,
        "The overridden declaration is Base::make(): A&X".to_string(),
    )
}

#[test]
fn test_format_diagnostic_with_snippet() {
    let mut reporter = reporter();
    let text = reporter.format_diagnostic(&make_diagnostic());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "src/Child.php:3:21 - error IS2001: Declaration of Child::make(): A must be compatible with Base::make(): A&X"
    );
    assert_eq!(lines[1], "    3       public function make(): A {}");
    assert_eq!(lines[2], format!("        {}~~~~", " ".repeat(20)));
    assert_eq!(
        lines[3],
        "  Related: src/Child.php:2:21 - The overridden declaration is Base::make(): A&X"
    );
}

#[test]
fn test_warning_label() {
    let mut reporter = reporter();
    let diagnostic = Diagnostic::warning(
        "src/Child.php".to_string(),
        0,
        0,
        "Type callable in intersection type callable&A is only satisfied by invokable objects"
            .to_string(),
        1005,
    );
    let text = reporter.format_diagnostic(&diagnostic);
    assert!(text.starts_with("src/Child.php:1:1 - warning IS1005: "));
    // Zero-length spans get no snippet.
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_unknown_file_falls_back_to_name() {
    let mut reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error(
        "does/not/exist.php".to_string(),
        10,
        3,
        "expected type, found '}'".to_string(),
        1000,
    );
    let text = reporter.format_diagnostic(&diagnostic);
    assert_eq!(text, "does/not/exist.php - error IS1000: expected type, found '}'");
}

#[test]
fn test_render_separates_diagnostics() {
    let mut reporter = reporter();
    let first = make_diagnostic();
    let second = Diagnostic::error("src/Child.php".to_string(), 0, 5, "second".to_string(), 2004);
    let text = reporter.render(&[first, second]);
    assert_eq!(text.matches(" - error IS").count(), 2);
    assert!(text.contains("\nsrc/Child.php:1:1 - error IS2004: second"));
}

#[test]
fn test_summary() {
    let reporter = Reporter::new(false);
    assert_eq!(reporter.summary(0, 0, 1), "No problems found in 1 file.");
    assert_eq!(reporter.summary(2, 1, 3), "Found 2 errors and 1 warning in 3 files.");
    assert_eq!(reporter.summary(0, 2, 1), "Found 0 errors and 2 warnings in 1 file.");
}

#[test]
fn test_json_report() {
    let diagnostic = make_diagnostic();
    let json = render_json(std::slice::from_ref(&diagnostic), 1, 0, 4).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["errorCount"], 1);
    assert_eq!(value["warningCount"], 0);
    assert_eq!(value["filesChecked"], 4);
    assert_eq!(value["diagnostics"][0]["code"], 2001);
    assert_eq!(value["diagnostics"][0]["category"], "Error");
    assert_eq!(
        value["diagnostics"][0]["related_information"][0]["message_text"],
        "The overridden declaration is Base::make(): A&X"
    );
}

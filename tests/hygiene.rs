//! Source hygiene checks for the library and CLI.
//!
//! Production code must not panic and must not drop errors unlooked-at: the
//! gateway's contract is that persistence problems are logged, never thrown.
//! Each pattern below has a budget of zero in non-test sources.

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "panics on None/Err" },
    Budget { pattern: ".expect(", max: 0, why: "panics on None/Err" },
    Budget { pattern: "panic!(", max: 0, why: "crashes the process" },
    Budget { pattern: "unreachable!(", max: 0, why: "crashes the process" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "let _ =", max: 0, why: "discards a result without inspecting it" },
    Budget { pattern: ".ok()", max: 0, why: "discards an error without logging it" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "hides unused code" },
];

/// Non-test `.rs` files under `src/`, as (path, contents).
fn source_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect(Path::new("src"), &mut files);
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    files
}

fn collect(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn hits(files: &[(String, String)], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .map(|(path, content)| (path.clone(), content.lines().filter(|line| line.contains(pattern)).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

#[test]
fn production_sources_stay_within_budgets() {
    let files = source_files();
    let mut failures = Vec::new();

    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, n)| n).sum();
        if count > budget.max {
            let listing: Vec<String> = found.iter().map(|(path, n)| format!("    {path}: {n}")).collect();
            failures.push(format!(
                "`{}` ({}): found {count}, max {}\n{}",
                budget.pattern,
                budget.why,
                budget.max,
                listing.join("\n")
            ));
        }
    }

    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}

#[test]
fn every_module_with_tests_has_its_sibling_file() {
    for (path, content) in source_files() {
        for line in content.lines() {
            let Some(rest) = line.trim().strip_prefix("#[path = \"") else {
                continue;
            };
            let Some(file) = rest.strip_suffix("\"]") else {
                continue;
            };
            let sibling = Path::new(&path).with_file_name(file);
            assert!(sibling.exists(), "{path} names missing test file {}", sibling.display());
        }
    }
}

/// Optional crate features enabled in `Cargo.toml`, each with the source
/// text that shows it is needed.
const FEATURE_USES: &[(&str, &str, &str)] = &[
    ("time", "\"parsing\"", "::parse("),
    ("uuid", "\"serde\"", ": Uuid"),
];

#[test]
fn enabled_features_are_used() {
    let manifest = fs::read_to_string("Cargo.toml").unwrap();
    let mut files = source_files();
    collect_tests(Path::new("src"), &mut files);

    for (dependency, feature, marker) in FEATURE_USES {
        let Some(line) = manifest.lines().find(|line| line.starts_with(&format!("{dependency} = "))) else {
            continue;
        };
        if !line.contains(feature) {
            continue;
        }
        let used = files.iter().any(|(_, content)| content.contains(marker));
        assert!(used, "{dependency} enables {feature} but no source mentions `{marker}`");
    }
}

fn collect_tests(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect_tests(&path, out);
        } else if path.to_string_lossy().ends_with("_test.rs") {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path.to_string_lossy().to_string(), content));
            }
        }
    }
}

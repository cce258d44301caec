use noteloom_common::diff::diff_text;
use noteloom_common::types::{DiffKind, DiffLine};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct GoldenCase {
    name: String,
    before: String,
    after: String,
    expected: Vec<DiffLine>,
}

#[test]
fn line_diff_golden_cases() {
    let cases_dir = golden_cases_dir();
    let cases = load_cases(&cases_dir);

    assert!(!cases.is_empty(), "no golden cases found in {}", cases_dir.display());

    let mut failures = Vec::new();
    for case in cases {
        if let Err(message) = run_case(&case) {
            failures.push(message);
        }
    }

    if !failures.is_empty() {
        panic!("{} golden case(s) failed:\n\n{}", failures.len(), failures.join("\n\n"));
    }
}

fn golden_cases_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../tests/golden/cases")
}

fn load_cases(cases_dir: &Path) -> Vec<GoldenCase> {
    let mut case_dirs: Vec<PathBuf> = fs::read_dir(cases_dir)
        .unwrap_or_else(|error| panic!("failed to read {}: {error}", cases_dir.display()))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.is_dir() { Some(path) } else { None }
        })
        .collect();
    case_dirs.sort();
    case_dirs.into_iter().map(load_case).collect()
}

fn load_case(case_dir: PathBuf) -> GoldenCase {
    let name = case_dir
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or("<unnamed-case>")
        .to_owned();

    let before = read_required(&case_dir.join("before.md"));
    let after = read_required(&case_dir.join("after.md"));
    let expected_path = case_dir.join("expected.json");
    let expected = serde_json::from_str::<Vec<DiffLine>>(&read_required(&expected_path))
        .unwrap_or_else(|error| {
            panic!("failed to parse expected diff in {}: {error}", expected_path.display())
        });

    GoldenCase { name, before, after, expected }
}

fn run_case(case: &GoldenCase) -> Result<(), String> {
    let actual = diff_text(&case.before, &case.after);
    if actual != case.expected {
        return Err(format_mismatch(&case.name, &case.expected, &actual));
    }
    Ok(())
}

fn format_mismatch(case_name: &str, expected: &[DiffLine], actual: &[DiffLine]) -> String {
    let expected_rendered = render(expected);
    let actual_rendered = render(actual);
    let max_len = expected_rendered.len().max(actual_rendered.len());

    let mut diff_lines = Vec::with_capacity(max_len);
    for index in 0..max_len {
        let expected_line = expected_rendered.get(index).map(String::as_str).unwrap_or("<none>");
        let actual_line = actual_rendered.get(index).map(String::as_str).unwrap_or("<none>");
        let marker = if expected_line == actual_line { " " } else { "!" };
        diff_lines.push(format!(
            "{marker} [{index}] expected: {expected_line}\n      actual:   {actual_line}"
        ));
    }

    format!("case `{case_name}` diff mismatch.\n{}", diff_lines.join("\n"))
}

fn render(lines: &[DiffLine]) -> Vec<String> {
    lines
        .iter()
        .map(|line| match line.kind {
            DiffKind::Modified => format!(
                "modified(new={}, old={:?}, {:?} -> {:?})",
                line.line_number,
                line.old_line_number,
                line.old_content.as_deref().unwrap_or_default(),
                line.content
            ),
            kind => format!(
                "{kind:?}(new={}, old={:?}, {:?})",
                line.line_number, line.old_line_number, line.content
            ),
        })
        .collect()
}

fn read_required(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|error| panic!("failed to read {}: {error}", path.display()))
}

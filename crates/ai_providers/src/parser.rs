//! Heuristic extraction of structured fields from free-text model output.
//!
//! Models answer in prose; the refactor and test capabilities still need a
//! code block, a list of discrete improvements, and test-case names. The
//! functions here are pure and best-effort: when nothing recognizable is
//! found they degrade to fixed placeholder values instead of failing, and
//! report that degradation through a boolean so callers can flag the result.

use std::sync::OnceLock;

use regex::Regex;

/// Emitted when a refactor response contains no recognizable code.
pub const PLACEHOLDER_CODE: &str = "// refactored code would go here";

/// Substituted when no qualifying improvement line is found.
pub const DEFAULT_IMPROVEMENTS: [&str; 3] = [
    "Improved code readability and maintainability",
    "Better adherence to language idioms and best practices",
    "Reduced complexity in control flow",
];

/// Substituted when no test-case names can be parsed from the test code.
pub const DEFAULT_TEST_CASES: [&str; 2] = ["test_basic_functionality", "test_edge_cases"];

/// Heading phrases that introduce a code section when no fenced block exists.
const CODE_HEADINGS: [&str; 3] = ["refactored code", "improved code", "new code"];

/// Keywords that mark a line as describing an improvement.
const IMPROVEMENT_KEYWORDS: [&str; 4] = ["improvement", "benefit", "advantage", "better"];

/// Improvement lines at or below this length are discarded as noise.
const MIN_IMPROVEMENT_LENGTH: usize = 10;

fn fenced_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_+#.-]*\r?\n(.*?)```").expect("valid fenced-block regex")
    })
}

/// Extract the first fenced code block from a response, trimmed.
pub fn extract_code_block(response: &str) -> Option<String> {
    fenced_block_regex()
        .captures(response)
        .map(|captures| captures[1].trim().to_string())
        .filter(|code| !code.is_empty())
}

/// Extract the code portion of a response.
///
/// Tries, in order: the first fenced code block; indented lines following a
/// recognized code heading; the fixed placeholder. The boolean is true when
/// the placeholder was used.
pub fn extract_code(response: &str) -> (String, bool) {
    if let Some(code) = extract_code_block(response) {
        return (code, false);
    }

    if let Some(code) = extract_indented_code(response) {
        return (code, false);
    }

    (PLACEHOLDER_CODE.to_string(), true)
}

/// Fallback for providers that indent code under a heading instead of
/// fencing it: collect indented lines after the heading, stopping at the
/// first non-indented, non-empty line.
fn extract_indented_code(response: &str) -> Option<String> {
    let mut lines = response.lines();

    for line in lines.by_ref() {
        let lowered = line.to_lowercase();
        if CODE_HEADINGS.iter().any(|phrase| lowered.contains(phrase)) {
            break;
        }
    }

    let mut code_lines: Vec<&str> = Vec::new();
    for line in lines {
        if line.starts_with(' ') || line.starts_with('\t') {
            code_lines.push(line);
        } else if line.trim().is_empty() {
            if !code_lines.is_empty() {
                code_lines.push(line);
            }
        } else {
            break;
        }
    }

    let code = code_lines.join("\n").trim_end().to_string();
    if code.trim().is_empty() {
        None
    } else {
        Some(code)
    }
}

/// Extract discrete improvement descriptions from a response.
///
/// Keeps lines mentioning an improvement keyword, stripped of bullet markers
/// and a leading "label:" prefix, discarding short noise. Never returns an
/// empty list: the fixed defaults substitute when nothing qualifies.
pub fn extract_improvements(response: &str) -> Vec<String> {
    let mut improvements = Vec::new();

    for line in response.lines() {
        let lowered = line.to_lowercase();
        if !IMPROVEMENT_KEYWORDS
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            continue;
        }

        let mut text = line.trim();
        text = text
            .trim_start_matches(['-', '•', '*'])
            .trim_start();
        if let Some((_, rest)) = text.split_once(':') {
            text = rest.trim();
        }

        if text.chars().count() > MIN_IMPROVEMENT_LENGTH {
            improvements.push(text.to_string());
        }
    }

    if improvements.is_empty() {
        improvements = DEFAULT_IMPROVEMENTS
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    improvements
}

fn test_name_regexes() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            // Rust and Python test functions
            Regex::new(r"\bfn\s+(test_[A-Za-z0-9_]+)").expect("valid fn regex"),
            Regex::new(r"\bdef\s+(test_[A-Za-z0-9_]+)").expect("valid def regex"),
            // JavaScript-style it("...") / test("...") declarations
            Regex::new(r#"\b(?:it|test)\(\s*['"]([^'"]+)['"]"#).expect("valid it regex"),
        ]
    })
}

/// Extract test-case names from generated test code.
///
/// Recognizes Rust/Python test functions and JavaScript `it`/`test`
/// declarations. The boolean is true when the fixed fallback list was used.
pub fn extract_test_cases(test_code: &str) -> (Vec<String>, bool) {
    let mut cases: Vec<String> = Vec::new();

    for regex in test_name_regexes() {
        for captures in regex.captures_iter(test_code) {
            let name = captures[1].to_string();
            if !cases.contains(&name) {
                cases.push(name);
            }
        }
    }

    if cases.is_empty() {
        (
            DEFAULT_TEST_CASES.iter().map(|s| s.to_string()).collect(),
            true,
        )
    } else {
        (cases, false)
    }
}

/// Collect dependency-install command lines from a response, if any.
pub fn extract_setup_instructions(response: &str) -> Option<String> {
    const INSTALL_COMMANDS: [&str; 5] = [
        "pip install",
        "npm install",
        "yarn add",
        "cargo add",
        "go get",
    ];

    let lines: Vec<String> = response
        .lines()
        .map(|line| line.trim().trim_start_matches("$ ").trim())
        .filter(|line| {
            INSTALL_COMMANDS
                .iter()
                .any(|command| line.starts_with(command))
        })
        .map(|line| line.to_string())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

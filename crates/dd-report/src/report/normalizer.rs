//! Cleaning raw model output into report bodies

use super::{GeneratedReport, ReportKind, ReportTemplate};
use crate::error::FormatError;
use serde_json::{Map, Value};
use tracing::warn;

const LEADING_FENCES: [&str; 2] = ["```html", "'''html"];
const TRAILING_FENCES: [&str; 2] = ["```", "'''"];

/// Remove a leading html fence and a trailing fence, then trim
///
/// Repeats until nothing changes, so applying it twice is the same as once.
pub fn strip_fences(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let mut s = text;
    if let Some(rest) = LEADING_FENCES.iter().find_map(|f| s.strip_prefix(f)) {
        s = rest;
    }
    if let Some(rest) = TRAILING_FENCES.iter().find_map(|f| s.strip_suffix(f)) {
        s = rest;
    }
    s.trim().to_string()
}

/// Parse the first balanced `{...}` span that is a JSON object
///
/// Braces inside string literals are ignored when balancing. Spans that
/// balance but do not parse (stray braces in prose) are skipped in favour of
/// the next candidate.
pub fn extract_json(text: &str) -> Result<Map<String, Value>, FormatError> {
    let mut first_error = None;

    for (start, _) in text.match_indices('{') {
        let Some(span) = balanced_span(&text[start..]) else {
            continue;
        };

        match serde_json::from_str::<Map<String, Value>>(span) {
            Ok(map) => return Ok(map),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            },
        }
    }

    Err(first_error.map_or(FormatError::NotFound, FormatError::Invalid))
}

/// The prefix of `text` (which starts at `{`) up to the brace that closes it
fn balanced_span(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {},
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            },
            _ => {},
        }
    }

    None
}

/// Shape raw model output according to the report's template
pub fn normalize(kind: &ReportKind, raw: &str) -> GeneratedReport {
    let cleaned = strip_fences(raw);

    match kind.template {
        ReportTemplate::Text | ReportTemplate::Html => GeneratedReport::text(cleaned),
        ReportTemplate::Json => match extract_json(&cleaned) {
            Ok(sections) => {
                let report = GeneratedReport::sections(sections);
                let missing = report.missing_sections(&kind.headings());
                if !missing.is_empty() {
                    warn!(
                        "{} report is missing sections: {}",
                        kind.role.as_str(),
                        missing.join(", ")
                    );
                }
                report
            },
            Err(e) => {
                warn!("{} report was not valid JSON: {e}", kind.role.as_str());
                GeneratedReport::format_failed(e.to_string())
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NO_VALID_JSON;
    use crate::report::ReportStatus;
    use serde_json::json;

    #[test]
    fn test_strip_html_fence() {
        assert_eq!(strip_fences("```html\n<p>x</p>\n```"), "<p>x</p>");
        assert_eq!(strip_fences("'''html<p>x</p>'''"), "<p>x</p>");
    }

    #[test]
    fn test_strip_leaves_plain_text() {
        assert_eq!(strip_fences("  plain report  "), "plain report");
        assert_eq!(strip_fences("```json\n{}\n```"), "```json\n{}");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let inputs = [
            "```html\n<p>x</p>\n```",
            "```html```html<p>nested</p>``````",
            "  ```html\n<p>leading space</p>```",
            "text'''",
            "",
        ];

        for input in inputs {
            let once = strip_fences(input);
            assert_eq!(strip_fences(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_extract_json_in_noise() {
        let map = extract_json(r#"Here you go: {"Valuation": "Fair", "Risk Assessment": "Low"} Thanks!"#)
            .unwrap();
        assert_eq!(map["Valuation"], json!("Fair"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_extract_json_nested() {
        let map = extract_json(r#"{"a": {"b": {"c": 1}}, "d": [1, {"e": 2}]}"#).unwrap();
        assert_eq!(map["a"]["b"]["c"], json!(1));
        assert_eq!(map["d"][1]["e"], json!(2));
    }

    #[test]
    fn test_extract_json_braces_in_strings() {
        let map = extract_json(r#"{"Valuation": "range {low} to }high{", "q": "say \"}\""} trailing }"#)
            .unwrap();
        assert_eq!(map["Valuation"], json!("range {low} to }high{"));
        assert_eq!(map["q"], json!("say \"}\""));
    }

    #[test]
    fn test_extract_json_skips_stray_prose_braces() {
        let text = r#"Using {placeholder} notation, the report is {"Executive Summary": "Strong"} {done}"#;
        let map = extract_json(text).unwrap();
        assert_eq!(map["Executive Summary"], json!("Strong"));
    }

    #[test]
    fn test_extract_json_no_braces() {
        let err = extract_json("I could not produce a report.").unwrap_err();
        assert!(matches!(err, FormatError::NotFound));
        assert_eq!(err.to_string(), NO_VALID_JSON);
    }

    #[test]
    fn test_extract_json_unclosed() {
        assert!(matches!(
            extract_json(r#"{"Valuation": "cut off"#),
            Err(FormatError::NotFound)
        ));
    }

    #[test]
    fn test_extract_json_invalid() {
        let err = extract_json("{not json}").unwrap_err();
        assert!(matches!(err, FormatError::Invalid(_)));
        assert!(err.to_string().starts_with(NO_VALID_JSON));
    }

    #[test]
    fn test_normalize_html() {
        let report = normalize(&ReportKind::technical(), "```html\n<h1>T</h1>\n```");
        assert!(report.is_complete());
        assert_eq!(report.to_text(), "<h1>T</h1>");
    }

    #[test]
    fn test_normalize_json() {
        let report = normalize(&ReportKind::merged(), "```html\n{\"Valuation\": \"Fair\"}\n```");
        assert!(report.is_complete());
        assert_eq!(report.as_sections().unwrap()["Valuation"], json!("Fair"));
    }

    #[test]
    fn test_normalize_json_failure() {
        let report = normalize(&ReportKind::merged(), "Sorry, no JSON today.");
        assert_eq!(report.status, ReportStatus::FormatFailed);
        assert_eq!(report.to_text(), NO_VALID_JSON);
    }
}

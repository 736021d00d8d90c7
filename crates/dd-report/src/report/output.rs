//! Writing reports to disk

use super::ReportTemplate;
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// File name used when none is given
pub const DEFAULT_REPORT_FILE: &str = "Due_Diligence_Report.html";

/// Write `content` to `file_name`, adding `.html` when the name lacks it
///
/// Returns the path actually written.
pub fn save_html_to_file(content: &str, file_name: &str) -> Result<PathBuf> {
    save_report(content, file_name, ReportTemplate::Html)
}

/// Write a report body, adding the template's extension when the name lacks it
pub fn save_report(content: &str, file_name: &str, template: ReportTemplate) -> Result<PathBuf> {
    let extension = template.extension();
    let path = if file_name.ends_with(&format!(".{extension}")) {
        PathBuf::from(file_name)
    } else {
        PathBuf::from(format!("{file_name}.{extension}"))
    };

    std::fs::write(&path, content)?;
    info!("Report has been saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;

    #[test]
    fn test_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("report");

        let path = save_html_to_file("<p>x</p>", name.to_str().unwrap()).unwrap();

        assert_eq!(path, dir.path().join("report.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>x</p>");
    }

    #[test]
    fn test_keeps_existing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join(DEFAULT_REPORT_FILE);

        let path = save_html_to_file("body", name.to_str().unwrap()).unwrap();

        assert_eq!(path, name);
        assert!(!dir.path().join("Due_Diligence_Report.html.html").exists());
    }

    #[test]
    fn test_extension_follows_template() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("report");
        let name = name.to_str().unwrap();

        let text = save_report("plain", name, ReportTemplate::Text).unwrap();
        let json = save_report("{}", name, ReportTemplate::Json).unwrap();

        assert_eq!(text, dir.path().join("report.txt"));
        assert_eq!(json, dir.path().join("report.json"));
        assert!(!dir.path().join("report.html").exists());
    }

    #[test]
    fn test_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let name = dir.path().join("missing").join("report");

        let err = save_html_to_file("body", name.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }
}

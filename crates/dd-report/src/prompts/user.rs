//! User message templates: per-stage instructions and the output formats

use dd_prompt::{JinjaTemplate, Result};

// ============================================================================
// Instructions
// ============================================================================

/// Instruction for the business report
pub fn business_instruction() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "report.instruction.business",
        "Conduct a comprehensive due diligence analysis (3000 words) on the following stock: {{ ticker }}. Use the recent news articles provided below for additional context:",
    )
}

/// Instruction for the technical report
pub fn technical_instruction() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "report.instruction.technical",
        "Conduct a comprehensive technical analysis (3000 words) on the following stock: {{ ticker }}. Use the financial data provided below for additional context:",
    )
}

/// Instruction for the merged report
pub fn merge_instruction() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "report.instruction.merged",
        "Please create a long and extensive report for the stock {{ ticker }}. Use the business due diligence and the technical due diligence provided below:",
    )
}

// ============================================================================
// Output formats
// ============================================================================

/// Numbered plain-text sections
pub fn text_format() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "report.format.text",
        r"{{ instruction }}

{{ data }}

Please structure your report using the following format, and it is very important that you make no bullet points or lists:

{{ title }}

{% for s in sections %}
{{ loop.index }}. {{ s.heading }}
{{ s.guidance }}

{% endfor %}
",
    )
}

/// Standalone HTML document with inline style
pub fn html_format() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "report.format.html",
        r#"{{ instruction }}
{{ data }}

Please structure your report using the following HTML format, and don't add anything outside of the html, and no bullet points:

<!DOCTYPE html>
<html>
<head>
<style>
body { font-family: Arial, sans-serif; margin: 30px; }
h1 { font-size: 24px; text-align: center; margin-bottom: 20px; }
h2 { font-size: 18px; color: #333; margin-top: 20px; }
p { font-size: 12px; line-height: 1.5; }
</style>
</head>
<body>
<h1>{{ title }}</h1>
{% for s in sections %}
<h2>{{ loop.index }}. {{ s.heading }}</h2>
<p>{{ s.guidance }}</p>

{% endfor %}
</body>
</html>
"#,
    )
}

/// A single JSON object keyed by section heading
pub fn json_format() -> Result<JinjaTemplate> {
    JinjaTemplate::new(
        "report.format.json",
        r#"{{ instruction }}

{{ data }}

Write the report "{{ title }}" as a single JSON object and nothing else. Use exactly these keys, in this order. Each value is a string of full paragraphs; it is very important that you make no bullet points or lists:

{% for s in sections %}
"{{ s.heading }}": {{ s.guidance }}
{% endfor %}
"#,
    )
}

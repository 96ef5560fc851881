use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use crate::config::constants::{DEFAULT_SEVERITY_COLOR, DEFAULT_TYPE_ICON, SEVERITY_COLORS, TYPE_ICONS};
use crate::helpers::html::{escape_html, fill_template};
use crate::services::syntax_highlighter::SyntaxHighlighter;
use crate::structs::issue::Issue;

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([\w+#.\-]+)?[ \t]*\r?\n(.*?)```").expect("code fence pattern is valid"));

const REPORT_TEMPLATE: &str = include_str!("../templates/report.html");
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renders one issue and its suggestion as a standalone HTML page.
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(project_key: &str, issue: &Issue, solution: &str) -> String {
        Self::render_at(project_key, issue, solution, Utc::now())
    }

    /// Same as [`ReportRenderer::render`] with a caller-supplied analysis timestamp.
    pub fn render_at(project_key: &str, issue: &Issue, solution: &str, analyzed_at: DateTime<Utc>) -> String {
        let values = [
            ("ISSUE_KEY", escape_html(&issue.key)),
            ("TYPE_ICON", Self::type_icon(&issue.issue_type).to_string()),
            ("PROJECT", escape_html(project_key)),
            ("SEVERITY_COLOR", Self::severity_color(&issue.severity).to_string()),
            ("SEVERITY", escape_html(&issue.severity)),
            ("ISSUE_TYPE", escape_html(&issue.issue_type)),
            ("MESSAGE", escape_html(&issue.message)),
            ("COMPONENT", escape_html(&issue.component)),
            ("LINE", issue.line_label()),
            ("RULE", escape_html(issue.rule.as_deref().unwrap_or("N/A"))),
            ("STATUS", escape_html(&issue.status)),
            ("SOLUTION", Self::format_solution(solution)),
            ("CREATED", escape_html(&Self::format_creation_date(issue.creation_date.as_deref()))),
            ("ANALYZED_AT", analyzed_at.format(TIMESTAMP_FORMAT).to_string()),
        ];

        let pairs: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
        fill_template(REPORT_TEMPLATE, &pairs)
    }

    pub fn severity_color(severity: &str) -> &'static str {
        SEVERITY_COLORS
            .iter()
            .find(|(name, _)| *name == severity)
            .map(|(_, color)| *color)
            .unwrap_or(DEFAULT_SEVERITY_COLOR)
    }

    pub fn type_icon(issue_type: &str) -> &'static str {
        TYPE_ICONS
            .iter()
            .find(|(name, _)| *name == issue_type)
            .map(|(_, icon)| *icon)
            .unwrap_or(DEFAULT_TYPE_ICON)
    }

    /// Replaces fenced code blocks with highlighted `<pre>` blocks and escapes the prose around them.
    pub fn format_solution(solution: &str) -> String {
        let mut out = String::with_capacity(solution.len() * 2);
        let mut last_end = 0;

        for captures in CODE_FENCE.captures_iter(solution) {
            let Some(whole) = captures.get(0) else { continue };
            out.push_str(&escape_html(&solution[last_end..whole.start()]));

            let language = captures.get(1).map(|m| m.as_str());
            let code = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
            out.push_str(&Self::format_code_block(code, language));

            last_end = whole.end();
        }

        out.push_str(&escape_html(&solution[last_end..]));
        out
    }

    pub fn format_code_block(code: &str, language: Option<&str>) -> String {
        let (highlighted, used) = SyntaxHighlighter::highlight(code.trim(), language);

        // An unrecognized tag is labelled with the language the spans were produced for
        let declared = language.filter(|tag| SyntaxHighlighter::find_language(tag).is_some());
        let class = escape_html(declared.or(used).or(language).unwrap_or_default());

        let code_class = if class.is_empty() {
            "hljs".to_string()
        } else {
            format!("hljs language-{}", class)
        };

        format!(
            "<pre class=\"code-block {}\"><code class=\"{}\">{}</code></pre>",
            class, code_class, highlighted
        )
    }

    fn format_creation_date(creation_date: Option<&str>) -> String {
        let Some(raw) = creation_date else {
            return "N/A".to_string();
        };

        DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .map(|date| date.with_timezone(&Utc).format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|_| raw.to_string())
    }
}

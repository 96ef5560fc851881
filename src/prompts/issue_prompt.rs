use crate::structs::issue::Issue;

pub fn build_issue_prompt(issue: &Issue) -> String {
    format!(
        r#"
Analyze this Sonar issue and provide a detailed solution:

Issue Type: {issue_type}
Severity: {severity}
Message: {message}
Component: {component}
Line: {line}

Please provide:
1. A detailed explanation of the issue
2. A step-by-step solution
3. Code examples showing how to fix the issue
4. Best practices to prevent similar issues

Format your response with markdown code blocks for code examples.
"#,
        issue_type = issue.issue_type,
        severity = issue.severity,
        message = issue.message,
        component = issue.component,
        line = issue.line_label(),
    )
}

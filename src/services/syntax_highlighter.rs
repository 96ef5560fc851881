use once_cell::sync::Lazy;
use regex::Regex;
use crate::helpers::html::escape_html;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern is valid"));

// Minimum score before auto-detection commits to a language
const DETECTION_THRESHOLD: usize = 2;
const SIGNATURE_WEIGHT: usize = 3;

pub struct LanguageSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub literals: &'static [&'static str],
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    pub quotes: &'static [char],
    pub signatures: &'static [&'static str],
    pub case_insensitive: bool,
}

pub static LANGUAGES: &[LanguageSpec] = &[
    LanguageSpec {
        name: "javascript",
        aliases: &["js", "jsx", "javascript", "node", "mjs"],
        keywords: &[
            "async", "await", "break", "case", "catch", "class", "const", "continue", "default", "delete",
            "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
            "instanceof", "let", "new", "of", "return", "switch", "this", "throw", "try", "typeof",
            "var", "void", "while", "yield",
        ],
        literals: &["true", "false", "null", "undefined", "NaN"],
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\'', '`'],
        signatures: &["=>", "console.", "function ", "require(", "document.", "===", "module.exports"],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "typescript",
        aliases: &["ts", "tsx", "typescript"],
        keywords: &[
            "abstract", "as", "async", "await", "break", "case", "catch", "class", "const", "continue",
            "declare", "default", "else", "enum", "export", "extends", "for", "function", "if",
            "implements", "import", "interface", "let", "namespace", "new", "private", "protected",
            "public", "readonly", "return", "switch", "this", "throw", "try", "type", "typeof", "var",
            "while",
        ],
        literals: &["true", "false", "null", "undefined"],
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\'', '`'],
        signatures: &[": string", ": number", ": boolean", "interface ", "export type", "readonly "],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "java",
        aliases: &["java"],
        keywords: &[
            "abstract", "boolean", "break", "byte", "case", "catch", "char", "class", "continue",
            "default", "do", "double", "else", "enum", "extends", "final", "finally", "float", "for",
            "if", "implements", "import", "instanceof", "int", "interface", "long", "new", "package",
            "private", "protected", "public", "return", "short", "static", "super", "switch",
            "synchronized", "this", "throw", "throws", "try", "void", "volatile", "while",
        ],
        literals: &["true", "false", "null"],
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\''],
        signatures: &["public class", "System.out", "@Override", "import java", "public static void", "private final"],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "python",
        aliases: &["py", "python", "python3"],
        keywords: &[
            "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
            "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
            "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
        ],
        literals: &["True", "False", "None"],
        line_comments: &["#"],
        block_comment: None,
        quotes: &['"', '\''],
        signatures: &["def ", "self.", "elif ", "print(", "__init__", "):\n"],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "rust",
        aliases: &["rs", "rust"],
        keywords: &[
            "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
            "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
            "return", "self", "Self", "static", "struct", "super", "trait", "type", "unsafe", "use",
            "where", "while",
        ],
        literals: &["true", "false", "None", "Some", "Ok", "Err"],
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        quotes: &['"'],
        signatures: &["fn ", "let mut", "impl ", "&str", "println!", "-> Result", "pub fn"],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "go",
        aliases: &["go", "golang"],
        keywords: &[
            "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough", "for",
            "func", "go", "goto", "if", "import", "interface", "map", "package", "range", "return",
            "select", "struct", "switch", "type", "var",
        ],
        literals: &["true", "false", "nil", "iota"],
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\'', '`'],
        signatures: &["func ", ":=", "package main", "fmt.", "err != nil"],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "csharp",
        aliases: &["cs", "csharp", "c#"],
        keywords: &[
            "abstract", "async", "await", "base", "bool", "break", "case", "catch", "class", "const",
            "continue", "else", "enum", "foreach", "for", "if", "in", "int", "interface", "internal",
            "namespace", "new", "override", "private", "protected", "public", "readonly", "return",
            "sealed", "static", "string", "switch", "this", "throw", "try", "using", "var", "virtual",
            "void", "while",
        ],
        literals: &["true", "false", "null"],
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\''],
        signatures: &["using System", "namespace ", "public async Task", "Console.", "{ get; set; }"],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "cpp",
        aliases: &["c", "cpp", "c++", "cc", "h", "hpp"],
        keywords: &[
            "auto", "break", "case", "char", "class", "const", "continue", "default", "delete", "do",
            "double", "else", "enum", "float", "for", "if", "include", "int", "long", "namespace", "new",
            "private", "public", "return", "short", "sizeof", "static", "struct", "switch", "template",
            "typedef", "unsigned", "using", "virtual", "void", "while",
        ],
        literals: &["true", "false", "nullptr", "NULL"],
        line_comments: &["//"],
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\''],
        signatures: &["#include", "std::", "cout", "nullptr", "int main("],
        case_insensitive: false,
    },
    LanguageSpec {
        name: "sql",
        aliases: &["sql", "mysql", "postgresql", "plsql"],
        keywords: &[
            "select", "from", "where", "insert", "into", "values", "update", "set", "delete", "join",
            "left", "right", "inner", "outer", "on", "group", "by", "order", "having", "limit", "create",
            "table", "alter", "drop", "index", "and", "or", "not", "as", "distinct",
        ],
        literals: &["null", "true", "false"],
        line_comments: &["--"],
        block_comment: Some(("/*", "*/")),
        quotes: &['\'', '"'],
        signatures: &["SELECT ", "FROM ", "WHERE ", "INSERT INTO", "CREATE TABLE"],
        case_insensitive: true,
    },
    LanguageSpec {
        name: "bash",
        aliases: &["sh", "bash", "shell", "zsh"],
        keywords: &[
            "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac", "function",
            "in", "export", "local", "return", "echo",
        ],
        literals: &["true", "false"],
        line_comments: &["#"],
        block_comment: None,
        quotes: &['"', '\''],
        signatures: &["#!/bin", "echo ", "$(", "fi\n", "done\n"],
        case_insensitive: false,
    },
];

pub struct SyntaxHighlighter;

impl SyntaxHighlighter {
    pub fn find_language(name: &str) -> Option<&'static LanguageSpec> {
        let wanted = name.trim().to_ascii_lowercase();
        LANGUAGES.iter().find(|spec| spec.aliases.contains(&wanted.as_str()))
    }

    /// Best-effort guess based on keyword density and characteristic snippets.
    pub fn detect_language(code: &str) -> Option<&'static LanguageSpec> {
        let identifiers: Vec<&str> = IDENTIFIER.find_iter(code).map(|m| m.as_str()).collect();

        LANGUAGES
            .iter()
            .map(|spec| {
                let keyword_hits = identifiers.iter().filter(|ident| Self::is_keyword(spec, ident)).count();
                let signature_hits = spec.signatures.iter().filter(|sig| code.contains(*sig)).count();
                (spec, keyword_hits + signature_hits * SIGNATURE_WEIGHT)
            })
            .filter(|(_, score)| *score >= DETECTION_THRESHOLD)
            // max_by_key keeps the last maximum; reverse so earlier entries win ties
            .rev()
            .max_by_key(|(_, score)| *score)
            .map(|(spec, _)| spec)
    }

    /// Returns escaped HTML with `hljs-*` spans, plus the language that was used.
    pub fn highlight(code: &str, language: Option<&str>) -> (String, Option<&'static str>) {
        let spec = language
            .and_then(Self::find_language)
            .or_else(|| Self::detect_language(code));

        match spec {
            Some(spec) => (Self::highlight_with(spec, code), Some(spec.name)),
            None => (escape_html(code), None),
        }
    }

    fn is_keyword(spec: &LanguageSpec, ident: &str) -> bool {
        if spec.case_insensitive {
            let lower = ident.to_ascii_lowercase();
            spec.keywords.contains(&lower.as_str())
        } else {
            spec.keywords.contains(&ident)
        }
    }

    fn is_literal(spec: &LanguageSpec, ident: &str) -> bool {
        if spec.case_insensitive {
            let lower = ident.to_ascii_lowercase();
            spec.literals.contains(&lower.as_str())
        } else {
            spec.literals.contains(&ident)
        }
    }

    fn highlight_with(spec: &LanguageSpec, code: &str) -> String {
        let mut out = String::with_capacity(code.len() * 2);
        let mut rest = code;

        while let Some(c) = rest.chars().next() {
            if let Some(len) = Self::comment_len(spec, rest) {
                Self::push_span(&mut out, "hljs-comment", &rest[..len]);
                rest = &rest[len..];
            } else if spec.quotes.contains(&c) {
                let len = Self::string_len(rest, c);
                Self::push_span(&mut out, "hljs-string", &rest[..len]);
                rest = &rest[len..];
            } else if c.is_ascii_digit() {
                let len = rest
                    .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '.' || ch == '_'))
                    .unwrap_or(rest.len());
                Self::push_span(&mut out, "hljs-number", &rest[..len]);
                rest = &rest[len..];
            } else if c.is_alphabetic() || c == '_' {
                let len = rest
                    .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
                    .unwrap_or(rest.len());
                let ident = &rest[..len];
                if Self::is_keyword(spec, ident) {
                    Self::push_span(&mut out, "hljs-keyword", ident);
                } else if Self::is_literal(spec, ident) {
                    Self::push_span(&mut out, "hljs-literal", ident);
                } else {
                    out.push_str(&escape_html(ident));
                }
                rest = &rest[len..];
            } else {
                out.push_str(&escape_html(&rest[..c.len_utf8()]));
                rest = &rest[c.len_utf8()..];
            }
        }

        out
    }

    fn comment_len(spec: &LanguageSpec, rest: &str) -> Option<usize> {
        if let Some((open, close)) = spec.block_comment {
            if rest.starts_with(open) {
                let len = rest[open.len()..]
                    .find(close)
                    .map(|pos| open.len() + pos + close.len())
                    .unwrap_or(rest.len());
                return Some(len);
            }
        }

        spec.line_comments
            .iter()
            .find(|marker| rest.starts_with(*marker))
            .map(|_| rest.find('\n').unwrap_or(rest.len()))
    }

    // Length of a quoted literal including both quotes; unterminated literals run to the end
    fn string_len(rest: &str, quote: char) -> usize {
        let mut escaped = false;
        for (idx, ch) in rest.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                return idx + ch.len_utf8();
            }
        }
        rest.len()
    }

    fn push_span(out: &mut String, class: &str, text: &str) {
        out.push_str("<span class=\"");
        out.push_str(class);
        out.push_str("\">");
        out.push_str(&escape_html(text));
        out.push_str("</span>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_aliases() {
        assert_eq!(SyntaxHighlighter::find_language("js").map(|s| s.name), Some("javascript"));
        assert_eq!(SyntaxHighlighter::find_language("PY").map(|s| s.name), Some("python"));
        assert!(SyntaxHighlighter::find_language("brainfuck").is_none());
    }

    #[test]
    fn highlights_keywords_strings_and_numbers() {
        let (html, lang) = SyntaxHighlighter::highlight("const a = \"x<y\"; // done", Some("js"));
        assert_eq!(lang, Some("javascript"));
        assert_eq!(
            html,
            "<span class=\"hljs-keyword\">const</span> a = <span class=\"hljs-string\">&quot;x&lt;y&quot;</span>; \
             <span class=\"hljs-comment\">// done</span>"
        );

        let (html, _) = SyntaxHighlighter::highlight("x = 42", Some("python"));
        assert_eq!(html, "x = <span class=\"hljs-number\">42</span>");
    }

    #[test]
    fn detects_common_languages() {
        let python = "def greet(name):\n    if name is None:\n        return 'hi'\n    return name\n";
        assert_eq!(SyntaxHighlighter::detect_language(python).map(|s| s.name), Some("python"));

        let rust = "pub fn parse(input: &str) -> Result<u32, Error> {\n    let mut total = 0;\n    Ok(total)\n}";
        assert_eq!(SyntaxHighlighter::detect_language(rust).map(|s| s.name), Some("rust"));

        let java = "public class Foo {\n    @Override\n    public String toString() { return \"foo\"; }\n}";
        assert_eq!(SyntaxHighlighter::detect_language(java).map(|s| s.name), Some("java"));
    }

    #[test]
    fn plain_text_is_only_escaped() {
        let (html, lang) = SyntaxHighlighter::highlight("<b>hello</b>", None);
        assert_eq!(lang, None);
        assert_eq!(html, "&lt;b&gt;hello&lt;/b&gt;");
    }

    #[test]
    fn unterminated_string_and_comment_do_not_panic() {
        let (html, _) = SyntaxHighlighter::highlight("let s = \"never closed /* é", Some("rust"));
        assert!(html.contains("hljs-string"));

        let (html, _) = SyntaxHighlighter::highlight("/* open comment", Some("java"));
        assert_eq!(html, "<span class=\"hljs-comment\">/* open comment</span>");
    }
}

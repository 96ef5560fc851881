use std::time::Duration;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SONAR_URL: &str = "http://localhost:9000";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "codellama";
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_SONAR_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_OLLAMA_TIMEOUT_SECS: u64 = 300;

pub const CONFIG_DIR_NAME: &str = "sonar-analyzer";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const SONAR_URL_ENV: &str = "SONAR_URL";
pub const SONAR_TOKEN_ENV: &str = "SONAR_TOKEN";
pub const SONAR_AUTH_ENV: &str = "SONAR_AUTH";
pub const OLLAMA_URL_ENV: &str = "OLLAMA_URL";
pub const OLLAMA_MODEL_ENV: &str = "OLLAMA_MODEL";
pub const PORT_ENV: &str = "PORT";
pub const RESULTS_DIR_ENV: &str = "RESULTS_DIR";

pub const SONAR_SEARCH_PATH: &str = "/api/issues/search";
pub const SONAR_UNRESOLVED_STATUSES: &str = "OPEN,CONFIRMED,REOPENED";
pub const SONAR_PAGE_SIZE: usize = 100;
// Sonar refuses to page past the first 10k results of a search
pub const SONAR_MAX_ISSUES: usize = 10_000;

pub const OLLAMA_GENERATE_PATH: &str = "/api/generate";

pub const ARCHIVE_ROOT_ENTRY: &str = "results";
pub const ARCHIVE_FILE_NAME: &str = "results.zip";

pub const REPORT_FILE_NAME: &str = "report.html";
pub const RESULT_FILE_NAME: &str = "result.json";
pub const SOLUTION_FILE_NAME: &str = "solution.md";

pub const VALID_ISSUE_TYPES: &[&str] = &["BUG", "VULNERABILITY", "CODE_SMELL", "SECURITY_HOTSPOT"];

pub const SEVERITY_COLORS: &[(&str, &str)] = &[
    ("BLOCKER", "#FF0000"),
    ("CRITICAL", "#FF4500"),
    ("MAJOR", "#FFA500"),
    ("MINOR", "#FFD700"),
    ("INFO", "#90EE90"),
];

pub const DEFAULT_SEVERITY_COLOR: &str = "#666666";

pub const TYPE_ICONS: &[(&str, &str)] = &[
    ("BUG", "🐛"),
    ("VULNERABILITY", "🔒"),
    ("CODE_SMELL", "👃"),
    ("SECURITY_HOTSPOT", "⚠️"),
];

pub const DEFAULT_TYPE_ICON: &str = "📝";

pub fn timeout_duration_secs(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}

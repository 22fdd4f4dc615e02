//! Information-disclosure rule table.
//!
//! Within a category rules are applied in table order, so specific shapes
//! (provider keys, quoted values) come before the generic ones. Placeholders
//! are chosen so that no rule re-matches another rule's output except with
//! an identical result.

use crate::rule::DisclosureRuleSpec;
use crate::{DisclosureCategory, Severity};

use DisclosureCategory::*;
use Severity::{Critical, High, Low, Medium};

pub(crate) static DISCLOSURE_RULES: &[DisclosureRuleSpec] = &[
    // ------------------------------------------------------------------
    // Injection (always stripped from messages)
    // ------------------------------------------------------------------
    DisclosureRuleSpec {
        id: "ansi_escape",
        category: Injection,
        severity: Low,
        pattern: r"\x1B\[[0-9;?]{0,32}[A-Za-z]|\x1B\][^\x07\x1B]{0,256}(?:\x07|\x1B\\)",
        replacement: "",
        hint: "Terminal escape sequence",
    },
    DisclosureRuleSpec {
        id: "html_tag",
        category: Injection,
        severity: Medium,
        pattern: r"<\s{0,8}/?\s{0,8}[A-Za-z][A-Za-z0-9-]{0,32}(?:\s[^<>]{0,512})?/?>",
        replacement: "",
        hint: "HTML markup",
    },
    DisclosureRuleSpec {
        id: "inline_script_call",
        category: Injection,
        severity: High,
        pattern: r"(?i)\b(?:javascript|vbscript)\s{0,4}:|\b(?:eval|alert|prompt|confirm|Function|setTimeout|setInterval)\s{0,8}\([^)]{0,256}\)",
        replacement: "",
        hint: "Inline script invocation",
    },
    DisclosureRuleSpec {
        id: "control_character",
        category: Injection,
        severity: Low,
        pattern: r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]",
        replacement: "",
        hint: "Control character",
    },
    // ------------------------------------------------------------------
    // API keys and tokens
    // ------------------------------------------------------------------
    DisclosureRuleSpec {
        id: "private_key_block",
        category: ApiKey,
        severity: Critical,
        pattern: r"-----BEGIN[A-Z ]{0,32}PRIVATE KEY-----(?:(?s:.){0,4096}?-----END[A-Z ]{0,32}PRIVATE KEY-----)?",
        replacement: "[PRIVATE_KEY_REDACTED]",
        hint: "PEM private key",
    },
    DisclosureRuleSpec {
        id: "jwt",
        category: ApiKey,
        severity: Critical,
        pattern: r"\beyJ[A-Za-z0-9_-]{5,2048}\.eyJ[A-Za-z0-9_-]{5,2048}\.[A-Za-z0-9_-]{0,2048}",
        replacement: "[JWT_REDACTED]",
        hint: "JSON Web Token",
    },
    DisclosureRuleSpec {
        id: "aws_access_key",
        category: ApiKey,
        severity: Critical,
        pattern: r"\b(AKIA|ASIA)[0-9A-Z]{16}\b",
        replacement: "${1}***",
        hint: "AWS access key id",
    },
    DisclosureRuleSpec {
        id: "github_token",
        category: ApiKey,
        severity: Critical,
        pattern: r"\b(gh[pousr]_|github_pat_)[A-Za-z0-9_]{20,255}",
        replacement: "${1}***",
        hint: "GitHub token",
    },
    DisclosureRuleSpec {
        id: "gitlab_token",
        category: ApiKey,
        severity: Critical,
        pattern: r"\b(glpat-)[A-Za-z0-9_-]{20,255}",
        replacement: "${1}***",
        hint: "GitLab token",
    },
    DisclosureRuleSpec {
        id: "slack_token",
        category: ApiKey,
        severity: Critical,
        pattern: r"\b(xox[baprs]-)[A-Za-z0-9-]{10,255}",
        replacement: "${1}***",
        hint: "Slack token",
    },
    DisclosureRuleSpec {
        id: "ai_provider_key",
        category: ApiKey,
        severity: Critical,
        pattern: r"\b(sk-(?:ant-|proj-)?)[A-Za-z0-9_-]{20,255}",
        replacement: "${1}***",
        hint: "AI provider API key",
    },
    DisclosureRuleSpec {
        id: "stripe_key",
        category: ApiKey,
        severity: Critical,
        pattern: r"\b((?:sk|pk|rk)_(?:live|test)_)[A-Za-z0-9]{16,255}",
        replacement: "${1}***",
        hint: "Stripe API key",
    },
    DisclosureRuleSpec {
        id: "google_api_key",
        category: ApiKey,
        severity: Critical,
        pattern: r"\b(AIza)[0-9A-Za-z_-]{35}",
        replacement: "${1}***",
        hint: "Google API key",
    },
    DisclosureRuleSpec {
        id: "api_key_assignment",
        category: ApiKey,
        severity: Critical,
        pattern: r#"(?i)\b(api[_-]?key|apikey|x-api-key|access[_-]?token|auth[_-]?token|refresh[_-]?token|id[_-]?token|secret[_-]?key|access[_-]?key(?:[_-]?id)?|session[_-]?(?:id|token)|oauth[_-]?(?:token|verifier)|token)(["']?\s{0,4}[=:]\s{0,4})["']?[A-Za-z0-9._~+/=-]{1,512}["']?"#,
        replacement: "${1}${2}***",
        hint: "API key or token assignment",
    },
    DisclosureRuleSpec {
        id: "bearer_token",
        category: ApiKey,
        severity: Critical,
        pattern: r"(?i)\b(bearer|basic)\s{1,4}[A-Za-z0-9._~+/=-]{8,2048}",
        replacement: "${1} ***",
        hint: "HTTP authorization credential",
    },
    // ------------------------------------------------------------------
    // Passwords and secrets
    // ------------------------------------------------------------------
    DisclosureRuleSpec {
        id: "password_quoted",
        category: Password,
        severity: Critical,
        pattern: r#"(?i)\b(password|passwd|passphrase|pwd|pass|secret|client[_-]?secret|private[_-]?key|credentials?)(["']?\s{0,4}[=:]\s{0,4})(["'])[^"'\r\n]{0,256}["']"#,
        replacement: "${1}${2}${3}***${3}",
        hint: "Quoted password or secret assignment",
    },
    DisclosureRuleSpec {
        id: "password_unquoted",
        category: Password,
        severity: Critical,
        pattern: r#"(?i)\b(password|passwd|passphrase|pwd|pass|secret|client[_-]?secret|private[_-]?key|credentials?)(["']?\s{0,4}[=:]\s{0,4})[^\s"',;&)}\]*]{1,256}"#,
        replacement: "${1}${2}***",
        hint: "Password or secret assignment",
    },
    // ------------------------------------------------------------------
    // Database connection strings
    // ------------------------------------------------------------------
    DisclosureRuleSpec {
        id: "database_url_credentials",
        category: DatabaseUrl,
        severity: Critical,
        pattern: r"(?i)\b(postgres(?:ql)?|mysql|mariadb|mongodb(?:\+srv)?|redis|rediss|amqps?|mssql|sqlserver|oracle|cockroachdb|couchdb|cassandra|neo4j|clickhouse)://[^\s/@]{1,256}@[^\s/?#,;]{1,256}",
        replacement: "${1}://***@***",
        hint: "Database URL with credentials",
    },
    DisclosureRuleSpec {
        id: "database_url_host",
        category: DatabaseUrl,
        severity: Medium,
        pattern: r"(?i)\b(postgres(?:ql)?|mysql|mariadb|mongodb(?:\+srv)?|redis|rediss|amqps?|mssql|sqlserver|oracle|cockroachdb|couchdb|cassandra|neo4j|clickhouse)://[^\s/@*]{1,256}(/|\s|$)",
        replacement: "${1}://***${2}",
        hint: "Database host",
    },
    DisclosureRuleSpec {
        id: "connection_string_field",
        category: DatabaseUrl,
        severity: High,
        pattern: r#"(?i)\b(server|data source|host|user id|uid|user|username|initial catalog|database)(\s{0,2}=\s{0,2})[^;\s"'*]{1,256};"#,
        replacement: "${1}${2}***;",
        hint: "Connection string field",
    },
    // ------------------------------------------------------------------
    // File paths
    // ------------------------------------------------------------------
    DisclosureRuleSpec {
        id: "unix_home_directory",
        category: FilePath,
        severity: High,
        pattern: r#"(/(?:Users|home)/)[^/\s:'"()\[\]]+"#,
        replacement: "${1}***",
        hint: "Home directory path",
    },
    DisclosureRuleSpec {
        id: "windows_home_directory",
        category: FilePath,
        severity: High,
        pattern: r#"(?i)([A-Za-z]:[\\/]{1,4}(?:Users|Documents and Settings)[\\/]{1,4})[^\\/\s:'"()\[\]]+(?: [^\\/\s:'"()\[\]]+)*"#,
        replacement: "${1}***",
        hint: "Home directory path",
    },
    DisclosureRuleSpec {
        id: "sensitive_file",
        category: FilePath,
        severity: High,
        pattern: r#"(?i)([\\/])(?:\.env(?:\.[A-Za-z0-9_-]{1,32})?|\.ssh(?:[\\/][^\s:'"()]{1,128})?|\.aws[\\/]credentials|\.npmrc|\.netrc|\.pgpass|id_rsa|id_ed25519|passwd|shadow|secrets\.(?:txt|json|ya?ml))\b"#,
        replacement: "${1}[REDACTED]",
        hint: "Sensitive file",
    },
    DisclosureRuleSpec {
        id: "absolute_path",
        category: FilePath,
        severity: Medium,
        pattern: r"(?:[A-Za-z]:)?(?:[\\/][A-Za-z0-9._@-]{1,64}){2,32}[\\/]([A-Za-z0-9._-]{1,128}\.[A-Za-z0-9]{1,8})\b",
        replacement: "[PATH]/${1}",
        hint: "Absolute file path",
    },
    // ------------------------------------------------------------------
    // Network information
    // ------------------------------------------------------------------
    DisclosureRuleSpec {
        id: "ipv4_address",
        category: NetworkInfo,
        severity: Medium,
        pattern: r"\b(?:\d{1,3}\.){3}\d{1,3}\b",
        replacement: "***.***.***.***",
        hint: "IPv4 address",
    },
    DisclosureRuleSpec {
        id: "ipv6_address",
        category: NetworkInfo,
        severity: Medium,
        pattern: r"(?i)\b(?:[0-9a-f]{1,4}:){7}[0-9a-f]{1,4}\b|\b(?:[0-9a-f]{1,4}:){1,7}:(?:[0-9a-f]{1,4}\b)?",
        replacement: "[IPv6]",
        hint: "IPv6 address",
    },
    DisclosureRuleSpec {
        id: "hostname",
        category: NetworkInfo,
        severity: Low,
        pattern: r"(?i)(^|[^@A-Za-z0-9.-])((?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.){1,8}(?:com|net|org|io|dev|app|cloud|internal|local|lan|corp|intranet|svc))\b",
        replacement: "${1}[HOSTNAME]",
        hint: "Hostname",
    },
    DisclosureRuleSpec {
        id: "host_port",
        category: NetworkInfo,
        severity: Low,
        pattern: r"(\blocalhost|\[HOSTNAME\]|\*\*\*\.\*\*\*\.\*\*\*\.\*\*\*):\d{1,5}\b",
        replacement: "${1}:***",
        hint: "Port number",
    },
    // ------------------------------------------------------------------
    // Personal information
    // ------------------------------------------------------------------
    DisclosureRuleSpec {
        id: "email_address",
        category: PersonalInfo,
        severity: Medium,
        pattern: r"\b[A-Za-z0-9._%+-]{1,64}@[A-Za-z0-9.-]{1,253}\.[A-Za-z]{2,24}\b",
        replacement: "***@***.***",
        hint: "Email address",
    },
    DisclosureRuleSpec {
        id: "credit_card",
        category: PersonalInfo,
        severity: High,
        pattern: r"\b(?:\d{4}[ -]){3}\d{4}\b|\b\d{16}\b",
        replacement: "****-****-****-****",
        hint: "Payment card number",
    },
    DisclosureRuleSpec {
        id: "ssn",
        category: PersonalInfo,
        severity: High,
        pattern: r"\b\d{3}-\d{2}-\d{4}\b",
        replacement: "***-**-****",
        hint: "Social security number",
    },
    DisclosureRuleSpec {
        id: "phone_number",
        category: PersonalInfo,
        severity: Medium,
        pattern: r"(?:\+\d{1,3}[ .-]?)?(?:\(\d{3}\)|\b\d{3})[ .-]\d{3}[ .-]\d{4}\b",
        replacement: "***-***-****",
        hint: "Phone number",
    },
];

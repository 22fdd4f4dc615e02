//! Input threat rule table.
//!
//! Rules are grouped by family. Within a family the more specific rules come
//! first; the analyzer reports at most one violation per rule.

use crate::rule::ThreatRuleSpec;
use crate::{Severity, ThreatCategory};

use Severity::{Critical, High, Low, Medium};
use ThreatCategory::*;

pub(crate) static THREAT_RULES: &[ThreatRuleSpec] = &[
    // ------------------------------------------------------------------
    // Path traversal
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "dot_dot_segment",
        category: PathTraversal,
        severity: High,
        pattern: r"(?:^|[/\\])\.\.(?:[/\\]|$)",
        description: "Parent directory segment (..) in path",
        recommendation: "Resolve the path against a fixed root and reject results outside it",
    },
    ThreatRuleSpec {
        id: "percent_encoded_traversal",
        category: PathTraversal,
        severity: High,
        pattern: r"(?i)(?:%2e|\.){2}(?:%2f|%5c)|%2e%2e(?:[/\\]|$)",
        description: "Percent-encoded traversal sequence",
        recommendation: "Decode input once and validate the decoded path",
    },
    ThreatRuleSpec {
        id: "double_encoded_traversal",
        category: PathTraversal,
        severity: Critical,
        pattern: r"(?i)%25(?:2e|2f|5c)",
        description: "Double percent-encoded traversal sequence",
        recommendation: "Reject input containing encoded percent signs",
    },
    ThreatRuleSpec {
        id: "triple_encoded_traversal",
        category: PathTraversal,
        severity: Critical,
        pattern: r"(?i)%2525(?:2e|2f|5c)",
        description: "Triple percent-encoded traversal sequence",
        recommendation: "Reject input containing encoded percent signs",
    },
    ThreatRuleSpec {
        id: "overlong_utf8_traversal",
        category: PathTraversal,
        severity: Critical,
        pattern: r"(?i)%c0%(?:ae|af|2e|2f|5c)|%c1%(?:9c|1c|af)|%e0%80%(?:ae|af)",
        description: "Overlong UTF-8 encoding of dot or slash",
        recommendation: "Reject non-shortest-form UTF-8 sequences",
    },
    ThreatRuleSpec {
        id: "unicode_dot_slash",
        category: PathTraversal,
        severity: High,
        pattern: r"[\x{FF0E}\x{FF0F}\x{FF3C}\x{2024}\x{2025}\x{FE52}\x{2215}\x{2044}\x{29F8}\x{FE68}]|(?i:%u(?:002e|ff0e|2215|2216|ff0f|ff3c))",
        description: "Full-width or look-alike dot/slash characters",
        recommendation: "Apply NFKC normalization before validating paths",
    },
    ThreatRuleSpec {
        id: "zero_width_dot_injection",
        category: PathTraversal,
        severity: High,
        pattern: r"\.[\x{200B}-\x{200D}\x{2060}\x{FEFF}]{1,8}\.",
        description: "Zero-width characters hidden between dots",
        recommendation: "Strip zero-width characters before validating paths",
    },
    ThreatRuleSpec {
        id: "unc_path",
        category: PathTraversal,
        severity: High,
        pattern: r"^(?:\\\\|//)[A-Za-z0-9._$?-]{1,64}[\\/]",
        description: "UNC or device namespace path",
        recommendation: "Only accept paths relative to the project root",
    },
    ThreatRuleSpec {
        id: "drive_root",
        category: PathTraversal,
        severity: Medium,
        pattern: r"^[A-Za-z]:[\\/]",
        description: "Absolute Windows drive path",
        recommendation: "Only accept paths relative to the project root",
    },
    ThreatRuleSpec {
        id: "tilde_expansion",
        category: PathTraversal,
        severity: Medium,
        pattern: r"^~[A-Za-z0-9_.-]{0,32}(?:[/\\]|$)",
        description: "Home directory expansion",
        recommendation: "Do not pass user paths through shell expansion",
    },
    ThreatRuleSpec {
        id: "null_byte",
        category: PathTraversal,
        severity: Critical,
        pattern: r"\x00|(?i:%00|\\x00|\\u0000|\\0)",
        description: "Null byte or encoded null byte",
        recommendation: "Reject input containing null bytes",
    },
    // ------------------------------------------------------------------
    // Command injection
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "shell_metacharacters",
        category: CommandInjection,
        severity: Medium,
        pattern: r"[;&|`$<>]",
        description: "Shell metacharacters",
        recommendation: "Pass arguments as an argv array instead of a shell string",
    },
    ThreatRuleSpec {
        id: "command_chaining",
        category: CommandInjection,
        severity: High,
        pattern: r";|&&|\|\|",
        description: "Command chaining operator",
        recommendation: "Pass arguments as an argv array instead of a shell string",
    },
    ThreatRuleSpec {
        id: "command_substitution",
        category: CommandInjection,
        severity: Critical,
        pattern: r"\$\([^)]{0,256}\)?|`[^`]{1,256}`",
        description: "Subshell or backtick command substitution",
        recommendation: "Never interpolate user input into shell strings",
    },
    ThreatRuleSpec {
        id: "redirection_or_pipe",
        category: CommandInjection,
        severity: High,
        pattern: r"\|\s{0,8}[A-Za-z./~]|>{1,2}\s{0,8}[A-Za-z0-9./~&]|<\s{0,8}[A-Za-z0-9./~(]",
        description: "Output redirection or pipe into another command",
        recommendation: "Pass arguments as an argv array instead of a shell string",
    },
    ThreatRuleSpec {
        id: "newline_injection",
        category: CommandInjection,
        severity: High,
        pattern: r"[\r\n]",
        description: "Line break that starts a new command",
        recommendation: "Reject multi-line values for single-line fields",
    },
    ThreatRuleSpec {
        id: "environment_variable_injection",
        category: CommandInjection,
        severity: Medium,
        pattern: r"\$\{[^}]{0,128}\}|\$[A-Za-z_][A-Za-z0-9_]{0,63}",
        description: "Environment variable expansion",
        recommendation: "Do not pass user input through shell expansion",
    },
    ThreatRuleSpec {
        id: "loader_path_manipulation",
        category: CommandInjection,
        severity: Critical,
        pattern: r"(?i)\b(?:LD_PRELOAD|LD_LIBRARY_PATH|LD_AUDIT|DYLD_INSERT_LIBRARIES|DYLD_LIBRARY_PATH|NODE_OPTIONS|PYTHONPATH|PERL5OPT|BASH_ENV|PATH)\s{0,4}=",
        description: "Search path or preload variable assignment",
        recommendation: "Build the child environment explicitly from an allow-list",
    },
    ThreatRuleSpec {
        id: "ifs_bypass",
        category: CommandInjection,
        severity: High,
        pattern: r"\$\{?IFS\}?|\bIFS\s{0,4}=",
        description: "IFS manipulation used to bypass whitespace filters",
        recommendation: "Never interpolate user input into shell strings",
    },
    // ------------------------------------------------------------------
    // Dangerous commands
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "destructive_command",
        category: DangerousCommand,
        severity: Critical,
        pattern: r"(?i)(?:^|[\s;&|(`])(?:rm\s{1,8}-[A-Za-z]{0,8}[rf]|rm\s{1,8}--(?:recursive|force)|mkfs(?:\.[a-z0-9]{1,8})?\b|dd\s{1,8}if=|shred\s|wipefs\b|format\s{1,8}[A-Za-z]:|del\s{1,8}/[A-Za-z]|rmdir\s{1,8}/s|rd\s{1,8}/s|fdisk\b|parted\b|shutdown\b|reboot\b|halt\b|poweroff\b|init\s{1,8}[06]\b|kill\s{1,8}-9\s{1,8}-1\b|killall\b|chmod\s{1,8}(?:-R\s{1,8})?0?777\s{1,8}/|chown\s{1,8}-R\s{1,8}[^\s]{1,64}\s{1,8}/)",
        description: "Destructive or host-disrupting command",
        recommendation: "Restrict execution to an allow-list of known commands",
    },
    ThreatRuleSpec {
        id: "remote_script_pipe",
        category: DangerousCommand,
        severity: Critical,
        pattern: r"(?i)\b(?:curl|wget|fetch)\b[^|\n]{0,256}\|\s{0,8}(?:sudo\s{1,8})?(?:ba|z|k|da)?sh\b",
        description: "Remote script piped into a shell",
        recommendation: "Download, verify, then execute scripts explicitly",
    },
    ThreatRuleSpec {
        id: "fork_bomb",
        category: DangerousCommand,
        severity: Critical,
        pattern: r":\(\)\s{0,4}\{\s{0,4}:\s{0,4}\|\s{0,4}:\s{0,4}&\s{0,4}\}\s{0,4};\s{0,4}:",
        description: "Shell fork bomb",
        recommendation: "Restrict execution to an allow-list of known commands",
    },
    ThreatRuleSpec {
        id: "reverse_shell",
        category: DangerousCommand,
        severity: Critical,
        pattern: r"(?i)\b(?:nc|ncat|netcat)\b[^\n]{0,64}\s-[A-Za-z]{0,8}[ec]\b|/dev/tcp/|\bbash\s{1,8}-i\b",
        description: "Reverse shell construction",
        recommendation: "Restrict execution to an allow-list of known commands",
    },
    // ------------------------------------------------------------------
    // Script and template injection
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "dynamic_code_execution",
        category: ScriptInjection,
        severity: High,
        pattern: r"(?i)\b(?:eval|Function|setTimeout|setInterval|setImmediate|execScript)\s{0,8}\(|\bnew\s{1,8}Function\b",
        description: "Dynamic code evaluation",
        recommendation: "Never evaluate user-supplied strings as code",
    },
    ThreatRuleSpec {
        id: "script_tag",
        category: ScriptInjection,
        severity: High,
        pattern: r"(?i)<\s{0,8}/?\s{0,8}script\b",
        description: "Script tag",
        recommendation: "HTML-encode user input before rendering",
    },
    ThreatRuleSpec {
        id: "script_protocol",
        category: ScriptInjection,
        severity: High,
        pattern: r"(?i)\b(?:javascript|vbscript|livescript)\s{0,4}:|\bdata\s{0,4}:\s{0,4}text/html",
        description: "Script-bearing URL scheme",
        recommendation: "Allow only http(s) URLs from user input",
    },
    ThreatRuleSpec {
        id: "html_event_handler",
        category: ScriptInjection,
        severity: Medium,
        pattern: r"(?i)<[^>]{0,256}\bon[a-z]{2,24}\s{0,4}=",
        description: "Inline HTML event handler",
        recommendation: "HTML-encode user input before rendering",
    },
    ThreatRuleSpec {
        id: "sql_injection",
        category: ScriptInjection,
        severity: High,
        pattern: r"(?i)\b(?:union\s{1,8}(?:all\s{1,8})?select|insert\s{1,8}into|delete\s{1,8}from|drop\s{1,8}(?:table|database|schema)|truncate\s{1,8}table|alter\s{1,8}table|exec(?:ute)?\s{1,8}(?:xp_|sp_))|'\s{0,4}(?:or|and)\s{1,4}'?[0-9a-z]{1,8}'?\s{0,4}=\s{0,4}'?[0-9a-z]{1,8}|;\s{0,4}--",
        description: "SQL keywords or tautology",
        recommendation: "Use parameterized queries",
    },
    ThreatRuleSpec {
        id: "nosql_injection",
        category: ScriptInjection,
        severity: High,
        pattern: r"\$(?:where|ne|gt|gte|lt|lte|regex|nin|in|or|and|not|nor|exists|expr|function)\b",
        description: "NoSQL query operator",
        recommendation: "Reject keys starting with $ in user-supplied documents",
    },
    ThreatRuleSpec {
        id: "template_injection",
        category: ScriptInjection,
        severity: Medium,
        pattern: r"\$\{[^}]{0,128}\}|\{\{[^}]{0,128}\}\}|<%[^%]{0,128}%>|#\{[^}]{0,128}\}|\{%[^%]{0,128}%\}",
        description: "Template interpolation markers",
        recommendation: "Treat user input as data, never as template source",
    },
    // ------------------------------------------------------------------
    // Privilege escalation
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "privilege_command",
        category: PrivilegeEscalation,
        severity: High,
        pattern: r"(?i)(?:^|[\s;&|(`])(?:sudo|su|doas|runas|pkexec|gksudo|kdesudo)(?:\s|$)",
        description: "Privilege elevation command",
        recommendation: "Never elevate privileges on behalf of user input",
    },
    ThreatRuleSpec {
        id: "uac_bypass",
        category: PrivilegeEscalation,
        severity: Critical,
        pattern: r"(?i)\b(?:fodhelper|eventvwr|computerdefaults|sdclt|slui|bypassuac|uacme|cmstp)(?:\.exe)?\b",
        description: "Known UAC bypass binary",
        recommendation: "Never elevate privileges on behalf of user input",
    },
    ThreatRuleSpec {
        id: "setuid_change",
        category: PrivilegeEscalation,
        severity: Critical,
        pattern: r"(?i)\bchmod\s{1,8}(?:-R\s{1,8})?(?:[ugoa]{0,3}\+[rwx]{0,3}s|[2467][0-7]{3})\b|\bsetcap\b|\bsetuid\s{0,4}\(",
        description: "setuid/setgid bit or capability change",
        recommendation: "Never change file privileges on behalf of user input",
    },
    ThreatRuleSpec {
        id: "system_service_control",
        category: PrivilegeEscalation,
        severity: High,
        pattern: r"(?i)\b(?:systemctl\s{1,8}(?:enable|disable|start|stop|mask|edit)|service\s{1,8}[A-Za-z0-9_.@-]{1,64}\s{1,8}(?:start|stop|restart)|sc(?:\.exe)?\s{1,8}(?:create|config|start|stop|delete)|launchctl\s{1,8}(?:load|bootstrap)|crontab\s{1,8}-[er])\b",
        description: "System service or scheduler control",
        recommendation: "Never manage services on behalf of user input",
    },
    ThreatRuleSpec {
        id: "registry_modification",
        category: PrivilegeEscalation,
        severity: High,
        pattern: r"(?i)\b(?:reg(?:\.exe)?\s{1,8}(?:add|delete|import|load)|regedit(?:\.exe)?)\b|\bHKEY_(?:LOCAL_MACHINE|CURRENT_USER)\b|\bHK(?:LM|CU):",
        description: "Windows registry modification",
        recommendation: "Never modify the registry on behalf of user input",
    },
    ThreatRuleSpec {
        id: "kernel_module",
        category: PrivilegeEscalation,
        severity: Critical,
        pattern: r"(?i)\b(?:insmod|rmmod|modprobe|kextload|sysctl\s{1,8}-w)\b",
        description: "Kernel module or kernel parameter change",
        recommendation: "Never touch kernel state on behalf of user input",
    },
    // ------------------------------------------------------------------
    // Sensitive filesystem locations
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "unix_system_file",
        category: SensitivePath,
        severity: High,
        pattern: r"(?i)/etc/(?:passwd|shadow|sudoers|group|gshadow|hosts|crontab|ssh/)|/proc/(?:self|\d{1,7})/|/root(?:/|$)|(?:^|/)\.ssh(?:/|$)|/var/log/|/boot/|/sys/(?:kernel|firmware|class)",
        description: "Unix system file or directory",
        recommendation: "Confine file access to the project directory",
    },
    ThreatRuleSpec {
        id: "windows_system_file",
        category: SensitivePath,
        severity: High,
        pattern: r"(?i)\b[A-Za-z]:[\\/]{1,4}(?:Windows[\\/]{1,4}(?:System32|SysWOW64|win\.ini)|boot\.ini)|[\\/]system32[\\/]{1,4}config[\\/]{1,4}(?:sam|system|security)\b",
        description: "Windows system file or directory",
        recommendation: "Confine file access to the project directory",
    },
    ThreatRuleSpec {
        id: "reserved_device_name",
        category: SensitivePath,
        severity: High,
        pattern: r"(?i)(?:^|[\\/])(?:CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9])(?:\.[^\\/]{0,16})?$",
        description: "Reserved Windows device name",
        recommendation: "Reject reserved device names as file names",
    },
    ThreatRuleSpec {
        id: "trailing_dot_or_space",
        category: SensitivePath,
        severity: Medium,
        pattern: r"[^./\\\s][. ]{1,8}(?:$|[/\\])",
        description: "Path component ending in a dot or space",
        recommendation: "Reject components that Windows silently rewrites",
    },
    ThreatRuleSpec {
        id: "sensitive_file_extension",
        category: SensitivePath,
        severity: Medium,
        pattern: r"(?i)\.(?:env|pem|key|p12|pfx|jks|keystore|kdbx|ppk|bak|backup|old|orig|swp|sql|sqlite|db|exe|dll|bat|cmd|ps1|vbs|scr|msi|com|so|dylib)$",
        description: "Configuration, backup, key or executable file extension",
        recommendation: "Restrict accepted file types to an allow-list",
    },
    ThreatRuleSpec {
        id: "credential_file_name",
        category: SensitivePath,
        severity: High,
        pattern: r"(?i)(?:^|[\\/])(?:\.env(?:\.[A-Za-z0-9_-]{1,32})?|\.npmrc|\.netrc|\.pgpass|\.git-credentials|\.htpasswd|\.aws[\\/]credentials|id_rsa|id_dsa|id_ecdsa|id_ed25519|secrets?\.(?:json|ya?ml|txt))$",
        description: "Credential or secrets file",
        recommendation: "Never read credential files on behalf of user input",
    },
    // ------------------------------------------------------------------
    // Network
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "suspicious_protocol",
        category: Network,
        severity: Medium,
        pattern: r"(?i)\b(?:file|gopher|dict|ldap|ldaps|tftp|jar|netdoc|php|expect|phar|smb|ftp|sftp)://",
        description: "Suspicious URL scheme",
        recommendation: "Allow only http(s) URLs from user input",
    },
    ThreatRuleSpec {
        id: "private_network_address",
        category: Network,
        severity: Medium,
        pattern: r"\b(?:127(?:\.\d{1,3}){3}|10(?:\.\d{1,3}){3}|192\.168(?:\.\d{1,3}){2}|172\.(?:1[6-9]|2\d|3[01])(?:\.\d{1,3}){2}|169\.254(?:\.\d{1,3}){2}|0\.0\.0\.0)\b|(?i:\blocalhost\b)|\[::1?\]",
        description: "Loopback, link-local or private network address",
        recommendation: "Block requests to internal addresses",
    },
    ThreatRuleSpec {
        id: "sensitive_port",
        category: Network,
        severity: Low,
        pattern: r":(?:21|22|23|25|135|139|445|1433|1521|2375|3306|3389|5432|5900|6379|9200|11211|27017)\b",
        description: "Port of an administrative or database service",
        recommendation: "Block requests to internal services",
    },
    // ------------------------------------------------------------------
    // Unicode spoofing
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "homograph_characters",
        category: UnicodeSpoofing,
        severity: Medium,
        pattern: r"[\x{0370}-\x{03FF}\x{0400}-\x{04FF}\x{0500}-\x{052F}]",
        description: "Cyrillic or Greek characters that resemble Latin letters",
        recommendation: "Restrict identifiers to ASCII",
    },
    ThreatRuleSpec {
        id: "bidi_override",
        category: UnicodeSpoofing,
        severity: Critical,
        pattern: r"[\x{202A}-\x{202E}\x{2066}-\x{2069}\x{200E}\x{200F}\x{061C}]",
        description: "Bidirectional text control character",
        recommendation: "Strip bidirectional controls from identifiers and paths",
    },
    ThreatRuleSpec {
        id: "zero_width_character",
        category: UnicodeSpoofing,
        severity: High,
        pattern: r"[\x{200B}-\x{200D}\x{2060}\x{FEFF}\x{180E}\x{00AD}]",
        description: "Zero-width or invisible character",
        recommendation: "Strip invisible characters before validation",
    },
    // ------------------------------------------------------------------
    // Prototype pollution
    // ------------------------------------------------------------------
    ThreatRuleSpec {
        id: "prototype_pollution",
        category: PrototypePollution,
        severity: Critical,
        pattern: r#"__proto__|\bconstructor\s{0,4}(?:\.|\[\s{0,4}['"]?)\s{0,4}prototype\b|\bprototype\s{0,4}(?:\.|\[\s{0,4}['"]?)\s{0,4}(?:constructor|__defineGetter__|__defineSetter__|__lookupGetter__)\b"#,
        description: "Prototype pollution key",
        recommendation: "Reject __proto__, constructor and prototype keys",
    },
];

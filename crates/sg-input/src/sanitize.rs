//! Input sanitizer.
//!
//! Produces a cleaned string by deleting what the analyzer flags. Deletion is
//! preferred over escaping: the output is meant to be safe even when a
//! downstream consumer forgets to quote it.

use crate::homograph::fold_homographs;
use once_cell::sync::Lazy;
use regex::Regex;
use sg_patterns::PatternCatalog;
use unicode_normalization::UnicodeNormalization;

static RE_TRAVERSAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.{2,}[/\\]|[/\\]\.{2,}$|^\.{2,}$").unwrap());

static RE_CODE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:eval|Function|setTimeout|setInterval|setImmediate|execScript)\s{0,8}\([^)]{0,256}\)?|\bnew\s{1,8}Function\b").unwrap()
});

static RE_SCRIPT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<\s{0,8}/?\s{0,8}script\b[^>]{0,256}>?").unwrap());

static RE_SHELL_META: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;&|`$<>(){}\r\n]").unwrap());

/// Denylisted command names, only where a shell would read them as a command:
/// at the start of input or right after a separator.
static RE_DANGEROUS_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(^|[;&|`\r\n({])(\s*)(?:rm|mkfs|dd|shred|wipefs|format|del|rmdir|fdisk|parted|shutdown|reboot|halt|poweroff|killall|sudo|su|doas|runas|pkexec|insmod|rmmod|modprobe|setcap|curl|wget|nc|ncat|netcat|exec)\b").unwrap()
});

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Catalog rules whose whole match is deleted by the sanitizer.
const DELETE_RULES: &[&str] = &[
    "percent_encoded_traversal",
    "double_encoded_traversal",
    "triple_encoded_traversal",
    "overlong_utf8_traversal",
    "unicode_dot_slash",
    "null_byte",
    "sql_injection",
    "nosql_injection",
    "template_injection",
    "prototype_pollution",
];

/// Derives cleaned strings from untrusted input.
#[derive(Debug, Clone, Copy)]
pub struct InputSanitizer {
    catalog: &'static PatternCatalog,
}

impl InputSanitizer {
    pub fn new() -> Self {
        Self {
            catalog: PatternCatalog::global(),
        }
    }

    /// Remove or neutralize every threat family from `input`.
    ///
    /// Steps:
    /// 1. NFKC normalization (full-width `．．／` becomes `../`)
    /// 2. Homograph folding, invisible and bidi control removal
    /// 3. Removal passes until a fixed point: traversal and null bytes,
    ///    encoded forms, code calls, script tags, SQL/NoSQL, templates,
    ///    dangerous command words in command position, shell metacharacters
    /// 4. Whitespace collapse and trim
    pub fn sanitize(&self, input: &str) -> String {
        let normalized: String = input.nfkc().collect();
        let mut current = fold_homographs(&normalized);

        // Every removal deletes text, so a pass either shrinks the string or is the fixed point.
        loop {
            let next = self.removal_pass(&current);
            if next.len() == current.len() {
                break;
            }
            current = next;
        }

        RE_WHITESPACE.replace_all(current.trim(), " ").into_owned()
    }

    fn removal_pass(&self, input: &str) -> String {
        let mut text = RE_TRAVERSAL.replace_all(input, "").into_owned();

        for id in DELETE_RULES {
            if let Some(rule) = self.catalog.threat(id) {
                text = rule.regex.replace_all(&text, "").into_owned();
            }
        }

        text = RE_CODE_CALL.replace_all(&text, "").into_owned();
        text = RE_SCRIPT_TAG.replace_all(&text, "").into_owned();
        // Separators are still present here, so command position is visible.
        text = RE_DANGEROUS_COMMAND.replace_all(&text, "${1}${2}").into_owned();
        RE_SHELL_META.replace_all(&text, "").into_owned()
    }
}

impl Default for InputSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize `input`; absent input yields an empty string.
pub fn sanitize_input<'a>(input: impl Into<Option<&'a str>>) -> String {
    match input.into() {
        Some(s) if !s.is_empty() => InputSanitizer::new().sanitize(s),
        _ => String::new(),
    }
}

//! Frame-level transforms: depth limits, source maps, module names, positions.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SOURCE_MAP_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[#@]\s{0,4}sourceMappingURL=\S{0,2048}").unwrap());
static RE_SOURCE_MAP_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.((?:[cm]?js|tsx?|jsx|css))\.map\b").unwrap());

static RE_SCOPED_PACKAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[A-Za-z0-9_.-]{1,214}/[A-Za-z0-9_.-]{1,214}").unwrap());
static RE_INTERNAL_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\binternal[/\\]").unwrap());
static RE_LIB_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[\s(/\\])lib[/\\]").unwrap());
static RE_SRC_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[\s(/\\])src[/\\]").unwrap());

static RE_POSITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":[0-9]{1,7}(?::[0-9]{1,7})?(\)?)\s*$").unwrap());

/// Directory prefix of a path followed by its last segment.
static RE_PATH_TO_BASENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[A-Za-z]:)?(?:[^\s():\\/]*[\\/])+([^\\/\s():]+)").unwrap());

static RE_DEV_SENSITIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\\/])(?:\.ssh(?:[\\/][^\s:()]{1,128})?|\.env(?:\.[A-Za-z0-9_-]{1,32})?)\b")
        .unwrap()
});

/// Whether `line` is a call frame (`at ...`).
pub fn is_frame(line: &str) -> bool {
    line.trim_start().starts_with("at ")
}

/// Suffix line noting frames dropped by depth limiting.
pub fn hidden_frames_notice(hidden: usize) -> String {
    format!("    ... [{} more frames hidden for security]", hidden)
}

/// Keep every non-frame line and the first `max_depth` frames.
///
/// Returns the kept lines and the number of frames dropped.
pub fn limit_depth(stack: &str, max_depth: usize) -> (Vec<&str>, usize) {
    let mut kept = Vec::new();
    let mut frames = 0usize;
    let mut hidden = 0usize;
    for line in stack.lines() {
        if is_frame(line) {
            if frames < max_depth {
                frames += 1;
                kept.push(line);
            } else {
                hidden += 1;
            }
        } else {
            kept.push(line);
        }
    }
    (kept, hidden)
}

pub fn strip_source_maps(line: &str) -> String {
    let text = RE_SOURCE_MAP_COMMENT.replace_all(line, "");
    RE_SOURCE_MAP_SUFFIX.replace_all(&text, ".${1}").into_owned()
}

/// Replace scoped packages and `internal/`, `lib/`, `src/` segments with markers.
pub fn sanitize_module_names(line: &str) -> String {
    let text = RE_SCOPED_PACKAGE.replace_all(line, "@[scope]/[package]");
    let text = RE_INTERNAL_SEGMENT.replace_all(&text, "[internal]/");
    let text = RE_LIB_SEGMENT.replace_all(&text, "${1}[lib]/");
    RE_SRC_SEGMENT.replace_all(&text, "${1}[src]/").into_owned()
}

/// Drop the trailing `:line:column` of a frame.
pub fn remove_line_numbers(line: &str) -> String {
    RE_POSITION.replace(line, "${1}").into_owned()
}

/// Reduce every path in a frame to its file name.
pub fn basename_paths(line: &str) -> String {
    RE_PATH_TO_BASENAME.replace_all(line, "${1}").into_owned()
}

/// Development-level redaction: only `.ssh` and `.env` paths.
pub fn redact_dev_sensitive(line: &str) -> String {
    RE_DEV_SENSITIVE.replace_all(line, "${1}[REDACTED]").into_owned()
}

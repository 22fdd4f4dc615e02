//! Path sanitization for single stack lines.
//!
//! Steps run in a fixed order; later steps see the output of earlier ones,
//! so for example home directories inside `node_modules` paths are gone
//! before system directories are considered.

use crate::text::collapse_repeats;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Runs of this many identical characters collapse to [`REPEATED_MARKER`].
pub const REPEAT_RUN: usize = 20;
pub const REPEATED_MARKER: &str = "[REPEATED_CHARS]";

static RE_CONTROL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x08\x0B-\x1F\x7F]").unwrap());

static RE_NODE_MODULES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[A-Za-z]:)?[^\s()]{0,512}?[\\/]node_modules[\\/]((?:@[^\\/\s()]{1,214}[\\/])?[^\\/\s()]{1,214})[\\/](?:[^\s()]{0,512}[\\/])?([^\\/\s():]{1,256})",
    )
    .unwrap()
});

static RE_TRAVERSAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.([/\\])").unwrap());

static RE_MAC_HOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"/Users/[^/\s:'"()\[\]]+"#).unwrap());
static RE_LINUX_HOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"/home/[^/\s:'"()\[\]]+"#).unwrap());
static RE_WINDOWS_HOME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)[A-Za-z]:[\\/]{1,4}(?:Users|Documents and Settings)[\\/]{1,4}[^\\/\s:'"()]+(?: [^\\/\s:'"()]+)*"#)
        .unwrap()
});

static RE_SYSTEM_DIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"/(?:etc|root|opt|var|usr|bin|sbin)/|(?i:[A-Za-z]:[\\/]{1,4}(?:Windows|Program Files(?: \(x86\))?|ProgramData)[\\/]{1,4})",
    )
    .unwrap()
});

static RE_PROJECT_ROOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^|[\s(])/(?:workspace|project|src|dist|build|app)/").unwrap());
static RE_MOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/mnt/[^/\s():]{1,64}/[^/\s():]{1,64}").unwrap());

static RE_DEVICE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\\[.?]\\[^\s()]{1,256}").unwrap());
static RE_UNC_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\\[A-Za-z0-9._$-]{1,64}\\[^\s():]{1,256}").unwrap());
static RE_DEVICE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:PhysicalDrive[0-9]{1,3}|HarddiskVolume[0-9]{1,3}|GLOBALROOT|CONIN\$|CONOUT\$|CON|PRN|AUX|NUL|COM[1-9]|LPT[1-9])\b")
        .unwrap()
});

static RE_SENSITIVE_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([\\/])(?:passwd|shadow|hosts|secrets\.txt|id_rsa|id_ed25519|\.npmrc|\.env(?:\.[A-Za-z0-9_-]{1,32})?|\.ssh(?:[\\/][^\s:()]{1,128})?)\b",
    )
    .unwrap()
});

static RE_BUILD_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\\/])(?:dist|build|out)([\\/])").unwrap());

/// Run the full path pipeline over one line.
pub fn sanitize_paths(line: &str) -> String {
    let text = RE_CONTROL.replace_all(line, "");
    let text = normalize_node_modules(&text);
    let text = RE_TRAVERSAL.replace_all(&text, "[UP]${1}");
    let text = redact_home_directories(&text);
    let text = redact_system_directories(&text);
    let text = redact_project_directories(&text);
    let text = redact_devices(&text);
    let text = RE_SENSITIVE_FILE.replace_all(&text, "${1}[REDACTED]");
    let text = RE_BUILD_DIR.replace_all(&text, "${1}[BUILD]${2}");
    collapse_repeats(&text, REPEAT_RUN, REPEATED_MARKER).into_owned()
}

/// Rewrite any `.../node_modules/<pkg>/.../<file>` to `node_modules/<pkg>/<file>`.
pub fn normalize_node_modules(line: &str) -> String {
    RE_NODE_MODULES
        .replace_all(line, |caps: &Captures| {
            let package = caps[1].replace('\\', "/");
            format!("node_modules/{}/{}", package, &caps[2])
        })
        .into_owned()
}

pub fn redact_home_directories(line: &str) -> String {
    let text = RE_MAC_HOME.replace_all(line, "/Users/***");
    let text = RE_LINUX_HOME.replace_all(&text, "/home/***");
    RE_WINDOWS_HOME
        .replace_all(&text, r"C:\Users\***")
        .into_owned()
}

fn redact_system_directories(line: &str) -> String {
    if line.contains("node_modules") {
        return line.to_string();
    }
    RE_SYSTEM_DIR.replace_all(line, "[SYSTEM]/").into_owned()
}

fn redact_project_directories(line: &str) -> String {
    let text = RE_PROJECT_ROOT.replace_all(line, "${1}[PROJECT]/");
    RE_MOUNT.replace_all(&text, "/mnt/***/***").into_owned()
}

fn redact_devices(line: &str) -> String {
    let text = RE_DEVICE_PATH.replace_all(line, "[DEVICE_PATH]");
    let text = RE_UNC_PATH.replace_all(&text, "[UNC_PATH]");
    RE_DEVICE_NAME.replace_all(&text, "[DEVICE]").into_owned()
}

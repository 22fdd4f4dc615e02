//! Stack trace redaction.
//!
//! Levels:
//! - `none`: empty output
//! - `minimal`: header plus the first frame, paths reduced to file names
//! - `sanitized`: every kept frame through the path pipeline
//! - `full`: only `.ssh` / `.env` paths redacted

pub mod frames;
pub mod paths;

use crate::message::MessageRedactor;
use crate::text::{char_len, truncate_chars};
use sg_config::{ErrorSanitizationConfig, StackTraceLevel};

/// Stacks longer than this are cut before any other processing.
pub const MAX_STACK_LENGTH: usize = 50_000;
/// Sanitized stacks above this length are processed in chunks.
pub const CHUNK_THRESHOLD: usize = 10_000;
/// Most characters a single pipeline call sees in chunked mode.
pub const CHUNK_SIZE: usize = 5_000;

pub const STACK_TRUNCATED_NOTICE: &str = "    ... [stack truncated for security]";

/// Multi-level stack trace redactor.
#[derive(Debug, Clone)]
pub struct StackTraceRedactor {
    messages: MessageRedactor,
}

impl StackTraceRedactor {
    pub fn new(config: &ErrorSanitizationConfig) -> Self {
        Self {
            messages: MessageRedactor::new(config),
        }
    }

    pub(crate) fn from_message_redactor(messages: MessageRedactor) -> Self {
        Self { messages }
    }

    fn config(&self) -> &ErrorSanitizationConfig {
        self.messages.config()
    }

    pub fn sanitize(&self, stack: &str) -> String {
        let level = self.config().stack_trace_level;
        if level == StackTraceLevel::None || stack.is_empty() {
            return String::new();
        }

        let capped = truncate_chars(stack, MAX_STACK_LENGTH);
        let was_capped = capped.len() < stack.len();
        if was_capped {
            tracing::debug!(
                target: "sg_redact::stack",
                original_len = stack.len(),
                limit = MAX_STACK_LENGTH,
                "stack hard-capped"
            );
        }

        let mut out = match level {
            StackTraceLevel::None => String::new(),
            StackTraceLevel::Minimal => self.minimal(capped),
            StackTraceLevel::Sanitized => self.sanitized(capped),
            StackTraceLevel::Full => self.full(capped),
        };

        if was_capped {
            out.push('\n');
            out.push_str(STACK_TRUNCATED_NOTICE);
        }
        out
    }

    fn minimal(&self, stack: &str) -> String {
        let mut lines = Vec::with_capacity(2);

        if let Some(first) = stack.lines().next().filter(|l| !frames::is_frame(l)) {
            lines.push(self.header(first));
        }

        if let Some(frame) = stack.lines().find(|l| frames::is_frame(l)) {
            let mut frame = paths::sanitize_paths(frame);
            frame = frames::basename_paths(&frame);
            if self.config().remove_line_numbers {
                frame = frames::remove_line_numbers(&frame);
            }
            lines.push(frame);
        }

        lines.join("\n")
    }

    fn sanitized(&self, stack: &str) -> String {
        let (kept, hidden) = frames::limit_depth(stack, self.config().max_stack_depth);

        let mut lines: Vec<String> = if char_len(stack) > CHUNK_THRESHOLD {
            self.sanitize_chunked(&kept)
        } else {
            kept.iter().map(|l| self.sanitize_line(l)).collect()
        };

        if hidden > 0 {
            lines.push(frames::hidden_frames_notice(hidden));
        }
        lines.join("\n")
    }

    /// No single pipeline call sees more than [`CHUNK_SIZE`] characters.
    fn sanitize_chunked(&self, lines: &[&str]) -> Vec<String> {
        let chunks = chunk_segments(lines, CHUNK_SIZE);
        tracing::debug!(
            target: "sg_redact::stack",
            chunks = chunks.len(),
            "processing stack in chunks"
        );
        let mut out = vec![String::new(); lines.len()];
        for chunk in chunks {
            for segment in chunk {
                out[segment.line].push_str(&self.sanitize_piece(segment.text, segment.frame));
            }
        }
        out
    }

    fn sanitize_line(&self, line: &str) -> String {
        self.sanitize_piece(line, frames::is_frame(line))
    }

    fn sanitize_piece(&self, text: &str, is_frame: bool) -> String {
        let config = self.config();
        if !is_frame {
            let header = self.header(text);
            return if config.remove_source_maps {
                frames::strip_source_maps(&header)
            } else {
                header
            };
        }

        let mut frame = paths::sanitize_paths(text);
        if config.remove_source_maps {
            frame = frames::strip_source_maps(&frame);
        }
        if config.sanitize_module_names {
            frame = frames::sanitize_module_names(&frame);
        }
        if config.remove_line_numbers {
            frame = frames::remove_line_numbers(&frame);
        }
        frame
    }

    /// Header lines carry the error message; give them message redaction too.
    fn header(&self, line: &str) -> String {
        paths::sanitize_paths(&self.messages.redact(line))
    }

    fn full(&self, stack: &str) -> String {
        let config = self.config();
        let (kept, hidden) = frames::limit_depth(stack, config.max_stack_depth);

        let mut lines: Vec<String> = kept
            .iter()
            .map(|line| {
                let line = frames::redact_dev_sensitive(line);
                if config.remove_source_maps {
                    frames::strip_source_maps(&line)
                } else {
                    line
                }
            })
            .collect();

        if hidden > 0 {
            lines.push(frames::hidden_frames_notice(hidden));
        }
        lines.join("\n")
    }
}

/// Part of one stack line, processed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment<'a> {
    /// Index of the line this piece belongs to.
    line: usize,
    text: &'a str,
    /// Whether the whole line is a call frame.
    frame: bool,
}

/// Split `line` into pieces of at most `size` characters.
///
/// Cuts land on whitespace when the piece has any, so paths and tokens stay
/// whole. Concatenating the pieces gives back `line`.
fn split_long_line(line: &str, size: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = line;
    while char_len(rest) > size {
        let hard = rest
            .char_indices()
            .nth(size)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = rest[..hard]
            .rfind(char::is_whitespace)
            .filter(|&i| i > 0)
            .unwrap_or(hard);
        pieces.push(&rest[..cut]);
        rest = &rest[cut..];
    }
    pieces.push(rest);
    pieces
}

/// Group line pieces into chunks of at most `size` characters.
fn chunk_segments<'a>(lines: &[&'a str], size: usize) -> Vec<Vec<Segment<'a>>> {
    let mut chunks = Vec::new();
    let mut current: Vec<Segment<'a>> = Vec::new();
    let mut current_len = 0usize;
    for (idx, &line) in lines.iter().enumerate() {
        let frame = frames::is_frame(line);
        for text in split_long_line(line, size) {
            let len = char_len(text);
            if !current.is_empty() && current_len + len > size {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(Segment {
                line: idx,
                text,
                frame,
            });
            current_len += len + 1;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Redact `stack` according to `config.stack_trace_level`.
pub fn sanitize_stack_trace(stack: &str, config: &ErrorSanitizationConfig) -> String {
    StackTraceRedactor::new(config).sanitize(stack)
}

//! Log sanitization for patient data.
//!
//! Every formatted log line passes through `sanitize()` before it reaches the
//! sink. It redacts:
//! - Labelled clinical values (`age=10`, `GCS: 15`, `Systolic Blood Pressure 110`)
//! - Medical record numbers (`MRN:12345678`)
//!
//! Callers should still keep patient values out of log statements; this is
//! the second line.
//!
//! Input longer than `TBI_SANITIZE_MAX_BYTES` (default 16 KiB) is truncated
//! and marked `[TRUNCATED]`.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Compiled patterns for PII detection and sanitization.
static PII_PATTERNS: OnceLock<PiiPatterns> = OnceLock::new();

/// Maximum number of bytes to sanitize per call.
/// Overridden by `TBI_SANITIZE_MAX_BYTES`.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

/// A compiled PII pattern with its replacement text.
struct PiiPattern {
    regex: Regex,
    replacement: &'static str,
}

struct PiiPatterns {
    set: RegexSet,
    patterns: Vec<PiiPattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    // Ensure we don't panic on UTF-8 boundaries.
    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("TBI_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

/// Labels a clinical value may be logged under, matched case-insensitively.
const CLINICAL_LABELS: &str = r"age|ais(?:[ _]severity)?|gcs|glasgow[ _]coma[ _]score|iss|injury[ _]severity[ _]score|sbp|systolic(?:[ _]bp|[ _]blood[ _]pressure)?|pulse(?:[ _]rate)?|(?:body[ _])?temp(?:erature)?|(?:blood[ _])?oxygen[ _]sat(?:uration)?|oxy[ _]sat";

fn get_patterns() -> &'static PiiPatterns {
    PII_PATTERNS.get_or_init(|| {
        let clinical = format!(r"(?i)\b({CLINICAL_LABELS})\b(\s*[:=]?\s*)-?\d+(?:\.\d+)?");
        let rules: Vec<(String, &'static str)> = vec![
            (clinical, "${1}${2}[REDACTED]"),
            (r"(?i)\bMRN[:\s]?\d{6,10}\b".to_string(), "[REDACTED-MRN]"),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| p.as_str())).expect("Valid regex set");
        let patterns = rules
            .into_iter()
            .map(|(pattern, replacement)| PiiPattern {
                regex: Regex::new(&pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        PiiPatterns { set, patterns }
    })
}

/// Sanitize a string by replacing patient data patterns.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();

    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    // Only apply patterns that matched the original prefix.
    for idx in patterns.set.matches(prefix).into_iter() {
        let pattern = &patterns.patterns[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check if a string contains anything `sanitize()` would redact.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    let (prefix, _truncated) = truncate_to_char_boundary(input, max_sanitize_bytes());
    get_patterns().set.is_match(prefix)
}

/// A `tracing_subscriber` writer wrapper that sanitizes formatted log output
/// before it is written to the underlying sink.
///
/// This keeps sanitization centralized (no need to call `sanitize()` at every
/// callsite). It is still defense-in-depth: prefer structured logging and
/// redaction-by-type to avoid sensitive data entering formatted strings.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let line_str = String::from_utf8_lossy(&line);
            let sanitized = sanitize(&line_str);
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // Prevent unbounded buffering if the formatter writes a huge line with no newlines.
        // We fall back to lossy UTF-8 conversion; `sanitize()` will also cap the output.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if hard_cap > 0 && self.buffer.len() > hard_cap {
            let s = String::from_utf8_lossy(&self.buffer).to_string();
            let sanitized = sanitize(&s);
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n[TRUNCATED]\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let s = String::from_utf8_lossy(&self.buffer);
            let sanitized = sanitize(&s);
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sanitize_labelled_clinical_values() {
        let sanitized = sanitize("age=10 GCS: 15 Systolic Blood Pressure 110 oxygen_saturation=98.5");
        assert!(!sanitized.contains("10"));
        assert!(!sanitized.contains("15"));
        assert!(!sanitized.contains("110"));
        assert!(!sanitized.contains("98.5"));
        assert!(sanitized.starts_with("age=[REDACTED]"));
        assert!(sanitized.contains("GCS: [REDACTED]"));
    }

    #[test]
    fn test_probability_is_not_redacted() {
        let line = "Mortality estimate computed: probability=3.25%";
        assert_eq!(sanitize(line), line);
        assert!(!contains_pii(line));
    }

    #[test]
    fn test_sanitize_mrn() {
        let sanitized = sanitize("MRN:12345678 found");
        assert_eq!(sanitized, "[REDACTED-MRN] found");
        assert!(sanitize("mrn 0012345").contains("[REDACTED-MRN]"));
    }

    #[test]
    fn test_contains_pii() {
        assert!(contains_pii("pulse rate: 88"));
        assert!(contains_pii("MRN:12345678"));
        assert!(!contains_pii("Rejected calculator input kind=\"invalid\""));
    }

    #[test]
    fn test_sanitize_truncates_large_inputs() {
        let input = "prefix padding padding padding suffix";
        let sanitized = sanitize_with_limit(input, 16);
        assert!(sanitized.ends_with("[TRUNCATED]"));
        assert!(!sanitized.contains("suffix"));
    }

    #[test]
    fn test_writer_sanitizes_complete_lines() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut sink);
            writer.write_all(b"gcs=").expect("write");
            writer.write_all(b"7\nok\n").expect("write");
            writer.flush().expect("flush");
        }
        let out = String::from_utf8(sink).expect("utf8");
        assert_eq!(out, "gcs=[REDACTED]\nok\n");
    }
}

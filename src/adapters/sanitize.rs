//! Log sanitization for patient values and contact details.
//!
//! Formatted log lines pass through [`SanitizingMakeWriter`] before reaching
//! any sink. Redacted:
//! - Feature-vector dumps (bracketed lists of five or more numbers)
//! - `name=value` pairs for clinical measurements
//! - Emails, phone numbers and UUIDs
//!
//! Call sites should still avoid logging answers or vectors at all; this is
//! the backstop, not the primary control.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

/// Maximum number of bytes sanitized per call. Override with
/// `CARDIOCHECK_SANITIZE_MAX_BYTES`.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Patterns {
    set: RegexSet,
    rules: Vec<Rule>,
}

const RULES: &[(&str, &str)] = &[
    (
        r"\[\s*-?\d+(?:\.\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?){4,}\s*\]",
        "[REDACTED-FEATURES]",
    ),
    (
        r"(?i)\b(?:age|sex|cp|trestbps|chol|cholesterol|fbs|restecg|thalach|exang|oldpeak|slope|ca|thal)\s*[:=]\s*-?\d+(?:\.\d+)?",
        "[REDACTED-VALUE]",
    ),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    // UUID before phone: a UUID's last group also looks like a phone number.
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    (
        r"(?:\+\d{1,3}[-.\s]?)?\(?\b\d{3,5}\)?[-.\s]?\d{3,5}[-.\s]?\d{3,5}\b",
        "[REDACTED-PHONE]",
    ),
];

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        set: RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("Valid regex set"),
        rules: RULES
            .iter()
            .map(|&(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect(),
    })
}

fn max_sanitize_bytes() -> usize {
    std::env::var("CARDIOCHECK_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace sensitive values in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    // Rule order matters: vectors before single numbers.
    for idx in patterns.set.matches(prefix).into_iter() {
        let rule = &patterns.rules[idx];
        result = rule.regex.replace_all(&result, rule.replacement).into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted line
/// before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

/// Line-buffering writer produced by [`SanitizingMakeWriter`].
pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // Bound buffering for formatters that never emit a newline.
        if self.buffer.len() > max_sanitize_bytes().saturating_mul(2) {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
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
    fn test_sanitize_feature_vector() {
        let input = "features=[40, 1, 2, 120, 200, 0, 1, 150, 0, 1.0, 1, 0, 2] submitted";
        let sanitized = sanitize(input);
        assert!(sanitized.contains("[REDACTED-FEATURES]"));
        assert!(!sanitized.contains("120"));
    }

    #[test]
    fn test_sanitize_named_measurements() {
        let sanitized = sanitize("chol=245 thalach: 150 mode=Expert");
        assert_eq!(sanitized, "[REDACTED-VALUE] [REDACTED-VALUE] mode=Expert");
    }

    #[test]
    fn test_sanitize_contact_details() {
        let sanitized = sanitize("Contact: patient@clinic.org or +91 8591531092");
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
        assert!(sanitized.contains("[REDACTED-PHONE]"));
        assert!(!sanitized.contains("8591531092"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let input = "Prediction complete: mode=Smart label=HIGH band=critical";
        assert_eq!(sanitize(input), input);
        assert_eq!(
            sanitize("id 550e8400-e29b-41d4-a716-446655440000"),
            "id [REDACTED-UUID]"
        );
    }

    #[test]
    fn test_sanitize_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("abcdefghijklmnopqrst", 10);
        assert_eq!(sanitized, "abcdefghij [TRUNCATED]");
    }

    #[test]
    fn test_writer_sanitizes_per_line() {
        let mut out = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut out);
            writer.write_all(b"age=55 ok\npartial ").expect("write");
            writer.write_all(b"line\n").expect("write");
        }
        assert_eq!(String::from_utf8(out).expect("utf8"), "[REDACTED-VALUE] ok\npartial line\n");
    }
}

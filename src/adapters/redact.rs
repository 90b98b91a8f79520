//! Log redaction for formatted tracing output.
//!
//! Lab reports are PHI. The workflow avoids logging report contents, but
//! upload names, service error bodies and user-typed text can still carry
//! personal data into a log line. Every line written through
//! `RedactingMakeWriter` is scrubbed of:
//! - e-mail addresses and phone numbers
//! - bearer tokens and `key=...` style credentials (the analysis service
//!   sits in front of a hosted model with an API key)
//! - `data:` URLs and long base64 runs (inline report images)

use std::io::{self, Write};
use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

/// Lines longer than this are cut before scanning.
const MAX_LINE_BYTES: usize = 8 * 1024;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"data:[a-z]+/[a-z0-9.+-]+;base64,[A-Za-z0-9+/=]+", "[DATA-URL]"),
            (r"(?i)\bbearer\s+[A-Za-z0-9._~+/-]{8,}=*", "Bearer [TOKEN]"),
            (
                r"(?i)\b(api[_-]?key|token|secret|password)\s*[:=]\s*\S{8,}",
                "$1=[SECRET]",
            ),
            (
                r"(?i)\b[a-z0-9._%+-]{1,64}@[a-z0-9-]{1,63}(?:\.[a-z0-9-]{1,63})*\.[a-z]{2,}\b",
                "[EMAIL]",
            ),
            (r"(?:\+?\d{1,3}[-. ])?\(?\d{3}\)?[-. ]\d{3}[-. ]\d{4}\b", "[PHONE]"),
            (r"[A-Za-z0-9+/]{120,}={0,2}", "[BLOB]"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Rule {
            // Patterns are constants; a failure here is a programming error.
            pattern: Regex::new(pattern).expect("valid redaction pattern"),
            replacement,
        })
        .collect()
    })
}

/// Scrub one piece of text.
#[must_use]
pub fn redact(input: &str) -> String {
    let mut end = input.len().min(MAX_LINE_BYTES);
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = input[..end].to_string();

    for rule in rules() {
        if rule.pattern.is_match(&out) {
            out = rule.pattern.replace_all(&out, rule.replacement).into_owned();
        }
    }

    if end < input.len() {
        out.push_str(" [CUT]");
        if input.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Wraps another `MakeWriter` and redacts each complete line.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            pending: Vec::new(),
        }
    }
}

/// Line-buffering writer produced by `RedactingMakeWriter`.
pub struct RedactingWriter<W: Write> {
    inner: W,
    pending: Vec<u8>,
}

impl<W: Write> RedactingWriter<W> {
    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(redact(&text).as_bytes())
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            self.emit(&line)?;
        }

        // A formatter that never writes a newline must not grow the buffer forever.
        if self.pending.len() > MAX_LINE_BYTES * 2 {
            let chunk = std::mem::take(&mut self.pending);
            self.emit(&chunk)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

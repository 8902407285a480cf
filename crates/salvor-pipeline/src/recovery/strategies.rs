use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use salvor_types::{CanonicalResult, ResultData};

use crate::parse::parse_strict;
use crate::recovery::RecoveryStrategy;

static MEDIA_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(image_url|image_data|image|thumbnail|img)"\s*:\s*"([^"]*)"#).unwrap()
});

static SUCCESS_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""success"\s*:\s*(true|false)"#).unwrap());

static MESSAGE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""message"\s*:\s*"([^"]*)"#).unwrap());

static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",\s*([}\]])").unwrap());

/// Pattern-match high-value fields straight out of corrupt text.
///
/// Applies only when an intact media reference survives the corruption; the
/// reference, the success flag, and the message ride out under their
/// original keys.
#[derive(Debug)]
pub struct FieldExtraction;

impl RecoveryStrategy for FieldExtraction {
    fn name(&self) -> &'static str {
        "field_extraction"
    }

    fn attempt(&self, content: &str) -> Result<CanonicalResult, String> {
        let mut media: Option<(String, String)> = None;
        for caps in MEDIA_FIELD.captures_iter(content) {
            let source = caps[2].trim();
            if !source.is_empty() {
                media = Some((caps[1].to_string(), source.to_string()));
                break;
            }
        }
        let Some((key, source)) = media else {
            return Err("no intact media reference found".to_string());
        };

        let success = SUCCESS_FLAG
            .captures(content)
            .map(|caps| &caps[1] == "true")
            .unwrap_or(true);
        let message = MESSAGE_FIELD
            .captures(content)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        let mut data = ResultData::new();
        data.insert(key, &Value::String(source));
        Ok(CanonicalResult::new(success, message, data))
    }
}

/// Pattern-match only the success flag and message, discarding everything
/// else. Strictly weaker than [`FieldExtraction`].
#[derive(Debug)]
pub struct MinimalExtraction;

impl RecoveryStrategy for MinimalExtraction {
    fn name(&self) -> &'static str {
        "minimal_extraction"
    }

    fn attempt(&self, content: &str) -> Result<CanonicalResult, String> {
        let Some(caps) = SUCCESS_FLAG.captures(content) else {
            return Err("no success flag found".to_string());
        };
        let success = &caps[1] == "true";
        let message = MESSAGE_FIELD
            .captures(content)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();
        Ok(CanonicalResult::new(success, message, ResultData::new()))
    }
}

/// Strip common corruption artifacts and retry the strict parse once.
#[derive(Debug)]
pub struct StructuralCleanup;

impl RecoveryStrategy for StructuralCleanup {
    fn name(&self) -> &'static str {
        "structural_cleanup"
    }

    fn attempt(&self, content: &str) -> Result<CanonicalResult, String> {
        let cleaned = cleanup(content);
        parse_strict(&cleaned).map_err(|err| format!("still unparseable after cleanup: {err}"))
    }
}

fn cleanup(content: &str) -> String {
    // Raw control characters are invalid inside JSON strings and are the
    // most common transport artifact.
    let stripped: String = content.chars().filter(|c| !c.is_control()).collect();
    let closed = close_structure(stripped.trim());
    // serde_json rejects trailing commas; truncation repair often leaves one
    // behind a closer.
    TRAILING_COMMA.replace_all(&closed, "$1").into_owned()
}

/// Close unterminated strings and brackets so a truncated document parses.
fn close_structure(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }
        match c {
            '\\' if in_string => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            '{' | '[' if !in_string => {
                stack.push(c);
                out.push(c);
            }
            '}' if !in_string => {
                if stack.last() == Some(&'{') {
                    stack.pop();
                }
                out.push(c);
            }
            ']' if !in_string => {
                if stack.last() == Some(&'[') {
                    stack.pop();
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    if escaped {
        // A trailing lone backslash cannot be completed.
        out.pop();
    }
    if in_string {
        out.push('"');
    }

    // A cut after ':' or ',' leaves a dangling token that no amount of
    // bracket-closing fixes.
    loop {
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        match out.chars().last() {
            Some(',') => {
                out.pop();
            }
            Some(':') => {
                out.push_str("null");
                break;
            }
            _ => break,
        }
    }

    for opener in stack.iter().rev() {
        out.push(if *opener == '{' { '}' } else { ']' });
    }
    out
}

/// Parse the longest structurally-closable prefix, discarding the broken
/// remainder. Probe count is bounded so pathological inputs stay cheap.
#[derive(Debug)]
pub struct PartialSalvage {
    max_probes: usize,
}

impl PartialSalvage {
    pub fn new(max_probes: usize) -> Self {
        Self {
            max_probes: max_probes.max(1),
        }
    }
}

impl RecoveryStrategy for PartialSalvage {
    fn name(&self) -> &'static str {
        "partial_salvage"
    }

    fn attempt(&self, content: &str) -> Result<CanonicalResult, String> {
        let trimmed = content.trim();
        let Some(start) = trimmed.find('{') else {
            return Err("no object structure to salvage".to_string());
        };
        let body = &trimmed[start..];

        // Cut points, rightmost first: before a ',' (dropping the broken
        // tail) or after a closer. All cut bytes are ASCII, so slicing on
        // them is boundary-safe.
        let mut probes = 0;
        for (idx, byte) in body.bytes().enumerate().rev() {
            if probes >= self.max_probes {
                break;
            }
            let prefix = match byte {
                b',' => &body[..idx],
                b'}' | b']' => &body[..=idx],
                _ => continue,
            };
            probes += 1;
            if let Ok(result) = parse_strict(&close_structure(prefix)) {
                return Ok(result);
            }
        }
        Err(format!(
            "no parseable prefix within {} probes",
            self.max_probes
        ))
    }
}

/// Terminal strategy: synthesize a failed result carrying the original
/// content verbatim. Cannot fail, which is what makes the standard chain
/// total.
#[derive(Debug)]
pub struct FallbackSynthesis;

impl RecoveryStrategy for FallbackSynthesis {
    fn name(&self) -> &'static str {
        "fallback_synthesis"
    }

    fn attempt(&self, content: &str) -> Result<CanonicalResult, String> {
        Ok(CanonicalResult::failure(content))
    }
}

//! Best-effort extraction of a JSON object from free-form model output.
//!
//! Models are asked to answer in JSON but routinely wrap the object in a
//! markdown code fence or surround it with prose. The extractor picks the
//! most likely candidate:
//!
//! 1. the first fenced block tagged `json`,
//! 2. otherwise the first fenced block of any kind,
//! 3. otherwise the whole text,
//!
//! and parses it. Failures are reported as [`ExtractionDegrade`] so callers
//! decide which defaults to substitute.

use serde_json::{Map, Value};
use thiserror::Error;

/// A parsed JSON object.
pub type JsonMap = Map<String, Value>;

const FENCE: &str = "```";

/// Why a model response could not be turned into a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionDegrade {
    #[error("code fence opened but never closed")]
    UnterminatedFence,

    #[error("no content to parse")]
    EmptyContent,

    #[error("malformed JSON: {0}")]
    Malformed(String),

    #[error("top-level JSON value is not an object")]
    NotAnObject,
}

/// A fenced block found by the scanner. `content` is `None` when the
/// closing fence is missing.
#[derive(Debug, PartialEq, Eq)]
struct FencedBlock<'a> {
    tag: &'a str,
    content: Option<&'a str>,
}

impl FencedBlock<'_> {
    fn is_json(&self) -> bool {
        self.tag.eq_ignore_ascii_case("json")
    }
}

enum ScanState<'a> {
    Outside,
    Inside { tag: &'a str, content_start: usize },
}

/// Language tag directly following an opening fence (`json`, `python`, ...).
fn fence_tag(rest: &str) -> &str {
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Split text into fenced blocks with a two-state scanner.
///
/// The info string after an opening fence (`python`, `text`, ...) is
/// intentionally dropped from the block's content rather than kept as a plain
/// split on the fence marker would, so a tagged non-json block still parses.
fn scan_fences(text: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut state = ScanState::Outside;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find(FENCE) {
        let fence_at = pos + offset;
        let after_fence = fence_at + FENCE.len();

        state = match state {
            ScanState::Outside => {
                let tag = fence_tag(&text[after_fence..]);
                let content_start = after_fence + tag.len();
                pos = content_start;
                ScanState::Inside { tag, content_start }
            }
            ScanState::Inside { tag, content_start } => {
                blocks.push(FencedBlock {
                    tag,
                    content: Some(&text[content_start..fence_at]),
                });
                pos = after_fence;
                ScanState::Outside
            }
        };
    }

    if let ScanState::Inside { tag, .. } = state {
        blocks.push(FencedBlock { tag, content: None });
    }

    blocks
}

/// Content of the first fence opened with a `json` tag, up to the next fence.
///
/// Located independently of fence pairing, so a stray fence earlier in the
/// prose cannot consume the tagged opening fence as its closer.
fn json_tagged_block(text: &str) -> Option<FencedBlock<'_>> {
    text.match_indices(FENCE)
        .map(|(fence_at, _)| {
            let after_fence = fence_at + FENCE.len();
            let tag = fence_tag(&text[after_fence..]);
            let content_start = after_fence + tag.len();
            let content = text[content_start..]
                .find(FENCE)
                .map(|len| &text[content_start..content_start + len]);
            FencedBlock { tag, content }
        })
        .find(|block| block.is_json())
}

/// Choose the substring that should hold the JSON object.
fn select_candidate(text: &str) -> Result<&str, ExtractionDegrade> {
    let chosen = json_tagged_block(text).or_else(|| scan_fences(text).into_iter().next());

    match chosen {
        None => Ok(text),
        Some(block) => block.content.ok_or(ExtractionDegrade::UnterminatedFence),
    }
}

/// Extract and parse the JSON object embedded in `text`.
pub fn try_extract_json(text: &str) -> Result<JsonMap, ExtractionDegrade> {
    let candidate = select_candidate(text)?.trim();
    if candidate.is_empty() {
        return Err(ExtractionDegrade::EmptyContent);
    }

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ExtractionDegrade::NotAnObject),
        Err(e) => Err(ExtractionDegrade::Malformed(e.to_string())),
    }
}

/// Lossy form of [`try_extract_json`]: any failure yields an empty map.
pub fn extract_json(text: &str) -> JsonMap {
    try_extract_json(text).unwrap_or_default()
}

/// Read a string field, ignoring values of any other type.
pub fn string_field(map: &JsonMap, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Read a list of strings. Non-string items are skipped; a missing or
/// non-array value yields an empty list.
pub fn string_list_field(map: &JsonMap, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read a boolean field, ignoring values of any other type.
pub fn bool_field(map: &JsonMap, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

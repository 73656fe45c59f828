//! Map header scanning.

use crate::error::ApiError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Declared map dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapHeader {
    pub width: usize,
    pub height: usize,
}

impl MapHeader {
    /// Whether `(x, y)` lies in `[0, width) x [0, height)`.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (x as usize) < self.width && (y as usize) < self.height
    }
}

/// Partial header state while lines are scanned.
#[derive(Debug, Default)]
pub(crate) struct HeaderScan {
    pub width: Option<usize>,
    pub height: Option<usize>,
}

impl HeaderScan {
    /// Feed one line (1-based `line_no` for error reporting).
    pub fn observe(&mut self, line: &str, line_no: usize) -> Result<(), ApiError> {
        let lowered = line.trim().to_ascii_lowercase();
        if let Some(rest) = lowered.strip_prefix("width") {
            if let Some(value) = first_integer(rest, line_no)? {
                self.width = Some(positive(value, "width", line_no)?);
            }
        } else if let Some(rest) = lowered.strip_prefix("height") {
            if let Some(value) = first_integer(rest, line_no)? {
                self.height = Some(positive(value, "height", line_no)?);
            }
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    pub fn finish(&self) -> Result<MapHeader, ApiError> {
        let width = self.width.ok_or(ApiError::MissingHeader { missing: "width" })?;
        let height = self
            .height
            .ok_or(ApiError::MissingHeader { missing: "height" })?;
        Ok(MapHeader { width, height })
    }
}

/// Scan map text for its `width` and `height` declarations.
///
/// Matching is case-insensitive on the trimmed line prefix; the value is the
/// first integer found after the keyword on the same line.
pub fn read_header(text: &str) -> Result<MapHeader, ApiError> {
    let mut scan = HeaderScan::default();
    for (idx, line) in text.lines().enumerate() {
        scan.observe(line, idx + 1)?;
        if scan.is_complete() {
            break;
        }
    }
    scan.finish()
}

fn integer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static integer pattern"))
}

fn first_integer(text: &str, line_no: usize) -> Result<Option<usize>, ApiError> {
    match integer_regex().find(text) {
        Some(m) => m
            .as_str()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| ApiError::MalformedInput {
                line: line_no,
                message: format!("header value {}: {}", m.as_str(), e),
            }),
        None => Ok(None),
    }
}

fn positive(value: usize, name: &str, line_no: usize) -> Result<usize, ApiError> {
    if value == 0 {
        return Err(ApiError::MalformedInput {
            line: line_no,
            message: format!("{} must be positive", name),
        });
    }
    Ok(value)
}

//! Restricted JSONPath evaluation
//!
//! Supports exactly the subset needed for wait conditions:
//! - dot-separated field names: `status.phase`
//! - array indexing: `status.conditions[0].type`
//! - quoted keys for names containing dots or slashes: `metadata.annotations['example.com/ready']`
//! - an optional leading `$` or `.`
//!
//! There are no wildcards, filters, slices or recursive descent. Evaluation is
//! total: any path that does not resolve yields [`PathMatch::Missing`].

use serde_json::Value as JsonValue;
use std::fmt;

use crate::error::{CoreError, Result};

/// A single step in a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object field
    Key(String),
    /// Array element
    Index(usize),
}

/// A parsed path expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<Segment>,
}

/// Result of evaluating a path against a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// Path does not resolve (missing key, type mismatch, index out of range, or null)
    Missing,
    /// Path resolves to a string, number or boolean, stringified
    ///
    /// Numbers keep their JSON form, so a float `1.0` yields `"1.0"` and
    /// never equals an expected value of `"1"`.
    Scalar(String),
    /// Path resolves to an object or array
    Structure,
}

/// Marker returned by [`PathMatch::value`] for structural matches
pub const STRUCTURE_MARKER: &str = "<structure>";

impl PathMatch {
    /// Whether the path resolved to anything
    pub fn found(&self) -> bool {
        !matches!(self, PathMatch::Missing)
    }

    /// Observed value, if any
    pub fn value(&self) -> Option<&str> {
        match self {
            PathMatch::Missing => None,
            PathMatch::Scalar(s) => Some(s),
            PathMatch::Structure => Some(STRUCTURE_MARKER),
        }
    }

    /// Whether this match satisfies a wait condition
    ///
    /// Without an expected value any non-empty value counts. A structure never
    /// equals an expected string.
    pub fn satisfies(&self, expected: Option<&str>) -> bool {
        match (self, expected) {
            (PathMatch::Missing, _) => false,
            (PathMatch::Scalar(s), None) => !s.is_empty(),
            (PathMatch::Scalar(s), Some(want)) => s == want,
            (PathMatch::Structure, None) => true,
            (PathMatch::Structure, Some(_)) => false,
        }
    }
}

impl JsonPath {
    /// Parse a path expression
    pub fn parse(path: &str) -> Result<Self> {
        let segments = parse_segments(path)?;
        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The original expression
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Evaluate against a document
    pub fn evaluate(&self, document: &JsonValue) -> PathMatch {
        let mut current = document;
        for segment in &self.segments {
            let next = match (segment, current) {
                (Segment::Key(key), JsonValue::Object(map)) => map.get(key),
                (Segment::Index(i), JsonValue::Array(items)) => items.get(*i),
                _ => None,
            };
            match next {
                Some(v) => current = v,
                None => return PathMatch::Missing,
            }
        }

        match current {
            JsonValue::Null => PathMatch::Missing,
            JsonValue::String(s) => PathMatch::Scalar(s.clone()),
            JsonValue::Number(n) => PathMatch::Scalar(n.to_string()),
            JsonValue::Bool(b) => PathMatch::Scalar(b.to_string()),
            JsonValue::Array(_) | JsonValue::Object(_) => PathMatch::Structure,
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse and evaluate in one step
pub fn evaluate(document: &JsonValue, path: &str) -> Result<PathMatch> {
    Ok(JsonPath::parse(path)?.evaluate(document))
}

fn parse_segments(path: &str) -> Result<Vec<Segment>> {
    let err = |message: &str| CoreError::InvalidPath {
        path: path.to_string(),
        message: message.to_string(),
    };

    let mut rest = path.trim();
    rest = rest.strip_prefix('$').unwrap_or(rest);
    rest = rest.strip_prefix('.').unwrap_or(rest);
    if rest.is_empty() {
        return Err(err("path is empty"));
    }

    let chars: Vec<char> = rest.chars().collect();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        // Field name (may be absent when the segment starts with a bracket)
        let start = i;
        while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
            if chars[i] == ']' {
                return Err(err("unexpected ']'"));
            }
            i += 1;
        }
        if i > start {
            segments.push(Segment::Key(chars[start..i].iter().collect()));
        } else if (i < chars.len() && chars[i] == '.') || (start > 0 && chars[start - 1] == '.') {
            return Err(err("empty field name"));
        }

        while i < chars.len() && chars[i] == '[' {
            let close = chars[i..]
                .iter()
                .position(|c| *c == ']')
                .map(|p| i + p)
                .ok_or_else(|| err("unterminated '['"))?;
            let inner: String = chars[i + 1..close].iter().collect();
            segments.push(parse_bracket(&inner).ok_or_else(|| {
                err("brackets must hold a non-negative index or a quoted key")
            })?);
            i = close + 1;
        }

        if i < chars.len() {
            if chars[i] != '.' {
                return Err(err("expected '.' or '[' after ']'"));
            }
            i += 1;
            if i == chars.len() {
                return Err(err("trailing '.'"));
            }
        }
    }

    Ok(segments)
}

fn parse_bracket(inner: &str) -> Option<Segment> {
    let inner = inner.trim();
    for quote in ['\'', '"'] {
        if let Some(key) = inner
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return Some(Segment::Key(key.to_string()));
        }
    }
    inner.parse::<usize>().ok().map(Segment::Index)
}

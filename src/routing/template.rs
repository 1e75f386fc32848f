//! Path templates with named placeholders, e.g. `/manufacturers/{hsn}`.
//!
//! A template is a sequence of `/`-separated segments, each either a literal
//! or a `{name}` placeholder matching exactly one non-empty segment. A single
//! trailing slash is ignored on both templates and request paths, so
//! `/path/` and `/path` resolve identically.

use std::collections::HashMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use super::RegistrationError;
use crate::error::Error;

/// Path parameters extracted from a template match.
pub type PathParams = HashMap<String, String>;

/// Characters escaped when a value is substituted into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(raw: &str) -> Result<Self, RegistrationError> {
        let invalid = |reason: &str| RegistrationError::InvalidTemplate {
            template: raw.to_string(),
            reason: reason.to_string(),
        };

        let parts = split_path(raw).ok_or_else(|| invalid("must start with '/' and have no empty segments"))?;

        let mut segments = Vec::with_capacity(parts.len());
        for part in parts {
            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => {
                    if name.is_empty() || name.contains(['{', '}']) {
                        return Err(invalid("placeholder needs a name"));
                    }
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(invalid("placeholder names must be unique"));
                    }
                    Segment::Param(name.to_string())
                }
                None if part.contains(['{', '}']) => {
                    return Err(invalid("placeholders must span a whole segment"));
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names, in template order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Number of literal segments. Higher means more specific.
    pub fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// True when both templates match exactly the same set of paths.
    pub fn same_shape(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Match a request path, returning the decoded placeholder values.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts = split_path(path)?;
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = percent_decode_str(part).decode_utf8().ok()?;
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }
        Some(params)
    }

    /// Substitute placeholder values and return the encoded path.
    ///
    /// Values are looked up by key; the first pair with a matching key wins.
    /// Keys that name no placeholder are ignored.
    pub fn expand(&self, params: &[(&str, &str)]) -> Result<String, Error> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => {
                    let value = params
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .filter(|value| !value.is_empty())
                        .ok_or_else(|| Error::MissingParameter {
                            template: self.raw.clone(),
                            param: name.clone(),
                        })?;
                    path.extend(utf8_percent_encode(value, PATH_SEGMENT));
                }
            }
        }
        Ok(path)
    }
}

/// Split an absolute path into segments, ignoring one trailing slash.
/// Returns `None` for relative paths or paths with empty segments.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let rest = path.strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Some(Vec::new());
    }
    let parts: Vec<&str> = rest.split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

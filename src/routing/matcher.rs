//! Route pattern matching.
//!
//! # Responsibilities
//! - Compile `/api/states/{slug}` style patterns into segments
//! - Match a request path segment by segment
//! - Collect named captures
//!
//! # Design Decisions
//! - A capture matches exactly one non-empty path segment
//! - A capture may carry a literal prefix/suffix inside its segment
//!   (`sitemap-{state}.xml`)
//! - Path matching is case-sensitive
//! - Empty path segments (double or trailing slashes) are ignored
//! - No regex to guarantee O(n) matching

use axum::http::Method;

/// One compiled path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment exactly.
    Literal(String),
    /// Binds the path segment (minus affixes) to `name`.
    Capture {
        name: String,
        prefix: String,
        suffix: String,
    },
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match (raw.find('{'), raw.rfind('}')) {
            (Some(open), Some(close)) if open < close => Segment::Capture {
                name: raw[open + 1..close].to_string(),
                prefix: raw[..open].to_string(),
                suffix: raw[close + 1..].to_string(),
            },
            _ => Segment::Literal(raw.to_string()),
        }
    }

    fn capture<'a>(&self, segment: &'a str) -> Option<Option<&'a str>> {
        match self {
            Segment::Literal(lit) => (lit == segment).then_some(None),
            Segment::Capture { prefix, suffix, .. } => {
                let value = segment.strip_prefix(prefix.as_str())?;
                let value = value.strip_suffix(suffix.as_str())?;
                (!value.is_empty()).then_some(Some(value))
            }
        }
    }
}

/// Splits a path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Named values captured from a matched path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<(String, String)>,
}

impl Params {
    /// Captured value for `name`, if the pattern declared it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A method plus a compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    method: Method,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile `pattern` for requests with `method`.
    pub fn new(method: Method, pattern: &str) -> Self {
        Self {
            method,
            segments: split_path(pattern).into_iter().map(Segment::parse).collect(),
        }
    }

    /// Number of fully literal segments; used to rank equally prioritized routes.
    pub fn literal_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count()
    }

    /// Returns captures if `method` and every segment match.
    pub fn matches(&self, method: &Method, segments: &[&str]) -> Option<Params> {
        if *method != self.method || segments.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::default();
        for (pattern, segment) in self.segments.iter().zip(segments) {
            let captured = pattern.capture(segment)?;
            if let (Segment::Capture { name, .. }, Some(value)) = (pattern, captured) {
                params.values.push((name.clone(), value.to_string()));
            }
        }
        Some(params)
    }
}

//! Path grammar, normalization and tokenization.
//!
//! # Responsibilities
//! - Validate route paths against the HTTP path segment grammar
//! - Normalize route and request paths to a canonical form
//! - Split paths into tokens and classify them
//!
//! # Design Decisions
//! - Fixed character grammar, no regex
//! - Canonical form: one leading slash, no trailing slash, root is `/`
//! - Request paths are never validated, only normalized

use std::fmt;

/// Characters allowed in a segment besides ASCII letters and digits.
///
/// Covers `[$+_.-]`, `%`, `[!*'(),]` and `[;:@&=]`. Percent-encoded octets
/// (`%XX`) are a subset of this set.
const SEGMENT_PUNCTUATION: &[u8] = b"$+_.-%!*'(),;:@&=";

/// Returns true if the character may appear inside a path segment.
fn is_segment_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || SEGMENT_PUNCTUATION.contains(&c)
}

/// Checks a path against the HTTP path grammar.
///
/// A path is a sequence of segments joined by `/`; each segment is a possibly
/// empty run of segment characters. The empty string is grammatically valid,
/// route construction rejects it separately.
pub fn is_valid_path(path: &str) -> bool {
    path.split('/').all(|segment| segment.bytes().all(is_segment_char))
}

/// Normalizes a route path: a single leading slash, no leading or trailing
/// slash runs, root stays `/`.
pub fn normalize_route_path(path: &str) -> String {
    format!("/{}", path.trim_matches('/'))
}

/// Normalizes an incoming request path.
///
/// Drops the query string and surrounding slashes. An empty remainder (for
/// example `?only_query`) resolves to root.
pub fn normalize_request_path(path: &str) -> String {
    let path = match path.find('?') {
        Some(position) => &path[..position],
        None => path,
    };

    normalize_route_path(path)
}

/// Splits a normalized path into its segments. Root has no segments.
pub fn path_tokens(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed.split('/').collect()
}

/// A single classified segment of a route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Must equal the request segment byte for byte.
    Literal(String),
    /// `%name%`: binds the request segment under `name`.
    Parameter(String),
}

impl Token {
    /// Classifies a raw segment.
    pub fn parse(segment: &str) -> Self {
        match parameter_name(segment) {
            Some(name) => Token::Parameter(name.to_string()),
            None => Token::Literal(segment.to_string()),
        }
    }

    /// Name of the parameter, or `None` for a literal.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Token::Parameter(name) => Some(name),
            Token::Literal(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(literal) => f.write_str(literal),
            Token::Parameter(name) => write!(f, "%{}%", name),
        }
    }
}

/// Extracts `name` from a segment of the exact form `%name%`.
pub fn parameter_name(segment: &str) -> Option<&str> {
    let name = segment.strip_prefix('%')?.strip_suffix('%')?;
    if name.is_empty() || name.contains('%') {
        return None;
    }

    Some(name)
}

/// Tokenizes a normalized path into classified tokens.
pub fn tokenize(path: &str) -> Vec<Token> {
    path_tokens(path).into_iter().map(Token::parse).collect()
}

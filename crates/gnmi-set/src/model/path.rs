//! Structured gNMI paths and the xpath-style string resolver.
//!
//! Paths are written as `/elem/elem[key=value][key2=value2]`, optionally
//! prefixed by an origin (`openconfig:/interfaces`). Key values may contain
//! `/`; `\` escapes the next character inside a key value.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::PathError;

/// One element of a path, with its list keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathElem {
    pub name: String,
    pub key: BTreeMap<String, String>,
}

impl PathElem {
    /// Creates an element without keys.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: BTreeMap::new(),
        }
    }

    /// Adds a list key.
    pub fn with_key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.key.insert(name.into(), value.into());
        self
    }
}

/// A structured path addressing a configuration element on a device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    /// Schema origin (e.g., "openconfig"), empty when unset.
    pub origin: String,
    /// Target device, only set on request prefixes.
    pub target: String,
    pub elem: Vec<PathElem>,
}

impl Path {
    /// Creates a root path (no elements).
    pub fn root() -> Self {
        Self::default()
    }

    /// Appends an element.
    pub fn push(mut self, elem: PathElem) -> Self {
        self.elem.push(elem);
        self
    }

    /// Returns true if the path has no elements.
    pub fn is_root(&self) -> bool {
        self.elem.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.origin.is_empty() {
            write!(f, "{}:", self.origin)?;
        }
        if self.elem.is_empty() {
            return f.write_str("/");
        }
        for elem in &self.elem {
            write!(f, "/{}", elem.name)?;
            for (k, v) in &elem.key {
                write!(f, "[{}=", k)?;
                for c in v.chars() {
                    if matches!(c, ']' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("]")?;
            }
        }
        Ok(())
    }
}

/// Resolves path strings into structured paths.
pub trait PathResolver {
    /// Resolves a single path string.
    fn resolve(&self, path: &str) -> Result<Path, PathError>;

    /// Resolves the request prefix for a target.
    ///
    /// Returns None when both the prefix and target are empty.
    fn resolve_prefix(&self, prefix: &str, target: &str) -> Result<Option<Path>, PathError> {
        if prefix.is_empty() && target.is_empty() {
            return Ok(None);
        }
        let mut path = self.resolve(prefix)?;
        path.target = target.to_string();
        Ok(Some(path))
    }
}

/// The default resolver, using [`parse_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct XPathResolver;

impl PathResolver for XPathResolver {
    fn resolve(&self, path: &str) -> Result<Path, PathError> {
        parse_path(path)
    }
}

/// Creates a request prefix from a prefix path and a target name.
pub fn create_prefix(prefix: &str, target: &str) -> Result<Option<Path>, PathError> {
    XPathResolver.resolve_prefix(prefix, target)
}

/// Parses an xpath-style string into a structured path.
pub fn parse_path(input: &str) -> Result<Path, PathError> {
    let input = input.trim();
    let (origin, rest) = split_origin(input);

    let mut path = Path {
        origin: origin.to_string(),
        ..Path::default()
    };
    for segment in split_elements(rest, input)? {
        path.elem.push(parse_elem(&segment, input)?);
    }
    Ok(path)
}

/// Splits off an `origin:` prefix.
fn split_origin(input: &str) -> (&str, &str) {
    if input.starts_with('/') {
        return ("", input);
    }
    match input.find(':') {
        Some(i) if !input[..i].contains(['/', '[']) => (&input[..i], &input[i + 1..]),
        _ => ("", input),
    }
}

/// Splits on `/` outside of key brackets, keeping escapes intact.
fn split_elements(rest: &str, full: &str) -> Result<Vec<String>, PathError> {
    let rest = rest.strip_prefix('/').unwrap_or(rest);
    let mut segments = Vec::new();
    if rest.is_empty() {
        return Ok(segments);
    }

    let unbalanced = || PathError::UnbalancedBrackets { path: full.to_string() };
    let mut current = String::new();
    let mut in_key = false;
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if in_key => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '[' if !in_key => {
                in_key = true;
                current.push(c);
            }
            '[' => return Err(unbalanced()),
            ']' if in_key => {
                in_key = false;
                current.push(c);
            }
            ']' => return Err(unbalanced()),
            '/' if !in_key => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if in_key {
        return Err(unbalanced());
    }
    // A single trailing slash is tolerated.
    if !current.is_empty() {
        segments.push(current);
    }
    Ok(segments)
}

fn parse_elem(segment: &str, full: &str) -> Result<PathElem, PathError> {
    let (name, mut rest) = match segment.find('[') {
        Some(i) => (&segment[..i], &segment[i..]),
        None => (segment, ""),
    };
    if name.is_empty() {
        return Err(PathError::EmptyElem { path: full.to_string() });
    }

    let mut elem = PathElem::new(name);
    while let Some(first) = rest.chars().next() {
        if first != '[' {
            return Err(PathError::TrailingCharacters {
                elem: segment.to_string(),
                found: first,
            });
        }

        let mut content = String::new();
        let mut end = None;
        let mut escaped = false;
        for (i, c) in rest.char_indices().skip(1) {
            if escaped {
                content.push(c);
                escaped = false;
                continue;
            }
            match c {
                '\\' => escaped = true,
                ']' => {
                    end = Some(i);
                    break;
                }
                _ => content.push(c),
            }
        }
        let end = end.ok_or_else(|| PathError::UnbalancedBrackets { path: full.to_string() })?;

        let (key, value) = content
            .split_once('=')
            .ok_or_else(|| PathError::MissingEquals { elem: segment.to_string() })?;
        if key.is_empty() {
            return Err(PathError::EmptyKey { elem: segment.to_string() });
        }
        if elem.key.insert(key.to_string(), value.to_string()).is_some() {
            return Err(PathError::DuplicateKey {
                elem: segment.to_string(),
                key: key.to_string(),
            });
        }
        rest = &rest[end + 1..];
    }
    Ok(elem)
}

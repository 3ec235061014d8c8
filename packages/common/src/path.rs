//! Key paths into a document tree.
//!
//! A [`Path`] is the walk from the document root to a leaf or subtree.
//! Widgets build one by accumulating schema property keys on the way down.

use crate::error::CommonError;
use crate::result::CommonResult;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One step of a path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Key text used when this segment addresses an object
    pub fn as_key(&self) -> String {
        match self {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => i.to_string(),
        }
    }

    /// Index used when this segment addresses an array.
    ///
    /// Keys whose text is a plain unsigned integer address arrays too.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(k) => k.parse().ok(),
            PathSegment::Index(i) => Some(*i),
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(s: &str) -> Self {
        PathSegment::Key(s.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(s: String) -> Self {
        PathSegment::Key(s)
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        PathSegment::Index(i)
    }
}

/// Ordered key sequence from the document root
///
/// # Examples
/// - `["theme", "color"]` → `theme.color`
/// - `["slides", 0, "title"]` → `slides.0.title`
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Empty path (document root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Append an object key, returning the extended path
    #[inline]
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an array index, returning the extended path
    #[inline]
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// Append a segment in place
    #[inline]
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Child path one level deeper
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if path addresses the document root
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not root)
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Check if this path is a prefix of another
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.0.len() <= other.0.len() && self.0 == other.0[..self.0.len()]
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = CommonError;

    /// Parse dotted text; all-digit segments become indexes
    fn from_str(s: &str) -> CommonResult<Self> {
        if s.is_empty() {
            return Ok(Self::root());
        }

        s.split('.')
            .map(|seg| {
                if seg.is_empty() {
                    Err(CommonError::InvalidPath {
                        path: s.to_string(),
                        reason: "empty segment".to_string(),
                    })
                } else if seg.bytes().all(|b| b.is_ascii_digit()) {
                    seg.parse()
                        .map(PathSegment::Index)
                        .map_err(|_| CommonError::InvalidPath {
                            path: s.to_string(),
                            reason: format!("index {} out of range", seg),
                        })
                } else {
                    Ok(PathSegment::Key(seg.to_string()))
                }
            })
            .collect::<CommonResult<Vec<_>>>()
            .map(Self)
    }
}

/// A bare string is a single-key path, the way widgets pass top-level fields
impl From<&str> for Path {
    fn from(key: &str) -> Self {
        Self(vec![PathSegment::Key(key.to_string())])
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted_path() {
        let path: Path = "slides.0.title".parse().unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("slides".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("title".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "slides.0.title");
    }

    #[test]
    fn test_parse_rejects_empty_segment() {
        assert!("theme..color".parse::<Path>().is_err());
        assert!("".parse::<Path>().unwrap().is_root());
    }

    #[test]
    fn test_parse_error_names_the_path() {
        let result: CommonResult<Path> = "a..b".parse();
        assert_eq!(
            result,
            Err(CommonError::InvalidPath {
                path: "a..b".to_string(),
                reason: "empty segment".to_string(),
            })
        );
    }

    #[test]
    fn test_builder_and_parent() {
        let path = Path::root().key("theme").key("color");
        assert_eq!(path.len(), 2);
        assert_eq!(path.parent(), Some(Path::from("theme")));
        assert_eq!(path.last(), Some(&PathSegment::Key("color".to_string())));
        assert!(Path::from("theme").is_prefix_of(&path));
        assert!(Path::root().parent().is_none());
    }

    #[test]
    fn test_segment_addressing() {
        assert_eq!(PathSegment::Index(3).as_key(), "3");
        assert_eq!(PathSegment::from("7").as_index(), Some(7));
        assert_eq!(PathSegment::from("seven").as_index(), None);
    }

    #[test]
    fn test_path_from_json_array() {
        let path: Path = serde_json::from_str(r#"["items", 2, "label"]"#).unwrap();
        assert_eq!(path, Path::root().key("items").index(2).key("label"));
    }
}

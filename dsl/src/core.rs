//! Common items useful for working with PascalLite elements but not
//! part of the language.
use core::fmt;
use std::path::Path;
use std::sync::Arc;
use std::{hash::Hash, hash::Hasher};

use serde::{Serialize, Serializer};

/// FileId identifies the origin of source code.
///
/// FileId is normally useful in the context of source positions
/// where a source position is in a file.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FileId(Arc<str>);

impl FileId {
    /// Creates a file identifier from the path.
    pub fn from_path(path: &Path) -> Self {
        FileId(Arc::from(path.to_string_lossy().as_ref()))
    }

    /// Creates a file identifier from the slice. The slice
    /// is normally the file path.
    pub fn from_string(path: &str) -> Self {
        FileId(Arc::from(path))
    }
}

impl Default for FileId {
    fn default() -> Self {
        FileId(Arc::from(""))
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location in a file of a language element instance.
///
/// The location is defined by byte indices in the source file.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSpan {
    /// The position of the starting character (0-indexed).
    pub start: usize,
    /// The position after the ending character (0-indexed).
    pub end: usize,
    #[serde(skip)]
    pub file_id: FileId,
}

impl SourceSpan {
    pub fn join(start: &SourceSpan, end: &SourceSpan) -> Self {
        Self {
            start: start.start,
            end: end.end,
            file_id: start.file_id.clone(),
        }
    }

    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            file_id: FileId::default(),
        }
    }

    pub fn with_file_id(&self, file_id: &FileId) -> Self {
        Self {
            start: self.start,
            end: self.end,
            file_id: file_id.clone(),
        }
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        SourceSpan::range(0, 0)
    }
}

impl PartialEq for SourceSpan {
    fn eq(&self, _other: &Self) -> bool {
        // Comparing syntax trees almost never cares where an element was
        // written, so spans are always equal.
        true
    }
}
impl Eq for SourceSpan {}

/// Defines an element that has a location in source code.
pub trait Located {
    /// Get the source code position of the object.
    fn span(&self) -> SourceSpan;
}

/// Implements Identifier.
///
/// Identifiers compare by their text exactly as written: `Total` and
/// `total` are different variables. Reserved words are matched without
/// regard to case by the scanner before an identifier is ever created.
pub struct Id {
    pub name: String,
    pub span: SourceSpan,
}

impl Id {
    /// Converts a `&str` into an `Identifier`.
    pub fn from(str: &str) -> Self {
        Id {
            name: String::from(str),
            span: SourceSpan::default(),
        }
    }

    pub fn with_position(mut self, loc: SourceSpan) -> Self {
        self.span = loc;
        self
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Clone for Id {
    fn clone(&self) -> Self {
        Id::from(self.name.as_str()).with_position(self.span.clone())
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl Located for Id {
    fn span(&self) -> SourceSpan {
        self.span.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_when_display_then_returns_value() {
        let file_id = FileId::from_string("test/file.pas");
        assert_eq!(format!("{file_id}"), "test/file.pas");
    }

    #[test]
    fn file_id_from_path_then_creates_path() {
        let path = Path::new("src/prog.pas");
        let file_id = FileId::from_path(path);
        assert_eq!(format!("{file_id}"), "src/prog.pas");
    }

    #[test]
    fn id_when_different_case_then_not_equal() {
        assert_ne!(Id::from("Total"), Id::from("total"));
    }

    #[test]
    fn id_when_different_position_then_equal() {
        let a = Id::from("x").with_position(SourceSpan::range(0, 1));
        let b = Id::from("x").with_position(SourceSpan::range(10, 11));
        assert_eq!(a, b);
    }

    #[test]
    fn source_span_join_then_covers_both() {
        let joined = SourceSpan::join(&SourceSpan::range(2, 4), &SourceSpan::range(8, 12));
        assert_eq!(joined.start, 2);
        assert_eq!(joined.end, 12);
    }
}

//! Provides definition for diagnostics, which are normally errors and warnings
//! associated with compilation.
//!
//! Every stage of the compiler reports problems with a [`Diagnostic`]. The
//! command line renders them; the library returns them to the caller.

use std::fmt;

use pascallite_problems::{Problem, ProblemKind};

use crate::core::{FileId, Id, Located, SourceSpan};

/// A position marker that has both line and offset information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedPosition {
    /// Line (1-indexed)
    pub line: usize,

    /// Column (1-indexed)
    pub column: usize,

    /// Byte offset from start of string (0-indexed)
    pub offset: usize,
}

impl QualifiedPosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// A position marker that only has an offset in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetRange {
    /// Byte offset from start of string (0-indexed)
    pub start: usize,
    /// Byte offset from end of string (0-indexed)
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    QualifiedPosition(QualifiedPosition),
    OffsetRange(OffsetRange),
}

/// A label that refers to some range in a file and possibly associated
/// with a message related to that range.
///
/// Normally this indicates the location of an error or warning along with a
/// text message describing that position.
#[derive(Debug, Clone)]
pub struct Label {
    /// The position of label.
    pub location: Location,

    /// Identifier for the file.
    pub file_id: FileId,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    pub fn qualified(
        file_id: impl Into<FileId>,
        position: QualifiedPosition,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location: Location::QualifiedPosition(position),
            file_id: file_id.into(),
            message: message.into(),
        }
    }

    pub fn span(span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            location: Location::OffsetRange(OffsetRange {
                start: span.start,
                end: span.end,
            }),
            file_id: span.file_id,
            message: message.into(),
        }
    }

    /// The line of the label when the label knows it (1-indexed).
    pub fn line(&self) -> Option<usize> {
        match &self.location {
            Location::QualifiedPosition(pos) if pos.line > 0 => Some(pos.line),
            _ => None,
        }
    }
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic. Diagnostic have a code that is indicative of the category,
/// a primary location and possibly non-zero set of secondary location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    /// The compiler phase that produced the diagnostic.
    pub kind: ProblemKind,

    pub severity: Severity,

    description: String,

    /// The primary or first diagnostic.
    pub primary: Label,

    /// Additional descriptions to the constant description.
    pub described: Vec<String>,

    /// Additional information about the diagnostic.
    pub secondary: Vec<Label>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the specified label.
    ///
    /// The label associates the problem to a particular instance in a
    /// PascalLite source file.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            kind: problem.kind(),
            severity: Severity::Error,
            description: problem.message().to_string(),
            primary,
            described: vec![],
            secondary: vec![],
        }
    }

    /// Creates a diagnostic about the identifier, using the identifier
    /// position as the primary label and the name as context.
    pub fn with_id(problem: Problem, id: &Id, message: impl Into<String>) -> Self {
        Diagnostic::problem(problem, Label::span(id.span(), message))
            .with_context_id("variable", id)
    }

    /// Adds to the problem description (primary text) additional context
    /// about the problem.
    ///
    /// This is similar to adding primary and second items except that this
    /// forms part of the main description and does not need to be related to
    /// a position in a source file.
    pub fn with_context(mut self, description: &str, item: &str) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    /// Adds context about an identifier to the problem description.
    pub fn with_context_id(mut self, description: &str, item: &Id) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    pub fn with_secondary(mut self, label: Label) -> Self {
        self.secondary.push(label);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns the description for the diagnostic. This may add in other
    /// data in addition that is part of the diagnostic.
    pub fn description(&self) -> String {
        if self.described.is_empty() {
            self.description.clone()
        } else {
            format!("{} ({})", self.description, self.described.join(", "))
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description())?;
        if let Some(line) = self.primary.line() {
            write!(f, " at line {}", line)?;
        }
        if !self.primary.message.is_empty() {
            write!(f, ": {}", self.primary.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::ValueKind;

/// One step of the path from a validated root value to an offending value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named object field.
    Field(Arc<str>),
    /// A positional array element or function argument.
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Field(Arc::from(name))
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// What went wrong with a value.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IssueKind {
    /// The value has the wrong kind.
    InvalidType {
        /// Name of the expected kind.
        expected: &'static str,
        /// Kind that was found instead.
        received: ValueKind,
    },
    /// A required object field is missing.
    Required,
    /// A strict object carries fields it does not declare.
    UnrecognizedKeys(Vec<Arc<str>>),
    /// A validated function was called with fewer arguments than it declares.
    ArgumentCount {
        /// Number of declared arguments.
        expected: usize,
        /// Number of supplied arguments.
        received: usize,
    },
    /// One or more arguments of a validated function call are invalid.
    InvalidArguments(ValidationError),
    /// The return value of a validated function call is invalid.
    InvalidReturnType(ValidationError),
    /// A failure reported by user code.
    Custom(Cow<'static, str>),
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidType { expected, received } => write!(f, "expected {expected}, received {received}"),
            Self::Required => f.write_str("required"),
            Self::UnrecognizedKeys(keys) => write!(f, "unrecognized keys: {}", keys.join(", ")),
            Self::ArgumentCount { expected, received } => {
                write!(f, "expected at least {expected} argument(s), received {received}")
            }
            Self::InvalidArguments(error) => write!(f, "invalid arguments ({error})"),
            Self::InvalidReturnType(error) => write!(f, "invalid return value ({error})"),
            Self::Custom(message) => f.write_str(message),
        }
    }
}

/// A single validation failure, located by its path.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    path: Vec<PathSegment>,
    kind: IssueKind,
}

impl Issue {
    /// Creates an issue at `path`.
    #[must_use]
    pub fn new(path: Vec<PathSegment>, kind: IssueKind) -> Self {
        Self { path, kind }
    }

    /// Path from the validated root to the offending value. Empty for the root itself.
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &IssueKind {
        &self.kind
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.kind);
        }

        for (position, segment) in self.path.iter().enumerate() {
            if position > 0 && matches!(segment, PathSegment::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }

        write!(f, ": {}", self.kind)
    }
}

/// A value did not satisfy its descriptor.
///
/// Carries every issue found, not just the first. Issues raised at a validated function boundary
/// nest the argument or return value errors; [`ValidationError::flatten`] lists the leaf issues
/// with their full paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    /// Creates an error from a non-empty list of issues.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        debug_assert!(!issues.is_empty(), "a validation error needs at least one issue");
        Self { issues }
    }

    /// Creates an error with a single root-level [`IssueKind::Custom`] issue.
    #[must_use]
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::from(Issue::new(Vec::new(), IssueKind::Custom(message.into())))
    }

    /// The issues, in the order they were found.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Lists the leaf issues, expanding nested argument and return value errors.
    #[must_use]
    pub fn flatten(&self) -> Vec<Issue> {
        let mut leaves = Vec::new();
        self.flatten_into(&[], &mut leaves);
        leaves
    }

    fn flatten_into(&self, prefix: &[PathSegment], leaves: &mut Vec<Issue>) {
        for issue in &self.issues {
            let path: Vec<PathSegment> = prefix.iter().chain(&issue.path).cloned().collect();
            match &issue.kind {
                IssueKind::InvalidArguments(nested) | IssueKind::InvalidReturnType(nested) => nested.flatten_into(&path, leaves),
                kind => leaves.push(Issue::new(path, kind.clone())),
            }
        }
    }
}

impl From<Issue> for ValidationError {
    fn from(issue: Issue) -> Self {
        Self { issues: vec![issue] }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, issue) in self.issues.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

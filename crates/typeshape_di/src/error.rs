// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;
use typeshape::{Descriptor, ValidationError};

use crate::Key;

/// A specialized `Result` type for container operations
/// that return a container [`Error`][enum@Error] on failure.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while resolving from a container.
///
/// Errors surface at resolution time, never at bind time. Future versions may add additional
/// enum variants.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum Error {
    /// No provider is bound for a descriptor and key that resolution needed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A factory received arguments, or produced a value, that does not satisfy the declared
    /// descriptors.
    #[error("validation failed for {descriptor} under key {key}: {source}")]
    Validation {
        /// The descriptor whose factory failed.
        descriptor: Descriptor,
        /// The key the factory is bound under.
        key: Key,
        /// Every issue found.
        source: ValidationError,
    },
}

impl Error {
    /// Returns `true` if no provider was bound.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }

    /// Returns `true` if a produced value or its inputs failed validation.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns the resolution error, if this is one.
    #[must_use]
    pub fn as_resolution(&self) -> Option<&ResolutionError> {
        match self {
            Self::Resolution(error) => Some(error),
            Self::Validation { .. } => None,
        }
    }

    /// Returns the underlying validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            Self::Resolution(_) => None,
        }
    }
}

/// No provider is bound for a descriptor and key.
#[derive(Debug, Clone, Error)]
#[error("could not resolve dependency {descriptor} under key {key}")]
pub struct ResolutionError {
    descriptor: Descriptor,
    key: Key,
}

impl ResolutionError {
    pub(crate) fn new(descriptor: &Descriptor, key: &Key) -> Self {
        Self {
            descriptor: descriptor.clone(),
            key: key.clone(),
        }
    }

    /// The descriptor that had no provider.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The key that was looked up.
    #[must_use]
    pub fn key(&self) -> &Key {
        &self.key
    }
}

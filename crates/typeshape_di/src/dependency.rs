// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use typeshape::Descriptor;

use crate::Key;

/// A dependency of a binding: what to resolve, under which key, and whether a missing keyed
/// binding may fall back to the default key.
///
/// Bare descriptors convert into lenient dependencies (default key, not strict). Dependencies
/// built with [`dep`] are strict until told otherwise.
///
/// # Examples
///
/// ```
/// use typeshape::Descriptor;
/// use typeshape_di::{Dependency, Key, dep};
///
/// let animal = Descriptor::number();
/// let cat = Key::unique("cat");
///
/// let explicit = dep(&animal).key(&cat);
/// assert!(explicit.is_strict());
/// assert_eq!(explicit.get_key(), &cat);
///
/// let bare = Dependency::from(&animal);
/// assert!(!bare.is_strict());
/// assert!(bare.get_key().is_default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    descriptor: Descriptor,
    key: Key,
    strict: bool,
}

/// Creates a strict dependency on `descriptor` under the default key.
pub fn dep(descriptor: impl Into<Descriptor>) -> Dependency {
    Dependency {
        descriptor: descriptor.into(),
        key: Key::DEFAULT,
        strict: true,
    }
}

/// Normalizes a bare descriptor or an explicit dependency into a [`Dependency`].
///
/// Explicit dependencies are returned unchanged.
pub fn build_dependency(raw: impl Into<Dependency>) -> Dependency {
    raw.into()
}

impl Dependency {
    /// Sets the key to resolve under.
    #[must_use]
    pub fn key(mut self, key: &Key) -> Self {
        self.key = key.clone();
        self
    }

    /// Sets whether resolution may fall back to the default key when the keyed binding is missing.
    ///
    /// Strict dependencies never fall back.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The descriptor to resolve.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The key to resolve under.
    #[must_use]
    pub fn get_key(&self) -> &Key {
        &self.key
    }

    /// Whether a missing keyed binding fails instead of falling back to the default key.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

impl From<Descriptor> for Dependency {
    fn from(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            key: Key::DEFAULT,
            strict: false,
        }
    }
}

impl From<&Descriptor> for Dependency {
    fn from(descriptor: &Descriptor) -> Self {
        Self::from(descriptor.clone())
    }
}

/// An ordered list of dependencies. A dependency's position is the argument position its value
/// is passed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    items: Vec<Dependency>,
}

impl Dependencies {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a list with the items of `self` followed by the items of `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            items: self.items.iter().chain(&other.items).cloned().collect(),
        }
    }

    /// Number of dependencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no dependency is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in argument order.
    pub fn iter(&self) -> std::slice::Iter<'_, Dependency> {
        self.items.iter()
    }
}

impl<D: Into<Dependency>> FromIterator<D> for Dependencies {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(build_dependency).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dependencies {
    type Item = &'a Dependency;
    type IntoIter = std::slice::Iter<'a, Dependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

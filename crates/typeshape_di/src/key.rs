// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

// Zero is reserved for the default key.
static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// Distinguishes several providers bound to the same descriptor.
///
/// Every binding lives under a key. Bindings made without one use [`Key::DEFAULT`]. Keys created
/// by [`Key::unique`] are opaque tokens: two keys with the same description are still different keys.
///
/// # Examples
///
/// ```
/// use typeshape_di::Key;
///
/// let cat = Key::unique("sneaky-cat");
///
/// assert_eq!(cat, cat.clone());
/// assert_ne!(cat, Key::unique("sneaky-cat"));
/// assert!(Key::default().is_default());
/// ```
#[derive(Clone)]
pub struct Key {
    id: u64,
    description: Option<Arc<str>>,
}

impl Key {
    /// The key used by bindings and dependencies that do not name one.
    pub const DEFAULT: Self = Self { id: 0, description: None };

    /// Creates a new key, distinct from every other key.
    ///
    /// The description only appears in diagnostics.
    #[must_use]
    pub fn unique(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            description: Some(description.into()),
        }
    }

    /// Returns `true` for [`Key::DEFAULT`].
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.id == 0
    }

    /// Returns the description given to [`Key::unique`].
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "Key({description:?}#{})", self.id),
            None => f.write_str("Key(default)"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description().unwrap_or("default"))
    }
}

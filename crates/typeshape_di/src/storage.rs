// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use foldhash::HashMap;
use typeshape::{Descriptor, Value};

use crate::Key;
use crate::provider::Provider;

/// Two-level map from descriptor to key to entry.
#[derive(Debug)]
pub(crate) struct KeyedMap<T> {
    entries: HashMap<Descriptor, HashMap<Key, T>>,
}

pub(crate) type ProviderStorage = KeyedMap<Provider>;

pub(crate) type InstanceStorage = KeyedMap<Value>;

impl<T> Default for KeyedMap<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::default(),
        }
    }
}

impl<T> KeyedMap<T> {
    pub fn get(&self, descriptor: &Descriptor, key: &Key) -> Option<&T> {
        self.entries.get(descriptor).and_then(|by_key| by_key.get(key))
    }

    pub fn contains(&self, descriptor: &Descriptor, key: &Key) -> bool {
        self.get(descriptor, key).is_some()
    }

    /// Stores `entry`, replacing and returning any previous entry for the pair.
    pub fn insert(&mut self, descriptor: &Descriptor, key: &Key, entry: T) -> Option<T> {
        self.entries
            .entry(descriptor.clone())
            .or_default()
            .insert(key.clone(), entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_isolated_per_descriptor() {
        let text = Descriptor::string();
        let other = Descriptor::string();
        let key = Key::unique("k");
        let mut map = KeyedMap::default();

        assert!(map.insert(&text, &Key::DEFAULT, 1).is_none());
        map.insert(&text, &key, 2);

        assert_eq!(map.get(&text, &Key::DEFAULT), Some(&1));
        assert_eq!(map.get(&text, &key), Some(&2));
        assert!(!map.contains(&other, &Key::DEFAULT));
    }

    #[test]
    fn insert_replaces() {
        let text = Descriptor::string();
        let mut map = KeyedMap::default();

        map.insert(&text, &Key::DEFAULT, "first");

        assert_eq!(map.insert(&text, &Key::DEFAULT, "second"), Some("first"));
        assert_eq!(map.get(&text, &Key::DEFAULT), Some(&"second"));
    }
}

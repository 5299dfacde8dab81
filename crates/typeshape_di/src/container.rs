// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cell::RefCell;

use typeshape::{Descriptor, Value};

use crate::provider::Provider;
use crate::storage::{InstanceStorage, ProviderStorage};
use crate::telemetry::{self, Activity};
use crate::{Binder, ContainerOptions, Dependency, Error, Key, ResolutionError, Result};

/// Holds bindings and the singletons resolved from them.
///
/// Every binding is a singleton: its factory runs at most once per container, on first
/// resolution, and later resolutions return the cached value. Factories receive their
/// dependencies resolved, in declaration order, and both their inputs and their output are
/// validated against the declared descriptors.
///
/// A container is meant for one thread; it is `!Sync`. Cyclic bindings are not detected and
/// recurse until the stack is exhausted.
///
/// # Examples
///
/// ```
/// use typeshape::{Descriptor, Value};
/// use typeshape_di::Container;
///
/// let name = Descriptor::string();
/// let greeting = Descriptor::string();
///
/// let container = Container::new();
/// container.bind(&name).to_instance("steve");
/// container
///     .bind(&greeting)
///     .with([&name])
///     .to_factory(|args| Value::from(format!("hello {}", args[0].as_str().unwrap_or_default())));
///
/// assert_eq!(container.resolve(&greeting)?, Value::from("hello steve"));
/// # Ok::<(), typeshape_di::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Container {
    options: ContainerOptions,
    providers: RefCell<ProviderStorage>,
    instances: RefCell<InstanceStorage>,
}

impl Container {
    /// Creates an empty container with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container.
    #[must_use]
    pub fn with_options(options: ContainerOptions) -> Self {
        Self {
            options,
            providers: RefCell::default(),
            instances: RefCell::default(),
        }
    }

    /// Returns the options this container was created with.
    #[must_use]
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    /// Starts a binding for `descriptor` under the default key.
    pub fn bind(&self, descriptor: &Descriptor) -> Binder<'_> {
        self.bind_keyed(descriptor, &Key::DEFAULT)
    }

    /// Starts a binding for `descriptor` under `key`.
    pub fn bind_keyed(&self, descriptor: &Descriptor, key: &Key) -> Binder<'_> {
        Binder::new(self, descriptor, key)
    }

    /// Resolves the instance bound to `descriptor` under the default key.
    ///
    /// # Errors
    ///
    /// See [`resolve_keyed`][Self::resolve_keyed].
    pub fn resolve(&self, descriptor: &Descriptor) -> Result<Value> {
        self.resolve_keyed(descriptor, &Key::DEFAULT)
    }

    /// Resolves the instance bound to `descriptor` under `key`.
    ///
    /// The key applies to this lookup only. Dependencies are resolved under their own keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Resolution`] when this binding, or a binding it depends on, is missing,
    /// and [`Error::Validation`] when a factory receives or produces a value that does not satisfy
    /// its descriptors. Failed resolutions cache nothing for the failing binding.
    pub fn resolve_keyed(&self, descriptor: &Descriptor, key: &Key) -> Result<Value> {
        self.ensure(descriptor, key).inspect_err(|error| {
            telemetry::emit(&self.options, descriptor, key, Activity::Failed, Some(error));
        })
    }

    /// Returns `true` if a provider is bound to `descriptor` under `key`.
    #[must_use]
    pub fn is_bound(&self, descriptor: &Descriptor, key: &Key) -> bool {
        self.providers.borrow().contains(descriptor, key)
    }

    /// Returns `true` if an instance for `descriptor` under `key` has been resolved and cached.
    #[must_use]
    pub fn is_cached(&self, descriptor: &Descriptor, key: &Key) -> bool {
        self.instances.borrow().contains(descriptor, key)
    }

    pub(crate) fn register(&self, descriptor: &Descriptor, key: &Key, provider: Provider) {
        self.providers.borrow_mut().insert(descriptor, key, provider);
    }

    fn ensure(&self, descriptor: &Descriptor, key: &Key) -> Result<Value> {
        if let Some(instance) = self.try_get(descriptor, key) {
            telemetry::emit(&self.options, descriptor, key, Activity::CacheHit, None);
            return Ok(instance);
        }

        let provider = self
            .providers
            .borrow()
            .get(descriptor, key)
            .cloned()
            .ok_or_else(|| ResolutionError::new(descriptor, key))?;

        // No storage borrow may be held while dependencies resolve, they recurse into both maps.
        let args = provider
            .dependencies
            .iter()
            .map(|dependency| self.ensure_dependency(dependency))
            .collect::<Result<Vec<_>>>()?;

        telemetry::emit(&self.options, descriptor, key, Activity::Invoked, None);
        let produced = provider.invoke.call(&args).map_err(|source| Error::Validation {
            descriptor: descriptor.clone(),
            key: provider.key.clone(),
            source,
        })?;
        let instance = provider.finish(produced);

        self.instances.borrow_mut().insert(descriptor, key, instance.clone());
        telemetry::emit(&self.options, descriptor, key, Activity::Stored, None);

        Ok(instance)
    }

    fn ensure_dependency(&self, dependency: &Dependency) -> Result<Value> {
        let descriptor = dependency.descriptor();
        let key = dependency.get_key();

        // Falls back only when this exact binding is missing, never for a failure beneath it.
        match self.ensure(descriptor, key) {
            Err(Error::Resolution(missing))
                if !key.is_default()
                    && !dependency.is_strict()
                    && missing.descriptor() == descriptor
                    && missing.key() == key =>
            {
                telemetry::emit(&self.options, descriptor, key, Activity::Fallback, None);
                self.ensure(descriptor, &Key::DEFAULT)
            }
            result => result,
        }
    }

    fn try_get(&self, descriptor: &Descriptor, key: &Key) -> Option<Value> {
        self.instances.borrow().get(descriptor, key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Container: Send);
    static_assertions::assert_not_impl_any!(Container: Sync);

    #[test]
    fn cache_is_filled_on_first_resolution() {
        let text = Descriptor::string();
        let container = Container::new();
        container.bind(&text).to_instance("steve");

        assert!(container.is_bound(&text, &Key::DEFAULT));
        assert!(!container.is_cached(&text, &Key::DEFAULT));

        container.resolve(&text).unwrap();

        assert!(container.is_cached(&text, &Key::DEFAULT));
    }

    #[test]
    fn failed_resolution_caches_nothing() {
        let number = Descriptor::number();
        let container = Container::new();
        container.bind(&number).to_instance("not a number");

        container.resolve(&number).unwrap_err();

        assert!(!container.is_cached(&number, &Key::DEFAULT));
    }

    #[test]
    fn default_options() {
        let container = Container::new();

        assert_eq!(container.options(), &ContainerOptions::default());
    }
}

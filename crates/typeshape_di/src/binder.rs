// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::sync::Arc;

use typeshape::{Descriptor, Function, Signature, Value};

use crate::provider::{PostProcessor, Provider};
use crate::{Container, Dependencies, Dependency, Key};

/// A type that can be bound with [`Binder::to_type`].
///
/// The container calls [`construct`][Construct::construct] with the resolved dependencies, in the
/// order they were declared, and validates the resulting value against the bound descriptor.
///
/// # Examples
///
/// ```
/// use typeshape::{Descriptor, Function, Value};
/// use typeshape_di::{Construct, Container};
///
/// struct Dog;
///
/// impl Construct for Dog {
///     fn construct(_args: &[Value]) -> Self {
///         Self
///     }
/// }
///
/// impl From<Dog> for Value {
///     fn from(_: Dog) -> Self {
///         Value::object([("legCount", 4)])
///     }
/// }
///
/// let animal = Descriptor::object([("legCount", Descriptor::number())]);
/// let container = Container::new();
/// container.bind(&animal).to_type::<Dog>();
///
/// assert_eq!(container.resolve(&animal).unwrap().get("legCount"), Some(&Value::from(4)));
/// ```
pub trait Construct: Into<Value> {
    /// Builds an instance from the resolved dependencies.
    fn construct(args: &[Value]) -> Self;
}

/// Fluent builder for one binding.
///
/// [`with`][Self::with] and [`post_process`][Self::post_process] leave the receiver untouched
/// and return a new binder, so a partially configured binder can be branched. The binding is
/// stored only when a finalizer ([`to_factory`][Self::to_factory], [`to_type`][Self::to_type],
/// or [`to_instance`][Self::to_instance]) runs. Nothing is validated at bind time.
#[derive(Clone)]
#[must_use = "a binding is stored only when a finalizer such as `to_factory` is called"]
pub struct Binder<'c> {
    container: &'c Container,
    descriptor: Descriptor,
    key: Key,
    dependencies: Dependencies,
    post_processor: Option<PostProcessor>,
}

impl<'c> Binder<'c> {
    pub(crate) fn new(container: &'c Container, descriptor: &Descriptor, key: &Key) -> Self {
        Self {
            container,
            descriptor: descriptor.clone(),
            key: key.clone(),
            dependencies: Dependencies::new(),
            post_processor: None,
        }
    }

    /// Returns a binder with `dependencies` appended to the ones declared so far.
    ///
    /// Accepts bare descriptors (lenient, default key) and explicit [`Dependency`] values.
    /// Resolved dependencies are passed to the factory in declaration order.
    pub fn with<D>(&self, dependencies: impl IntoIterator<Item = D>) -> Self
    where
        D: Into<Dependency>,
    {
        Self {
            dependencies: self.dependencies.concat(&dependencies.into_iter().collect()),
            ..self.clone()
        }
    }

    /// Returns a binder whose instances pass through `post_processor` before they are cached.
    ///
    /// The post-processor output is not validated.
    pub fn post_process<F>(&self, post_processor: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            post_processor: Some(Arc::new(post_processor)),
            ..self.clone()
        }
    }

    /// Stores a binding that produces instances by calling `factory` with the resolved dependencies.
    ///
    /// Replaces any earlier binding for the same descriptor and key.
    #[expect(clippy::wrong_self_convention, reason = "finalizers consume the binder")]
    pub fn to_factory<F>(self, factory: F)
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.store(Function::new(factory));
    }

    /// Stores a binding that produces instances through [`Construct::construct`].
    #[expect(clippy::wrong_self_convention, reason = "finalizers consume the binder")]
    pub fn to_type<T>(self)
    where
        T: Construct + 'static,
    {
        self.to_factory(|args| T::construct(args).into());
    }

    /// Stores a binding that always produces `instance`.
    ///
    /// The instance is still validated, once, when it is first resolved.
    #[expect(clippy::wrong_self_convention, reason = "finalizers consume the binder")]
    pub fn to_instance(self, instance: impl Into<Value>) {
        let instance = instance.into();
        self.to_factory(move |_| instance.clone());
    }

    fn store(self, factory: Function) {
        let relax = |descriptor: &Descriptor| {
            if self.container.options().get_passthrough() {
                descriptor.passthrough()
            } else {
                descriptor.clone()
            }
        };

        let signature = Signature::new(
            self.dependencies.iter().map(|dependency| relax(dependency.descriptor())),
            relax(&self.descriptor),
        );

        self.container.register(
            &self.descriptor,
            &self.key,
            Provider {
                dependencies: self.dependencies,
                invoke: signature.wrap(factory),
                key: self.key.clone(),
                post_processor: self.post_processor,
            },
        );
    }
}

impl fmt::Debug for Binder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("descriptor", &self.descriptor)
            .field("key", &self.key)
            .field("dependencies", &self.dependencies)
            .field("post_processor", &self.post_processor.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dep;

    #[test]
    fn with_leaves_receiver_untouched() {
        let container = Container::new();
        let text = Descriptor::string();
        let number = Descriptor::number();

        let base = container.bind(&text);
        let extended = base.with([&number]);

        assert!(base.dependencies.is_empty());
        assert_eq!(extended.dependencies.len(), 1);
    }

    #[test]
    fn with_accumulates_in_call_order() {
        let container = Container::new();
        let a = Descriptor::string();
        let b = Descriptor::number();
        let c = Descriptor::boolean();

        let binder = container.bind(&Descriptor::any()).with([&a]).with([dep(&b), dep(&c).strict(false)]);

        let order: Vec<&Descriptor> = binder.dependencies.iter().map(Dependency::descriptor).collect();
        assert_eq!(order, [&a, &b, &c]);
    }

    #[test]
    fn nothing_is_stored_before_a_finalizer() {
        let container = Container::new();
        let text = Descriptor::string();

        let binder = container.bind(&text).post_process(|value| value);
        assert!(!container.is_bound(&text, &Key::DEFAULT));

        binder.to_instance("steve");
        assert!(container.is_bound(&text, &Key::DEFAULT));
    }
}

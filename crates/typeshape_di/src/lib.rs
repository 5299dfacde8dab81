// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! A dependency injection container that validates every resolved value against its runtime shape.
//!
//! Bindings are keyed by [`Descriptor`][typeshape::Descriptor] identity, optionally refined by a
//! [`Key`]. This crate provides:
//! - [`Container`], which stores bindings and resolves them on demand, caching every instance
//! - [`Binder`], a fluent builder that declares dependencies and how instances are produced
//! - [`Dependency`] and [`dep`], for keyed dependencies with an optional fallback to the default key
//! - [`Error`], separating missing bindings from values that fail validation
//!
//! Factory inputs and outputs are validated with the descriptors they were bound with. By
//! default, object descriptors accept undeclared fields at this boundary, so a richer value
//! satisfies a narrower shape; see [`ContainerOptions::passthrough`].
//!
//! # Examples
//!
//! ```
//! use typeshape::{Descriptor, Function, Value};
//! use typeshape_di::{Container, Key, dep};
//!
//! let animal = Descriptor::object([
//!     ("legCount", Descriptor::number()),
//!     ("getNoise", Descriptor::function([] as [Descriptor; 0], Descriptor::string())),
//! ])
//! .named("Animal");
//! let owner = Descriptor::strict_object([("pet", &animal)]).named("PetOwner");
//! let sneaky_cat = Key::unique("sneaky-cat");
//!
//! let container = Container::new();
//! container.bind(&animal).to_factory(|_| {
//!     Value::object([
//!         ("legCount", Value::from(4)),
//!         ("getNoise", Function::new(|_| Value::from("woof")).into()),
//!     ])
//! });
//! container
//!     .bind(&owner)
//!     .with([dep(&animal).key(&sneaky_cat).strict(false)])
//!     .to_factory(|args| Value::object([("pet", args[0].clone())]));
//!
//! // No cat is bound, so the lenient dependency falls back to the default animal.
//! let pet = container.resolve(&owner)?.get("pet").cloned().unwrap_or_default();
//! assert_eq!(pet.call_method("getNoise", &[]).unwrap(), Value::from("woof"));
//! # Ok::<(), typeshape_di::Error>(())
//! ```
//!
//! # Logging
//!
//! The container emits `tracing` events named [`telemetry::EVENT_NAME`] with the fields listed in
//! [`telemetry`]: cache hits, factory invocations and stored instances at `DEBUG`, fallbacks to the
//! default key at `INFO`, and failed resolutions at `WARN`. Turn them off with
//! [`ContainerOptions::logging`].

mod binder;
mod container;
mod dependency;
mod error;
mod key;
mod options;
mod provider;
mod storage;
pub mod telemetry;

pub use binder::{Binder, Construct};
pub use container::Container;
pub use dependency::{Dependencies, Dependency, build_dependency, dep};
pub use error::{Error, ResolutionError, Result};
pub use key::Key;
pub use options::ContainerOptions;

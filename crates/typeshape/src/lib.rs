// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Runtime shape descriptors, dynamic values, and validated function invocation.
//!
//! This crate provides:
//! - [`Value`], a cheaply clonable dynamic value with objects, arrays, functions, and deferred values
//! - [`Descriptor`], an identity-keyed description of a shape that parses values into validated values
//! - [`ValidationError`], listing every [`Issue`] found along with its path
//! - [`Signature`], which wraps a [`Function`] so that each call validates its arguments and its
//!   return value, forwarding an explicit receiver
//!
//! # Examples
//!
//! ```
//! use typeshape::{Descriptor, Function, Value};
//!
//! let animal = Descriptor::object([
//!     ("legCount", Descriptor::number()),
//!     ("getNoise", Descriptor::function([] as [Descriptor; 0], Descriptor::string())),
//! ])
//! .named("Animal");
//!
//! let dog = Value::object([
//!     ("legCount", Value::from(4)),
//!     ("getNoise", Function::new(|_| Value::from("woof")).into()),
//! ]);
//!
//! let parsed = animal.parse(&dog).unwrap();
//! assert_eq!(parsed.call_method("getNoise", &[]).unwrap(), Value::from("woof"));
//!
//! let cat = Value::object([("legCount", Value::from("four"))]);
//! let error = animal.parse(&cat).unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     "legCount: expected number, received string; getNoise: required"
//! );
//! ```

mod deferred;
mod descriptor;
mod function;
mod issue;
mod parse;
mod signature;
mod value;

pub use deferred::Deferred;
pub use descriptor::{Descriptor, DescriptorId, ObjectShape, Shape, UnknownKeys};
pub use function::Function;
pub use issue::{Issue, IssueKind, PathSegment, ValidationError};
pub use signature::Signature;
pub use value::{Object, Value, ValueKind};

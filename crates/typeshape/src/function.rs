// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::sync::Arc;

use crate::{ValidationError, Value};

type Callable = dyn Fn(&Value, &[Value]) -> Result<Value, ValidationError> + Send + Sync;

/// A callable [`Value`].
///
/// Every call receives an explicit receiver alongside its positional arguments. Functions that
/// model methods read their object through the receiver; free functions ignore it. The receiver
/// is forwarded unchanged through validating wrappers created by [`Signature::wrap`][crate::Signature::wrap].
///
/// # Examples
///
/// ```
/// use typeshape::{Function, Value};
///
/// let greet = Function::method(|this, _args| {
///     let name = this.get("name").and_then(Value::as_str).unwrap_or("nobody");
///     Value::from(format!("My name is {name}"))
/// });
///
/// let steve = Value::object([("name", Value::from("steve"))]);
/// assert_eq!(greet.call_with(&steve, &[]).unwrap(), Value::from("My name is steve"));
/// ```
#[derive(Clone)]
pub struct Function {
    callable: Arc<Callable>,
}

impl Function {
    /// Creates a function that ignores its receiver.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::try_method(move |_, args| Ok(f(args)))
    }

    /// Creates a function that reads its receiver.
    pub fn method<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        Self::try_method(move |receiver, args| Ok(f(receiver, args)))
    }

    /// Creates a fallible function that reads its receiver.
    pub fn try_method<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, ValidationError> + Send + Sync + 'static,
    {
        Self { callable: Arc::new(f) }
    }

    /// Calls the function with a null receiver.
    ///
    /// # Errors
    ///
    /// Returns whatever error the function (or a validating wrapper around it) reports.
    pub fn call(&self, args: &[Value]) -> Result<Value, ValidationError> {
        self.call_with(&Value::Null, args)
    }

    /// Calls the function with an explicit receiver.
    ///
    /// # Errors
    ///
    /// Returns whatever error the function (or a validating wrapper around it) reports.
    pub fn call_with(&self, receiver: &Value, args: &[Value]) -> Result<Value, ValidationError> {
        (self.callable)(receiver, args)
    }

    /// Returns `true` if both handles refer to the same function.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callable, &other.callable)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<function>")
    }
}

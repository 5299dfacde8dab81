// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Arc;

use crate::{Descriptor, Function, Issue, IssueKind, PathSegment, ValidationError, Value};

/// Argument and return descriptors of a validated function.
///
/// # Examples
///
/// ```
/// use typeshape::{Descriptor, Signature, Value};
///
/// let shout = Signature::new([Descriptor::string()], Descriptor::string())
///     .implement(|_this, args| Value::from(args[0].as_str().unwrap_or_default().to_uppercase()));
///
/// assert_eq!(shout.call(&[Value::from("woof")]).unwrap(), Value::from("WOOF"));
/// assert!(shout.call(&[Value::from(4)]).is_err());
/// assert!(shout.call(&[]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Signature {
    args: Arc<[Descriptor]>,
    returns: Descriptor,
}

impl Signature {
    /// Creates a signature from argument descriptors, in position order, and a return descriptor.
    pub fn new<D>(args: impl IntoIterator<Item = D>, returns: impl Into<Descriptor>) -> Self
    where
        D: Into<Descriptor>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            returns: returns.into(),
        }
    }

    /// Argument descriptors, in position order.
    #[must_use]
    pub fn args(&self) -> &[Descriptor] {
        &self.args
    }

    /// The return value descriptor.
    #[must_use]
    pub fn returns(&self) -> &Descriptor {
        &self.returns
    }

    /// Wraps `function` so every call is validated against this signature.
    ///
    /// The wrapper forwards its receiver unchanged and passes the *parsed* arguments on.
    #[must_use]
    pub fn wrap(&self, function: Function) -> Function {
        let signature = self.clone();
        Function::try_method(move |receiver, args| signature.invoke(&function, receiver, args))
    }

    /// Wraps a closure so every call is validated against this signature.
    pub fn implement<F>(&self, f: F) -> Function
    where
        F: Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.wrap(Function::method(f))
    }

    /// Calls `function` once, validating its arguments and its return value.
    ///
    /// Arguments beyond the declared ones are forwarded without validation.
    ///
    /// # Errors
    ///
    /// Returns an [`IssueKind::ArgumentCount`] issue when fewer arguments than declared are
    /// supplied, a single [`IssueKind::InvalidArguments`] issue collecting every argument issue,
    /// an [`IssueKind::InvalidReturnType`] issue when the return value does not match, or the
    /// error reported by `function` itself.
    pub fn invoke(&self, function: &Function, receiver: &Value, args: &[Value]) -> Result<Value, ValidationError> {
        let declared = self.args.len();
        if args.len() < declared {
            return Err(Issue::new(
                Vec::new(),
                IssueKind::ArgumentCount {
                    expected: declared,
                    received: args.len(),
                },
            )
            .into());
        }

        let mut issues = Vec::new();
        let parsed: Vec<Value> = self
            .args
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (descriptor, arg))| descriptor.parse_at(arg, &[PathSegment::Index(index)], &mut issues))
            .chain(args[declared..].iter().cloned())
            .collect();

        if !issues.is_empty() {
            return Err(Issue::new(Vec::new(), IssueKind::InvalidArguments(ValidationError::new(issues))).into());
        }

        let returned = function.call_with(receiver, &parsed)?;

        self.returns
            .parse(&returned)
            .map_err(|error| Issue::new(Vec::new(), IssueKind::InvalidReturnType(error)).into())
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::{Descriptor, ValidationError, Value};

/// A [`Value`] that completes later.
///
/// A deferred value is a shared future: every clone observes the same eventual result, and the
/// underlying work runs at most once. Awaiting is always the consumer's choice; nothing in this
/// crate awaits a deferred value on its own.
///
/// # Examples
///
/// ```
/// use typeshape::{Deferred, Value};
///
/// let answer = Deferred::new(async { Value::from(42) });
/// let again = answer.clone();
///
/// assert_eq!(futures::executor::block_on(answer).unwrap(), Value::from(42));
/// assert_eq!(futures::executor::block_on(again).unwrap(), Value::from(42));
/// ```
#[derive(Clone)]
pub struct Deferred {
    inner: Shared<BoxFuture<'static, Result<Value, ValidationError>>>,
}

impl Deferred {
    /// Creates a deferred value from a future that cannot fail.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Value> + Send + 'static,
    {
        Self::try_new(future.map(Ok))
    }

    /// Creates a deferred value from a future that may fail validation.
    pub fn try_new<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, ValidationError>> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    /// Creates a deferred value that is already complete.
    #[must_use]
    pub fn ready(value: Value) -> Self {
        Self::new(futures::future::ready(value))
    }

    /// Returns the result if the value has already completed.
    #[must_use]
    pub fn peek(&self) -> Option<&Result<Value, ValidationError>> {
        self.inner.peek()
    }

    /// Returns `true` if both handles refer to the same deferred computation.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    /// Returns a deferred value that validates this value's result against `descriptor`.
    pub(crate) fn validated(&self, descriptor: Descriptor) -> Self {
        let source = self.clone();
        Self::try_new(async move {
            let value = source.await?;
            descriptor.parse(&value)
        })
    }
}

impl Future for Deferred {
    type Output = Result<Value, ValidationError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(Ok(value)) => f.debug_tuple("Deferred").field(value).finish(),
            Some(Err(_)) => f.write_str("Deferred(<failed>)"),
            None => f.write_str("Deferred(<pending>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    static_assertions::assert_impl_all!(Deferred: Send, Sync, Unpin);

    #[test]
    fn clones_observe_one_computation() {
        let runs = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&runs);
        let deferred = Deferred::new(async move {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Value::from("done")
        });

        assert_eq!(block_on(deferred.clone()).unwrap(), Value::from("done"));
        assert_eq!(block_on(deferred.clone()).unwrap(), Value::from("done"));
        assert_eq!(runs.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn validated_checks_the_eventual_value() {
        let ok = Deferred::ready(Value::from("woof")).validated(Descriptor::string());
        let bad = Deferred::ready(Value::from(4)).validated(Descriptor::string());

        assert_eq!(block_on(ok).unwrap(), Value::from("woof"));
        block_on(bad).unwrap_err();
    }

    #[test]
    fn debug_shows_completion_state() {
        let pending = Deferred::new(futures::future::pending());
        let ready = Deferred::ready(Value::from(1));
        block_on(ready.clone()).unwrap();

        assert_eq!(format!("{pending:?}"), "Deferred(<pending>)");
        assert_eq!(format!("{ready:?}"), "Deferred(1.0)");
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::sync::Arc;

use typeshape::{Function, Value};

use crate::{Dependencies, Key};

/// Transforms a freshly produced instance before it is cached.
pub(crate) type PostProcessor = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// How one `(descriptor, key)` binding produces its instance.
#[derive(Clone)]
pub(crate) struct Provider {
    pub dependencies: Dependencies,
    /// Validated factory: takes the resolved dependencies in order.
    pub invoke: Function,
    pub key: Key,
    pub post_processor: Option<PostProcessor>,
}

impl Provider {
    /// Runs the post-processor, if any.
    pub fn finish(&self, value: Value) -> Value {
        match &self.post_processor {
            Some(post_processor) => post_processor(value),
            None => value,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("dependencies", &self.dependencies)
            .field("key", &self.key)
            .field("post_processor", &self.post_processor.is_some())
            .finish_non_exhaustive()
    }
}

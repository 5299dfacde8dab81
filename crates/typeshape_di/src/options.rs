// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

pub(crate) const DEFAULT_CONTAINER_NAME: &str = "default";

/// Options for a [`Container`][crate::Container].
///
/// The [`name`][Self::name] is attached to every event the container logs, so several
/// containers in one process can be told apart.
///
/// Defaults: name `"default"`, passthrough on, logging on.
///
/// # Examples
///
/// ```
/// use typeshape_di::{Container, ContainerOptions};
///
/// let options = ContainerOptions::default().name("request_scope").logging(false);
/// let container = Container::with_options(options);
///
/// assert_eq!(container.options().get_name(), "request_scope");
/// assert!(container.options().get_passthrough());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct ContainerOptions {
    name: Cow<'static, str>,
    passthrough: bool,
    logging: bool,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed(DEFAULT_CONTAINER_NAME),
            passthrough: true,
            logging: true,
        }
    }
}

impl ContainerOptions {
    /// Sets the container name used in logs.
    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets whether object descriptors accept undeclared fields at the factory boundary.
    ///
    /// When on, a factory may return, and receive, richer objects than the bound descriptors
    /// declare; the extra fields are kept. When off, the descriptors apply as declared.
    #[must_use]
    pub fn passthrough(mut self, passthrough: bool) -> Self {
        self.passthrough = passthrough;
        self
    }

    /// Sets whether the container emits `tracing` events.
    #[must_use]
    pub fn logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    /// Gets the container name used in logs.
    #[must_use]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Gets whether undeclared object fields are kept at the factory boundary.
    #[must_use]
    pub fn get_passthrough(&self) -> bool {
        self.passthrough
    }

    /// Gets whether the container emits `tracing` events.
    #[must_use]
    pub fn get_logging(&self) -> bool {
        self.logging
    }
}

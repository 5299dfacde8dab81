// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Field names and events the container logs through `tracing`.
//!
//! Every event carries the container name, the descriptor and key being resolved, and the
//! activity. Resolution failures also carry the error.

use tracing::Level;
use typeshape::Descriptor;

use crate::{ContainerOptions, Error, Key};

/// Name of the container that emitted the event.
pub const CONTAINER_NAME: &str = "di.container";

/// The descriptor being resolved.
pub const DESCRIPTOR_NAME: &str = "di.descriptor";

/// The key being resolved.
pub const KEY_NAME: &str = "di.key";

/// What the container did.
pub const ACTIVITY_NAME: &str = "di.activity";

/// The error that ended a failed resolution.
pub const ERROR_NAME: &str = "di.error";

/// Message of every container event.
pub const EVENT_NAME: &str = "di.event";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Activity {
    CacheHit,
    Invoked,
    Stored,
    Fallback,
    Failed,
}

impl Activity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CacheHit => "di.cache_hit",
            Self::Invoked => "di.invoked",
            Self::Stored => "di.stored",
            Self::Fallback => "di.fallback",
            Self::Failed => "di.failed",
        }
    }

    pub fn level(self) -> Level {
        match self {
            Self::CacheHit | Self::Invoked | Self::Stored => Level::DEBUG,
            Self::Fallback => Level::INFO,
            Self::Failed => Level::WARN,
        }
    }
}

/// Emits one container event, unless logging is turned off in `options`.
pub(crate) fn emit(options: &ContainerOptions, descriptor: &Descriptor, key: &Key, activity: Activity, error: Option<&Error>) {
    if !options.get_logging() {
        return;
    }

    let container = options.get_name();
    let activity_name = activity.as_str();

    // Tracing level must be constant, so we use a macro to select the appropriate level.
    // Field names must match the constants above - see field_names_match_constants test.
    macro_rules! emit_event {
        ($level:ident) => {
            match error {
                Some(error) => tracing::$level!(
                    di.container = container,
                    di.descriptor = %descriptor,
                    di.key = %key,
                    di.activity = activity_name,
                    di.error = %error,
                    "di.event"
                ),
                None => tracing::$level!(
                    di.container = container,
                    di.descriptor = %descriptor,
                    di.key = %key,
                    di.activity = activity_name,
                    "di.event"
                ),
            }
        };
    }

    let level = activity.level();
    if level == Level::WARN {
        emit_event!(warn);
    } else if level == Level::INFO {
        emit_event!(info);
    } else {
        emit_event!(debug);
    }
}

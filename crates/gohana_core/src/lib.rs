//! Core bridge logic between the native host and the embedded Gohana runtime.
//! This crate is the single source of truth for relay and materializer invariants.

pub mod channel;
pub mod logging;
pub mod materialize;
pub mod relay;

pub use channel::handler::{
    ContentChannel, IntentChannel, MethodCallHandler, ARG_URI, CONTENT_CHANNEL,
    METHOD_NOTIFY_READY, METHOD_RESOLVE_HANDLE,
};
pub use channel::message::{MethodCall, MethodResponse};
pub use channel::router::{ChannelRouter, ChannelRouterError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use materialize::config::{
    ConfigError, MaterializerConfig, DEFAULT_FILE_PREFIX, DEFAULT_FILE_SUFFIX,
};
pub use materialize::error::{
    MaterializeError, MaterializeResult, ERROR_CODE_CONTENT_URI_ERROR, ERROR_CODE_NO_INPUT_STREAM,
    ERROR_CODE_NO_URI,
};
pub use materialize::handle::{HandleParseError, ResourceHandle};
pub use materialize::materializer::Materializer;
pub use materialize::resolver::{ContentResolver, FileSystemResolver, ResourceStream};
pub use relay::activation::{ActivationOutcome, ReadyOutcome, ACTION_VIEW};
pub use relay::intent_relay::{IntentRelay, Readiness, SessionId};
pub use relay::sink::{
    ChannelSink, OutboundCall, RuntimeSink, SinkError, INTENT_CHANNEL, METHOD_IMPORT_RESOURCE,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

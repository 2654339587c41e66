//! Channel-name dispatch for inbound runtime calls.

use crate::channel::handler::{ContentChannel, IntentChannel, MethodCallHandler, CONTENT_CHANNEL};
use crate::channel::message::{MethodCall, MethodResponse};
use crate::materialize::materializer::Materializer;
use crate::materialize::resolver::ContentResolver;
use crate::relay::intent_relay::IntentRelay;
use crate::relay::sink::INTENT_CHANNEL;
use log::debug;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Channel registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRouterError {
    EmptyChannelName,
    DuplicateChannel(String),
}

impl Display for ChannelRouterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyChannelName => write!(f, "channel name must not be empty"),
            Self::DuplicateChannel(name) => write!(f, "channel already registered: {name}"),
        }
    }
}

impl Error for ChannelRouterError {}

/// Routes `(channel, call)` pairs to registered handlers.
#[derive(Default)]
pub struct ChannelRouter {
    handlers: BTreeMap<String, Arc<dyn MethodCallHandler>>,
}

impl ChannelRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router wired with the intent and content channels.
    pub fn for_bridge<R: ContentResolver + 'static>(
        relay: Arc<IntentRelay>,
        materializer: Arc<Materializer<R>>,
    ) -> Self {
        let mut handlers: BTreeMap<String, Arc<dyn MethodCallHandler>> = BTreeMap::new();
        handlers.insert(
            INTENT_CHANNEL.to_string(),
            Arc::new(IntentChannel::new(relay)),
        );
        handlers.insert(
            CONTENT_CHANNEL.to_string(),
            Arc::new(ContentChannel::new(materializer)),
        );
        Self { handlers }
    }

    /// Registers one handler under a channel name.
    pub fn register(
        &mut self,
        channel: &str,
        handler: Arc<dyn MethodCallHandler>,
    ) -> Result<(), ChannelRouterError> {
        let channel = channel.trim();
        if channel.is_empty() {
            return Err(ChannelRouterError::EmptyChannelName);
        }
        if self.handlers.contains_key(channel) {
            return Err(ChannelRouterError::DuplicateChannel(channel.to_string()));
        }
        self.handlers.insert(channel.to_string(), handler);
        Ok(())
    }

    /// Returns sorted channel names.
    pub fn channels(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Dispatches one call. Unknown channels answer `NotImplemented`.
    pub fn dispatch(&self, channel: &str, call: &MethodCall) -> MethodResponse {
        match self.handlers.get(channel) {
            Some(handler) => handler.handle(call),
            None => {
                debug!(
                    "event=channel_call module=channel status=unknown_channel channel={} method={}",
                    channel, call.method
                );
                MethodResponse::NotImplemented
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelRouter, ChannelRouterError};
    use crate::channel::handler::{MethodCallHandler, CONTENT_CHANNEL};
    use crate::channel::message::{MethodCall, MethodResponse};
    use crate::materialize::config::MaterializerConfig;
    use crate::materialize::materializer::Materializer;
    use crate::materialize::resolver::FileSystemResolver;
    use crate::relay::intent_relay::IntentRelay;
    use crate::relay::sink::INTENT_CHANNEL;
    use std::sync::Arc;

    struct EchoHandler;

    impl MethodCallHandler for EchoHandler {
        fn handle(&self, call: &MethodCall) -> MethodResponse {
            MethodResponse::success(call.method.clone())
        }
    }

    #[test]
    fn bridge_router_exposes_both_channels() {
        let dir = tempfile::tempdir().expect("tempdir");
        let materializer = Materializer::new(
            MaterializerConfig::new(dir.path()).expect("config"),
            FileSystemResolver::new(),
        );
        let router =
            ChannelRouter::for_bridge(Arc::new(IntentRelay::new()), Arc::new(materializer));
        assert_eq!(
            router.channels(),
            vec![CONTENT_CHANNEL.to_string(), INTENT_CHANNEL.to_string()]
        );
    }

    #[test]
    fn unknown_channel_is_not_implemented() {
        let router = ChannelRouter::new();
        assert_eq!(
            router.dispatch("gohana/unknown", &MethodCall::new("ping")),
            MethodResponse::NotImplemented
        );
    }

    #[test]
    fn register_rejects_blank_and_duplicate_names() {
        let mut router = ChannelRouter::new();
        assert_eq!(
            router.register("  ", Arc::new(EchoHandler)),
            Err(ChannelRouterError::EmptyChannelName)
        );
        router
            .register("test/echo", Arc::new(EchoHandler))
            .expect("first registration");
        assert_eq!(
            router.register(" test/echo ", Arc::new(EchoHandler)),
            Err(ChannelRouterError::DuplicateChannel("test/echo".to_string()))
        );
        assert_eq!(
            router.dispatch("test/echo", &MethodCall::new("hello")),
            MethodResponse::success("hello")
        );
    }
}

//! Inbound handlers for the intent and content channels.

use crate::channel::message::{MethodCall, MethodResponse};
use crate::materialize::materializer::Materializer;
use crate::materialize::resolver::ContentResolver;
use crate::relay::intent_relay::IntentRelay;
use log::debug;
use std::sync::Arc;

/// Channel name for content handle resolution.
pub const CONTENT_CHANNEL: &str = "gohana/content_uri";
/// Runtime -> host readiness handshake on the intent channel.
pub const METHOD_NOTIFY_READY: &str = "flutterReady";
/// Runtime -> host handle resolution on the content channel.
pub const METHOD_RESOLVE_HANDLE: &str = "getFileFromContentUri";
/// Argument carrying the handle string.
pub const ARG_URI: &str = "uri";

/// Receive-and-respond endpoint for one channel.
pub trait MethodCallHandler: Send + Sync {
    fn handle(&self, call: &MethodCall) -> MethodResponse;
}

/// Intent channel: accepts the runtime's readiness handshake.
pub struct IntentChannel {
    relay: Arc<IntentRelay>,
}

impl IntentChannel {
    pub fn new(relay: Arc<IntentRelay>) -> Self {
        Self { relay }
    }
}

impl MethodCallHandler for IntentChannel {
    fn handle(&self, call: &MethodCall) -> MethodResponse {
        if call.method != METHOD_NOTIFY_READY {
            debug!(
                "event=channel_call module=channel status=not_implemented channel=intent method={}",
                call.method
            );
            return MethodResponse::NotImplemented;
        }
        let outcome = self.relay.on_runtime_ready();
        debug!(
            "event=channel_call module=channel status=ok channel=intent outcome={}",
            outcome.as_str()
        );
        MethodResponse::empty_success()
    }
}

/// Content channel: resolves handles into local file paths.
pub struct ContentChannel<R: ContentResolver> {
    materializer: Arc<Materializer<R>>,
}

impl<R: ContentResolver> ContentChannel<R> {
    pub fn new(materializer: Arc<Materializer<R>>) -> Self {
        Self { materializer }
    }
}

impl<R: ContentResolver> MethodCallHandler for ContentChannel<R> {
    fn handle(&self, call: &MethodCall) -> MethodResponse {
        if call.method != METHOD_RESOLVE_HANDLE {
            debug!(
                "event=channel_call module=channel status=not_implemented channel=content method={}",
                call.method
            );
            return MethodResponse::NotImplemented;
        }
        match self.materializer.materialize(call.argument(ARG_URI)) {
            Ok(path) => MethodResponse::success(path.to_string_lossy()),
            Err(err) => MethodResponse::error(err.code(), err.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ContentChannel, IntentChannel, MethodCallHandler, ARG_URI, METHOD_NOTIFY_READY,
        METHOD_RESOLVE_HANDLE,
    };
    use crate::channel::message::{MethodCall, MethodResponse};
    use crate::materialize::config::MaterializerConfig;
    use crate::materialize::materializer::Materializer;
    use crate::materialize::resolver::FileSystemResolver;
    use crate::relay::intent_relay::IntentRelay;
    use std::sync::Arc;

    fn content_channel(dir: &std::path::Path) -> ContentChannel<FileSystemResolver> {
        let config = MaterializerConfig::new(dir).expect("config");
        ContentChannel::new(Arc::new(Materializer::new(config, FileSystemResolver::new())))
    }

    #[test]
    fn intent_channel_marks_relay_ready() {
        let relay = Arc::new(IntentRelay::new());
        let channel = IntentChannel::new(Arc::clone(&relay));

        let response = channel.handle(&MethodCall::new(METHOD_NOTIFY_READY));
        assert_eq!(response, MethodResponse::empty_success());
        assert!(relay.is_ready());
    }

    #[test]
    fn intent_channel_rejects_unknown_method() {
        let relay = Arc::new(IntentRelay::new());
        let channel = IntentChannel::new(Arc::clone(&relay));

        let response = channel.handle(&MethodCall::new("importGohanaFile"));
        assert_eq!(response, MethodResponse::NotImplemented);
        assert!(!relay.is_ready());
    }

    #[test]
    fn content_channel_reports_missing_uri_argument() {
        let dir = tempfile::tempdir().expect("tempdir");
        let response = content_channel(dir.path()).handle(&MethodCall::new(METHOD_RESOLVE_HANDLE));
        assert_eq!(
            response,
            MethodResponse::error("NO_URI", "No URI provided")
        );
    }

    #[test]
    fn content_channel_reports_unresolvable_handle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let call = MethodCall::new(METHOD_RESOLVE_HANDLE)
            .with_argument(ARG_URI, "content://provider/doc/404");
        let response = content_channel(dir.path()).handle(&call);
        assert_eq!(
            response,
            MethodResponse::error("NO_INPUT_STREAM", "Cannot open input stream for URI")
        );
    }

    #[test]
    fn content_channel_rejects_unknown_method() {
        let dir = tempfile::tempdir().expect("tempdir");
        let response = content_channel(dir.path()).handle(&MethodCall::new("deleteFile"));
        assert_eq!(response, MethodResponse::NotImplemented);
    }
}

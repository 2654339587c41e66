use gohana_core::{
    ActivationOutcome, ChannelRouter, ChannelSink, FileSystemResolver, IntentRelay, MethodCall,
    Materializer, MaterializerConfig, MethodResponse, OutboundCall, ReadyOutcome, ACTION_VIEW,
    ARG_URI, CONTENT_CHANNEL, INTENT_CHANNEL, METHOD_NOTIFY_READY, METHOD_RESOLVE_HANDLE,
};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

fn imports(rx: &Receiver<OutboundCall>) -> Vec<String> {
    rx.try_iter()
        .map(|call| match call {
            OutboundCall::ImportResource { resource_ref } => resource_ref,
        })
        .collect()
}

fn bridge(cache_dir: &std::path::Path) -> (Arc<IntentRelay>, ChannelRouter) {
    let relay = Arc::new(IntentRelay::new());
    let materializer = Materializer::new(
        MaterializerConfig::new(cache_dir).unwrap(),
        FileSystemResolver::new(),
    );
    let router = ChannelRouter::for_bridge(Arc::clone(&relay), Arc::new(materializer));
    (relay, router)
}

#[test]
fn cold_start_activation_is_delivered_after_ready_handshake() {
    let dir = tempfile::tempdir().unwrap();
    let (relay, router) = bridge(dir.path());

    // Activation lands before the runtime exists.
    assert_eq!(
        relay.on_activation(ACTION_VIEW, Some("content://downloads/doc/7")),
        ActivationOutcome::Buffered { replaced: false }
    );

    let (tx, rx) = mpsc::channel();
    relay.attach_runtime(Arc::new(ChannelSink::new(tx)));
    assert!(imports(&rx).is_empty());

    let response = router.dispatch(INTENT_CHANNEL, &MethodCall::new(METHOD_NOTIFY_READY));
    assert!(response.is_success());
    assert_eq!(imports(&rx), vec!["content://downloads/doc/7".to_string()]);
    assert!(relay.pending_import().is_none());
}

#[test]
fn only_latest_activation_survives_until_ready() {
    let dir = tempfile::tempdir().unwrap();
    let (relay, router) = bridge(dir.path());
    let (tx, rx) = mpsc::channel();
    relay.attach_runtime(Arc::new(ChannelSink::new(tx)));

    for index in 0..5 {
        let value = format!("content://downloads/doc/{index}");
        relay.on_activation(ACTION_VIEW, Some(value.as_str()));
    }
    router.dispatch(INTENT_CHANNEL, &MethodCall::new(METHOD_NOTIFY_READY));
    router.dispatch(INTENT_CHANNEL, &MethodCall::new(METHOD_NOTIFY_READY));

    assert_eq!(imports(&rx), vec!["content://downloads/doc/4".to_string()]);
}

#[test]
fn warm_activations_are_forwarded_one_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let (relay, _router) = bridge(dir.path());
    let (tx, rx) = mpsc::channel();
    relay.attach_runtime(Arc::new(ChannelSink::new(tx)));
    assert_eq!(relay.on_runtime_ready(), ReadyOutcome::Ready);

    let refs = ["content://a/1", "content://a/2", "content://a/3"];
    for value in refs {
        assert_eq!(
            relay.on_activation(ACTION_VIEW, Some(value)),
            ActivationOutcome::Forwarded
        );
    }
    assert_eq!(imports(&rx), refs.map(String::from).to_vec());
}

#[test]
fn torn_down_runtime_drops_forwarded_import_silently() {
    let dir = tempfile::tempdir().unwrap();
    let (relay, _router) = bridge(dir.path());
    let (tx, rx) = mpsc::channel();
    relay.attach_runtime(Arc::new(ChannelSink::new(tx)));
    relay.on_runtime_ready();
    drop(rx);

    assert_eq!(
        relay.on_activation(ACTION_VIEW, Some("content://a/1")),
        ActivationOutcome::Dropped
    );
    assert!(relay.pending_import().is_none());
}

#[test]
fn content_channel_round_trip_resolves_file_handle() {
    let source_dir = tempfile::tempdir().unwrap();
    let cache_dir = tempfile::tempdir().unwrap();
    let source = source_dir.path().join("shared.gohana");
    std::fs::write(&source, b"gohana").unwrap();
    let (_relay, router) = bridge(cache_dir.path());

    let call = MethodCall::new(METHOD_RESOLVE_HANDLE).with_argument(
        ARG_URI,
        url::Url::from_file_path(&source).unwrap().as_str(),
    );
    let MethodResponse::Success { value: Some(path) } = router.dispatch(CONTENT_CHANNEL, &call)
    else {
        panic!("resolution should succeed");
    };
    assert_eq!(std::fs::read(path).unwrap(), b"gohana");

    assert_eq!(
        router.dispatch(CONTENT_CHANNEL, &MethodCall::new("listFiles")),
        MethodResponse::NotImplemented
    );
}

//! FFI bridge API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the intent relay and content resolution to Dart via FRB.
//! - Own the process-wide relay, materializer and runtime inbox.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One relay per process; each attached runtime gets a fresh inbox.
//! - Materialized files always land under the resolved cache directory.

use gohana_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, ChannelRouter, ChannelSink, FileSystemResolver, IntentRelay, Materializer,
    MaterializerConfig, MethodCall, MethodResponse, OutboundCall, ARG_URI,
    ERROR_CODE_CONTENT_URI_ERROR,
};
use log::warn;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

const CACHE_DIR_ENV: &str = "GOHANA_CACHE_DIR";
const DEFAULT_CACHE_SUBDIR: &str = "gohana_cache";

static CACHE_DIR: OnceLock<PathBuf> = OnceLock::new();
static RELAY: OnceLock<Arc<IntentRelay>> = OnceLock::new();
static MATERIALIZER: OnceLock<Arc<Materializer<FileSystemResolver>>> = OnceLock::new();
static ROUTER: OnceLock<ChannelRouter> = OnceLock::new();
static RUNTIME_INBOX: Mutex<Option<Receiver<OutboundCall>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes bridge logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); blank
///   selects the build-mode default (`debug` or `info`).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match level.trim() {
        "" => default_log_level(),
        value => value,
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the cache directory used for materialized files.
///
/// Must be called before the first content resolution to take effect;
/// otherwise `GOHANA_CACHE_DIR` or the system temp dir is used.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Idempotent for the same directory; a different directory is rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn bridge_init(cache_dir: String) -> String {
    let config = match MaterializerConfig::new(cache_dir.trim()) {
        Ok(config) => config,
        Err(err) => return err.to_string(),
    };
    let active = CACHE_DIR.get_or_init(|| config.cache_dir.clone());
    if *active == config.cache_dir {
        String::new()
    } else {
        format!(
            "cache_dir already initialized at `{}`; refusing to switch to `{}`",
            active.display(),
            config.cache_dir.display()
        )
    }
}

/// Content resolution response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentResolveResponse {
    /// Whether a local file was produced.
    pub ok: bool,
    /// Absolute path of the materialized file on success.
    pub path: Option<String>,
    /// `NO_URI|NO_INPUT_STREAM|CONTENT_URI_ERROR` on failure.
    pub error_code: Option<String>,
    /// Human-readable diagnostic; empty on success.
    pub message: String,
}

impl ContentResolveResponse {
    fn success(path: String) -> Self {
        Self {
            ok: true,
            path: Some(path),
            error_code: None,
            message: String::new(),
        }
    }

    fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            path: None,
            error_code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Generic channel response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelResponse {
    /// `success|error|not_implemented`.
    pub status: String,
    /// Success payload, when the method returns one.
    pub value: Option<String>,
    /// Error code when `status == "error"`.
    pub error_code: Option<String>,
    /// Error message when `status == "error"`.
    pub message: String,
}

impl From<MethodResponse> for ChannelResponse {
    fn from(value: MethodResponse) -> Self {
        match value {
            MethodResponse::Success { value } => Self {
                status: "success".to_string(),
                value,
                error_code: None,
                message: String::new(),
            },
            MethodResponse::Error { code, message } => Self {
                status: "error".to_string(),
                value: None,
                error_code: Some(code),
                message,
            },
            MethodResponse::NotImplemented => Self {
                status: "not_implemented".to_string(),
                value: None,
                error_code: None,
                message: String::new(),
            },
        }
    }
}

/// Delivers one host activation (action tag + optional resource reference).
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; returns the relay outcome label
///   (`ignored|forwarded|dropped|buffered|buffered_replaced`).
#[flutter_rust_bridge::frb(sync)]
pub fn intent_on_activation(action: String, resource_ref: Option<String>) -> String {
    relay()
        .on_activation(action.as_str(), resource_ref.as_deref())
        .as_str()
        .to_string()
}

/// Registers a new runtime instance and opens its import inbox.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Replaces any previous inbox; undrained imports of the old runtime are discarded.
/// - Returns the new session id.
#[flutter_rust_bridge::frb(sync)]
pub fn intent_attach_runtime() -> String {
    let (tx, rx) = mpsc::channel();
    let mut inbox = RUNTIME_INBOX.lock().unwrap_or_else(PoisonError::into_inner);
    let session_id = relay().attach_runtime(Arc::new(ChannelSink::new(tx)));
    *inbox = Some(rx);
    session_id.to_string()
}

/// Tears down the current runtime instance.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Later activations are buffered until a new runtime attaches and signals ready.
#[flutter_rust_bridge::frb(sync)]
pub fn intent_detach_runtime() {
    let mut inbox = RUNTIME_INBOX.lock().unwrap_or_else(PoisonError::into_inner);
    relay().detach_runtime();
    *inbox = None;
}

/// Runtime readiness handshake.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Repeated calls never re-deliver an import.
/// - Returns the outcome label
///   (`ready|delivered_pending|dropped_pending|ready_without_runtime|already_ready`).
#[flutter_rust_bridge::frb(sync)]
pub fn intent_notify_ready() -> String {
    relay().on_runtime_ready().as_str().to_string()
}

/// Drains imports forwarded to the attached runtime, oldest first.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Each forwarded reference is returned exactly once.
/// - Returns an empty list when no runtime is attached.
#[flutter_rust_bridge::frb(sync)]
pub fn intent_take_imports() -> Vec<String> {
    let inbox = RUNTIME_INBOX.lock().unwrap_or_else(PoisonError::into_inner);
    let Some(rx) = inbox.as_ref() else {
        return Vec::new();
    };
    rx.try_iter()
        .map(|call| match call {
            OutboundCall::ImportResource { resource_ref } => resource_ref,
        })
        .collect()
}

/// Copies the content behind `uri` into a new local file.
///
/// # FFI contract
/// - Async call; the blocking copy runs on the FRB worker pool.
/// - Never panics; every failure maps to `NO_URI|NO_INPUT_STREAM|CONTENT_URI_ERROR`.
pub fn content_resolve_handle(uri: Option<String>) -> ContentResolveResponse {
    let materializer = match materializer() {
        Ok(materializer) => materializer,
        Err(err) => return ContentResolveResponse::failure(ERROR_CODE_CONTENT_URI_ERROR, err),
    };
    match materializer.materialize(uri.as_deref()) {
        Ok(path) => ContentResolveResponse::success(path.to_string_lossy().into_owned()),
        Err(err) => ContentResolveResponse::failure(err.code(), err.message()),
    }
}

/// Invokes one method on a named channel (`gohana/intent`, `gohana/content_uri`).
///
/// # FFI contract
/// - Async call; content resolution blocks an FRB worker for the copy.
/// - Unknown channels or methods answer `not_implemented`.
/// - Never panics.
pub fn channel_invoke(channel: String, method: String, uri: Option<String>) -> ChannelResponse {
    let router = match router() {
        Ok(router) => router,
        Err(err) => {
            return MethodResponse::error(ERROR_CODE_CONTENT_URI_ERROR, err).into();
        }
    };
    let mut call = MethodCall::new(method);
    if let Some(uri) = uri {
        call = call.with_argument(ARG_URI, uri);
    }
    router.dispatch(channel.trim(), &call).into()
}

fn relay() -> &'static Arc<IntentRelay> {
    RELAY.get_or_init(|| Arc::new(IntentRelay::new()))
}

fn resolve_cache_dir() -> PathBuf {
    CACHE_DIR.get_or_init(cache_dir_from_env).clone()
}

// Only a validated env value is pinned; anything else falls back to the temp dir.
fn cache_dir_from_env() -> PathBuf {
    let fallback = std::env::temp_dir().join(DEFAULT_CACHE_SUBDIR);
    let Ok(raw) = std::env::var(CACHE_DIR_ENV) else {
        return fallback;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return fallback;
    }
    match MaterializerConfig::new(trimmed) {
        Ok(config) => config.cache_dir,
        Err(err) => {
            warn!(
                "event=cache_dir_resolve module=ffi status=fallback source=env error={}",
                err
            );
            fallback
        }
    }
}

fn materializer() -> Result<&'static Arc<Materializer<FileSystemResolver>>, String> {
    if let Some(materializer) = MATERIALIZER.get() {
        return Ok(materializer);
    }
    let cache_dir = resolve_cache_dir();
    let config = MaterializerConfig::new(&cache_dir).map_err(|err| {
        warn!(
            "event=bridge_init module=ffi status=error error_code=config_invalid error={}",
            err
        );
        format!("content bridge unavailable: {err}")
    })?;
    Ok(MATERIALIZER.get_or_init(|| Arc::new(Materializer::new(config, FileSystemResolver::new()))))
}

fn router() -> Result<&'static ChannelRouter, String> {
    if let Some(router) = ROUTER.get() {
        return Ok(router);
    }
    let materializer = materializer()?;
    Ok(ROUTER.get_or_init(|| {
        ChannelRouter::for_bridge(Arc::clone(relay()), Arc::clone(materializer))
    }))
}

//! Named method-call channels between host and runtime.
//!
//! Runtime -> host calls arrive as `MethodCall`s on a named channel and are
//! answered with a `MethodResponse`. Unknown channels and methods are answered
//! with `NotImplemented` rather than an error.

pub mod handler;
pub mod message;
pub mod router;

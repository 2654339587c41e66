//! Resource materialization: opaque content handles into local temp files.
//!
//! # Responsibility
//! - Parse handle strings into `ResourceHandle`.
//! - Open a byte stream through a `ContentResolver` and copy it into a
//!   uniquely named file under the cache directory.
//!
//! # Invariants
//! - Missing handles fail with `NO_URI` before any resolver call.
//! - Failed calls never return a path and leave no file behind.
//! - Calls share no mutable state; only the filesystem namespace.

pub mod config;
pub mod error;
pub mod handle;
pub mod materializer;
pub mod resolver;

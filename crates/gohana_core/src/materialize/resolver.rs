//! Content resolution service contracts.
//!
//! # Responsibility
//! - Abstract the platform service that turns a handle into a byte stream.
//! - Provide a local-filesystem resolver for `file://` handles.
//!
//! # Invariants
//! - `Ok(None)` means "no stream for this handle" and is reported as `NO_INPUT_STREAM`.
//! - `Err(_)` means the service failed while opening and is reported as `CONTENT_URI_ERROR`.

use crate::materialize::handle::ResourceHandle;
use std::fs::File;
use std::io::{self, ErrorKind, Read};

/// Byte stream returned by a resolver. Dropping it releases the stream.
pub type ResourceStream = Box<dyn Read + Send>;

/// Platform content-resolution service.
pub trait ContentResolver: Send + Sync {
    fn open(&self, handle: &ResourceHandle) -> io::Result<Option<ResourceStream>>;
}

/// Resolver serving `file://` handles from the local filesystem.
///
/// Handles with any other scheme, or pointing at a missing file, have no stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemResolver;

impl FileSystemResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ContentResolver for FileSystemResolver {
    fn open(&self, handle: &ResourceHandle) -> io::Result<Option<ResourceStream>> {
        if handle.scheme() != "file" {
            return Ok(None);
        }
        let Ok(path) = handle.url().to_file_path() else {
            return Ok(None);
        };
        if path.is_dir() {
            return Ok(None);
        }
        match File::open(&path) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }
}

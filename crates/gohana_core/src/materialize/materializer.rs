//! Blocking handle-to-file copy.
//!
//! # Responsibility
//! - Turn one handle string into one new file under the cache directory.
//! - Translate every failure into a `MaterializeError` wire code.
//!
//! # Invariants
//! - Stream and file handles are released on every exit path (RAII).
//! - The temp file is only persisted after the full copy and sync succeed;
//!   on failure it is removed when dropped.
//! - Names come from exclusive creation, so concurrent calls never collide.

use crate::logging::describe_resource_ref;
use crate::materialize::config::MaterializerConfig;
use crate::materialize::error::{MaterializeError, MaterializeResult};
use crate::materialize::handle::ResourceHandle;
use crate::materialize::resolver::{ContentResolver, ResourceStream};
use log::{error, info, warn};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tempfile::Builder;

/// Converts opaque resource handles into local files.
pub struct Materializer<R: ContentResolver> {
    config: MaterializerConfig,
    resolver: R,
}

impl<R: ContentResolver> Materializer<R> {
    pub fn new(config: MaterializerConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &MaterializerConfig {
        &self.config
    }

    /// Copies the content behind `handle` into a new temp file.
    ///
    /// Blocks for the whole copy. Returns the absolute path of the new file.
    ///
    /// # Errors
    /// - `NoUri` when `handle` is absent or blank; the resolver is not called.
    /// - `NoInputStream` when the handle does not parse or has no stream.
    /// - `ContentUriError` for I/O failures while opening, copying or closing.
    pub fn materialize(&self, handle: Option<&str>) -> MaterializeResult<PathBuf> {
        let started_at = Instant::now();
        let Some(raw) = handle.map(str::trim).filter(|value| !value.is_empty()) else {
            warn!("event=materialize module=materialize status=error error_code=NO_URI");
            return Err(MaterializeError::NoUri);
        };
        let described = describe_resource_ref(raw);
        info!(
            "event=materialize module=materialize status=start {}",
            described
        );

        match self.materialize_handle(raw) {
            Ok((path, bytes)) => {
                info!(
                    "event=materialize module=materialize status=ok {} bytes={} duration_ms={}",
                    described,
                    bytes,
                    started_at.elapsed().as_millis()
                );
                Ok(path)
            }
            Err(err) => {
                error!(
                    "event=materialize module=materialize status=error {} duration_ms={} error_code={} error={}",
                    described,
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err.message()
                );
                Err(err)
            }
        }
    }

    fn materialize_handle(&self, raw: &str) -> MaterializeResult<(PathBuf, u64)> {
        let handle = ResourceHandle::parse(raw).map_err(|_| MaterializeError::NoInputStream)?;
        let stream = self
            .resolver
            .open(&handle)?
            .ok_or(MaterializeError::NoInputStream)?;
        self.copy_to_temp_file(stream).map_err(MaterializeError::from)
    }

    fn copy_to_temp_file(&self, mut stream: ResourceStream) -> io::Result<(PathBuf, u64)> {
        std::fs::create_dir_all(&self.config.cache_dir)?;
        let mut temp = Builder::new()
            .prefix(&self.config.file_prefix)
            .suffix(&self.config.file_suffix)
            .tempfile_in(&self.config.cache_dir)?;

        let bytes = io::copy(&mut stream, temp.as_file_mut())?;
        drop(stream);
        temp.as_file().sync_all()?;

        let (file, path) = temp.keep().map_err(|err| err.error)?;
        drop(file);
        Ok((path, bytes))
    }
}

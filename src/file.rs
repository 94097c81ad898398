use std::path::PathBuf;

use async_std::task;

use crate::{options::ReadOptions, LineIndexedBuffer, Result};

/// Open and index the file at `path` on async-std's blocking thread pool, so reading a big or slow
/// file doesn't stall the executor.
///
/// Returns an error if the file can't be read or is empty
#[inline]
pub async fn open_async<P: Into<PathBuf>>(path: P) -> Result<LineIndexedBuffer> {
    open_async_with(path, ReadOptions::default()).await
}

/// Same as `open_async` but with custom `options`
pub async fn open_async_with<P: Into<PathBuf>>(
    path: P,
    options: ReadOptions,
) -> Result<LineIndexedBuffer> {
    let path = path.into();
    task::spawn_blocking(move || LineIndexedBuffer::open_with(path, options)).await
}

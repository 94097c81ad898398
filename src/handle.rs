//! Every function in here accepts an absent buffer (`None`). Instead of failing hard they report
//! the condition through `tracing` and return an empty result: `None` or `0`.

use std::path::Path;

use tracing::warn;

use crate::{buffer::TerminatedBytes, error::Error, Indexable, LineIndexedBuffer};

/// Opens and indexes the file at `path`. Returns `None` if `path` is absent or the file can't be
/// read, including empty files.
pub fn open(path: Option<&Path>) -> Option<LineIndexedBuffer> {
    let path = match path {
        Some(path) => path,
        None => {
            warn!(error = %Error::InvalidArgument("path"), "can't open buffer");
            return None;
        }
    };

    match LineIndexedBuffer::open(path) {
        Ok(buffer) => Some(buffer),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "can't open buffer");
            None
        }
    }
}

/// Releases `buffer`
pub fn close(buffer: Option<LineIndexedBuffer>) {
    match buffer {
        Some(buffer) => buffer.close(),
        None => warn!(error = %Error::InvalidArgument("buffer"), "can't close buffer"),
    }
}

/// Size of the buffers content in bytes. 0 for an absent buffer.
pub fn file_size(buffer: Option<&LineIndexedBuffer>) -> usize {
    present(buffer, "file_size").map_or(0, |buffer| buffer.size())
}

/// Amount of lines in the buffer. 0 for an absent buffer.
pub fn line_count(buffer: Option<&LineIndexedBuffer>) -> usize {
    present(buffer, "line_count").map_or(0, |buffer| buffer.total_lines())
}

/// Borrows the whole content of the buffer
pub fn buffer(buffer: Option<&LineIndexedBuffer>) -> Option<&[u8]> {
    present(buffer, "buffer").map(|buffer| buffer.as_bytes())
}

/// Copies the whole content of the buffer. Release the copy with `release_copy`.
pub fn copy_buffer(buffer: Option<&LineIndexedBuffer>) -> Option<TerminatedBytes> {
    let buffer = present(buffer, "copy_buffer")?;

    match buffer.copy_buffer() {
        Ok(copy) => Some(copy),
        Err(err) => {
            warn!(source = %buffer.source(), error = %err, "can't copy buffer");
            None
        }
    }
}

pub fn release_copy(copy: Option<TerminatedBytes>) {
    if copy.is_none() {
        warn!(error = %Error::InvalidArgument("copy"), "can't release copy");
    }
}

/// Copies the given 1-based `line`. Returns `None` for lines out of range and for empty lines.
/// Release the copy with `release_line_copy`.
pub fn get_line(buffer: Option<&LineIndexedBuffer>, line: usize) -> Option<TerminatedBytes> {
    let buffer = present(buffer, "get_line")?;

    match buffer.get_line(line) {
        Ok(copy) => Some(copy),
        Err(err) => {
            warn!(source = %buffer.source(), line, error = %err, "can't copy line");
            None
        }
    }
}

/// Releases a line copy. Absent copies are fine since empty lines are absent too.
pub fn release_line_copy(copy: Option<TerminatedBytes>) {
    drop(copy);
}

#[inline]
fn present<'a>(
    buffer: Option<&'a LineIndexedBuffer>,
    operation: &'static str,
) -> Option<&'a LineIndexedBuffer> {
    if buffer.is_none() {
        warn!(operation, error = %Error::InvalidArgument("buffer"), "no buffer given");
    }
    buffer
}

use std::{
    convert::TryFrom,
    io::{self, Read},
};

use tracing::{debug, warn};

use crate::{
    buffer::{alloc_zeroed, SENTINEL},
    error::Error,
    options::ReadOptions,
    source::{classify, Source, SourceKind},
    Result,
};

/// Outcome of filling a buffer from a reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Filled {
    read: usize,
    /// The reader signaled end of data before the buffer was full
    eof: bool,
}

/// Reads the whole `source` into memory. The returned buffer holds the content followed by
/// `SENTINEL`.
pub(crate) fn read_source<S: Source + ?Sized>(
    source: &S,
    options: &ReadOptions,
) -> Result<Vec<u8>> {
    match classify(source) {
        SourceKind::Normal => read_normal(source, options),
        SourceKind::Virtual => read_virtual(source, options),
    }
}

/// Reads exactly as many bytes as the source reports to have. Short reads and read errors are
/// retried by reopening the source.
pub(crate) fn read_normal<S: Source + ?Sized>(
    source: &S,
    options: &ReadOptions,
) -> Result<Vec<u8>> {
    let size = source.reported_size()?;
    if size == 0 {
        return Err(Error::EmptySource);
    }

    let size = usize::try_from(size).map_err(|_| Error::AllocationFailure)?;
    let mut buffer = alloc_zeroed(size.checked_add(1).ok_or(Error::AllocationFailure)?)?;

    for attempt in 1..=options.max_attempts {
        let mut reader = source.open()?;

        match fill(&mut reader, &mut buffer[..size]) {
            Ok(filled) if filled.read == size => {
                buffer[size] = SENTINEL;
                return Ok(buffer);
            }
            Ok(filled) => {
                warn!(
                    source = %source.identifier(),
                    attempt,
                    expected = size,
                    read = filled.read,
                    "short read"
                );
            }
            Err(err) => {
                warn!(source = %source.identifier(), attempt, error = %err, "read failed");
            }
        }
    }

    Err(Error::ReadExhausted {
        attempts: options.max_attempts,
    })
}

/// Reads a source of unknown size. Every attempt starts over from the beginning since virtual
/// files can't be resumed reliably. The buffer gets doubled until the whole source fits in.
pub(crate) fn read_virtual<S: Source + ?Sized>(
    source: &S,
    options: &ReadOptions,
) -> Result<Vec<u8>> {
    let mut capacity = options.initial_capacity;
    let mut buffer = alloc_zeroed(capacity)?;
    let mut failed_attempts = 0;

    let read = loop {
        let mut reader = source.open()?;

        let filled = match fill(&mut reader, &mut buffer) {
            Ok(filled) => filled,
            Err(err) => {
                failed_attempts += 1;
                warn!(
                    source = %source.identifier(),
                    attempt = failed_attempts,
                    error = %err,
                    "read failed"
                );

                if failed_attempts >= options.max_attempts {
                    return Err(Error::ReadExhausted {
                        attempts: failed_attempts,
                    });
                }
                continue;
            }
        };

        if filled.read < capacity && filled.eof {
            break filled.read;
        }

        debug!(source = %source.identifier(), capacity, "buffer too small, doubling its size");
        capacity = capacity.checked_mul(2).ok_or(Error::AllocationFailure)?;

        // Release the old buffer first, its content gets read again anyway
        buffer.clear();
        buffer.shrink_to_fit();
        buffer = alloc_zeroed(capacity)?;
    };

    if read == 0 {
        return Err(Error::EmptySource);
    }

    let mut content = alloc_zeroed(read + 1)?;
    content[..read].copy_from_slice(&buffer[..read]);
    content[read] = SENTINEL;
    Ok(content)
}

/// Reads from `reader` until `buf` is full or the reader has no more data.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<Filled> {
    let mut read = 0;

    while read < buf.len() {
        match reader.read(&mut buf[read..]) {
            Ok(0) => return Ok(Filled { read, eof: true }),
            Ok(n) => read += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => (),
            Err(err) => return Err(err),
        }
    }

    Ok(Filled { read, eof: false })
}

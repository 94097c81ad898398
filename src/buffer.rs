use std::{ops::Deref, path::Path};

use tracing::{debug, trace};

use crate::{
    acquire,
    error::Error,
    index::Index,
    options::ReadOptions,
    source::{FsSource, Source},
    Indexable, Result,
};

/// Terminates every buffer handed out by this crate. Not counted in any length.
pub const SENTINEL: u8 = 0;

/// A file read entirely into memory together with the offsets of all its lines.
#[derive(Debug)]
pub struct LineIndexedBuffer {
    /// Where the content was read from, kept for diagnostics
    source: String,
    /// The content followed by `SENTINEL`
    content: Vec<u8>,
    index: Index,
}

impl LineIndexedBuffer {
    /// Reads and indexes the file at `path`.
    ///
    /// Returns an error if the file can't be read or is empty
    #[inline]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<LineIndexedBuffer> {
        Self::open_with(path, ReadOptions::default())
    }

    /// Same as `open` but with custom `options`
    #[inline]
    pub fn open_with<P: AsRef<Path>>(path: P, options: ReadOptions) -> Result<LineIndexedBuffer> {
        Self::from_source(&FsSource::new(path), options)
    }

    /// Reads and indexes any `Source`. Nothing is kept if any step fails.
    pub fn from_source<S: Source + ?Sized>(
        source: &S,
        options: ReadOptions,
    ) -> Result<LineIndexedBuffer> {
        options.validate()?;

        let content = acquire::read_source(source, &options)?;
        let index = Index::build(&content[..content.len() - 1])?;

        let source = source.identifier();
        debug!(%source, size = index.content_len(), lines = index.len(), "indexed source");

        Ok(Self {
            source,
            content,
            index,
        })
    }

    /// Identifier of the source this buffer was read from
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the size of the content in bytes, without the sentinel
    #[inline]
    pub fn size(&self) -> usize {
        self.content.len() - 1
    }

    /// Returns the whole content
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.content[..self.size()]
    }

    /// Returns the whole content followed by `SENTINEL`
    #[inline]
    pub fn as_bytes_with_sentinel(&self) -> &[u8] {
        &self.content
    }

    /// Copy the whole content into a newly allocated buffer
    #[inline]
    pub fn copy_buffer(&self) -> Result<TerminatedBytes> {
        TerminatedBytes::copy_from(self.as_bytes())
    }

    /// Returns the given 1-based `line` without its newline.
    ///
    /// Empty lines are reported as `Error::EmptyLine` instead of an empty slice
    pub fn line(&self, line: usize) -> Result<&[u8]> {
        let range = self.index.line_range(line)?;
        if range.is_empty() {
            return Err(Error::EmptyLine(line));
        }

        Ok(&self.content[range])
    }

    /// Copy the given 1-based `line` into a newly allocated buffer
    #[inline]
    pub fn get_line(&self, line: usize) -> Result<TerminatedBytes> {
        TerminatedBytes::copy_from(self.line(line)?)
    }

    /// Reads the given 1-based `line` as `String`
    pub fn read_line(&self, line: usize) -> Result<String> {
        let line = self.line(line)?;

        let mut out = Vec::new();
        out.try_reserve_exact(line.len())?;
        out.extend_from_slice(line);
        Ok(String::from_utf8(out)?)
    }

    /// Releases the buffer. Dropping it has the same effect.
    #[inline]
    pub fn close(self) {
        trace!(source = %self.source, "closing buffer");
    }
}

impl Indexable for LineIndexedBuffer {
    #[inline]
    fn get_index(&self) -> &Index {
        &self.index
    }
}

/// An owned copy of bytes, always followed by `SENTINEL`. Never shares memory with the
/// `LineIndexedBuffer` it was copied from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminatedBytes {
    inner: Box<[u8]>,
}

impl TerminatedBytes {
    pub(crate) fn copy_from(bytes: &[u8]) -> Result<TerminatedBytes> {
        let len = bytes.len();
        let mut inner = alloc_zeroed(len.checked_add(1).ok_or(Error::AllocationFailure)?)?;
        inner[..len].copy_from_slice(bytes);
        inner[len] = SENTINEL;

        Ok(Self {
            inner: inner.into_boxed_slice(),
        })
    }

    /// Amount of bytes without the sentinel
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner[..self.len()]
    }

    #[inline]
    pub fn as_bytes_with_sentinel(&self) -> &[u8] {
        &self.inner
    }

    /// Converts into a `Vec<u8>`, dropping the sentinel
    pub fn into_vec(self) -> Vec<u8> {
        let mut vec = self.inner.into_vec();
        vec.pop();
        vec
    }
}

impl Deref for TerminatedBytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for TerminatedBytes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Allocates `len` zeroed bytes, reporting allocation failures instead of aborting
pub(crate) fn alloc_zeroed(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    buf.resize(len, 0);
    Ok(buf)
}

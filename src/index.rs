use std::{iter, ops::Range};

use memchr::memchr_iter;

use crate::{error::Error, Result};

/// Contains an in-memory line-index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// Maps line to the offset it starts at. The index within the Vec represents the 0-based
    /// line-index in the content
    inner: Vec<usize>,
    /// Length of the indexed content in bytes
    content_len: usize,
    /// Where the last line ends. Newlines at the end of the content terminate the last line and
    /// never start new ones.
    last_line_end: usize,
}

impl Index {
    /// Build a new index for `content`. Newlines at the very end of `content` terminate the last
    /// line instead of starting new, empty ones, so appending a newline never adds a line. Empty
    /// content has no lines at all.
    pub fn build(content: &[u8]) -> Result<Self> {
        let content_len = content.len();
        let last_line_end = content
            .iter()
            .rposition(|b| *b != b'\n')
            .map_or(0, |pos| pos + 1);

        if content.is_empty() {
            return Ok(Self {
                inner: Vec::new(),
                content_len,
                last_line_end,
            });
        }

        // If content exists there is at least one line
        let body = &content[..last_line_end];
        let lines = 1 + memchr_iter(b'\n', body).count();

        let mut inner = Vec::new();
        inner.try_reserve_exact(lines)?;
        inner.extend(iter::once(0).chain(memchr_iter(b'\n', body).map(|pos| pos + 1)));

        Ok(Self {
            inner,
            content_len,
            last_line_end,
        })
    }

    /// Get the offset line `pos` starts at. `pos` is 0-based.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<usize> {
        self.inner.get(pos).copied()
    }

    /// Returns the byte range of the 1-based `line` within the indexed content, without its
    /// terminating newline. The range is empty for empty lines.
    pub fn line_range(&self, line: usize) -> Result<Range<usize>> {
        let total = self.len();
        if line < 1 || line > total {
            return Err(Error::LineOutOfRange { line, total });
        }

        let start = self.inner[line - 1];

        // Subtract 1 to exclude the newline itself
        let end = if line < total {
            self.inner[line] - 1
        } else {
            self.last_line_end
        };

        Ok(start..end)
    }

    /// Returns the length of the 1-based `line` in bytes
    #[inline]
    pub fn line_len(&self, line: usize) -> Result<usize> {
        Ok(self.line_range(line)?.len())
    }

    /// Returns the amount of lines
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the index has no lines
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Length of the content this index was built for
    #[inline]
    pub fn content_len(&self) -> usize {
        self.content_len
    }
}

//!A simple library to read files into memory once and access any of their lines by number

mod acquire;
/// The in-memory buffer and owned copies of it
pub mod buffer;
pub mod error;
/// Opening buffers from async code
pub mod file;
/// Functions working on possibly absent buffers
pub mod handle;
/// The line index of a buffer
pub mod index;
pub mod options;
/// Where buffers are read from
pub mod source;

#[cfg(test)]
mod test_utils;

pub use buffer::{LineIndexedBuffer, TerminatedBytes};
pub use file::open_async;
pub use options::ReadOptions;

use index::Index;
pub type Result<T> = std::result::Result<T, error::Error>;

pub trait Indexable {
    /// Returns a reference to the index.
    fn get_index(&self) -> &Index;

    /// Returns the total amount of lines.
    #[inline]
    fn total_lines(&self) -> usize {
        self.get_index().len()
    }
}

use std::{
    cell::Cell,
    io::{self, Cursor, Read},
};

use crate::source::Source;

/// In-memory `Source` which can pretend to be a virtual file and fail a given amount of reads.
#[derive(Debug)]
pub(crate) struct MemorySource {
    data: Vec<u8>,
    /// `None` makes the metadata query fail
    reported_size: Option<u64>,
    /// Readers opened while this is > 0 fail on their first read
    failing_reads: Cell<usize>,
    opened: Cell<usize>,
}

impl MemorySource {
    pub(crate) fn normal<D: AsRef<[u8]>>(data: D) -> Self {
        let data = data.as_ref().to_vec();
        Self {
            reported_size: Some(data.len() as u64),
            data,
            failing_reads: Cell::new(0),
            opened: Cell::new(0),
        }
    }

    pub(crate) fn virtual_file<D: AsRef<[u8]>>(data: D) -> Self {
        Self {
            reported_size: Some(0),
            ..Self::normal(data)
        }
    }

    pub(crate) fn reporting_size(mut self, size: u64) -> Self {
        self.reported_size = Some(size);
        self
    }

    pub(crate) fn without_metadata(mut self) -> Self {
        self.reported_size = None;
        self
    }

    pub(crate) fn failing_reads(self, count: usize) -> Self {
        self.failing_reads.set(count);
        self
    }

    /// How often `open` was called
    pub(crate) fn opened(&self) -> usize {
        self.opened.get()
    }
}

impl Source for MemorySource {
    type Reader = MemoryReader;

    fn identifier(&self) -> String {
        "memory".to_owned()
    }

    fn reported_size(&self) -> io::Result<u64> {
        self.reported_size
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no metadata"))
    }

    fn open(&self) -> io::Result<MemoryReader> {
        self.opened.set(self.opened.get() + 1);

        let failing = self.failing_reads.get();
        if failing > 0 {
            self.failing_reads.set(failing - 1);
            return Ok(MemoryReader::Failing);
        }

        Ok(MemoryReader::Data(Cursor::new(self.data.clone())))
    }
}

#[derive(Debug)]
pub(crate) enum MemoryReader {
    Data(Cursor<Vec<u8>>),
    Failing,
}

impl Read for MemoryReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            MemoryReader::Data(cursor) => cursor.read(buf),
            MemoryReader::Failing => Err(io::Error::new(io::ErrorKind::Other, "read failed")),
        }
    }
}

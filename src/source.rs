use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

/// Something that can be read into a `LineIndexedBuffer`. Each call to `open` has to start reading
/// from the very beginning of the source.
pub trait Source {
    type Reader: Read;

    /// Name of the source, only used for diagnostics
    fn identifier(&self) -> String;

    /// The size the source claims to have. Virtual files report 0 here.
    fn reported_size(&self) -> io::Result<u64>;

    /// Opens a fresh reader positioned at the start of the source
    fn open(&self) -> io::Result<Self::Reader>;
}

/// A file on the local filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsSource {
    path: PathBuf,
}

impl FsSource {
    #[inline]
    pub fn new<P: AsRef<Path>>(path: P) -> FsSource {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Source for FsSource {
    type Reader = fs::File;

    #[inline]
    fn identifier(&self) -> String {
        self.path.display().to_string()
    }

    #[inline]
    fn reported_size(&self) -> io::Result<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    #[inline]
    fn open(&self) -> io::Result<fs::File> {
        fs::File::open(&self.path)
    }
}

/// The two ways a source gets read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Size is known upfront through the metadata
    Normal,
    /// Reports a size of 0 but still has data to read, like most files in `/proc`
    Virtual,
}

/// Decides how `source` has to be read. A source is virtual only if it reports a size of 0 and a
/// single byte can be read from it anyway. Every failure along the way classifies the source as
/// normal, the normal read path reports the actual error.
pub fn classify<S: Source + ?Sized>(source: &S) -> SourceKind {
    match source.reported_size() {
        Ok(0) => (),
        Ok(_) => return SourceKind::Normal,
        Err(err) => {
            debug!(source = %source.identifier(), error = %err, "can't fetch metadata");
            return SourceKind::Normal;
        }
    }

    let mut reader = match source.open() {
        Ok(reader) => reader,
        Err(err) => {
            debug!(source = %source.identifier(), error = %err, "can't open source for probing");
            return SourceKind::Normal;
        }
    };

    let mut probe = [0u8; 1];
    let kind = loop {
        match reader.read(&mut probe) {
            Ok(1) => break SourceKind::Virtual,
            Ok(_) => break SourceKind::Normal,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break SourceKind::Normal,
        }
    };

    trace!(source = %source.identifier(), ?kind, "classified source");
    kind
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::test_utils::MemorySource;

    #[test]
    fn test_classify_memory() {
        let normal = MemorySource::normal("ab\ncd");
        assert_eq!(classify(&normal), SourceKind::Normal);

        let virt = MemorySource::virtual_file("cpu 1 2 3\n");
        assert_eq!(classify(&virt), SourceKind::Virtual);

        // Zero size and nothing to read is just an empty file
        let empty = MemorySource::virtual_file("");
        assert_eq!(classify(&empty), SourceKind::Normal);

        let broken = MemorySource::virtual_file("data").without_metadata();
        assert_eq!(classify(&broken), SourceKind::Normal);
    }

    #[test]
    fn test_classify_fs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let source = FsSource::new(file.path());
        assert_eq!(classify(&source), SourceKind::Normal);
        assert_eq!(source.reported_size().unwrap(), 0);

        file.write_all(b"some content\n").unwrap();
        file.flush().unwrap();
        assert_eq!(classify(&source), SourceKind::Normal);
        assert_eq!(source.reported_size().unwrap(), 13);

        let missing = FsSource::new("./testfiles/does_not_exist");
        assert_eq!(classify(&missing), SourceKind::Normal);
        assert!(missing.reported_size().is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_classify_proc() {
        assert_eq!(classify(&FsSource::new("/proc/stat")), SourceKind::Virtual);
    }
}

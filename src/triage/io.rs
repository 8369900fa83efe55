//! Bounded file acquisition.
//!
//! Entropy is only meaningful over the complete byte stream, so oversized
//! files are refused instead of truncated.

use crate::error::{EntroscanError, Result};
use crate::triage::config::IOConfig;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// A reader that stops yielding data after `limit` bytes.
pub struct BoundedReader<R> {
    inner: R,
    bytes_read: u64,
    limit: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: reader,
            bytes_read: 0,
            limit,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bytes_read >= self.limit {
            debug!("BoundedReader reached limit of {} bytes", self.limit);
            return Ok(0); // EOF
        }

        let remaining = self.limit - self.bytes_read;
        let max_to_read = std::cmp::min(buf.len() as u64, remaining) as usize;
        let n = self.inner.read(&mut buf[..max_to_read])?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

/// File reader that enforces [`IOConfig::max_file_size`].
pub struct SafeFileReader {
    file: File,
    size: u64,
    limit: u64,
}

impl SafeFileReader {
    /// Open a file, refusing it if its metadata reports more than the limit.
    pub fn open<P: AsRef<Path>>(path: P, config: &IOConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening file for scanning: {:?}", path);

        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let limit = config.max_file_size;

        if size > limit {
            warn!("File too large: {} bytes (limit: {})", size, limit);
            return Err(EntroscanError::FileTooLarge { size, limit });
        }

        debug!("File size: {} bytes, limit: {}", size, limit);
        Ok(Self { file, size, limit })
    }

    /// Size reported by the filesystem at open time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read the whole file.
    ///
    /// One byte past the limit is requested so that a file which grew after
    /// `open` is detected rather than silently cut short.
    pub fn read_all(self) -> Result<Vec<u8>> {
        let limit = self.limit;
        let mut reader = BoundedReader::new(self.file, limit.saturating_add(1));
        let mut data = Vec::with_capacity(self.size as usize);
        reader.read_to_end(&mut data)?;

        let read = data.len() as u64;
        if read > limit {
            warn!("File grew past limit while reading ({} bytes)", read);
            return Err(EntroscanError::FileTooLarge { size: read, limit });
        }
        Ok(data)
    }
}

/// Reads a whole file under the configured ceiling.
pub fn read_file<P: AsRef<Path>>(path: P, config: &IOConfig) -> Result<Vec<u8>> {
    SafeFileReader::open(path, config)?.read_all()
}

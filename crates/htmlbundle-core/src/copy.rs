//! Buffered copying with a reusable buffer.
//!
//! Both the extraction write pass and the file server stream through a
//! [`CopyBuffer`], so a whole extraction allocates its I/O buffer once.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::BundleError;

/// Buffer size for I/O operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable buffer for copy operations.
///
/// # Examples
///
/// ```
/// use htmlbundle_core::copy::CopyBuffer;
/// use htmlbundle_core::copy::copy_with_buffer;
///
/// # fn main() -> Result<(), htmlbundle_core::BundleError> {
/// let mut buffer = CopyBuffer::new();
/// let mut input: &[u8] = b"<!doctype html>";
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// assert_eq!(copied, 15);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies everything from `reader` to `writer`.
///
/// # Errors
///
/// Returns `BundleError::Storage` if reading or writing fails.
#[inline]
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, BundleError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(BundleError::Storage(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total = total.saturating_add(bytes_read as u64);
    }

    Ok(total)
}

/// Copies at most `limit` bytes and fails if the source holds more.
///
/// `limit` is the entry's declared uncompressed size, the same figure the
/// validation pass counted against the bundle quota.
///
/// # Errors
///
/// Returns `BundleError::InvalidArchive` naming `name` if the source yields
/// more than `limit` bytes, or `BundleError::Storage` on I/O failure.
pub fn copy_bounded<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    limit: u64,
    name: &str,
) -> Result<u64, BundleError> {
    let mut limited = reader.take(limit);
    let copied = copy_with_buffer(&mut limited, writer, buffer)?;

    let reader = limited.into_inner();
    let mut probe = [0u8; 1];
    loop {
        match reader.read(&mut probe) {
            Ok(0) => return Ok(copied),
            Ok(_) => {
                return Err(BundleError::InvalidArchive(format!(
                    "entry {name} is larger than its declared size of {limit} bytes"
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(BundleError::Storage(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_copy_buffer_default() {
        assert_eq!(CopyBuffer::default().size(), 64 * 1024);
    }

    #[test]
    fn test_copy_empty_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();

        assert_eq!(copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap(), 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_copy_multiple_chunks() {
        let mut buffer = CopyBuffer::new();
        let input_data = vec![0x55u8; COPY_BUFFER_SIZE * 3 + 1000];
        let mut input = Cursor::new(&input_data);
        let mut output = Vec::new();

        let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
        assert_eq!(copied, input_data.len() as u64);
        assert_eq!(output, input_data);
    }

    #[test]
    fn test_copy_bounded_exact_size() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(b"body{}".to_vec());
        let mut output = Vec::new();

        let copied = copy_bounded(&mut input, &mut output, &mut buffer, 6, "a.css").unwrap();
        assert_eq!(copied, 6);
        assert_eq!(output, b"body{}");
    }

    #[test]
    fn test_copy_bounded_rejects_oversized_source() {
        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(vec![0u8; 100]);
        let mut output = Vec::new();

        let result = copy_bounded(&mut input, &mut output, &mut buffer, 10, "bomb.js");
        assert!(
            matches!(result, Err(BundleError::InvalidArchive(ref msg)) if msg.contains("bomb.js"))
        );
        assert_eq!(output.len(), 10);
    }

    #[test]
    fn test_copy_with_write_failure() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut buffer = CopyBuffer::new();
        let mut input = Cursor::new(vec![1u8; 10]);
        let result = copy_with_buffer(&mut input, &mut FailingWriter, &mut buffer);
        assert!(matches!(result, Err(BundleError::Storage(_))));
    }
}

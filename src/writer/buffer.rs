// src/writer/buffer.rs
use crate::types::Tetra;
use crate::utils::format_exponential;
use bytes::{BufMut, Bytes, BytesMut};

/// In-memory image of a Tecplot ASCII file
///
/// The whole file is assembled here before anything touches the
/// destination, so a failed conversion never leaves a partial file.
///
/// # Example
///
/// ```
/// use pvd2tec::writer::TecBuffer;
///
/// let mut buffer = TecBuffer::new();
/// buffer.write_line("ZONE N = 4, E = 1");
/// buffer.write_values(&[1.0, 0.5]);
/// buffer.write_cell(&[0, 1, 2, 3]);
///
/// assert_eq!(buffer.line_count(), 3);
/// assert_eq!(
///     buffer.as_bytes(),
///     b"ZONE N = 4, E = 1\n1.000000e+00 5.000000e-01\n1 2 3 4\n"
/// );
/// ```
pub struct TecBuffer {
    buffer: BytesMut,
    line_count: usize,
}

impl TecBuffer {
    /// Create a new buffer with default capacity (8192 bytes)
    pub fn new() -> Self {
        Self::with_capacity(8192)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TecBuffer {
            buffer: BytesMut::with_capacity(capacity),
            line_count: 0,
        }
    }

    /// Append one line of text (newline added)
    pub fn write_line(&mut self, line: &str) {
        self.buffer.put_slice(line.as_bytes());
        self.end_line();
    }

    /// Append one row of values in `%e` notation, space separated
    pub fn write_values(&mut self, values: &[f64]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.buffer.put_u8(b' ');
            }
            self.buffer.put_slice(format_exponential(*value).as_bytes());
        }
        self.end_line();
    }

    /// Append one tetrahedron with 1-based point indices
    pub fn write_cell(&mut self, cell: &Tetra) {
        for (i, index) in cell.iter().enumerate() {
            if i > 0 {
                self.buffer.put_u8(b' ');
            }
            self.buffer.put_slice((u64::from(*index) + 1).to_string().as_bytes());
        }
        self.end_line();
    }

    fn end_line(&mut self) {
        self.buffer.put_u8(b'\n');
        self.line_count += 1;
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn freeze(self) -> Bytes {
        self.buffer.freeze()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.line_count = 0;
    }
}

impl Default for TecBuffer {
    fn default() -> Self {
        Self::new()
    }
}

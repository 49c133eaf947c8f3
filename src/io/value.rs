use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

use std::io::Read;

// ReadSiValues

/// Primitive reads used by the chunk decoders. Each takes the name of the
/// field being read so a short read can say where it happened.
///
/// None of these know where the chunk ends; wrap the stream in a
/// `ChunkBody` to keep them inside the declared size.
pub trait ReadSiValues: Read {
    fn read_le_u16(&mut self, field: &'static str) -> Result<u16> {
        self.read_u16::<LittleEndian>()
            .map_err(|e| Error::from_read(field, e))
    }

    fn read_le_u32(&mut self, field: &'static str) -> Result<u32> {
        self.read_u32::<LittleEndian>()
            .map_err(|e| Error::from_read(field, e))
    }

    /// Reads up to and including a NUL byte. The NUL is kept.
    fn read_cstring(&mut self, field: &'static str) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        loop {
            let c = self.read_u8().map_err(|e| Error::from_read(field, e))?;
            buf.push(c);
            if c == 0 {
                return Ok(buf);
            }
        }
    }

    /// Reads exactly `len` bytes, growing the buffer only as data arrives.
    fn read_byte_run(&mut self, field: &'static str, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut *self).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(Error::UnexpectedEof { field });
        }
        Ok(buf)
    }
}

impl<R: Read + ?Sized> ReadSiValues for R {}

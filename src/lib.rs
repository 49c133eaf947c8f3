//! Chunk body decoder for the SI container used by the Mx interactive-movie
//! engine.
//!
//! An SI file is a tree of RIFF-style chunks: a 4-byte tag, a little-endian
//! `u32` body size, then the body. Walking that tree is up to the caller.
//! This crate decodes one body at a time, given a stream positioned at its
//! start and the chunk's `ChunkHeader`.
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use si::{ChunkData, ChunkHeader, ReadChunks};
//!
//! fn main() -> si::Result<()> {
//!     let body = [2u32, 0x10000, 8]
//!         .iter()
//!         .flat_map(|v| v.to_le_bytes())
//!         .collect::<Vec<u8>>();
//!     let mut rdr = Cursor::new(&body[..]);
//!     let header = ChunkHeader::new(*b"MxHd", 12, 2);
//!     if let ChunkData::MxHd(hd) = rdr.read_chunk_data(&header)? {
//!         println!("buffers: {} x {}", hd.buffer_count, hd.buffer_size);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chunk;
pub mod error;
pub mod io;
pub mod record;

pub use chunk::{
    type_name, ChunkData, ChunkHeader, ChunkType, FourCC, List, MxCh, MxHd, MxOb, MxObMedia,
    MxOf, ObjectType, Riff, MXOB_UNKNOWN_COUNT,
};
pub use error::{Error, Result};
pub use io::chunk::{ChunkBody, ReadChunks, ReadOptions, UnknownChunkPolicy};
pub use io::value::ReadSiValues;
pub use record::{DataRecord, Value};

use log::{debug, trace, warn};

use crate::chunk::*;
use crate::error::{Error, Result};
use crate::io::value::ReadSiValues;
use crate::record::MXOB_UNKNOWN_NAMES;

use std::io::{self, Read, Take};

// ReadOptions

/// What to do with a tag that has no decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownChunkPolicy {
    /// Fail with `Error::UnknownChunkType`.
    #[default]
    Reject,
    /// Consume the body and return `ChunkData::Unimplemented`.
    Skip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub unknown_chunks: UnknownChunkPolicy,
}

// ChunkBody

/// A reader over one chunk body, limited to the declared size.
pub struct ChunkBody<'a, R: Read + ?Sized> {
    inner: Take<&'a mut R>,
    header: ChunkHeader,
}

impl<'a, R: Read + ?Sized> ChunkBody<'a, R> {
    pub fn new(rdr: &'a mut R, header: &ChunkHeader) -> ChunkBody<'a, R> {
        ChunkBody {
            inner: Read::take(rdr, header.size as u64),
            header: *header,
        }
    }

    pub fn header(&self) -> &ChunkHeader {
        &self.header
    }

    /// Bytes left before the declared end of the body.
    pub fn remaining(&self) -> u64 {
        self.inner.limit()
    }

    pub fn consumed(&self) -> u64 {
        self.header.size as u64 - self.remaining()
    }

    /// Advances to the declared end of the body.
    pub fn skip_rest(&mut self, field: &'static str) -> Result<()> {
        let want = self.remaining();
        let skipped = io::copy(&mut self.inner, &mut io::sink())?;
        if skipped != want {
            return Err(Error::UnexpectedEof { field });
        }
        Ok(())
    }

    /// Body length left after a fixed header of `fixed` bytes.
    fn derived_len(&self, fixed: u32) -> Result<usize> {
        match self.header.size.checked_sub(fixed) {
            Some(n) => Ok(n as usize),
            None => Err(Error::SizeMismatch {
                tag: self.header.fourcc,
                size: self.header.size,
                minimum: fixed,
            }),
        }
    }

    fn read_riff(&mut self) -> Result<Riff> {
        let format = self.read_le_u32("Format")?;
        Ok(Riff { format })
    }

    fn read_list(&mut self) -> Result<List> {
        let format = self.read_le_u32("Format")?;
        let count = if format == ChunkType::MxCh.fourcc().to_u32() {
            Some(self.read_le_u32("Count")?)
        } else {
            None
        };
        Ok(List { format, count })
    }

    fn read_mxhd(&mut self) -> Result<MxHd> {
        let version = self.read_le_u32("Version")?;
        let buffer_size = self.read_le_u32("BufferSize")?;
        let buffer_count = self.read_le_u32("BufferCount")?;
        Ok(MxHd {
            version,
            buffer_size,
            buffer_count,
        })
    }

    fn read_mxch(&mut self) -> Result<MxCh> {
        let data_len = self.derived_len(MxCh::HEADER_SIZE)?;
        let flags = self.read_le_u16("Flags")?;
        let object = self.read_le_u32("Object")?;
        let time = self.read_le_u32("Time")?;
        let data_size = self.read_le_u32("DataSize")?;
        let data = self.read_byte_run("Data", data_len)?;
        Ok(MxCh {
            flags,
            object,
            time,
            data_size,
            data,
        })
    }

    fn read_mxof(&mut self) -> Result<MxOf> {
        let offsets_len = self.derived_len(MxOf::HEADER_SIZE)?;
        let count = self.read_le_u32("Count")?;
        let offsets = self.read_byte_run("Offsets", offsets_len)?;
        Ok(MxOf { count, offsets })
    }

    fn read_mxob(&mut self) -> Result<MxOb> {
        let object_type = self.read_le_u16("Type")?;
        let presenter = self.read_cstring("Presenter")?;
        let unknown1 = self.read_le_u32("Unknown1")?;
        let name = self.read_cstring("Name")?;
        let id = self.read_le_u32("ID")?;

        let mut unknown = [0u32; MXOB_UNKNOWN_COUNT];
        for (v, field) in unknown.iter_mut().zip(MXOB_UNKNOWN_NAMES) {
            *v = self.read_le_u32(field)?;
        }

        let extra_length = self.read_le_u16("ExtraLength")?;
        if extra_length as u64 > self.remaining() {
            let minimum = self.consumed() + extra_length as u64;
            return Err(Error::SizeMismatch {
                tag: self.header.fourcc,
                size: self.header.size,
                minimum: u32::try_from(minimum).unwrap_or(u32::MAX),
            });
        }
        let extra_data = self.read_byte_run("ExtraData", extra_length as usize)?;

        let has_media = ObjectType::from_u16(object_type).map_or(true, ObjectType::has_media);
        let media = if has_media {
            Some(self.read_mxob_media(object_type)?)
        } else {
            None
        };

        Ok(MxOb {
            object_type,
            presenter,
            unknown1,
            name,
            id,
            unknown,
            extra_length,
            extra_data,
            media,
        })
    }

    fn read_mxob_media(&mut self, object_type: u16) -> Result<MxObMedia> {
        let file_name = self.read_cstring("FileName")?;
        let unknown = [
            self.read_le_u32("Unknown27")?,
            self.read_le_u32("Unknown28")?,
            self.read_le_u32("Unknown29")?,
        ];
        let file_type = self.read_le_u32("FileType")?;
        let unknown_tail = [
            self.read_le_u32("Unknown30")?,
            self.read_le_u32("Unknown31")?,
        ];
        let wav_unknown = if object_type == ObjectType::WAV as u16 {
            Some(self.read_le_u32("Unknown32")?)
        } else {
            None
        };
        Ok(MxObMedia {
            file_name,
            unknown,
            file_type,
            unknown_tail,
            wav_unknown,
        })
    }
}

impl<'a, R: Read + ?Sized> Read for ChunkBody<'a, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

// ReadChunks

/// Decodes chunk bodies from a stream positioned at the start of a body.
///
/// Leaf chunks (MxHd, MxCh, MxOf, pad) leave the stream at the declared end
/// of the body. Container chunks (RIFF, LIST, MxSt, MxOb) only consume their
/// own fields, leaving the stream at their first child.
pub trait ReadChunks: Read {
    fn read_chunk_data(&mut self, header: &ChunkHeader) -> Result<ChunkData> {
        self.read_chunk_data_with(header, &ReadOptions::default())
    }

    fn read_chunk_data_with(
        &mut self,
        header: &ChunkHeader,
        options: &ReadOptions,
    ) -> Result<ChunkData>;
}

impl<R: Read + ?Sized> ReadChunks for R {
    fn read_chunk_data_with(
        &mut self,
        header: &ChunkHeader,
        options: &ReadOptions,
    ) -> Result<ChunkData> {
        trace!(
            "reading {} chunk, size {}, version {}",
            header.fourcc,
            header.size,
            header.version
        );

        let chunk_type = match ChunkType::from_fourcc(header.fourcc) {
            Some(t) => t,
            None => return read_unknown(self, header, options),
        };

        let mut body = ChunkBody::new(self, header);
        let data = match chunk_type {
            ChunkType::Riff => ChunkData::Riff(body.read_riff()?),
            ChunkType::List => ChunkData::List(body.read_list()?),
            ChunkType::MxSt => ChunkData::MxSt,
            ChunkType::MxHd => ChunkData::MxHd(body.read_mxhd()?),
            ChunkType::MxCh => ChunkData::MxCh(body.read_mxch()?),
            ChunkType::MxOf => ChunkData::MxOf(body.read_mxof()?),
            ChunkType::Pad => {
                body.skip_rest("pad")?;
                ChunkData::Pad
            }
            ChunkType::MxOb => ChunkData::MxOb(body.read_mxob()?),
        };

        let left = body.remaining();
        if left > 0 {
            if chunk_type.is_container() {
                debug!("{} chunk: {} bytes of children follow", header.fourcc, left);
            } else {
                debug!("{} chunk: skipping {} trailing bytes", header.fourcc, left);
                body.skip_rest("trailing data")?;
            }
        }

        Ok(data)
    }
}

fn read_unknown<R: Read + ?Sized>(
    rdr: &mut R,
    header: &ChunkHeader,
    options: &ReadOptions,
) -> Result<ChunkData> {
    match options.unknown_chunks {
        UnknownChunkPolicy::Reject => Err(Error::UnknownChunkType(header.fourcc)),
        UnknownChunkPolicy::Skip => {
            warn!("skipping unknown {} chunk of {} bytes", header.fourcc, header.size);
            ChunkBody::new(rdr, header).skip_rest("unknown chunk body")?;
            Ok(ChunkData::Unimplemented(header.fourcc))
        }
    }
}

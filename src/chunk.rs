use std::fmt;

// FourCC

/// A 4-byte chunk tag, stored in on-disk byte order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// The tag as it appears when read as a little-endian `u32`, which is how
    /// in-body format fields (RIFF and LIST `Format`) store tags.
    pub fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub fn from_u32(v: u32) -> FourCC {
        FourCC(v.to_le_bytes())
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &b in self.0.iter() {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FourCC({})", self)
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(b: [u8; 4]) -> FourCC {
        FourCC(b)
    }
}

// ChunkType

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkType {
    Riff,
    List,
    MxSt,
    MxHd,
    MxCh,
    MxOf,
    Pad,
    MxOb,
}

impl ChunkType {
    pub const ALL: [ChunkType; 8] = [
        ChunkType::Riff,
        ChunkType::List,
        ChunkType::MxSt,
        ChunkType::MxHd,
        ChunkType::MxCh,
        ChunkType::MxOf,
        ChunkType::Pad,
        ChunkType::MxOb,
    ];

    pub fn fourcc(self) -> FourCC {
        FourCC(match self {
            ChunkType::Riff => *b"RIFF",
            ChunkType::List => *b"LIST",
            ChunkType::MxSt => *b"MxSt",
            ChunkType::MxHd => *b"MxHd",
            ChunkType::MxCh => *b"MxCh",
            ChunkType::MxOf => *b"MxOf",
            ChunkType::Pad => *b"pad ",
            ChunkType::MxOb => *b"MxOb",
        })
    }

    pub fn from_fourcc(tag: FourCC) -> Option<ChunkType> {
        ChunkType::ALL.iter().copied().find(|t| t.fourcc() == tag)
    }

    /// Container chunks are followed by child chunks inside their declared
    /// size; decoding one only consumes its own fields.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ChunkType::Riff | ChunkType::List | ChunkType::MxSt | ChunkType::MxOb
        )
    }
}

// ChunkHeader

/// Framing of one chunk, as read by the tree walker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkHeader {
    pub fourcc: FourCC,
    /// Body size, excluding the 8-byte tag and size prefix.
    pub size: u32,
    /// Format version of the enclosing file. Passed through, not used to
    /// select a layout.
    pub version: u32,
}

impl ChunkHeader {
    pub fn new(fourcc: impl Into<FourCC>, size: u32, version: u32) -> ChunkHeader {
        ChunkHeader {
            fourcc: fourcc.into(),
            size,
            version,
        }
    }
}

// ChunkData

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChunkData {
    Riff(Riff),
    List(List),
    MxSt,
    MxHd(MxHd),
    MxCh(MxCh),
    MxOf(MxOf),
    Pad,
    MxOb(MxOb),
    /// An unrecognized chunk whose body was skipped.
    Unimplemented(FourCC),
}

impl ChunkData {
    pub fn chunk_type(&self) -> Option<ChunkType> {
        Some(match self {
            ChunkData::Riff(_) => ChunkType::Riff,
            ChunkData::List(_) => ChunkType::List,
            ChunkData::MxSt => ChunkType::MxSt,
            ChunkData::MxHd(_) => ChunkType::MxHd,
            ChunkData::MxCh(_) => ChunkType::MxCh,
            ChunkData::MxOf(_) => ChunkType::MxOf,
            ChunkData::Pad => ChunkType::Pad,
            ChunkData::MxOb(_) => ChunkType::MxOb,
            ChunkData::Unimplemented(_) => return None,
        })
    }
}

// Riff

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Riff {
    pub format: u32,
}

// List

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct List {
    pub format: u32,
    /// Only present when `format` is the `MxCh` tag.
    pub count: Option<u32>,
}

// MxHd

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MxHd {
    pub version: u32,
    pub buffer_size: u32,
    pub buffer_count: u32,
}

// MxCh

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MxCh {
    pub flags: u16,
    pub object: u32,
    pub time: u32,
    /// As stored; `data` is sized from the chunk size instead.
    pub data_size: u32,
    pub data: Vec<u8>,
}

impl MxCh {
    pub const HEADER_SIZE: u32 = 14;
}

// MxOf

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MxOf {
    pub count: u32,
    pub offsets: Vec<u8>,
}

impl MxOf {
    pub const HEADER_SIZE: u32 = 4;
}

// MxOb

pub const MXOB_UNKNOWN_COUNT: usize = 24;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MxOb {
    /// Raw object type; see `kind` for the known values.
    pub object_type: u16,
    pub presenter: Vec<u8>,
    pub unknown1: u32,
    pub name: Vec<u8>,
    pub id: u32,
    pub unknown: [u32; MXOB_UNKNOWN_COUNT],
    pub extra_length: u16,
    pub extra_data: Vec<u8>,
    /// Absent for presenters and worlds.
    pub media: Option<MxObMedia>,
}

impl MxOb {
    pub fn kind(&self) -> Option<ObjectType> {
        ObjectType::from_u16(self.object_type)
    }

    pub fn type_name(&self) -> &'static str {
        type_name(self.object_type)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MxObMedia {
    pub file_name: Vec<u8>,
    pub unknown: [u32; 3],
    pub file_type: u32,
    pub unknown_tail: [u32; 2],
    /// Only read for WAV objects.
    pub wav_unknown: Option<u32>,
}

// ObjectType

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ObjectType {
    SMK = 0,
    WAV = 1,
    Presenter = 2,
    BMP = 3,
    OBJ = 4,
    World = 5,
    Event = 6,
    Animation = 7,
}

impl ObjectType {
    /// Number of object types. Not a valid type itself.
    pub const COUNT: u16 = 8;

    pub fn from_u16(v: u16) -> Option<ObjectType> {
        Some(match v {
            0 => ObjectType::SMK,
            1 => ObjectType::WAV,
            2 => ObjectType::Presenter,
            3 => ObjectType::BMP,
            4 => ObjectType::OBJ,
            5 => ObjectType::World,
            6 => ObjectType::Event,
            7 => ObjectType::Animation,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            ObjectType::SMK => "SMK",
            ObjectType::WAV => "WAV",
            ObjectType::Presenter => "MxPresenter",
            ObjectType::BMP => "BMP",
            ObjectType::OBJ => "3D Object",
            ObjectType::World => "World",
            ObjectType::Event => "Event",
            ObjectType::Animation => "Animation",
        }
    }

    /// Presenters and worlds are logical objects with no media file.
    pub fn has_media(self) -> bool {
        !matches!(self, ObjectType::Presenter | ObjectType::World)
    }
}

/// Display label for a raw object type, "Unknown" for anything unrecognized.
pub fn type_name(v: u16) -> &'static str {
    ObjectType::from_u16(v).map_or("Unknown", ObjectType::name)
}

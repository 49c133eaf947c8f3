//! Ordered name/value view of decoded chunks.
//!
//! Field names and order follow the on-disk layout, so a `DataRecord` can be
//! compared against a dump of the same chunk field by field.

use crate::chunk::*;

pub(crate) const MXOB_UNKNOWN_NAMES: [&str; MXOB_UNKNOWN_COUNT] = [
    "Unknown3", "Unknown4", "Unknown5", "Unknown6", "Unknown7", "Unknown8", "Unknown9",
    "Unknown10", "Unknown11", "Unknown12", "Unknown13", "Unknown14", "Unknown15", "Unknown16",
    "Unknown17", "Unknown18", "Unknown19", "Unknown20", "Unknown21", "Unknown22", "Unknown23",
    "Unknown24", "Unknown25", "Unknown26",
];

// Value

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    U16(u16),
    U32(u32),
    /// Raw payloads and NUL-terminated strings.
    Bytes(Vec<u8>),
}

impl Value {
    pub fn as_u16(&self) -> Option<u16> {
        match *self {
            Value::U16(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Value::U32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }
}

// DataRecord

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataRecord {
    fields: Vec<(&'static str, Value)>,
}

impl DataRecord {
    pub fn new() -> DataRecord {
        DataRecord::default()
    }

    fn push(&mut self, name: &'static str, value: Value) {
        debug_assert!(self.get(name).is_none(), "duplicate field {}", name);
        self.fields.push((name, value));
    }

    fn u16(&mut self, name: &'static str, v: u16) {
        self.push(name, Value::U16(v));
    }

    fn u32(&mut self, name: &'static str, v: u32) {
        self.push(name, Value::U32(v));
    }

    fn bytes(&mut self, name: &'static str, v: &[u8]) {
        self.push(name, Value::Bytes(v.to_vec()));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Fields in on-disk order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(n, _)| *n).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl ChunkData {
    pub fn to_record(&self) -> DataRecord {
        let mut rec = DataRecord::new();
        match self {
            ChunkData::Riff(riff) => rec.u32("Format", riff.format),
            ChunkData::List(list) => {
                rec.u32("Format", list.format);
                if let Some(count) = list.count {
                    rec.u32("Count", count);
                }
            }
            ChunkData::MxSt | ChunkData::Pad | ChunkData::Unimplemented(_) => {}
            ChunkData::MxHd(hd) => {
                rec.u32("Version", hd.version);
                rec.u32("BufferSize", hd.buffer_size);
                rec.u32("BufferCount", hd.buffer_count);
            }
            ChunkData::MxCh(ch) => {
                rec.u16("Flags", ch.flags);
                rec.u32("Object", ch.object);
                rec.u32("Time", ch.time);
                rec.u32("DataSize", ch.data_size);
                rec.bytes("Data", &ch.data);
            }
            ChunkData::MxOf(of) => {
                rec.u32("Count", of.count);
                rec.bytes("Offsets", &of.offsets);
            }
            ChunkData::MxOb(ob) => mxob_fields(&mut rec, ob),
        }
        rec
    }
}

fn mxob_fields(rec: &mut DataRecord, ob: &MxOb) {
    rec.u16("Type", ob.object_type);
    rec.bytes("Presenter", &ob.presenter);
    rec.u32("Unknown1", ob.unknown1);
    rec.bytes("Name", &ob.name);
    rec.u32("ID", ob.id);
    for (name, &v) in MXOB_UNKNOWN_NAMES.into_iter().zip(ob.unknown.iter()) {
        rec.u32(name, v);
    }
    rec.u16("ExtraLength", ob.extra_length);
    rec.bytes("ExtraData", &ob.extra_data);

    if let Some(media) = &ob.media {
        rec.bytes("FileName", &media.file_name);
        rec.u32("Unknown27", media.unknown[0]);
        rec.u32("Unknown28", media.unknown[1]);
        rec.u32("Unknown29", media.unknown[2]);
        rec.u32("FileType", media.file_type);
        rec.u32("Unknown30", media.unknown_tail[0]);
        rec.u32("Unknown31", media.unknown_tail[1]);
        if let Some(v) = media.wav_unknown {
            rec.u32("Unknown32", v);
        }
    }
}

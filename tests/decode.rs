use byteorder::{LittleEndian, WriteBytesExt};
use si::*;
use std::io::Cursor;

fn header(tag: &[u8; 4], body: &[u8]) -> ChunkHeader {
    ChunkHeader::new(*tag, body.len() as u32, 2)
}

/// Decodes `body` and returns the record with the number of bytes consumed.
fn decode(tag: &[u8; 4], body: &[u8]) -> (ChunkData, u64) {
    let mut rdr = Cursor::new(body);
    let data = rdr.read_chunk_data(&header(tag, body)).unwrap();
    (data, rdr.position())
}

fn mxob_body(object_type: u16, extra: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.write_u16::<LittleEndian>(object_type).unwrap();
    buf.extend_from_slice(b"LegoPresenter\0");
    buf.write_u32::<LittleEndian>(0xaa).unwrap();
    buf.extend_from_slice(b"Intro\0");
    buf.write_u32::<LittleEndian>(42).unwrap();
    for i in 0..MXOB_UNKNOWN_COUNT as u32 {
        buf.write_u32::<LittleEndian>(100 + i).unwrap();
    }
    buf.write_u16::<LittleEndian>(extra.len() as u16).unwrap();
    buf.extend_from_slice(extra);
    buf
}

fn media_tail(buf: &mut Vec<u8>, wav: bool) {
    buf.extend_from_slice(b"\\lego\\intro.smk\0");
    for v in [1u32, 2, 3] {
        buf.write_u32::<LittleEndian>(v).unwrap();
    }
    buf.write_u32::<LittleEndian>(u32::from_le_bytes(*b" SMK")).unwrap();
    buf.write_u32::<LittleEndian>(4).unwrap();
    buf.write_u32::<LittleEndian>(5).unwrap();
    if wav {
        buf.write_u32::<LittleEndian>(6).unwrap();
    }
}

#[test]
fn mxhd_fields_in_order() {
    let mut body = Vec::new();
    for v in [2u32, 0x20000, 0x16] {
        body.write_u32::<LittleEndian>(v).unwrap();
    }
    let (data, pos) = decode(b"MxHd", &body);
    assert_eq!(pos, 12);
    assert_eq!(
        data,
        ChunkData::MxHd(MxHd {
            version: 2,
            buffer_size: 0x20000,
            buffer_count: 0x16,
        })
    );
    assert_eq!(
        data.to_record().names(),
        vec!["Version", "BufferSize", "BufferCount"]
    );
}

#[test]
fn read_string_keeps_nul() {
    let mut rdr = Cursor::new(&[b'a', b'b', b'c', 0][..]);
    assert_eq!(rdr.read_cstring("Name").unwrap(), vec![b'a', b'b', b'c', 0]);

    let mut rdr = Cursor::new(&[0u8][..]);
    assert_eq!(rdr.read_cstring("Name").unwrap(), vec![0]);
}

#[test]
fn mxch_data_length_comes_from_size() {
    let mut body = Vec::new();
    body.write_u16::<LittleEndian>(0x10).unwrap();
    body.write_u32::<LittleEndian>(7).unwrap();
    body.write_u32::<LittleEndian>(1000).unwrap();
    body.write_u32::<LittleEndian>(0xffff).unwrap();
    body.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(body.len(), 20);

    let (data, pos) = decode(b"MxCh", &body);
    assert_eq!(pos, 20);
    match data {
        ChunkData::MxCh(ch) => {
            assert_eq!(ch.flags, 0x10);
            assert_eq!(ch.object, 7);
            assert_eq!(ch.time, 1000);
            assert_eq!(ch.data_size, 0xffff);
            assert_eq!(ch.data, vec![1, 2, 3, 4, 5, 6]);
        }
        other => panic!("expected MxCh, got {:?}", other),
    }
}

#[test]
fn mxch_with_empty_payload() {
    let body = [0u8; 14];
    let (data, pos) = decode(b"MxCh", &body);
    assert_eq!(pos, 14);
    assert!(matches!(data, ChunkData::MxCh(ref ch) if ch.data.is_empty()));
}

#[test]
fn list_reads_count_only_for_mxch() {
    let mut body = b"MxCh".to_vec();
    body.write_u32::<LittleEndian>(3).unwrap();
    body.extend_from_slice(b"MxChMxChMxCh");
    let mut rdr = Cursor::new(&body[..]);
    let data = rdr.read_chunk_data(&header(b"LIST", &body)).unwrap();
    assert_eq!(rdr.position(), 8);
    assert_eq!(
        data,
        ChunkData::List(List {
            format: u32::from_le_bytes(*b"MxCh"),
            count: Some(3),
        })
    );

    let body = b"MxStMxSt".to_vec();
    let mut rdr = Cursor::new(&body[..]);
    let data = rdr.read_chunk_data(&header(b"LIST", &body)).unwrap();
    assert_eq!(rdr.position(), 4);
    assert_eq!(data.to_record().names(), vec!["Format"]);
}

#[test]
fn mxst_reads_nothing() {
    let body = [0u8; 16];
    let (data, pos) = decode(b"MxSt", &body);
    assert_eq!(data, ChunkData::MxSt);
    assert_eq!(pos, 0);
}

#[test]
fn mxof_keeps_offset_table_opaque() {
    let mut body = Vec::new();
    body.write_u32::<LittleEndian>(2).unwrap();
    body.write_u32::<LittleEndian>(0x800).unwrap();
    body.write_u32::<LittleEndian>(0x1000).unwrap();
    let (data, pos) = decode(b"MxOf", &body);
    assert_eq!(pos, 12);
    let rec = data.to_record();
    assert_eq!(rec.get("Count"), Some(&Value::U32(2)));
    assert_eq!(rec.get("Offsets").and_then(Value::as_bytes), Some(&body[4..]));
}

#[test]
fn presenter_stops_after_extra_data() {
    let mut body = mxob_body(ObjectType::Presenter as u16, b"extra");
    // Child LIST following the object fields.
    body.extend_from_slice(b"LIST");
    let mut rdr = Cursor::new(&body[..]);
    let data = rdr.read_chunk_data(&header(b"MxOb", &body)).unwrap();
    assert_eq!(rdr.position(), body.len() as u64 - 4);

    let ob = match data {
        ChunkData::MxOb(ref ob) => ob,
        ref other => panic!("expected MxOb, got {:?}", other),
    };
    assert_eq!(ob.kind(), Some(ObjectType::Presenter));
    assert_eq!(ob.type_name(), "MxPresenter");
    assert_eq!(ob.presenter, b"LegoPresenter\0");
    assert_eq!(ob.name, b"Intro\0");
    assert_eq!(ob.id, 42);
    assert_eq!(ob.unknown[0], 100);
    assert_eq!(ob.unknown[23], 123);
    assert_eq!(ob.extra_data, b"extra");
    assert_eq!(ob.media, None);

    let rec = data.to_record();
    assert_eq!(rec.names().last(), Some(&"ExtraData"));
    assert!(rec.get("FileName").is_none());
    assert_eq!(rec.len(), 5 + MXOB_UNKNOWN_COUNT + 2);
}

#[test]
fn world_has_no_media_tail() {
    let body = mxob_body(ObjectType::World as u16, b"");
    let (data, pos) = decode(b"MxOb", &body);
    assert_eq!(pos, body.len() as u64);
    assert!(matches!(data, ChunkData::MxOb(ref ob) if ob.media.is_none()));
}

#[test]
fn smk_reads_media_tail() {
    let mut body = mxob_body(ObjectType::SMK as u16, b"");
    media_tail(&mut body, false);
    let (data, pos) = decode(b"MxOb", &body);
    assert_eq!(pos, body.len() as u64);

    let rec = data.to_record();
    let names = rec.names();
    assert_eq!(
        &names[names.len() - 7..],
        &[
            "FileName",
            "Unknown27",
            "Unknown28",
            "Unknown29",
            "FileType",
            "Unknown30",
            "Unknown31"
        ]
    );
    assert_eq!(
        rec.get("FileType"),
        Some(&Value::U32(u32::from_le_bytes(*b" SMK")))
    );
}

#[test]
fn wav_reads_one_more_field() {
    let mut body = mxob_body(ObjectType::WAV as u16, b"");
    media_tail(&mut body, true);
    let (data, pos) = decode(b"MxOb", &body);
    assert_eq!(pos, body.len() as u64);

    match data {
        ChunkData::MxOb(ob) => {
            let media = ob.media.expect("WAV objects carry media");
            assert_eq!(media.file_name, b"\\lego\\intro.smk\0");
            assert_eq!(media.unknown, [1, 2, 3]);
            assert_eq!(media.unknown_tail, [4, 5]);
            assert_eq!(media.wav_unknown, Some(6));
        }
        other => panic!("expected MxOb, got {:?}", other),
    }
}

#[test]
fn unknown_object_type_reads_media_tail() {
    let mut body = mxob_body(ObjectType::COUNT, b"");
    media_tail(&mut body, false);
    let (data, _) = decode(b"MxOb", &body);
    match data {
        ChunkData::MxOb(ob) => {
            assert_eq!(ob.kind(), None);
            assert_eq!(ob.type_name(), "Unknown");
            assert!(ob.media.is_some());
        }
        other => panic!("expected MxOb, got {:?}", other),
    }
}

#[test]
fn truncated_mxob_is_eof() {
    let mut body = mxob_body(ObjectType::BMP as u16, b"");
    media_tail(&mut body, false);
    body.truncate(body.len() - 2);
    let mut rdr = Cursor::new(&body[..]);
    assert!(matches!(
        rdr.read_chunk_data(&header(b"MxOb", &body)),
        Err(Error::UnexpectedEof { field: "Unknown31" })
    ));
}

#[test]
fn extra_length_past_chunk_end_is_size_mismatch() {
    let mut body = mxob_body(ObjectType::Presenter as u16, b"");
    let at = body.len() - 2;
    body[at..].copy_from_slice(&500u16.to_le_bytes());
    let mut rdr = Cursor::new(&body[..]);
    assert!(matches!(
        rdr.read_chunk_data(&header(b"MxOb", &body)),
        Err(Error::SizeMismatch { .. })
    ));
}

#[test]
fn type_names() {
    assert_eq!(type_name(ObjectType::SMK as u16), "SMK");
    assert_eq!(ObjectType::WAV.name(), "WAV");
    assert_eq!(ObjectType::Event.name(), "Event");
    assert_eq!(type_name(ObjectType::COUNT), "Unknown");
    assert_eq!(type_name(300), "Unknown");
}

#[test]
fn pad_advances_by_size() {
    let mut body = vec![0xcd; 37];
    body.extend_from_slice(b"MxOb");
    let mut rdr = Cursor::new(&body[..]);
    let data = rdr
        .read_chunk_data(&ChunkHeader::new(*b"pad ", 37, 2))
        .unwrap();
    assert_eq!(data, ChunkData::Pad);
    assert!(data.to_record().is_empty());
    assert_eq!(rdr.position(), 37);
}

#[test]
fn short_sizes_are_size_mismatch() {
    let body = [0u8; 32];
    for size in [0u32, 1, 13] {
        let mut rdr = Cursor::new(&body[..]);
        match rdr.read_chunk_data(&ChunkHeader::new(*b"MxCh", size, 2)) {
            Err(Error::SizeMismatch { minimum, .. }) => assert_eq!(minimum, 14),
            other => panic!("expected SizeMismatch, got {:?}", other),
        }
        assert_eq!(rdr.position(), 0);
    }
    for size in [0u32, 3] {
        let mut rdr = Cursor::new(&body[..]);
        match rdr.read_chunk_data(&ChunkHeader::new(*b"MxOf", size, 2)) {
            Err(Error::SizeMismatch { minimum, .. }) => assert_eq!(minimum, 4),
            other => panic!("expected SizeMismatch, got {:?}", other),
        }
    }
}

#[test]
fn sibling_chunks_decode_back_to_back() {
    let mut stream = Vec::new();
    let mut hd = Vec::new();
    for v in [2u32, 0x20000, 4] {
        hd.write_u32::<LittleEndian>(v).unwrap();
    }
    stream.extend_from_slice(&hd);
    stream.extend_from_slice(&[0; 6]);
    let mut of = Vec::new();
    of.write_u32::<LittleEndian>(1).unwrap();
    of.write_u32::<LittleEndian>(0x40).unwrap();
    stream.extend_from_slice(&of);

    let mut rdr = Cursor::new(&stream[..]);
    let headers = [
        ChunkHeader::new(*b"MxHd", 12, 2),
        ChunkHeader::new(*b"pad ", 6, 2),
        ChunkHeader::new(*b"MxOf", 8, 2),
    ];
    let kinds: Vec<_> = headers
        .iter()
        .map(|h| rdr.read_chunk_data(h).unwrap().chunk_type())
        .collect();
    assert_eq!(
        kinds,
        vec![Some(ChunkType::MxHd), Some(ChunkType::Pad), Some(ChunkType::MxOf)]
    );
    assert_eq!(rdr.position(), stream.len() as u64);
}

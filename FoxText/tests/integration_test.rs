use foxtext::formats::lang::{HEADER_SIZE, read_lang_from, write_lang_to};
use foxtext::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn sample_table() -> LangFile {
    let mut lang = LangFile::new();
    lang.insert("menu_start", "Start Game");
    lang.insert("menu_options", "Options");
    lang.insert("empty_value", "");
    lang.insert("", "empty key");
    lang.insert("jp_greeting", "こんにちは、スネーク");
    lang.insert("menu_start_dup_value", "Start Game");
    lang
}

/// Re-encode a little-endian table the way a big-endian platform stores it
fn to_big_endian(le: &[u8], layout: &LangLayout) -> Vec<u8> {
    let header = parse_lang_header(le).unwrap();
    let mut be = LangHeader {
        endianness: Endianness::BigEndian,
        ..header
    }
    .to_bytes()
    .to_vec();

    let index_end = HEADER_SIZE + header.entry_count as usize * 8;
    for field in le[HEADER_SIZE..index_end].chunks_exact(4) {
        let value = u32::from_le_bytes(field.try_into().unwrap());
        be.extend_from_slice(&value.to_be_bytes());
    }
    be.extend_from_slice(&le[index_end..]);

    for offsets in &layout.entries {
        let tag = (layout.value_pool_offset + offsets.value_offset) as usize;
        be.swap(tag, tag + 1);
    }
    be
}

#[test]
fn test_lang_round_trip() {
    init_logging();
    let lang = sample_table();

    let bytes = serialize_lang(&lang).unwrap();
    let read = parse_lang_bytes(&bytes).unwrap();

    assert_eq!(read.endianness, Endianness::LittleEndian);
    assert_eq!(read.entries, lang.entries);
    assert_eq!(serialize_lang(&read).unwrap(), bytes);
}

#[test]
fn test_big_endian_reads_same_entries() {
    init_logging();
    let (le, layout) = serialize_lang_with_layout(&sample_table()).unwrap();
    let be = to_big_endian(&le, &layout);
    assert_eq!(&be[8..12], b"BE\0\0");
    assert_ne!(be, le);

    let from_le = parse_lang_bytes(&le).unwrap();
    let from_be = parse_lang_bytes(&be).unwrap();

    assert_eq!(from_be.endianness, Endianness::BigEndian);
    assert_eq!(from_be.entries, from_le.entries);

    // Writing normalizes back to the little-endian reference
    assert_eq!(serialize_lang(&from_be).unwrap(), le);
}

#[test]
fn test_offsets_resolve_to_strings() {
    let lang = sample_table();
    let (bytes, layout) = serialize_lang_with_layout(&lang).unwrap();
    let header = parse_lang_header(&bytes).unwrap();

    assert_eq!(header.key_pool_offset, layout.key_pool_offset);
    assert_eq!(header.value_pool_offset, layout.value_pool_offset);
    assert_eq!(
        layout.key_pool_offset as usize,
        HEADER_SIZE + 8 * lang.entries.len()
    );

    for (i, (entry, offsets)) in lang.entries.iter().zip(&layout.entries).enumerate() {
        let index = HEADER_SIZE + i * 8;
        let stored_key = u32::from_le_bytes(bytes[index..index + 4].try_into().unwrap());
        let stored_value = u32::from_le_bytes(bytes[index + 4..index + 8].try_into().unwrap());
        assert_eq!(stored_key, offsets.key_offset);
        assert_eq!(stored_value, offsets.value_offset);

        let key_at = (layout.key_pool_offset + offsets.key_offset) as usize;
        let key_end = key_at + entry.key.len();
        assert_eq!(&bytes[key_at..key_end], entry.key.as_bytes());
        assert_eq!(bytes[key_end], 0);

        let value_at = (layout.value_pool_offset + offsets.value_offset) as usize;
        let value_end = value_at + 2 + entry.value.len();
        assert_eq!(&bytes[value_at..value_at + 2], &[1, 0]);
        assert_eq!(&bytes[value_at + 2..value_end], entry.value.as_bytes());
        assert_eq!(bytes[value_end], 0);
    }
}

#[test]
fn test_empty_table() {
    let bytes = serialize_lang(&LangFile::new()).unwrap();
    let header = parse_lang_header(&bytes).unwrap();

    assert_eq!(header.entry_count, 0);
    assert_eq!(header.header_size, 32);
    assert_eq!(header.key_pool_offset, 32);
    assert_eq!(header.value_pool_offset, 32);
    assert!(parse_lang_bytes(&bytes).unwrap().is_empty());
}

#[test]
fn test_unknown_endian_marker() {
    let mut bytes = serialize_lang(&sample_table()).unwrap();
    bytes[8..12].copy_from_slice(&0xDEAD_BEEF_u32.to_le_bytes());

    let result = parse_lang_bytes(&bytes);
    assert!(matches!(result, Err(Error::UnknownEndianMarker(0xDEAD_BEEF))));
}

#[test]
fn test_truncated_table() {
    let bytes = serialize_lang(&sample_table()).unwrap();
    for len in [0, 16, 40, bytes.len() - 1] {
        let err = parse_lang_bytes(&bytes[..len]).unwrap_err();
        assert!(
            matches!(err, Error::TruncatedStream { .. } | Error::InvalidOffset { .. }),
            "length {len}: {err}"
        );
    }
}

#[test]
fn test_lang_file_write_and_read() {
    init_logging();
    let dir = tempdir().unwrap();
    let path = dir.path().join("strings.lng");

    let lang = sample_table();
    write_lang(&path, &lang).unwrap();
    let read = read_lang(&path).unwrap();
    assert_eq!(read, lang);

    // Overwriting replaces the whole file
    let mut smaller = LangFile::new();
    smaller.insert("only", "one");
    write_lang(&path, &smaller).unwrap();
    assert_eq!(read_lang(&path).unwrap(), smaller);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_lang_stream_helpers() {
    let lang = sample_table();
    let mut out = vec![0xAA; 3];
    write_lang_to(&mut out, &lang).unwrap();

    // The header does not have to sit at position zero of the stream
    let mut reader = &out[3..];
    assert_eq!(read_lang_from(&mut reader).unwrap(), lang);
}

#[test]
fn test_subp_round_trip() {
    init_logging();
    let entry = SubpEntry::new(0x0001_E240, 3)
        .with_line("Hello", SubpTiming { start: 0, end: 120 })
        .with_line("World", SubpTiming { start: 120, end: 300 });

    let options = SubpOptions::new();
    let mut bytes = Vec::new();
    entry.write(&mut bytes, &options).unwrap();

    let read = SubpEntry::read_with_id(&mut &bytes[..], entry.subtitle_id, &options).unwrap();
    assert_eq!(read.subtitle_id, 0x0001_E240);
    assert_eq!(read.priority, 3);
    assert_eq!(read.texts().collect::<Vec<_>>(), vec!["Hello", "World"]);
    assert_eq!(read, entry);
}

#[test]
fn test_subp_multibyte_encodings() {
    let entry = SubpEntry::new(7, 1)
        .with_line("待たせたな", SubpTiming { start: 10, end: 50 })
        .with_line("", SubpTiming { start: 50, end: 60 })
        .with_line("…蛇", SubpTiming { start: 60, end: 90 });

    for label in ["shift_jis", "utf-16le", "utf-16be", "utf-8"] {
        let options = SubpOptions::for_label(label).unwrap();
        let bytes = entry.to_bytes(&options).unwrap();
        let read = SubpEntry::read_with_id(&mut &bytes[..], 7, &options).unwrap();
        assert_eq!(read, entry, "encoding {label}");
    }
}

#[test]
fn test_subp_container_indices() {
    let options = SubpOptions::new();
    let timing = SubpTiming { start: 0, end: 30 };
    let entries: Vec<SubpEntry> = (0..4)
        .map(|i| SubpEntry::new(100 + i, 0).with_line(format!("line {i}"), timing))
        .collect();

    let mut stream = std::io::Cursor::new(Vec::new());
    let indices = write_subp_entries(&mut stream, &entries, &options).unwrap();
    let data = stream.into_inner();

    for (index, entry) in indices.iter().zip(&entries) {
        let read = SubpEntry::read_with_id(
            &mut &data[index.offset as usize..],
            index.subtitle_id,
            &options,
        )
        .unwrap();
        assert_eq!(&read, entry);
    }
}

#[test]
fn test_models_serialize() {
    let entry = SubpEntry::new(5, 2).with_line("Hi", SubpTiming { start: 1, end: 2 });
    let json = serde_json::to_string(&entry).unwrap();
    let back: SubpEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);

    let json = serde_json::to_value(sample_table()).unwrap();
    assert_eq!(json["endianness"], "LittleEndian");
    assert_eq!(json["entries"][0]["key"], "menu_start");
}

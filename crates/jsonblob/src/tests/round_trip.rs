use std::io::Read;

use quickcheck_macros::quickcheck;
use rstest::rstest;

use super::{ChunkedReader, drain_in_chunks};
use crate::{JsonReader, JsonWriter};

#[test]
fn a_written_document_reads_back_field_for_field() {
    let mut out = Vec::new();
    let mut writer = JsonWriter::new(&mut out);
    writer.write_object_start().unwrap();
    writer.write_i32("id", Some(42)).unwrap();
    writer.write_i32("count", None).unwrap();
    writer.write_string("name", Some("report.bin")).unwrap();
    writer.write_string("note", None).unwrap();
    writer
        .write_stream("data", Some(&mut &b"binary blob payload!"[..]))
        .unwrap();
    let mut meta = writer.write_object("meta").unwrap();
    meta.write_object_start().unwrap();
    meta.write_i32("x", Some(1)).unwrap();
    meta.write_string("y", Some("z")).unwrap();
    meta.write_object_end().unwrap();
    drop(meta);
    writer.write_i32("tail", Some(7)).unwrap();
    writer.write_object_end().unwrap();
    writer.flush().unwrap();
    drop(writer);

    let mut reader = JsonReader::new(&out[..]);
    assert_eq!(reader.read_i32("id").unwrap(), Some(42));
    assert_eq!(reader.read_i32("count").unwrap(), None);
    assert_eq!(
        reader.read_string("name").unwrap().as_deref(),
        Some("report.bin")
    );
    assert_eq!(reader.read_string("note").unwrap(), None);
    let mut data = Vec::new();
    reader
        .read_stream("data")
        .unwrap()
        .unwrap()
        .read_to_end(&mut data)
        .unwrap();
    assert_eq!(data, b"binary blob payload!");
    let mut meta = reader.read_object("meta").unwrap();
    assert_eq!(meta.read_i32("x").unwrap(), Some(1));
    assert_eq!(meta.read_string("y").unwrap().as_deref(), Some("z"));
    meta.close().unwrap();
    assert_eq!(reader.read_i32("tail").unwrap(), Some(7));
    reader.close().unwrap();
}

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(2, 3)]
#[case(3, 4)]
#[case(4, 2)]
#[case(5, 5)]
#[case(63, 7)]
#[case(64, 3)]
#[case(65, 1)]
fn payloads_survive_the_round_trip(#[case] len: usize, #[case] read_chunk: usize) {
    let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();

    let mut out = Vec::new();
    let mut writer = JsonWriter::new(&mut out);
    writer.write_object_start().unwrap();
    writer
        .write_stream("data", Some(&mut ChunkedReader::new(payload.clone(), 2)))
        .unwrap();
    writer.write_object_end().unwrap();
    drop(writer);

    let mut reader = JsonReader::new(&out[..]);
    let mut stream = reader.read_stream("data").unwrap().unwrap();
    let decoded = drain_in_chunks(&mut stream, read_chunk).unwrap();
    assert_eq!(decoded, payload);
}

#[quickcheck]
fn any_payload_survives_the_round_trip(data: Vec<u8>, read_chunk: u8, write_chunk: u8) -> bool {
    let read_chunk = usize::from(read_chunk % 7) + 1;
    let write_chunk = usize::from(write_chunk % 7) + 1;

    let mut out = Vec::new();
    let mut writer = JsonWriter::new(&mut out);
    writer.write_object_start().unwrap();
    writer.write_i32("len", Some(i32::try_from(data.len()).unwrap())).unwrap();
    writer
        .write_stream("data", Some(&mut ChunkedReader::new(data.clone(), write_chunk)))
        .unwrap();
    writer.write_object_end().unwrap();
    drop(writer);

    let mut reader = JsonReader::new(&out[..]);
    let len = reader.read_i32("len").unwrap();
    let mut stream = reader.read_stream("data").unwrap().unwrap();
    let decoded = drain_in_chunks(&mut stream, read_chunk).unwrap();
    drop(stream);
    reader.close().unwrap();

    len == Some(i32::try_from(data.len()).unwrap()) && decoded == data
}

mod common;

use common::*;
use proptest::collection::vec;
use proptest::prelude::*;
use std::io::{Cursor, Read};
use web_socket_reader::*;

fn read_message<R: Read>(reader: &mut Reader<R>) -> Result<(Vec<u8>, usize)> {
    let mut data = vec![];
    let mut buf = [0; 13];
    let mut calls = 0;
    loop {
        calls += 1;
        let chunk = reader.read(&mut buf)?;
        data.extend_from_slice(&buf[..chunk.amt]);
        if chunk.done {
            return Ok((data, calls));
        }
    }
}

proptest! {
    #[test]
    fn masked_payload_is_unmasked(keys in any::<[u8; 4]>(), data in vec(any::<u8>(), 0..600)) {
        let mut reader = Reader::server(Cursor::new(masked(true, BINARY, keys, &data)));
        let header = reader.next_frame().unwrap();
        prop_assert_eq!(header.mask, Some(keys));
        prop_assert_eq!(read_message(&mut reader).unwrap().0, data);
    }

    #[test]
    fn masking_twice_is_identity(keys in any::<[u8; 4]>(), data in vec(any::<u8>(), 0..256), split in 0usize..256) {
        let mut buf = data.clone();
        apply_mask(&mut buf, keys);

        let split = split.min(buf.len());
        let (head, tail) = buf.split_at_mut(split);
        let mut mask = Mask::from(keys);
        mask.apply(head);
        mask.apply(tail);
        prop_assert_eq!(buf, data);
    }

    #[test]
    fn length_form_is_transparent(data in vec(any::<u8>(), 0..126)) {
        let len = data.len() as u64;
        let mut short = vec![0x82, len as u8];
        short.extend_from_slice(&data);
        let mut medium = vec![0x82, 126];
        medium.extend_from_slice(&(len as u16).to_be_bytes());
        medium.extend_from_slice(&data);
        let mut long = vec![0x82, 127];
        long.extend_from_slice(&len.to_be_bytes());
        long.extend_from_slice(&data);

        for bytes in [short, medium, long] {
            let mut reader = Reader::client(Cursor::new(bytes));
            prop_assert_eq!(reader.next_frame().unwrap().len, len);
            prop_assert_eq!(read_message(&mut reader).unwrap().0, data.clone());
        }
    }

    #[test]
    fn fragments_are_reassembled(
        pieces in vec(vec(any::<u8>(), 0..64), 1..6),
        ping_after in 0usize..6,
        step in 1usize..32,
    ) {
        let last = pieces.len() - 1;
        let mut bytes = vec![];
        for (i, piece) in pieces.iter().enumerate() {
            let opcode = if i == 0 { BINARY } else { CONTINUATION };
            encode(&mut bytes, i == last, opcode, None, piece);
            if i == ping_after && i != last {
                encode(&mut bytes, true, PING, None, b"ping");
            }
        }

        let mut reader = Reader::client(Chunked { data: &bytes, step });
        reader.next_frame().unwrap();
        let (data, _) = read_message(&mut reader).unwrap();
        prop_assert_eq!(data, pieces.concat());
        prop_assert!(!reader.is_fragmented());
        prop_assert!(matches!(reader.next_frame(), Err(Error::Eof)));
    }

    #[test]
    fn valid_text_passes_utf8_check(text in ".{0,40}", split in 0usize..160) {
        let bytes = text.as_bytes();
        let split = split.min(bytes.len());
        let mut frames = frame(false, TEXT, &bytes[..split]);
        frames.extend(frame(true, CONTINUATION, &bytes[split..]));

        let config = Config::default().check_utf8(true);
        let mut reader = Reader::with_config(Cursor::new(frames), Role::Client, config);
        reader.next_frame().unwrap();
        let mut out = String::new();
        reader.message().read_to_string(&mut out).unwrap();
        prop_assert_eq!(out, text);
    }

    #[test]
    fn done_is_reported_once(len in 0usize..200) {
        let data = vec![b'x'; len];
        let mut reader = Reader::client(Cursor::new(frame(true, TEXT, &data)));
        reader.next_frame().unwrap();
        let (out, calls) = read_message(&mut reader).unwrap();
        prop_assert_eq!(out.len(), len);
        // 13 byte buffer, one call per chunk, the last one may be full
        prop_assert_eq!(calls, len.div_ceil(13).max(1));
    }
}

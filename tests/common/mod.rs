#![allow(dead_code)]

use std::io::{self, Read};

pub const TEXT: u8 = 1;
pub const BINARY: u8 = 2;
pub const CLOSE: u8 = 8;
pub const PING: u8 = 9;
pub const PONG: u8 = 10;
pub const CONTINUATION: u8 = 0;

/// Appends one frame to `writer`, using the shortest length form.
pub fn encode(writer: &mut Vec<u8>, fin: bool, opcode: u8, mask: Option<[u8; 4]>, data: &[u8]) {
    encode_with_len(writer, fin, opcode, mask, data, data.len() as u64);
}

/// Like [`encode`], but `len` is what the header claims.
pub fn encode_with_len(
    writer: &mut Vec<u8>,
    fin: bool,
    opcode: u8,
    mask: Option<[u8; 4]>,
    data: &[u8],
    len: u64,
) {
    let mask_bit = if mask.is_some() { 0x80 } else { 0 };
    writer.push(((fin as u8) << 7) | opcode);
    if len < 126 {
        writer.push(mask_bit | len as u8);
    } else if len < 65536 {
        writer.push(mask_bit | 126);
        writer.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        writer.push(mask_bit | 127);
        writer.extend_from_slice(&len.to_be_bytes());
    }
    match mask {
        Some(keys) => {
            writer.extend_from_slice(&keys);
            writer.extend(data.iter().enumerate().map(|(i, byte)| byte ^ keys[i % 4]));
        }
        None => writer.extend_from_slice(data),
    }
}

/// Single unmasked frame, as a server sends it.
pub fn frame(fin: bool, opcode: u8, data: &[u8]) -> Vec<u8> {
    let mut bytes = vec![];
    encode(&mut bytes, fin, opcode, None, data);
    bytes
}

/// Single masked frame, as a client sends it.
pub fn masked(fin: bool, opcode: u8, keys: [u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = vec![];
    encode(&mut bytes, fin, opcode, Some(keys), data);
    bytes
}

/// Source that hands out at most `step` bytes per read.
pub struct Chunked<'a> {
    pub data: &'a [u8],
    pub step: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let amt = buf.len().min(self.step).min(self.data.len());
        buf[..amt].copy_from_slice(&self.data[..amt]);
        self.data = &self.data[amt..];
        Ok(amt)
    }
}

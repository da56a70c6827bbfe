use crate::*;
use std::io::Read;

/// Largest possible frame header: 2 fixed bytes, 8 bytes of extended length and a 4 byte masking key.
pub const MAX_HEADER_SIZE: usize = 14;

/// Control frames MUST have a payload length of 125 bytes or less.
pub const MAX_CONTROL_PAYLOAD: u64 = 125;

/// ### WebSocket Frame Header
///
/// ```txt
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-------+-+-------------+-------------------------------+
/// |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
/// |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
/// |N|V|V|V|       |S|             |   (if payload len==126/127)   |
/// | |1|2|3|       |K|             |                               |
/// +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
/// |     Extended payload length continued, if payload len == 127  |
/// + - - - - - - - - - - - - - - - +-------------------------------+
/// |                               |Masking-key, if MASK set to 1  |
/// +-------------------------------+-------------------------------+
/// | Masking-key (continued)       |          Payload Data         |
/// +-------------------------------- - - - - - - - - - - - - - - - +
/// :                     Payload Data continued ...                :
/// + - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - +
/// |                     Payload Data continued ...                |
/// +---------------------------------------------------------------+
/// ```
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Header {
    /// Indicates that this is the final fragment in a message.  The first
    /// fragment MAY also be the final fragment.
    pub fin: bool,

    /// MUST be `0` unless an extension is negotiated that defines meanings
    /// for non-zero values.  If a nonzero value is received and none of
    /// the negotiated extensions defines the meaning of such a nonzero
    /// value, the receiving endpoint MUST _Fail the WebSocket Connection_.
    pub rsv: Rsv,

    pub opcode: OpCode,

    /// Length of the "Payload data" in bytes.
    pub len: u64,

    /// Masking key, present iff the MASK bit is set.
    ///
    /// A client MUST mask all frames that it sends to the server.
    /// A server MUST NOT mask any frames that it sends to the client.
    pub mask: Option<[u8; 4]>,
}

impl Header {
    #[inline]
    pub fn is_masked(&self) -> bool {
        self.mask.is_some()
    }

    /// Reads exactly one frame header from `reader`.
    ///
    /// Two reads are issued: the 2 fixed bytes, then everything the second
    /// byte says follows (extended length, then masking key) in one go.
    ///
    /// A source that ends before the first byte yields [`Error::Eof`], ending
    /// anywhere later yields [`Error::UnexpectedEof`].
    pub fn decode<R>(reader: &mut R) -> Result<Self>
    where
        R: Read + ?Sized,
    {
        let mut buf = [0; MAX_HEADER_SIZE - 2];

        read_full(reader, &mut buf[..2])?;
        let [b1, b2] = [buf[0], buf[1]];

        let fin = b1 & 0b_1000_0000 != 0;
        let rsv = Rsv((b1 & 0b_111_0000) >> 4);
        let opcode = OpCode::from(b1 & 0b_1111);
        let is_masked = b2 & 0b_1000_0000 != 0;
        let len = b2 & 0b_111_1111;

        let mut extra = if is_masked { 4 } else { 0 };
        match len {
            0..=125 => {}
            126 => extra += 2,
            127 => extra += 8,
            _ => return Err(Error::HeaderLengthUnexpected),
        }

        let mut header = Header {
            fin,
            rsv,
            opcode,
            len: len as u64,
            mask: None,
        };
        if extra == 0 {
            return Ok(header);
        }

        // the first 2 bytes are no longer needed, reuse them
        let bytes = &mut buf[..extra];
        read_rest(reader, bytes)?;

        let mut rest: &[u8] = bytes;
        match len {
            126 => {
                let (be, tail) = rest.split_at(2);
                header.len = u16::from_be_bytes([be[0], be[1]]) as u64;
                rest = tail;
            }
            127 => {
                if rest[0] & 0b_1000_0000 != 0 {
                    return Err(Error::HeaderLengthMsb);
                }
                let (be, tail) = rest.split_at(8);
                let mut len = [0; 8];
                len.copy_from_slice(be);
                header.len = u64::from_be_bytes(len);
                rest = tail;
            }
            _ => {}
        }
        if is_masked {
            let mut key = [0; 4];
            key.copy_from_slice(&rest[..4]);
            header.mask = Some(key);
        }
        Ok(header)
    }
}

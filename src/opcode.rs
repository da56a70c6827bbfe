/// Defines the interpretation of the "Payload data".  If an unknown
/// opcode is received, the receiving endpoint MUST _Fail the WebSocket Connection_.
///
/// Decoding never fails: unknown values are kept as [`OpCode::Reserved`] and
/// rejected later by [`check_header`](crate::check_header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    /// The FIN and opcode fields work together to send a message split up into separate frames. This is called message fragmentation.
    ///
    /// ```txt
    /// Client: FIN=1, opcode=0x1, msg="hello"
    /// Server: (process complete message immediately) Hi.
    /// Client: FIN=0, opcode=0x1, msg="and a"
    /// Server: (listening, new message containing text started)
    /// Client: FIN=0, opcode=0x0, msg="happy new"
    /// Server: (listening, payload concatenated to previous message)
    /// Client: FIN=1, opcode=0x0, msg="year!"
    /// Server: (process complete message) Happy new year to you too!
    /// ```
    ///
    /// Control frames MAY be injected in the middle of a fragmented message.
    Continuation,

    Text,
    Binary,

    /// The Close frame MAY contain a body that indicates a reason for closing.
    Close,

    /// A Ping frame may serve either as a keepalive or as a means to verify that the remote endpoint is still responsive.
    Ping,

    /// A Pong frame MAY be sent unsolicited.  This serves as a unidirectional heartbeat.
    Pong,

    /// 3-7 are reserved for further non-control frames, 11-15 for further control frames.
    Reserved(u8),
}

impl OpCode {
    /// Whether the opcode indicates a control frame.
    #[inline]
    pub fn is_control(self) -> bool {
        u8::from(self) >= 8
    }

    /// `Text` or `Binary`, the opcodes a message may start with.
    #[inline]
    pub fn is_data(self) -> bool {
        matches!(self, OpCode::Text | OpCode::Binary)
    }

    #[inline]
    pub fn is_reserved(self) -> bool {
        matches!(self, OpCode::Reserved(_))
    }
}

impl From<u8> for OpCode {
    #[inline]
    fn from(value: u8) -> Self {
        match value & 0b_1111 {
            0 => OpCode::Continuation,
            1 => OpCode::Text,
            2 => OpCode::Binary,
            8 => OpCode::Close,
            9 => OpCode::Ping,
            10 => OpCode::Pong,
            code => OpCode::Reserved(code),
        }
    }
}

impl From<OpCode> for u8 {
    #[inline]
    fn from(opcode: OpCode) -> Self {
        match opcode {
            OpCode::Continuation => 0,
            OpCode::Text => 1,
            OpCode::Binary => 2,
            OpCode::Close => 8,
            OpCode::Ping => 9,
            OpCode::Pong => 10,
            OpCode::Reserved(code) => code,
        }
    }
}

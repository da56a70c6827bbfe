use std::io::{self, ErrorKind};
use thiserror::Error;

pub type DynErr = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while reading frames and messages.
#[derive(Debug, Error)]
pub enum Error {
    /// [`Reader::read`](crate::Reader::read) was called without a preceding
    /// [`Reader::next_frame`](crate::Reader::next_frame).
    #[error("no frame advance")]
    NoFrameAdvance,

    /// Declared frame length exceeds [`Config::max_frame_size`](crate::Config::max_frame_size).
    #[error("frame too large: {len} > {max}")]
    FrameTooLarge { len: u64, max: u64 },

    #[error("unexpected payload length bits")]
    HeaderLengthUnexpected,

    /// 64-bit payload length with its most significant bit set.
    #[error("payload length most significant bit must be `0`")]
    HeaderLengthMsb,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Source ended cleanly at a frame boundary.
    #[error("end of stream")]
    Eof,

    /// Source ended inside a frame or inside a fragmented message.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// Text message is not valid UTF-8. `accepted` is the length of its valid prefix.
    #[error("invalid utf-8 sequence after {accepted} bytes")]
    InvalidUtf8 { accepted: usize },

    #[error("message exceeds read limit of {limit} bytes")]
    MessageTooLarge { limit: usize },

    #[error("extension rejected frame: {0}")]
    Extension(DynErr),

    #[error("frame handler failed: {0}")]
    Handler(DynErr),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Header violates RFC6455 for the current connection state.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown opcode")]
    OpCodeReserved,
    #[error("control frame must have a payload length of 125 bytes or less")]
    ControlPayloadOverflow,
    #[error("control frame must not be fragmented")]
    ControlNotFinal,
    #[error("reserve bit must be `0`")]
    NonZeroRsv,
    #[error("expected masked frame")]
    MaskRequired,
    #[error("expected unmasked frame")]
    MaskUnexpected,
    #[error("expected continuation frame")]
    ContinuationExpected,
    #[error("unexpected continuation frame")]
    ContinuationUnexpected,
}

impl Error {
    /// Peer closed the source at a frame boundary, no data was lost.
    pub fn is_clean_close(&self) -> bool {
        matches!(self, Error::Eof)
    }

    /// Whether the connection can no longer be read from.
    ///
    /// `NoFrameAdvance` is a caller mistake and `InvalidUtf8` leaves the
    /// decision to the caller, everything else is fatal.
    pub fn should_disconnect(&self) -> bool {
        !matches!(self, Error::NoFrameAdvance | Error::InvalidUtf8 { .. })
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match error {
            Error::Io(err) => return err,
            Error::Eof | Error::UnexpectedEof => ErrorKind::UnexpectedEof,
            Error::FrameTooLarge { .. }
            | Error::HeaderLengthUnexpected
            | Error::HeaderLengthMsb
            | Error::Protocol(_)
            | Error::InvalidUtf8 { .. }
            | Error::MessageTooLarge { .. }
            | Error::Extension(_) => ErrorKind::InvalidData,
            Error::NoFrameAdvance | Error::Handler(_) => ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_conversion_keeps_kind() {
        let err: io::Error = Error::UnexpectedEof.into();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let err: io::Error = Error::Protocol(ProtocolError::MaskRequired).into();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "expected masked frame");

        let err: io::Error = Error::Io(io::Error::new(ErrorKind::ConnectionReset, "reset")).into();
        assert_eq!(err.kind(), ErrorKind::ConnectionReset);
    }

    #[test]
    fn classification() {
        assert!(Error::Eof.is_clean_close());
        assert!(!Error::UnexpectedEof.is_clean_close());
        assert!(!Error::NoFrameAdvance.should_disconnect());
        assert!(Error::FrameTooLarge { len: 10, max: 5 }.should_disconnect());
    }
}

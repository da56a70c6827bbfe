use crate::*;

/// Check that `header` is RFC6455 compliant for a reader in `state`.
pub fn check_header(header: &Header, state: State) -> Result<(), ProtocolError> {
    // 3-7 are reserved for further non-control frames, 11-15 for further control frames.
    if header.opcode.is_reserved() {
        return Err(ProtocolError::OpCodeReserved);
    }
    if header.opcode.is_control() {
        if header.len > MAX_CONTROL_PAYLOAD {
            return Err(ProtocolError::ControlPayloadOverflow);
        }
        if !header.fin {
            return Err(ProtocolError::ControlNotFinal);
        }
    }
    match state.role() {
        // MUST be `0` unless an extension is negotiated that defines meanings
        // for non-zero values.
        _ if !header.rsv.is_empty() && !state.is_extended() => Err(ProtocolError::NonZeroRsv),
        // The server MUST close the connection upon receiving a frame that is not masked.
        Role::Server if !header.is_masked() => Err(ProtocolError::MaskRequired),
        // A client MUST close a connection if it detects a masked frame.
        Role::Client if header.is_masked() => Err(ProtocolError::MaskUnexpected),
        // Control frames MAY be injected in the middle of a fragmented message,
        // data frames MUST NOT.
        _ if state.is_fragmented()
            && !header.opcode.is_control()
            && header.opcode != OpCode::Continuation =>
        {
            Err(ProtocolError::ContinuationExpected)
        }
        _ if !state.is_fragmented() && header.opcode == OpCode::Continuation => {
            Err(ProtocolError::ContinuationUnexpected)
        }
        _ => Ok(()),
    }
}

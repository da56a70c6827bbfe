use crate::*;

/// Receive side of a negotiated extension.
///
/// Called for every frame after header validation, in registration order.
/// An extension clears the reserved bits it owns and may reject the frame.
pub trait RecvExtension: Send + Sync {
    fn unset_bits(&mut self, header: Header) -> Result<Header, DynErr>;
}

impl<F> RecvExtension for F
where
    F: FnMut(Header) -> Result<Header, DynErr> + Send + Sync,
{
    fn unset_bits(&mut self, header: Header) -> Result<Header, DynErr> {
        self(header)
    }
}

/// Extension that owns a fixed set of reserved bits and clears them.
///
/// `permessage-deflate` for example owns `RSV1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedBits(pub Rsv);

impl RecvExtension for OwnedBits {
    fn unset_bits(&mut self, mut header: Header) -> Result<Header, DynErr> {
        header.rsv = header.rsv.without(self.0);
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(rsv: u8) -> Header {
        Header {
            fin: true,
            rsv: Rsv(rsv),
            opcode: OpCode::Text,
            len: 0,
            mask: None,
        }
    }

    #[test]
    fn owned_bits_are_cleared() {
        let mut ext = OwnedBits(Rsv::RSV1);
        assert_eq!(ext.unset_bits(header(0b110)).unwrap().rsv, Rsv::RSV2);
        assert_eq!(ext.unset_bits(header(0)).unwrap().rsv, Rsv(0));
    }

    #[test]
    fn closures_are_extensions() {
        let mut seen = 0;
        let mut ext = |header: Header| -> Result<Header, DynErr> {
            seen += 1;
            if header.rsv.rsv3() {
                return Err("rsv3 is not negotiated".into());
            }
            Ok(header)
        };
        assert!(ext.unset_bits(header(0b001)).is_err());
        assert!(ext.unset_bits(header(0)).is_ok());
        drop(ext);
        assert_eq!(seen, 2);
    }
}

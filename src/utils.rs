use crate::*;
use std::io::{ErrorKind, Read};

/// Fill `buf` completely.
///
/// Fails with [`Error::Eof`] if the source ended before the first byte and
/// with [`Error::UnexpectedEof`] if it ended part way.
pub(crate) fn read_full<R>(reader: &mut R, buf: &mut [u8]) -> Result<()>
where
    R: Read + ?Sized,
{
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Err(Error::Eof),
            Ok(0) => return Err(Error::UnexpectedEof),
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Same as [`read_full`], for buffers whose first byte is not a frame boundary.
#[inline]
pub(crate) fn read_rest<R>(reader: &mut R, buf: &mut [u8]) -> Result<()>
where
    R: Read + ?Sized,
{
    read_full(reader, buf).map_err(|err| match err {
        Error::Eof => Error::UnexpectedEof,
        err => err,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match (self.0.split_first(), buf.first_mut()) {
                (Some((&byte, rest)), Some(slot)) => {
                    *slot = byte;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn fills_across_short_reads() {
        let mut buf = [0; 3];
        read_full(&mut Trickle(b"abcd"), &mut buf).unwrap();
        assert_eq!(&buf, b"abc");
    }

    #[test]
    fn distinguishes_clean_and_partial_end() {
        let mut buf = [0; 2];
        assert!(matches!(read_full(&mut Trickle(b""), &mut buf), Err(Error::Eof)));
        assert!(matches!(
            read_full(&mut Trickle(b"a"), &mut buf),
            Err(Error::UnexpectedEof)
        ));
        assert!(matches!(
            read_rest(&mut Trickle(b""), &mut buf),
            Err(Error::UnexpectedEof)
        ));
    }
}

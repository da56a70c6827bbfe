use crate::*;
use std::str;

/// Incremental UTF-8 validation of a text payload.
///
/// Bytes can be fed in arbitrary pieces, a sequence split between two
/// pieces is held back until it is complete.
#[derive(Debug, Default, Clone)]
pub struct Utf8Validator {
    partial: [u8; 4],
    partial_len: usize,
    accepted: usize,
    rejected: bool,
}

impl Utf8Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the next piece of the payload.
    ///
    /// Fails with [`Error::InvalidUtf8`] as soon as a byte can not be part of
    /// any valid sequence, and keeps failing until [`reset`](Self::reset).
    pub fn feed(&mut self, mut bytes: &[u8]) -> Result<()> {
        if self.rejected {
            return Err(self.invalid());
        }
        while self.partial_len > 0 {
            let Some((&byte, rest)) = bytes.split_first() else {
                return Ok(());
            };
            bytes = rest;
            self.partial[self.partial_len] = byte;
            self.partial_len += 1;
            match str::from_utf8(&self.partial[..self.partial_len]) {
                Ok(_) => {
                    self.accepted += self.partial_len;
                    self.partial_len = 0;
                }
                Err(err) if err.error_len().is_none() => {}
                Err(_) => return Err(self.reject()),
            }
        }
        match str::from_utf8(bytes) {
            Ok(_) => self.accepted += bytes.len(),
            Err(err) => {
                self.accepted += err.valid_up_to();
                if err.error_len().is_some() {
                    return Err(self.reject());
                }
                let tail = &bytes[err.valid_up_to()..];
                self.partial[..tail.len()].copy_from_slice(tail);
                self.partial_len = tail.len();
            }
        }
        Ok(())
    }

    /// Everything fed so far is valid and no sequence is left incomplete.
    pub fn valid(&self) -> bool {
        !self.rejected && self.partial_len == 0
    }

    /// Number of bytes that form complete, valid sequences.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn invalid(&self) -> Error {
        Error::InvalidUtf8 {
            accepted: self.accepted,
        }
    }

    fn reject(&mut self) -> Error {
        self.rejected = true;
        self.partial_len = 0;
        self.invalid()
    }
}

/// Masking key together with the position reached in the payload.
///
/// Unmasking is XOR with the key cycling per byte, so the position must
/// survive across reads of the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    index: usize,
    pub keys: [u8; 4],
}

impl Mask {
    /// XOR `data` in place, continuing from the current position.
    #[inline]
    pub fn apply(&mut self, data: &mut [u8]) {
        data.iter_mut()
            .zip(self)
            .for_each(|(byte, key)| *byte ^= key);
    }

    /// Rewind to the first key byte, optionally switching key.
    pub fn reset(&mut self, keys: [u8; 4]) {
        self.index = 0;
        self.keys = keys;
    }
}

impl From<[u8; 4]> for Mask {
    fn from(keys: [u8; 4]) -> Self {
        Self { index: 0, keys }
    }
}

impl Iterator for Mask {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys[self.index];
        self.index = (self.index + 1) & 3;
        Some(key)
    }
}

/// Mask or unmask a whole payload with `keys`.
#[inline]
pub fn apply_mask(data: &mut [u8], keys: [u8; 4]) {
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= keys[i & 3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [u8; 4] = [55, 250, 33, 61];
    const MASKED: [u8; 5] = [0x7f, 0x9f, 0x4d, 0x51, 0x58];

    #[test]
    fn unmask_hello() {
        let mut data = MASKED;
        apply_mask(&mut data, KEYS);
        assert_eq!(&data, b"Hello");
    }

    #[test]
    fn position_survives_split_reads() {
        let mut data = MASKED;
        let mut mask = Mask::from(KEYS);
        let (head, tail) = data.split_at_mut(3);
        mask.apply(head);
        mask.apply(tail);
        assert_eq!(&data, b"Hello");
    }

    #[test]
    fn reset_rewinds() {
        let mut mask = Mask::from(KEYS);
        mask.apply(&mut [0; 3]);
        mask.reset(KEYS);
        let mut data = MASKED;
        mask.apply(&mut data);
        assert_eq!(&data, b"Hello");
    }
}

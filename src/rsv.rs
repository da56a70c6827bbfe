/// Rsv are used for extensions.
///
/// Holds the three reserved bits of the first header byte, shifted down so
/// that `rsv1` is `0b100` and `rsv3` is `0b001`.
#[derive(Default, Eq, PartialEq, Clone, Copy, Hash)]
pub struct Rsv(pub u8);

impl Rsv {
    pub const RSV1: Rsv = Rsv(0b100);
    pub const RSV2: Rsv = Rsv(0b010);
    pub const RSV3: Rsv = Rsv(0b001);

    /// The first bit of the RSV field.
    pub fn rsv1(&self) -> bool {
        self.0 & Self::RSV1.0 != 0
    }

    /// The second bit of the RSV field.
    pub fn rsv2(&self) -> bool {
        self.0 & Self::RSV2.0 != 0
    }

    /// The third bit of the RSV field.
    pub fn rsv3(&self) -> bool {
        self.0 & Self::RSV3.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 & 0b111 == 0
    }

    /// Copy of `self` with every bit set in `bits` cleared.
    pub fn without(self, bits: Rsv) -> Rsv {
        Rsv(self.0 & !bits.0 & 0b111)
    }
}

impl std::fmt::Debug for Rsv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#05b}", self.0 & 0b111)
    }
}

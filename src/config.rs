use crate::*;

/// Options recognised by [`Reader`].
#[derive(Default)]
pub struct Config {
    /// Skip the RFC6455 compliance checks of [`check_header`].
    pub skip_header_check: bool,

    /// Validate text messages as UTF-8 while they are read.
    ///
    /// Default: `false`
    pub check_utf8: bool,

    /// Reject frames whose declared payload length exceeds this many bytes.
    ///
    /// Default: `0` (no limit)
    pub max_frame_size: u64,

    /// Negotiated extensions, applied to every header in order.
    ///
    /// Any extension makes the reader tolerate non-zero reserved bits.
    pub extensions: Vec<Box<dyn RecvExtension>>,
}

impl Config {
    pub fn check_utf8(mut self, check_utf8: bool) -> Self {
        self.check_utf8 = check_utf8;
        self
    }

    pub fn skip_header_check(mut self, skip: bool) -> Self {
        self.skip_header_check = skip;
        self
    }

    pub fn max_frame_size(mut self, max: u64) -> Self {
        self.max_frame_size = max;
        self
    }

    pub fn extension(mut self, ext: impl RecvExtension + 'static) -> Self {
        self.extensions.push(Box::new(ext));
        self
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("skip_header_check", &self.skip_header_check)
            .field("check_utf8", &self.check_utf8)
            .field("max_frame_size", &self.max_frame_size)
            .field("extensions", &self.extensions.len())
            .finish()
    }
}

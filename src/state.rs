/// Side of the connection the reader is decoding frames for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Reads frames sent by a server, which MUST NOT be masked.
    Client,
    /// Reads frames sent by a client, which MUST be masked.
    Server,
}

impl Role {
    /// Whether frames received on this side must carry a masking key.
    #[inline]
    pub const fn expects_masked(self) -> bool {
        matches!(self, Role::Server)
    }
}

/// Per connection read state, consulted by [`check_header`](crate::check_header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    role: Role,
    extended: bool,
    fragmented: bool,
}

impl State {
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            extended: false,
            fragmented: false,
        }
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Extensions were negotiated, so reserved bits may be non-zero.
    #[inline]
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// `true` strictly between the first frame of a multi-frame message and its final frame.
    #[inline]
    pub fn is_fragmented(&self) -> bool {
        self.fragmented
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    pub fn with_fragmented(mut self, fragmented: bool) -> Self {
        self.fragmented = fragmented;
        self
    }

    pub(crate) fn set_fragmented(&mut self, fragmented: bool) {
        self.fragmented = fragmented;
    }
}

impl From<Role> for State {
    fn from(role: Role) -> Self {
        State::new(role)
    }
}

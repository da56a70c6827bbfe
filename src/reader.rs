use crate::*;
use std::io::{self, ErrorKind, Read};
use tracing::{debug, trace};

pub type HandlerResult = std::result::Result<(), DynErr>;

/// Callback receiving a frame header and its already unmasked payload.
pub type FrameHandler = Box<dyn FnMut(&Header, &mut dyn Read) -> HandlerResult + Send + Sync>;

/// Outcome of a successful [`Reader::read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Bytes written to the buffer.
    pub amt: usize,
    /// The whole message has been read, the reader is ready for the next [`Reader::next_frame`].
    pub done: bool,
}

impl Chunk {
    fn partial(amt: usize) -> Self {
        Self { amt, done: false }
    }

    fn last(amt: usize) -> Self {
        Self { amt, done: true }
    }
}

/// Payload bytes of the current frame that are still in the source.
#[derive(Debug, Default)]
struct Cursor {
    remaining: u64,
    mask: Option<Mask>,
}

/// Stages applied on top of the raw frame bytes, besides unmasking.
#[derive(Debug, Clone, Copy)]
struct Layers {
    utf8: bool,
}

/// Streaming reader of webSocket frames and messages.
///
/// Reads payload of incoming frames, takes care of fragmented messages and of
/// control frames injected between their fragments.
///
/// Not meant to be shared: every call must be made by the task owning the connection.
pub struct Reader<R> {
    /// Underlying byte stream, positioned at a frame boundary between messages.
    pub source: R,

    pub config: Config,

    on_continuation: Option<FrameHandler>,
    on_intermediate: Option<FrameHandler>,

    state: State,
    message: Option<OpCode>,
    frame: Cursor,
    stream: Option<Layers>,
    utf8: Utf8Validator,
}

impl<R> Reader<R> {
    /// Create a reader that decodes frames received on the `role` side.
    #[inline]
    pub fn new(source: R, role: Role) -> Self {
        Self::with_config(source, role, Config::default())
    }

    /// Reader of frames sent by a server.
    #[inline]
    pub fn client(source: R) -> Self {
        Self::new(source, Role::Client)
    }

    /// Reader of frames sent by a client.
    #[inline]
    pub fn server(source: R) -> Self {
        Self::new(source, Role::Server)
    }

    pub fn with_config(source: R, role: Role, config: Config) -> Self {
        Self {
            source,
            config,
            on_continuation: None,
            on_intermediate: None,
            state: State::new(role),
            message: None,
            frame: Cursor::default(),
            stream: None,
            utf8: Utf8Validator::default(),
        }
    }

    /// Called from [`next_frame`](Self::next_frame) with every continuation
    /// frame and its payload, before the frame is exposed for reading.
    ///
    /// An error aborts the `next_frame` call.
    pub fn on_continuation<F>(&mut self, handler: F)
    where
        F: FnMut(&Header, &mut dyn Read) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_continuation = Some(Box::new(handler));
    }

    /// Called with every control frame that arrives between the fragments of a message.
    ///
    /// Whatever the handler leaves unread is discarded afterwards, those
    /// frames are never exposed through [`read`](Self::read).
    pub fn on_intermediate<F>(&mut self, handler: F)
    where
        F: FnMut(&Header, &mut dyn Read) -> HandlerResult + Send + Sync + 'static,
    {
        self.on_intermediate = Some(Box::new(handler));
    }

    pub fn state(&self) -> State {
        self.state.with_extended(!self.config.extensions.is_empty())
    }

    #[inline]
    pub fn is_fragmented(&self) -> bool {
        self.state.is_fragmented()
    }

    /// Opcode of the message currently being read.
    pub fn message_opcode(&self) -> Option<OpCode> {
        self.message
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Forget the finished frame but keep message level state.
    fn reset_fragment(&mut self) {
        self.frame = Cursor::default();
        self.stream = None;
    }

    fn reset(&mut self) {
        self.reset_fragment();
        self.utf8.reset();
        self.message = None;
        self.state.set_fragmented(false);
    }
}

impl<R: Read> Reader<R> {
    /// Reads the next frame header and prepares its payload for reading.
    ///
    /// Must be called once the previous frame was read or discarded.
    /// Control frames arriving in the middle of a fragmented message are
    /// handed to [`on_intermediate`](Self::on_intermediate) and skipped.
    pub fn next_frame(&mut self) -> Result<Header> {
        let mut header = match Header::decode(&mut self.source) {
            // a fragmented message was left incomplete
            Err(Error::Eof) if self.state.is_fragmented() => return Err(Error::UnexpectedEof),
            res => res?,
        };
        trace!(
            fin = header.fin,
            opcode = ?header.opcode,
            len = header.len,
            masked = header.is_masked(),
            "frame header"
        );

        if !self.config.skip_header_check {
            if let Err(err) = check_header(&header, self.state()) {
                debug!(%err, ?header, "protocol violation");
                return Err(err.into());
            }
        }

        let max = self.config.max_frame_size;
        if max > 0 && header.len > max {
            debug!(len = header.len, max, "frame too large");
            return Err(Error::FrameTooLarge {
                len: header.len,
                max,
            });
        }

        self.frame = Cursor {
            remaining: header.len,
            mask: header.mask.map(Mask::from),
        };

        for ext in &mut self.config.extensions {
            header = ext.unset_bits(header).map_err(Error::Extension)?;
        }

        if self.state.is_fragmented() {
            if header.opcode.is_control() {
                debug!(opcode = ?header.opcode, len = header.len, "intermediate control frame");
                if let Some(handler) = &mut self.on_intermediate {
                    let mut payload = Payload {
                        source: &mut self.source,
                        frame: &mut self.frame,
                        utf8: None,
                    };
                    handler(&header, &mut payload).map_err(Error::Handler)?;
                }
                self.drain()?;
                return Ok(header);
            }
        } else {
            self.message = Some(header.opcode);
            self.utf8.reset();
        }

        let utf8 = self.config.check_utf8 && self.message == Some(OpCode::Text);
        self.stream = Some(Layers { utf8 });

        let mut res = Ok(());
        if header.opcode == OpCode::Continuation {
            if let Some(handler) = &mut self.on_continuation {
                let mut payload = Payload {
                    source: &mut self.source,
                    frame: &mut self.frame,
                    utf8: utf8.then_some(&mut self.utf8),
                };
                res = handler(&header, &mut payload).map_err(Error::Handler);
            }
        }

        self.state.set_fragmented(!header.fin);
        res.map(|()| header)
    }

    /// Reads payload of the current message into `buf`.
    ///
    /// Frame boundaries of a fragmented message are crossed transparently:
    /// a call that finishes a fragment returns with `done == false` and the
    /// next call moves on to the following frame. A zero length chunk that
    /// is not `done` only means "call again".
    ///
    /// `done` is reported if and only if the whole message was read. A
    /// source that ends before that yields [`Error::UnexpectedEof`].
    ///
    /// Fails with [`Error::NoFrameAdvance`], without touching the source, if
    /// no message was opened with [`next_frame`](Self::next_frame).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<Chunk> {
        let layers = match self.stream {
            Some(layers) => layers,
            None if !self.state.is_fragmented() => return Err(Error::NoFrameAdvance),
            None => {
                // next continuation or intermediate control frame
                self.next_frame()?;
                match self.stream {
                    Some(layers) => layers,
                    None => return Ok(Chunk::partial(0)),
                }
            }
        };
        if buf.is_empty() && self.frame.remaining != 0 {
            return Ok(Chunk::partial(0));
        }

        let amt = Payload {
            source: &mut self.source,
            frame: &mut self.frame,
            utf8: layers.utf8.then_some(&mut self.utf8),
        }
        .read_payload(buf)?;

        if self.frame.remaining != 0 {
            if amt == 0 {
                return Err(Error::UnexpectedEof);
            }
            return Ok(Chunk::partial(amt));
        }
        if self.state.is_fragmented() {
            self.reset_fragment();
            return Ok(Chunk::partial(amt));
        }
        // partial sequences are fine mid message, only the complete text must be valid
        if layers.utf8 && !self.utf8.valid() {
            return Err(self.utf8.invalid());
        }
        self.reset();
        Ok(Chunk::last(amt))
    }

    /// Skips the rest of the current message, including fragments not yet received.
    ///
    /// Payload is dropped without unmasking or validation. The reader is
    /// reset even on failure.
    pub fn discard(&mut self) -> Result<()> {
        debug!(
            remaining = self.frame.remaining,
            fragmented = self.state.is_fragmented(),
            "discard message"
        );
        let res = self.discard_frames();
        self.reset();
        res
    }

    /// [`std::io::Read`] view of the current message.
    pub fn message(&mut self) -> Message<'_, R> {
        Message {
            reader: self,
            done: false,
        }
    }

    fn discard_frames(&mut self) -> Result<()> {
        loop {
            self.drain()?;
            if !self.state.is_fragmented() {
                return Ok(());
            }
            self.next_frame()?;
        }
    }

    /// Consume the raw bytes left in the current frame.
    fn drain(&mut self) -> Result<()> {
        let mut raw = Read::take(&mut self.source, self.frame.remaining);
        let amt = io::copy(&mut raw, &mut io::sink())?;
        self.frame.remaining -= amt;
        if self.frame.remaining != 0 {
            return Err(Error::UnexpectedEof);
        }
        Ok(())
    }
}

impl<R> From<(R, Role)> for Reader<R> {
    #[inline]
    fn from((source, role): (R, Role)) -> Self {
        Self::new(source, role)
    }
}

/// Payload of a single frame: bounded raw bytes, unmasked, optionally UTF-8 checked.
pub struct Payload<'a, R> {
    source: &'a mut R,
    frame: &'a mut Cursor,
    utf8: Option<&'a mut Utf8Validator>,
}

impl<R: Read> Payload<'_, R> {
    /// Payload bytes not yet read.
    pub fn remaining(&self) -> u64 {
        self.frame.remaining
    }

    fn read_payload(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut raw = Read::take(&mut *self.source, self.frame.remaining);
        let amt = loop {
            match raw.read(buf) {
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                res => break res?,
            }
        };
        self.frame.remaining = raw.limit();

        let data = &mut buf[..amt];
        if let Some(mask) = &mut self.frame.mask {
            mask.apply(data);
        }
        if let Some(utf8) = self.utf8.as_deref_mut() {
            utf8.feed(data)?;
        }
        Ok(amt)
    }
}

impl<R: Read> Read for Payload<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_payload(buf)?)
    }
}

/// [`std::io::Read`] adapter over one message, see [`Reader::message`].
///
/// Returns `Ok(0)` once the whole message was read.
pub struct Message<'a, R> {
    reader: &'a mut Reader<R>,
    done: bool,
}

impl<R: Read> Message<'_, R> {
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Reads the rest of the message into `buf`, at most `limit` bytes.
    ///
    /// On [`Error::MessageTooLarge`] the message is left half read, use
    /// [`Reader::discard`] to skip the remainder.
    pub fn read_to_end_with_limit(&mut self, buf: &mut Vec<u8>, limit: usize) -> Result<usize> {
        let mut amt = 0;
        let mut chunk = [0; 4096];
        while !self.done {
            let Chunk { amt: n, done } = self.reader.read(&mut chunk)?;
            amt += n;
            if amt > limit {
                return Err(Error::MessageTooLarge { limit });
            }
            buf.extend_from_slice(&chunk[..n]);
            self.done = done;
        }
        Ok(amt)
    }
}

impl<R: Read> Read for Message<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while !self.done {
            let Chunk { amt, done } = self.reader.read(buf)?;
            self.done = done;
            if amt > 0 || buf.is_empty() {
                return Ok(amt);
            }
        }
        Ok(0)
    }
}

/// Reads the first frame of the next message from `source`.
///
/// Returns its header together with a reader positioned at its payload.
///
/// ### Note
///
/// Control frames that a peer injects between the fragments of a message
/// are dropped without notice. Use a [`Reader`] with
/// [`Reader::on_intermediate`] to observe them.
pub fn next_reader<R: Read>(source: R, role: Role) -> Result<(Header, Reader<R>)> {
    let mut reader = Reader::new(source, role);
    let header = reader.next_frame()?;
    Ok((header, reader))
}

use arrayvec::ArrayVec;
use bytes::{BufMut, BytesMut};

use crate::addr::Address;
use crate::consts;
use crate::ctrl::ControlFlags;
use crate::error::Error;
use crate::mac::{Direction, MacCommand};
use crate::mac::table::{self, PayloadLen};


/// How to treat command identifiers for which no payload length is known.
///
/// This covers the proprietary identifier range as well as identifiers not
/// defined for the direction of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCommands {
    /// Assume the command has no payload and continue with the next byte.
    #[default]
    AssumeEmpty,

    /// Treat all remaining FOpts bytes as payload of this command.
    ConsumeRemaining,

    /// Fail with [`Error::UnknownCommand`].
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub unknown_commands: UnknownCommands,

    /// Reject frames carrying more than 15 FOpts bytes. Encoding always does.
    pub enforce_opts_limit: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        Self {
            unknown_commands: UnknownCommands::Reject,
            enforce_opts_limit: true,
        }
    }
}


/// Frame header (FHDR).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameHeader {
    pub addr: Address,
    pub ctrl: ControlFlags,
    pub fcnt: u16,
    pub commands: Vec<MacCommand>,
}

impl FrameHeader {
    pub fn new(addr: Address, ctrl: ControlFlags, fcnt: u16) -> Self {
        Self { addr, ctrl, fcnt, commands: Vec::new() }
    }

    /// Size of the encoded header. Does not check the FOpts limit.
    pub fn encoded_len(&self) -> usize {
        let opts: usize = self.commands.iter()
            .map(MacCommand::encoded_len)
            .sum();

        consts::len::PREFIX + opts
    }

    /// Encode the header, updating the FOpts length in the control flags.
    ///
    /// Nothing is written to `buf` on error and the header is left unchanged.
    pub fn encode(&mut self, dir: Direction, buf: &mut BytesMut) -> Result<(), Error> {
        let mut opts = BytesMut::with_capacity(consts::len::MAX_OPTS);

        for cmd in &self.commands {
            cmd.encode(dir, &mut opts)?;
        }

        if opts.len() > consts::len::MAX_OPTS {
            Err(Error::Range {
                field: "FOpts",
                value: opts.len(),
                max: consts::len::MAX_OPTS,
            })?;
        }

        let mut ctrl = self.ctrl;
        ctrl.set_opts_len(opts.len() as u8);
        let ctrl_byte = ctrl.encode()?;

        self.ctrl = ctrl;

        buf.reserve(consts::len::PREFIX + opts.len());
        buf.put_slice(&self.addr.encode());
        buf.put_u8(ctrl_byte);
        buf.put_u16_le(self.fcnt);
        buf.put_slice(&opts);

        Ok(())
    }

    pub fn encode_bytes(&mut self, dir: Direction) -> Result<BytesMut, Error> {
        let mut buf = BytesMut::new();
        self.encode(dir, &mut buf)?;
        Ok(buf)
    }

    pub fn encode_vec(&mut self, dir: Direction) -> Result<ArrayVec<u8, { consts::len::MAX_HEADER }>, Error> {
        let buf = self.encode_bytes(dir)?;
        Ok(buf.iter().copied().collect())
    }

    /// Decode a header spanning all of `data`, with default options.
    pub fn decode(data: &[u8], dir: Direction) -> Result<Self, Error> {
        Self::decode_with(data, dir, &DecodeOptions::default())
    }

    /// Decode a header spanning all of `data`.
    ///
    /// Every byte after the fixed prefix is parsed as command, the FOpts
    /// length in the control byte is not consulted.
    pub fn decode_with(data: &[u8], dir: Direction, opts: &DecodeOptions) -> Result<Self, Error> {
        let mut hdr = Self::decode_fixed(data)?;
        let fopts = &data[consts::len::PREFIX..];

        if opts.enforce_opts_limit && fopts.len() > consts::len::MAX_OPTS {
            Err(Error::Range {
                field: "FOpts",
                value: fopts.len(),
                max: consts::len::MAX_OPTS,
            })?;
        }

        hdr.decode_commands(fopts, dir, opts)?;
        Ok(hdr)
    }

    /// Decode a header at the start of `data`, e.g. the MAC payload of a frame.
    ///
    /// The FOpts length in the control byte determines where the header
    /// ends. Returns the header and the number of bytes it spans.
    pub fn decode_prefix(data: &[u8], dir: Direction, opts: &DecodeOptions) -> Result<(Self, usize), Error> {
        let mut hdr = Self::decode_fixed(data)?;
        let size = consts::len::PREFIX + hdr.ctrl.opts_len() as usize;

        if data.len() < size {
            Err(Error::TooShort { min: size, actual: data.len() })?;
        }

        hdr.decode_commands(&data[consts::len::PREFIX..size], dir, opts)?;
        Ok((hdr, size))
    }

    fn decode_fixed(data: &[u8]) -> Result<Self, Error> {
        if data.len() < consts::len::PREFIX {
            Err(Error::TooShort { min: consts::len::PREFIX, actual: data.len() })?;
        }

        let addr = Address::decode(&data[0..4])?;
        let ctrl = ControlFlags::decode(&data[4..5])?;
        let fcnt = u16::from_le_bytes([data[5], data[6]]);

        Ok(Self::new(addr, ctrl, fcnt))
    }

    fn decode_commands(&mut self, fopts: &[u8], dir: Direction, opts: &DecodeOptions) -> Result<(), Error> {
        self.commands = scan(fopts, dir, opts)?;

        tracing::debug!(addr=%self.addr, fcnt=self.fcnt, commands=self.commands.len(), "decoded frame header");
        Ok(())
    }
}


fn scan(mut data: &[u8], dir: Direction, opts: &DecodeOptions) -> Result<Vec<MacCommand>, Error> {
    let mut commands = Vec::new();
    let mut assumed_empty = 0usize;

    while let Some(&cid) = data.first() {
        let len = match table::payload_len(cid, dir) {
            PayloadLen::Fixed(n) => n,
            PayloadLen::Unknown => match opts.unknown_commands {
                UnknownCommands::AssumeEmpty => {
                    tracing::debug!(cid, %dir, "no payload length known for command, assuming none");
                    assumed_empty += 1;
                    0
                },
                UnknownCommands::ConsumeRemaining => data.len() - 1,
                UnknownCommands::Reject => Err(Error::UnknownCommand { cid })?,
            },
        };

        if data.len() < 1 + len {
            Err(Error::Truncated { cid, needed: 1 + len, remaining: data.len() })?;
        }

        let (raw, rest) = data.split_at(1 + len);
        let cmd = MacCommand::decode(raw, dir)?;

        tracing::trace!(cid, len, "decoded command: {cmd:?}");

        commands.push(cmd);
        data = rest;
    }

    if assumed_empty > 0 {
        tracing::warn!(count=assumed_empty, %dir, "commands without known payload length, assumed empty");
    }

    Ok(commands)
}

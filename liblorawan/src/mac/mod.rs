//! MAC commands carried in the FOpts field of the frame header.
//!
//! The same identifier denotes a request in one direction and the matching
//! answer in the other, with independent payload sizes. Direction is not part
//! of the encoding and has to be supplied by the caller.

use bytes::BufMut;
use num_enum::{FromPrimitive, IntoPrimitive};
use smallvec::SmallVec;

mod payload;
pub mod table;

pub use payload::*;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Device to network.
    Uplink,
    /// Network to device.
    Downlink,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Uplink => write!(f, "uplink"),
            Direction::Downlink => write!(f, "downlink"),
        }
    }
}


/// Command identifier (CID).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
pub enum Cid {
    LinkCheck = 0x02,
    LinkAdr = 0x03,
    DutyCycle = 0x04,
    RxParamSetup = 0x05,
    DevStatus = 0x06,
    NewChannel = 0x07,
    RxTimingSetup = 0x08,

    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Cid {
    pub fn is_proprietary(&self) -> bool {
        u8::from(*self) >= PROPRIETARY_MIN
    }
}

/// Identifiers from here on are reserved for proprietary network extensions.
pub const PROPRIETARY_MIN: u8 = 0x80;


pub type RawPayload = SmallVec<[u8; 8]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacCommand {
    LinkCheckReq,
    LinkCheckAns(LinkCheckAns),
    LinkAdrReq(LinkAdrReq),
    LinkAdrAns(LinkAdrAns),
    DutyCycleReq(DutyCycleReq),
    DutyCycleAns,
    RxParamSetupReq(RxParamSetupReq),
    RxParamSetupAns(RxParamSetupAns),
    DevStatusReq,
    DevStatusAns(DevStatusAns),
    NewChannelReq(NewChannelReq),
    NewChannelAns(NewChannelAns),
    RxTimingSetupReq(RxTimingSetupReq),
    RxTimingSetupAns,

    /// Command with identifier in the proprietary range, payload passed through as is.
    Proprietary { cid: u8, payload: RawPayload },

    /// Command with an identifier not defined for the direction it was received in.
    Unknown { cid: u8, payload: RawPayload },
}

impl MacCommand {
    pub fn cid(&self) -> u8 {
        let cid = match self {
            MacCommand::LinkCheckReq | MacCommand::LinkCheckAns(_) => Cid::LinkCheck,
            MacCommand::LinkAdrReq(_) | MacCommand::LinkAdrAns(_) => Cid::LinkAdr,
            MacCommand::DutyCycleReq(_) | MacCommand::DutyCycleAns => Cid::DutyCycle,
            MacCommand::RxParamSetupReq(_) | MacCommand::RxParamSetupAns(_) => Cid::RxParamSetup,
            MacCommand::DevStatusReq | MacCommand::DevStatusAns(_) => Cid::DevStatus,
            MacCommand::NewChannelReq(_) | MacCommand::NewChannelAns(_) => Cid::NewChannel,
            MacCommand::RxTimingSetupReq(_) | MacCommand::RxTimingSetupAns => Cid::RxTimingSetup,
            MacCommand::Proprietary { cid, .. } | MacCommand::Unknown { cid, .. } => Cid::Unknown(*cid),
        };

        cid.into()
    }

    /// Direction the command is defined for, `None` if not known.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            MacCommand::LinkCheckReq
            | MacCommand::LinkAdrAns(_)
            | MacCommand::DutyCycleAns
            | MacCommand::RxParamSetupAns(_)
            | MacCommand::DevStatusAns(_)
            | MacCommand::NewChannelAns(_)
            | MacCommand::RxTimingSetupAns => Some(Direction::Uplink),

            MacCommand::LinkCheckAns(_)
            | MacCommand::LinkAdrReq(_)
            | MacCommand::DutyCycleReq(_)
            | MacCommand::RxParamSetupReq(_)
            | MacCommand::DevStatusReq
            | MacCommand::NewChannelReq(_)
            | MacCommand::RxTimingSetupReq(_) => Some(Direction::Downlink),

            MacCommand::Proprietary { .. } | MacCommand::Unknown { .. } => None,
        }
    }

    /// Number of bytes of the encoded command, including the identifier.
    pub fn encoded_len(&self) -> usize {
        let payload = match self {
            MacCommand::Proprietary { payload, .. } | MacCommand::Unknown { payload, .. } => {
                payload.len()
            },
            cmd => cmd.direction()
                .map(|dir| table::payload_len(cmd.cid(), dir).or_default())
                .unwrap_or(0),
        };

        1 + payload
    }

    fn payload(&self) -> Result<RawPayload, Error> {
        let payload = match self {
            MacCommand::LinkCheckReq
            | MacCommand::DutyCycleAns
            | MacCommand::DevStatusReq
            | MacCommand::RxTimingSetupAns => RawPayload::new(),

            MacCommand::LinkCheckAns(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::LinkAdrReq(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::LinkAdrAns(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::DutyCycleReq(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::RxParamSetupReq(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::RxParamSetupAns(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::DevStatusAns(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::NewChannelReq(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::NewChannelAns(p) => RawPayload::from_slice(&p.encode()?),
            MacCommand::RxTimingSetupReq(p) => RawPayload::from_slice(&p.encode()?),

            MacCommand::Proprietary { payload, .. } | MacCommand::Unknown { payload, .. } => {
                payload.clone()
            },
        };

        Ok(payload)
    }

    /// Raw variants must carry an identifier that decodes back to the same variant.
    fn is_valid_cid(&self) -> bool {
        match self {
            MacCommand::Proprietary { cid, .. } => *cid >= PROPRIETARY_MIN,
            MacCommand::Unknown { cid, .. } => {
                matches!(Cid::from_primitive(*cid), Cid::Unknown(c) if c < PROPRIETARY_MIN)
            },
            _ => true,
        }
    }

    /// Encode the command for transmission in the given direction.
    ///
    /// Nothing is written to `buf` on error.
    pub fn encode(&self, dir: Direction, buf: &mut impl BufMut) -> Result<(), Error> {
        let cid = self.cid();

        if self.direction().is_some_and(|d| d != dir) {
            Err(Error::Direction { cid, direction: dir })?;
        }

        if !self.is_valid_cid() {
            Err(Error::Identifier { cid })?;
        }

        let payload = self.payload()?;

        buf.put_u8(cid);
        buf.put_slice(&payload);
        Ok(())
    }

    /// Decode a single command, identifier followed by its complete payload.
    pub fn decode(data: &[u8], dir: Direction) -> Result<Self, Error> {
        use Direction::{Downlink, Uplink};

        let (&cid, payload) = data.split_first().ok_or(Error::Empty)?;

        let cmd = match (Cid::from_primitive(cid), dir) {
            (Cid::LinkCheck, Uplink) => empty(cid, payload, MacCommand::LinkCheckReq)?,
            (Cid::LinkCheck, Downlink) => MacCommand::LinkCheckAns(LinkCheckAns::decode(fixed(cid, payload)?)),
            (Cid::LinkAdr, Uplink) => MacCommand::LinkAdrAns(LinkAdrAns::decode(fixed(cid, payload)?)),
            (Cid::LinkAdr, Downlink) => MacCommand::LinkAdrReq(LinkAdrReq::decode(fixed(cid, payload)?)),
            (Cid::DutyCycle, Uplink) => empty(cid, payload, MacCommand::DutyCycleAns)?,
            (Cid::DutyCycle, Downlink) => MacCommand::DutyCycleReq(DutyCycleReq::decode(fixed(cid, payload)?)),
            (Cid::RxParamSetup, Uplink) => MacCommand::RxParamSetupAns(RxParamSetupAns::decode(fixed(cid, payload)?)),
            (Cid::RxParamSetup, Downlink) => MacCommand::RxParamSetupReq(RxParamSetupReq::decode(fixed(cid, payload)?)),
            (Cid::DevStatus, Uplink) => MacCommand::DevStatusAns(DevStatusAns::decode(fixed(cid, payload)?)),
            (Cid::DevStatus, Downlink) => empty(cid, payload, MacCommand::DevStatusReq)?,
            (Cid::NewChannel, Uplink) => MacCommand::NewChannelAns(NewChannelAns::decode(fixed(cid, payload)?)),
            (Cid::NewChannel, Downlink) => MacCommand::NewChannelReq(NewChannelReq::decode(fixed(cid, payload)?)),
            (Cid::RxTimingSetup, Uplink) => empty(cid, payload, MacCommand::RxTimingSetupAns)?,
            (Cid::RxTimingSetup, Downlink) => MacCommand::RxTimingSetupReq(RxTimingSetupReq::decode(fixed(cid, payload)?)),
            (Cid::Unknown(cid), _) if cid >= PROPRIETARY_MIN => {
                MacCommand::Proprietary { cid, payload: RawPayload::from_slice(payload) }
            },
            (Cid::Unknown(cid), _) => {
                MacCommand::Unknown { cid, payload: RawPayload::from_slice(payload) }
            },
        };

        Ok(cmd)
    }
}

fn fixed<const N: usize>(cid: u8, payload: &[u8]) -> Result<&[u8; N], Error> {
    payload.try_into()
        .map_err(|_| Error::Length { cid, expected: N, actual: payload.len() })
}

fn empty(cid: u8, payload: &[u8], cmd: MacCommand) -> Result<MacCommand, Error> {
    if payload.is_empty() {
        Ok(cmd)
    } else {
        Err(Error::Length { cid, expected: 0, actual: payload.len() })
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No identifier byte.
    Empty,

    /// Payload size does not match the size defined for the identifier.
    Length { cid: u8, expected: usize, actual: usize },

    /// Command cannot be sent in this direction.
    Direction { cid: u8, direction: Direction },

    /// Identifier does not match the kind of raw command it is stored in.
    Identifier { cid: u8 },

    /// Payload field outside of its bit width.
    Range { field: &'static str, value: i64, min: i64, max: i64 },

    /// Frequency not representable in 100 Hz steps with 24 bits.
    Frequency { value: u32 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Empty => write!(f, "no command identifier"),
            Error::Length { cid, expected, actual } => {
                write!(f, "command 0x{cid:02x} expects {expected} payload bytes, got {actual}")
            },
            Error::Direction { cid, direction } => {
                write!(f, "command 0x{cid:02x} is not defined for {direction}")
            },
            Error::Identifier { cid } => {
                write!(f, "identifier 0x{cid:02x} does not match the command type")
            },
            Error::Range { field, value, min, max } => {
                write!(f, "value {value} of {field} outside of range {min}..={max}")
            },
            Error::Frequency { value } => {
                write!(f, "frequency {value} Hz cannot be encoded")
            },
        }
    }
}

impl std::error::Error for Error {}

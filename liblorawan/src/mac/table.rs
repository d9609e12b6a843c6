//! Payload length of MAC commands by identifier and direction.
//!
//! The frame header does not carry the length of its individual commands, so
//! the scan over FOpts relies on this table to find the command boundaries.

use num_enum::FromPrimitive;

use super::payload::*;
use super::{Cid, Direction};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLen {
    Fixed(usize),

    /// Identifier not defined for this direction, or proprietary.
    Unknown,
}

impl PayloadLen {
    pub fn get(self) -> Option<usize> {
        match self {
            PayloadLen::Fixed(n) => Some(n),
            PayloadLen::Unknown => None,
        }
    }

    /// Length with unknown identifiers assumed to carry no payload.
    pub fn or_default(self) -> usize {
        self.get().unwrap_or(0)
    }
}


pub fn payload_len(cid: u8, dir: Direction) -> PayloadLen {
    use Direction::{Downlink, Uplink};

    match (Cid::from_primitive(cid), dir) {
        (Cid::LinkCheck,     Uplink)   => PayloadLen::Fixed(0),
        (Cid::LinkCheck,     Downlink) => PayloadLen::Fixed(LinkCheckAns::LEN),
        (Cid::LinkAdr,       Uplink)   => PayloadLen::Fixed(LinkAdrAns::LEN),
        (Cid::LinkAdr,       Downlink) => PayloadLen::Fixed(LinkAdrReq::LEN),
        (Cid::DutyCycle,     Uplink)   => PayloadLen::Fixed(0),
        (Cid::DutyCycle,     Downlink) => PayloadLen::Fixed(DutyCycleReq::LEN),
        (Cid::RxParamSetup,  Uplink)   => PayloadLen::Fixed(RxParamSetupAns::LEN),
        (Cid::RxParamSetup,  Downlink) => PayloadLen::Fixed(RxParamSetupReq::LEN),
        (Cid::DevStatus,     Uplink)   => PayloadLen::Fixed(DevStatusAns::LEN),
        (Cid::DevStatus,     Downlink) => PayloadLen::Fixed(0),
        (Cid::NewChannel,    Uplink)   => PayloadLen::Fixed(NewChannelAns::LEN),
        (Cid::NewChannel,    Downlink) => PayloadLen::Fixed(NewChannelReq::LEN),
        (Cid::RxTimingSetup, Uplink)   => PayloadLen::Fixed(0),
        (Cid::RxTimingSetup, Downlink) => PayloadLen::Fixed(RxTimingSetupReq::LEN),
        (Cid::Unknown(_), _) => PayloadLen::Unknown,
    }
}

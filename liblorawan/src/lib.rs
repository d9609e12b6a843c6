//! Library for the LoRaWAN frame header (FHDR). Encodes and decodes the
//! device address, frame control byte, frame counter, and the MAC commands
//! piggybacked in the FOpts field.
//!
//! See the LoRaWAN 1.0 specification, section 4.3, for the wire format.

pub mod addr;
pub mod consts;
pub mod ctrl;
pub mod error;
pub mod header;
pub mod mac;

pub use addr::Address;
pub use ctrl::ControlFlags;
pub use error::Error;
pub use header::{DecodeOptions, FrameHeader, UnknownCommands};
pub use mac::{Direction, MacCommand};

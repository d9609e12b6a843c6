use crate::consts;
use crate::error::Error;


/// Frame control field (FCtrl).
///
/// The FOpts length is not set directly. It is derived from the command
/// stream each time the owning [`FrameHeader`](crate::FrameHeader) is
/// encoded, and read from the wire on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlFlags {
    pub adr: bool,
    pub adr_ack_req: bool,
    pub ack: bool,
    /// Only meaningful for downlink frames.
    pub frame_pending: bool,
    opts_len: u8,
}

impl ControlFlags {
    pub fn new(adr: bool, adr_ack_req: bool, ack: bool, frame_pending: bool) -> Self {
        Self { adr, adr_ack_req, ack, frame_pending, opts_len: 0 }
    }

    pub fn opts_len(&self) -> u8 {
        self.opts_len
    }

    pub(crate) fn set_opts_len(&mut self, len: u8) {
        self.opts_len = len;
    }

    pub fn encode(&self) -> Result<u8, Error> {
        if self.opts_len as usize > consts::len::MAX_OPTS {
            Err(Error::Range {
                field: "FOptsLen",
                value: self.opts_len as _,
                max: consts::len::MAX_OPTS,
            })?;
        }

        let mut b = self.opts_len;

        if self.frame_pending {
            b |= consts::ctrl::FRAME_PENDING;
        }
        if self.ack {
            b |= consts::ctrl::ACK;
        }
        if self.adr_ack_req {
            b |= consts::ctrl::ADR_ACK_REQ;
        }
        if self.adr {
            b |= consts::ctrl::ADR;
        }

        Ok(b)
    }

    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        let [b] = data else {
            return Err(Error::Length { expected: consts::len::CONTROL, actual: data.len() });
        };

        Ok(Self {
            adr: b & consts::ctrl::ADR != 0,
            adr_ack_req: b & consts::ctrl::ADR_ACK_REQ != 0,
            ack: b & consts::ctrl::ACK != 0,
            frame_pending: b & consts::ctrl::FRAME_PENDING != 0,
            opts_len: b & consts::ctrl::OPTS_LEN,
        })
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(ControlFlags::default().encode(), Ok(0x00));
        assert_eq!(ControlFlags::new(true, false, false, false).encode(), Ok(0x80));
        assert_eq!(ControlFlags::new(false, true, false, false).encode(), Ok(0x40));
        assert_eq!(ControlFlags::new(false, false, true, false).encode(), Ok(0x20));
        assert_eq!(ControlFlags::new(false, false, false, true).encode(), Ok(0x10));

        let mut flags = ControlFlags::new(true, true, true, true);
        flags.set_opts_len(15);
        assert_eq!(flags.encode(), Ok(0xff));

        flags.set_opts_len(3);
        assert_eq!(flags.encode(), Ok(0xf3));
    }

    #[test]
    fn test_encode_range() {
        let mut flags = ControlFlags::default();
        flags.set_opts_len(16);

        assert_eq!(flags.encode(), Err(Error::Range { field: "FOptsLen", value: 16, max: 15 }));
    }

    #[test]
    fn test_decode() {
        let flags = ControlFlags::decode(&[0xa5]).expect("error decoding flags");
        assert!(flags.adr);
        assert!(!flags.adr_ack_req);
        assert!(flags.ack);
        assert!(!flags.frame_pending);
        assert_eq!(flags.opts_len(), 5);

        // any length decodes, consistency is up to the header
        let flags = ControlFlags::decode(&[0x0f]).expect("error decoding flags");
        assert_eq!(flags.opts_len(), 15);
        assert_eq!(flags.encode(), Ok(0x0f));

        assert_eq!(ControlFlags::decode(&[]), Err(Error::Length { expected: 1, actual: 0 }));
        assert_eq!(ControlFlags::decode(&[0x00, 0x00]), Err(Error::Length { expected: 1, actual: 2 }));
    }
}

//! Field sizes and bit masks used in the frame header encoding.

pub mod len {
    pub const ADDRESS: usize = 4;
    pub const CONTROL: usize = 1;
    pub const COUNTER: usize = 2;

    /// Size of the fixed part of the header (address, control, counter).
    pub const PREFIX: usize = ADDRESS + CONTROL + COUNTER;

    /// Maximum number of FOpts bytes, limited by the 4-bit length field.
    pub const MAX_OPTS: usize = 15;

    pub const MAX_HEADER: usize = PREFIX + MAX_OPTS;
}

pub mod ctrl {
    pub const ADR: u8 = 1 << 7;
    pub const ADR_ACK_REQ: u8 = 1 << 6;
    pub const ACK: u8 = 1 << 5;
    pub const FRAME_PENDING: u8 = 1 << 4;
    pub const OPTS_LEN: u8 = 0x0f;
}

pub mod addr {
    pub const NWK_ID_SHIFT: u32 = 25;
    pub const NWK_ID_MASK: u32 = 0x7f;
    pub const NWK_ADDR_MASK: u32 = 0x01ff_ffff;
}

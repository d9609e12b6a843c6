use crate::consts;
use crate::error::Error;


/// Device address (DevAddr).
///
/// The upper 7 bits hold the network identifier (NwkID), the lower 25 bits
/// the network address of the device (NwkAddr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address {
    value: u32,
}

impl Address {
    pub fn from_value(value: u32) -> Self {
        Address { value }
    }

    pub fn from_parts(nwk_id: u8, nwk_addr: u32) -> Self {
        let nwk_id = (nwk_id as u32 & consts::addr::NWK_ID_MASK) << consts::addr::NWK_ID_SHIFT;
        let nwk_addr = nwk_addr & consts::addr::NWK_ADDR_MASK;

        Self::from_value(nwk_id | nwk_addr)
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn nwk_id(&self) -> u8 {
        ((self.value >> consts::addr::NWK_ID_SHIFT) & consts::addr::NWK_ID_MASK) as u8
    }

    pub fn nwk_addr(&self) -> u32 {
        self.value & consts::addr::NWK_ADDR_MASK
    }

    pub fn encode(&self) -> [u8; consts::len::ADDRESS] {
        self.value.to_le_bytes()
    }

    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; consts::len::ADDRESS] = data.try_into()
            .map_err(|_| Error::Length { expected: consts::len::ADDRESS, actual: data.len() })?;

        Ok(Self::from_value(u32::from_le_bytes(bytes)))
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Self::from_value(value)
    }
}

impl From<Address> for u32 {
    fn from(value: Address) -> Self {
        value.value
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.value)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 8 {
            return Err(AddressParseError::InvalidLength);
        }

        // from_str_radix() would also accept a leading '+'
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressParseError::InvalidDigit);
        }

        u32::from_str_radix(s, 16)
            .map(Self::from_value)
            .map_err(|_| AddressParseError::InvalidDigit)
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressParseError {
    InvalidLength,
    InvalidDigit,
}

impl std::fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressParseError::InvalidLength => write!(f, "address must be 8 hex digits"),
            AddressParseError::InvalidDigit => write!(f, "address contains a non-hex digit"),
        }
    }
}

impl std::error::Error for AddressParseError {}

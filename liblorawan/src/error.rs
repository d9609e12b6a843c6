use crate::mac;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A fixed-size field was given the wrong number of bytes.
    Length { expected: usize, actual: usize },

    /// Not enough bytes for the fixed header prefix.
    TooShort { min: usize, actual: usize },

    /// A bounded field exceeds its legal range.
    Range { field: &'static str, value: usize, max: usize },

    /// The remaining bytes do not hold the payload declared by a command identifier.
    Truncated { cid: u8, needed: usize, remaining: usize },

    /// Identifier without a known payload length, rejected by the decode options.
    UnknownCommand { cid: u8 },

    Command(mac::Error),
}

impl From<mac::Error> for Error {
    fn from(value: mac::Error) -> Self {
        Self::Command(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Length { expected, actual } => {
                write!(f, "expected {expected} bytes of data, got {actual}")
            },
            Error::TooShort { min, actual } => {
                write!(f, "expected at least {min} bytes of data, got {actual}")
            },
            Error::Range { field, value, max } => {
                write!(f, "value {value} of {field} exceeds maximum of {max}")
            },
            Error::Truncated { cid, needed, remaining } => {
                write!(f, "command 0x{cid:02x} needs {needed} bytes, only {remaining} remaining")
            },
            Error::UnknownCommand { cid } => {
                write!(f, "unknown command identifier 0x{cid:02x}")
            },
            Error::Command(e) => write!(f, "invalid command: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Command(e) => Some(e),
            _ => None,
        }
    }
}

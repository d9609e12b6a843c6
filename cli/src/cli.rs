use clap::{Parser, Subcommand, ValueEnum};

use lorawan::{Address, Direction, UnknownCommands};


/// Encode and decode LoRaWAN frame headers (FHDR)
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Direction of the frame, determines how MAC commands are interpreted
    #[arg(short, long, global=true, value_enum, default_value_t=DirectionArg::Uplink)]
    pub direction: DirectionArg,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a frame header
    Decode {
        /// Encoded header as hex string
        #[arg(value_parser=parse_hex)]
        data: HexBytes,

        /// Reject unknown commands and more than 15 bytes of FOpts
        #[arg(long)]
        strict: bool,

        /// How to handle commands without known payload length
        ///
        /// Overrides the behavior selected by --strict.
        #[arg(long, value_enum)]
        unknown: Option<UnknownArg>,

        /// Only decode the header at the start of the data
        ///
        /// The end of the header is determined by the FOpts length in the
        /// frame control byte. Remaining bytes are printed separately.
        #[arg(long)]
        prefix: bool,
    },

    /// Encode a frame header
    Encode {
        /// Device address as 8 hex digits, most significant first
        #[arg(short, long)]
        addr: Address,

        /// Frame counter
        #[arg(short, long, default_value_t=0)]
        fcnt: u16,

        /// Set the ADR flag
        #[arg(long)]
        adr: bool,

        /// Set the ADRACKReq flag
        #[arg(long)]
        adr_ack_req: bool,

        /// Set the ACK flag
        #[arg(long)]
        ack: bool,

        /// Set the FPending flag
        #[arg(long)]
        frame_pending: bool,

        /// MAC command as hex string, identifier followed by payload
        ///
        /// May be given multiple times. Commands are validated against the
        /// selected direction.
        #[arg(short, long="cmd", value_parser=parse_hex)]
        commands: Vec<HexBytes>,

        /// Print a hex dump instead of a plain hex string
        #[arg(long)]
        dump: bool,
    },
}

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Uplink,
    Downlink,
}

impl From<DirectionArg> for Direction {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::Uplink => Direction::Uplink,
            DirectionArg::Downlink => Direction::Downlink,
        }
    }
}

#[derive(Debug, ValueEnum, Clone, Copy)]
pub enum UnknownArg {
    AssumeEmpty,
    ConsumeRemaining,
    Reject,
}

impl From<UnknownArg> for UnknownCommands {
    fn from(value: UnknownArg) -> Self {
        match value {
            UnknownArg::AssumeEmpty => UnknownCommands::AssumeEmpty,
            UnknownArg::ConsumeRemaining => UnknownCommands::ConsumeRemaining,
            UnknownArg::Reject => UnknownCommands::Reject,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HexBytes(pub Vec<u8>);

fn parse_hex(s: &str) -> std::result::Result<HexBytes, String> {
    let s: String = s.split_whitespace().collect();
    let s = s.strip_prefix("0x").unwrap_or(&s);

    hex::decode(s)
        .map(HexBytes)
        .map_err(|e| format!("{e}"))
}

mod cli;

use anyhow::Result;
use clap::Parser;

use lorawan::{ControlFlags, DecodeOptions, Direction, FrameHeader, MacCommand};

use cli::*;


fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let dir = Direction::from(args.direction);

    match args.command {
        Command::Decode { data, strict, unknown, prefix } => {
            let mut opts = if strict {
                DecodeOptions::strict()
            } else {
                DecodeOptions::default()
            };

            if let Some(unknown) = unknown {
                opts.unknown_commands = unknown.into();
            }

            cmd_decode(&data.0, dir, &opts, prefix)
        },
        Command::Encode { addr, fcnt, adr, adr_ack_req, ack, frame_pending, commands, dump } => {
            let ctrl = ControlFlags::new(adr, adr_ack_req, ack, frame_pending);

            let mut hdr = FrameHeader::new(addr, ctrl, fcnt);
            for raw in commands {
                hdr.commands.push(MacCommand::decode(&raw.0, dir)?);
            }

            cmd_encode(hdr, dir, dump)
        },
    }
}

fn cmd_decode(data: &[u8], dir: Direction, opts: &DecodeOptions, prefix: bool) -> Result<()> {
    tracing::debug!(len=data.len(), %dir, ?opts, "decoding frame header");

    let (hdr, n) = if prefix {
        FrameHeader::decode_prefix(data, dir, opts)?
    } else {
        (FrameHeader::decode_with(data, dir, opts)?, data.len())
    };

    let flags = [
        (hdr.ctrl.adr, "ADR"),
        (hdr.ctrl.adr_ack_req, "ADRACKReq"),
        (hdr.ctrl.ack, "ACK"),
        (hdr.ctrl.frame_pending, "FPending"),
    ];

    let flags: Vec<_> = flags.iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect();

    println!("frame header ({dir}):");
    println!("  address:   {} (NwkID: 0x{:02x}, NwkAddr: 0x{:07x})",
        hdr.addr, hdr.addr.nwk_id(), hdr.addr.nwk_addr());
    println!("  flags:     [{}]", flags.join(", "));
    println!("  FOptsLen:  {}", hdr.ctrl.opts_len());
    println!("  counter:   {}", hdr.fcnt);
    println!("  commands:");

    for cmd in &hdr.commands {
        println!("    0x{:02x}: {:?}", cmd.cid(), cmd);
    }

    if n < data.len() {
        println!("  remaining:");

        let rest = &data[n..];
        let rest = pretty_hex::config_hex(
            &rest,
            pretty_hex::HexConfig {
                title: false,
                ..Default::default()
            },
        );

        for line in rest.lines() {
            println!("    {line}");
        }
    }

    Ok(())
}

fn cmd_encode(mut hdr: FrameHeader, dir: Direction, dump: bool) -> Result<()> {
    let raw = hdr.encode_vec(dir)?;

    tracing::debug!(len=raw.len(), %dir, "encoded frame header");

    if dump {
        println!("{}", pretty_hex::pretty_hex(&raw));
    } else {
        println!("{}", hex::encode(&raw));
    }

    Ok(())
}

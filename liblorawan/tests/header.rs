use lorawan::mac::{
    DevStatusAns, DutyCycleReq, LinkAdrAns, LinkAdrReq, LinkCheckAns, NewChannelAns,
    NewChannelReq, RxParamSetupAns, RxParamSetupReq, RxTimingSetupReq,
};
use lorawan::{Address, ControlFlags, DecodeOptions, Direction, Error, FrameHeader, MacCommand};

use proptest::prelude::*;


fn uplink_command() -> impl Strategy<Value = MacCommand> {
    prop_oneof![
        Just(MacCommand::LinkCheckReq),
        Just(MacCommand::DutyCycleAns),
        Just(MacCommand::RxTimingSetupAns),
        any::<(bool, bool, bool)>().prop_map(|(a, b, c)| MacCommand::LinkAdrAns(LinkAdrAns {
            power_ack: a,
            data_rate_ack: b,
            channel_mask_ack: c,
        })),
        any::<(bool, bool, bool)>().prop_map(|(a, b, c)| MacCommand::RxParamSetupAns(RxParamSetupAns {
            rx1_dr_offset_ack: a,
            rx2_data_rate_ack: b,
            channel_ack: c,
        })),
        (any::<u8>(), -32i8..=31).prop_map(|(battery, margin)| {
            MacCommand::DevStatusAns(DevStatusAns { battery, margin })
        }),
        any::<(bool, bool)>().prop_map(|(a, b)| MacCommand::NewChannelAns(NewChannelAns {
            data_rate_range_ok: a,
            channel_frequency_ok: b,
        })),
    ]
}

fn downlink_command() -> impl Strategy<Value = MacCommand> {
    prop_oneof![
        Just(MacCommand::DevStatusReq),
        any::<(u8, u8)>().prop_map(|(margin, gw_cnt)| {
            MacCommand::LinkCheckAns(LinkCheckAns { margin, gw_cnt })
        }),
        (0u8..16, 0u8..16, any::<u16>(), 0u8..8, 0u8..16).prop_map(|(dr, pwr, mask, cntl, rep)| {
            MacCommand::LinkAdrReq(LinkAdrReq {
                data_rate: dr,
                tx_power: pwr,
                ch_mask: mask,
                ch_mask_cntl: cntl,
                nb_rep: rep,
            })
        }),
        (0u8..16).prop_map(|max_duty_cycle| MacCommand::DutyCycleReq(DutyCycleReq { max_duty_cycle })),
        (0u8..8, 0u8..16, 0u32..=0x00ff_ffff).prop_map(|(offset, dr, freq)| {
            MacCommand::RxParamSetupReq(RxParamSetupReq {
                rx1_dr_offset: offset,
                rx2_data_rate: dr,
                frequency: freq * 100,
            })
        }),
        (any::<u8>(), 0u32..=0x00ff_ffff, 0u8..16, 0u8..16).prop_map(|(idx, freq, max, min)| {
            MacCommand::NewChannelReq(NewChannelReq {
                ch_index: idx,
                frequency: freq * 100,
                max_dr: max,
                min_dr: min,
            })
        }),
        (0u8..16).prop_map(|delay| MacCommand::RxTimingSetupReq(RxTimingSetupReq { delay })),
    ]
}

fn control_flags() -> impl Strategy<Value = ControlFlags> {
    any::<(bool, bool, bool, bool)>()
        .prop_map(|(adr, adr_ack_req, ack, pending)| ControlFlags::new(adr, adr_ack_req, ack, pending))
}

fn header(commands: impl Strategy<Value = Vec<MacCommand>>) -> impl Strategy<Value = FrameHeader> {
    (any::<u32>(), control_flags(), any::<u16>(), commands).prop_map(|(addr, ctrl, fcnt, commands)| {
        FrameHeader { addr: Address::from_value(addr), ctrl, fcnt, commands }
    })
}

fn check_roundtrip(mut hdr: FrameHeader, dir: Direction) -> Result<(), TestCaseError> {
    // generated command lists may exceed the FOpts limit
    let raw = match hdr.encode_bytes(dir) {
        Ok(raw) => raw,
        Err(Error::Range { field: "FOpts", value, .. }) => {
            prop_assert!(value > 15);
            return Ok(());
        },
        Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
    };

    prop_assert_eq!(raw.len(), hdr.encoded_len());
    prop_assert_eq!(hdr.ctrl.opts_len() as usize, raw.len() - 7);

    let decoded = FrameHeader::decode_with(&raw, dir, &DecodeOptions::strict())
        .map_err(|e| TestCaseError::fail(format!("error decoding header: {e}")))?;

    prop_assert_eq!(decoded, hdr);
    Ok(())
}


proptest! {
    #[test]
    fn roundtrip_uplink(hdr in header(prop::collection::vec(uplink_command(), 0..8))) {
        check_roundtrip(hdr, Direction::Uplink)?;
    }

    #[test]
    fn roundtrip_downlink(hdr in header(prop::collection::vec(downlink_command(), 0..5))) {
        check_roundtrip(hdr, Direction::Downlink)?;
    }

    #[test]
    fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..32), uplink in any::<bool>()) {
        let dir = if uplink { Direction::Uplink } else { Direction::Downlink };

        let _ = FrameHeader::decode(&data, dir);
        let _ = FrameHeader::decode_with(&data, dir, &DecodeOptions::strict());
        let _ = FrameHeader::decode_prefix(&data, dir, &DecodeOptions::default());
    }
}


#[test]
fn test_known_vector() {
    let mut hdr = FrameHeader::new(
        Address::from_value(0x01020304),
        ControlFlags::new(true, false, false, false),
        5,
    );

    let raw = hdr.encode_vec(Direction::Uplink).expect("error encoding header");
    assert_eq!(&raw[..], [0x04, 0x03, 0x02, 0x01, 0x80, 0x05, 0x00]);

    let decoded = FrameHeader::decode(&raw, Direction::Uplink).expect("error decoding header");
    assert_eq!(decoded, hdr);
}

#[test]
fn test_downlink_with_commands() {
    let raw = [
        0x78, 0x56, 0x34, 0x12,             // address
        0x3b,                               // ack, frame pending, 11 bytes FOpts
        0x2a, 0x00,                         // counter
        0x03, 0x50, 0x07, 0x00, 0x01,       // LinkADRReq
        0x06,                               // DevStatusReq
        0x05, 0x02, 0xd2, 0xad, 0x84,       // RXParamSetupReq
    ];

    let mut hdr = FrameHeader::decode(&raw, Direction::Downlink).expect("error decoding header");

    assert_eq!(hdr.addr, Address::from_value(0x12345678));
    assert!(!hdr.ctrl.adr && !hdr.ctrl.adr_ack_req);
    assert!(hdr.ctrl.ack && hdr.ctrl.frame_pending);
    assert_eq!(hdr.ctrl.opts_len(), 11);
    assert_eq!(hdr.fcnt, 42);
    assert_eq!(hdr.commands, [
        MacCommand::LinkAdrReq(LinkAdrReq {
            data_rate: 5,
            tx_power: 0,
            ch_mask: 0x0007,
            ch_mask_cntl: 0,
            nb_rep: 1,
        }),
        MacCommand::DevStatusReq,
        MacCommand::RxParamSetupReq(RxParamSetupReq {
            rx1_dr_offset: 0,
            rx2_data_rate: 2,
            frequency: 869_525_000,
        }),
    ]);

    let encoded = hdr.encode_bytes(Direction::Downlink).expect("error encoding header");
    assert_eq!(&encoded[..], raw);
}

#[test]
fn test_send_sync() {
    fn check<T: Send + Sync>() {}

    check::<FrameHeader>();
    check::<MacCommand>();
    check::<DecodeOptions>();
    check::<Error>();
}

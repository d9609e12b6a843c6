//! Payloads of the LoRaWAN 1.0 MAC commands.
//!
//! Commands without payload (e.g. `LinkCheckReq`) have no type here. All
//! payloads have a fixed size, given by their `LEN` constant.

use bytes::{Buf, BufMut};

use super::Error;


/// Frequencies are transmitted in units of 100 Hz as 24-bit integer.
const FREQ_STEP: u32 = 100;
const FREQ_MAX: u32 = 0x00ff_ffff * FREQ_STEP;

fn check(field: &'static str, value: u8, max: u8) -> Result<(), Error> {
    if value > max {
        Err(Error::Range { field, value: value as _, min: 0, max: max as _ })
    } else {
        Ok(())
    }
}

fn encode_freq(buf: &mut impl BufMut, freq: u32) -> Result<(), Error> {
    if freq > FREQ_MAX || freq % FREQ_STEP != 0 {
        Err(Error::Frequency { value: freq })?;
    }

    buf.put_uint_le((freq / FREQ_STEP) as u64, 3);
    Ok(())
}

fn decode_freq(buf: &mut impl Buf) -> u32 {
    buf.get_uint_le(3) as u32 * FREQ_STEP
}

fn bit(b: u8, n: u8) -> bool {
    b & (1 << n) != 0
}


/// Answer to `LinkCheckReq`, sent by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkCheckAns {
    /// Link margin in dB of the last successfully received `LinkCheckReq`.
    pub margin: u8,
    /// Number of gateways that received the last `LinkCheckReq`.
    pub gw_cnt: u8,
}

impl LinkCheckAns {
    pub const LEN: usize = 2;

    pub fn encode(&self) -> Result<[u8; LinkCheckAns::LEN], Error> {
        Ok([self.margin, self.gw_cnt])
    }

    pub fn decode(data: &[u8; LinkCheckAns::LEN]) -> Self {
        Self { margin: data[0], gw_cnt: data[1] }
    }
}


/// Rate adaptation request, sent by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkAdrReq {
    pub data_rate: u8,
    pub tx_power: u8,
    pub ch_mask: u16,
    pub ch_mask_cntl: u8,
    pub nb_rep: u8,
}

impl LinkAdrReq {
    pub const LEN: usize = 4;

    pub fn encode(&self) -> Result<[u8; LinkAdrReq::LEN], Error> {
        check("DataRate", self.data_rate, 0x0f)?;
        check("TXPower", self.tx_power, 0x0f)?;
        check("ChMaskCntl", self.ch_mask_cntl, 0x07)?;
        check("NbRep", self.nb_rep, 0x0f)?;

        let mut out = [0; LinkAdrReq::LEN];
        let mut buf = &mut out[..];

        buf.put_u8((self.data_rate << 4) | self.tx_power);
        buf.put_u16_le(self.ch_mask);
        buf.put_u8((self.ch_mask_cntl << 4) | self.nb_rep);

        Ok(out)
    }

    pub fn decode(data: &[u8; LinkAdrReq::LEN]) -> Self {
        let mut buf = &data[..];

        let dr_power = buf.get_u8();
        let ch_mask = buf.get_u16_le();
        let redundancy = buf.get_u8();

        Self {
            data_rate: dr_power >> 4,
            tx_power: dr_power & 0x0f,
            ch_mask,
            ch_mask_cntl: (redundancy >> 4) & 0x07,
            nb_rep: redundancy & 0x0f,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkAdrAns {
    pub power_ack: bool,
    pub data_rate_ack: bool,
    pub channel_mask_ack: bool,
}

impl LinkAdrAns {
    pub const LEN: usize = 1;

    pub fn encode(&self) -> Result<[u8; LinkAdrAns::LEN], Error> {
        let b = ((self.power_ack as u8) << 2)
            | ((self.data_rate_ack as u8) << 1)
            | (self.channel_mask_ack as u8);

        Ok([b])
    }

    pub fn decode(data: &[u8; LinkAdrAns::LEN]) -> Self {
        Self {
            power_ack: bit(data[0], 2),
            data_rate_ack: bit(data[0], 1),
            channel_mask_ack: bit(data[0], 0),
        }
    }
}


/// Limit of the aggregated transmit duty cycle, as `1 / 2^max_duty_cycle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DutyCycleReq {
    pub max_duty_cycle: u8,
}

impl DutyCycleReq {
    pub const LEN: usize = 1;

    pub fn encode(&self) -> Result<[u8; DutyCycleReq::LEN], Error> {
        check("MaxDCycle", self.max_duty_cycle, 0x0f)?;
        Ok([self.max_duty_cycle])
    }

    pub fn decode(data: &[u8; DutyCycleReq::LEN]) -> Self {
        Self { max_duty_cycle: data[0] & 0x0f }
    }
}


/// Receive window parameters, sent by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxParamSetupReq {
    pub rx1_dr_offset: u8,
    pub rx2_data_rate: u8,
    /// RX2 frequency in Hz.
    pub frequency: u32,
}

impl RxParamSetupReq {
    pub const LEN: usize = 4;

    pub fn encode(&self) -> Result<[u8; RxParamSetupReq::LEN], Error> {
        check("RX1DRoffset", self.rx1_dr_offset, 0x07)?;
        check("RX2DataRate", self.rx2_data_rate, 0x0f)?;

        let mut out = [0; RxParamSetupReq::LEN];
        let mut buf = &mut out[..];

        buf.put_u8((self.rx1_dr_offset << 4) | self.rx2_data_rate);
        encode_freq(&mut buf, self.frequency)?;

        Ok(out)
    }

    pub fn decode(data: &[u8; RxParamSetupReq::LEN]) -> Self {
        let mut buf = &data[..];

        let settings = buf.get_u8();
        let frequency = decode_freq(&mut buf);

        Self {
            rx1_dr_offset: (settings >> 4) & 0x07,
            rx2_data_rate: settings & 0x0f,
            frequency,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxParamSetupAns {
    pub rx1_dr_offset_ack: bool,
    pub rx2_data_rate_ack: bool,
    pub channel_ack: bool,
}

impl RxParamSetupAns {
    pub const LEN: usize = 1;

    pub fn encode(&self) -> Result<[u8; RxParamSetupAns::LEN], Error> {
        let b = ((self.rx1_dr_offset_ack as u8) << 2)
            | ((self.rx2_data_rate_ack as u8) << 1)
            | (self.channel_ack as u8);

        Ok([b])
    }

    pub fn decode(data: &[u8; RxParamSetupAns::LEN]) -> Self {
        Self {
            rx1_dr_offset_ack: bit(data[0], 2),
            rx2_data_rate_ack: bit(data[0], 1),
            channel_ack: bit(data[0], 0),
        }
    }
}


/// Device status, sent by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DevStatusAns {
    /// 0: external power, 1..=254: battery level, 255: unknown.
    pub battery: u8,
    /// Demodulation SNR of the last `DevStatusReq` in dB, in `-32..=31`.
    pub margin: i8,
}

impl DevStatusAns {
    pub const LEN: usize = 2;

    pub fn encode(&self) -> Result<[u8; DevStatusAns::LEN], Error> {
        if !(-32..=31).contains(&self.margin) {
            Err(Error::Range { field: "Margin", value: self.margin as _, min: -32, max: 31 })?;
        }

        Ok([self.battery, (self.margin as u8) & 0x3f])
    }

    pub fn decode(data: &[u8; DevStatusAns::LEN]) -> Self {
        // sign-extend the 6-bit value
        let margin = ((data[1] << 2) as i8) >> 2;

        Self { battery: data[0], margin }
    }
}


/// Creates or modifies a radio channel, sent by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NewChannelReq {
    pub ch_index: u8,
    /// Channel frequency in Hz, zero disables the channel.
    pub frequency: u32,
    pub max_dr: u8,
    pub min_dr: u8,
}

impl NewChannelReq {
    pub const LEN: usize = 5;

    pub fn encode(&self) -> Result<[u8; NewChannelReq::LEN], Error> {
        check("MaxDR", self.max_dr, 0x0f)?;
        check("MinDR", self.min_dr, 0x0f)?;

        let mut out = [0; NewChannelReq::LEN];
        let mut buf = &mut out[..];

        buf.put_u8(self.ch_index);
        encode_freq(&mut buf, self.frequency)?;
        buf.put_u8((self.max_dr << 4) | self.min_dr);

        Ok(out)
    }

    pub fn decode(data: &[u8; NewChannelReq::LEN]) -> Self {
        let mut buf = &data[..];

        let ch_index = buf.get_u8();
        let frequency = decode_freq(&mut buf);
        let dr_range = buf.get_u8();

        Self {
            ch_index,
            frequency,
            max_dr: dr_range >> 4,
            min_dr: dr_range & 0x0f,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NewChannelAns {
    pub data_rate_range_ok: bool,
    pub channel_frequency_ok: bool,
}

impl NewChannelAns {
    pub const LEN: usize = 1;

    pub fn encode(&self) -> Result<[u8; NewChannelAns::LEN], Error> {
        Ok([((self.data_rate_range_ok as u8) << 1) | (self.channel_frequency_ok as u8)])
    }

    pub fn decode(data: &[u8; NewChannelAns::LEN]) -> Self {
        Self {
            data_rate_range_ok: bit(data[0], 1),
            channel_frequency_ok: bit(data[0], 0),
        }
    }
}


/// Delay between end of TX and the first receive window, in seconds (0 means 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RxTimingSetupReq {
    pub delay: u8,
}

impl RxTimingSetupReq {
    pub const LEN: usize = 1;

    pub fn encode(&self) -> Result<[u8; RxTimingSetupReq::LEN], Error> {
        check("Del", self.delay, 0x0f)?;
        Ok([self.delay])
    }

    pub fn decode(data: &[u8; RxTimingSetupReq::LEN]) -> Self {
        Self { delay: data[0] & 0x0f }
    }
}

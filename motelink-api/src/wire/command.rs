use super::error::{Result, WireError};

/// Application commands carried in the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Sensor asking nearby sinks to identify themselves
    AdvertiseRequest = 0x00,
    /// Sink announcing its presence (broadcast or unicast reply)
    Advertise = 0x01,
    /// Sensor asking a sink for a registry slot
    PairRequest = 0x02,
    /// Sink accepting a pairing
    PairConfirm = 0x03,
    /// Telemetry report from a paired sensor
    Data = 0x04,
}

impl Command {
    /// Creates a command from its wire byte
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0x00 => Ok(Self::AdvertiseRequest),
            0x01 => Ok(Self::Advertise),
            0x02 => Ok(Self::PairRequest),
            0x03 => Ok(Self::PairConfirm),
            0x04 => Ok(Self::Data),
            other => Err(WireError::UnknownCommand(other)),
        }
    }

    /// Returns the command name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdvertiseRequest => "advertise request",
            Self::Advertise => "advertise",
            Self::PairRequest => "pair request",
            Self::PairConfirm => "pair confirm",
            Self::Data => "data",
        }
    }
}

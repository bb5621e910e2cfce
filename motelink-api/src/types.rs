use core::fmt;

use serde::{Deserialize, Serialize};

/// Short network address assigned to a node by the stack.
///
/// Addresses may change across network joins; the stable key for a node is
/// its [`HardwareId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress(pub u16);

impl NodeAddress {
    /// Sentinel for "no address bound".
    pub const NULL: Self = Self(0xFFFF);
    /// Stack-level broadcast destination (shares the sentinel value).
    pub const BROADCAST: Self = Self(0xFFFF);

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Globally unique identifier burned into a radio node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HardwareId(pub [u8; 8]);

impl HardwareId {
    pub const SIZE: usize = 8;

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl From<[u8; 8]> for HardwareId {
    fn from(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Most significant byte first, the way node labels print it.
        for byte in self.0.iter().rev() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// One telemetry sample as carried in a `Data` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in millicelsius.
    pub temperature: i32,
    /// Relative humidity in raw sensor units.
    pub humidity: u32,
}

impl Reading {
    /// Encoded size: two 4-byte little-endian fields.
    pub const WIRE_SIZE: usize = 8;

    pub fn to_bytes(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buffer = [0u8; Self::WIRE_SIZE];
        buffer[..4].copy_from_slice(&self.temperature.to_le_bytes());
        buffer[4..].copy_from_slice(&self.humidity.to_le_bytes());
        buffer
    }

    /// Decodes a reading from the head of `data`; `None` if it is too short.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::WIRE_SIZE {
            return None;
        }

        Some(Self {
            temperature: i32::from_le_bytes([data[0], data[1], data[2], data[3]]),
            humidity: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
        })
    }

    /// Whole degrees Celsius, truncated toward zero.
    pub fn celsius(&self) -> i32 {
        self.temperature / 1000
    }

    /// Fractional part of the temperature in centidegrees (0..=99).
    pub fn centidegrees(&self) -> i32 {
        (self.temperature.abs() % 1000) / 10
    }
}

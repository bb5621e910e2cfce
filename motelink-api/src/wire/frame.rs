use alloc::vec::Vec;

use crate::types::{HardwareId, NodeAddress};

use super::command::Command;
use super::error::{Result, WireError};

/// Protocol identifier carried at the front of every frame.
pub const PROTOCOL_ID: u16 = 0xC00F;

const PROTOCOL_ID_OFFSET: usize = 0;
const COMMAND_OFFSET: usize = 2;
const HARDWARE_ID_OFFSET: usize = 3;
const ADDRESS_OFFSET: usize = 11;
const PAYLOAD_OFFSET: usize = 13;

/// One application message.
///
/// Frames are transient: built for a single send, or decoded from a single
/// received datagram. There is no partial-frame reassembly; every radio
/// delivery is exactly one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    /// Unique identifier of the sending node.
    pub hardware_id: HardwareId,
    /// Short address the sender held when it built the frame.
    pub source: NodeAddress,
    /// Command-dependent payload; empty for control commands.
    pub payload: Vec<u8>,
}

impl Frame {
    /// Fixed header size: id(2) + command(1) + hardware id(8) + address(2)
    pub const MIN_SIZE: usize = PAYLOAD_OFFSET;
    /// Radio MTU; larger frames never make it onto the air.
    pub const MAX_SIZE: usize = 127;
    /// Wire ceiling for the payload.
    pub const MAX_PAYLOAD: usize = Self::MAX_SIZE - Self::MIN_SIZE;

    /// Builds a payload-less control frame
    pub fn control(command: Command, hardware_id: HardwareId, source: NodeAddress) -> Self {
        Self {
            command,
            hardware_id,
            source,
            payload: Vec::new(),
        }
    }

    pub fn with_payload(
        command: Command,
        hardware_id: HardwareId,
        source: NodeAddress,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            command,
            hardware_id,
            source,
            payload,
        }
    }

    /// Encodes the frame into a fresh buffer
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.payload.len() > Self::MAX_PAYLOAD {
            return Err(WireError::PayloadTooLarge(self.payload.len()));
        }

        let mut buffer = Vec::with_capacity(Self::MIN_SIZE + self.payload.len());
        buffer.extend_from_slice(&PROTOCOL_ID.to_le_bytes());
        buffer.push(self.command as u8);
        buffer.extend_from_slice(self.hardware_id.as_bytes());
        buffer.extend_from_slice(&self.source.0.to_le_bytes());
        buffer.extend_from_slice(&self.payload);

        Ok(buffer)
    }

    /// Decodes one datagram into a frame
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::MIN_SIZE {
            return Err(WireError::TooShort(data.len()));
        }

        let protocol_id = u16::from_le_bytes([data[PROTOCOL_ID_OFFSET], data[PROTOCOL_ID_OFFSET + 1]]);
        if protocol_id != PROTOCOL_ID {
            return Err(WireError::ProtocolMismatch(protocol_id));
        }

        let command = Command::from_u8(data[COMMAND_OFFSET])?;

        let mut hardware_id = [0u8; HardwareId::SIZE];
        hardware_id.copy_from_slice(&data[HARDWARE_ID_OFFSET..HARDWARE_ID_OFFSET + HardwareId::SIZE]);

        let source = NodeAddress(u16::from_le_bytes([
            data[ADDRESS_OFFSET],
            data[ADDRESS_OFFSET + 1],
        ]));

        let payload = data[PAYLOAD_OFFSET..].to_vec();
        if payload.len() > Self::MAX_PAYLOAD {
            return Err(WireError::PayloadTooLarge(payload.len()));
        }

        Ok(Self {
            command,
            hardware_id: HardwareId(hardware_id),
            source,
            payload,
        })
    }

    /// Returns the encoded size in bytes
    pub fn size(&self) -> usize {
        Self::MIN_SIZE + self.payload.len()
    }
}

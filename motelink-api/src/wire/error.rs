use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Frame shorter than the fixed header
    TooShort(usize),
    /// Frame carries a foreign protocol identifier
    ProtocolMismatch(u16),
    /// Command byte outside the known set
    UnknownCommand(u8),
    /// Payload exceeds the wire ceiling
    PayloadTooLarge(usize),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort(len) => write!(f, "Frame too short: {} bytes", len),
            Self::ProtocolMismatch(id) => write!(f, "Protocol id mismatch: 0x{:04X}", id),
            Self::UnknownCommand(cmd) => write!(f, "Unknown command: 0x{:02X}", cmd),
            Self::PayloadTooLarge(len) => write!(f, "Payload too large: {} bytes", len),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WireError {}

pub type Result<T> = core::result::Result<T, WireError>;

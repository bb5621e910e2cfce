use core::fmt;

use motelink_api::WireError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Wire(WireError),
    RegistryFull,
    SendFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Wire(e) => write!(f, "Wire error: {}", e),
            Error::RegistryFull => write!(f, "Sensor registry full"),
            Error::SendFailed => write!(f, "Send rejected by the network stack"),
        }
    }
}

impl From<WireError> for Error {
    fn from(e: WireError) -> Self {
        Error::Wire(e)
    }
}

pub type Result<T> = core::result::Result<T, Error>;

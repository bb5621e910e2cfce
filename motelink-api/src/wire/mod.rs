mod command;
mod error;
mod frame;

pub use command::Command;
pub use error::{Result, WireError};
pub use frame::{Frame, PROTOCOL_ID};

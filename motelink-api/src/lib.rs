#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod time;
pub mod types;
pub mod wire;

pub use time::TimeProvider;
pub use types::{HardwareId, NodeAddress, Reading};
pub use wire::{Command, Frame, WireError};

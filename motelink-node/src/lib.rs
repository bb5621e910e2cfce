#![no_std]

extern crate alloc;

pub mod clock;
pub mod config;
pub mod error;
pub mod radio;
pub mod registry;
pub mod schedule;
pub mod sensor;
pub mod sink;

pub use clock::MonotonicClock;
pub use config::{SensorConfig, SinkConfig};
pub use error::{Error, Result};
pub use radio::Radio;
pub use registry::{SensorEntry, SensorRegistry};
pub use schedule::PeriodicTimer;
pub use sensor::{SensorClient, SensorSource};
pub use sink::Sink;

use alloc::vec::Vec;
use core::fmt::Debug;

use motelink_api::{Command, Frame, NodeAddress, Reading, WireError};

use crate::config::SensorConfig;
use crate::radio::{Radio, send_command};
use crate::schedule::PeriodicTimer;

/// Source of telemetry samples, typically an I2C temperature/humidity part.
///
/// Sampling may fail transiently; the client skips that cycle and tries
/// again on the next period.
pub trait SensorSource {
    type Error: Debug;

    fn sample(&mut self) -> Result<Reading, Self::Error>;
}

/// Sensor-side protocol state: sink discovery and pairing plus the periodic
/// sample-and-report cycle.
///
/// While the network is up and no sink is bound, the client broadcasts
/// advertise requests on the pairing period. A sink's advertise binds it as
/// the report destination and triggers a pair request; its pair confirm
/// starts the report cycle. Binding survives link bounces; only the timers
/// are suspended while the network is down.
pub struct SensorClient<R: Radio, S: SensorSource> {
    radio: R,
    source: S,
    config: SensorConfig,
    /// Bound sink, or the null sentinel while still discovering.
    sink: NodeAddress,
    paired: bool,
    pair_timer: PeriodicTimer,
    report_timer: PeriodicTimer,
    link_up: bool,
}

impl<R: Radio, S: SensorSource> SensorClient<R, S> {
    pub fn new(radio: R, source: S, config: SensorConfig) -> Self {
        let pair_timer = PeriodicTimer::new(config.pair_period_ms);
        let report_timer = PeriodicTimer::new(config.report_period_ms);

        Self {
            radio,
            source,
            config,
            sink: NodeAddress::NULL,
            paired: false,
            pair_timer,
            report_timer,
            link_up: false,
        }
    }

    pub fn sink_address(&self) -> NodeAddress {
        self.sink
    }

    pub fn is_paired(&self) -> bool {
        self.paired
    }

    /// Advances the periodic machinery: link transitions plus the pairing
    /// and report cycles.
    pub async fn tick(&mut self, now_ms: u64) {
        let up = self.radio.is_up();
        if up && !self.link_up {
            log::info!("Network up, joined as {}", self.radio.node_address());
            if self.paired {
                // Reporting resumes on a fresh period.
                self.report_timer.start(now_ms);
            } else {
                self.pair_timer.start_immediate(now_ms);
            }
        } else if !up && self.link_up {
            log::info!("Network down, suspending cycles");
            self.pair_timer.stop();
            self.report_timer.stop();
        }
        self.link_up = up;

        if !self.link_up {
            return;
        }

        if self.pair_timer.poll(now_ms) {
            self.pursue_sink().await;
        }

        if self.report_timer.poll(now_ms) {
            self.report().await;
        }
    }

    /// Dispatches one received datagram.
    pub async fn handle_frame(&mut self, data: &[u8], source: NodeAddress, now_ms: u64) {
        let frame = match Frame::decode(data) {
            Ok(frame) => frame,
            Err(WireError::UnknownCommand(command)) => {
                log::warn!("RX: unknown command 0x{:02X} from {}", command, source);
                return;
            }
            Err(_) => return,
        };

        match frame.command {
            Command::Advertise => {
                if self.paired {
                    return;
                }
                log::info!("RX: advertise from {}, requesting pairing", source);
                self.sink = source;
                let _ =
                    send_command(&mut self.radio, self.sink, Command::PairRequest, Vec::new())
                        .await;
            }
            Command::PairConfirm => {
                if self.sink.is_null() || source != self.sink {
                    log::debug!("RX: pair confirm from unexpected {}", source);
                    return;
                }
                log::info!("Paired with sink {}", source);
                self.paired = true;
                self.pair_timer.stop();
                self.report_timer.start(now_ms);
            }
            Command::AdvertiseRequest | Command::PairRequest | Command::Data => {
                // Sensor-to-sensor traffic; overheard, not ours to answer.
                log::debug!("RX: {} from {}", frame.command.name(), source);
            }
        }
    }

    /// One pairing-cycle step: broadcast discovery while no sink is known,
    /// re-request pairing while a known sink has not confirmed yet.
    async fn pursue_sink(&mut self) {
        if self.sink.is_null() {
            let _ = send_command(
                &mut self.radio,
                NodeAddress::BROADCAST,
                Command::AdvertiseRequest,
                Vec::new(),
            )
            .await;
        } else if !self.paired {
            let _ =
                send_command(&mut self.radio, self.sink, Command::PairRequest, Vec::new()).await;
        }
    }

    /// One report-cycle step: sample, encode, send. Failures skip the cycle;
    /// the period itself stays armed.
    async fn report(&mut self) {
        if self.sink.is_null() {
            return;
        }

        let reading = match self.source.sample() {
            Ok(reading) => reading,
            Err(e) => {
                log::warn!("Sample failed, skipping report: {:?}", e);
                return;
            }
        };

        match send_command(
            &mut self.radio,
            self.sink,
            Command::Data,
            reading.to_bytes().to_vec(),
        )
        .await
        {
            Ok(()) => log::debug!(
                "TX: data to {}: {}.{:02} C, humidity {}",
                self.sink,
                reading.celsius(),
                reading.centidegrees(),
                reading.humidity
            ),
            // Already logged by the send path.
            Err(_) => {}
        }
    }
}

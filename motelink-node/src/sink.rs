use alloc::vec::Vec;

use motelink_api::{Command, Frame, HardwareId, NodeAddress, Reading, WireError};

use crate::config::SinkConfig;
use crate::error::{Error, Result};
use crate::radio::{Radio, send_command};
use crate::registry::SensorRegistry;
use crate::schedule::PeriodicTimer;

/// Sink-side protocol state: the sensor registry plus the periodic advertise
/// and table-report triggers.
///
/// Driven from outside by `handle_frame` for every received datagram and by
/// `tick` from the host's application loop. Both run to completion before the
/// next event is processed, which makes pairing atomic with respect to other
/// inbound traffic.
pub struct Sink<R: Radio> {
    radio: R,
    config: SinkConfig,
    registry: SensorRegistry,
    advertise_timer: PeriodicTimer,
    report_timer: PeriodicTimer,
    link_up: bool,
}

impl<R: Radio> Sink<R> {
    pub fn new(radio: R, config: SinkConfig) -> Self {
        let registry = SensorRegistry::new(config.registry_capacity, config.max_payload_len);
        let advertise_timer = PeriodicTimer::new(config.advertise_period_ms);
        let report_timer = PeriodicTimer::new(config.report_period_ms);

        Self {
            radio,
            config,
            registry,
            advertise_timer,
            report_timer,
            link_up: false,
        }
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Advances the periodic machinery: link transitions, the stale-entry
    /// sweep, advertising, and the telemetry table report.
    pub async fn tick(&mut self, now_ms: u64) {
        let up = self.radio.is_up();
        if up && !self.link_up {
            log::info!("Network up, advertising as {}", self.radio.node_address());
            self.advertise_timer.start_immediate(now_ms);
            self.report_timer.start_immediate(now_ms);
        } else if !up && self.link_up {
            // All pairings die with the membership; sensors re-pair once the
            // sink is reachable again.
            log::info!("Network down, clearing sensor registry");
            self.registry.reset_all();
            self.advertise_timer.stop();
            self.report_timer.stop();
        }
        self.link_up = up;

        self.registry
            .sweep(now_ms, self.config.sensor_timeout_ms);

        if !self.link_up {
            return;
        }

        if self.advertise_timer.poll(now_ms) {
            if send_command(
                &mut self.radio,
                NodeAddress::BROADCAST,
                Command::Advertise,
                Vec::new(),
            )
            .await
            .is_ok()
            {
                log::debug!("TX: advertise to {}", NodeAddress::BROADCAST);
            }
        }

        if self.report_timer.poll(now_ms) {
            self.report_table();
        }
    }

    /// Dispatches one received datagram.
    ///
    /// `source` is the transport-level sender address; replies and registry
    /// commits use it rather than the address echoed inside the frame.
    /// Malformed datagrams are dropped here and never reach dispatch.
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
            Command::AdvertiseRequest => {
                log::info!("RX: advertise request from {}", source);
                let _ = send_command(&mut self.radio, source, Command::Advertise, Vec::new()).await;
            }
            Command::Advertise => {
                // Another sink on the air; nothing for us to track.
                log::info!("RX: advertise from {}", source);
            }
            Command::PairRequest => {
                log::info!("RX: pair request from {}", source);
                if let Err(e) = self.pair(frame.hardware_id, source, now_ms).await {
                    log::warn!(
                        "Pairing {} from {} abandoned: {}",
                        frame.hardware_id,
                        source,
                        e
                    );
                }
            }
            Command::PairConfirm => {
                log::info!("RX: pair confirm from {}", source);
            }
            Command::Data => self.store_report(&frame, source, now_ms),
        }
    }

    /// Confirm-before-commit pairing: the slot becomes occupied only after
    /// the pair confirm was accepted for delivery.
    async fn pair(
        &mut self,
        hardware_id: HardwareId,
        source: NodeAddress,
        now_ms: u64,
    ) -> Result<()> {
        let index = self
            .registry
            .find_or_allocate(hardware_id)
            .ok_or(Error::RegistryFull)?;

        send_command(&mut self.radio, source, Command::PairConfirm, Vec::new()).await?;

        self.registry.commit(index, source, hardware_id, now_ms);
        log::info!("Paired {} at {} (slot {})", hardware_id, source, index);
        Ok(())
    }

    fn store_report(&mut self, frame: &Frame, source: NodeAddress, now_ms: u64) {
        let Some(index) = self.registry.find(frame.hardware_id) else {
            // Unknown sender; stays silent until it pairs again.
            log::debug!("RX: data from unpaired {}", source);
            return;
        };

        if self.registry.update_payload(index, &frame.payload, now_ms) {
            log::debug!("RX: data from {} ({} bytes)", source, frame.payload.len());
        } else {
            log::warn!(
                "RX: data from {} dropped, payload {} bytes over limit",
                source,
                frame.payload.len()
            );
        }
    }

    /// Logs one line per paired sensor with its latest decoded reading.
    fn report_table(&self) {
        for (_, entry) in self.registry.iter() {
            if let Some(reading) = Reading::from_bytes(entry.payload()) {
                log::info!(
                    "Sensor {}: {}.{:02} C, humidity {}",
                    entry.hardware_id,
                    reading.celsius(),
                    reading.centidegrees(),
                    reading.humidity
                );
            }
        }
    }
}

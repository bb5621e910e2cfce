use alloc::vec::Vec;

use motelink_api::{HardwareId, NodeAddress};

/// One paired sensor as seen by the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorEntry {
    /// Short address the sensor paired from; never the null sentinel while
    /// the slot is occupied.
    pub node_address: NodeAddress,
    /// Registry key.
    pub hardware_id: HardwareId,
    /// Uptime stamp of the last pairing or telemetry report.
    pub last_report_ms: u64,
    payload: Vec<u8>,
}

impl SensorEntry {
    /// Latest raw telemetry payload; empty until the first report arrives.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Bounded table of paired sensors, keyed by hardware id.
///
/// Slots keep their index for the lifetime of a pairing: eviction empties a
/// slot but never compacts the table. An index handed out by a lookup stays
/// valid until the entry it names is evicted or the table is reset.
pub struct SensorRegistry {
    slots: Vec<Option<SensorEntry>>,
    max_payload_len: usize,
}

impl SensorRegistry {
    pub fn new(capacity: usize, max_payload_len: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Self {
            slots,
            max_payload_len,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn get(&self, index: usize) -> Option<&SensorEntry> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Iterates occupied slots in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SensorEntry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|entry| (index, entry)))
    }

    /// Returns the slot holding `hardware_id`, if any.
    pub fn find(&self, hardware_id: HardwareId) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|entry| entry.hardware_id == hardware_id)
        })
    }

    /// Returns the slot for `hardware_id`: its existing slot when present,
    /// otherwise the first empty one. `None` means the table is full and the
    /// caller must not commit a new pairing.
    pub fn find_or_allocate(&self, hardware_id: HardwareId) -> Option<usize> {
        self.find(hardware_id)
            .or_else(|| self.slots.iter().position(|slot| slot.is_none()))
    }

    /// Occupies `index` for a freshly confirmed pairing, discarding whatever
    /// the slot held before. Only called after the pair-confirm send went
    /// through.
    pub fn commit(
        &mut self,
        index: usize,
        node_address: NodeAddress,
        hardware_id: HardwareId,
        now_ms: u64,
    ) {
        self.slots[index] = Some(SensorEntry {
            node_address,
            hardware_id,
            last_report_ms: now_ms,
            payload: Vec::new(),
        });
    }

    /// Stores a telemetry payload and refreshes the entry's age.
    ///
    /// Returns `false` when the slot is empty or the payload exceeds the
    /// configured maximum; the entry is left untouched in both cases.
    pub fn update_payload(&mut self, index: usize, payload: &[u8], now_ms: u64) -> bool {
        if payload.len() > self.max_payload_len {
            return false;
        }

        match self.slots.get_mut(index).and_then(|slot| slot.as_mut()) {
            Some(entry) => {
                entry.payload.clear();
                entry.payload.extend_from_slice(payload);
                entry.last_report_ms = now_ms;
                true
            }
            None => false,
        }
    }

    /// Evicts every entry older than `timeout_ms`, in slot order.
    ///
    /// Age exactly at the boundary survives; eviction needs strictly more.
    /// Returns the number of evicted entries.
    pub fn sweep(&mut self, now_ms: u64, timeout_ms: u64) -> usize {
        let mut evicted = 0;

        for slot in &mut self.slots {
            if let Some(entry) = slot {
                if now_ms.saturating_sub(entry.last_report_ms) > timeout_ms {
                    log::info!(
                        "Timed out sensor {} at {}",
                        entry.hardware_id,
                        entry.node_address
                    );
                    *slot = None;
                    evicted += 1;
                }
            }
        }

        evicted
    }

    /// Empties every slot; used when the sink loses network membership.
    pub fn reset_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_A: HardwareId = HardwareId([0x01; 8]);
    const ID_B: HardwareId = HardwareId([0x02; 8]);
    const ID_C: HardwareId = HardwareId([0x03; 8]);

    fn paired_registry() -> SensorRegistry {
        let mut registry = SensorRegistry::new(2, 8);
        registry.commit(0, NodeAddress(0x1000), ID_A, 100);
        registry
    }

    #[test]
    fn find_or_allocate_prefers_existing_slot() {
        let mut registry = SensorRegistry::new(3, 8);
        registry.commit(0, NodeAddress(0x1000), ID_A, 0);
        registry.commit(1, NodeAddress(0x1001), ID_B, 0);

        assert_eq!(registry.find_or_allocate(ID_B), Some(1));
        assert_eq!(registry.find_or_allocate(ID_C), Some(2));
    }

    #[test]
    fn full_table_allocates_nothing() {
        let mut registry = SensorRegistry::new(2, 8);
        registry.commit(0, NodeAddress(0x1000), ID_A, 0);
        registry.commit(1, NodeAddress(0x1001), ID_B, 0);

        assert_eq!(registry.find_or_allocate(ID_C), None);
        // Known sensors still resolve.
        assert_eq!(registry.find_or_allocate(ID_A), Some(0));
        assert_eq!(registry.occupied(), 2);
    }

    #[test]
    fn recommit_keeps_slot_index_and_drops_stale_payload() {
        let mut registry = paired_registry();
        assert!(registry.update_payload(0, &[1, 2, 3], 150));

        // Same sensor pairs again from a new address.
        let index = registry.find_or_allocate(ID_A).unwrap();
        assert_eq!(index, 0);
        registry.commit(index, NodeAddress(0x2000), ID_A, 200);

        let entry = registry.get(0).unwrap();
        assert_eq!(entry.node_address, NodeAddress(0x2000));
        assert_eq!(entry.last_report_ms, 200);
        assert!(entry.payload().is_empty());
        assert_eq!(registry.occupied(), 1);
    }

    #[test]
    fn update_refreshes_timestamp_without_moving_entry() {
        let mut registry = paired_registry();
        assert!(registry.update_payload(0, &[0xAA, 0xBB], 500));

        let entry = registry.get(0).unwrap();
        assert_eq!(entry.payload(), &[0xAA, 0xBB]);
        assert_eq!(entry.last_report_ms, 500);
        assert_eq!(entry.node_address, NodeAddress(0x1000));
        assert_eq!(registry.find(ID_A), Some(0));
    }

    #[test]
    fn update_rejects_oversized_payload() {
        let mut registry = paired_registry();
        assert!(!registry.update_payload(0, &[0x00; 9], 500));

        let entry = registry.get(0).unwrap();
        assert!(entry.payload().is_empty());
        assert_eq!(entry.last_report_ms, 100);
    }

    #[test]
    fn update_rejects_empty_slot() {
        let mut registry = SensorRegistry::new(2, 8);
        assert!(!registry.update_payload(1, &[0x01], 500));
        assert_eq!(registry.occupied(), 0);
    }

    #[test]
    fn sweep_evicts_strictly_past_timeout() {
        let mut registry = paired_registry();

        // Age exactly at the timeout stays.
        assert_eq!(registry.sweep(100 + 60_000, 60_000), 0);
        assert_eq!(registry.occupied(), 1);

        // One millisecond past it goes.
        assert_eq!(registry.sweep(100 + 60_000 + 1, 60_000), 1);
        assert_eq!(registry.occupied(), 0);
        assert_eq!(registry.find(ID_A), None);
    }

    #[test]
    fn sweep_only_touches_stale_entries() {
        let mut registry = SensorRegistry::new(3, 8);
        registry.commit(0, NodeAddress(0x1000), ID_A, 0);
        registry.commit(1, NodeAddress(0x1001), ID_B, 5_000);

        assert_eq!(registry.sweep(6_000, 1_000), 1);
        assert_eq!(registry.find(ID_A), None);
        assert_eq!(registry.find(ID_B), Some(1));
    }

    #[test]
    fn reset_empties_every_slot() {
        let mut registry = SensorRegistry::new(2, 8);
        registry.commit(0, NodeAddress(0x1000), ID_A, 0);
        registry.commit(1, NodeAddress(0x1001), ID_B, 0);

        registry.reset_all();

        assert_eq!(registry.occupied(), 0);
        assert_eq!(registry.iter().count(), 0);
        // Capacity is unchanged, slots are reusable.
        assert_eq!(registry.capacity(), 2);
        assert_eq!(registry.find_or_allocate(ID_C), Some(0));
    }
}

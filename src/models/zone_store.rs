use std::collections::VecDeque;

use crate::models::zone::{Zone, ZoneKind};

/// Bounded, newest-first collection of zones of one kind.
///
/// Broken zones stay in the store and count against capacity until they age
/// out; queries that care about liveness filter them.
#[derive(Debug, Clone)]
pub struct ZoneStore {
    kind: ZoneKind,
    capacity: usize,
    zones: VecDeque<Zone>,
}

impl ZoneStore {
    pub fn new(kind: ZoneKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            zones: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Put `zone` at the front, dropping the oldest entry first if full.
    /// Returns the evicted zone, if any.
    pub fn insert(&mut self, zone: Zone) -> Option<Zone> {
        debug_assert_eq!(zone.kind, self.kind, "zone stored under the wrong kind");
        let evicted = if self.zones.len() >= self.capacity {
            self.zones.pop_back()
        } else {
            None
        };
        self.zones.push_front(zone);
        evicted
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Zone> {
        self.zones.iter_mut()
    }

    pub fn live(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter().filter(|z| z.is_live())
    }

    /// Copies of the Live zones, newest first.
    pub fn live_zones(&self) -> Vec<Zone> {
        self.live().cloned().collect()
    }

    /// Copies of every held zone, Live and Broken, newest first.
    pub fn all_zones(&self) -> Vec<Zone> {
        self.zones.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoneConfig;
    use crate::domain::{Bar, SwingKind, SwingPoint};

    fn supply_at(bar_index: u64, price: f64) -> Zone {
        let swing = SwingPoint {
            bar_index,
            time_ms: bar_index as i64 * 60_000,
            price,
            kind: SwingKind::High,
        };
        Zone::from_swing(&swing, 1.0, &ZoneConfig::default())
    }

    #[test]
    fn insertion_evicts_oldest_when_full() {
        let mut store = ZoneStore::new(ZoneKind::Supply, 3);
        for (i, price) in [100.0, 110.0, 120.0].into_iter().enumerate() {
            assert!(store.insert(supply_at(i as u64, price)).is_none());
        }

        let evicted = store.insert(supply_at(3, 130.0)).expect("store was full");
        assert_eq!(evicted.origin_bar_index, 0);
        assert_eq!(store.len(), 3);

        let order: Vec<u64> = store.iter().map(|z| z.origin_bar_index).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[test]
    fn broken_zones_count_against_capacity_but_not_live_queries() {
        let mut store = ZoneStore::new(ZoneKind::Supply, 2);
        store.insert(supply_at(0, 100.0));
        store.insert(supply_at(1, 120.0));

        let bar = Bar::new(5, 300_000, 99.0, 101.0, 98.0, 100.5);
        for zone in store.iter_mut() {
            if zone.is_broken_by(bar.close) {
                zone.mark_broken(&bar);
            }
        }

        assert_eq!(store.len(), 2);
        let live = store.live_zones();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].origin_bar_index, 1);
        assert_eq!(store.all_zones().len(), 2);
    }
}

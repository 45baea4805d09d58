use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;

use crate::BiomeGrid;

type RegionKey = (i32, i32);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

// Grids and their recency order change together; every key in `order` has a grid.
#[derive(Default)]
struct Slots {
    grids: HashMap<RegionKey, Arc<BiomeGrid>>,
    order: VecDeque<RegionKey>,
}

impl Slots {
    fn touch(&mut self, region: RegionKey) {
        if let Some(pos) = self.order.iter().position(|r| *r == region) {
            self.order.remove(pos);
        }
        self.order.push_back(region);
    }
}

/// Least-recently-used cache of loaded region grids, shared by render workers.
pub struct GridCache {
    slots: Mutex<Slots>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl GridCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            capacity: capacity.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, region: RegionKey) -> Option<Arc<BiomeGrid>> {
        let mut slots = self.lock();
        match slots.grids.get(&region).cloned() {
            Some(grid) => {
                slots.touch(region);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(grid)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, region: RegionKey, grid: Arc<BiomeGrid>) {
        let mut slots = self.lock();
        slots.grids.insert(region, grid);
        slots.touch(region);
        while slots.order.len() > self.capacity {
            let Some(old) = slots.order.pop_front() else {
                break;
            };
            if slots.grids.remove(&old).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn stats(&self) -> GridCacheStats {
        GridCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.lock().grids.len(),
        }
    }
}

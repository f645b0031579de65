//! Retained word region.
//!
//! Models the no-init RAM block a target keeps across a warm reset: a
//! `static` of atomics written word by word, with the valid marker
//! published last so a torn write never reads back as a record.

use super::{FaultRecord, FaultStore, StoreResult};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

const VALID: u32 = 0xFA17_FA17;

/// Fixed block of words holding one fault record.
#[derive(Debug)]
pub struct RetainedRegion {
    marker: AtomicU32,
    id: AtomicU32,
    pc: AtomicU32,
    info: AtomicUsize,
    code: AtomicU32,
}

impl RetainedRegion {
    pub const fn new() -> Self {
        Self {
            marker: AtomicU32::new(0),
            id: AtomicU32::new(0),
            pc: AtomicU32::new(0),
            info: AtomicUsize::new(0),
            code: AtomicU32::new(0),
        }
    }
}

impl Default for RetainedRegion {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide region used when no other store is installed.
static GLOBAL_REGION: RetainedRegion = RetainedRegion::new();

/// [`FaultStore`] over a `'static` [`RetainedRegion`].
#[derive(Debug, Clone, Copy)]
pub struct RetainedStore {
    region: &'static RetainedRegion,
}

impl RetainedStore {
    pub const fn new(region: &'static RetainedRegion) -> Self {
        Self { region }
    }

    /// Store backed by the process-wide region.
    pub fn global() -> Self {
        Self::new(&GLOBAL_REGION)
    }

    /// Infallible save, usable from any context.
    pub fn write(&self, record: &FaultRecord) {
        let region = self.region;
        region.marker.store(0, Ordering::Release);
        region.id.store(record.id, Ordering::Relaxed);
        region.pc.store(record.pc, Ordering::Relaxed);
        region.info.store(record.info, Ordering::Relaxed);
        region.code.store(record.code, Ordering::Relaxed);
        region.marker.store(VALID, Ordering::Release);
    }

    /// Infallible load.
    pub fn read(&self) -> Option<FaultRecord> {
        let region = self.region;
        if region.marker.load(Ordering::Acquire) != VALID {
            return None;
        }
        Some(FaultRecord {
            id: region.id.load(Ordering::Relaxed),
            pc: region.pc.load(Ordering::Relaxed),
            info: region.info.load(Ordering::Relaxed),
            code: region.code.load(Ordering::Relaxed),
        })
    }
}

impl FaultStore for RetainedStore {
    fn save(&mut self, record: &FaultRecord) -> StoreResult<()> {
        self.write(record);
        Ok(())
    }

    fn load(&self) -> StoreResult<Option<FaultRecord>> {
        Ok(self.read())
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.region.marker.store(0, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaked_store() -> RetainedStore {
        RetainedStore::new(Box::leak(Box::new(RetainedRegion::new())))
    }

    #[test]
    fn empty_region_has_no_record() {
        assert_eq!(leaked_store().load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let mut store = leaked_store();
        let record = FaultRecord {
            id: 0x4001,
            pc: 0x1000,
            info: 0xDEAD_BEEF,
            code: 0x0B,
        };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
    }

    #[test]
    fn later_save_overwrites() {
        let mut store = leaked_store();
        store.save(&FaultRecord { id: 1, pc: 1, info: 1, code: 0 }).unwrap();
        store.save(&FaultRecord { id: 2, pc: 2, info: 2, code: 0 }).unwrap();
        assert_eq!(store.load().unwrap(), Some(FaultRecord { id: 2, pc: 2, info: 2, code: 0 }));
    }

    #[test]
    fn clear_forgets_record() {
        let mut store = leaked_store();
        store.save(&FaultRecord { id: 1, pc: 0, info: 0, code: 0 }).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn copies_share_the_region() {
        let store = leaked_store();
        let mut writer = store;
        writer.save(&FaultRecord { id: 9, pc: 8, info: 7, code: 0 }).unwrap();
        assert_eq!(store.read(), Some(FaultRecord { id: 9, pc: 8, info: 7, code: 0 }));
    }
}

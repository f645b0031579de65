//! Escalation path and terminal fault handling.
//!
//! Every failed check lands in the installed [`FaultHandler`]. The default
//! handler reports through the configured sink and then calls
//! [`handle_fault`], which persists the fault triple and never returns.
//!
//! ## States
//!
//! ```text
//!   NOMINAL ──(failed check → handle_fault)──► FAULTED   (terminal)
//! ```
//!
//! The fault path is single-entry: the first fault halts the caller and no
//! locking discipline is needed beyond keeping the globals consistent.

use crate::fault::{AssertInfo, ErrorInfo, FaultEvent, StatusCode};
use crate::report::{log_fault, print_fault};
use crate::store::{FaultRecord, FaultStore, MappedStore, RetainedStore, StoreResult};
use fault_common::config::{FaultConfig, SinkKind, StoreBackend};
use fault_common::consts::PC_UNAVAILABLE;
use parking_lot::{const_mutex, const_rwlock, Mutex, RwLock};
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use tracing::{debug, info, warn};

/// Receives every escalated fault. Must not return.
pub type FaultHandler = fn(u32, &FaultEvent) -> !;

static HANDLER: RwLock<FaultHandler> = const_rwlock(default_fault_handler as FaultHandler);
static STORE: Mutex<Option<Box<dyn FaultStore>>> = const_mutex(None);
static SINK: AtomicU8 = AtomicU8::new(SinkKind::Log as u8);
static FAULTED: AtomicBool = AtomicBool::new(false);

// ─── Installation ───────────────────────────────────────────────────

/// Replace the fault handler.
pub fn set_fault_handler(handler: FaultHandler) {
    *HANDLER.write() = handler;
}

/// Select the sink used by [`default_fault_handler`].
pub fn set_report_sink(sink: SinkKind) {
    SINK.store(sink as u8, Ordering::Relaxed);
}

/// Sink currently used by [`default_fault_handler`].
pub fn report_sink() -> SinkKind {
    SinkKind::from_u8(SINK.load(Ordering::Relaxed)).unwrap_or_default()
}

/// Replace the persistence store used by [`handle_fault`].
pub fn set_fault_store(store: Box<dyn FaultStore>) {
    *STORE.lock() = Some(store);
}

/// Wire sink and store from configuration.
///
/// Opens the record file for the `file` backend; the retained backend
/// always succeeds.
pub fn install(config: &FaultConfig) -> StoreResult<()> {
    set_report_sink(config.report.sink);

    match config.store.backend {
        StoreBackend::Retained => set_fault_store(Box::new(RetainedStore::global())),
        StoreBackend::File => {
            let store = MappedStore::open(config.store.record_path())?;
            set_fault_store(Box::new(store));
        }
    }

    info!(
        sink = ?config.report.sink,
        backend = ?config.store.backend,
        "Fault reporter installed for {}",
        config.shared.service_name
    );
    Ok(())
}

/// Whether [`handle_fault`] has been entered.
pub fn is_faulted() -> bool {
    FAULTED.load(Ordering::Acquire)
}

// ─── Escalation ─────────────────────────────────────────────────────

/// Hand `fault` to the installed handler.
#[cold]
pub fn escalate(pc: u32, fault: &FaultEvent) -> ! {
    // Copy the pointer out so the lock is not held by a handler that never returns.
    let handler = *HANDLER.read();
    handler(pc, fault)
}

/// Verbose path: escalate `code` with the caller's line and file.
#[cold]
#[track_caller]
pub fn handle_checked_result(code: StatusCode) -> ! {
    let info = ErrorInfo::at(code, Location::caller());
    escalate(PC_UNAVAILABLE, &FaultEvent::Error(info))
}

/// Minimal path: escalate `code` without location data.
#[cold]
pub fn handle_checked_result_minimal(code: StatusCode) -> ! {
    escalate(PC_UNAVAILABLE, &FaultEvent::Error(ErrorInfo::bare(code)))
}

/// Escalate a failed assertion at the caller's location.
#[cold]
#[track_caller]
pub fn handle_assert() -> ! {
    escalate(PC_UNAVAILABLE, &FaultEvent::Assert(AssertInfo::at(Location::caller())))
}

/// Escalate a failed assertion without location data.
#[cold]
pub fn handle_assert_minimal() -> ! {
    escalate(PC_UNAVAILABLE, &FaultEvent::Assert(AssertInfo::bare()))
}

/// Report through the configured sink, then [`handle_fault`].
pub fn default_fault_handler(pc: u32, fault: &FaultEvent) -> ! {
    let sink = report_sink();
    if sink.logs() {
        log_fault(pc, fault);
    }
    if sink.prints() {
        print_fault(pc, fault);
    }
    handle_fault(pc, fault)
}

// ─── Terminal State ─────────────────────────────────────────────────

/// Persist `(id, pc, info)` and park the calling thread forever.
///
/// Persistence failures are logged and otherwise ignored; the halt always
/// happens. The only exit is an external reset.
pub fn handle_fault(pc: u32, fault: &FaultEvent) -> ! {
    FAULTED.store(true, Ordering::Release);

    let record = FaultRecord::capture(pc, fault);
    persist(&record);
    debug!(id = record.id, pc = record.pc, "Fault persisted, halting");

    halt()
}

fn persist(record: &FaultRecord) {
    // Fault raised while the store is busy: fall back to the retained region.
    let Some(mut guard) = STORE.try_lock() else {
        RetainedStore::global().write(record);
        return;
    };

    let result = match &mut *guard {
        Some(store) => store.save(record),
        None => {
            RetainedStore::global().write(record);
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!("Failed to persist fault record: {}", e);
        RetainedStore::global().write(record);
    }
}

fn halt() -> ! {
    loop {
        std::thread::park();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_selection_roundtrip() {
        let previous = report_sink();
        set_report_sink(SinkKind::Both);
        assert_eq!(report_sink(), SinkKind::Both);
        set_report_sink(previous);
    }
}

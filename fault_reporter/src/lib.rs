//! # Fault Reporter
//!
//! Captures unrecoverable or flagged error conditions (status code, source
//! location, program counter) and hands them to a fault handler that reports
//! them and parks the device in a terminal state for post-mortem inspection.
//!
//! ## Flow
//!
//! ```text
//!  check_result / check_bool / check_assert
//!                 │ failure
//!                 ▼
//!     installed FaultHandler (fn(pc, &FaultEvent) -> !)
//!                 │ default
//!                 ▼
//!   log_fault / print_fault ──► handle_fault ──► FaultStore::save ──► halt
//! ```
//!
//! ## Build Variants
//!
//! With the `capture-location` feature (default) failed checks record the
//! caller's line and file. Without it only the status code is forwarded.
//! Call sites are identical in both builds.

pub mod check;
pub mod fault;
pub mod handler;
pub mod report;
pub mod store;

pub use crate::check::{check_assert, check_bool, check_result, OrFault};
pub use crate::fault::{AssertInfo, ErrorInfo, FaultEvent, FaultId, StatusCode};
pub use crate::handler::{
    default_fault_handler, escalate, handle_assert, handle_assert_minimal, handle_checked_result,
    handle_checked_result_minimal, handle_fault, install, is_faulted, report_sink,
    set_fault_handler, set_fault_store, set_report_sink, FaultHandler,
};
pub use crate::report::{log_fault, print_fault, write_fault};
pub use crate::store::{FaultRecord, FaultStore, MappedStore, RetainedStore, StoreError};

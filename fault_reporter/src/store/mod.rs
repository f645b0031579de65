//! Fault persistence.
//!
//! [`handle_fault`](crate::handler::handle_fault) stashes the fault triple
//! (identifier, program counter, info word) somewhere that survives a soft
//! reset so it can be inspected afterwards. The error code of an
//! `SDK_ERROR` fault rides along, since the info word is a stack address
//! that means nothing once the faulting process is gone.
//!
//! - [`RetainedStore`]: a fixed region of atomic words.
//! - [`MappedStore`]: a memory-mapped record file.

mod mapped;
mod retained;

pub use mapped::{MappedStore, RECORD_BYTES, RECORD_MAGIC};
pub use retained::{RetainedRegion, RetainedStore};

use crate::fault::{FaultEvent, FaultId, StatusCode};
use thiserror::Error;

/// The machine words persisted for a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultRecord {
    /// Raw fault identifier.
    pub id: u32,
    /// Program counter, 0 when unavailable.
    pub pc: u32,
    /// Info word (payload address or opaque value).
    pub info: usize,
    /// Error code for `SDK_ERROR`, 0 for every other identifier.
    pub code: u32,
}

impl FaultRecord {
    /// Capture the words describing `fault`.
    pub fn capture(pc: u32, fault: &FaultEvent) -> Self {
        Self {
            id: fault.id().raw(),
            pc,
            info: fault.info_addr(),
            code: fault.error_code().map_or(0, StatusCode::raw),
        }
    }

    #[inline]
    pub const fn fault_id(&self) -> FaultId {
        FaultId::new(self.id)
    }

    /// Persisted error code, present only for `SDK_ERROR` records.
    pub fn error_code(&self) -> Option<StatusCode> {
        (self.fault_id() == FaultId::SDK_ERROR).then_some(StatusCode::new(self.code))
    }
}

/// Errors that can occur while persisting or reading a fault record.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record file has an unexpected size.
    #[error("Invalid record file size: {size} bytes (expected {expected})")]
    InvalidSize {
        /// Actual size in bytes
        size: u64,
        /// Required size in bytes
        expected: u64,
    },

    /// IO error
    #[error("IO error: {source}")]
    Io {
        /// Source IO error
        #[from]
        source: std::io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage for one [`FaultRecord`].
///
/// Contract: a saved record stays readable across a soft reset until it is
/// cleared or overwritten.
pub trait FaultStore: Send {
    /// Persist `record`, replacing any previous one.
    fn save(&mut self, record: &FaultRecord) -> StoreResult<()>;

    /// The persisted record, if any.
    fn load(&self) -> StoreResult<Option<FaultRecord>>;

    /// Forget the persisted record.
    fn clear(&mut self) -> StoreResult<()>;
}

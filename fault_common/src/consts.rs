//! Fault identifier namespace and status constants.
//!
//! Single source of truth for the numeric values that external callers
//! pattern-match on. The offsets from [`FAULT_ID_SDK_RANGE_START`] are part
//! of the wire contract and must not change.

use static_assertions::const_assert;

/// Start of the identifier range reserved for SDK-defined faults.
pub const FAULT_ID_SDK_RANGE_START: u32 = 0x0000_4000;

/// A failed checked operation. Payload is an error record (line, file, code).
pub const FAULT_ID_SDK_ERROR: u32 = FAULT_ID_SDK_RANGE_START + 1;

/// A violated assertion. Payload is an assert record (line, file).
pub const FAULT_ID_SDK_ASSERT: u32 = FAULT_ID_SDK_RANGE_START + 2;

/// The only status value treated as a non-failing outcome.
pub const STATUS_SUCCESS: u32 = 0;

/// Code escalated by a failed boolean check.
pub const STATUS_NEUTRAL: u32 = 0;

/// Program counter reported when the caller cannot capture one.
pub const PC_UNAVAILABLE: u32 = 0;

/// Default path of the memory-mapped fault record.
pub const DEFAULT_STORE_PATH: &str = "/var/lib/fault/record.bin";

const_assert!(FAULT_ID_SDK_ERROR != FAULT_ID_SDK_ASSERT);

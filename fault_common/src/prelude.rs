//! Prelude module for common re-exports.
//!
//! ```rust
//! use fault_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    load_fault_config, ConfigError, ConfigLoader, FaultConfig, SharedConfig, SinkKind,
    StoreBackend,
};

// ─── Fault Constants ────────────────────────────────────────────────
pub use crate::consts::{
    FAULT_ID_SDK_ASSERT, FAULT_ID_SDK_ERROR, FAULT_ID_SDK_RANGE_START, STATUS_SUCCESS,
};

//! Fault Common Library
//!
//! Shared constants and configuration loading for the fault reporting
//! workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Fault identifier range and status sentinel
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use fault_common::consts::{FAULT_ID_SDK_ERROR, STATUS_SUCCESS};
//! use fault_common::config::{ConfigLoader, FaultConfig};
//! ```

pub mod config;
pub mod consts;
pub mod prelude;

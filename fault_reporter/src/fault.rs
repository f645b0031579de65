//! Fault data model.
//!
//! A [`FaultEvent`] carries its identifier and the matching payload in one
//! value, so a reporter can never decode an error record as an assert record
//! or the other way round.

use fault_common::consts::{
    FAULT_ID_SDK_ASSERT, FAULT_ID_SDK_ERROR, FAULT_ID_SDK_RANGE_START, STATUS_NEUTRAL,
    STATUS_SUCCESS,
};
use std::fmt;
use std::panic::Location;

// ─── Identifiers ────────────────────────────────────────────────────

/// Numeric fault identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaultId(u32);

impl FaultId {
    /// Start of the SDK-reserved range.
    pub const SDK_RANGE_START: Self = Self(FAULT_ID_SDK_RANGE_START);
    /// Failed checked operation.
    pub const SDK_ERROR: Self = Self(FAULT_ID_SDK_ERROR);
    /// Violated assertion.
    pub const SDK_ASSERT: Self = Self(FAULT_ID_SDK_ASSERT);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Symbolic name for the well-known identifiers.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            FAULT_ID_SDK_ERROR => Some("SDK_ERROR"),
            FAULT_ID_SDK_ASSERT => Some("SDK_ASSERT"),
            _ => None,
        }
    }
}

impl From<u32> for FaultId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<FaultId> for u32 {
    fn from(id: FaultId) -> Self {
        id.0
    }
}

impl fmt::Display for FaultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

// ─── Status Codes ───────────────────────────────────────────────────

/// Opaque status value returned by a fallible operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusCode(u32);

impl StatusCode {
    /// The only non-failing status.
    pub const SUCCESS: Self = Self(STATUS_SUCCESS);
    /// Code carried by a failed boolean check.
    pub const NEUTRAL: Self = Self(STATUS_NEUTRAL);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == STATUS_SUCCESS
    }
}

impl From<u32> for StatusCode {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

/// Hex, at least two digits (`0x0B`).
impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

// ─── Payload Records ────────────────────────────────────────────────

/// Line numbers past `u16::MAX` saturate.
fn clamp_line(line: u32) -> u16 {
    u16::try_from(line).unwrap_or(u16::MAX)
}

/// Payload of [`FaultId::SDK_ERROR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Line of the failed check, 0 when not captured.
    pub line: u16,
    /// File of the failed check.
    pub file: Option<&'static str>,
    /// Status returned by the failed operation.
    pub code: StatusCode,
}

impl ErrorInfo {
    /// Record for a failure observed at `location`.
    pub fn at(code: StatusCode, location: &'static Location<'static>) -> Self {
        Self {
            line: clamp_line(location.line()),
            file: Some(location.file()),
            code,
        }
    }

    /// Record without location data (minimal builds).
    pub const fn bare(code: StatusCode) -> Self {
        Self {
            line: 0,
            file: None,
            code,
        }
    }

    /// `(line, file)` when a file name was captured.
    #[inline]
    pub fn location(&self) -> Option<(u16, &'static str)> {
        self.file.map(|file| (self.line, file))
    }
}

/// Payload of [`FaultId::SDK_ASSERT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertInfo {
    /// Line of the violated assertion, 0 when not captured.
    pub line: u16,
    /// File of the violated assertion.
    pub file: Option<&'static str>,
}

impl AssertInfo {
    /// Record for an assertion violated at `location`.
    pub fn at(location: &'static Location<'static>) -> Self {
        Self {
            line: clamp_line(location.line()),
            file: Some(location.file()),
        }
    }

    /// Record without location data.
    pub const fn bare() -> Self {
        Self {
            line: 0,
            file: None,
        }
    }

    /// `(line, file)` when a file name was captured.
    #[inline]
    pub fn location(&self) -> Option<(u16, &'static str)> {
        self.file.map(|file| (self.line, file))
    }
}

// ─── Fault Event ────────────────────────────────────────────────────

/// A captured fault: identifier and payload travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultEvent {
    /// [`FaultId::SDK_ERROR`] with its error record.
    Error(ErrorInfo),
    /// [`FaultId::SDK_ASSERT`] with its assert record.
    Assert(AssertInfo),
    /// Any other identifier. `info` is an opaque auxiliary word, 0 for none.
    ///
    /// Reporters never decode `info`; constructing this variant with one of
    /// the SDK identifiers yields a header-only report.
    Unknown {
        /// Raw identifier.
        id: FaultId,
        /// Opaque auxiliary word.
        info: usize,
    },
}

impl FaultEvent {
    /// Identifier of this fault.
    pub const fn id(&self) -> FaultId {
        match self {
            Self::Error(_) => FaultId::SDK_ERROR,
            Self::Assert(_) => FaultId::SDK_ASSERT,
            Self::Unknown { id, .. } => *id,
        }
    }

    /// The "info pointer" word: payload address for known identifiers,
    /// the opaque word otherwise.
    pub fn info_addr(&self) -> usize {
        match self {
            Self::Error(info) => info as *const ErrorInfo as usize,
            Self::Assert(info) => info as *const AssertInfo as usize,
            Self::Unknown { info, .. } => *info,
        }
    }

    /// Status code for [`FaultEvent::Error`].
    pub const fn error_code(&self) -> Option<StatusCode> {
        match self {
            Self::Error(info) => Some(info.code),
            _ => None,
        }
    }
}

//! Check operations: the only transitions from nominal to faulted.
//!
//! Each check takes its argument as an ordinary parameter, so the checked
//! expression is evaluated exactly once at the call site. With
//! `capture-location` the caller's line and file are forwarded through
//! `#[track_caller]`; without it only the code travels.

use crate::fault::StatusCode;
use crate::handler;

/// Escalate `code` unless it is [`StatusCode::SUCCESS`].
///
/// ```rust,no_run
/// use fault_reporter::check_result;
///
/// fn radio_init() -> u32 { 0 }
///
/// check_result(radio_init());
/// ```
#[inline]
#[track_caller]
pub fn check_result(code: impl Into<StatusCode>) {
    let code = code.into();
    if !code.is_success() {
        escalate_code(code);
    }
}

/// Escalate with code 0 when `condition` is false.
#[inline]
#[track_caller]
pub fn check_bool(condition: bool) {
    if !condition {
        escalate_code(StatusCode::NEUTRAL);
    }
}

/// Escalate a [`FaultEvent::Assert`](crate::FaultEvent::Assert) when
/// `condition` is false.
#[inline]
#[track_caller]
pub fn check_assert(condition: bool) {
    if !condition {
        escalate_assert();
    }
}

#[cold]
#[track_caller]
fn escalate_code(code: StatusCode) -> ! {
    if cfg!(feature = "capture-location") {
        handler::handle_checked_result(code)
    } else {
        handler::handle_checked_result_minimal(code)
    }
}

#[cold]
#[track_caller]
fn escalate_assert() -> ! {
    if cfg!(feature = "capture-location") {
        handler::handle_assert()
    } else {
        handler::handle_assert_minimal()
    }
}

/// Escalate the error of a `Result` instead of propagating it.
///
/// An `Err` always escalates, even if its code converts to zero.
pub trait OrFault<T> {
    /// The `Ok` value, or escalation with the error's status code.
    fn or_fault(self) -> T;
}

impl<T, E: Into<StatusCode>> OrFault<T> for Result<T, E> {
    #[inline]
    #[track_caller]
    fn or_fault(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => escalate_code(e.into()),
        }
    }
}

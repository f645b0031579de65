//! # Check Operation Tests
//!
//! Drives the check operations against a recording handler. The handler
//! records the escalation on the current thread and unwinds with an
//! `Escalated` marker so the test can observe it without halting.
//!
//! - Non-success codes escalate exactly once with the same code
//! - Success never escalates
//! - Boolean checks escalate with code 0
//! - Arguments are evaluated exactly once
//! - Call-site capture and the text rendering of the captured fault

use fault_reporter::{
    check_assert, check_bool, check_result, handle_checked_result_minimal, set_fault_handler,
    write_fault, FaultEvent, FaultId, OrFault, StatusCode,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Once;

// ─── Helpers ────────────────────────────────────────────────────────

struct Escalated;

thread_local! {
    static ESCALATIONS: RefCell<Vec<(u32, FaultEvent)>> = const { RefCell::new(Vec::new()) };
}

fn recording_handler(pc: u32, fault: &FaultEvent) -> ! {
    ESCALATIONS.with(|e| e.borrow_mut().push((pc, *fault)));
    std::panic::panic_any(Escalated)
}

/// Silence the default panic message for expected escalations.
fn quiet_escalations() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if !info.payload().is::<Escalated>() {
                default(info);
            }
        }));
    });
}

/// Run `f` and return every escalation it triggered.
fn record(f: impl FnOnce()) -> Vec<(u32, FaultEvent)> {
    quiet_escalations();
    set_fault_handler(recording_handler);
    ESCALATIONS.with(|e| e.borrow_mut().clear());

    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        assert!(payload.is::<Escalated>(), "unexpected panic in checked code");
    }
    ESCALATIONS.with(|e| e.borrow_mut().drain(..).collect())
}

// ─── check_result ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn failing_code_escalates_once_with_same_code(code in 1u32..=u32::MAX) {
        let escalations = record(|| check_result(code));
        prop_assert_eq!(escalations.len(), 1);
        let (pc, fault) = escalations[0];
        prop_assert_eq!(pc, 0);
        prop_assert_eq!(fault.id(), FaultId::SDK_ERROR);
        prop_assert_eq!(fault.error_code(), Some(StatusCode::new(code)));
    }

    #[test]
    fn bool_check_escalates_only_when_false(condition in any::<bool>()) {
        let escalations = record(|| check_bool(condition));
        if condition {
            prop_assert!(escalations.is_empty());
        } else {
            prop_assert_eq!(escalations.len(), 1);
            prop_assert_eq!(escalations[0].1.error_code(), Some(StatusCode::new(0)));
        }
    }
}

#[test]
fn success_never_escalates() {
    let escalations = record(|| {
        for _ in 0..1000 {
            check_result(StatusCode::SUCCESS);
            check_result(0u32);
        }
    });
    assert!(escalations.is_empty());
}

#[test]
fn true_bool_never_escalates() {
    let escalations = record(|| {
        for _ in 0..100 {
            check_bool(true);
        }
    });
    assert!(escalations.is_empty());
}

// ─── Single evaluation ──────────────────────────────────────────────

#[test]
fn result_argument_evaluated_once() {
    let mut calls = 0;
    let mut failing_op = || {
        calls += 1;
        0x0Bu32
    };
    let escalations = record(|| check_result(failing_op()));
    assert_eq!(escalations.len(), 1);
    assert_eq!(calls, 1);

    let mut calls = 0;
    let mut passing_op = || {
        calls += 1;
        0u32
    };
    record(|| check_result(passing_op()));
    assert_eq!(calls, 1);
}

#[test]
fn bool_argument_evaluated_once() {
    for expected in [true, false] {
        let mut calls = 0;
        let mut probe = || {
            calls += 1;
            expected
        };
        record(|| check_bool(probe()));
        assert_eq!(calls, 1, "condition {expected} evaluated {calls} times");
    }
}

// ─── Location capture ───────────────────────────────────────────────

#[cfg(feature = "capture-location")]
#[test]
fn failed_check_reports_call_site() {
    let mut expected_line = 0;
    let escalations = record(|| {
        expected_line = line!() + 1;
        check_result(0x0Bu32);
    });

    assert_eq!(escalations.len(), 1);
    let (pc, fault) = escalations[0];
    let FaultEvent::Error(info) = fault else {
        panic!("expected an error fault, got {fault:?}");
    };
    assert_eq!(info.code, StatusCode::new(0x0B));
    assert_eq!(u32::from(info.line), expected_line);
    assert_eq!(info.file, Some(file!()));

    let mut out = Vec::new();
    write_fault(&mut out, pc, &fault).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Fault identifier:  0x4001\r\n"), "got: {text}");
    assert!(text.contains("Program counter:   0x0\r\n"), "got: {text}");
    assert!(text.contains(&format!("Line Number: {expected_line}\r\n")), "got: {text}");
    assert!(text.contains(&format!("File Name:   {}\r\n", file!())), "got: {text}");
    assert!(text.contains("Error Code:  0x0B\r\n"), "got: {text}");
}

#[cfg(not(feature = "capture-location"))]
#[test]
fn failed_check_omits_location_in_minimal_build() {
    let escalations = record(|| check_result(0x0Bu32));
    let FaultEvent::Error(info) = escalations[0].1 else {
        panic!("expected an error fault");
    };
    assert_eq!(info.file, None);
    assert_eq!(info.line, 0);
    assert_eq!(info.code, StatusCode::new(0x0B));
}

#[test]
fn minimal_entry_never_captures_location() {
    let escalations = record(|| handle_checked_result_minimal(StatusCode::new(0x11)));
    assert_eq!(escalations.len(), 1);
    let FaultEvent::Error(info) = escalations[0].1 else {
        panic!("expected an error fault");
    };
    assert_eq!(info.location(), None);
    assert_eq!(info.code, StatusCode::new(0x11));
}

// ─── Assertions ─────────────────────────────────────────────────────

#[test]
fn failed_assert_escalates_assert_fault() {
    let escalations = record(|| check_assert(false));
    assert_eq!(escalations.len(), 1);
    let fault = escalations[0].1;
    let FaultEvent::Assert(info) = fault else {
        panic!("expected an assert fault, got {fault:?}");
    };
    if cfg!(feature = "capture-location") {
        assert_eq!(info.file, Some(file!()));
    } else {
        assert_eq!(info.file, None);
    }
    assert_eq!(fault.id(), FaultId::SDK_ASSERT);
    assert_eq!(fault.error_code(), None);
}

#[test]
fn passing_assert_is_silent() {
    assert!(record(|| check_assert(true)).is_empty());
}

// ─── OrFault ────────────────────────────────────────────────────────

#[test]
fn or_fault_unwraps_ok() {
    let mut value = 0;
    let escalations = record(|| value = Ok::<u8, u32>(5).or_fault());
    assert!(escalations.is_empty());
    assert_eq!(value, 5);
}

#[test]
fn or_fault_escalates_err_code() {
    let escalations = record(|| {
        let _: u8 = Err::<u8, u32>(0x13).or_fault();
    });
    assert_eq!(escalations.len(), 1);
    assert_eq!(escalations[0].1.error_code(), Some(StatusCode::new(0x13)));
}

//! Human-readable fault reports.
//!
//! Two interchangeable sinks:
//!
//! - [`log_fault`] emits one structured `tracing` event. The subscriber is
//!   owned by the application and must be installed before the first fault.
//! - [`write_fault`] / [`print_fault`] render fixed-format text, the layout
//!   a serial console or post-mortem tool expects.
//!
//! Both sinks stay inert for identifiers they do not know and only emit
//! location fields when a file name was captured.

use crate::fault::{FaultEvent, FaultId};
use std::io::{self, Write};
use tracing::error;

/// Emit `fault` through the structured logger.
///
/// Fields: `line` and `file` when a file name is present, plus `code` for
/// [`FaultEvent::Error`]. Unknown identifiers produce nothing.
pub fn log_fault(pc: u32, fault: &FaultEvent) {
    match fault {
        FaultEvent::Assert(info) => match info.location() {
            Some((line, file)) => error!(pc, line, file, "*** ASSERTION FAILED ***"),
            None => error!(pc, "*** ASSERTION FAILED ***"),
        },
        FaultEvent::Error(info) => match info.location() {
            Some((line, file)) => error!(
                pc,
                line,
                file,
                code = %info.code,
                "*** APPLICATION ERROR ***"
            ),
            None => error!(pc, code = %info.code, "*** APPLICATION ERROR ***"),
        },
        FaultEvent::Unknown { .. } => {}
    }
}

/// Write the three header lines common to every text report.
pub fn write_header<W: Write>(out: &mut W, id: FaultId, pc: u32, info: usize) -> io::Result<()> {
    write!(out, "Fault report:\r\n")?;
    write!(out, "Fault identifier:  {id}\r\n")?;
    write!(out, "Program counter:   0x{pc:X}\r\n")?;
    write!(out, "Fault information: 0x{info:X}\r\n")
}

/// Render `fault` as formatted text.
///
/// The header is written for every identifier; decoded fields follow for
/// [`FaultEvent::Error`] and [`FaultEvent::Assert`].
pub fn write_fault<W: Write>(out: &mut W, pc: u32, fault: &FaultEvent) -> io::Result<()> {
    write_header(out, fault.id(), pc, fault.info_addr())?;

    match fault {
        FaultEvent::Assert(info) => {
            if let Some((line, file)) = info.location() {
                write_location(out, line, file)?;
            }
        }
        FaultEvent::Error(info) => {
            if let Some((line, file)) = info.location() {
                write_location(out, line, file)?;
            }
            write!(out, "Error Code:  {}\r\n", info.code)?;
        }
        FaultEvent::Unknown { .. } => {}
    }
    Ok(())
}

fn write_location<W: Write>(out: &mut W, line: u16, file: &str) -> io::Result<()> {
    write!(out, "Line Number: {line}\r\n")?;
    write!(out, "File Name:   {file}\r\n")
}

/// Render `fault` on standard output.
///
/// Write errors are dropped: reporting a fault must not raise another one.
pub fn print_fault(pc: u32, fault: &FaultEvent) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = write_fault(&mut out, pc, fault).and_then(|()| out.flush());
}

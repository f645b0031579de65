//! Rendering and housekeeping for a persisted fault record.

use fault_reporter::report::write_header;
use fault_reporter::{FaultRecord, FaultStore, MappedStore, StoreError};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Print `record` as the header block of a text report plus its
/// classification. Location fields are not persisted; the error code is.
pub fn render_record<W: Write>(out: &mut W, record: Option<&FaultRecord>) -> io::Result<()> {
    let Some(record) = record else {
        return write!(out, "No fault record.\r\n");
    };

    write_header(out, record.fault_id(), record.pc, record.info)?;
    let kind = record.fault_id().name().unwrap_or("unknown");
    write!(out, "Fault type:        {kind}\r\n")?;
    if let Some(code) = record.error_code() {
        write!(out, "Error Code:  {code}\r\n")?;
    }
    Ok(())
}

/// Read the record at `path`, print it, and optionally clear it.
pub fn inspect<W: Write>(out: &mut W, path: &Path, clear: bool) -> Result<(), StoreError> {
    debug!("Opening fault record {}", path.display());
    let mut store = MappedStore::open_existing(path)?;
    let record = store.load()?;

    render_record(out, record.as_ref())?;
    out.flush()?;

    if clear && record.is_some() {
        store.clear()?;
        info!("Fault record cleared");
    }
    Ok(())
}

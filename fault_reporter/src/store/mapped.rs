//! Memory-mapped record file.
//!
//! Layout (little endian, 32 bytes):
//!
//! ```text
//! 0..4    magic     RECORD_MAGIC when a record is present
//! 4..8    id
//! 8..12   pc
//! 12..16  code      error code, 0 unless id is SDK_ERROR
//! 16..24  info      u64
//! 24..32  padding
//! ```
//!
//! The magic word is cleared before the fields are rewritten and set last,
//! then the mapping is flushed.

use super::{FaultRecord, FaultStore, StoreError, StoreResult};
use memmap2::MmapMut;
use static_assertions::const_assert;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of the record file in bytes.
pub const RECORD_BYTES: usize = 32;

/// Marks a valid record ("FLT1").
pub const RECORD_MAGIC: u32 = 0x3154_4C46;

const MAGIC_OFFSET: usize = 0;
const ID_OFFSET: usize = 4;
const PC_OFFSET: usize = 8;
const CODE_OFFSET: usize = 12;
const INFO_OFFSET: usize = 16;

const_assert!(INFO_OFFSET + 8 <= RECORD_BYTES);
const_assert!(std::mem::size_of::<usize>() <= 8);

/// [`FaultStore`] backed by a memory-mapped file.
pub struct MappedStore {
    path: PathBuf,
    mmap: MmapMut,
}

impl MappedStore {
    /// Open the record file, creating it (and its parent directory) if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Self::map(path, true)
    }

    /// Open an existing record file. Fails with `NotFound` if it is missing.
    pub fn open_existing(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::map(path.as_ref(), false)
    }

    fn map(path: &Path, create: bool) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(create)
            .truncate(false)
            .open(path)?;

        let size = file.metadata()?.len();
        if size == 0 && create {
            file.set_len(RECORD_BYTES as u64)?;
        } else if size != RECORD_BYTES as u64 {
            return Err(StoreError::InvalidSize {
                size,
                expected: RECORD_BYTES as u64,
            });
        }

        // SAFETY: the record file is owned by the fault path; it is never
        // truncated while mapped.
        let mmap = unsafe { MmapMut::map_mut(&file)? };
        debug!("Mapped fault record file {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_u32(&self, offset: usize) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.mmap[offset..offset + 4]);
        u32::from_le_bytes(word)
    }

    fn read_u64(&self, offset: usize) -> u64 {
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.mmap[offset..offset + 8]);
        u64::from_le_bytes(word)
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) {
        self.mmap[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

impl FaultStore for MappedStore {
    fn save(&mut self, record: &FaultRecord) -> StoreResult<()> {
        self.write_bytes(MAGIC_OFFSET, &0u32.to_le_bytes());
        self.write_bytes(ID_OFFSET, &record.id.to_le_bytes());
        self.write_bytes(PC_OFFSET, &record.pc.to_le_bytes());
        self.write_bytes(CODE_OFFSET, &record.code.to_le_bytes());
        self.write_bytes(INFO_OFFSET, &(record.info as u64).to_le_bytes());
        self.write_bytes(MAGIC_OFFSET, &RECORD_MAGIC.to_le_bytes());
        self.mmap.flush()?;
        Ok(())
    }

    fn load(&self) -> StoreResult<Option<FaultRecord>> {
        if self.read_u32(MAGIC_OFFSET) != RECORD_MAGIC {
            return Ok(None);
        }
        Ok(Some(FaultRecord {
            id: self.read_u32(ID_OFFSET),
            pc: self.read_u32(PC_OFFSET),
            info: usize::try_from(self.read_u64(INFO_OFFSET)).unwrap_or(usize::MAX),
            code: self.read_u32(CODE_OFFSET),
        }))
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.mmap.fill(0);
        self.mmap.flush()?;
        Ok(())
    }
}

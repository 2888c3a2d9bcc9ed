// ─────────────────────────────────────────────────────────────────────
// PIC Post — Frame Series
// ─────────────────────────────────────────────────────────────────────
//! Numbered dump series in one directory. Runs drop a dump per output
//! interval; analysis walks an index range and tolerates the frames a
//! crashed or restarted run never wrote.

use crate::archive::Snapshot;
use log::warn;
use pic_types::error::PicResult;
use std::path::PathBuf;

/// Dump series `<prefix>0001<suffix>`, `<prefix>0002<suffix>`, ...
#[derive(Debug, Clone)]
pub struct FrameSeries {
    dir: PathBuf,
    prefix: String,
    suffix: String,
}

impl FrameSeries {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        FrameSeries {
            dir: dir.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Archive path of one frame; indices zero-pad to four digits.
    pub fn frame_path(&self, index: u32) -> PathBuf {
        self.dir
            .join(format!("{}{:04}{}", self.prefix, index, self.suffix))
    }

    /// Open a frame that must exist.
    pub fn open(&self, index: u32) -> PicResult<Snapshot> {
        Snapshot::open(self.frame_path(index))
    }

    /// Open a frame, or `None` with a warning when the dump is absent.
    /// An archive that exists but cannot be read stays a hard error.
    pub fn try_open(&self, index: u32) -> PicResult<Option<Snapshot>> {
        let path = self.frame_path(index);
        if !path.exists() {
            warn!("frame {index} missing at '{}'", path.display());
            return Ok(None);
        }
        Snapshot::open(path).map(Some)
    }
}

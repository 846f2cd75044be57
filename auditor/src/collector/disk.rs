//! Filesystem usage via `statvfs(2)`

use std::io;
use std::path::Path;

use nix::errno::Errno;
use nix::sys::statvfs::statvfs;

use super::RawDiskUsage;
use crate::error::{CollectorError, CollectorResult};

/// Usage of the filesystem containing `path`.
///
/// `used` counts every allocated block, including the root reserve, while
/// `available` is what unprivileged users can still write; a missing path
/// yields `None`.
pub(crate) fn filesystem_usage(path: &Path) -> CollectorResult<Option<RawDiskUsage>> {
    let stat = match statvfs(path) {
        Ok(stat) => stat,
        Err(Errno::ENOENT) | Err(Errno::ENOTDIR) => return Ok(None),
        Err(errno) => {
            return Err(CollectorError::Filesystem {
                path: path.display().to_string(),
                source: io::Error::from(errno),
            })
        }
    };

    let block = stat.fragment_size() as u64;
    let total_bytes = stat.blocks() as u64 * block;
    let free_bytes = stat.blocks_free() as u64 * block;
    let available_bytes = stat.blocks_available() as u64 * block;

    Ok(Some(RawDiskUsage {
        total_bytes,
        used_bytes: total_bytes.saturating_sub(free_bytes),
        available_bytes,
    }))
}

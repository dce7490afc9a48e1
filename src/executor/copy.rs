//! Byte-for-byte file copy

use crate::types::PapercopyError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Copy `src` to `dest`, returning the number of bytes written
///
/// 1. Create the destination's parent directory if needed
/// 2. Stream from `src` into a newly created `dest`
/// 3. Flush and sync to disk
///
/// Both handles are closed on every exit path. A failed copy may leave a
/// partially written `dest` behind; it is not removed.
///
/// # Example
/// ```no_run
/// use papercopy::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("scan.pdf"), Path::new("/consume/scan.pdf"))?;
/// # Ok::<(), papercopy::types::PapercopyError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, PapercopyError> {
    let copy_error = |source| PapercopyError::Copy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(copy_error)?;
        }
    }

    let mut src_file = File::open(src).map_err(copy_error)?;
    let mut dest_file = File::create(dest).map_err(copy_error)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(copy_error)?;

        if bytes_read == 0 {
            break; // EOF
        }

        dest_file
            .write_all(&buffer[0..bytes_read])
            .map_err(copy_error)?;
        total_bytes += bytes_read as u64;
    }

    dest_file.sync_all().map_err(copy_error)?;

    Ok(total_bytes)
}

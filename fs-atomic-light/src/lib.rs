use data_error::Result;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write data to a temporary file next to the destination and rename it
/// over `dest_dir/filename`.
///
/// Readers observe either the previous file or the new one, never a
/// partially written file. Concurrent writers to the same destination
/// do not share temporary files; the last rename wins.
pub fn temp_and_move(
    data: &[u8],
    dest_dir: impl AsRef<Path>,
    filename: &str,
) -> Result<()> {
    let dest_dir = dest_dir.as_ref();
    fs::create_dir_all(dest_dir)?;

    let temp_path = dest_dir.join(format!(
        ".{}.{}.{}.tmp",
        filename,
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }

    if let Err(err) = fs::rename(&temp_path, dest_dir.join(filename)) {
        let _ = fs::remove_file(&temp_path);
        return Err(err.into());
    }
    Ok(())
}

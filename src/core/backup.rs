use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::path::with_suffix;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Number of rotated snapshots kept next to the log (`.bak1` .. `.bak3`).
pub const BACKUP_DEPTH: usize = 3;

/// Path of the `n`-th rotated snapshot (1 = most recent prior state).
pub fn backup_path(log: &Path, n: usize) -> PathBuf {
    with_suffix(log, &format!(".bak{n}"))
}

/// Shift the snapshot ring by one and copy the current log into `.bak1`.
///
/// The oldest snapshot is dropped, every other one moves one slot down.
/// A missing log only shifts the ring.
pub fn rotate(log: &Path) -> io::Result<()> {
    let oldest = backup_path(log, BACKUP_DEPTH);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }

    for n in (1..BACKUP_DEPTH).rev() {
        let from = backup_path(log, n);
        if from.exists() {
            fs::rename(&from, backup_path(log, n + 1))?;
        }
    }

    if log.exists() {
        fs::copy(log, backup_path(log, 1))?;
    }

    Ok(())
}

/// Snapshots currently present, most recent first.
pub fn list_backups(log: &Path) -> Vec<PathBuf> {
    (1..=BACKUP_DEPTH)
        .map(|n| backup_path(log, n))
        .filter(|p| p.exists())
        .collect()
}

pub struct BackupLogic;

impl BackupLogic {
    /// One-off copy of the log to `dest_file`, optionally zipped.
    pub fn backup(log: &Path, dest_file: &str, compress: bool) -> AppResult<()> {
        let dest = Path::new(dest_file);

        // 1️⃣ Check log exists
        if !log.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Meal log not found: {}", log.display()),
            )
            .into());
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        // 2.5️⃣ If destination file exists → ask confirmation
        if dest.exists() && !confirm_overwrite(dest)? {
            println!("❌ Backup cancelled by user.");
            return Ok(());
        }

        // 3️⃣ Copy log
        fs::copy(log, dest)?;
        success(format!("Backup created: {}", dest.display()));

        // 4️⃣ Optional compression
        if compress {
            compress_backup(dest)?;
            if let Err(e) = fs::remove_file(dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            } else {
                println!("🗑️ Removed uncompressed backup: {}", dest.display());
            }
        }

        Ok(())
    }
}

fn confirm_overwrite(dest: &Path) -> io::Result<bool> {
    use std::io::{Write, stdin, stdout};

    println!(
        "⚠️  The file '{}' already exists.\nDo you want to overwrite it? [y/N]: ",
        dest.display()
    );
    print!("> ");
    stdout().flush().ok();

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Compress a backup into `<path>.zip`
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = with_suffix(path, ".zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "mealtime_log.csv".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry_name, options)
        .map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    println!("📦 Compressed: {}", zip_path.display());

    Ok(zip_path)
}

use crate::db::Repository;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm;
use crate::utils::path::resolve_output;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Write a consistent snapshot of the database to `dest_file`,
    /// optionally compressed into a `.zip` next to it.
    ///
    /// Returns the final path, or `None` if the operator declined to
    /// overwrite an existing file.
    pub fn backup(
        repo: &Repository,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let dest = resolve_output(dest_file)?;

        // 1️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        // 2️⃣ Existing destination → ask confirmation
        if dest.exists() {
            if !force
                && !confirm(&format!(
                    "The file '{}' already exists. Overwrite?",
                    dest.display()
                ))
            {
                info("Backup cancelled.");
                return Ok(None);
            }
            // VACUUM INTO refuses to overwrite
            fs::remove_file(&dest)?;
        }

        // 3️⃣ Snapshot database
        let dest_str = dest
            .to_str()
            .ok_or_else(|| AppError::Other(format!("invalid path: {}", dest.display())))?;
        repo.conn().execute("VACUUM INTO ?1", [dest_str])?;
        success(format!("Backup created: {}", dest.display()));

        // 4️⃣ Optional compression
        let final_path = if compress {
            let compressed = compress_backup(&dest)?;

            if let Err(e) = fs::remove_file(&dest) {
                warning(format!("Failed to remove uncompressed backup: {}", e));
            }

            compressed
        } else {
            dest
        };

        // 5️⃣ Log in DB
        if let Err(e) = repo.log(
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        ) {
            warn!(error = %e, "failed to write internal log");
        }

        Ok(Some(final_path))
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = match path.extension() {
        Some(ext) if ext == "zip" => path.with_extension("backup.zip"),
        _ => path.with_extension("zip"),
    };
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "libattend.sqlite".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(entry, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(zip_path)
}

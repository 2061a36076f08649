//! Persisting exported bytes as local files.

use crate::config::{FileCollisionAction, OutputConfig};
use crate::error::{Error, Result};
use crate::types::DocumentType;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Base name used when the caller leaves the file name blank
pub const DEFAULT_BASE_NAME: &str = "export";

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Maximum number of times a staged file is moved before giving up on a contended name
const MAX_PERSIST_ATTEMPTS: u32 = 8;

/// Derive the saved file name: `base + "." + extension`
///
/// The base is used as given. Only a blank (empty or all-whitespace) base falls
/// back to [`DEFAULT_BASE_NAME`]. Bases that could escape the output directory are rejected.
///
/// # Examples
///
/// ```
/// use office_export_client::DocumentType;
/// use office_export_client::sink::file_name_for;
///
/// assert_eq!(file_name_for("export", DocumentType::Excel).unwrap(), "export.xlsx");
/// assert_eq!(file_name_for("export", DocumentType::Word).unwrap(), "export.word");
/// ```
pub fn file_name_for(base_name: &str, document_type: DocumentType) -> Result<String> {
    let base = if base_name.trim().is_empty() {
        DEFAULT_BASE_NAME
    } else {
        base_name
    };

    if base.contains(['/', '\\']) || base == "." || base == ".." {
        return Err(Error::InvalidFileName {
            name: base_name.to_string(),
            reason: "must be a plain file name without directory components".to_string(),
        });
    }
    if base.contains('\0') {
        return Err(Error::InvalidFileName {
            name: base_name.to_string(),
            reason: "contains a NUL byte".to_string(),
        });
    }

    Ok(format!("{}.{}", base, document_type.extension()))
}

/// Get a unique path for a file, handling collisions according to the specified action
///
/// For `Rename`, `report.xlsx` becomes `report (1).xlsx`, then `report (2).xlsx`, and so on.
pub fn get_unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => Ok(path.to_path_buf()),
        FileCollisionAction::Skip => {
            if path.exists() {
                return Err(Error::FileCollision {
                    path: path.to_path_buf(),
                    reason: "file already exists and collision action is skip".to_string(),
                });
            }
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Rename => {
            if !path.exists() {
                return Ok(path.to_path_buf());
            }

            let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
                Error::InvalidFileName {
                    name: path.display().to_string(),
                    reason: "cannot extract file stem".to_string(),
                }
            })?;
            let extension = path.extension().and_then(|e| e.to_str());
            let parent = path.parent().unwrap_or_else(|| Path::new("."));

            for i in 1..=MAX_RENAME_ATTEMPTS {
                let new_name = match extension {
                    Some(ext) => format!("{} ({}).{}", stem, i, ext),
                    None => format!("{} ({})", stem, i),
                };
                let new_path = parent.join(new_name);
                if !new_path.exists() {
                    return Ok(new_path);
                }
            }

            Err(Error::FileCollision {
                path: path.to_path_buf(),
                reason: format!(
                    "could not find unique filename after {} attempts",
                    MAX_RENAME_ATTEMPTS
                ),
            })
        }
    }
}

/// Persists exported bytes under a derived file name
///
/// Saving is synchronous. Implementations must not leave partial files behind
/// when they fail.
pub trait DownloadSink: Send + Sync {
    /// Save `bytes` as `suggested_base_name.<extension>` and return where it landed
    fn save(
        &self,
        bytes: &[u8],
        suggested_base_name: &str,
        document_type: DocumentType,
    ) -> Result<PathBuf>;
}

/// [`DownloadSink`] writing into a local directory
///
/// Bytes are first written to a staged temporary file next to the target and
/// renamed into place. The staged file is owned by a [`tempfile::NamedTempFile`],
/// so it is removed on every exit path that does not reach the rename.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    collision: FileCollisionAction,
}

impl DirectorySink {
    /// Create a sink for a directory
    pub fn new(dir: impl Into<PathBuf>, collision: FileCollisionAction) -> Self {
        Self {
            dir: dir.into(),
            collision,
        }
    }

    /// Create a sink from the output configuration
    pub fn from_config(output: &OutputConfig) -> Self {
        Self::new(output.output_dir.clone(), output.file_collision)
    }
}

impl DownloadSink for DirectorySink {
    fn save(
        &self,
        bytes: &[u8],
        suggested_base_name: &str,
        document_type: DocumentType,
    ) -> Result<PathBuf> {
        let file_name = file_name_for(suggested_base_name, document_type)?;
        std::fs::create_dir_all(&self.dir)?;
        let wanted = self.dir.join(&file_name);
        let target = get_unique_path(&wanted, self.collision)?;

        let mut staged = tempfile::Builder::new()
            .prefix(".export-")
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;

        let target = persist_staged(staged, &wanted, target, self.collision)?;

        tracing::info!(path = ?target, bytes = bytes.len(), "export saved");
        Ok(target)
    }
}

/// Move a staged file into place without clobbering under `Rename` or `Skip`
///
/// A file that shows up at `target` after the collision check is still honoured:
/// `Skip` refuses and `Rename` picks the next free name derived from `wanted`.
fn persist_staged(
    mut staged: tempfile::NamedTempFile,
    wanted: &Path,
    mut target: PathBuf,
    action: FileCollisionAction,
) -> Result<PathBuf> {
    for _ in 0..MAX_PERSIST_ATTEMPTS {
        let result = match action {
            FileCollisionAction::Overwrite => staged.persist(&target),
            FileCollisionAction::Rename | FileCollisionAction::Skip => {
                staged.persist_noclobber(&target)
            }
        };

        let e = match result {
            Ok(_) => return Ok(target),
            Err(e) => e,
        };

        if e.error.kind() != std::io::ErrorKind::AlreadyExists
            || action == FileCollisionAction::Overwrite
        {
            tracing::warn!(
                path = ?target,
                error = %e.error,
                "failed to move staged export into place"
            );
            return Err(Error::Io(e.error));
        }

        if action == FileCollisionAction::Skip {
            return Err(Error::FileCollision {
                path: target,
                reason: "file appeared while saving and collision action is skip".to_string(),
            });
        }

        tracing::debug!(path = ?target, "target taken while saving, picking another name");
        staged = e.file;
        target = get_unique_path(wanted, action)?;
    }

    Err(Error::FileCollision {
        path: wanted.to_path_buf(),
        reason: format!(
            "target kept being taken after {} attempts",
            MAX_PERSIST_ATTEMPTS
        ),
    })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn staged_leftovers(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".part"))
            .collect()
    }

    #[test]
    fn excel_file_name_uses_xlsx() {
        assert_eq!(
            file_name_for("export", DocumentType::Excel).unwrap(),
            "export.xlsx"
        );
    }

    #[test]
    fn word_file_name_keeps_literal_word_extension() {
        // Regression pin: the saved extension is the raw type token, not docx
        assert_eq!(
            file_name_for("export", DocumentType::Word).unwrap(),
            "export.word"
        );
    }

    #[test]
    fn pdf_file_name_uses_pdf() {
        assert_eq!(
            file_name_for("季度报告", DocumentType::Pdf).unwrap(),
            "季度报告.pdf"
        );
    }

    #[test]
    fn blank_base_name_falls_back_to_default() {
        assert_eq!(file_name_for("   ", DocumentType::Pdf).unwrap(), "export.pdf");
        assert_eq!(file_name_for("", DocumentType::Excel).unwrap(), "export.xlsx");
    }

    #[test]
    fn base_name_is_used_verbatim() {
        assert_eq!(file_name_for(" q3 ", DocumentType::Excel).unwrap(), " q3 .xlsx");
        assert_eq!(file_name_for("季度 报价", DocumentType::Pdf).unwrap(), "季度 报价.pdf");
    }

    #[test]
    fn base_name_with_directories_is_rejected() {
        for bad in ["../escape", "a/b", "a\\b", ".."] {
            assert!(
                matches!(
                    file_name_for(bad, DocumentType::Excel),
                    Err(Error::InvalidFileName { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn save_writes_bytes_under_derived_name() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path(), FileCollisionAction::Rename);

        let path = sink.save(b"PK\x03\x04data", "export", DocumentType::Excel).unwrap();

        assert_eq!(path, dir.path().join("export.xlsx"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04data");
        assert!(staged_leftovers(dir.path()).is_empty());
    }

    #[test]
    fn save_creates_missing_output_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("exports").join("2026");
        let sink = DirectorySink::new(&nested, FileCollisionAction::Rename);

        let path = sink.save(b"x", "report", DocumentType::Word).unwrap();

        assert_eq!(path, nested.join("report.word"));
    }

    #[test]
    fn rename_collision_appends_counter() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path(), FileCollisionAction::Rename);

        let first = sink.save(b"one", "export", DocumentType::Pdf).unwrap();
        let second = sink.save(b"two", "export", DocumentType::Pdf).unwrap();
        let third = sink.save(b"three", "export", DocumentType::Pdf).unwrap();

        assert_eq!(first, dir.path().join("export.pdf"));
        assert_eq!(second, dir.path().join("export (1).pdf"));
        assert_eq!(third, dir.path().join("export (2).pdf"));
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
    }

    #[test]
    fn overwrite_collision_replaces_contents() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path(), FileCollisionAction::Overwrite);

        sink.save(b"old", "export", DocumentType::Excel).unwrap();
        let path = sink.save(b"new", "export", DocumentType::Excel).unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"new");
    }

    #[test]
    fn skip_collision_refuses_and_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path(), FileCollisionAction::Skip);

        sink.save(b"kept", "export", DocumentType::Excel).unwrap();
        let err = sink.save(b"dropped", "export", DocumentType::Excel).unwrap_err();

        assert!(matches!(err, Error::FileCollision { .. }));
        assert_eq!(
            std::fs::read(dir.path().join("export.xlsx")).unwrap(),
            b"kept"
        );
        assert!(staged_leftovers(dir.path()).is_empty());
    }

    #[test]
    fn failed_persist_removes_staged_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory squatting on the target name makes the final rename fail
        let squatter = dir.path().join("export.xlsx");
        std::fs::create_dir(&squatter).unwrap();
        std::fs::write(squatter.join("keep"), b"x").unwrap();
        let sink = DirectorySink::new(dir.path(), FileCollisionAction::Overwrite);

        let result = sink.save(b"bytes", "export", DocumentType::Excel);

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(
            staged_leftovers(dir.path()).is_empty(),
            "staged file must be released on the error path"
        );
    }

    fn staged_in(dir: &Path, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut staged = tempfile::Builder::new()
            .prefix(".export-")
            .suffix(".part")
            .tempfile_in(dir)
            .unwrap();
        staged.write_all(bytes).unwrap();
        staged
    }

    #[test]
    fn file_appearing_after_check_is_not_clobbered_under_rename() {
        let dir = tempdir().unwrap();
        let wanted = dir.path().join("export.xlsx");
        let target = get_unique_path(&wanted, FileCollisionAction::Rename).unwrap();
        // Another writer takes the name between the check and the move
        std::fs::write(&wanted, b"theirs").unwrap();

        let saved = persist_staged(
            staged_in(dir.path(), b"ours"),
            &wanted,
            target,
            FileCollisionAction::Rename,
        )
        .unwrap();

        assert_eq!(saved, dir.path().join("export (1).xlsx"));
        assert_eq!(std::fs::read(&wanted).unwrap(), b"theirs");
        assert_eq!(std::fs::read(&saved).unwrap(), b"ours");
        assert!(staged_leftovers(dir.path()).is_empty());
    }

    #[test]
    fn file_appearing_after_check_is_not_clobbered_under_skip() {
        let dir = tempdir().unwrap();
        let wanted = dir.path().join("export.pdf");
        let target = get_unique_path(&wanted, FileCollisionAction::Skip).unwrap();
        std::fs::write(&wanted, b"theirs").unwrap();

        let err = persist_staged(
            staged_in(dir.path(), b"ours"),
            &wanted,
            target,
            FileCollisionAction::Skip,
        )
        .unwrap_err();

        assert!(matches!(err, Error::FileCollision { .. }));
        assert_eq!(std::fs::read(&wanted).unwrap(), b"theirs");
        assert!(staged_leftovers(dir.path()).is_empty());
    }
}

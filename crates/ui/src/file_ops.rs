//! File Operations for Entiform
//!
//! Native file dialogs (via `rfd`) for file-kind fields. Picked files are
//! described by name, size (from file metadata) and a MIME type guessed from
//! the extension; the form stores that description, not the contents.

use entiform_core::{EditorError, EditorResult};
use entiform_schema::FileInfo;
use rfd::AsyncFileDialog;
use std::path::{Path, PathBuf};

/// Display name for the accepted-types filter
pub const FILE_TYPE_NAME: &str = "Accepted Files";

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Show an open dialog for one or several files.
///
/// When `accept` lists MIME types with known extensions the dialog is
/// filtered to them. Returns None if the dialog was cancelled.
pub async fn show_pick_dialog(multiple: bool, accept: &[String]) -> Option<Vec<PathBuf>> {
    let mut dialog = AsyncFileDialog::new().set_title(if multiple {
        "Choose Files"
    } else {
        "Choose File"
    });

    let extensions = extensions_for_mimes(accept);
    if !extensions.is_empty() {
        dialog = dialog.add_filter(FILE_TYPE_NAME, &extensions);
    }
    dialog = dialog.add_filter("All Files", &["*"]);

    let picked = if multiple {
        dialog.pick_files().await?
    } else {
        vec![dialog.pick_file().await?]
    };
    Some(picked.iter().map(|f| f.path().to_path_buf()).collect())
}

/// Pick files and describe them.
///
/// Cancelling the dialog yields [`EditorError::Cancelled`].
pub async fn pick_files(multiple: bool, accept: &[String]) -> EditorResult<Vec<FileInfo>> {
    let paths = show_pick_dialog(multiple, accept)
        .await
        .ok_or(EditorError::Cancelled)?;
    let files = paths
        .iter()
        .map(|p| file_info(p))
        .collect::<EditorResult<Vec<_>>>()?;
    tracing::info!("Picked {} file(s)", files.len());
    Ok(files)
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Describe a file on disk
pub fn file_info(path: &Path) -> EditorResult<FileInfo> {
    let metadata = std::fs::metadata(path).map_err(|e| EditorError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(FileInfo::new(
        display_name(path),
        metadata.len(),
        mime.essence_str(),
    ))
}

/// Extensions for a list of MIME types; wildcards and unknown types are
/// skipped
pub fn extensions_for_mimes(accept: &[String]) -> Vec<&'static str> {
    let mut extensions: Vec<&'static str> = Vec::new();
    for mime in accept.iter().filter(|m| !m.ends_with("/*")) {
        for ext in mime_guess::get_mime_extensions_str(mime).unwrap_or_default() {
            if !extensions.contains(ext) {
                extensions.push(*ext);
            }
        }
    }
    extensions
}

/// File name without the directory
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_file_info_reads_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        std::fs::write(&path, [0u8; 42]).unwrap();

        let info = file_info(&path).unwrap();
        assert_eq!(info.name, "avatar.png");
        assert_eq!(info.size, 42);
        assert_eq!(info.mime, "image/png");
    }

    #[test]
    fn test_file_info_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.zzzunknown");
        std::fs::write(&path, b"x").unwrap();
        assert_eq!(file_info(&path).unwrap().mime, "application/octet-stream");
    }

    #[test]
    fn test_file_info_missing() {
        assert!(file_info(Path::new("/nonexistent/file.png")).unwrap_err().is_io());
    }

    #[test]
    fn test_extensions_for_mimes() {
        let exts = extensions_for_mimes(&["image/png".to_string(), "image/*".to_string()]);
        assert!(exts.contains(&"png"));
        assert!(extensions_for_mimes(&["x-unknown/none".to_string()]).is_empty());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/a/b.json")), "b.json");
    }
}
